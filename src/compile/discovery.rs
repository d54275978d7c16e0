//! Engine selection and discovery.
//!
//! Selection looks at the Markdown: fenced code containing non-ASCII text
//! needs a Unicode engine because `verbatim` bypasses `inputenc`. Discovery
//! then searches `PATH`, the configured directories and the usual TeX
//! install locations for the first available candidate.

use std::env;
use std::path::{Path, PathBuf};

use super::CompileConfig;
use crate::preamble::Engine;

/// An engine binary found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedEngine {
    pub engine: Engine,
    pub path: PathBuf,
}

/// Whether any fenced code block contains non-ASCII characters.
pub fn needs_unicode_engine(markdown: &str) -> bool {
    let mut in_code = false;
    for line in markdown.lines() {
        if line.starts_with("```") || line.starts_with("~~~") {
            in_code = !in_code;
            continue;
        }
        if in_code && !line.is_ascii() {
            return true;
        }
    }
    false
}

/// Engines to try, most preferred first.
pub fn candidate_engines(needs_unicode: bool) -> Vec<Engine> {
    if needs_unicode {
        vec![Engine::XeLatex, Engine::LuaLatex, Engine::PdfLatex]
    } else {
        vec![Engine::PdfLatex, Engine::XeLatex, Engine::LuaLatex]
    }
}

/// Pick the engine the document should target when no binary is known.
pub fn preferred_engine(markdown: &str, config: &CompileConfig) -> Engine {
    config
        .engine
        .unwrap_or_else(|| candidate_engines(needs_unicode_engine(markdown))[0])
}

fn executable_name(engine: Engine) -> String {
    if cfg!(windows) {
        format!("{}.exe", engine.binary_name())
    } else {
        engine.binary_name().to_string()
    }
}

fn find_in_dirs<I>(engine: Engine, dirs: I) -> Option<PathBuf>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let name = executable_name(engine);
    dirs.into_iter()
        .map(|dir| dir.as_ref().join(&name))
        .find(|candidate| candidate.is_file())
}

fn find_on_path(engine: Engine) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    find_in_dirs(engine, env::split_paths(&path))
}

/// Well-known install locations for `engine` on the given OS
/// (`std::env::consts::OS` naming).
pub fn fallback_paths(engine: Engine, os: &str) -> Vec<PathBuf> {
    let bin = engine.binary_name();
    match os {
        "windows" => {
            let user = env::var("USERNAME").unwrap_or_else(|_| "user".to_string());
            vec![
                PathBuf::from(format!(
                    r"C:\Users\{}\AppData\Local\Programs\MiKTeX\miktex\bin\x64\{}.exe",
                    user, bin
                )),
                PathBuf::from(format!(r"C:\Program Files\MiKTeX\miktex\bin\x64\{}.exe", bin)),
                PathBuf::from(format!(r"C:\texlive\2024\bin\win32\{}.exe", bin)),
                PathBuf::from(format!(r"C:\texlive\2024\bin\windows\{}.exe", bin)),
            ]
        }
        "linux" => vec![
            PathBuf::from(format!("/usr/bin/{}", bin)),
            PathBuf::from(format!("/usr/local/bin/{}", bin)),
            PathBuf::from(format!("/usr/local/texlive/2024/bin/x86_64-linux/{}", bin)),
            PathBuf::from(format!("/opt/texlive/2024/bin/x86_64-linux/{}", bin)),
        ],
        "macos" => vec![PathBuf::from(format!("/Library/TeX/texbin/{}", bin))],
        _ => Vec::new(),
    }
}

/// Locate the first available engine among `candidates`.
///
/// A configured engine replaces the candidate list. Every candidate is looked
/// up on `PATH` and in the configured directories before any fallback
/// install location is considered.
pub fn find_engine(candidates: &[Engine], config: &CompileConfig) -> Option<LocatedEngine> {
    let candidates: Vec<Engine> = match config.engine {
        Some(engine) => vec![engine],
        None => candidates.to_vec(),
    };

    for &engine in &candidates {
        let found = find_on_path(engine)
            .or_else(|| find_in_dirs(engine, &config.extra_search_dirs));
        if let Some(path) = found {
            log::debug!("found {} at {}", engine, path.display());
            return Some(LocatedEngine { engine, path });
        }
    }

    for &engine in &candidates {
        if let Some(path) = fallback_paths(engine, env::consts::OS)
            .into_iter()
            .find(|path| path.is_file())
        {
            log::debug!("found {} at fallback location {}", engine, path.display());
            return Some(LocatedEngine { engine, path });
        }
    }

    log::debug!(
        "no engine found among {}",
        candidates
            .iter()
            .map(|e| e.binary_name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_code_keeps_pdflatex() {
        let md = "# Title ✓\n\n```\nlet x = 1;\n```\nπ in prose";
        assert!(!needs_unicode_engine(md));
        assert_eq!(candidate_engines(false)[0], Engine::PdfLatex);
    }

    #[test]
    fn test_unicode_in_code_prefers_xelatex() {
        let md = "text\n~~~\nprintln!(\"→ done\");\n~~~\n";
        assert!(needs_unicode_engine(md));
        assert_eq!(
            candidate_engines(true),
            vec![Engine::XeLatex, Engine::LuaLatex, Engine::PdfLatex]
        );
    }

    #[test]
    fn test_preferred_engine_respects_config() {
        let config = CompileConfig {
            engine: Some(Engine::LuaLatex),
            ..CompileConfig::default()
        };
        assert_eq!(preferred_engine("plain", &config), Engine::LuaLatex);
        assert_eq!(preferred_engine("plain", &CompileConfig::default()), Engine::PdfLatex);
    }

    #[test]
    fn test_fallback_paths_per_os() {
        let mac = fallback_paths(Engine::XeLatex, "macos");
        assert_eq!(mac, vec![PathBuf::from("/Library/TeX/texbin/xelatex")]);

        let linux = fallback_paths(Engine::PdfLatex, "linux");
        assert_eq!(linux.len(), 4);
        assert!(linux.contains(&PathBuf::from("/usr/bin/pdflatex")));

        let windows = fallback_paths(Engine::LuaLatex, "windows");
        assert!(windows.iter().all(|p| p.to_string_lossy().ends_with("lualatex.exe")));

        assert!(fallback_paths(Engine::PdfLatex, "haiku").is_empty());
    }

    #[test]
    fn test_find_in_configured_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let binary = dir.path().join(executable_name(Engine::LuaLatex));
        std::fs::write(&binary, "").expect("write fake engine");

        let found = find_in_dirs(Engine::LuaLatex, [dir.path()]);
        assert_eq!(found, Some(binary));
        assert_eq!(find_in_dirs(Engine::XeLatex, [dir.path()]), None);
    }
}
