//! Removal of auxiliary files left by a LaTeX run.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions of files an engine (or latexmk/biber) writes next to the source.
pub const AUX_EXTENSIONS: [&str; 29] = [
    ".aux", ".log", ".out", ".toc", ".synctex.gz", ".fls", ".fdb_latexmk", ".nav", ".snm",
    ".vrb", ".bbl", ".blg", ".lof", ".lot", ".lol", ".idx", ".ilg", ".ind", ".glg", ".glo",
    ".gls", ".ist", ".acn", ".acr", ".alg", ".bcf", ".run.xml", ".xdy", ".thm",
];

/// Auxiliary file paths belonging to `tex_path`, existing or not.
pub fn aux_paths(tex_path: &Path) -> Vec<PathBuf> {
    let base = tex_path.with_extension("");
    AUX_EXTENSIONS
        .iter()
        .map(|ext| {
            let mut name: OsString = base.clone().into_os_string();
            name.push(ext);
            PathBuf::from(name)
        })
        .collect()
}

/// Delete the auxiliary files of `tex_path`, returning how many were removed.
///
/// Failures are logged and otherwise ignored; the PDF already exists.
pub fn cleanup_aux_files(tex_path: &Path) -> usize {
    let mut removed = 0;
    for path in aux_paths(tex_path) {
        if !path.exists() {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(err) => log::debug!("could not remove {}: {}", path.display(), err),
        }
    }
    removed
}
