//! Integration tests for Markdown → LaTeX document conversion

use mdlatex::{
    escape_latex, markdown_to_latex, markdown_to_latex_body, markdown_to_latex_with_diagnostics,
    process_inline, Engine, WarningKind,
};
use pretty_assertions::assert_eq;

fn body_lines(input: &str) -> Vec<String> {
    markdown_to_latex_body(input)
        .split('\n')
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Inline Text
// ============================================================================

mod inline {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mixed_inline_scenario() {
        assert_eq!(
            markdown_to_latex_body("Use `code` and **bold** with $\\alpha^2$"),
            "Use \\texttt{code} and \\textbf{bold} with $\\alpha^2$ \\newline"
        );
    }

    #[test]
    fn test_doubled_dollar_literal() {
        assert_eq!(
            process_inline("Cost is $$5 and 10%$$ today"),
            "Cost is \\$\\$5 and 10\\%\\$\\$ today"
        );
    }

    #[test]
    fn test_symbols_isolated_in_math_and_code() {
        assert_eq!(
            process_inline("→ $a → b$ `x → y`"),
            "$\\rightarrow$ $a → b$ \\texttt{x → y}"
        );
    }

    #[test]
    fn test_link_url_is_literal() {
        assert_eq!(
            markdown_to_latex_body("See [the_docs](https://example.com/a_b?x=1&y=2)"),
            "See \\href{https://example.com/a_b?x=1&y=2}{the\\_docs} \\newline"
        );
    }

    #[test]
    fn test_escaping_idempotent_on_plain_ascii() {
        let samples = [
            "Hello world",
            "Plain text, with punctuation. And numbers 1234!",
            "(parens) [brackets] 'quotes' \"double\" / slash",
        ];
        for text in samples {
            let once = escape_latex(text);
            assert_eq!(escape_latex(&once), once, "not idempotent for {:?}", text);
        }
    }

    #[test]
    fn test_reserved_characters_in_paragraph() {
        assert_eq!(
            markdown_to_latex_body("a_b #1 {x} ~y^z 50% & C:\\dir"),
            "a\\_b \\#1 \\{x\\} \\textasciitilde{}y\\textasciicircum{}z 50\\% \\& \
             C:\\textbackslash{}dir \\newline"
        );
    }

    #[test]
    fn test_emoji_removed_from_text() {
        assert_eq!(markdown_to_latex_body("Ship it 🚀"), "Ship it  \\newline");
    }
}

// ============================================================================
// Headings
// ============================================================================

mod headings {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_levels() {
        assert_eq!(
            body_lines("# One\n## Two\n### Three\n#### Four"),
            vec![
                "\\section{One}",
                "\\subsection{Two}",
                "\\subsubsection{Three}",
                "\\paragraph{Four}",
            ]
        );
    }

    #[test]
    fn test_numeral_prefix_stripped() {
        assert_eq!(markdown_to_latex_body("## 2) Setup Steps"), "\\subsection{Setup Steps}");
        assert_eq!(markdown_to_latex_body("### 10. Results"), "\\subsubsection{Results}");
    }

    #[test]
    fn test_decorative_prefix_stripped() {
        assert_eq!(markdown_to_latex_body("# 🚀 Launch & Go"), "\\section{Launch \\& Go}");
    }

    #[test]
    fn test_five_hashes_is_text() {
        assert_eq!(
            markdown_to_latex_body("##### deep"),
            "\\#\\#\\#\\#\\# deep \\newline"
        );
    }
}

// ============================================================================
// Lists
// ============================================================================

mod lists {
    use super::*;
    use pretty_assertions::assert_eq;

    fn count(lines: &[String], needle: &str) -> usize {
        lines.iter().filter(|l| l.as_str() == needle).count()
    }

    #[test]
    fn test_nested_unordered() {
        assert_eq!(
            body_lines("- a\n  - b\n    - c\n- d"),
            vec![
                "\\begin{itemize}",
                "\\item a",
                "\\begin{itemize}",
                "\\item b",
                "\\begin{itemize}",
                "\\item c",
                "\\end{itemize}",
                "\\end{itemize}",
                "\\item d",
                "\\end{itemize}",
            ]
        );
    }

    #[test]
    fn test_nesting_is_balanced() {
        let levels = [0usize, 1, 2, 2, 0, 3, 1, 0, 2, 4];
        let input: Vec<String> = levels
            .iter()
            .map(|level| format!("{}* item", " ".repeat(level * 2)))
            .collect();
        let lines = body_lines(&input.join("\n"));

        assert_eq!(
            count(&lines, "\\begin{itemize}"),
            count(&lines, "\\end{itemize}")
        );
        assert_eq!(count(&lines, "\\item item"), levels.len());
        assert_eq!(lines.last().map(String::as_str), Some("\\end{itemize}"));
    }

    #[test]
    fn test_switch_to_ordered_closes_unordered_first() {
        assert_eq!(
            body_lines("- a\n1. b\n2. c"),
            vec![
                "\\begin{itemize}",
                "\\item a",
                "\\end{itemize}",
                "\\begin{enumerate}",
                "\\item b",
                "\\item c",
                "\\end{enumerate}",
            ]
        );
    }

    #[test]
    fn test_blank_line_closes_lists() {
        assert_eq!(
            body_lines("1. one\n\nafter"),
            vec![
                "\\begin{enumerate}",
                "\\item one",
                "\\end{enumerate}",
                "",
                "after \\newline",
            ]
        );
    }

    #[test]
    fn test_item_content_is_inline_processed() {
        assert_eq!(
            body_lines("* **bold** costs $x_1$ & more"),
            vec![
                "\\begin{itemize}",
                "\\item \\textbf{bold} costs $x_1$ \\& more",
                "\\end{itemize}",
            ]
        );
    }

    #[test]
    fn test_code_fence_does_not_close_list() {
        assert_eq!(
            body_lines("- a\n```\nx\n```"),
            vec![
                "\\begin{itemize}",
                "\\item a",
                "\\begin{verbatim}",
                "x",
                "\\end{verbatim}",
                "\\end{itemize}",
            ]
        );
    }

    #[test]
    fn test_display_math_closes_list() {
        assert_eq!(
            body_lines("- a\n$$\nx\n$$"),
            vec!["\\begin{itemize}", "\\item a", "\\end{itemize}", "\\[", "x", "\\]"]
        );
    }
}

// ============================================================================
// Tables
// ============================================================================

mod tables {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mismatched_row_leaves_table() {
        assert_eq!(
            body_lines("| A | B |\n|---|---|\n| 1 | 2 |\n| only |\n"),
            vec![
                "\\begin{adjustbox}{max width=\\textwidth}",
                "\\begin{tabular}{|p{0.42\\textwidth}|p{0.42\\textwidth}|}",
                "\\hline",
                "A & B \\\\",
                "\\hline",
                "1 & 2 \\\\",
                "\\hline",
                "\\end{tabular}",
                "\\end{adjustbox}",
                "",
                "| only | \\newline",
                "",
            ]
        );
    }

    #[test]
    fn test_mismatched_row_can_start_new_table() {
        let body = markdown_to_latex_body("| A | B |\n|---|---|\n| X |\n|---|\n| y |");
        assert_eq!(body.matches("\\begin{tabular}").count(), 2);
        assert!(body.contains("\\begin{tabular}{|p{0.85\\textwidth}|}"));
        assert!(body.contains("y \\\\"));
    }

    #[test]
    fn test_cells_keep_math_and_code() {
        let body = markdown_to_latex_body(
            "| Name | Formula |\n|:--|--:|\n| `a_b` | $x^2$ & **y** |",
        );
        assert!(body.contains("\\texttt{a\\_b} & $x^2$ \\& \\textbf{y} \\\\"));
    }

    #[test]
    fn test_links_not_processed_in_cells() {
        let body = markdown_to_latex_body("| L |\n|---|\n| [a](b) |");
        assert!(body.contains("[a](b) \\\\"));
        assert!(!body.contains("\\href"));
    }

    #[test]
    fn test_table_closes_list() {
        let lines = body_lines("- a\n| H |\n|---|\n| v |");
        assert_eq!(
            &lines[..4],
            &[
                "\\begin{itemize}",
                "\\item a",
                "\\end{itemize}",
                "\\begin{adjustbox}{max width=\\textwidth}",
            ]
        );
    }

    #[test]
    fn test_stats_count_rows() {
        let result = markdown_to_latex_with_diagnostics(
            "| A |\n|---|\n| 1 |\n| 2 |\n| 3 |",
            Engine::PdfLatex,
        );
        assert_eq!(result.stats.tables, 1);
        assert_eq!(result.stats.table_rows, 3);
    }
}

// ============================================================================
// Code and Math Blocks
// ============================================================================

mod blocks {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_block_verbatim_fidelity() {
        let long = format!("let s = \"{}\"; // a_b & {{c}} ~ → ∑ 100%", "x".repeat(120));
        let source = ["fn main() {", "    let v = a_b & c; // 50% ~ ^", &long, "}"];
        let input = format!("```rust\n{}\n```", source.join("\n"));

        let lines = body_lines(&input);
        assert_eq!(lines.first().map(String::as_str), Some("\\begin{verbatim}"));
        assert_eq!(lines.last().map(String::as_str), Some("\\end{verbatim}"));

        let inner = &lines[1..lines.len() - 1];
        assert_eq!(inner[0], source[0]);
        assert_eq!(inner[1], source[1]);
        assert!(inner[2..inner.len() - 1]
            .iter()
            .all(|chunk| chunk.chars().count() <= 75));
        assert_eq!(inner[2..inner.len() - 1].concat(), long);
        assert_eq!(inner[inner.len() - 1], source[3]);
    }

    #[test]
    fn test_tilde_fence_and_headings_inside_code() {
        assert_eq!(
            body_lines("~~~\n# not a heading\n- not a list\n~~~"),
            vec![
                "\\begin{verbatim}",
                "# not a heading",
                "- not a list",
                "\\end{verbatim}",
            ]
        );
    }

    #[test]
    fn test_dollar_display_math() {
        assert_eq!(
            body_lines("$$\n\\int_0^1 x\\,dx\n$$"),
            vec!["\\[", "\\int_0^1 x\\,dx", "\\]"]
        );
    }

    #[test]
    fn test_dollar_fence_with_trailing_text_opens_block() {
        let result =
            markdown_to_latex_with_diagnostics("$$ a $$\nx + y\n$$", Engine::PdfLatex);
        assert!(result.output.contains("\\begin{document}\n\n\\[\nx + y\n\\]\n\n"));
        assert!(!result.has_warnings());
        assert_eq!(markdown_to_latex_body("$$ a $$\nx + y\n$$"), "\\[\nx + y\n\\]");
    }

    #[test]
    fn test_bracket_display_math() {
        assert_eq!(
            body_lines("[\na_1 + b_2 & 50%\n]"),
            vec!["\\[", "a_1 + b_2 & 50%", "\\]"]
        );
    }

    #[test]
    fn test_rule() {
        assert_eq!(
            body_lines("above\n***\nbelow"),
            vec![
                "above \\newline",
                "\\noindent\\rule{\\linewidth}{0.4pt}",
                "below \\newline",
            ]
        );
    }

    #[test]
    fn test_unterminated_blocks_are_closed_with_warning() {
        let result = markdown_to_latex_with_diagnostics("text\n$$\nx = 1", Engine::PdfLatex);
        assert!(result.output.contains("\\[\nx = 1\n\\]"));
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::UnterminatedMathBlock);
        assert_eq!(result.warnings[0].location.as_deref(), Some("line 2"));

        let result = markdown_to_latex_with_diagnostics("```\ncode", Engine::XeLatex);
        assert_eq!(result.warnings[0].kind, WarningKind::UnterminatedCodeBlock);
        assert!(result.output.contains("\\begin{verbatim}\ncode\n\\end{verbatim}"));
    }
}

// ============================================================================
// Full Documents
// ============================================================================

mod documents {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pdflatex_preamble() {
        let doc = markdown_to_latex("Hello", Engine::PdfLatex);
        assert!(doc.starts_with("\\documentclass{article}\n"));
        assert!(doc.contains("\\usepackage[utf8]{inputenc}"));
        assert!(!doc.contains("fontspec"));
        assert!(doc.ends_with("\\begin{document}\n\nHello \\newline\n\n\\end{document}"));
    }

    #[test]
    fn test_unicode_engine_preambles() {
        for engine in [Engine::XeLatex, Engine::LuaLatex] {
            let doc = markdown_to_latex("Hello", engine);
            assert!(doc.contains("\\usepackage{fontspec}"));
            assert!(doc.contains("\\TrySetMono{Consolas}"));
            assert!(doc.contains("\\TrySetMono{DejaVu Sans Mono}"));
            assert!(!doc.contains("inputenc"));
        }
    }

    #[test]
    fn test_shared_packages() {
        let doc = markdown_to_latex("", Engine::default());
        for needle in [
            "\\usepackage[margin=0.6in]{geometry}",
            "\\usepackage{adjustbox}",
            "\\usepackage{hyperref}",
            "\\usepackage{enumitem}",
            "\\setcounter{secnumdepth}{3}",
            "\\renewcommand\\thesubsubsection{\\arabic{subsubsection}}",
        ] {
            assert!(doc.contains(needle), "missing {}", needle);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(markdown_to_latex_body(""), "");
        let doc = markdown_to_latex("", Engine::PdfLatex);
        assert!(doc.ends_with("\\begin{document}\n\n\n\n\\end{document}"));
    }

    #[test]
    fn test_realistic_document() {
        let input = "\
# 📘 1. Overview

This costs $5 per unit & ships in 2–3 days.

## Steps
1. Install `mdlatex`
2. Run **md2tex**
  1. Check the output

| Key | Value |
|-----|-------|
| α | $\\alpha$ |

```
println!(\"done ✓\");
```
";
        let result = markdown_to_latex_with_diagnostics(input, Engine::XeLatex);
        let out = &result.output;

        assert!(out.contains("\\section{Overview}"));
        assert!(out.contains("This costs \\$5 per unit \\& ships in 2--3 days. \\newline"));
        assert!(out.contains("\\item Install \\texttt{mdlatex}"));
        assert!(out.contains("\\item Run \\textbf{md2tex}"));
        assert!(out.contains("$\\alpha$ & $\\alpha$ \\\\"));
        assert!(out.contains("println!(\"done ✓\");"));
        assert!(!result.has_warnings());
        assert_eq!(result.stats.headings, 2);
        assert_eq!(result.stats.list_items, 3);
        assert_eq!(result.stats.tables, 1);
        assert_eq!(result.stats.code_blocks, 1);
    }
}
