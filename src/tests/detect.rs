use super::{clean_markup, find_sections};
use crate::formats::latex::LatexFormat;
use crate::section::Level;

#[test]
fn test_find_section() {
    let content = "\n\\section{Introduction}\nSome text here.\n\\section{Methods}\nMore text.\n";
    let sections = find_sections(content, &LatexFormat);

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title, "Introduction");
    assert_eq!(sections[1].title, "Methods");
    assert_eq!(sections[0].level, Level::Section);
    assert_eq!(sections[0].line_start, 1);
    assert_eq!(sections[1].line_start, 3);
}

#[test]
fn test_all_six_ranks() {
    let content = "\\part{P}\n\\chapter{C}\n\\section{S}\n\\subsection{SS}\n\\subsubsection{SSS}\n\\paragraph{Para}";
    let levels: Vec<usize> = find_sections(content, &LatexFormat)
        .iter()
        .map(|s| s.level.depth())
        .collect();

    assert_eq!(levels, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_starred_sections() {
    let sections = find_sections("\\section*{Acknowledgments}\nThanks.", &LatexFormat);
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, "Acknowledgments");
}

#[test]
fn test_label_on_next_line() {
    let sections = find_sections("\\section{Methods}\n\\label{sec:methods}\nText.", &LatexFormat);
    assert_eq!(sections[0].label.as_deref(), Some("sec:methods"));
}

#[test]
fn test_label_same_line_wins() {
    let content = "\\section{Methods}\\label{sec:same}\n\\label{sec:next}";
    let sections = find_sections(content, &LatexFormat);
    assert_eq!(sections[0].label.as_deref(), Some("sec:same"));
}

#[test]
fn test_label_two_lines_down_is_ignored() {
    let content = "\\section{Methods}\n\n\\label{sec:far}";
    let sections = find_sections(content, &LatexFormat);
    assert_eq!(sections[0].label, None);
}

#[test]
fn test_one_node_per_line_top_rank_first() {
    let content = "\\subsection{Inner} \\chapter{Outer}";
    let sections = find_sections(content, &LatexFormat);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].level, Level::Chapter);
    assert_eq!(sections[0].title, "Outer");
}

#[test]
fn test_nested_formatting_in_title() {
    let content = r"\section{A \textbf{Bold \emph{and} Italic} Title}";
    let sections = find_sections(content, &LatexFormat);
    assert_eq!(sections[0].title, "A Bold and Italic Title");
}

#[test]
fn test_multiline_heading_not_recognised() {
    let content = "\\section\n{Split Title}\nBody";
    assert!(find_sections(content, &LatexFormat).is_empty());
}

#[test]
fn test_clean_markup() {
    assert_eq!(clean_markup(r"Foo {Bar {Baz}}"), "Foo Bar Baz");
    assert_eq!(clean_markup(r"\LaTeX{} in   practice"), "in practice");
    assert_eq!(clean_markup(r"Methods \& Results"), "Methods & Results");
}
