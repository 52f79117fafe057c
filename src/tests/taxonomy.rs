use super::{build_taxonomy, NodeType, TaxonomyCache};
use crate::error::Error;
use crate::formats::latex::LatexFormat;
use std::fs;
use tempfile::TempDir;

const SEGMENT: &str = r"\section{Score Matching}
\label{sec:sm}
We call this the \textbf{score function}.
\begin{equation}
\label{eq:score}
s(x) = \nabla \log p(x)
\end{equation}
\subsection{Denoising}
A \emph{noise schedule} and again the \textbf{Score Function}.
\begin{align}
a &= b
\end{align}
\begin{equation*} x = y \end{equation*}
\subsubsection{Details}
\subsection{Sliced}
";

#[test]
fn test_hierarchy_is_nested() {
    let taxonomy = build_taxonomy("05_section_score_matching.tex", SEGMENT, &LatexFormat);

    assert_eq!(taxonomy.file, "05_section_score_matching.tex");
    assert_eq!(taxonomy.hierarchy.len(), 1);
    let root = &taxonomy.hierarchy[0];
    assert_eq!(root.node_type, NodeType::Section);
    assert_eq!(root.title, "Score Matching");
    assert_eq!(root.label.as_deref(), Some("sec:sm"));
    assert_eq!(root.line, 1);

    let children: Vec<&str> = root.children.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(children, vec!["Denoising", "Sliced"]);
    assert_eq!(root.children[0].children[0].title, "Details");
    assert_eq!(root.children[0].children[0].node_type, NodeType::Subsubsection);
    assert_eq!(taxonomy.stats.sections, 4);
}

#[test]
fn test_equations_with_labels_and_placeholders() {
    let taxonomy = build_taxonomy("seg.tex", SEGMENT, &LatexFormat);

    let titles: Vec<&str> = taxonomy.equations.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["eq:score", "Equation at line 10", "Equation at line 13"]
    );
    assert_eq!(taxonomy.equations[0].label.as_deref(), Some("eq:score"));
    assert_eq!(taxonomy.equations[0].line, 4);
    assert_eq!(taxonomy.equations[1].label, None);
    assert_eq!(taxonomy.stats.equations, 3);
}

#[test]
fn test_unclosed_equation_is_dropped() {
    let taxonomy = build_taxonomy("seg.tex", "\\begin{equation}\nx = 1\n", &LatexFormat);
    assert!(taxonomy.equations.is_empty());
}

#[test]
fn test_nested_aligned_keeps_outer_label() {
    let content = "\\begin{equation}\n\\begin{aligned}\na &= b\n\\end{aligned}\n\\label{eq:x}\n\\end{equation}\n";
    let taxonomy = build_taxonomy("seg.tex", content, &LatexFormat);

    assert_eq!(taxonomy.equations.len(), 1);
    assert_eq!(taxonomy.equations[0].label.as_deref(), Some("eq:x"));
    assert_eq!(taxonomy.equations[0].line, 1);
}

#[test]
fn test_aligned_in_display_math_is_not_an_equation() {
    let content = "$$\n\\begin{aligned}\na &= b\n\\end{aligned}\n$$\n\\begin{alignat}{2}\nx\n\\end{alignat}\n";
    let taxonomy = build_taxonomy("seg.tex", content, &LatexFormat);
    assert!(taxonomy.equations.is_empty());
}

#[test]
fn test_end_closes_only_matching_environment() {
    let content = "\\begin{gather}\n\\end{equation}\n\\label{eq:g}\n\\end{gather}\n";
    let taxonomy = build_taxonomy("seg.tex", content, &LatexFormat);

    assert_eq!(taxonomy.equations.len(), 1);
    assert_eq!(taxonomy.equations[0].title, "eq:g");
}

#[test]
fn test_equation_opened_after_end_on_same_line() {
    let content = "\\begin{equation}a\\end{equation}\\begin{align*}\\label{eq:b}b\n\\end{align*}\n";
    let taxonomy = build_taxonomy("seg.tex", content, &LatexFormat);

    let found: Vec<(&str, usize)> = taxonomy
        .equations
        .iter()
        .map(|e| (e.title.as_str(), e.line))
        .collect();
    assert_eq!(found, vec![("Equation at line 1", 1), ("eq:b", 1)]);
}

#[test]
fn test_terms_with_lines_deduplicated() {
    let taxonomy = build_taxonomy("seg.tex", SEGMENT, &LatexFormat);

    let terms: Vec<(&str, usize)> = taxonomy
        .key_terms
        .iter()
        .map(|t| (t.title.as_str(), t.line))
        .collect();
    assert_eq!(terms, vec![("score function", 3), ("noise schedule", 9)]);
    assert!(taxonomy.key_terms.iter().all(|t| t.node_type == NodeType::Term));
}

#[test]
fn test_stats_lines() {
    let taxonomy = build_taxonomy("seg.tex", "a\nb\nc", &LatexFormat);
    assert_eq!(taxonomy.stats.lines, 3);
    assert_eq!(taxonomy.stats.sections, 0);
}

#[test]
fn test_json_shape() {
    let taxonomy = build_taxonomy("seg.tex", SEGMENT, &LatexFormat);
    let json = serde_json::to_value(&taxonomy).unwrap();

    assert_eq!(json["hierarchy"][0]["type"], "section");
    assert_eq!(json["equations"][1].get("label"), None);
    assert_eq!(json["key_terms"][0].get("children"), None);
    assert_eq!(json["stats"]["key_terms"], 2);
}

#[test]
fn test_cache_hit_and_force_rebuild() {
    let dir = TempDir::new().unwrap();
    let sections = dir.path().join("sections");
    fs::create_dir(&sections).unwrap();
    fs::write(sections.join("01_section_intro.tex"), "\\section{Intro}\nText").unwrap();

    let cache = TaxonomyCache::new(dir.path(), "sections", "taxonomy");
    let first = cache.get_or_build("01_section_intro.tex", false, &LatexFormat).unwrap();
    assert_eq!(first.hierarchy[0].title, "Intro");
    assert!(dir
        .path()
        .join("taxonomy/01_section_intro.taxonomy.json")
        .is_file());

    fs::write(sections.join("01_section_intro.tex"), "\\section{Changed}\nText").unwrap();
    let cached = cache.get_or_build("01_section_intro.tex", false, &LatexFormat).unwrap();
    assert_eq!(cached, first);

    let rebuilt = cache.get_or_build("01_section_intro.tex", true, &LatexFormat).unwrap();
    assert_eq!(rebuilt.hierarchy[0].title, "Changed");
    let after_force = cache.get_or_build("01_section_intro.tex", false, &LatexFormat).unwrap();
    assert_eq!(after_force, rebuilt);
}

#[test]
fn test_corrupt_cache_is_rebuilt() {
    let dir = TempDir::new().unwrap();
    let sections = dir.path().join("sections");
    let taxonomy_dir = dir.path().join("taxonomy");
    fs::create_dir(&sections).unwrap();
    fs::create_dir(&taxonomy_dir).unwrap();
    fs::write(sections.join("02_section_x.tex"), "\\section{X}").unwrap();
    fs::write(taxonomy_dir.join("02_section_x.taxonomy.json"), "not json").unwrap();

    let cache = TaxonomyCache::new(dir.path(), "sections", "taxonomy");
    let taxonomy = cache.get_or_build("02_section_x.tex", false, &LatexFormat).unwrap();
    assert_eq!(taxonomy.hierarchy[0].title, "X");
}

#[test]
fn test_missing_segment() {
    let dir = TempDir::new().unwrap();
    let cache = TaxonomyCache::new(dir.path(), "sections", "taxonomy");
    let err = cache.get_or_build("99_section_none.tex", false, &LatexFormat).unwrap_err();
    assert!(matches!(err, Error::SegmentNotFound(_)));
}
