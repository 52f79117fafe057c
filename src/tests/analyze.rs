use super::{
    analyze, count_equations, count_figures, count_tables, estimate_reading_time,
    extract_key_terms, AnalyzerOptions,
};
use crate::formats::latex::LatexFormat;

#[test]
fn test_equation_env() {
    let content = "\n\\begin{equation}\nE = mc^2\n\\end{equation}\n";
    assert_eq!(count_equations(content, &LatexFormat), 1);
}

#[test]
fn test_align_env() {
    let content = "\\begin{align}\na &= b \\\\\nc &= d\n\\end{align}\n";
    assert_eq!(count_equations(content, &LatexFormat), 1);
}

#[test]
fn test_starred_and_other_environments() {
    let content = r"\begin{equation*}a\end{equation*}\begin{gather}b\end{gather}\begin{multline}c\end{multline}\begin{eqnarray}d\end{eqnarray}";
    assert_eq!(count_equations(content, &LatexFormat), 4);
}

#[test]
fn test_display_math_counts_each_delimiter() {
    let content = r"$$x^2$$ and \[y^2\]";
    assert_eq!(count_equations(content, &LatexFormat), 3);
}

#[test]
fn test_multiple_types() {
    let content = "\n\\begin{equation}a\\end{equation}\n\\begin{align}b\\end{align}\n$$c$$\n";
    assert!(count_equations(content, &LatexFormat) >= 4);
}

#[test]
fn test_figure_env() {
    let content = "\\begin{figure}\n\\includegraphics{img.png}\n\\end{figure}\n\\begin{figure*}[h]\n\\includegraphics{img2.png}\n\\end{figure*}\n";
    assert_eq!(count_figures(content, &LatexFormat), 2);
}

#[test]
fn test_table_env() {
    let content = "\\begin{table}\n\\begin{tabular}{cc}\na & b\n\\end{tabular}\n\\end{table}\n";
    assert_eq!(count_tables(content, &LatexFormat), 1);
}

#[test]
fn test_textbf_extraction() {
    let terms = extract_key_terms(r"The \textbf{score function} is important.", &LatexFormat, 10);
    assert!(terms.contains(&"score function".to_string()));
}

#[test]
fn test_emph_extraction() {
    let terms = extract_key_terms(r"We use \emph{variational inference}.", &LatexFormat, 10);
    assert_eq!(terms, vec!["variational inference"]);
}

#[test]
fn test_nested_commands_stripped() {
    let terms = extract_key_terms(r"\textbf{the \textit{evidence} lower bound}", &LatexFormat, 10);
    assert_eq!(terms[0], "the evidence lower bound");
}

#[test]
fn test_dedup_keeps_first_casing() {
    let content = r"\emph{Score Matching} then \textbf{score matching} and \term{SCORE MATCHING}";
    let terms = extract_key_terms(content, &LatexFormat, 10);
    assert_eq!(terms, vec!["Score Matching"]);
}

#[test]
fn test_defined_terms_follow_marked_terms() {
    let content = r"This quantity is called the Fisher Divergence. We also \emph{whiten} inputs.";
    let terms = extract_key_terms(content, &LatexFormat, 10);
    assert_eq!(terms, vec!["whiten", "Fisher Divergence"]);
}

#[test]
fn test_max_terms() {
    let content = r"\textbf{alpha} \textbf{beta} \textbf{gamma} \textbf{delta}";
    let terms = extract_key_terms(content, &LatexFormat, 2);
    assert_eq!(terms, vec!["alpha", "beta"]);
}

#[test]
fn test_short_terms_skipped() {
    let content = r"\textbf{a} \textbf{b} \textbf{c} \textbf{d}";
    assert!(extract_key_terms(content, &LatexFormat, 10).is_empty());
}

#[test]
fn test_short_content() {
    let content = "Hello world. ".repeat(100);
    assert_eq!(estimate_reading_time(&content, 200), 1);
}

#[test]
fn test_longer_content() {
    let content = "Word ".repeat(1000);
    assert_eq!(estimate_reading_time(&content, 200), 5);
}

#[test]
fn test_commands_not_counted_as_words() {
    let content = format!("{}{}", "\\cite{ref} \\noindent ".repeat(500), "word ".repeat(400));
    assert_eq!(estimate_reading_time(&content, 200), 2);
}

#[test]
fn test_zero_speed_floors_at_one() {
    assert_eq!(estimate_reading_time("many words here", 0), 1);
}

#[test]
fn test_analyze_bundles_counts() {
    let content = "\\section{Model}\nWe define the \\emph{energy}.\n\\begin{equation}\\label{eq:e}E\\end{equation}\n\\begin{figure}x\\end{figure}\n\\begin{table}y\\end{table}";
    let stats = analyze(content, &LatexFormat, &AnalyzerOptions::default());

    assert_eq!(stats.equations, 1);
    assert_eq!(stats.figures, 1);
    assert_eq!(stats.tables, 1);
    assert_eq!(stats.key_terms, vec!["energy"]);
    assert_eq!(stats.reading_time_min, 1);
}
