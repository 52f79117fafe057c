use super::{resolve, LookupError};
use crate::section::Level;
use crate::writer::{Manifest, ManifestEntry};

fn manifest() -> Manifest {
    let entry = |index: usize, file: &str, title: &str, label: Option<&str>| ManifestEntry {
        index,
        file: file.to_string(),
        title: title.to_string(),
        level: Level::Section,
        number: index,
        label: label.map(str::to_string),
        lines: 10,
    };
    Manifest {
        paper_dir: "paper".to_string(),
        main_tex: "main.tex".to_string(),
        total_sections: 4,
        sections: vec![
            entry(1, "01_section_introduction.tex", "Introduction", Some("sec:intro")),
            entry(2, "02_section_score_matching.tex", "Score Matching", Some("sec:sm")),
            entry(3, "03_section_sliced_score_matching.tex", "Sliced Score Matching", None),
            entry(12, "12_section_conclusion.tex", "Conclusion", None),
        ],
    }
}

#[test]
fn test_numeric_query_selects_index() {
    let manifest = manifest();
    assert_eq!(resolve(&manifest, "2").unwrap().title, "Score Matching");
    assert_eq!(resolve(&manifest, "012").unwrap().title, "Conclusion");
}

#[test]
fn test_numeric_query_out_of_range() {
    let manifest = manifest();
    let err = resolve(&manifest, "7").unwrap_err();
    let LookupError::NotFound { query, available } = err else {
        panic!("expected NotFound");
    };
    assert_eq!(query, "7");
    assert_eq!(available.len(), 4);
}

#[test]
fn test_exact_label() {
    let manifest = manifest();
    assert_eq!(resolve(&manifest, "sec:intro").unwrap().index, 1);
}

#[test]
fn test_label_wins_over_substring() {
    let manifest = manifest();
    assert_eq!(resolve(&manifest, "sec:sm").unwrap().index, 2);
}

#[test]
fn test_case_insensitive_title_substring() {
    let manifest = manifest();
    assert_eq!(resolve(&manifest, "CONCLU").unwrap().index, 12);
    assert_eq!(resolve(&manifest, "sliced").unwrap().index, 3);
}

#[test]
fn test_file_name_substring() {
    let manifest = manifest();
    assert_eq!(resolve(&manifest, "01_section").unwrap().index, 1);
}

#[test]
fn test_ambiguous_substring() {
    let manifest = manifest();
    let err = resolve(&manifest, "score matching").unwrap_err();
    assert_eq!(
        err,
        LookupError::Ambiguous {
            query: "score matching".to_string(),
            matches: vec![
                "02_section_score_matching.tex".to_string(),
                "03_section_sliced_score_matching.tex".to_string(),
            ],
        }
    );
}

#[test]
fn test_not_found_lists_available_files() {
    let manifest = manifest();
    let err = resolve(&manifest, "appendix").unwrap_err();
    assert!(err.to_string().contains("01_section_introduction.tex"));
    assert!(matches!(err, LookupError::NotFound { .. }));
}
