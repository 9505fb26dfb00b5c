//! Loader integration tests against the real `data/` directory shipped
//! with the repo.

use std::path::PathBuf;

use playbook_browser::loader::error::LoadError;
use playbook_browser::loader::load_catalog;
use playbook_browser::model::PatternId;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[tokio::test]
async fn test_loads_real_data_dir() {
    let catalog = load_catalog(&data_dir()).await.unwrap();

    assert_eq!(catalog.structure.len(), 3);
    assert_eq!(catalog.patterns.len(), 12);
    assert!(!catalog.themes.is_empty());
}

#[tokio::test]
async fn test_every_structure_id_resolves() {
    let catalog = load_catalog(&data_dir()).await.unwrap();

    for (phase, themes) in &catalog.structure {
        for (label, ids) in themes {
            for id in ids {
                assert!(
                    catalog.pattern(id).is_some(),
                    "{id} in {phase} / {label} has no pattern record"
                );
            }
        }
    }
}

#[tokio::test]
async fn test_structure_phase_order_matches_file() {
    let catalog = load_catalog(&data_dir()).await.unwrap();
    let phases: Vec<&String> = catalog.structure.keys().collect();
    assert_eq!(
        phases,
        vec![
            "Sourcing & Screening",
            "Interviewing & Assessment",
            "Offer & Onboarding"
        ]
    );
}

#[tokio::test]
async fn test_known_quotes_resolve() {
    let catalog = load_catalog(&data_dir()).await.unwrap();
    let quotes = catalog.resolve_quotes(&PatternId::new("AP1"), "T1");
    assert_eq!(quotes.len(), 2);
    assert!(quotes[0].text.contains("compiler engineer"));
    assert_eq!(quotes[0].author, "M. Okafor");
}

#[tokio::test]
async fn test_missing_data_dir_is_structure_not_found() {
    let err = load_catalog(&PathBuf::from("/nonexistent/playbook"))
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::StructureNotFound(_) | LoadError::Io { .. }));
}

#[tokio::test]
async fn test_malformed_json_is_json_error() {
    let dir = std::env::temp_dir().join(format!("playbook-loader-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("structure.json"), "{ not json").unwrap();
    std::fs::write(dir.join("patterns.json"), "[]").unwrap();
    std::fs::write(dir.join("quotes.json"), "{}").unwrap();
    std::fs::write(dir.join("themes.json"), "{}").unwrap();

    let err = load_catalog(&dir).await.unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }));

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_one_missing_file_fails_the_whole_load() {
    let dir = std::env::temp_dir().join(format!("playbook-partial-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("structure.json"), "{}").unwrap();
    std::fs::write(dir.join("patterns.json"), "[]").unwrap();
    std::fs::write(dir.join("themes.json"), "{}").unwrap();
    // quotes.json deliberately absent

    let err = load_catalog(&dir).await.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));

    std::fs::remove_dir_all(&dir).ok();
}
