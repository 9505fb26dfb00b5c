//! Load the four playbook datasets from a data directory.
//!
//! All four files are fetched concurrently and the load fails fast: the
//! first error aborts the whole startup with no partial catalog and no
//! retries. After a successful load the catalog is immutable for the
//! session.

pub mod error;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::loader::error::LoadError;
use crate::model::{Catalog, Pattern, PlaybookStructure, QuotesMap};

/// Read `structure.json`, `patterns.json`, `quotes.json`, and `themes.json`
/// from `data_dir` and assemble the catalog.
pub async fn load_catalog(data_dir: &Path) -> Result<Catalog, LoadError> {
    let (structure, patterns, quotes, themes) = tokio::try_join!(
        read_structure(data_dir),
        read_json::<Vec<Pattern>>(data_dir.join("patterns.json")),
        read_json::<QuotesMap>(data_dir.join("quotes.json")),
        read_json::<HashMap<String, String>>(data_dir.join("themes.json")),
    )?;

    debug!(
        phases = structure.len(),
        patterns = patterns.len(),
        "catalog loaded"
    );

    Ok(Catalog::new(structure, patterns, quotes, themes))
}

async fn read_structure(data_dir: &Path) -> Result<PlaybookStructure, LoadError> {
    let path = data_dir.join("structure.json");
    match read_json(path.clone()).await {
        Err(LoadError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(LoadError::StructureNotFound(path))
        }
        other => other,
    }
}

async fn read_json<T: DeserializeOwned>(path: PathBuf) -> Result<T, LoadError> {
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| LoadError::Io {
            path: path.clone(),
            source: e,
        })?;
    serde_json::from_str(&content).map_err(|e| LoadError::Json { path, source: e })
}
