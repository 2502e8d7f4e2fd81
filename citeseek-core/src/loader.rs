//! Dataset loading.
//!
//! A dataset directory holds `offenses.json` and `primary_aliases.json`, and
//! optionally `statutes_registry.json` and `statutes.json` for the statute
//! lookups of the details view.

use std::fs;
use std::path::{Path, PathBuf};

use citeseek_types::{AliasTable, AliasTarget, CatalogError, OffenseRecord, SearchConfig};
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::catalog::Catalog;

/// Offense array file name.
pub const OFFENSES_FILE: &str = "offenses.json";
/// Alias object file name.
pub const ALIASES_FILE: &str = "primary_aliases.json";
/// Optional cached statute texts, keyed by section.
pub const STATUTES_FILE: &str = "statutes.json";
/// Optional statute URLs, keyed by section.
pub const REGISTRY_FILE: &str = "statutes_registry.json";

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let bytes = fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the offense array from `path`.
pub fn load_offenses(path: &Path) -> Result<Vec<OffenseRecord>, CatalogError> {
    let records: Vec<OffenseRecord> = read_json(path)?;
    debug!(path = %path.display(), records = records.len(), "offenses loaded");
    Ok(records)
}

/// Reads the alias object from `path`. Keys are normalized when the catalog
/// is built.
pub fn load_aliases(path: &Path) -> Result<AliasTable, CatalogError> {
    let raw: FxHashMap<String, AliasTarget> = read_json(path)?;
    debug!(path = %path.display(), aliases = raw.len(), "aliases loaded");
    Ok(raw.into_iter().collect())
}

/// Loads and builds a catalog from a dataset directory.
///
/// # Errors
///
/// Any read, parse or duplicate-id failure. Nothing is returned until the
/// whole catalog is built.
pub fn load_catalog(dir: &Path, config: SearchConfig) -> Result<Catalog, CatalogError> {
    let paths = DatasetPaths::new(dir);
    let records = load_offenses(&paths.offenses())?;
    let aliases = load_aliases(&paths.aliases())?;
    let catalog = Catalog::with_config(records, aliases, config)?;
    info!(dir = %dir.display(), records = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Statute data for one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatuteEntry {
    /// Official URL for the section.
    #[serde(default)]
    pub url: Option<String>,
    /// Cached statute text.
    #[serde(default)]
    pub text: Option<String>,
}

/// Section-keyed statute URLs and cached texts.
#[derive(Debug, Clone, Default)]
pub struct StatuteLibrary {
    sections: FxHashMap<String, StatuteEntry>,
}

impl StatuteLibrary {
    /// Loads both statute files from `dir`. Missing files are treated as
    /// empty; malformed files are errors.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let mut library = Self::default();
        for file in [REGISTRY_FILE, STATUTES_FILE] {
            let path = dir.join(file);
            if !path.is_file() {
                debug!(path = %path.display(), "statute file absent");
                continue;
            }
            let entries: FxHashMap<String, StatuteEntry> = read_json(&path)?;
            library.merge(entries);
        }
        Ok(library)
    }

    fn merge(&mut self, entries: FxHashMap<String, StatuteEntry>) {
        for (section, entry) in entries {
            let slot = self.sections.entry(section).or_default();
            if entry.url.is_some() {
                slot.url = entry.url;
            }
            if entry.text.is_some() {
                slot.text = entry.text;
            }
        }
    }

    /// Entry for a section such as `545.060`.
    pub fn get(&self, section: &str) -> Option<&StatuteEntry> {
        self.sections.get(section)
    }

    /// Number of known sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if no section is known.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Dataset file locations under one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    /// Directory holding the dataset files.
    pub dir: PathBuf,
}

impl DatasetPaths {
    /// Paths under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Location of [`OFFENSES_FILE`].
    pub fn offenses(&self) -> PathBuf {
        self.dir.join(OFFENSES_FILE)
    }

    /// Location of [`ALIASES_FILE`].
    pub fn aliases(&self) -> PathBuf {
        self.dir.join(ALIASES_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const OFFENSES: &str = r#"[
        {"id": 1, "title": "Failure to Stop at Stop Sign", "kw": "stop sign intersection", "citation": "544.010", "citation_base": "544.010", "code": "TTC", "level_code": "C"},
        {"id": 5, "title": "No Insurance", "citation": "601.191"},
        {"id": 9, "title": "Mystery", "kw": null}
    ]"#;

    fn dataset(offenses: &str, aliases: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(OFFENSES_FILE), offenses).unwrap();
        fs::write(dir.path().join(ALIASES_FILE), aliases).unwrap();
        dir
    }

    #[test]
    fn loads_full_dataset() {
        let dir = dataset(OFFENSES, r#"{"Stop Sign": 1, "insurance": [5, 5], "ghost": 77}"#);
        let catalog = load_catalog(dir.path(), SearchConfig::default()).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(9).map(|r| r.keywords()), Some(""));
        let out = catalog.search("stop sign");
        assert_eq!(out.primary.len(), 1);
        assert_eq!(catalog.search("insurance").primary.len(), 2);
        assert_eq!(catalog.stats().unresolved_targets, 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(dir.path(), SearchConfig::default()).unwrap_err();
        match err {
            CatalogError::Io { path, .. } => assert!(path.ends_with(OFFENSES_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_json_is_json_error() {
        let dir = dataset("[{\"id\": 1,", "{}");
        let err = load_catalog(dir.path(), SearchConfig::default()).unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
        assert!(err.to_string().contains(OFFENSES_FILE));
    }

    #[test]
    fn string_alias_target_is_rejected() {
        let dir = dataset(OFFENSES, r#"{"stop sign": "1"}"#);
        let err = load_catalog(dir.path(), SearchConfig::default()).unwrap_err();
        match err {
            CatalogError::Json { path, .. } => assert!(path.ends_with(ALIASES_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_ids_rejected() {
        let dir = dataset(r#"[{"id": 2, "title": "a"}, {"id": 2, "title": "b"}]"#, "{}");
        let err = load_catalog(dir.path(), SearchConfig::default()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { id: 2 }));
    }

    #[test]
    fn statute_library_merges_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(REGISTRY_FILE),
            r#"{"545.060": {"url": "https://example.test/545.060"}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(STATUTES_FILE),
            r#"{"545.060": {"text": "An operator on a roadway..."}, "601.191": {"text": "A person commits..."}}"#,
        )
        .unwrap();

        let library = StatuteLibrary::load(dir.path()).unwrap();
        assert_eq!(library.len(), 2);
        let entry = library.get("545.060").unwrap();
        assert_eq!(entry.url.as_deref(), Some("https://example.test/545.060"));
        assert!(entry.text.is_some());
        assert!(library.get("601.191").unwrap().url.is_none());
    }

    #[test]
    fn statute_library_tolerates_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let library = StatuteLibrary::load(dir.path()).unwrap();
        assert!(library.is_empty());
    }

    #[test]
    fn dataset_paths() {
        let paths = DatasetPaths::new("/data");
        assert_eq!(paths.offenses(), PathBuf::from("/data/offenses.json"));
        assert_eq!(paths.aliases(), PathBuf::from("/data/primary_aliases.json"));
    }
}
