//! JSON document storage for immigrants, mentors and resources.
//!
//! Each entity type lives in its own document under the data directory as a
//! list of flat field maps. Documents written by older versions, which are
//! objects keyed by email or, for resources, nested `location -> category ->
//! titles` maps, are read as well. [`JsonStore::backup`] keeps a copy of a
//! document before records that failed to load are dropped by a save.

use std::path::{Path, PathBuf};

use helper_core::error::CoreError;
use helper_core::models::{Immigrant, Mentor, Resource};
use helper_core::records::{as_record, Record};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Result, StoreError};

pub const IMMIGRANTS_FILE: &str = "immigrants.json";
pub const MENTORS_FILE: &str = "mentors.json";
pub const RESOURCES_FILE: &str = "resources.json";

// ── Public types ──────────────────────────────────────────────────────────────

/// A record that was present in a document but failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position of the record within the document.
    pub index: usize,
    /// Map key for keyed-object documents.
    pub key: Option<String>,
    /// Why the record was rejected.
    pub error: CoreError,
}

/// Result of loading one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome<T> {
    /// The document does not exist yet.
    Missing,
    /// The document was read; `rejected` lists records that were skipped.
    Loaded {
        records: Vec<T>,
        rejected: Vec<RejectedRecord>,
    },
}

impl<T> LoadOutcome<T> {
    /// The loaded records, or `None` when the document was missing.
    pub fn into_records(self) -> Option<Vec<T>> {
        match self {
            LoadOutcome::Missing => None,
            LoadOutcome::Loaded { records, .. } => Some(records),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, LoadOutcome::Missing)
    }
}

// ── JsonStore ─────────────────────────────────────────────────────────────────

/// Reads and writes the three documents inside one directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Use `dir` when given, otherwise [`default_data_dir`].
    pub fn resolve(dir: Option<&Path>) -> Self {
        match dir {
            Some(d) => Self::new(d),
            None => Self::new(default_data_dir()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    pub fn load_immigrants(&self) -> Result<LoadOutcome<Immigrant>> {
        self.load_document(IMMIGRANTS_FILE, Immigrant::from_record)
    }

    pub fn load_mentors(&self) -> Result<LoadOutcome<Mentor>> {
        self.load_document(MENTORS_FILE, Mentor::from_record)
    }

    /// Load resources. Besides the list layout this accepts the older
    /// `{location: {category: [title, ...]}}` layout.
    pub fn load_resources(&self) -> Result<LoadOutcome<Resource>> {
        let path = self.path_of(RESOURCES_FILE);
        let Some(document) = read_document(&path)? else {
            return Ok(LoadOutcome::Missing);
        };
        match &document {
            Value::Object(locations) if is_nested_resource_layout(locations) => {
                Ok(flatten_nested_resources(&path, locations))
            }
            _ => build_records(RESOURCES_FILE, &path, &document, Resource::from_record),
        }
    }

    pub fn save_immigrants<'a>(&self, immigrants: impl IntoIterator<Item = &'a Immigrant>) -> Result<PathBuf> {
        self.save_document(IMMIGRANTS_FILE, immigrants)
    }

    pub fn save_mentors<'a>(&self, mentors: impl IntoIterator<Item = &'a Mentor>) -> Result<PathBuf> {
        self.save_document(MENTORS_FILE, mentors)
    }

    pub fn save_resources<'a>(&self, resources: impl IntoIterator<Item = &'a Resource>) -> Result<PathBuf> {
        self.save_document(RESOURCES_FILE, resources)
    }

    /// Copy `file` to `<file>.bak`, replacing an older backup. Returns the
    /// backup path, or `None` when there is nothing to copy.
    pub fn backup(&self, file: &str) -> Result<Option<PathBuf>> {
        let path = self.path_of(file);
        if !path.exists() {
            return Ok(None);
        }
        let backup = path.with_extension("json.bak");
        std::fs::copy(&path, &backup).map_err(|source| StoreError::FileWrite {
            path: backup.clone(),
            source,
        })?;
        warn!("Kept a copy of {} at {}", path.display(), backup.display());
        Ok(Some(backup))
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn load_document<T>(
        &self,
        file: &str,
        build: fn(&Record) -> helper_core::Result<T>,
    ) -> Result<LoadOutcome<T>> {
        let path = self.path_of(file);
        match read_document(&path)? {
            Some(document) => build_records(file, &path, &document, build),
            None => Ok(LoadOutcome::Missing),
        }
    }

    fn save_document<'a, T>(&self, file: &str, items: impl IntoIterator<Item = &'a T>) -> Result<PathBuf>
    where
        T: Serialize + 'a,
    {
        let path = self.path_of(file);
        let items: Vec<&T> = items.into_iter().collect();
        let json = serde_json::to_string_pretty(&items)?;

        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::FileWrite {
            path: self.dir.clone(),
            source,
        })?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|source| StoreError::FileWrite {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StoreError::FileWrite {
            path: path.clone(),
            source,
        })?;

        debug!("Saved {} records to {}", items.len(), path.display());
        Ok(path)
    }
}

// ── Document helpers ──────────────────────────────────────────────────────────

/// Parse the document at `path`. `None` when it does not exist.
fn read_document(path: &Path) -> Result<Option<Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} not found", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(StoreError::FileRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StoreError::JsonParse {
            path: path.to_path_buf(),
            source,
        })
}

/// Build one record per list item or object value, rejecting the ones that
/// fail validation.
fn build_records<T>(
    file: &str,
    path: &Path,
    document: &Value,
    build: fn(&Record) -> helper_core::Result<T>,
) -> Result<LoadOutcome<T>> {
    let entries: Vec<(Option<String>, &Value)> = match document {
        Value::Array(items) => items.iter().map(|v| (None, v)).collect(),
        Value::Object(map) => map.iter().map(|(k, v)| (Some(k.clone()), v)).collect(),
        other => {
            return Err(StoreError::UnexpectedLayout {
                path: path.to_path_buf(),
                found: json_kind(other),
            })
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();
    for (index, (key, value)) in entries.into_iter().enumerate() {
        let field = match &key {
            Some(k) => format!("{}[{}]", file, k),
            None => format!("{}[{}]", file, index),
        };
        match as_record(&field, value).and_then(build) {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!("Skipping record {} in {}: {}", field, path.display(), error);
                rejected.push(RejectedRecord { index, key, error });
            }
        }
    }

    debug!(
        "Loaded {} records from {} ({} rejected)",
        records.len(),
        path.display(),
        rejected.len()
    );

    Ok(LoadOutcome::Loaded { records, rejected })
}

/// Flat resource records hold only strings, so any category list one level
/// down marks the nested layout.
fn is_nested_resource_layout(locations: &Map<String, Value>) -> bool {
    locations
        .values()
        .filter_map(Value::as_object)
        .any(|categories| categories.values().any(Value::is_array))
}

/// Expand `{location: {category: [title, ...]}}` into one resource per title.
/// Rejected entries are keyed `location/category`.
fn flatten_nested_resources(path: &Path, locations: &Map<String, Value>) -> LoadOutcome<Resource> {
    let mut records = Vec::new();
    let mut rejected = Vec::new();
    let mut index = 0;
    let mut reject = |index: usize, key: String, error: CoreError| {
        warn!("Skipping resource {} in {}: {}", key, path.display(), error);
        rejected.push(RejectedRecord {
            index,
            key: Some(key),
            error,
        });
    };

    for (location, categories) in locations {
        let field = format!("{}[{}]", RESOURCES_FILE, location);
        let categories = match as_record(&field, categories) {
            Ok(c) => c,
            Err(error) => {
                reject(index, location.clone(), error);
                index += 1;
                continue;
            }
        };
        for (category, titles) in categories {
            let key = format!("{}/{}", location, category);
            let Some(titles) = titles.as_array() else {
                let error = CoreError::validation(
                    format!("{}[{}]", RESOURCES_FILE, key),
                    format!("expected a list of titles, found {}", json_kind(titles)),
                );
                reject(index, key, error);
                index += 1;
                continue;
            };
            for title in titles {
                let built = match title.as_str() {
                    Some(t) => Resource::new(location, category, t),
                    None => Err(CoreError::validation(
                        format!("{}[{}]", RESOURCES_FILE, key),
                        format!("expected a title, found {}", json_kind(title)),
                    )),
                };
                match built {
                    Ok(resource) => records.push(resource),
                    Err(error) => reject(index, key.clone(), error),
                }
                index += 1;
            }
        }
    }

    debug!(
        "Loaded {} resources from nested layout in {} ({} rejected)",
        records.len(),
        path.display(),
        rejected.len()
    );
    LoadOutcome::Loaded { records, rejected }
}

/// `~/.immigrant-helper/data`, or `./.immigrant-helper/data` without a home
/// directory.
pub fn default_data_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".immigrant-helper").join("data")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
