//! Reference data store boundary.
//!
//! Provides the `ReferenceStore` trait the scoring engine reads its
//! reference rows through, and an in-memory implementation that can be
//! loaded from a directory of JSON exports (one array per collection).

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

/// Errors from reference store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid document in {collection}: {message}")]
    Decode {
        collection: Collection,
        message: String,
    },

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
}

/// The reference collections read by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    JobGroupInfo,
    LocalDiagnosis,
    HiringCities,
    Cities,
    Associations,
    VolunteeringMissions,
    JobBoards,
    SpecificToJobAdvice,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Self::JobGroupInfo,
        Self::LocalDiagnosis,
        Self::HiringCities,
        Self::Cities,
        Self::Associations,
        Self::VolunteeringMissions,
        Self::JobBoards,
        Self::SpecificToJobAdvice,
    ];

    /// Name of the collection in the document store.
    pub fn name(self) -> &'static str {
        match self {
            Self::JobGroupInfo => "job_group_info",
            Self::LocalDiagnosis => "local_diagnosis",
            Self::HiringCities => "hiring_cities",
            Self::Cities => "cities",
            Self::Associations => "associations",
            Self::VolunteeringMissions => "volunteering_missions",
            Self::JobBoards => "jobboards",
            Self::SpecificToJobAdvice => "specific_to_job_advice",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, StoreError> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| StoreError::UnknownCollection(s.to_string()))
    }
}

/// Read-only access to reference documents.
///
/// A missing document is `Ok(None)`, not an error.
pub trait ReferenceStore: Send + Sync {
    /// Fetch one document by its `_id`.
    fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError>;

    /// Fetch every document of a collection, in insertion order.
    fn find_all(&self, collection: Collection) -> Result<Vec<Value>, StoreError>;

    /// Get the store name for logging.
    fn name(&self) -> &'static str;
}

/// Reference store held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: HashMap<Collection, Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `<collection>.json` files from a directory. Missing files are
    /// empty collections.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for collection in Collection::ALL {
            let path = dir.as_ref().join(format!("{}.json", collection.name()));
            if !path.exists() {
                continue;
            }
            let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            let value: Value = serde_json::from_str(&content).map_err(|e| StoreError::Decode {
                collection,
                message: e.to_string(),
            })?;
            let Value::Array(rows) = value else {
                return Err(StoreError::Decode {
                    collection,
                    message: "expected a JSON array of documents".to_string(),
                });
            };
            tracing::debug!(collection = %collection, rows = rows.len(), "Loaded reference collection");
            store.insert_many(collection, rows);
        }
        Ok(store)
    }

    pub fn insert_one(&mut self, collection: Collection, document: Value) {
        self.rows.entry(collection).or_default().push(document);
    }

    pub fn insert_many(&mut self, collection: Collection, documents: impl IntoIterator<Item = Value>) {
        self.rows.entry(collection).or_default().extend(documents);
    }

    pub fn len(&self, collection: Collection) -> usize {
        self.rows.get(&collection).map_or(0, Vec::len)
    }
}

fn document_id(document: &Value) -> Option<String> {
    match document.get("_id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

impl ReferenceStore for MemoryStore {
    fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.rows.get(&collection).and_then(|rows| {
            rows.iter()
                .find(|row| document_id(row).as_deref() == Some(key))
                .cloned()
        }))
    }

    fn find_all(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        Ok(self.rows.get(&collection).cloned().unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_collection_names() {
        for collection in Collection::ALL {
            assert_eq!(collection.name().parse::<Collection>().unwrap(), collection);
        }
        assert!(matches!(
            "users".parse::<Collection>(),
            Err(StoreError::UnknownCollection(_))
        ));
    }

    #[test]
    fn test_get_by_id() {
        let mut store = MemoryStore::new();
        store.insert_many(
            Collection::JobGroupInfo,
            vec![json!({"_id": "A1234", "name": "foo"}), json!({"_id": "B5678"})],
        );

        let row = store.get(Collection::JobGroupInfo, "A1234").unwrap();
        assert_eq!(row, Some(json!({"_id": "A1234", "name": "foo"})));
        assert_eq!(store.get(Collection::JobGroupInfo, "Z9999").unwrap(), None);
        assert_eq!(store.get(Collection::Cities, "A1234").unwrap(), None);
    }

    #[test]
    fn test_numeric_ids() {
        let mut store = MemoryStore::new();
        store.insert_one(Collection::VolunteeringMissions, json!({"_id": 75, "missions": []}));
        assert!(store.get(Collection::VolunteeringMissions, "75").unwrap().is_some());
    }

    #[test]
    fn test_find_all_keeps_order() {
        let mut store = MemoryStore::new();
        store.insert_one(Collection::JobBoards, json!({"title": "Remix Jobs"}));
        store.insert_one(Collection::JobBoards, json!({"title": "Other"}));

        let boards = store.find_all(Collection::JobBoards).unwrap();
        assert_eq!(boards[0]["title"], "Remix Jobs");
        assert_eq!(boards[1]["title"], "Other");
        assert!(store.find_all(Collection::Associations).unwrap().is_empty());
        assert_eq!(store.len(Collection::JobBoards), 2);
    }

    #[test]
    fn test_from_dir() {
        let dir = std::env::temp_dir().join(format!("advisor-store-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("cities.json"), r#"[{"_id": "69123", "latitude": 45.7}]"#).unwrap();
        fs::write(dir.join("jobboards.json"), r#"{"title": "not an array"}"#).unwrap();

        let err = MemoryStore::from_dir(&dir).unwrap_err();
        assert!(matches!(err, StoreError::Decode { collection: Collection::JobBoards, .. }));

        fs::remove_file(dir.join("jobboards.json")).unwrap();
        let store = MemoryStore::from_dir(&dir).unwrap();
        assert_eq!(store.len(Collection::Cities), 1);
        assert_eq!(store.len(Collection::JobBoards), 0);

        fs::remove_dir_all(&dir).unwrap();
    }
}
