//! Collection sources
//!
//! The completer and the `\d` metacommand only need one thing from the
//! document store: the names of the collections under a base document path.
//! [`CollectionLister`] is that capability. [`JsonStore`] implements it over
//! a JSON document tree loaded from disk, which is what the shell uses when
//! started with `--data`.
//!
//! A JSON document tree maps collection names to documents by id. A document
//! lists its subcollections under the `__collections__` key:
//!
//! ```json
//! { "users": { "1": { "name": "Ann", "__collections__": { "posts": {} } } } }
//! ```

use std::path::Path;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, StoreError};

/// Key under which a document keeps its subcollections
pub const SUBCOLLECTIONS_KEY: &str = "__collections__";

/// Trait for listing child collections of a document
///
/// The base path is empty for the store root, or a document path with an
/// even number of segments (`users/1`, `users/1/posts/9`).
#[async_trait]
pub trait CollectionLister: Send + Sync {
    /// List the names of the collections directly under `base_path`
    ///
    /// # Arguments
    /// * `base_path` - Base document path, empty for the root
    ///
    /// # Returns
    /// * `Result<Vec<String>>` - Collection names, or an error if the path does not exist
    async fn list_child_collections(&self, base_path: &str) -> Result<Vec<String>>;
}

/// In-memory document tree read from a JSON file
#[derive(Debug, Clone, Default)]
pub struct JsonStore {
    root: Map<String, Value>,
}

impl JsonStore {
    /// Create a store with no collections
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a store from a parsed JSON value
    ///
    /// # Arguments
    /// * `value` - Root object mapping collection names to documents
    ///
    /// # Returns
    /// * `Result<Self>` - Store, or an error if the root is not an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(StoreError::InvalidData(format!(
                "root must be an object, found {}",
                type_name(&other)
            ))
            .into()),
        }
    }

    /// Load a store from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to the JSON document tree
    ///
    /// # Returns
    /// * `Result<Self>` - Loaded store or error
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StoreError::LoadFailed(format!("{}: {e}", path.display())))?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| StoreError::InvalidData(format!("{}: {e}", path.display())))?;

        debug!(path = %path.display(), "loaded JSON store");
        Self::from_value(value)
    }

    /// Collections object under a base document path
    fn collections_at(&self, base_path: &str) -> Option<&Map<String, Value>> {
        let mut level = &self.root;
        if base_path.is_empty() {
            return Some(level);
        }

        let segments: Vec<&str> = base_path.split('/').collect();
        if segments.len() % 2 != 0 {
            return None;
        }

        for pair in segments.chunks(2) {
            let document = level.get(pair[0])?.as_object()?.get(pair[1])?.as_object()?;
            level = match document.get(SUBCOLLECTIONS_KEY) {
                Some(Value::Object(children)) => children,
                Some(_) => return None,
                None => return Some(empty_map()),
            };
        }
        Some(level)
    }
}

#[async_trait]
impl CollectionLister for JsonStore {
    async fn list_child_collections(&self, base_path: &str) -> Result<Vec<String>> {
        let base_path = base_path.strip_prefix('/').unwrap_or(base_path);
        match self.collections_at(base_path) {
            Some(collections) => Ok(collections.keys().cloned().collect()),
            None => Err(StoreError::NotFound(base_path.to_string()).into()),
        }
    }
}

fn empty_map() -> &'static Map<String, Value> {
    static EMPTY: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();
    EMPTY.get_or_init(Map::new)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
