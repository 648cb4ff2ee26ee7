//! Persistence of named document blobs.
//!
//! Backends store opaque strings under a key; [`save_document`] and
//! [`load_document`] handle the document encoding on top.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::document::Document;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for blob storage backends.
///
/// Implementations can keep blobs in memory, on the filesystem or in
/// browser local storage behind a host binding.
pub trait Storage: Send + Sync {
    /// Save a blob, replacing any previous value.
    fn save(&self, key: &str, blob: &str) -> StorageResult<()>;

    /// Load a blob.
    fn load(&self, key: &str) -> StorageResult<String>;

    /// Delete a blob. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all keys.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// Serialize a document and store it under `key`.
pub fn save_document(storage: &dyn Storage, key: &str, document: &Document) -> StorageResult<()> {
    let json = document
        .to_json()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    storage.save(key, &json)
}

/// Load and validate the document stored under `key`.
pub fn load_document(storage: &dyn Storage, key: &str) -> StorageResult<Document> {
    let json = storage.load(key)?;
    Document::from_json(&json)
        .map_err(|e| StorageError::Serialization(format!("Failed to parse {key}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Constraints;
    use crate::elements::ElementType;
    use crate::geometry::NoMeasurer;
    use kurbo::Point;

    #[test]
    fn test_document_round_trip_through_storage() {
        let storage = MemoryStorage::new();
        let mut doc = Document::new();
        doc.add_element(ElementType::Signature, Point::new(40.0, 500.0), &Constraints::new(&NoMeasurer));

        save_document(&storage, "form", &doc).unwrap();
        let loaded = load_document(&storage, "form").unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_corrupt_blob_is_serialization_error() {
        let storage = MemoryStorage::new();
        storage.save("form", "{\"elements\": 3}").unwrap();
        assert!(matches!(
            load_document(&storage, "form"),
            Err(StorageError::Serialization(_))
        ));
    }
}
