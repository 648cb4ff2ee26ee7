//! Error types for editing and document loading.

use thiserror::Error;

use crate::manipulation::GestureKind;

/// Validation failures raised by editing operations.
///
/// A failed edit never leaves a partial mutation behind: the document,
/// selection and history stay exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("Element id \"{0}\" is already used by another element")]
    DuplicateCustomId(String),
    #[error("Column width {requested}% is outside the allowed range {min}%..{max}%")]
    ColumnWidthOutOfRange { requested: f64, min: f64, max: f64 },
    #[error("Column {column} would shrink below the minimum width of {min}%")]
    ColumnWidthBelowMinimum { column: usize, min: f64 },
    #[error("Column {index} does not exist (table has {columns} columns)")]
    ColumnIndexOutOfRange { index: usize, columns: usize },
    #[error("Invalid column count: {0}")]
    InvalidColumnCount(usize),
    #[error("Invalid row count: {0}")]
    InvalidRowCount(usize),
    #[error("Table height {height} exceeds the page height {canvas_height}")]
    TableTooTall { height: f64, canvas_height: f64 },
    #[error("Property {property} does not apply to {kind} elements")]
    PropertyNotApplicable {
        property: &'static str,
        kind: &'static str,
    },
    #[error("Invalid value for {property}: {reason}")]
    InvalidValue {
        property: &'static str,
        reason: String,
    },
    #[error("A {0} gesture is already in progress")]
    GestureActive(GestureKind),
    #[error("No {0} gesture is in progress")]
    NoActiveGesture(GestureKind),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl EditError {
    pub(crate) fn invalid(property: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            property,
            reason: reason.into(),
        }
    }
}

/// Result type for editing operations.
pub type EditResult<T> = Result<T, EditError>;

/// Failures while decoding or validating a serialized document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Malformed document data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid document: {0}")]
    Invalid(String),
}

impl Clone for DocumentError {
    fn clone(&self) -> Self {
        match self {
            // serde_json::Error is not Clone; keep the message.
            DocumentError::Json(e) => DocumentError::Invalid(e.to_string()),
            DocumentError::Invalid(msg) => DocumentError::Invalid(msg.clone()),
        }
    }
}

impl PartialEq for DocumentError {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

/// Result type for document decoding.
pub type DocumentResult<T> = Result<T, DocumentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        let err = EditError::ColumnWidthOutOfRange {
            requested: 2.0,
            min: 5.0,
            max: 95.0,
        };
        assert_eq!(
            err.to_string(),
            "Column width 2% is outside the allowed range 5%..95%"
        );

        let err = EditError::DuplicateCustomId("name".to_string());
        assert!(err.to_string().contains("\"name\""));
    }

    #[test]
    fn test_document_error_converts_into_edit_error() {
        let err: EditError = DocumentError::Invalid("missing elements".to_string()).into();
        assert!(matches!(err, EditError::Document(DocumentError::Invalid(_))));
    }
}
