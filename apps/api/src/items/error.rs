use thiserror::Error;

/// Fatal configuration errors raised by item operations. The call that detects one
/// returns no partial result.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Paragraph-style items are not implemented")]
    ParagraphNotImplemented,

    #[error("Missing required information: {0}")]
    MissingInformation(String),

    #[error("Type mismatch: expected '{expected}', got '{found}' instead")]
    TypeMismatch { expected: String, found: String },

    #[error("Line index {index} out of range for item with {len} lines")]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("Malformed item record: {0}")]
    MalformedRecord(#[from] serde_json::Error),
}
