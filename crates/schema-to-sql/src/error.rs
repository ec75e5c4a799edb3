//! Error types for DDL generation.

/// Errors that can occur while generating DDL.
#[derive(Debug, thiserror::Error)]
pub enum DdlError {
    /// The caller passed an argument that can never produce output.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No dialect is registered under the requested target name.
    #[error("Unsupported target '{0}', aborting DDL generation")]
    UnsupportedTarget(String),

    /// An attribute type has no column mapping in the dialect.
    #[error("Unsupported attribute type '{type_name}' for attribute '{attribute}' in model '{model}'")]
    UnsupportedType {
        /// The offending type name as it appeared in the document.
        type_name: String,
        /// Attribute name.
        attribute: String,
        /// Model name.
        model: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (reading schema documents).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for DDL generation.
pub type Result<T> = std::result::Result<T, DdlError>;
