use thiserror::Error;

/// Result type alias using DocMockError
pub type Result<T> = std::result::Result<T, DocMockError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Addressing
    InvalidCollectionPath,
    InvalidReferencePath,
    InvalidFieldPath,
    NotFound,

    // Document handles
    DataUnavailable,

    // Integration
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidCollectionPath => "ERR_INVALID_COLLECTION_PATH",
            ExErrorKind::InvalidReferencePath => "ERR_INVALID_REFERENCE_PATH",
            ExErrorKind::InvalidFieldPath => "ERR_INVALID_FIELD_PATH",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::DataUnavailable => "ERR_DATA_UNAVAILABLE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus the
/// document context the error was raised in.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    doc_id: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            doc_id: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add document ID context
    pub fn with_doc_id(mut self, id: impl Into<String>) -> Self {
        self.doc_id = Some(id.into());
        self
    }

    /// Add path context (collection, document or field path)
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the document ID context, if any
    pub fn doc_id(&self) -> Option<&str> {
        self.doc_id.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(doc_id) = &self.doc_id {
            write!(f, " (doc_id: {})", doc_id)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for docmock operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocMockError {
    // ===== Addressing Errors =====
    /// Collection path is empty, has empty segments, or names a document
    #[error("Invalid collection path '{path}': {reason}")]
    InvalidCollectionPath { path: String, reason: String },

    /// Document path does not have the `<collection>/<key>` shape
    #[error("Invalid reference path '{path}': {reason}")]
    InvalidReferencePath { path: String, reason: String },

    /// Dotted field path does not resolve inside a field tree
    #[error("Invalid field path '{path}': {reason}")]
    InvalidFieldPath { path: String, reason: String },

    /// Document not found in store
    #[error("Document not found: {path}")]
    DocumentNotFound { path: String },

    // ===== Document Handle Errors =====
    /// A document handle failed to produce its data
    #[error("Data unavailable for document {doc_id}: {reason}")]
    DataUnavailable { doc_id: String, reason: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from DocMockError to ExError
impl From<DocMockError> for ExError {
    fn from(err: DocMockError) -> Self {
        let message = err.to_string();
        match err {
            DocMockError::InvalidCollectionPath { path, .. } => {
                ExError::new(ExErrorKind::InvalidCollectionPath)
                    .with_path(path)
                    .with_message(message)
            }

            DocMockError::InvalidReferencePath { path, .. } => {
                ExError::new(ExErrorKind::InvalidReferencePath)
                    .with_path(path)
                    .with_message(message)
            }

            DocMockError::InvalidFieldPath { path, .. } => {
                ExError::new(ExErrorKind::InvalidFieldPath)
                    .with_path(path)
                    .with_message(message)
            }

            DocMockError::DocumentNotFound { path } => ExError::new(ExErrorKind::NotFound)
                .with_doc_id(path.rsplit('/').next().unwrap_or_default())
                .with_path(path)
                .with_message("Document not found"),

            DocMockError::DataUnavailable { doc_id, .. } => {
                ExError::new(ExErrorKind::DataUnavailable)
                    .with_doc_id(doc_id)
                    .with_message(message)
            }

            DocMockError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to DocMockError
impl From<serde_json::Error> for DocMockError {
    fn from(err: serde_json::Error) -> Self {
        DocMockError::Serialization {
            message: err.to_string(),
        }
    }
}
