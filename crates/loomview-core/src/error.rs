use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoomError {
    #[error("Store not found: {0}")]
    NotFound(String),
    #[error("Unsupported store format: {0}")]
    UnsupportedFormat(String),
    #[error("Malformed store: {0}")]
    Format(String),
    #[error("Attributes list must only contain valid attributes, invalid: {}", .0.join(", "))]
    InvalidAttribute(Vec<String>),
    #[error("Attributes list contains more than two elements ({0} given)")]
    TooManyAttributes(usize),
    #[error("Empty attributes list given")]
    EmptyAttributes,
    #[error("Style must be one of [pie, bar], got '{0}'")]
    UnsupportedStyle(String),
    #[error("Input not a valid symbol name: {0}")]
    InvalidSymbol(String),
    #[error(
        "Color must be None, a valid gene symbol or one of [{}]: '{color}' is neither",
        .valid.join(", ")
    )]
    InvalidColor { color: String, valid: Vec<String> },
    #[error("Index {index} out of range for {len} rows")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: String,
        expected: usize,
        found: usize,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LoomError>;
