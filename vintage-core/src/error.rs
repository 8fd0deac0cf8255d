use std::fmt;

#[derive(Debug)]
pub enum VintageError {
    /// IO-related failures (directory not found, unreadable file, etc.)
    Io(String),

    /// Document bytes that are not valid UTF-8
    Decode { path: String, detail: String },

    /// Invalid Hyperparameter Value
    InvalidHyperparameter { name: String, value: String },

    /// The training corpus contains zero documents.
    EmptyTrainingData,

    /// Model used before calling `fit`
    NotFitted,

    /// Encountered Internal Error.
    InternalError,
}

impl fmt::Display for VintageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for VintageError {}

pub type Result<T> = std::result::Result<T, VintageError>;
