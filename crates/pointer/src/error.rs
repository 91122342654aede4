use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("JSON pointer {0:?} must start with '/'")]
    MissingSlash(String),

    #[error("invalid escape sequence in JSON pointer token {0:?}")]
    InvalidEscape(String),
}
