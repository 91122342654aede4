use thiserror::Error;
use webmap_uritemplate::UriTemplateError;

/// Error type a visitor callback may return. It is wrapped into
/// [`WalkError::Visitor`] so consumer-originated failures stay
/// distinguishable from engine failures.
pub type VisitorError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while compiling a rule-set definition into a
/// [`RuleIndex`](crate::RuleIndex). Every definition error carries the
/// absolute, escaped pointer of the offending value, and compilation fails
/// fast: no partial index is ever produced.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("empty rule set")]
    EmptyRuleSet,

    #[error("rule set must be a JSON object")]
    NotAnObject,

    #[error("rule set decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{ptr:?}: {source}")]
    Template {
        ptr: String,
        source: UriTemplateError,
    },

    #[error("{ptr:?}: invalid variable name")]
    InvalidVariableName { ptr: String },

    #[error("{ptr:?}: invalid key {key:?}: JSON pointer expected")]
    InvalidKey { ptr: String, key: String },

    #[error("{ptr:?}: element expected in array iterator")]
    ElementExpected { ptr: String },

    #[error("{ptr:?}: invalid value type")]
    InvalidValueType { ptr: String },
}

/// Errors that abort a document walk. Resolution misses never appear here:
/// a pointer that does not exist in the document silently skips its branch.
#[derive(Error, Debug)]
pub enum WalkError {
    /// The visitor callback rejected a node. Aborts the walk immediately,
    /// skipping all remaining siblings at every enclosing level.
    #[error("visitor error at {ptr:?}: {source}")]
    Visitor { ptr: String, source: VisitorError },

    /// The document could not be decoded (reader entry point only).
    #[error("document decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
