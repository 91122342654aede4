use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UriTemplateError {
    #[error("URI template parse error in '{0}': {1}")]
    Parse(String, String),
}
