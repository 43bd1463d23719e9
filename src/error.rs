use thiserror::Error;

/// Errors surfaced by the search composition layer
#[derive(Error, Debug)]
pub enum SearchError {
    /// A raw filter value failed validation, or a known filter name was
    /// addressed to a provider that does not support it
    #[error("invalid filter value: {value:?}")]
    InvalidFilter { value: String },

    #[error("provider {0} is unknown")]
    UnknownProvider(String),

    /// Failure inside a provider's own search
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
