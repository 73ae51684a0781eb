use thiserror::Error;

/// Error produced when a search fails.
///
/// Running out of states to explore is not an error for most entry points;
/// they report it as `None`. [SearchError::NoPathFound] is reserved for
/// callers which demand a solution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("No search result found")]
    NoPathFound,

    #[error("Step limit exhausted after {0} steps")]
    StepLimitExhausted(usize),

    #[error("Invalid transition cost: {0}")]
    InvalidCost(String),
}

/// Result when a search method might fail.
pub type Result<T> = std::result::Result<T, SearchError>;
