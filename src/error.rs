use thiserror::Error;

/// Failures raised at the stage boundary where a precondition is checked.
/// Every variant is terminal for the current analysis run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// Empty series or a degenerate (zero-width) price range.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
    /// No bucket carries positive volume, so there is nothing to score.
    #[error("Empty profile: no bucket has positive volume to score")]
    EmptyProfile,
    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type ProfileResult<T> = Result<T, ProfileError>;
