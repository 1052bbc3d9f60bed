#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A submission (or one of its fields) failed a validation rule.
    /// The message names the first violated rule in user-facing words.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
