use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Failed to extract text")]
    ExtractionFailed,

    /// Delegate failure; the message is surfaced to callers verbatim.
    #[error("{0}")]
    ExternalServiceError(String),

    #[error("Malformed delegate response: {0}")]
    MalformedDelegateResponse(String),

    #[error("{0}")]
    Invalid(String),

    #[error("Internal server error")]
    InternalServerError,
}
