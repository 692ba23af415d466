use thiserror::Error;

/// Failure taxonomy for the matching pipeline. Every operation here is
/// deterministic given its input, so none of these conditions is retried.
#[derive(Debug, Error)]
pub enum MatchError {
    /// No document payload supplied, or the payload is not the expected
    /// document format.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The extraction collaborator could not produce text from the document.
    #[error("text extraction failed: {0}")]
    ExtractionFailure(String),

    /// The vocabulary index never built. Requests fail with this condition
    /// until the process restarts with a valid corpus.
    #[error("job corpus unavailable: {0}")]
    CorpusUnavailable(String),

    /// Projecting or scoring a document failed unexpectedly.
    #[error("vectorization failed: {0}")]
    VectorizationFailure(String),
}
