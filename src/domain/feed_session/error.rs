#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedSessionError {
    /// The request never got an answer
    #[error("request failed: {0}")]
    Transport(String),
    /// The API answered with an error status
    #[error("request rejected with {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}
