/// Errors that can occur in ruplex.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid setting: {0}")]
    Settings(String),

    #[error("malformed timestamp: '{0}'")]
    Timestamp(String),

    #[error("work queue already terminated")]
    QueueTerminated,
}

impl Error {
    /// Convenience for settings-validation failures.
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}
