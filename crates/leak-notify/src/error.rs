use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP transport error, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a non-2xx status.
    #[error("webhook rejected message ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error(transparent)]
    Database(#[from] leak_db::error::DatabaseError),
}
