//! Error types for the Notion client.

/// Error from Notion API operations.
#[derive(Debug, thiserror::Error)]
pub enum NotionError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// Notion returned a non-200 status.
    #[error("HTTP status: got {status}, expected 200")]
    HttpResponse {
        /// Observed status code.
        status: u16,
    },

    /// Response body was not the expected block shape.
    #[error("malformed block response: {0}")]
    MalformedResponse(&'static str),
}
