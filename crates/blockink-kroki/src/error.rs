//! Error types for diagram encoding and rendering.

/// Error from encoding a diagram or fetching its rendered image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Compression stream construction or write failed.
    #[error("compression failed")]
    Compress(#[source] std::io::Error),

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// Rendering server returned an error status.
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Response body could not be fully read.
    #[error("failed to read response body")]
    BodyRead(#[source] ureq::Error),
}

/// Error from decoding a PlantUML-alphabet token.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Symbol outside the token alphabet.
    #[error("invalid token symbol {0:?}")]
    InvalidSymbol(char),

    /// Token length leaves a single trailing symbol, which no input produces.
    #[error("truncated token group")]
    TruncatedGroup,
}
