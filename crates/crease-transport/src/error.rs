/// Errors that can occur in the transport layer.
///
/// A transport error means no HTTP response was obtained at all. A
/// response with a 4xx/5xx status is NOT a transport error; it comes back
/// as an ordinary [`HttpResponse`](crate::HttpResponse).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The base URL or a request path could not be turned into a URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("client setup failed: {0}")]
    Setup(String),

    /// The server could not be reached (connection refused, DNS failure,
    /// TLS handshake failure).
    #[error("server unreachable: {0}")]
    Unreachable(String),

    /// The request was sent but reading the response failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}
