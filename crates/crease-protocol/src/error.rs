//! Error types for the protocol layer.
//!
//! Each crate in Crease defines its own error enum. When you see a
//! `ProtocolError`, the problem is in serialization or in the shape of a
//! response body, not in networking or session storage.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization of a request body failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// A response body could not be decoded into the expected type.
    ///
    /// Common causes: the server returned a different shape than the
    /// endpoint table promises, or a field had the wrong type.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The body decoded but is missing something the client relies on,
    /// such as a login response without a token.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
