//! Wire protocol for Crease.
//!
//! This crate defines what the client and the academy API say to each
//! other:
//!
//! - **Types** ([`Cricketer`], [`Announcement`], [`LoginRequest`], etc.):
//!   the records and request/response bodies that travel over HTTP.
//! - **Endpoints** ([`Endpoint`]): the table of routes the client calls,
//!   with their method and whether they need a bearer token.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how bodies are turned
//!   into bytes and back.
//! - **Errors** ([`ProtocolError`]): what can go wrong while encoding or
//!   decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw HTTP exchanges) and the
//! gateway (typed API calls). It knows nothing about connections or
//! sessions, only about the shape of the data.
//!
//! ```text
//! Transport (bytes) → Protocol (typed bodies) → Gateway / Handlers
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod codec;
mod endpoint;
mod error;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use endpoint::Endpoint;
pub use error::ProtocolError;
pub use types::{
    AdminLoginRequest, AdminLoginResponse, AdminProfile, Announcement,
    Cricketer, ErrorBody, InactiveStatusUpdate, JoiningDateUpdate,
    LoginRequest, LoginResponse, MessageResponse, NewAnnouncement,
    ProfileUpdate, RecordId, SignupRequest,
};
