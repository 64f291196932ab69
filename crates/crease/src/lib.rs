//! # Crease
//!
//! Session client for the cricket academy API.
//!
//! Crease models the academy's web page without a browser: a [`Portal`]
//! owns an in-memory page ([`Document`](crease_view::Document)), the
//! persisted login ([`SessionStore`](crease_session::SessionStore)) and an
//! [`ApiGateway`]. Form handlers read the page, call the API, and update
//! both.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crease::prelude::*;
//!
//! # async fn run() -> Result<(), ApiError> {
//! let mut portal = PortalBuilder::new()
//!     .base_url("http://localhost:8080")
//!     .build(ReqwestTransport::new("http://localhost:8080")?, MemoryStorage::new());
//!
//! portal.start().await?;
//! portal
//!     .document_mut()
//!     .form_mut(FormId::Login)
//!     .set(FormField::Identifier, "9999999999")
//!     .set(FormField::Password, "secret");
//! portal.login(LoginSubmitter::Cricketer).await?;
//! # Ok(())
//! # }
//! ```

mod api;
mod config;
mod error;
mod gateway;
mod handler;
mod portal;
#[cfg(test)]
mod testing;

pub use api::ProfileUpdated;
pub use config::{ClientConfig, ENV_API_URL, ENV_STORAGE, default_storage_path};
pub use error::ApiError;
pub use gateway::ApiGateway;
pub use handler::LoginSubmitter;
pub use portal::{Portal, PortalBuilder};

/// Convenient re-exports for client code.
///
/// ```rust
/// use crease::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ApiError, ApiGateway, ClientConfig, LoginSubmitter, Portal, PortalBuilder, ProfileUpdated,
    };

    pub use crease_protocol::{
        Announcement, Codec, Cricketer, Endpoint, JsonCodec, ProtocolError, RecordId,
    };

    pub use crease_session::{
        FileStorage, MemoryStorage, Role, Session, SessionError, SessionStore, Storage,
    };

    pub use crease_transport::{
        HttpRequest, HttpResponse, Method, ReqwestTransport, Transport, TransportError,
    };

    pub use crease_view::{
        Document, ElementId, FormField, FormId, MessageKind, Page, render, router,
    };
}
