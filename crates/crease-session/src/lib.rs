//! Client session management for Crease.
//!
//! This crate owns the one piece of shared mutable state the client has:
//! who is logged in.
//!
//! 1. **Session**: a bearer token, the role it was issued for, and an
//!    optional user id ([`Session`], [`Role`])
//! 2. **Storage**: where the session survives between runs
//!    ([`Storage`] trait, [`FileStorage`], [`MemoryStorage`])
//! 3. **Store**: the single owner of the session, with
//!    `hydrate` / `commit` / `clear` ([`SessionStore`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Handlers (above)  ← read the token for requests, commit on login, clear on logout
//!     ↕
//! Session Layer (this crate)  ← in-memory session mirrored to storage
//!     ↕
//! Storage (below)  ← a JSON file on disk, or a map in tests
//! ```

mod error;
mod session;
mod storage;
mod store;

pub use error::SessionError;
pub use session::{Role, Session, StorageKeys};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::SessionStore;
