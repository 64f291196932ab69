//! Page model, view routing, and rendering for Crease.
//!
//! The browser client kept its state in the DOM. Here the DOM is a
//! [`Document`]: a fixed set of named elements (pages, role sections,
//! content slots, message slots), the forms, and a queue of modal
//! alerts. Handlers read forms from it and write results into it; the
//! CLI prints it.
//!
//! # Key types
//!
//! - [`Document`]: elements, forms and alerts
//! - [`Page`] and the [`router`] functions: which page is showing
//! - [`render`]: pure functions from API data to markup

mod document;
pub mod render;
pub mod router;

pub use document::{Document, Element, ElementId, Form, FormField, FormId, MessageKind};
pub use router::Page;
