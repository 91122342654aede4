//! Schema-driven extraction of named variables from JSON documents.
//!
//! A declarative rule set associates URL patterns — RFC 6570 templates or
//! literal URLs — with extraction schemas describing which positions of a
//! response document to capture as named variables and which to iterate.
//! Compiling the rule set yields an immutable [`RuleIndex`]; walking a
//! document with it invokes a visitor once per schema-selected node,
//! handing over the node's structural path and every variable in scope
//! there (its own captures plus all ancestor captures).
//!
//! Missing data never fails a walk: a pointer that does not resolve simply
//! skips its branch, so one rule set can best-effort extract from whatever
//! response shape it meets. Only visitor errors and document decode
//! failures abort.

pub mod context;
pub mod error;
pub mod index;
pub mod schema;

mod compiler;
mod walker;

// --- Public API ---
pub use context::Context;
pub use error::{BuildError, VisitorError, WalkError};
pub use index::RuleIndex;
pub use schema::{CaptureSchema, Schema};

// Collaborator types that appear in the public API.
pub use webmap_pointer::Pointer;
pub use webmap_uritemplate::UriTemplate;
