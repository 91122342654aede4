//! RFC 6901 JSON pointers, plus the growable structural path used when
//! walking a document.
//!
//! A [`Pointer`] is parsed once from its escaped text form and then either
//! resolved against a `serde_json::Value` or mutated in place
//! (push/pop/truncate) as a walk descends and backtracks.

pub mod error;
mod pointer;

// --- Public API ---
pub use error::PointerError;
pub use pointer::{Pointer, escape};
