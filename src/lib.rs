//! Declarative extraction of named variables from JSON API responses.
//!
//! A rule set maps URL patterns (RFC 6570 URI templates or literal URLs) to
//! extraction schemas. Compiling it yields a [`RuleIndex`]; feeding the
//! index a concrete URL and a decoded document invokes a visitor at every
//! schema-selected node with the node's structural path and the variables
//! in scope there.
//!
//! ```
//! use serde_json::json;
//! use webmap::RuleIndex;
//!
//! let index = RuleIndex::compile(&json!({
//!     "https://api.example.org/search": {
//!         "/results": [{ "/id": "id", "/tags": ["tag"] }],
//!     },
//! }))?;
//!
//! let doc = json!({ "results": [{ "id": 7, "tags": ["a", "b"] }] });
//! let mut seen = Vec::new();
//! index.parse("https://api.example.org/search", &doc, |path, ctx| {
//!     seen.push(format!("{}: {:?}", path, ctx.values()));
//!     Ok(())
//! })?;
//!
//! assert_eq!(seen.len(), 3); // one per result, one per tag
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use webmap_extract::{
    BuildError, CaptureSchema, Context, RuleIndex, Schema, VisitorError, WalkError,
};
pub use webmap_pointer::{Pointer, PointerError};
pub use webmap_uritemplate::{UriTemplate, UriTemplateError};
