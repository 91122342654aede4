//! Compiled extraction schemas.
//!
//! A schema is a closed tagged union compiled once from a declarative rule
//! definition and dispatched by pattern matching in the walker.

use webmap_pointer::Pointer;

/// One node of a compiled extraction schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// No capture, no descent.
    Empty,
    /// Captures named variables at relative positions and descends into
    /// nested schemas.
    Capture(CaptureSchema),
    /// Applies the child schema to every element of a collection.
    Iterate(Box<Schema>),
}

/// The capture variant: variable bindings and child schemas, both keyed by
/// pointers relative to the node's current document position. Stored in
/// definition order, so sibling traversal order is deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaptureSchema {
    pub(crate) bindings: Vec<(Pointer, String)>,
    pub(crate) children: Vec<(Pointer, Schema)>,
}

impl CaptureSchema {
    /// True for the transparent-iteration shape: no bindings of its own and
    /// a sole child keyed by the root pointer. When such a node meets an
    /// array, the walker iterates the array in place instead of performing
    /// an ordinary pointer lookup.
    pub(crate) fn is_transparent_iterator(&self) -> bool {
        self.bindings.is_empty()
            && matches!(self.children.as_slice(), [(ptr, _)] if ptr.is_root())
    }
}

impl Schema {
    pub fn is_empty(&self) -> bool {
        matches!(self, Schema::Empty)
    }

    /// Every variable name this schema can bind, sorted and de-duplicated.
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names.sort_unstable();
        names.dedup();
        names
    }

    fn collect_variables<'s>(&'s self, names: &mut Vec<&'s str>) {
        match self {
            Schema::Empty => {}
            Schema::Capture(capture) => {
                names.extend(capture.bindings.iter().map(|(_, name)| name.as_str()));
                for (_, child) in &capture.children {
                    child.collect_variables(names);
                }
            }
            Schema::Iterate(child) => child.collect_variables(names),
        }
    }
}
