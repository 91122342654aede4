//! Variable scopes threaded through a walk.

use serde_json::{Map, Value};

/// One scope's worth of captured variable bindings plus a link to the
/// enclosing scope.
///
/// Frames are created by the walker only when at least one capture
/// succeeded and live on its recursion stack: append-only while being
/// built, immutable once the visitor sees them. A visitor that wants to
/// keep the bindings beyond the callback must flatten them with
/// [`Context::values`]; the `&Context` itself is only valid for the call.
#[derive(Debug)]
pub struct Context<'a> {
    parent: Option<&'a Context<'a>>,
    bindings: Vec<(&'a str, &'a Value)>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        parent: Option<&'a Context<'a>>,
        bindings: Vec<(&'a str, &'a Value)>,
    ) -> Self {
        Self { parent, bindings }
    }

    /// Looks up one variable, nearest frame first. Within a frame the
    /// last-compiled binding wins, matching the flattening rule.
    pub fn get(&self, name: &str) -> Option<&Value> {
        for (bound, value) in self.bindings.iter().rev() {
            if *bound == name {
                return Some(value);
            }
        }
        self.parent.and_then(|parent| parent.get(name))
    }

    /// Flattens the chain into a fresh map, child bindings shadowing
    /// same-named ancestor bindings. Never cached and never aliased: each
    /// call clones into a new map, and no frame is mutated.
    pub fn values(&self) -> Map<String, Value> {
        let mut values = Map::new();
        for (name, value) in &self.bindings {
            values.insert((*name).to_string(), (*value).clone());
        }
        let mut frame = self.parent;
        while let Some(ctx) = frame {
            for (name, value) in ctx.bindings.iter().rev() {
                if !values.contains_key(*name) {
                    values.insert((*name).to_string(), (*value).clone());
                }
            }
            frame = ctx.parent;
        }
        values
    }
}
