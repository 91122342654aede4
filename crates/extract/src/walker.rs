//! Recursive execution of a compiled [`Schema`] against a decoded document.
//!
//! The walker threads a single in-place [`Pointer`] and a chain of
//! stack-allocated [`Context`] frames through the recursion. Resolution
//! misses silently skip their branch; only a visitor error aborts the walk.

use crate::context::Context;
use crate::error::{VisitorError, WalkError};
use crate::schema::{CaptureSchema, Schema};
use serde_json::Value;
use webmap_pointer::Pointer;

/// Visitor callback: invoked with the current structural path and the
/// variable scope at every capture node that bound at least one value. The
/// pointer is reused between calls; clone it to keep it.
pub(crate) type Visit<'f> = dyn FnMut(&Pointer, &Context<'_>) -> Result<(), VisitorError> + 'f;

pub(crate) fn walk<'a>(
    schema: &'a Schema,
    parent: Option<&'a Context<'a>>,
    path: &mut Pointer,
    doc: &'a Value,
    visit: &mut Visit<'_>,
) -> Result<(), WalkError> {
    match schema {
        Schema::Empty => Ok(()),
        Schema::Capture(capture) => walk_capture(capture, parent, path, doc, visit),
        Schema::Iterate(child) => walk_iterate(child, parent, path, doc, visit),
    }
}

fn walk_capture<'a>(
    capture: &'a CaptureSchema,
    parent: Option<&'a Context<'a>>,
    path: &mut Pointer,
    doc: &'a Value,
    visit: &mut Visit<'_>,
) -> Result<(), WalkError> {
    // Transparent iteration: a node with no bindings whose sole child sits
    // at the root pointer browses an array in place, producing index
    // segments instead of a pointer lookup. Recursing this same node means
    // nested arrays fan out transitively.
    if capture.is_transparent_iterator()
        && let Value::Array(items) = doc
    {
        for (index, item) in items.iter().enumerate() {
            path.push_index(index);
            let result = walk_capture(capture, parent, path, item, visit);
            path.pop();
            result?;
        }
        return Ok(());
    }

    let mut bindings: Vec<(&str, &Value)> = Vec::new();
    for (pointer, name) in &capture.bindings {
        if let Some(value) = pointer.resolve(doc) {
            bindings.push((name.as_str(), value));
        }
    }

    let frame;
    let scope = if bindings.is_empty() {
        // Nothing captured here: no frame, no visit. Children still descend
        // with the inherited scope.
        parent
    } else {
        log::trace!("visit {} ({} bindings)", path, bindings.len());
        frame = Context::new(parent, bindings);
        visit(path, &frame).map_err(|source| WalkError::Visitor {
            ptr: path.to_string(),
            source,
        })?;
        Some(&frame)
    };

    for (pointer, child) in &capture.children {
        let Some(value) = pointer.resolve(doc) else {
            continue;
        };
        let depth = path.len();
        path.extend(pointer);
        let result = walk(child, scope, path, value, visit);
        path.truncate(depth);
        result?;
    }
    Ok(())
}

fn walk_iterate<'a>(
    child: &'a Schema,
    parent: Option<&'a Context<'a>>,
    path: &mut Pointer,
    doc: &'a Value,
    visit: &mut Visit<'_>,
) -> Result<(), WalkError> {
    match doc {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                path.push_index(index);
                let result = walk(child, parent, path, item, visit);
                path.pop();
                result?;
            }
            Ok(())
        }
        Value::Object(members) => {
            // JSON object fields carry no defined order; iteration order is
            // whatever the underlying map yields.
            for (key, item) in members {
                path.push_property(key);
                let result = walk(child, parent, path, item, visit);
                path.pop();
                result?;
            }
            Ok(())
        }
        // Null and scalars are inert, not an error.
        _ => Ok(()),
    }
}
