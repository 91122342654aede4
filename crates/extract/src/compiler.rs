//! Compiles declarative rule definitions into [`Schema`] trees.
//!
//! A definition takes one of four shapes: null (no rules), a variable name,
//! a mapping from relative JSON pointers to nested definitions, or a
//! single-element array marking explicit iteration. Compilation is
//! depth-first and fails fast on the first malformed value.

use crate::error::BuildError;
use crate::schema::{CaptureSchema, Schema};
use serde_json::Value;
use webmap_pointer::{Pointer, escape};

/// Compiles one rule definition. `base` is the absolute, escaped pointer of
/// `def` within the enclosing rule set and prefixes every error.
pub(crate) fn compile_rule(base: &str, def: &Value) -> Result<Schema, BuildError> {
    match def {
        Value::Null => Ok(Schema::Empty),
        Value::String(name) => {
            if name.is_empty() {
                return Err(BuildError::InvalidVariableName {
                    ptr: base.to_string(),
                });
            }
            Ok(Schema::Capture(CaptureSchema {
                bindings: vec![(Pointer::root(), name.clone())],
                children: Vec::new(),
            }))
        }
        Value::Object(entries) => {
            let mut capture = CaptureSchema::default();
            for (key, value) in entries {
                let Ok(pointer) = Pointer::parse(key) else {
                    return Err(BuildError::InvalidKey {
                        ptr: base.to_string(),
                        key: key.clone(),
                    });
                };
                match value {
                    Value::Null => {}
                    Value::String(name) => {
                        if name.is_empty() {
                            return Err(BuildError::InvalidVariableName {
                                ptr: format!("{}/{}", base, escape(key)),
                            });
                        }
                        capture.bindings.push((pointer, name.clone()));
                    }
                    nested => {
                        let child = compile_rule(&format!("{}/{}", base, escape(key)), nested)?;
                        if !child.is_empty() {
                            capture.children.push((pointer, child));
                        }
                    }
                }
            }
            if capture.bindings.is_empty() && capture.children.is_empty() {
                return Ok(Schema::Empty);
            }
            Ok(Schema::Capture(capture))
        }
        Value::Array(items) => {
            let [element] = items.as_slice() else {
                return Err(BuildError::ElementExpected {
                    ptr: base.to_string(),
                });
            };
            let child = compile_rule(&format!("{}/0", base), element)?;
            if child.is_empty() {
                // An iterator around a no-op schema can never visit anything.
                return Ok(Schema::Empty);
            }
            Ok(Schema::Iterate(Box::new(child)))
        }
        _ => Err(BuildError::InvalidValueType {
            ptr: base.to_string(),
        }),
    }
}
