//! The compiled rule index: literal-URL roots plus templated rules grouped
//! by their variable-name sets.

use crate::compiler::compile_rule;
use crate::context::Context;
use crate::error::{BuildError, VisitorError, WalkError};
use crate::schema::Schema;
use crate::walker::walk;
use itertools::Itertools;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use webmap_pointer::{Pointer, escape};
use webmap_uritemplate::UriTemplate;

/// A URL template paired with the schema compiled from its rule definition.
#[derive(Debug, Clone)]
struct TemplatedRule {
    template: UriTemplate,
    schema: Schema,
}

/// An immutable index of compiled extraction rules.
///
/// Literal (variable-free) URL patterns land in `roots` and drive
/// [`RuleIndex::parse`] directly. Templated patterns are grouped by their
/// *sorted* variable-name set, so two templates mentioning the same names
/// in different order land in the same group; matching a concrete URL back
/// to a template is a higher-level dispatcher's concern.
///
/// Once built, an index is read-only and safe to share across threads; each
/// `parse` invocation owns its path and context state.
#[derive(Debug, Clone)]
pub struct RuleIndex {
    definition: Value,
    roots: HashMap<String, Schema>,
    template_groups: HashMap<String, HashMap<String, TemplatedRule>>,
}

impl RuleIndex {
    /// Compiles a declarative rule-set definition: a JSON object mapping
    /// URL patterns (RFC 6570 templates, possibly variable-free) to rule
    /// definitions. Fails fast on the first malformed pattern or rule.
    pub fn compile(definition: &Value) -> Result<Self, BuildError> {
        let Value::Object(entries) = definition else {
            return Err(BuildError::NotAnObject);
        };
        if entries.is_empty() {
            return Err(BuildError::EmptyRuleSet);
        }

        let mut roots = HashMap::new();
        let mut template_groups: HashMap<String, HashMap<String, TemplatedRule>> = HashMap::new();
        for (pattern, rule) in entries {
            let ptr = format!("/{}", escape(pattern));
            let template = UriTemplate::parse(pattern)
                .map_err(|source| BuildError::Template { ptr: ptr.clone(), source })?;
            let schema = compile_rule(&ptr, rule)?;
            let variables = template.variable_names();
            if variables.is_empty() {
                roots.insert(pattern.clone(), schema);
            } else {
                template_groups
                    .entry(group_key(&variables))
                    .or_default()
                    .insert(pattern.clone(), TemplatedRule { template, schema });
            }
        }
        log::debug!(
            "compiled rule index: {} root(s), {} template group(s)",
            roots.len(),
            template_groups.len()
        );
        Ok(Self {
            definition: definition.clone(),
            roots,
            template_groups,
        })
    }

    /// Decodes a JSON rule-set definition and compiles it.
    pub fn from_json(definition: &str) -> Result<Self, BuildError> {
        let value: Value = serde_json::from_str(definition)?;
        Self::compile(&value)
    }

    /// Walks `doc` with the schema registered for `url`, invoking `visit`
    /// at every capture node that bound at least one value.
    ///
    /// Only literal URL rules are consulted; a URL with no rule is a silent
    /// no-op, not an error. The first visitor error aborts the walk.
    pub fn parse<F>(&self, url: &str, doc: &Value, mut visit: F) -> Result<(), WalkError>
    where
        F: FnMut(&Pointer, &Context<'_>) -> Result<(), VisitorError>,
    {
        let Some(schema) = self.roots.get(url) else {
            return Ok(());
        };
        let mut path = Pointer::root();
        walk(schema, None, &mut path, doc, &mut visit)
    }

    /// Decodes a document from `reader`, then walks it as [`parse`] does.
    /// Decode failures are fatal to the walk.
    ///
    /// [`parse`]: RuleIndex::parse
    pub fn parse_reader<R, F>(&self, url: &str, reader: R, visit: F) -> Result<(), WalkError>
    where
        R: Read,
        F: FnMut(&Pointer, &Context<'_>) -> Result<(), VisitorError>,
    {
        let doc: Value = serde_json::from_reader(reader)?;
        self.parse(url, &doc, visit)
    }

    /// The literal (variable-free) URL patterns, sorted.
    pub fn roots(&self) -> Vec<&str> {
        self.roots
            .keys()
            .map(String::as_str)
            .sorted_unstable()
            .collect()
    }

    /// Every template whose variable-name set equals `names`, regardless of
    /// declared order on either side; sorted by pattern. An empty `names`
    /// returns the root patterns as templates, for consistency.
    pub fn with_variables<S: AsRef<str>>(&self, names: &[S]) -> Vec<UriTemplate> {
        if names.is_empty() {
            return self
                .roots()
                .into_iter()
                .filter_map(|pattern| UriTemplate::parse(pattern).ok())
                .collect();
        }
        let key = names
            .iter()
            .map(|name| name.as_ref())
            .sorted_unstable()
            .join(",");
        let Some(group) = self.template_groups.get(&key) else {
            return Vec::new();
        };
        group
            .values()
            .map(|rule| rule.template.clone())
            .sorted_by(|a, b| a.as_str().cmp(b.as_str()))
            .collect()
    }

    /// The compiled schema for a pattern, literal or templated.
    pub fn schema(&self, pattern: &str) -> Option<&Schema> {
        self.roots.get(pattern).or_else(|| {
            self.template_groups
                .values()
                .find_map(|group| group.get(pattern).map(|rule| &rule.schema))
        })
    }

    /// The declarative definition this index was compiled from.
    pub fn definition(&self) -> &Value {
        &self.definition
    }
}

fn group_key(names: &[&str]) -> String {
    names.iter().sorted_unstable().join(",")
}

/// Re-emits the retained definition, so an index round-trips through its
/// serialized rule set.
impl Serialize for RuleIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.definition.serialize(serializer)
    }
}

/// Deserializes a rule-set definition and compiles it in place, reporting
/// compile failures as deserialization errors.
impl<'de> Deserialize<'de> for RuleIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let definition = Value::deserialize(deserializer)?;
        RuleIndex::compile(&definition).map_err(serde::de::Error::custom)
    }
}
