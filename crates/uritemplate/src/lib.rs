//! RFC 6570 URI templates.
//!
//! Templates are parsed for their structure — literal runs and expressions
//! with operators and variable specifiers — and queried for the distinct
//! variable names they mention. Expansion is out of scope: consumers group
//! and dispatch on the variable-name set alone.

pub mod ast;
pub mod error;
mod parser;

use std::fmt;
use std::str::FromStr;

// --- Public API ---
pub use ast::{Modifier, Operator, Part, VarSpec};
pub use error::UriTemplateError;

/// A parsed URI template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    source: String,
    parts: Vec<Part>,
}

impl UriTemplate {
    /// Parses a template, validating the full expression grammar.
    pub fn parse(source: &str) -> Result<Self, UriTemplateError> {
        let parts = parser::parse_template(source)?;
        Ok(Self {
            source: source.to_string(),
            parts,
        })
    }

    /// The template exactly as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Distinct variable names in order of first appearance.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for part in &self.parts {
            let Part::Expression { variables, .. } = part else {
                continue;
            };
            for spec in variables {
                if !names.contains(&spec.name.as_str()) {
                    names.push(&spec.name);
                }
            }
        }
        names
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for UriTemplate {
    type Err = UriTemplateError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_template_has_no_variables() {
        let tmpl = UriTemplate::parse("https://example.org/api?q=1").unwrap();
        assert!(tmpl.variable_names().is_empty());
        assert_eq!(tmpl.as_str(), "https://example.org/api?q=1");
    }

    #[test]
    fn simple_expansion() {
        let tmpl = UriTemplate::parse("https://example.org/users/{id}").unwrap();
        assert_eq!(tmpl.variable_names(), ["id"]);
        assert_eq!(
            tmpl.parts()[1],
            Part::Expression {
                operator: Operator::Simple,
                variables: vec![VarSpec {
                    name: "id".to_string(),
                    modifier: Modifier::None,
                }],
            }
        );
    }

    #[test]
    fn operators_and_variable_lists() {
        let tmpl = UriTemplate::parse("{/path}{?q,lang}{&page}{#frag}").unwrap();
        assert_eq!(tmpl.variable_names(), ["path", "q", "lang", "page", "frag"]);
        let Part::Expression { operator, variables } = &tmpl.parts()[1] else {
            panic!("expected expression");
        };
        assert_eq!(*operator, Operator::Query);
        assert_eq!(variables.len(), 2);
    }

    #[test]
    fn modifiers() {
        let tmpl = UriTemplate::parse("{name:3}{+list*}").unwrap();
        let Part::Expression { variables, .. } = &tmpl.parts()[0] else {
            panic!("expected expression");
        };
        assert_eq!(variables[0].modifier, Modifier::Prefix(3));
        let Part::Expression { variables, .. } = &tmpl.parts()[1] else {
            panic!("expected expression");
        };
        assert_eq!(variables[0].modifier, Modifier::Explode);
    }

    #[test]
    fn duplicate_names_reported_once() {
        let tmpl = UriTemplate::parse("{id}/items{?id,sort}").unwrap();
        assert_eq!(tmpl.variable_names(), ["id", "sort"]);
    }

    #[test]
    fn dotted_and_pct_encoded_names() {
        let tmpl = UriTemplate::parse("{user.name}{%20weird}").unwrap();
        assert_eq!(tmpl.variable_names(), ["user.name", "%20weird"]);
    }

    #[test]
    fn rejects_malformed_templates() {
        for bad in [
            "{",
            "}",
            "{}",
            "{a}}",
            "{a,}",
            "{a:{b}",
            "{name:0}",
            "{name:12345}",
            "{a b}",
            "{.}",
        ] {
            assert!(UriTemplate::parse(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn display_round_trips_source() {
        let source = "https://api.example.org/{owner}/{repo}{?page}";
        let tmpl: UriTemplate = source.parse().unwrap();
        assert_eq!(tmpl.to_string(), source);
    }
}
