//! The [`Pointer`] type: a parsed RFC 6901 JSON pointer that doubles as the
//! growable structural path maintained during a document walk.

use crate::error::PointerError;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A JSON pointer, stored as a sequence of raw (unescaped) reference tokens.
///
/// Tokens stay plain strings rather than a key/index enum: RFC 6901 only
/// decides whether a token is an array index when it meets an array during
/// resolution, so `"/0"` addresses both the first element of an array and
/// the `"0"` member of an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pointer {
    tokens: Vec<String>,
}

impl Pointer {
    /// The root pointer `""`, addressing the whole document.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses the escaped text form. The empty string is the root pointer;
    /// anything else must start with `/`.
    pub fn parse(source: &str) -> Result<Self, PointerError> {
        if source.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = source.strip_prefix('/') else {
            return Err(PointerError::MissingSlash(source.to_string()));
        };
        let tokens = rest
            .split('/')
            .map(unescape)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tokens })
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of reference tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Appends a property-name segment.
    pub fn push_property(&mut self, name: impl Into<String>) {
        self.tokens.push(name.into());
    }

    /// Appends an array-index segment.
    pub fn push_index(&mut self, index: usize) {
        self.tokens.push(index.to_string());
    }

    /// Removes and returns the last segment.
    pub fn pop(&mut self) -> Option<String> {
        self.tokens.pop()
    }

    /// Shortens the pointer to `len` segments. Callers that append segments
    /// before recursing restore the previous length with this, so the path
    /// stays consistent on every exit, including error exits.
    pub fn truncate(&mut self, len: usize) {
        self.tokens.truncate(len);
    }

    /// Appends all segments of `other`.
    pub fn extend(&mut self, other: &Pointer) {
        self.tokens.extend(other.tokens.iter().cloned());
    }

    /// Resolves the pointer against a document, relative to `doc`.
    ///
    /// A miss (absent member, out-of-range or malformed index, scalar in the
    /// middle of the path) is an expected outcome, not an error.
    pub fn resolve<'v>(&self, doc: &'v Value) -> Option<&'v Value> {
        let mut current = doc;
        for token in &self.tokens {
            current = match current {
                Value::Object(members) => members.get(token)?,
                Value::Array(items) => items.get(array_index(token)?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

/// Interprets a reference token as an array index per RFC 6901: decimal
/// digits without a leading zero. The `-` end-of-array token never resolves.
fn array_index(token: &str) -> Option<usize> {
    if token.is_empty() || (token.len() > 1 && token.starts_with('0')) {
        return None;
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Escapes a reference token for the text form: `~` as `~0`, `/` as `~1`.
pub fn escape(token: &str) -> Cow<'_, str> {
    if !token.contains(['~', '/']) {
        return Cow::Borrowed(token);
    }
    Cow::Owned(token.replace('~', "~0").replace('/', "~1"))
}

fn unescape(token: &str) -> Result<String, PointerError> {
    if !token.contains('~') {
        return Ok(token.to_string());
    }
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return Err(PointerError::InvalidEscape(token.to_string())),
        }
    }
    Ok(out)
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", escape(token))?;
        }
        Ok(())
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source)
    }
}
