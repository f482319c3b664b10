//! In-memory representation of Valve's KeyValues ("VDF") text format.
//!
//! A [`VdfNode`] keeps the order its keys appeared in, so anything rendered from it (such as the
//! menu) follows the order of the source file.

use std::fmt::{self, Display, Formatter};

use indexmap::{IndexMap, map::Entry};

use crate::{error::Result, parsers::parse_vdf};

/// Either a plain string or a nested block of key-value pairs
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum VdfValue {
    Str(String),
    Node(VdfNode),
}

impl VdfValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            VdfValue::Str(s) => Some(s),
            VdfValue::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&VdfNode> {
        match self {
            VdfValue::Node(n) => Some(n),
            VdfValue::Str(_) => None,
        }
    }
}

impl From<&str> for VdfValue {
    fn from(value: &str) -> Self {
        VdfValue::Str(value.to_owned())
    }
}

impl From<String> for VdfValue {
    fn from(value: String) -> Self {
        VdfValue::Str(value)
    }
}

impl From<VdfNode> for VdfValue {
    fn from(value: VdfNode) -> Self {
        VdfValue::Node(value)
    }
}

/// Ordered, case-sensitive mapping of keys to [`VdfValue`]s
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VdfNode {
    entries: IndexMap<String, VdfValue>,
}

impl VdfNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&VdfValue> {
        self.entries.get(key)
    }

    /// Value of `key`, if it exists and is a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(VdfValue::as_str)
    }

    /// Value of `key`, if it exists and is a nested block
    pub fn get_node(&self, key: &str) -> Option<&VdfNode> {
        self.get(key).and_then(VdfValue::as_node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VdfValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a pair the way Steam's own files expect duplicate keys to be read: two blocks
    /// under the same key are merged, anything else is replaced in place by the newer value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<VdfValue>) {
        match (self.entries.entry(key.into()), value.into()) {
            (Entry::Occupied(mut occupied), VdfValue::Node(incoming)) => {
                if let VdfValue::Node(existing) = occupied.get_mut() {
                    for (k, v) in incoming.entries {
                        existing.insert(k, v);
                    }
                } else {
                    occupied.insert(VdfValue::Node(incoming));
                }
            }
            (Entry::Occupied(mut occupied), value) => {
                occupied.insert(value);
            }
            (Entry::Vacant(vacant), value) => {
                vacant.insert(value);
            }
        }
    }

    fn write_indented(&self, f: &mut Formatter, depth: usize) -> fmt::Result {
        let indent = "\t".repeat(depth);

        for (key, value) in &self.entries {
            match value {
                VdfValue::Str(s) => {
                    writeln!(f, "{indent}\"{}\"\t\t\"{}\"", escape(key), escape(s))?
                }
                VdfValue::Node(node) => {
                    writeln!(f, "{indent}\"{}\"", escape(key))?;
                    writeln!(f, "{indent}{{")?;
                    node.write_indented(f, depth + 1)?;
                    writeln!(f, "{indent}}}")?;
                }
            }
        }

        Ok(())
    }
}

impl<K: Into<String>, V: Into<VdfValue>> FromIterator<(K, V)> for VdfNode {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut node = VdfNode::new();
        iter.into_iter().for_each(|(k, v)| node.insert(k, v));
        node
    }
}

/// Serializes to the same tab-indented layout Steam writes, with every token quoted
impl Display for VdfNode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Serializes the given tree and parses it back.
///
/// Trees which didn't come from [`parse_vdf`] (e.g. assembled in code from another source) go
/// through here before being used, so they end up with exactly the shape the parser produces.
#[tracing::instrument(level = "trace", skip(node))]
pub fn normalize_document(node: &VdfNode) -> Result<VdfNode> {
    parse_vdf(&node.to_string())
}
