//! Opaque key newtypes for query-graph entities.
//!
//! Node and edge ids are client-chosen strings (`"n0"`, `"e1"`, ...). They are
//! wrapped in distinct newtypes so that a `NodeKey` cannot be used where an
//! `EdgeKey` is expected.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of a node, unique within its query graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(pub String);

/// Key of an edge, unique within its query graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeKey(pub String);

impl NodeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl EdgeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Display implementations -- just print the inner value.

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        NodeKey(key.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(key: String) -> Self {
        NodeKey(key)
    }
}

impl From<&str> for EdgeKey {
    fn from(key: &str) -> Self {
        EdgeKey(key.to_string())
    }
}

impl From<String> for EdgeKey {
    fn from(key: String) -> Self {
        EdgeKey(key)
    }
}

// Lets `IndexMap<NodeKey, _>` be queried with a plain `&str`.

impl Borrow<str> for NodeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EdgeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
