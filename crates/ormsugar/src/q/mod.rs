//! Predicate tree.
//!
//! [`Q`] is the filter expression handed back by every terminal operation on a
//! [`Path`](crate::Path). A `Q` is an AND/OR node over `(keyword, value)`
//! leaves and nested nodes, with an optional negation flag:
//!
//! ```ignore
//! use ormsugar::{Path, Q};
//!
//! let user = Path::root().child("user");
//! let q = user.child("age").gte(18) & !user.child("name").eq("bob");
//! assert_eq!(
//!     q.to_string(),
//!     "(AND: ('user__age__gte', 18), (NOT (AND: ('user__name__exact', 'bob'))))"
//! );
//! ```
//!
//! Combining follows the usual filter-tree rules: an empty operand is dropped,
//! and an operand that is not negated is flattened into the new node when it
//! uses the same connector or holds a single child.

use crate::error::SugarResult;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// How the children of a [`Q`] node are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Connector {
    /// All children must hold.
    #[default]
    And,
    /// At least one child must hold.
    Or,
}

impl Connector {
    /// Keyword used in display output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A child of a [`Q`] node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Child {
    /// `(keyword, value)` pair, e.g. `("user__age__gt", 7)`.
    Leaf(String, Value),
    /// Nested predicate.
    Node(Q),
}

impl fmt::Display for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Leaf(key, value) => {
                write!(f, "({}, {value})", Value::Str(key.clone()))
            }
            Child::Node(q) => write!(f, "{q}"),
        }
    }
}

/// Filter expression: a connector over leaves and nested nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Q {
    #[serde(default)]
    connector: Connector,
    #[serde(default)]
    negated: bool,
    #[serde(default)]
    children: Vec<Child>,
}

impl Q {
    /// Build an AND node from a keyword mapping.
    ///
    /// Leaves are ordered by keyword; for duplicate keywords the last value wins.
    pub fn new<K, V, I>(kwargs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let sorted: BTreeMap<String, Value> = kwargs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            connector: Connector::And,
            negated: false,
            children: sorted
                .into_iter()
                .map(|(k, v)| Child::Leaf(k, v))
                .collect(),
        }
    }

    /// Build a single-leaf node.
    pub fn leaf(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            connector: Connector::And,
            negated: false,
            children: vec![Child::Leaf(key.into(), value.into())],
        }
    }

    /// An empty predicate (matches everything).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a node from explicit children.
    pub fn from_children(connector: Connector, children: Vec<Child>) -> Self {
        Self {
            connector,
            negated: false,
            children,
        }
    }

    /// Connector joining the children.
    pub fn connector(&self) -> Connector {
        self.connector
    }

    /// Whether this node is negated.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Direct children.
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether this node has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Logical negation. Negating twice restores the original.
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Logical AND.
    pub fn and(self, other: Q) -> Self {
        self.combine(other, Connector::And)
    }

    /// Logical OR.
    pub fn or(self, other: Q) -> Self {
        self.combine(other, Connector::Or)
    }

    /// Iterate every `(keyword, value)` leaf, depth-first.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![self.children.iter()],
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> SugarResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON produced by [`Q::to_json`].
    pub fn from_json(json: &str) -> SugarResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn combine(self, other: Q, connector: Connector) -> Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        let mut q = Q {
            connector,
            negated: false,
            children: Vec::with_capacity(2),
        };
        q.absorb(self);
        q.absorb(other);
        q
    }

    fn absorb(&mut self, other: Q) {
        if !other.negated && (other.connector == self.connector || other.children.len() == 1) {
            self.children.extend(other.children);
        } else {
            self.children.push(Child::Node(other));
        }
    }
}

impl fmt::Display for Q {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("(NOT ")?;
        }
        write!(f, "({}: ", self.connector)?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{child}")?;
        }
        f.write_str(")")?;
        if self.negated {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl Not for Q {
    type Output = Q;

    fn not(self) -> Q {
        self.negate()
    }
}

impl BitAnd for Q {
    type Output = Q;

    fn bitand(self, rhs: Q) -> Q {
        self.and(rhs)
    }
}

impl BitOr for Q {
    type Output = Q;

    fn bitor(self, rhs: Q) -> Q {
        self.or(rhs)
    }
}

/// Depth-first iterator over the leaves of a [`Q`].
#[derive(Debug)]
pub struct Leaves<'a> {
    stack: Vec<std::slice::Iter<'a, Child>>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(Child::Leaf(key, value)) => return Some((key.as_str(), value)),
                Some(Child::Node(q)) => self.stack.push(q.children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
