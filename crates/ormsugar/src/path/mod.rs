//! Field-reference paths.
//!
//! A [`Path`] is one segment of a chain such as `user.tags[0].name`. Each
//! [`child`](Path::child) or [`index`](Path::index) call allocates a new node
//! pointing at its parent; nothing is ever mutated. Terminal operations
//! materialize the chain into a keyword (`user__tags__0__name__exact`) and wrap
//! it in a [`Q`].
//!
//! ```ignore
//! use ormsugar::{Path, path};
//!
//! let age = Path::root().child("user").child("age");
//! assert_eq!(age.get_path(), "user__age");
//! assert_eq!(age.gt(7).to_string(), "(AND: ('user__age__gt', 7))");
//!
//! // Same chain through the macro.
//! let age = path!(user.age);
//! let first_tag = path!(user.tags[0].name);
//! ```

pub(crate) mod parse;

use crate::args::Args;
use crate::error::{SugarError, SugarResult};
use crate::factory::QFactory;
use crate::lookup::{Lookup, SEPARATOR, range_q};
use crate::q::Q;
use crate::value::Value;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

#[derive(Debug)]
struct Node {
    name: String,
    parent: Option<Arc<Node>>,
}

impl Node {
    /// Nodes from this one up to the root.
    fn ancestry(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(Some(self), |node| node.parent.as_deref())
    }

    /// Non-empty segment names, root to leaf.
    fn segments(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .ancestry()
            .map(|node| node.name.as_str())
            .filter(|name| !name.is_empty())
            .collect();
        names.reverse();
        names
    }

    fn joined(&self) -> String {
        self.segments().join(SEPARATOR)
    }
}

/// Something that can address a list position inside a path.
///
/// Implemented for integers (segment `"{i}"`) and half-open ranges
/// (segment `"{start}_{stop}"`).
pub trait PathIndex {
    /// Segment name for this index.
    fn segment(self) -> String;
}

macro_rules! impl_path_index {
    ($($t:ty),*) => {
        $(
            impl PathIndex for $t {
                fn segment(self) -> String {
                    self.to_string()
                }
            }

            impl PathIndex for Range<$t> {
                fn segment(self) -> String {
                    format!("{}_{}", self.start, self.end)
                }
            }
        )*
    };
}

impl_path_index!(i32, i64, u32, u64, usize);

/// A node in a field-reference chain.
///
/// Cloning is cheap: the chain is shared through `Arc`.
#[derive(Clone)]
pub struct Path {
    node: Arc<Node>,
    factory: QFactory,
}

impl Path {
    /// A root path bound to the global default factory.
    pub fn root() -> Self {
        QFactory::global().root()
    }

    pub(crate) fn new_root(factory: QFactory) -> Self {
        Self {
            node: Arc::new(Node {
                name: String::new(),
                parent: None,
            }),
            factory,
        }
    }

    /// Parse dotted text with the global default factory.
    ///
    /// See [`QFactory::parse`].
    pub fn parse(text: &str) -> SugarResult<Self> {
        QFactory::global().parse(text)
    }

    fn derive(&self, name: String) -> Self {
        Self {
            node: Arc::new(Node {
                name,
                parent: Some(Arc::clone(&self.node)),
            }),
            factory: self.factory.clone(),
        }
    }

    // ==================== Chain construction ====================

    /// Child segment. Never fails.
    ///
    /// Names are taken as given. An empty name still adds a node, but that
    /// node contributes nothing to [`get_path`](Self::get_path), and a name
    /// containing `__` reads back as several segments. Use
    /// [`try_child`](Self::try_child) for names that come from outside the
    /// program.
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.derive(name.into())
    }

    /// Child segment, rejecting names that cannot address a field:
    /// empty names, names containing the `__` separator, and names reserved in
    /// the factory's [`FactoryConfig`](crate::FactoryConfig).
    pub fn try_child(&self, name: impl Into<String>) -> SugarResult<Self> {
        let name = name.into();
        if name.is_empty()
            || name.contains(SEPARATOR)
            || self.factory.config().is_reserved(&name)
        {
            return Err(SugarError::no_such_attribute(name));
        }
        Ok(self.derive(name))
    }

    /// Positional segment: `index(2)` adds `2`, `index(0..3)` adds `0_3`.
    pub fn index<I: PathIndex>(&self, index: I) -> Self {
        self.derive(index.segment())
    }

    // ==================== Introspection ====================

    /// The chain joined with `__`, root to leaf. Empty for the root.
    pub fn get_path(&self) -> String {
        self.node.joined()
    }

    /// This node's own segment name (empty for the root).
    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// The node this one was derived from.
    pub fn parent(&self) -> Option<Path> {
        self.node.parent.as_ref().map(|parent| Path {
            node: Arc::clone(parent),
            factory: self.factory.clone(),
        })
    }

    /// Whether this is a root node.
    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    /// Number of nodes between this one and the root.
    pub fn depth(&self) -> usize {
        self.node.ancestry().count() - 1
    }

    /// Non-empty segment names, root to leaf.
    pub fn segments(&self) -> Vec<&str> {
        self.node.segments()
    }

    /// Factory this path was created from.
    pub fn factory(&self) -> &QFactory {
        &self.factory
    }

    // ==================== Lookups ====================

    /// `{"{path}__{lookup}": value}`.
    pub fn lookup(&self, lookup: Lookup, value: impl Into<Value>) -> Q {
        lookup.build(&self.get_path(), value)
    }

    /// Equality; same as [`exact`](Self::exact).
    pub fn eq(&self, value: impl Into<Value>) -> Q {
        self.exact(value)
    }

    /// Negated equality.
    pub fn ne(&self, value: impl Into<Value>) -> Q {
        !self.exact(value)
    }

    /// `path__gt`
    pub fn gt(&self, value: impl Into<Value>) -> Q {
        self.lookup(Lookup::Gt, value)
    }

    /// `path__gte`
    pub fn gte(&self, value: impl Into<Value>) -> Q {
        self.lookup(Lookup::Gte, value)
    }

    /// `path__lt`
    pub fn lt(&self, value: impl Into<Value>) -> Q {
        self.lookup(Lookup::Lt, value)
    }

    /// `path__lte`
    pub fn lte(&self, value: impl Into<Value>) -> Q {
        self.lookup(Lookup::Lte, value)
    }

    /// `path__exact`
    pub fn exact(&self, value: impl Into<Value>) -> Q {
        self.lookup(Lookup::Exact, value)
    }

    /// `path__iexact`
    pub fn iexact(&self, value: impl Into<Value>) -> Q {
        self.lookup(Lookup::IExact, value)
    }

    /// `path__contains`
    pub fn contains(&self, value: impl Into<Value>) -> Q {
        self.lookup(Lookup::Contains, value)
    }

    /// `path__icontains`
    pub fn icontains(&self, value: impl Into<Value>) -> Q {
        self.lookup(Lookup::IContains, value)
    }

    /// `path__in` with the given items.
    pub fn in_list<V: Into<Value>>(&self, items: impl IntoIterator<Item = V>) -> Q {
        self.lookup(Lookup::In, items.into_iter().collect::<Value>())
    }

    /// `path__isnull = true`
    pub fn is_null(&self) -> Q {
        self.isnull(true)
    }

    /// `path__isnull = value`
    pub fn isnull(&self, value: bool) -> Q {
        self.lookup(Lookup::IsNull, value)
    }

    /// `path__isnull = false`
    pub fn is_not_null(&self) -> Q {
        self.isnull(false)
    }

    /// `path <= min AND path >= max`.
    ///
    /// Note the bound order: `min` is compared with `lte`, `max` with `gte`.
    pub fn in_range(&self, min: impl Into<Value>, max: impl Into<Value>) -> Q {
        range_q(&self.get_path(), min, max)
    }

    // ==================== Invocation ====================

    /// Invoke this node.
    ///
    /// - Root with named arguments only: a [`Q`] straight from those arguments.
    /// - Root with positional arguments: [`SugarError::MissingField`].
    /// - Trailing segment registered in the factory's registry: the handler is
    ///   called with the parent's path and `args`.
    /// - Otherwise: `{path: value}` where `value` is the single positional
    ///   argument, or the list of all of them. Named arguments are ignored.
    pub fn call(&self, args: Args) -> SugarResult<Q> {
        let Some(parent) = &self.node.parent else {
            if args.has_positional() {
                return Err(SugarError::MissingField);
            }
            return Ok(Q::new(args.into_named()));
        };

        let parent_path = parent.joined();
        if let Some(result) = self
            .factory
            .registry()
            .dispatch(&self.node.name, &parent_path, &args)
        {
            return result;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "ormsugar.lookup",
            segment = %self.node.name,
            path = %parent_path,
            "no handler registered, building keyword predicate"
        );

        Ok(Q::leaf(self.get_path(), args.into_fallback_value()))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_path())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Path").field(&self.get_path()).finish()
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::root()
    }
}
