//! Lookup registry.
//!
//! A [`LookupRegistry`] maps trailing segment names to handlers that build a
//! predicate from the preceding path and the call arguments. When a chain such
//! as `user.tags.overlaps` is invoked through [`Path::call`](crate::Path::call)
//! and `overlaps` is registered, the handler receives the path `user__tags`
//! and the call's [`Args`].
//!
//! Registries are explicit values: build one at startup, hand it to a
//! [`QFactory`](crate::QFactory), and treat it as read-only afterwards.
//!
//! # Example
//! ```ignore
//! use ormsugar::{Args, LookupRegistry, Q, QFactory, SugarResult};
//!
//! let mut registry = LookupRegistry::with_builtins();
//! registry.register("overlaps", |path: &str, args: &Args| -> SugarResult<Q> {
//!     Ok(Q::leaf(format!("{path}__overlap"), args.get(0).cloned()))
//! });
//! let sugar = QFactory::new(registry);
//! let q = sugar.root().child("tags").child("overlaps").call(Args::new().arg("x"))?;
//! ```

use crate::args::Args;
use crate::error::{SugarError, SugarResult};
use crate::lookup::{Lookup, range_q};
use crate::q::Q;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Names registered by [`LookupRegistry::with_builtins`].
pub const BUILTIN_LOOKUPS: [&str; 4] = ["in_list", "is_null", "is_not_null", "in_range"];

/// Builds a predicate for a registered lookup name.
pub trait LookupHandler: Send + Sync {
    /// Build the predicate for `path` (the chain without the lookup segment).
    fn build(&self, path: &str, args: &Args) -> SugarResult<Q>;
}

impl<F> LookupHandler for F
where
    F: Fn(&str, &Args) -> SugarResult<Q> + Send + Sync,
{
    fn build(&self, path: &str, args: &Args) -> SugarResult<Q> {
        self(path, args)
    }
}

/// Table of named lookup handlers.
#[derive(Clone, Default)]
pub struct LookupRegistry {
    handlers: HashMap<String, Arc<dyn LookupHandler>>,
}

impl LookupRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in handlers
    /// (`in_list`, `is_null`, `is_not_null`, `in_range`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// Register the built-in handlers, replacing any of the same name.
    pub fn register_builtins(&mut self) -> &mut Self {
        self.register("in_list", builtin_in_list);
        self.register("is_null", builtin_is_null);
        self.register("is_not_null", builtin_is_not_null);
        self.register("in_range", builtin_in_range);
        self
    }

    /// Register a closure handler. An existing handler of the same name is replaced.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&str, &Args) -> SugarResult<Q> + Send + Sync + 'static,
    {
        self.register_handler(name, handler)
    }

    /// Register any [`LookupHandler`]. An existing handler of the same name is replaced.
    pub fn register_handler<H>(&mut self, name: impl Into<String>, handler: H) -> &mut Self
    where
        H: LookupHandler + 'static,
    {
        let name = name.into();
        let _replaced = self.handlers.insert(name.clone(), Arc::new(handler));

        #[cfg(feature = "tracing")]
        {
            if _replaced.is_some() {
                tracing::debug!(target: "ormsugar.lookup", lookup = %name, "replaced lookup handler");
            } else {
                tracing::trace!(target: "ormsugar.lookup", lookup = %name, "registered lookup handler");
            }
        }

        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&str, &Args) -> SugarResult<Q> + Send + Sync + 'static,
    {
        self.register(name, handler);
        self
    }

    /// Copy every handler of `other` into this registry, replacing same-named ones.
    pub fn extend(&mut self, other: LookupRegistry) -> &mut Self {
        self.handlers.extend(other.handlers);
        self
    }

    /// Look up a handler by name.
    pub fn get(&self, name: &str) -> Option<&dyn LookupHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    /// Check whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler registered as `name`, if there is one.
    pub(crate) fn dispatch(&self, name: &str, path: &str, args: &Args) -> Option<SugarResult<Q>> {
        let handler = self.handlers.get(name)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "ormsugar.lookup", lookup = %name, path = %path, "dispatching lookup handler");

        Some(handler.build(path, args))
    }
}

impl fmt::Debug for LookupRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupRegistry")
            .field("names", &self.names())
            .finish()
    }
}

fn builtin_in_list(path: &str, args: &Args) -> SugarResult<Q> {
    let items = match args.positional_args() {
        [] => args
            .get_named("items")
            .cloned()
            .ok_or_else(|| SugarError::invalid_arguments("in_list", "expected a list of items"))?,
        [Value::List(items)] => Value::List(items.clone()),
        many => Value::List(many.to_vec()),
    };
    Ok(Lookup::In.build(path, items))
}

fn builtin_is_null(path: &str, args: &Args) -> SugarResult<Q> {
    let value = match args.get_either(0, "value") {
        None => true,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            return Err(SugarError::invalid_arguments(
                "is_null",
                format!("expected a boolean, got {other}"),
            ));
        }
    };
    Ok(Lookup::IsNull.build(path, value))
}

fn builtin_is_not_null(path: &str, args: &Args) -> SugarResult<Q> {
    if !args.is_empty() {
        return Err(SugarError::invalid_arguments(
            "is_not_null",
            "takes no arguments",
        ));
    }
    Ok(Lookup::IsNull.build(path, false))
}

fn builtin_in_range(path: &str, args: &Args) -> SugarResult<Q> {
    let min = args.get_either(0, "min");
    let max = args.get_either(1, "max");
    match (min, max) {
        (Some(min), Some(max)) => Ok(range_q(path, min.clone(), max.clone())),
        _ => Err(SugarError::invalid_arguments(
            "in_range",
            "expected two bounds (min, max)",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_registered() {
        let registry = LookupRegistry::with_builtins();
        assert_eq!(registry.len(), BUILTIN_LOOKUPS.len());
        for name in BUILTIN_LOOKUPS {
            assert!(registry.contains(name), "missing builtin {name}");
        }
        assert!(LookupRegistry::new().is_empty());
    }

    #[test]
    fn test_register_overwrites() {
        let mut registry = LookupRegistry::new();
        registry.register("x", |p: &str, _: &Args| Ok(Q::leaf(p, 1)));
        registry.register("x", |p: &str, _: &Args| Ok(Q::leaf(p, 2)));
        assert_eq!(registry.len(), 1);
        let q = registry.dispatch("x", "a", &Args::new()).unwrap().unwrap();
        assert_eq!(q, Q::leaf("a", 2));
    }

    #[test]
    fn test_extend_prefers_other() {
        let mut registry = LookupRegistry::with_builtins();
        registry.extend(
            LookupRegistry::new().with("is_null", |p: &str, _: &Args| Ok(Q::leaf(p, "custom"))),
        );
        assert_eq!(registry.len(), BUILTIN_LOOKUPS.len());
        let q = registry.dispatch("is_null", "a", &Args::new()).unwrap().unwrap();
        assert_eq!(q, Q::leaf("a", "custom"));
    }

    #[test]
    fn test_dispatch_unknown() {
        let registry = LookupRegistry::with_builtins();
        assert!(registry.dispatch("nope", "a", &Args::new()).is_none());
    }

    #[test]
    fn test_names_sorted() {
        let registry = LookupRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            vec!["in_list", "in_range", "is_not_null", "is_null"]
        );
    }

    #[test]
    fn test_builtin_in_list_forms() {
        let expected = Q::leaf("id__in", vec![1, 2, 3]);
        let one_list = Args::new().arg(vec![1, 2, 3]);
        let spread = Args::positional([1, 2, 3]);
        let named = Args::new().kwarg("items", vec![1, 2, 3]);
        for args in [one_list, spread, named] {
            assert_eq!(builtin_in_list("id", &args).unwrap(), expected);
        }
        assert!(builtin_in_list("id", &Args::new()).unwrap_err().is_invalid_arguments());
    }

    #[test]
    fn test_builtin_is_null() {
        assert_eq!(
            builtin_is_null("f", &Args::new()).unwrap(),
            Q::leaf("f__isnull", true)
        );
        assert_eq!(
            builtin_is_null("f", &Args::new().kwarg("value", false)).unwrap(),
            Q::leaf("f__isnull", false)
        );
        assert!(builtin_is_null("f", &Args::new().arg(1)).is_err());
        assert!(builtin_is_not_null("f", &Args::new().arg(1)).is_err());
    }

    #[test]
    fn test_builtin_in_range() {
        let q = builtin_in_range("age", &Args::positional([1, 9])).unwrap();
        assert_eq!(q.to_string(), "(AND: ('age__lte', 1), ('age__gte', 9))");
        let err = builtin_in_range("age", &Args::new().arg(1)).unwrap_err();
        assert!(err.is_invalid_arguments());
    }
}
