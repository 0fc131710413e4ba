//! Path factory and its configuration.
//!
//! A [`QFactory`] owns the [`LookupRegistry`] and [`FactoryConfig`] that every
//! [`Path`] created from it consults. Factories are cheap to clone and are
//! meant to be built once at startup:
//!
//! ```ignore
//! use ormsugar::{Args, FactoryConfig, LookupRegistry, QFactory, Q};
//!
//! let config = FactoryConfig::new().reserve_name("objects");
//! let registry = LookupRegistry::new()
//!     .with("startswith", |path: &str, args: &Args| {
//!         Ok(Q::leaf(format!("{path}__startswith"), args.get(0).cloned()))
//!     });
//! let sugar = QFactory::from_parts(config, registry);
//!
//! let q = sugar.root().child("name").child("startswith").call(Args::new().arg("al"))?;
//! ```

use crate::error::SugarResult;
use crate::path::{Path, parse};
use crate::q::Q;
use crate::registry::LookupRegistry;
use crate::value::Value;
use serde::Deserialize;
use std::sync::{Arc, LazyLock};

/// Configuration for a [`QFactory`].
///
/// Deserializable so it can live in an application's own config file:
///
/// ```toml
/// [filters]
/// builtin_lookups = true
/// reserved_names = ["objects"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Register the built-in lookup handlers (`in_list`, `is_null`,
    /// `is_not_null`, `in_range`). Default `true`.
    pub builtin_lookups: bool,
    /// Names that [`Path::try_child`] refuses. Default empty.
    pub reserved_names: Vec<String>,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            builtin_lookups: true,
            reserved_names: Vec::new(),
        }
    }
}

impl FactoryConfig {
    /// Create a configuration with defaults (built-in lookups, no reserved names).
    pub fn new() -> Self {
        Self::default()
    }

    /// Do not register the built-in lookup handlers.
    pub fn without_builtin_lookups(mut self) -> Self {
        self.builtin_lookups = false;
        self
    }

    /// Reserve a segment name so that [`Path::try_child`] rejects it.
    pub fn reserve_name(mut self, name: impl Into<String>) -> Self {
        self.reserved_names.push(name.into());
        self
    }

    /// Whether `name` is reserved.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_names.iter().any(|r| r == name)
    }
}

#[derive(Debug)]
struct FactoryInner {
    config: FactoryConfig,
    registry: LookupRegistry,
}

/// Creates root [`Path`]s bound to a registry and configuration.
#[derive(Debug, Clone)]
pub struct QFactory {
    inner: Arc<FactoryInner>,
}

static DEFAULT_FACTORY: LazyLock<QFactory> = LazyLock::new(QFactory::default);

impl QFactory {
    /// Create a factory that uses `registry` as-is, with default configuration
    /// otherwise.
    pub fn new(registry: LookupRegistry) -> Self {
        Self {
            inner: Arc::new(FactoryInner {
                config: FactoryConfig::default(),
                registry,
            }),
        }
    }

    /// Create a factory from configuration alone.
    pub fn with_config(config: FactoryConfig) -> Self {
        Self::from_parts(config, LookupRegistry::new())
    }

    /// Create a factory from configuration and custom handlers.
    ///
    /// With `builtin_lookups` enabled, the built-in handlers are registered first
    /// and handlers in `registry` replace them by name.
    pub fn from_parts(config: FactoryConfig, registry: LookupRegistry) -> Self {
        let registry = if config.builtin_lookups {
            let mut merged = LookupRegistry::with_builtins();
            merged.extend(registry);
            merged
        } else {
            registry
        };
        Self {
            inner: Arc::new(FactoryInner { config, registry }),
        }
    }

    /// The process-wide default factory used by [`Path::root`].
    ///
    /// It carries the built-in lookups only and never changes.
    pub fn global() -> &'static QFactory {
        &DEFAULT_FACTORY
    }

    /// A new root path.
    pub fn root(&self) -> Path {
        Path::new_root(self.clone())
    }

    /// Direct construction from a keyword mapping, bypassing paths.
    pub fn q<K, V, I>(&self, kwargs: I) -> Q
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Q::new(kwargs)
    }

    /// Parse dotted text such as `user.tags[0:1].name` into a path.
    pub fn parse(&self, text: &str) -> SugarResult<Path> {
        let segments = parse::parse_segments(text)?;
        Ok(segments
            .into_iter()
            .fold(self.root(), |path, segment| segment.apply(&path)))
    }

    /// Registry consulted by [`Path::call`].
    pub fn registry(&self) -> &LookupRegistry {
        &self.inner.registry
    }

    /// Configuration.
    pub fn config(&self) -> &FactoryConfig {
        &self.inner.config
    }

    #[cfg(test)]
    pub(crate) fn same_as(&self, other: &QFactory) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for QFactory {
    fn default() -> Self {
        Self::with_config(FactoryConfig::default())
    }
}
