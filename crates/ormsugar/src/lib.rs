//! # ormsugar
//!
//! Attribute-chaining sugar for ORM filter expressions.
//!
//! Instead of spelling filter keywords by hand (`"user__profile__age__gte"`),
//! build them from a chain of segments and finish with a lookup:
//!
//! ```ignore
//! use ormsugar::{Path, path};
//!
//! let q = Path::root().child("user").child("age").gt(7);
//! assert_eq!(q.to_string(), "(AND: ('user__age__gt', 7))");
//!
//! let adults = path!(user.profile.age).gte(18) & path!(user.email).is_not_null();
//! ```
//!
//! ## Pieces
//!
//! - [`Path`]: one node of a field-reference chain, with the lookup builders
//!   (`eq`, `ne`, `gt`, `in_list`, `is_null`, `in_range`, ...)
//! - [`Q`]: the resulting predicate tree with `!`, `&` and `|`
//! - [`LookupRegistry`]: named handlers that [`Path::call`] dispatches to
//! - [`QFactory`]: binds paths to a registry and a [`FactoryConfig`]
//! - [`Fields`]: typed accessors generated by `#[derive(Fields)]`
//!
//! ## Features
//!
//! - `derive` (default): re-export `#[derive(Fields)]`
//! - `tracing`: emit `debug`/`trace` events for lookup registration and dispatch

pub mod args;
pub mod error;
pub mod factory;
pub mod fields;
pub mod lookup;
mod macros;
pub mod path;
pub mod prelude;
pub mod q;
pub mod registry;
pub mod value;

pub use args::Args;
pub use error::{SugarError, SugarResult};
pub use factory::{FactoryConfig, QFactory};
pub use fields::Fields;
pub use lookup::{Lookup, SEPARATOR};
pub use path::{Path, PathIndex};
pub use q::{Child, Connector, Leaves, Q};
pub use registry::{BUILTIN_LOOKUPS, LookupHandler, LookupRegistry};
pub use value::Value;

#[cfg(feature = "derive")]
pub use ormsugar_derive::Fields;
