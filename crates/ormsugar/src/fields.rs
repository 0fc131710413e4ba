//! Typed field accessors.
//!
//! `#[derive(Fields)]` (from `ormsugar-derive`, re-exported with the `derive`
//! feature) generates an accessor type whose methods mirror the struct's
//! fields, so a chain is checked by the compiler instead of spelled as text:
//!
//! ```ignore
//! use ormsugar::Fields;
//!
//! #[derive(Fields)]
//! struct Profile {
//!     age: i32,
//! }
//!
//! #[derive(Fields)]
//! struct User {
//!     username: String,
//!     #[sugar(related)]
//!     profile: Option<Profile>,
//! }
//!
//! let q = User::fields().profile().age().gte(18);
//! assert_eq!(q.to_string(), "(AND: ('profile__age__gte', 18))");
//! ```

use crate::factory::QFactory;
use crate::path::Path;

/// A type with a generated field accessor.
pub trait Fields {
    /// Accessor wrapping the path that addresses a value of this type.
    type Accessor: From<Path>;

    /// Accessor rooted at the global default factory.
    fn fields() -> Self::Accessor {
        Self::Accessor::from(Path::root())
    }

    /// Accessor rooted at `factory`.
    fn fields_in(factory: &QFactory) -> Self::Accessor {
        Self::Accessor::from(factory.root())
    }

    /// Accessor continuing from an existing path.
    fn fields_at(path: &Path) -> Self::Accessor {
        Self::Accessor::from(path.clone())
    }
}
