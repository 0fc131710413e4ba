//! Derive macros for ormsugar
//!
//! Provides `#[derive(Fields)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod common;
mod fields;

/// Derive a typed field accessor for a struct.
///
/// # Example
///
/// ```ignore
/// use ormsugar::Fields;
///
/// #[derive(Fields)]
/// struct Tag {
///     name: String,
/// }
///
/// #[derive(Fields)]
/// struct User {
///     username: String,
///     #[sugar(rename = "mail")]
///     email: String,
///     #[sugar(related)]
///     tags: Vec<Tag>,
///     #[sugar(skip)]
///     cache: Option<String>,
/// }
///
/// let q = User::fields().tags().name().icontains("rust");
/// // (AND: ('tags__name__icontains', 'rust'))
/// ```
///
/// # Generated
///
/// - `struct UserFields` wrapping an `ormsugar::Path`, with one method per
///   field. Plain fields return `Path`; related fields return the related
///   type's accessor.
/// - `impl ormsugar::Fields for User`
/// - `From<Path>`, `AsRef<Path>`, `Deref<Target = Path>` for the accessor
///
/// # Attributes
///
/// - `#[sugar(rename_all = "...")]` - `snake_case`, `camelCase`, `PascalCase`,
///   `SCREAMING_SNAKE_CASE`, `lowercase`, `UPPERCASE`
/// - `#[sugar(accessor = "Name")]` - Name of the generated accessor type
/// - `#[sugar(rename = "name")]` - Segment name for one field
/// - `#[sugar(related)]` - Field type (or the `T` of `Option<T>`, `Vec<T>`,
///   `Box<T>`) implements `Fields`; chain into its accessor
/// - `#[sugar(skip)]` - No accessor method for this field
#[proc_macro_derive(Fields, attributes(sugar))]
pub fn derive_fields(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    fields::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
