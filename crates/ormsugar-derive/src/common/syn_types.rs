//! Type helper utilities for syn type analysis.

/// Unwrap the single type argument of `Option<T>`, `Vec<T>` or `Box<T>`
/// (any path ending in one of those names). Other types are returned as-is.
///
/// Only one layer is removed: `Option<Vec<T>>` yields `Vec<T>`.
pub fn related_inner(ty: &syn::Type) -> &syn::Type {
    single_generic_arg(ty, &["Option", "Vec", "Box"]).unwrap_or(ty)
}

fn single_generic_arg<'a>(ty: &'a syn::Type, wrappers: &[&str]) -> Option<&'a syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let seg = type_path.path.segments.last()?;
    if !wrappers.iter().any(|w| seg.ident == *w) {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    let syn::GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;
    use syn::parse_quote;

    fn unwrapped(ty: syn::Type) -> String {
        related_inner(&ty).to_token_stream().to_string()
    }

    #[test]
    fn test_related_inner_wrappers() {
        assert_eq!(unwrapped(parse_quote!(Option<Profile>)), "Profile");
        assert_eq!(unwrapped(parse_quote!(std::vec::Vec<Tag>)), "Tag");
        assert_eq!(unwrapped(parse_quote!(Box<Node>)), "Node");
    }

    #[test]
    fn test_related_inner_one_layer() {
        assert_eq!(unwrapped(parse_quote!(Option<Vec<Tag>>)), "Vec < Tag >");
    }

    #[test]
    fn test_related_inner_passthrough() {
        assert_eq!(unwrapped(parse_quote!(Profile)), "Profile");
        assert_eq!(
            unwrapped(parse_quote!(HashMap<String, Tag>)),
            "HashMap < String , Tag >"
        );
    }
}
