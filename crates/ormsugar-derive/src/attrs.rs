//! Attribute parsing for the Fields derive macro.
//!
//! Handles struct-level and field-level `#[sugar(...)]` attributes.

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro2::Span;
use syn::{Error, LitStr, Result};

const SEPARATOR: &str = "__";

/// Casing applied to every field name by `#[sugar(rename_all = "...")]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenameAll {
    Lower,
    Upper,
    Snake,
    Camel,
    Pascal,
    ScreamingSnake,
}

impl RenameAll {
    fn parse(lit: &LitStr) -> Result<Self> {
        match lit.value().as_str() {
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            "snake_case" => Ok(Self::Snake),
            "camelCase" => Ok(Self::Camel),
            "PascalCase" => Ok(Self::Pascal),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            other => Err(Error::new(
                lit.span(),
                format!("unsupported rename_all casing '{other}'"),
            )),
        }
    }

    pub(crate) fn apply(self, name: &str) -> String {
        match self {
            Self::Lower => name.to_lowercase(),
            Self::Upper => name.to_uppercase(),
            Self::Snake => name.to_snake_case(),
            Self::Camel => name.to_lower_camel_case(),
            Self::Pascal => name.to_upper_camel_case(),
            Self::ScreamingSnake => name.to_shouty_snake_case(),
        }
    }
}

/// Struct-level attributes.
#[derive(Default)]
pub(crate) struct ContainerAttr {
    pub rename_all: Option<RenameAll>,
    pub accessor: Option<syn::Ident>,
}

impl syn::parse::Parse for ContainerAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut out = ContainerAttr::default();

        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;
            let _: syn::Token![=] = input.parse()?;
            let value: LitStr = input.parse()?;

            if ident == "rename_all" {
                out.rename_all = Some(RenameAll::parse(&value)?);
            } else if ident == "accessor" {
                out.accessor = Some(value.parse()?);
            } else {
                return Err(Error::new(
                    ident.span(),
                    format!("unknown sugar attribute '{ident}'"),
                ));
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(out)
    }
}

/// Field-level attributes.
#[derive(Default)]
pub(crate) struct FieldAttr {
    pub rename: Option<String>,
    pub related: bool,
    pub skip: bool,
}

impl syn::parse::Parse for FieldAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut out = FieldAttr::default();

        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;

            if ident == "related" {
                out.related = true;
            } else if ident == "skip" {
                out.skip = true;
            } else if ident == "rename" {
                let _: syn::Token![=] = input.parse()?;
                let value: LitStr = input.parse()?;
                out.rename = Some(parse_segment(&value.value(), value.span())?);
            } else {
                return Err(Error::new(
                    ident.span(),
                    format!("unknown sugar attribute '{ident}'"),
                ));
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(out)
    }
}

/// Merge every `#[sugar(...)]` attribute in `attrs`.
pub(crate) fn container_attr(attrs: &[syn::Attribute]) -> Result<ContainerAttr> {
    let mut out = ContainerAttr::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("sugar")) {
        let parsed: ContainerAttr = attr.parse_args()?;
        if parsed.rename_all.is_some() {
            out.rename_all = parsed.rename_all;
        }
        if parsed.accessor.is_some() {
            out.accessor = parsed.accessor;
        }
    }
    Ok(out)
}

/// Merge every `#[sugar(...)]` attribute on a field.
pub(crate) fn field_attr(field: &syn::Field) -> Result<FieldAttr> {
    let mut out = FieldAttr::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("sugar")) {
        let parsed: FieldAttr = attr.parse_args()?;
        out.related |= parsed.related;
        out.skip |= parsed.skip;
        if parsed.rename.is_some() {
            out.rename = parsed.rename;
        }
    }
    Ok(out)
}

/// A segment name must be non-empty and must not contain the separator.
pub(crate) fn parse_segment(s: &str, span: Span) -> Result<String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::new(span, "segment name must not be empty"));
    }
    if s.contains(SEPARATOR) {
        return Err(Error::new(
            span,
            format!("segment name '{s}' must not contain '{SEPARATOR}'"),
        ));
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_rename_all_casings() {
        assert_eq!(RenameAll::Camel.apply("birthday_date"), "birthdayDate");
        assert_eq!(RenameAll::Pascal.apply("birthday_date"), "BirthdayDate");
        assert_eq!(RenameAll::ScreamingSnake.apply("birthday_date"), "BIRTHDAY_DATE");
        assert_eq!(RenameAll::Upper.apply("name"), "NAME");
    }

    #[test]
    fn test_field_attr_flags() {
        let field: syn::Field = parse_quote! {
            #[sugar(related, rename = "owner")]
            user: Option<User>
        };
        let attr = field_attr(&field).unwrap();
        assert!(attr.related);
        assert!(!attr.skip);
        assert_eq!(attr.rename.as_deref(), Some("owner"));
    }

    #[test]
    fn test_field_attr_rejects_unknown() {
        let field: syn::Field = parse_quote! {
            #[sugar(column = "x")]
            user: String
        };
        assert!(field_attr(&field).is_err());
    }

    #[test]
    fn test_field_attr_rejects_separator() {
        let field: syn::Field = parse_quote! {
            #[sugar(rename = "a__b")]
            user: String
        };
        assert!(field_attr(&field).is_err());
    }

    #[test]
    fn test_container_attr() {
        let input: syn::DeriveInput = parse_quote! {
            #[sugar(rename_all = "camelCase", accessor = "UserQ")]
            struct User { name: String }
        };
        let attr = container_attr(&input.attrs).unwrap();
        assert_eq!(attr.rename_all, Some(RenameAll::Camel));
        assert_eq!(attr.accessor.unwrap().to_string(), "UserQ");
    }

    #[test]
    fn test_container_attr_rejects_bad_casing() {
        let input: syn::DeriveInput = parse_quote! {
            #[sugar(rename_all = "kebab-case")]
            struct User { name: String }
        };
        assert!(container_attr(&input.attrs).is_err());
    }
}
