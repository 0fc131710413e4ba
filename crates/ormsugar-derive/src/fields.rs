//! Fields derive macro implementation

use crate::attrs::{container_attr, field_attr};
use crate::common::syn_types::related_inner;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let vis = &input.vis;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Fields can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Fields can only be derived for structs",
            ));
        }
    };

    let container = container_attr(&input.attrs)?;
    let accessor = container
        .accessor
        .unwrap_or_else(|| format_ident!("{}Fields", name));

    let mut methods = Vec::new();
    for field in fields {
        let attr = field_attr(field)?;
        if attr.skip {
            continue;
        }
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };

        let rust_name = field_ident.unraw().to_string();
        let segment = match (attr.rename, container.rename_all) {
            (Some(rename), _) => rename,
            (None, Some(rename_all)) => rename_all.apply(&rust_name),
            (None, None) => rust_name,
        };
        let doc = format!("Path to `{segment}`.");

        if attr.related {
            let related_ty = related_inner(&field.ty);
            methods.push(quote! {
                #[doc = #doc]
                pub fn #field_ident(&self) -> <#related_ty as ::ormsugar::Fields>::Accessor {
                    <#related_ty as ::ormsugar::Fields>::fields_at(&self.path.child(#segment))
                }
            });
        } else {
            methods.push(quote! {
                #[doc = #doc]
                pub fn #field_ident(&self) -> ::ormsugar::Path {
                    self.path.child(#segment)
                }
            });
        }
    }

    let accessor_doc = format!("Field accessor generated for [`{name}`].");
    let accessor_name = accessor.to_string();

    // Marker covering every lifetime and type parameter of the model.
    let lifetimes = input.generics.lifetimes().map(|l| &l.lifetime);
    let type_params = input.generics.type_params().map(|t| &t.ident);
    let marker = quote! {
        ::core::marker::PhantomData<fn() -> (#(&#lifetimes (),)* #(#type_params,)*)>
    };

    Ok(quote! {
        #[doc = #accessor_doc]
        #vis struct #accessor #impl_generics #where_clause {
            path: ::ormsugar::Path,
            _marker: #marker,
        }

        impl #impl_generics #accessor #ty_generics #where_clause {
            #(#methods)*
        }

        impl #impl_generics ::core::clone::Clone for #accessor #ty_generics #where_clause {
            fn clone(&self) -> Self {
                Self {
                    path: ::core::clone::Clone::clone(&self.path),
                    _marker: ::core::marker::PhantomData,
                }
            }
        }

        impl #impl_generics ::core::fmt::Debug for #accessor #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_tuple(#accessor_name)
                    .field(&self.path)
                    .finish()
            }
        }

        impl #impl_generics ::core::convert::From<::ormsugar::Path> for #accessor #ty_generics #where_clause {
            fn from(path: ::ormsugar::Path) -> Self {
                Self {
                    path,
                    _marker: ::core::marker::PhantomData,
                }
            }
        }

        impl #impl_generics ::core::convert::AsRef<::ormsugar::Path> for #accessor #ty_generics #where_clause {
            fn as_ref(&self) -> &::ormsugar::Path {
                &self.path
            }
        }

        impl #impl_generics ::core::ops::Deref for #accessor #ty_generics #where_clause {
            type Target = ::ormsugar::Path;

            fn deref(&self) -> &::ormsugar::Path {
                &self.path
            }
        }

        impl #impl_generics ::ormsugar::Fields for #name #ty_generics #where_clause {
            type Accessor = #accessor #ty_generics;
        }
    })
}
