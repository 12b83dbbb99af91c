use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, DataStruct, Fields, FieldsNamed, FieldsUnnamed, Generics, Ident};

use crate::attrs::{ensure_positional, named_fields};
use crate::util::{add_where_bound, type_mentions_ident, where_clause_of};

fn bound() -> TokenStream {
    quote!(::dyn_cbor::FromCborValue)
}

fn default_bound() -> TokenStream {
    quote!(::core::default::Default)
}

/// Build `target { .. }` from the map held in `value`.
///
/// Keys are matched by text; unknown keys are ignored. A missing key converts from `null`, so
/// `Option` fields may be absent, unless the field is `cbor(default)`.
fn named_body(
    name: &Ident,
    fields: &FieldsNamed,
    wc: &mut syn::WhereClause,
    value: &TokenStream,
    target: &TokenStream,
) -> syn::Result<TokenStream> {
    let mut inits = Vec::new();
    for f in named_fields(&fields.named)? {
        let ident = f.ident;
        let ty = &f.field.ty;
        if f.attr.skip {
            add_where_bound(wc, ty, &default_bound());
            inits.push(quote! { #ident: ::core::default::Default::default() });
            continue;
        }
        if !type_mentions_ident(ty, name) {
            add_where_bound(wc, ty, &bound());
        }
        let key = &f.key;
        if f.attr.default {
            add_where_bound(wc, ty, &default_bound());
            inits.push(quote! {
                #ident: ::dyn_cbor::__private::field_or_default(&mut __pairs, #key)?
            });
        } else {
            inits.push(quote! {
                #ident: ::dyn_cbor::__private::field(&mut __pairs, #key)?
            });
        }
    }
    Ok(quote! {
        #[allow(unused_mut, unused_variables)]
        let mut __pairs = ::dyn_cbor::__private::into_pairs(#value)?;
        ::core::result::Result::Ok(#target { #(#inits),* })
    })
}

/// A single field is transparent; any other count expects an array of exactly that length.
fn positional_body(
    name: &Ident,
    fields: &FieldsUnnamed,
    wc: &mut syn::WhereClause,
    value: &TokenStream,
    target: &TokenStream,
) -> syn::Result<TokenStream> {
    for field in &fields.unnamed {
        ensure_positional(field)?;
        if !type_mentions_ident(&field.ty, name) {
            add_where_bound(wc, &field.ty, &bound());
        }
    }
    let len = fields.unnamed.len();
    if len == 1 {
        return Ok(quote! {
            ::core::result::Result::Ok(#target(::dyn_cbor::FromCborValue::from_cbor_value(#value)?))
        });
    }
    let items = (0..len).map(|_| quote!(::dyn_cbor::__private::next_item(&mut __items)?));
    Ok(quote! {
        #[allow(unused_mut, unused_variables)]
        let mut __items = ::dyn_cbor::__private::into_items(#value, #len)?.into_iter();
        ::core::result::Result::Ok(#target(#(#items),*))
    })
}

pub(crate) fn decode_struct(
    name: &Ident,
    generics: &Generics,
    data: &DataStruct,
) -> syn::Result<TokenStream> {
    let (impl_generics, ty_generics, _) = generics.split_for_impl();
    let mut wc = where_clause_of(generics);
    let value = quote!(value);
    let target = quote!(Self);

    let body = match &data.fields {
        Fields::Named(fields) => named_body(name, fields, &mut wc, &value, &target)?,
        Fields::Unnamed(fields) => positional_body(name, fields, &mut wc, &value, &target)?,
        Fields::Unit => quote! {
            ::dyn_cbor::__private::expect_null(&value)?;
            ::core::result::Result::Ok(Self)
        },
    };

    Ok(quote! {
        impl #impl_generics ::dyn_cbor::FromCborValue for #name #ty_generics #wc {
            fn from_cbor_value(
                value: ::dyn_cbor::Value,
            ) -> ::core::result::Result<Self, ::dyn_cbor::CborError> {
                #body
            }
        }
    })
}

pub(crate) fn decode_enum(
    name: &Ident,
    generics: &Generics,
    data: &DataEnum,
) -> syn::Result<TokenStream> {
    let (impl_generics, ty_generics, _) = generics.split_for_impl();
    let mut wc = where_clause_of(generics);
    let payload = quote!(__payload);
    let mut arms = Vec::new();

    for variant in &data.variants {
        let vname = crate::attrs::variant_name(variant)?;
        let ident = &variant.ident;
        let target = quote!(Self::#ident);
        match &variant.fields {
            Fields::Unit => {
                arms.push(quote! {
                    (#vname, ::core::option::Option::None) => ::core::result::Result::Ok(#target)
                });
            }
            Fields::Unnamed(fields) => {
                let body = positional_body(name, fields, &mut wc, &payload, &target)?;
                arms.push(quote! {
                    (#vname, ::core::option::Option::Some(#payload)) => { #body }
                });
            }
            Fields::Named(fields) => {
                let body = named_body(name, fields, &mut wc, &payload, &target)?;
                arms.push(quote! {
                    (#vname, ::core::option::Option::Some(#payload)) => { #body }
                });
            }
        }
    }

    Ok(quote! {
        impl #impl_generics ::dyn_cbor::FromCborValue for #name #ty_generics #wc {
            fn from_cbor_value(
                value: ::dyn_cbor::Value,
            ) -> ::core::result::Result<Self, ::dyn_cbor::CborError> {
                let (__name, __variant) = ::dyn_cbor::__private::enum_parts(value)?;
                match (__name.as_str(), __variant) {
                    #(#arms,)*
                    _ => ::core::result::Result::Err(::dyn_cbor::__private::mismatch()),
                }
            }
        }
    })
}
