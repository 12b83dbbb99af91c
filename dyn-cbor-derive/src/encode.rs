use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DataEnum, DataStruct, Fields, FieldsNamed, FieldsUnnamed, Generics, Ident};

use crate::attrs::{ensure_positional, named_fields, variant_name};
use crate::util::{add_where_bound, type_mentions_ident, where_clause_of};

fn bound() -> TokenStream {
    quote!(::dyn_cbor::CborRepresentable)
}

fn text_key(key: &str) -> TokenStream {
    quote!(::dyn_cbor::Value::Text(::dyn_cbor::__private::String::from(#key)))
}

/// Text-keyed map over the non-skipped fields, in declaration order.
///
/// `access` turns a field ident into an expression of type `&FieldTy`.
fn named_map(
    name: &Ident,
    fields: &FieldsNamed,
    wc: &mut syn::WhereClause,
    access: impl Fn(&Ident) -> TokenStream,
) -> syn::Result<(TokenStream, Vec<Ident>)> {
    let mut entries = Vec::new();
    let mut bound_idents = Vec::new();
    for f in named_fields(&fields.named)? {
        if f.attr.skip {
            continue;
        }
        if !type_mentions_ident(&f.field.ty, name) {
            add_where_bound(wc, &f.field.ty, &bound());
        }
        let key = text_key(&f.key);
        let expr = access(f.ident);
        entries.push(quote! {
            (#key, ::dyn_cbor::CborRepresentable::to_cbor_value(#expr))
        });
        bound_idents.push(f.ident.clone());
    }
    let map = quote! {
        ::dyn_cbor::Value::Map(::dyn_cbor::__private::vec![#(#entries),*])
    };
    Ok((map, bound_idents))
}

/// A single field is transparent; any other count becomes an array.
fn positional(
    name: &Ident,
    fields: &FieldsUnnamed,
    wc: &mut syn::WhereClause,
    exprs: &[TokenStream],
) -> syn::Result<TokenStream> {
    for field in &fields.unnamed {
        ensure_positional(field)?;
        if !type_mentions_ident(&field.ty, name) {
            add_where_bound(wc, &field.ty, &bound());
        }
    }
    if let [only] = exprs {
        return Ok(quote!(::dyn_cbor::CborRepresentable::to_cbor_value(#only)));
    }
    Ok(quote! {
        ::dyn_cbor::Value::Array(::dyn_cbor::__private::vec![
            #(::dyn_cbor::CborRepresentable::to_cbor_value(#exprs)),*
        ])
    })
}

fn wrap_variant(vname: &str, payload: &TokenStream) -> TokenStream {
    let key = text_key(vname);
    quote! {
        ::dyn_cbor::Value::Map(::dyn_cbor::__private::vec![(#key, #payload)])
    }
}

pub(crate) fn encode_struct(
    name: &Ident,
    generics: &Generics,
    data: &DataStruct,
) -> syn::Result<TokenStream> {
    let (impl_generics, ty_generics, _) = generics.split_for_impl();
    let mut wc = where_clause_of(generics);

    let body = match &data.fields {
        Fields::Named(fields) => named_map(name, fields, &mut wc, |ident| quote!(&self.#ident))?.0,
        Fields::Unnamed(fields) => {
            let exprs: Vec<_> = (0..fields.unnamed.len())
                .map(|idx| {
                    let index = syn::Index::from(idx);
                    quote!(&self.#index)
                })
                .collect();
            positional(name, fields, &mut wc, &exprs)?
        }
        Fields::Unit => quote!(::dyn_cbor::Value::Null),
    };

    Ok(quote! {
        impl #impl_generics ::dyn_cbor::CborRepresentable for #name #ty_generics #wc {
            fn to_cbor_value(&self) -> ::dyn_cbor::Value {
                #body
            }
        }
    })
}

pub(crate) fn encode_enum(
    name: &Ident,
    generics: &Generics,
    data: &DataEnum,
) -> syn::Result<TokenStream> {
    let (impl_generics, ty_generics, _) = generics.split_for_impl();
    let mut wc = where_clause_of(generics);
    let mut arms = Vec::new();

    for variant in &data.variants {
        let vname = variant_name(variant)?;
        let ident = &variant.ident;
        match &variant.fields {
            Fields::Unit => {
                let text = text_key(&vname);
                arms.push(quote! { Self::#ident => #text });
            }
            Fields::Unnamed(fields) => {
                let vars: Vec<_> = (0..fields.unnamed.len())
                    .map(|idx| format_ident!("v{idx}"))
                    .collect();
                let exprs: Vec<_> = vars.iter().map(|v| quote!(#v)).collect();
                let payload = positional(name, fields, &mut wc, &exprs)?;
                let wrapped = wrap_variant(&vname, &payload);
                arms.push(quote! { Self::#ident( #(#vars),* ) => #wrapped });
            }
            Fields::Named(fields) => {
                let (payload, bound_idents) =
                    named_map(name, fields, &mut wc, |ident| quote!(#ident))?;
                let wrapped = wrap_variant(&vname, &payload);
                arms.push(quote! { Self::#ident { #(#bound_idents,)* .. } => #wrapped });
            }
        }
    }

    let body = if arms.is_empty() {
        quote!(match *self {})
    } else {
        quote!(match self { #(#arms),* })
    };

    Ok(quote! {
        impl #impl_generics ::dyn_cbor::CborRepresentable for #name #ty_generics #wc {
            fn to_cbor_value(&self) -> ::dyn_cbor::Value {
                #body
            }
        }
    })
}
