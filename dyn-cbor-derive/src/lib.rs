//! Derive macros for `dyn-cbor`.
//!
//! - `#[derive(CborRepresentable)]` builds a `dyn_cbor::Value` from a type.
//! - `#[derive(FromCborValue)]` rebuilds the type from a `dyn_cbor::Value`.
//!
//! Both share one layout: named structs are text-keyed maps in field order, tuple structs are
//! arrays (a single field is transparent), unit structs are `null`, enum unit variants are their
//! name as text and data variants a one-pair map `{name: payload}`.
//!
//! Attributes: `#[cbor(rename = "...")]` on fields and variants, `#[cbor(skip)]` and
//! `#[cbor(default)]` on named fields.

extern crate proc_macro;

mod attrs;
mod decode;
mod encode;
mod util;

use proc_macro::TokenStream;
use syn::{parse_macro_input, Data, DeriveInput};

#[proc_macro_derive(CborRepresentable, attributes(cbor))]
pub fn derive_cbor_representable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let out = match &input.data {
        Data::Struct(data) => encode::encode_struct(&input.ident, &input.generics, data),
        Data::Enum(data) => encode::encode_enum(&input.ident, &input.generics, data),
        Data::Union(u) => Err(syn::Error::new(
            u.union_token.span,
            "CborRepresentable not supported for unions",
        )),
    };
    TokenStream::from(out.unwrap_or_else(syn::Error::into_compile_error))
}

#[proc_macro_derive(FromCborValue, attributes(cbor))]
pub fn derive_from_cbor_value(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let out = match &input.data {
        Data::Struct(data) => decode::decode_struct(&input.ident, &input.generics, data),
        Data::Enum(data) => decode::decode_enum(&input.ident, &input.generics, data),
        Data::Union(u) => Err(syn::Error::new(
            u.union_token.span,
            "FromCborValue not supported for unions",
        )),
    };
    TokenStream::from(out.unwrap_or_else(syn::Error::into_compile_error))
}
