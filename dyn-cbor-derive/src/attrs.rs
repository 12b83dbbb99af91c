use proc_macro2::Span;
use syn::{Attribute, Field, Ident, LitStr, Variant};

#[derive(Default, Clone)]
pub(crate) struct CborFieldAttr {
    pub(crate) rename: Option<LitStr>,
    pub(crate) skip: bool,
    pub(crate) default: bool,
}

#[derive(Default, Clone)]
pub(crate) struct CborVariantAttr {
    pub(crate) rename: Option<LitStr>,
}

pub(crate) fn parse_cbor_field_attrs(attrs: &[Attribute]) -> syn::Result<CborFieldAttr> {
    let mut out = CborFieldAttr::default();
    for attr in attrs {
        if !attr.path().is_ident("cbor") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                if out.skip {
                    return Err(meta.error("duplicate `cbor(skip)`"));
                }
                out.skip = true;
                return Ok(());
            }
            if meta.path.is_ident("default") {
                if out.default {
                    return Err(meta.error("duplicate `cbor(default)`"));
                }
                out.default = true;
                return Ok(());
            }
            if meta.path.is_ident("rename") {
                if out.rename.is_some() {
                    return Err(meta.error("duplicate `cbor(rename = ...)`"));
                }
                let lit: LitStr = meta.value()?.parse()?;
                out.rename = Some(lit);
                return Ok(());
            }
            Err(meta
                .error("unsupported `cbor(...)` field attribute (allowed: rename, skip, default)"))
        })?;
    }

    if out.skip && (out.rename.is_some() || out.default) {
        return Err(syn::Error::new(
            Span::call_site(),
            "`cbor(skip)` cannot be combined with `rename` or `default`",
        ));
    }

    Ok(out)
}

pub(crate) fn parse_cbor_variant_attrs(attrs: &[Attribute]) -> syn::Result<CborVariantAttr> {
    let mut out = CborVariantAttr::default();
    for attr in attrs {
        if !attr.path().is_ident("cbor") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if out.rename.is_some() {
                    return Err(meta.error("duplicate `cbor(rename = ...)` on variant"));
                }
                let lit: LitStr = meta.value()?.parse()?;
                out.rename = Some(lit);
                return Ok(());
            }
            Err(meta.error("unsupported `cbor(...)` variant attribute (allowed: rename)"))
        })?;
    }
    Ok(out)
}

/// Tuple fields are positional, so only named fields accept `cbor(...)`.
pub(crate) fn ensure_positional(field: &Field) -> syn::Result<()> {
    let attr = parse_cbor_field_attrs(&field.attrs)?;
    if attr.skip || attr.default || attr.rename.is_some() {
        return Err(syn::Error::new_spanned(
            field,
            "`cbor(...)` field attributes are not supported on tuple fields",
        ));
    }
    Ok(())
}

/// A named field after attribute parsing.
pub(crate) struct NamedField<'a> {
    pub(crate) ident: &'a Ident,
    pub(crate) field: &'a Field,
    pub(crate) key: String,
    pub(crate) attr: CborFieldAttr,
}

pub(crate) fn named_fields<'a>(
    fields: impl IntoIterator<Item = &'a Field>,
) -> syn::Result<Vec<NamedField<'a>>> {
    let mut out = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let attr = parse_cbor_field_attrs(&field.attrs)?;
        let key = attr
            .rename
            .as_ref()
            .map_or_else(|| ident.to_string(), LitStr::value);
        out.push(NamedField {
            ident,
            field,
            key,
            attr,
        });
    }
    Ok(out)
}

pub(crate) fn variant_name(variant: &Variant) -> syn::Result<String> {
    let attr = parse_cbor_variant_attrs(&variant.attrs)?;
    Ok(attr
        .rename
        .as_ref()
        .map_or_else(|| variant.ident.to_string(), LitStr::value))
}
