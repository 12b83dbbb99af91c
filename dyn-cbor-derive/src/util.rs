use proc_macro2::TokenStream;
use syn::{parse_quote, GenericArgument, Generics, Ident, PathArguments, Type, WhereClause};

pub(crate) fn add_where_bound(wc: &mut WhereClause, ty: &Type, bound: &TokenStream) {
    wc.predicates.push(parse_quote!(#ty: #bound));
}

pub(crate) fn where_clause_of(generics: &Generics) -> WhereClause {
    generics
        .where_clause
        .clone()
        .unwrap_or_else(|| WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        })
}

/// Recursive field types (`Box<Self>`, `Vec<Self>`) must not become where-bounds, or trait
/// resolution cycles.
pub(crate) fn type_mentions_ident(ty: &Type, ident: &Ident) -> bool {
    match ty {
        Type::Path(tp) => tp.path.segments.iter().any(|seg| {
            if seg.ident == *ident {
                return true;
            }
            match &seg.arguments {
                PathArguments::AngleBracketed(args) => args.args.iter().any(|arg| match arg {
                    GenericArgument::Type(inner) => type_mentions_ident(inner, ident),
                    _ => false,
                }),
                _ => false,
            }
        }),
        Type::Reference(tr) => type_mentions_ident(&tr.elem, ident),
        Type::Tuple(tt) => tt.elems.iter().any(|elem| type_mentions_ident(elem, ident)),
        Type::Array(ta) => type_mentions_ident(&ta.elem, ident),
        Type::Slice(ts) => type_mentions_ident(&ts.elem, ident),
        Type::Group(tg) => type_mentions_ident(&tg.elem, ident),
        Type::Paren(tp) => type_mentions_ident(&tp.elem, ident),
        _ => false,
    }
}
