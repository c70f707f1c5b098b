// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use quote::*;

use proc_macro::TokenStream as TokenStream1;
use proc_macro2::TokenStream as TokenStream2;
use syn::{
    parse::Parser, punctuated::Punctuated, spanned::Spanned, Error, Expr, ExprLit, Lit, Token,
};

mod attr_data;
use attr_data::*;

/// Turns every function of a foreign block into a static `lscan::Import`
/// resolved at run-time from `library`.
///
/// ```ignore
/// static ESSENTIALS: lscan::sync::LibLock = lscan::sync::LibLock::new(&["LScanEssentials-x86.dll"]);
///
/// #[lscan::import(library = ESSENTIALS)]
/// extern "system" {
///     #[link_name = "_LSCAN_Main_GetDeviceCount@4"]
///     fn LSCAN_Main_GetDeviceCount(device_count: *mut std::ffi::c_int) -> std::ffi::c_int;
/// }
/// ```
#[proc_macro_attribute]
pub fn import(args: TokenStream1, input: TokenStream1) -> TokenStream1 {
    let args = TokenStream2::from(args);
    let input = TokenStream2::from(input);
    match expand(args, input) {
        Ok(tokens) => TokenStream1::from(tokens),
        Err(err) => TokenStream1::from(err.into_compile_error()),
    }
}

fn expand(args: TokenStream2, input: TokenStream2) -> syn::Result<TokenStream2> {
    let foreign_mod = syn::parse2::<syn::ItemForeignMod>(input)?;
    let punct = Parser::parse2(
        Punctuated::<Expr, Token!(,)>::parse_separated_nonempty,
        args,
    )?;
    let attr = AttrData::try_from(punct)?;

    let fn_count = foreign_mod
        .items
        .iter()
        .filter(|item| matches!(item, syn::ForeignItem::Fn(_)))
        .count();
    if let Some((_, span)) = &attr.link_name {
        if fn_count != 1 {
            return Err(Error::new(
                *span,
                "`link_name` argument needs exactly one function; use `#[link_name = \"..\"]` per function",
            ));
        }
    }

    let abi = &foreign_mod.abi;
    let mut ret = TokenStream2::new();
    for item in foreign_mod.items {
        use syn::ForeignItem;
        match item {
            ForeignItem::Fn(fn_item) => ret.extend(parse_fn(abi, fn_item, &attr)?),
            other => ret.extend(quote!(#abi {#other})),
        }
    }
    Ok(ret)
}

fn parse_fn(
    abi: &syn::Abi,
    fn_item: syn::ForeignItemFn,
    attr: &AttrData,
) -> syn::Result<TokenStream2> {
    let syn::ForeignItemFn {
        attrs, vis, sig, ..
    } = fn_item;

    if let Some(variadic) = &sig.variadic {
        return Err(Error::new(
            variadic.span(),
            "variadic functions are unsupported",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(Error::new(
            sig.generics.span(),
            "foreign functions cannot be generic",
        ));
    }

    let mut link_name = attr.link_name.as_ref().map(|(name, _)| name.clone());
    let mut fn_attrs = Vec::new();
    for fn_attr in attrs {
        if !fn_attr.path().is_ident("link_name") {
            fn_attrs.push(fn_attr);
            continue;
        }
        let value = match &fn_attr.meta {
            syn::Meta::NameValue(meta) => match &meta.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(val), ..
                }) => val.value(),
                other => return Err(Error::new(other.span(), "Expected string.")),
            },
            other => {
                return Err(Error::new(
                    other.span(),
                    "Expected `#[link_name = \"<symbol>\"]`.",
                ))
            }
        };
        if link_name.is_some() {
            return Err(Error::new(fn_attr.span(), "link_name is already defined"));
        }
        link_name = Some(value);
    }

    let fn_name = &sig.ident;
    let link_name = link_name.unwrap_or_else(|| fn_name.to_string());
    let output = &sig.output;
    let library = &attr.library;

    let mut param_ty_list = Vec::new();
    for arg in sig.inputs.iter() {
        match arg {
            syn::FnArg::Typed(pat_type) => param_ty_list.push(pat_type.ty.as_ref()),
            syn::FnArg::Receiver(rec) => {
                return Err(Error::new(rec.span(), "`self` arguments are unsupported"));
            }
        }
    }

    // Foreign functions are unsafe to call, so the pointer type is too.
    // The byte count follows the 32-bit stdcall rule of rounding each argument up to 4.
    Ok(quote! {
        #(#fn_attrs)*
        #[allow(non_upper_case_globals)]
        #vis static #fn_name: ::lscan::Import<unsafe #abi fn (#(#param_ty_list),*) #output> = unsafe {
            ::lscan::Import::new(
                &#library,
                #link_name,
                0usize #(+ ::lscan::sym::arg_bytes::<#param_ty_list>())*,
            )
        };
    })
}
