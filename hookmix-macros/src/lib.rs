use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    Ident, ImplItem, ItemImpl, LitStr, Path, Token,
    ext::IdentExt,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Handler method name and the `Capabilities` flag it sets.
const HANDLERS: &[(&str, &str)] = &[
    ("configure", "CONFIGURE"),
    ("endpoint", "ENDPOINT"),
    ("before_request", "BEFORE_REQUEST"),
    ("before_create", "BEFORE_CREATE"),
    ("after_create", "AFTER_CREATE"),
    ("before_update", "BEFORE_UPDATE"),
    ("after_update", "AFTER_UPDATE"),
    ("before_read", "BEFORE_READ"),
    ("after_read", "AFTER_READ"),
    ("before_delete", "BEFORE_DELETE"),
];

/// Attribute for `impl Mixin<H> for T` blocks.
///
/// Generates `capabilities()` from the lifecycle handlers written in the
/// block, so the dispatcher calls exactly those. A block that defines
/// `capabilities` itself is left alone.
///
/// `#[mixin(name = "checksum")]` also generates `name()`.
///
/// The generated code names `::hookmix::Capabilities`. Mixin crates that
/// depend on `hookmix-core` alone pass the path to use instead:
/// `#[mixin(crate = hookmix_core)]`.
///
/// # Example
///
/// ```rust,ignore
/// #[hookmix::mixin(name = "checksum")]
/// impl Mixin<ArticlesApi> for Checksum {
///     async fn before_create(
///         &self,
///         api: &ArticlesApi,
///         args: &mut ModelArgs<'_, ArticlesApi>,
///     ) -> Result<(), BoxError> {
///         args.model.checksum = Some(digest(&args.model.body));
///         Ok(())
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn mixin(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as MixinArgs);
    let krate = args
        .krate
        .unwrap_or_else(|| syn::parse_quote!(::hookmix));
    let mut input = parse_macro_input!(item as ItemImpl);

    if input.trait_.is_none() {
        return syn::Error::new_spanned(
            &input.self_ty,
            "#[mixin] must be placed on an `impl Mixin<H> for T` block",
        )
        .to_compile_error()
        .into();
    }

    let defined: Vec<String> = input
        .items
        .iter()
        .filter_map(|item| match item {
            ImplItem::Fn(f) => Some(f.sig.ident.to_string()),
            _ => None,
        })
        .collect();
    let defines = |method: &str| defined.iter().any(|d| d == method);

    if let Some(name) = args.name {
        if defines("name") {
            return syn::Error::new(
                name.span(),
                "`name` is given both in #[mixin] and as a method",
            )
            .to_compile_error()
            .into();
        }
        input.items.push(syn::parse_quote! {
            fn name(&self) -> &'static str {
                #name
            }
        });
    }

    if !defines("capabilities") {
        let flags: Vec<proc_macro2::TokenStream> = HANDLERS
            .iter()
            .filter(|(method, _)| defines(method))
            .map(|(_, flag)| {
                let flag = Ident::new(flag, Span::call_site());
                quote! { #krate::Capabilities::#flag }
            })
            .collect();

        let body = if flags.is_empty() {
            quote! { #krate::Capabilities::empty() }
        } else {
            quote! { #(#flags)|* }
        };

        input.items.push(syn::parse_quote! {
            fn capabilities(&self) -> #krate::Capabilities {
                #body
            }
        });
    }

    TokenStream::from(quote! { #input })
}

struct MixinArgs {
    name: Option<LitStr>,
    krate: Option<Path>,
}

impl Parse for MixinArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;
        let mut krate = None;

        while !input.is_empty() {
            // `crate` is a keyword.
            let ident = Ident::parse_any(input)?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    name = Some(input.parse::<LitStr>()?);
                }
                "crate" => {
                    krate = Some(Path::parse_mod_style(input)?);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(MixinArgs { name, krate })
    }
}
