use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, GenericArgument, Ident, PathArguments, Type,
    Variant, Visibility,
};

const INTERNAL_VARIANT: &str = "Internal";

/// Expands `#[hustler_error]` on an enum.
pub fn expand(input: DeriveInput) -> TokenStream {
    match ErrorEnum::parse(&input) {
        Ok(model) => model.render(&input),
        Err(err) => err.to_compile_error(),
    }
}

struct ErrorEnum<'a> {
    ident: &'a Ident,
    vis: &'a Visibility,
    variants: Vec<ErrorVariant<'a>>,
}

struct ErrorVariant<'a> {
    ident: &'a Ident,
    cfg: Vec<&'a Attribute>,
    source: Option<&'a Field>,
    has_context: bool,
    has_message: bool,
    field_count: usize,
}

impl<'a> ErrorEnum<'a> {
    fn parse(input: &'a DeriveInput) -> syn::Result<Self> {
        let Data::Enum(data) = &input.data else {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "hustler_error can only be applied to enums",
            ));
        };

        let variants = data.variants.iter().map(ErrorVariant::parse).collect::<syn::Result<_>>()?;

        Ok(Self { ident: &input.ident, vis: &input.vis, variants })
    }

    fn ext_trait(&self) -> Ident {
        format_ident!("{}Ext", self.ident)
    }

    fn render(&self, input: &DeriveInput) -> TokenStream {
        let derives = missing_derives(&input.attrs);
        let alias = self.render_result_alias();
        let context_trait = self.render_context_trait();
        let conversions = self.variants.iter().filter_map(|v| self.render_source_conversion(v));
        let internal = self.render_internal_conversion();

        quote! {
            #[allow(non_shorthand_field_patterns)]
            #derives
            #input

            #alias
            #context_trait
            #(#conversions)*
            #internal

            #[allow(dead_code)]
            fn format_context(
                context: &::std::option::Option<::std::borrow::Cow<'static, str>>,
            ) -> ::std::borrow::Cow<'static, str> {
                context.as_ref().map_or(::std::borrow::Cow::Borrowed(""), |c| {
                    ::std::borrow::Cow::Owned(format!(" ({c})"))
                })
            }
        }
    }

    fn render_result_alias(&self) -> TokenStream {
        let name = self.ident;
        let vis = self.vis;
        let full = name.to_string();
        let stem = full.strip_suffix("Error").filter(|s| !s.is_empty()).unwrap_or(&full);
        let alias = format_ident!("{}Result", stem);
        let doc = format!("Shorthand for results failing with [`{name}`].");

        quote! {
            #[doc = #doc]
            #[allow(dead_code)]
            #vis type #alias<T, E = #name> = ::std::result::Result<T, E>;
        }
    }

    fn render_context_trait(&self) -> TokenStream {
        let name = self.ident;
        let vis = self.vis;
        let ext = self.ext_trait();

        let arms = self.variants.iter().filter(|v| v.has_context).map(|v| {
            let ident = v.ident;
            let cfg = &v.cfg;
            quote! {
                #(#cfg)*
                #name::#ident { context: slot, .. } => {
                    *slot = ::std::option::Option::Some(context.into());
                },
            }
        });

        quote! {
            #vis trait #ext<T> {
                /// Attaches a human-readable context to the error branch of a result.
                fn context(
                    self,
                    context: impl ::std::convert::Into<::std::borrow::Cow<'static, str>>,
                ) -> ::std::result::Result<T, #name>;
            }

            #[automatically_derived]
            impl<T> #ext<T> for ::std::result::Result<T, #name> {
                #[inline]
                fn context(
                    self,
                    context: impl ::std::convert::Into<::std::borrow::Cow<'static, str>>,
                ) -> Self {
                    self.map_err(|mut err| {
                        #[allow(unreachable_patterns)]
                        match &mut err {
                            #(#arms)*
                            _ => {},
                        }
                        err
                    })
                }
            }
        }
    }

    /// `From<Source>` plus context support for `Result<T, Source>`.
    ///
    /// Only variants shaped exactly `{ source, context }` get conversions; anything richer has
    /// to be constructed explicitly.
    fn render_source_conversion(&self, v: &ErrorVariant<'_>) -> Option<TokenStream> {
        if v.ident == INTERNAL_VARIANT || v.field_count != 2 {
            return None;
        }
        let field = v.source?;
        let field_ident = field.ident.as_ref()?;
        let ty = &field.ty;
        let name = self.ident;
        let ext = self.ext_trait();
        let variant = v.ident;
        let cfg = &v.cfg;

        Some(quote! {
            #(#cfg)*
            #[automatically_derived]
            impl ::std::convert::From<#ty> for #name {
                #[inline]
                fn from(#field_ident: #ty) -> Self {
                    Self::#variant { #field_ident, context: ::std::option::Option::None }
                }
            }

            #(#cfg)*
            #[automatically_derived]
            impl<T> #ext<T> for ::std::result::Result<T, #ty> {
                #[inline]
                fn context(
                    self,
                    context: impl ::std::convert::Into<::std::borrow::Cow<'static, str>>,
                ) -> ::std::result::Result<T, #name> {
                    self.map_err(|#field_ident| #name::#variant {
                        #field_ident,
                        context: ::std::option::Option::Some(context.into()),
                    })
                }
            }
        })
    }

    fn render_internal_conversion(&self) -> TokenStream {
        let Some(internal) = self.variants.iter().find(|v| {
            v.ident == INTERNAL_VARIANT && v.has_message && v.has_context && v.field_count == 2
        }) else {
            return TokenStream::new();
        };
        let name = self.ident;
        let cfg = &internal.cfg;

        quote! {
            #(#cfg)*
            #[automatically_derived]
            impl ::std::convert::From<&'static str> for #name {
                #[inline]
                fn from(message: &'static str) -> Self {
                    Self::Internal {
                        message: ::std::borrow::Cow::Borrowed(message),
                        context: ::std::option::Option::None,
                    }
                }
            }

            #(#cfg)*
            #[automatically_derived]
            impl ::std::convert::From<::std::string::String> for #name {
                #[inline]
                fn from(message: ::std::string::String) -> Self {
                    Self::Internal {
                        message: ::std::borrow::Cow::Owned(message),
                        context: ::std::option::Option::None,
                    }
                }
            }
        }
    }
}

impl<'a> ErrorVariant<'a> {
    fn parse(v: &'a Variant) -> syn::Result<Self> {
        let Fields::Named(fields) = &v.fields else {
            return Err(syn::Error::new_spanned(
                v,
                "hustler_error requires named fields so source and context can be wired",
            ));
        };

        let mut source = None;
        let mut has_context = false;
        let mut has_message = false;

        for field in &fields.named {
            let Some(field_name) = &field.ident else { continue };

            if field_name == "context" {
                if !is_context_type(&field.ty) {
                    return Err(syn::Error::new_spanned(
                        &field.ty,
                        "context field must be Option<Cow<'static, str>>",
                    ));
                }
                has_context = true;
            } else if field_name == "message" {
                has_message = true;
            }

            let marks_source =
                field_name == "source" || has_attr(field, "source") || has_attr(field, "from");
            if source.is_none() && marks_source {
                source = Some(field);
            }
        }

        if source.is_some() && !has_context {
            return Err(syn::Error::new_spanned(
                &v.ident,
                "hustler_error requires `context: Option<Cow<'static, str>>` on variants with a source",
            ));
        }

        Ok(Self {
            ident: &v.ident,
            cfg: v.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).collect(),
            source,
            has_context,
            has_message,
            field_count: fields.named.len(),
        })
    }
}

fn has_attr(field: &Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn missing_derives(attrs: &[Attribute]) -> TokenStream {
    let present = derived_traits(attrs);
    let mut wanted = Vec::new();
    if !present.contains("Debug") {
        wanted.push(quote! { Debug });
    }
    if !present.contains("Error") {
        wanted.push(quote! { ::thiserror::Error });
    }

    if wanted.is_empty() { TokenStream::new() } else { quote! { #[derive(#(#wanted),*)] } }
}

fn derived_traits(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                traits.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }
    traits
}

/// Matches `Option<Cow<'static, str>>`, with or without leading paths.
fn is_context_type(ty: &Type) -> bool {
    let Some(PathArguments::AngleBracketed(option_args)) = segment_args(ty, "Option") else {
        return false;
    };
    let Some(GenericArgument::Type(cow)) = option_args.args.first() else {
        return false;
    };
    let Some(PathArguments::AngleBracketed(cow_args)) = segment_args(cow, "Cow") else {
        return false;
    };

    let mut args = cow_args.args.iter();
    let static_lifetime =
        matches!(args.next(), Some(GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let str_type =
        matches!(args.next(), Some(GenericArgument::Type(inner)) if segment_args(inner, "str").is_some());

    static_lifetime && str_type && args.next().is_none()
}

fn segment_args<'t>(ty: &'t Type, expected: &str) -> Option<&'t PathArguments> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    (segment.ident == expected).then_some(&segment.arguments)
}
