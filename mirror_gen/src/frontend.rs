/* syn front end - turn a derive input into an abstract declaration list */

use crate::emit::EmitterOptions;
use mirror_types::{
    BindingKeyword, BindingPattern, DeclKind, MemberDecl, OwnerSemantics, PatternBinding, TypeDecl,
    VariableDecl,
};
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Token};

pub const ATTRIBUTE: &str = "inspect";

/// Declaration list plus emitter configuration read from `#[inspect(...)]`.
#[derive(Debug, Clone)]
pub struct ParsedOwner {
    pub decl: TypeDecl,
    pub options: EmitterOptions,
}

/* Field-level options */
#[derive(Default)]
struct FieldOptions {
    readonly: bool,
    skip: bool,
}

/* Container-level options */
#[derive(Default)]
struct ContainerOptions {
    computed: Vec<VariableDecl>,
    crate_path: Option<String>,
}

pub fn parse_derive_input(
    input: &DeriveInput,
    semantics: OwnerSemantics,
) -> syn::Result<ParsedOwner> {
    let container = parse_container_options(&input.attrs)?;
    let mut members = Vec::new();

    let kind = match (&input.data, semantics) {
        (Data::Struct(data), _) => {
            match &data.fields {
                Fields::Named(named) => {
                    for field in &named.named {
                        let options = parse_field_options(&field.attrs)?;
                        if options.skip {
                            continue;
                        }
                        let Some(ident) = &field.ident else {
                            continue;
                        };
                        let keyword = if options.readonly {
                            BindingKeyword::Let
                        } else {
                            BindingKeyword::Var
                        };
                        let ty = field.ty.to_token_stream().to_string();
                        members.push(MemberDecl::Variable(VariableDecl::stored(
                            keyword,
                            &ident.unraw().to_string(),
                            Some(&ty),
                        )));
                    }
                }
                Fields::Unnamed(unnamed) => {
                    /* Positional fields have no simple name to bind */
                    members.push(MemberDecl::Variable(VariableDecl {
                        keyword: BindingKeyword::Var,
                        bindings: vec![PatternBinding {
                            pattern: BindingPattern::Tuple {
                                elements: unnamed
                                    .unnamed
                                    .iter()
                                    .map(|_| BindingPattern::Wildcard)
                                    .collect(),
                            },
                            type_annotation: None,
                            accessor_block: None,
                        }],
                    }));
                }
                Fields::Unit => {}
            }
            match semantics {
                OwnerSemantics::Value => DeclKind::Struct,
                OwnerSemantics::Reference => DeclKind::Class,
            }
        }
        (Data::Enum(data), OwnerSemantics::Value) => {
            for variant in &data.variants {
                members.push(MemberDecl::EnumCase {
                    name: variant.ident.to_string(),
                });
            }
            DeclKind::Enum
        }
        (Data::Enum(_), OwnerSemantics::Reference) => {
            return Err(syn::Error::new(
                input.ident.span(),
                "SharedInspectable can only be derived for structs",
            ));
        }
        (Data::Union(_), _) => {
            return Err(syn::Error::new(
                input.ident.span(),
                "unions cannot be inspected",
            ));
        }
    };

    /* Computed properties follow stored fields, in attribute order */
    members.extend(container.computed.into_iter().map(MemberDecl::Variable));

    let mut options = EmitterOptions::default();
    if let Some(crate_path) = container.crate_path {
        options.crate_path = crate_path;
    }

    Ok(ParsedOwner {
        decl: TypeDecl {
            name: input.ident.unraw().to_string(),
            kind,
            members,
        },
        options,
    })
}

fn parse_container_options(attrs: &[Attribute]) -> syn::Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident(ATTRIBUTE)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("computed") {
                let mut name = None;
                let mut getter = None;
                let mut setter: Option<Option<String>> = None;

                meta.parse_nested_meta(|inner| {
                    if inner.path.is_ident("name") {
                        let lit: LitStr = inner.value()?.parse()?;
                        name = Some(lit.value());
                    } else if inner.path.is_ident("get") {
                        let lit: LitStr = inner.value()?.parse()?;
                        getter = Some(lit.value());
                    } else if inner.path.is_ident("set") {
                        if inner.input.peek(Token![=]) {
                            let lit: LitStr = inner.value()?.parse()?;
                            setter = Some(Some(lit.value()));
                        } else {
                            setter = Some(None);
                        }
                    } else {
                        return Err(inner.error("unsupported computed property option"));
                    }
                    Ok(())
                })?;

                let name = name
                    .ok_or_else(|| meta.error("computed property requires `name = \"...\"`"))?;
                options.computed.push(VariableDecl::computed(
                    &name,
                    getter.as_deref(),
                    setter.as_ref().map(|s| s.as_deref()),
                ));
            } else if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                options.crate_path = Some(lit.value());
            } else {
                return Err(meta.error("unsupported inspect container attribute"));
            }
            Ok(())
        })?;
    }

    Ok(options)
}

fn parse_field_options(attrs: &[Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident(ATTRIBUTE)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("readonly") {
                options.readonly = true;
            } else if meta.path.is_ident("skip") {
                options.skip = true;
            } else {
                return Err(meta.error("unsupported inspect field attribute"));
            }
            Ok(())
        })?;
    }

    Ok(options)
}
