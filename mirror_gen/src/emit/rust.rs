/* Rust emitter - render an accessor table as trait impls for the owner */

use crate::errors::EmitError;
use mirror_types::{AccessPath, AccessorPlan, AccessorTable, Emitter, FieldAccess, OwnerSemantics};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{ExprPath, GenericArgument, Generics, Ident, Path, PathArguments, Type};
use tracing::debug;

pub const DEFAULT_CRATE_PATH: &str = "::mirror_reflect";

/* Configuration toggles for the Rust emitter */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitterOptions {
    /* Path of the runtime crate as seen from the generated code */
    pub crate_path: String,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            crate_path: DEFAULT_CRATE_PATH.to_string(),
        }
    }
}

pub struct RustEmitter {
    options: EmitterOptions,
    generics: Generics,
}

impl RustEmitter {
    pub fn new(options: EmitterOptions) -> Self {
        Self {
            options,
            generics: Generics::default(),
        }
    }

    /// Carries the owner's generic parameters and where-clause onto the impls.
    pub fn with_generics(mut self, generics: Generics) -> Self {
        self.generics = generics;
        self
    }

    pub fn options(&self) -> &EmitterOptions {
        &self.options
    }

    fn emit_branch(&self, krate: &Path, plan: &AccessorPlan) -> Result<TokenStream, EmitError> {
        let name = plan.name.as_str();
        let ident = member_ident(name)?;

        let read = match &plan.access {
            FieldAccess::Stored { type_annotation } => {
                /* Slot-ness never depends on writability, so readonly keeps the type */
                let slot = plan.reader == AccessPath::Shared
                    && (plan.writer.is_some() || is_slot_type(type_annotation.as_deref())?);
                if slot {
                    quote! { #krate::SharedSlot::load(&owner.#ident) }
                } else {
                    quote! { ::core::clone::Clone::clone(&owner.#ident) }
                }
            }
            FieldAccess::Computed { getter, .. } => {
                let getter = accessor_path(getter.as_deref(), || format!("Self::{}", name))?;
                quote! { #getter(owner) }
            }
        };

        let write = plan
            .writer
            .map(|_| -> Result<TokenStream, EmitError> {
                Ok(match &plan.access {
                    FieldAccess::Stored { .. } if plan.reader == AccessPath::Shared => {
                        quote! { #krate::SharedSlot::store(&owner.#ident, value) }
                    }
                    FieldAccess::Stored { .. } => quote! { owner.#ident = value },
                    FieldAccess::Computed { setter, .. } => {
                        let setter = accessor_path(setter.as_deref(), || {
                            format!("Self::{}", format_ident!("set_{}", ident.unraw()))
                        })?;
                        quote! { #setter(owner, value) }
                    }
                })
            })
            .transpose()?;

        /* Annotate the writer parameter when the stored type is known */
        let value_param = match (&plan.access, plan.reader) {
            (FieldAccess::Stored { type_annotation: Some(ty) }, AccessPath::Lease) => {
                let ty: Type = parse_syntax("field type", ty)?;
                quote! { value: #ty }
            }
            _ => quote! { value },
        };

        let accessor = match (plan.reader, write) {
            (AccessPath::Lease, None) => quote! {
                let lease = #krate::Lease::exclusive(self);
                #krate::FieldAccessor::readonly(#name, move || lease.read(|owner| #read))
            },
            (AccessPath::Lease, Some(write)) => quote! {
                let lease = #krate::Lease::exclusive(self);
                let reader_lease = ::core::clone::Clone::clone(&lease);
                #krate::FieldAccessor::writable(
                    #name,
                    move || reader_lease.read(|owner| #read),
                    move |#value_param| lease.write(|owner| #write),
                )
            },
            (AccessPath::Shared, None) => quote! {
                let owner = self;
                #krate::FieldAccessor::readonly(#name, move || #read)
            },
            (AccessPath::Shared, Some(write)) => quote! {
                let owner = self;
                #krate::FieldAccessor::writable(
                    #name,
                    move || #read,
                    move |#value_param| #write,
                )
            },
        };

        Ok(quote! {
            if name == #name {
                let accessor = { #accessor };
                return ::core::option::Option::Some(::std::boxed::Box::new(accessor));
            }
        })
    }
}

impl Emitter for RustEmitter {
    type Output = TokenStream;
    type Error = EmitError;

    fn emit(&self, table: &AccessorTable) -> Result<TokenStream, EmitError> {
        let krate: Path = parse_syntax("crate path", &self.options.crate_path)?;
        let owner = member_ident(&table.owner)?;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let names: Vec<&str> = table.enumerate().collect();
        let branches = table
            .plans
            .iter()
            .map(|plan| self.emit_branch(&krate, plan))
            .collect::<Result<Vec<_>, _>>()?;
        let unused_name = table.is_empty().then(|| quote! { let _ = name; });

        let accessor_ty = quote! {
            ::core::option::Option<::std::boxed::Box<dyn #krate::FieldAccessing + '_>>
        };
        let all_field_names = quote! {
            fn all_field_names(&self) -> #krate::FieldNames<'_> {
                #krate::FieldNames::from_static(&[#(#names),*])
            }
        };

        debug!(
            owner = %table.owner,
            branches = branches.len(),
            "emitting Rust accessors"
        );

        let tokens = match table.semantics {
            OwnerSemantics::Value => quote! {
                #[automatically_derived]
                impl #impl_generics #krate::Inspectable for #owner #ty_generics #where_clause {
                    #all_field_names

                    fn field(&mut self, name: &str) -> #accessor_ty {
                        #unused_name
                        #(#branches)*
                        ::core::option::Option::None
                    }
                }
            },
            OwnerSemantics::Reference => quote! {
                #[automatically_derived]
                impl #impl_generics #krate::Inspectable for #owner #ty_generics #where_clause {
                    #all_field_names

                    fn field(&mut self, name: &str) -> #accessor_ty {
                        #krate::SharedInspectable::shared_field(&*self, name)
                    }
                }

                #[automatically_derived]
                impl #impl_generics #krate::SharedInspectable for #owner #ty_generics
                #where_clause
                {
                    fn shared_field(&self, name: &str) -> #accessor_ty {
                        #unused_name
                        #(#branches)*
                        ::core::option::Option::None
                    }
                }
            },
        };

        Ok(tokens)
    }
}

/// Whether a stored field's declared type is an interior-mutability slot.
///
/// Slots are recognised by the last path segment, looking through `Rc`/`Arc`.
/// A slot behind a type alias is only read through `SharedSlot` when writable.
fn is_slot_type(type_annotation: Option<&str>) -> Result<bool, EmitError> {
    match type_annotation {
        Some(text) => Ok(names_slot(&parse_syntax::<Type>("field type", text)?)),
        None => Ok(false),
    }
}

fn names_slot(ty: &Type) -> bool {
    match ty {
        Type::Paren(inner) => names_slot(&inner.elem),
        Type::Group(inner) => names_slot(&inner.elem),
        Type::Path(path) if path.qself.is_none() => {
            let Some(last) = path.path.segments.last() else {
                return false;
            };
            match last.ident.to_string().as_str() {
                "RefCell" | "Cell" | "Mutex" | "RwLock" => true,
                "Rc" | "Arc" => match &last.arguments {
                    PathArguments::AngleBracketed(args) => args.args.iter().any(|arg| {
                        matches!(arg, GenericArgument::Type(inner) if names_slot(inner))
                    }),
                    _ => false,
                },
                _ => false,
            }
        }
        _ => false,
    }
}

/// Field and type names may be keywords written as raw identifiers.
fn member_ident(name: &str) -> Result<Ident, EmitError> {
    syn::parse_str::<Ident>(name)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{}", name)))
        .map_err(|_| EmitError::InvalidIdent {
            name: name.to_string(),
        })
}

fn accessor_path(
    explicit: Option<&str>,
    fallback: impl FnOnce() -> String,
) -> Result<ExprPath, EmitError> {
    match explicit {
        Some(path) => parse_syntax("accessor path", path),
        None => parse_syntax("accessor path", &fallback()),
    }
}

fn parse_syntax<T: syn::parse::Parse>(what: &'static str, text: &str) -> Result<T, EmitError> {
    syn::parse_str(text).map_err(|source| EmitError::InvalidSyntax {
        what,
        text: text.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_names_become_raw_identifiers() {
        assert_eq!(member_ident("price").unwrap().to_string(), "price");
        assert_eq!(member_ident("type").unwrap().to_string(), "r#type");
        assert!(matches!(
            member_ident("not a name"),
            Err(EmitError::InvalidIdent { .. })
        ));
    }

    #[test]
    fn slot_types_are_recognised_by_name() {
        let slot = |text: &str| is_slot_type(Some(text)).unwrap();
        assert!(slot("RefCell<Vec<u32>>"));
        assert!(slot("std::sync::Mutex<String>"));
        assert!(slot("Arc<RwLock<i64>>"));
        assert!(slot("Rc<Cell<u8>>"));
        assert!(!slot("Rc<String>"));
        assert!(!slot("Vec<RefCell<u8>>"));
        assert!(!slot("String"));
        assert!(!is_slot_type(None).unwrap());
    }

    #[test]
    fn default_setter_path_uses_set_prefix() {
        let ident = member_ident("type").unwrap();
        let path = accessor_path(None, || {
            format!("Self::{}", format_ident!("set_{}", ident.unraw()))
        })
        .unwrap();
        assert_eq!(quote!(#path).to_string(), "Self :: set_type");
    }

    #[test]
    fn invalid_crate_path_is_reported() {
        let emitter = RustEmitter::new(EmitterOptions {
            crate_path: "not a path".into(),
        });
        let table = AccessorTable {
            owner: "Empty".into(),
            semantics: OwnerSemantics::Value,
            plans: vec![],
        };
        let err = emitter.emit(&table).unwrap_err();
        assert!(err.to_string().contains("crate path"));
    }
}
