extern crate proc_macro;

use mirror_gen::registry;
use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Implements `Inspectable` for a value-semantics owner (struct or enum).
///
/// The generated `field` lookup borrows the owner exclusively, so accessors
/// write through to the original value and cannot outlive the borrow.
///
/// ```ignore
/// #[derive(Inspectable)]
/// #[inspect(computed(name = "label", get = "Self::label"))]
/// struct Product {
///     #[inspect(readonly)]
///     model_name: String,
///     price: i64,
/// }
/// ```
#[proc_macro_derive(Inspectable, attributes(inspect))]
pub fn derive_inspectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand("Inspectable", &input)
}

/// Implements `SharedInspectable` (and `Inspectable`) for a reference-semantics
/// owner. Writable stored fields must live in an interior-mutability slot such
/// as `RefCell<T>`.
#[proc_macro_derive(SharedInspectable, attributes(inspect))]
pub fn derive_shared_inspectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand("SharedInspectable", &input)
}

fn expand(annotation: &str, input: &DeriveInput) -> TokenStream {
    registry()
        .expand(annotation, input)
        .unwrap_or_else(|err| err.into_syn_error(input.ident.span()).to_compile_error())
        .into()
}
