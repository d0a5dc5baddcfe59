/* Reflection Generator
 *
 * This library turns a type's member declarations into a per-field accessor
 * table: the analyzer classifies each field, the synthesizer plans how every
 * accessor reaches its storage, and emitters render the plan as Rust code.
 */

pub mod analyzer;
pub mod cmds;
pub mod emit;
pub mod errors;
pub mod frontend;
pub mod loader;
pub mod registry;
pub mod synth;

pub use analyzer::analyze;
pub use emit::{EmitterOptions, RustEmitter};
pub use errors::{AnalyzeError, EmitError, GenError, GenResult};
pub use registry::{registry, Transform, TransformRegistry};
pub use synth::{synthesize, synthesize_type};

use mirror_types::{Emitter, OwnerSemantics};
use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Full derive pipeline: front end, analysis, synthesis and Rust emission.
pub fn expand_derive(input: &DeriveInput, semantics: OwnerSemantics) -> GenResult<TokenStream> {
    let parsed = frontend::parse_derive_input(input, semantics)?;
    let table = synthesize_type(&parsed.decl)?;
    let tokens = RustEmitter::new(parsed.options)
        .with_generics(input.generics.clone())
        .emit(&table)?;
    Ok(tokens)
}
