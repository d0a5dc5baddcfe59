/* Codegen command - emit Rust accessor impls for declared types */

use super::common::load_types;
use crate::{synthesize_type, EmitterOptions, RustEmitter};
use anyhow::Context;
use mirror_types::{Emitter, TypeDecl};
use std::path::PathBuf;
use tracing::info;

pub const GENERATED_HEADER: &str = "// @generated by mirror-gen. Do not edit.\n";

/* Execute the codegen command */
pub fn run(files: Vec<PathBuf>, output: Option<PathBuf>, crate_path: String) -> anyhow::Result<()> {
    let types = load_types(&files)?;
    let code = generate(&types, crate_path)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &code)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), types = types.len(), "generated accessors");
        }
        None => print!("{}", code),
    }

    Ok(())
}

/// Renders the accessor impls of every type, in declaration order.
pub fn generate(types: &[TypeDecl], crate_path: String) -> anyhow::Result<String> {
    let emitter = RustEmitter::new(EmitterOptions { crate_path });

    let mut code = String::from(GENERATED_HEADER);
    for decl in types {
        let table =
            synthesize_type(decl).with_context(|| format!("analyzing type '{}'", decl.name))?;
        let tokens = emitter
            .emit(&table)
            .with_context(|| format!("emitting accessors for '{}'", decl.name))?;
        code.push('\n');
        code.push_str(&tokens.to_string());
        code.push('\n');
    }
    Ok(code)
}
