/* Helpers shared by the CLI commands */

use crate::loader::load_decl_file;
use anyhow::Context;
use mirror_types::TypeDecl;
use std::path::PathBuf;
use tracing::info;

/* Load every declaration file, keeping file order and type order */
pub fn load_types(files: &[PathBuf]) -> anyhow::Result<Vec<TypeDecl>> {
    let mut types = Vec::new();
    for file in files {
        let decl_file = load_decl_file(file)
            .with_context(|| format!("loading declarations from {}", file.display()))?;
        info!(
            file = %file.display(),
            types = decl_file.types.len(),
            "loaded declarations"
        );
        types.extend(decl_file.types);
    }
    Ok(types)
}
