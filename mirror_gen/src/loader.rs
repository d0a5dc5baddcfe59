/* Declaration file loading for the CLI */

use crate::errors::{GenError, GenResult};
use mirror_types::DeclFile;
use std::path::Path;
use tracing::debug;

/// Loads a declaration file. `.json` files are parsed as JSON, anything else
/// as YAML.
pub fn load_decl_file(path: &Path) -> GenResult<DeclFile> {
    let content = std::fs::read_to_string(path).map_err(|source| GenError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let file: DeclFile = if is_json {
        serde_json::from_str(&content).map_err(|e| GenError::DeclFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
    } else {
        serde_yml::from_str(&content).map_err(|e| GenError::DeclFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
    };

    debug!(path = %path.display(), types = file.types.len(), "loaded declaration file");
    Ok(file)
}
