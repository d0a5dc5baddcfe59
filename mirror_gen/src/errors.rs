use proc_macro2::Span;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the generator crate.
pub type GenResult<T> = Result<T, GenError>;

/// Malformed member declarations. These abort generation; there is no
/// partial output.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("unsupported declaration kind for {member}: {reason}")]
    UnsupportedDeclarationKind {
        member: String,
        reason: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum EmitError {
    /// A name from the accessor table is not a Rust identifier.
    #[error("'{name}' is not a valid Rust identifier")]
    InvalidIdent { name: String },

    #[error("failed to parse {what} '{text}': {source}")]
    InvalidSyntax {
        what: &'static str,
        text: String,
        #[source]
        source: syn::Error,
    },
}

/// Top-level errors produced by the generator.
#[derive(Debug, Error)]
pub enum GenError {
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    /// Invalid derive input or `#[inspect]` attribute.
    #[error(transparent)]
    Syntax(#[from] syn::Error),

    #[error("no transform registered for annotation '{name}'")]
    UnknownTransform { name: String },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse declaration file '{}': {reason}", path.display())]
    DeclFile { path: PathBuf, reason: String },
}

impl GenError {
    /// Converts into a compile error, keeping the original span when there is one.
    pub fn into_syn_error(self, span: Span) -> syn::Error {
        match self {
            GenError::Syntax(err) => err,
            other => syn::Error::new(span, other.to_string()),
        }
    }
}
