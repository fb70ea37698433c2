//! Error types for the operations layer.
//!
//! `OpsError` covers conditions that stop a run. Problems confined to a
//! single annotation, field, friend declaration or output file are reported
//! as [`crate::Diagnostic`]s instead and never surface here.

use std::path::PathBuf;

use thiserror::Error;
use wrench_core::BuiltinKind;

/// Result type for operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Errors that abort an operation.
#[derive(Debug, Error)]
pub enum OpsError {
    /// No symbol dumps were found in the given inputs.
    #[error("No symbol dumps found in {}", display_paths(.inputs))]
    NoInputs { inputs: Vec<PathBuf> },

    /// A symbol dump could not be read.
    #[error("Failed to read symbol dump {path}: {source}")]
    SymbolDumpRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A symbol dump is not valid JSON for the symbol model.
    #[error("Failed to parse symbol dump {path}: {source}")]
    SymbolDumpParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A class declares more than one base class.
    #[error("Class '{class}' ({location}) has {count} base classes; only single inheritance is supported")]
    MultipleBases {
        class: String,
        location: String,
        count: usize,
    },

    /// A field is typed with a builtin that has no Torque alias.
    #[error("Field '{member}' of class '{class}' has builtin type '{builtin}' which has no Torque equivalent")]
    UnsupportedBuiltin {
        class: String,
        member: String,
        builtin: BuiltinKind,
    },

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OpsError {
    /// Whether this error reports a broken structural invariant of the input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            OpsError::MultipleBases { .. } | OpsError::UnsupportedBuiltin { .. }
        )
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
