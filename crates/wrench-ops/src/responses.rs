//! Response DTOs for operations.
//!
//! Each response type contains all the data produced by an operation,
//! making it easy to consume from the CLI or programmatically.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use wrench_core::ClassRecord;

use crate::diagnostics::Diagnostic;
use crate::render::TorqueClass;

/// One file written by a generate operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedClass {
    /// Class name.
    pub name: String,

    /// Path of the written `.tq` file.
    pub path: PathBuf,

    /// Size of the written file.
    pub bytes: u64,
}

/// Response from a generate operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Directory the files were written to.
    pub output_dir: PathBuf,

    /// Symbol dumps that were loaded.
    pub dumps: Vec<PathBuf>,

    /// Files written, in generation order.
    pub generated: Vec<GeneratedClass>,

    /// Number of classes built, written or not.
    pub class_count: usize,

    /// Recoverable problems met along the way.
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerateResponse {
    /// Get the number of files written.
    pub fn written_count(&self) -> usize {
        self.generated.len()
    }

    /// Get the total size of the written files.
    pub fn total_bytes(&self) -> u64 {
        self.generated.iter().map(|g| g.bytes).sum()
    }

    /// Get the number of built classes that could not be written.
    pub fn skipped_count(&self) -> usize {
        self.class_count.saturating_sub(self.generated.len())
    }

    /// Check if anything was reported.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Response from an inspect operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectResponse {
    /// Symbol dumps that were loaded.
    pub dumps: Vec<PathBuf>,

    /// Built class records, in generation order.
    pub records: Vec<ClassRecord>,

    /// Recoverable problems met along the way.
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl InspectResponse {
    /// Render every record the way `generate` previews it.
    pub fn preview(&self) -> String {
        self.records
            .iter()
            .map(|record| preview_entry(record, None))
            .collect()
    }

    /// Check if anything was reported.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// `\n* Class 'Name' (path)\n` followed by the class body.
pub(crate) fn preview_entry(record: &ClassRecord, path: Option<&std::path::Path>) -> String {
    let target = match path {
        Some(path) => path.display().to_string(),
        None => record.file_name(),
    };
    format!("\n* Class '{}' ({})\n{}", record.name, target, TorqueClass(record))
}
