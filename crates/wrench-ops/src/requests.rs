//! Request DTOs for operations.
//!
//! Each request type encapsulates all the parameters needed for an operation,
//! making it easy to call from the CLI or programmatically.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Request to generate Torque files from symbol dumps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Symbol dump files or directories containing them.
    pub inputs: Vec<PathBuf>,

    /// Output directory, overriding the configured one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl GenerateRequest {
    /// Create a generate request for the given inputs.
    pub fn new(inputs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output_dir: None,
        }
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }
}

/// Request to build class records without writing anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectRequest {
    /// Symbol dump files or directories containing them.
    pub inputs: Vec<PathBuf>,
}

impl InspectRequest {
    /// Create an inspect request for the given inputs.
    pub fn new(inputs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
        }
    }
}
