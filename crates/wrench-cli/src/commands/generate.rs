//! Generate command implementation.
//!
//! Runs the full pipeline and writes one `.tq` file per class.

use std::path::PathBuf;

use anyhow::Result;
use humansize::{format_size, DECIMAL};
use tracing::info;
use wrench_ops::{GenerateRequest, OpsContext};

use super::failure;

/// Generate Torque files and print previews plus a summary to stdout.
pub fn execute(
    ctx: &OpsContext,
    inputs: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    strict: bool,
    quiet: bool,
) -> Result<()> {
    let mut request = GenerateRequest::new(inputs);
    if let Some(dir) = output_dir {
        request = request.with_output_dir(dir);
    }
    info!(inputs = request.inputs.len(), "Generating Torque classes");

    let stdout = std::io::stdout();
    let mut preview = stdout.lock();
    let response = ctx
        .generate(&request, &mut preview)
        .map_err(|e| failure("Generation", e))?;
    drop(preview);

    if !quiet {
        println!();
        println!("Output:      {}", response.output_dir.display());
        println!("Dumps:       {}", response.dumps.len());
        println!(
            "Written:     {} of {} classes ({})",
            response.written_count(),
            response.class_count,
            format_size(response.total_bytes(), DECIMAL)
        );
        println!("Skipped:     {}", response.skipped_count());
        println!("Diagnostics: {}", response.diagnostics.len());
    }

    if strict && response.has_diagnostics() {
        for diagnostic in &response.diagnostics {
            eprintln!("{diagnostic}");
        }
        anyhow::bail!(
            "{} diagnostic(s) reported with --strict",
            response.diagnostics.len()
        );
    }

    Ok(())
}
