//! OpsContext - The main service for executing operations.
//!
//! The OpsContext holds configuration and provides methods for all v8-wrench
//! operations. It can be used by the CLI or any other consumer.

use std::io::Write;

use tracing::info;

use crate::config::Config;
use crate::error::OpsResult;
use crate::output::OutputDir;
use crate::requests::*;
use crate::responses::*;
use crate::run::Run;
use crate::scan::{find_symbol_dumps, load_symbol_model};

/// The main operations context.
#[derive(Debug, Clone)]
pub struct OpsContext {
    /// Configuration for operations.
    pub config: Config,
}

impl OpsContext {
    /// Create a new OpsContext with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate one `.tq` file per torqueable class.
    ///
    /// Every built class is previewed to `preview`.
    pub fn generate<W: Write>(
        &self,
        request: &GenerateRequest,
        preview: &mut W,
    ) -> OpsResult<GenerateResponse> {
        let output = match &request.output_dir {
            Some(dir) => OutputDir::new(dir)?,
            None => OutputDir::new(&self.config.output_dir)?,
        };

        let dumps = find_symbol_dumps(&request.inputs, &self.config.dump_suffix)?;
        let model = load_symbol_model(&dumps)?;
        info!(dumps = dumps.len(), decls = model.decl_count(), "Loaded symbol model");

        let mut run = Run::new(&self.config.conventions);
        run.collect(&model);
        let records = run.build()?;
        let generated = run.emit(&records, &output, preview);
        let diagnostics = run.finish();

        info!(
            written = generated.len(),
            classes = records.len(),
            diagnostics = diagnostics.len(),
            output = %output.root().display(),
            "Generation complete"
        );

        Ok(GenerateResponse {
            output_dir: output.root().to_path_buf(),
            dumps,
            generated,
            class_count: records.len(),
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// Collect and build class records without writing files.
    pub fn inspect(&self, request: &InspectRequest) -> OpsResult<InspectResponse> {
        let dumps = find_symbol_dumps(&request.inputs, &self.config.dump_suffix)?;
        let model = load_symbol_model(&dumps)?;

        let mut run = Run::new(&self.config.conventions);
        run.collect(&model);
        let records = run.build()?;
        info!(classes = records.len(), "Inspection complete");

        Ok(InspectResponse {
            dumps,
            records,
            diagnostics: run.finish().into_vec(),
        })
    }
}
