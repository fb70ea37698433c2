//! The three phases of a generation run.
//!
//! A [`Run`] owns the candidate list and the diagnostics of one invocation.
//! Each phase completes before the next starts:
//!
//! 1. [`Run::collect`] selects torqueable classes from the symbol model.
//! 2. [`Run::build`] turns every candidate into a [`ClassRecord`].
//! 3. [`Run::emit`] writes one file per record and mirrors it to a preview.
//!
//! A fatal error in the build phase therefore leaves the output directory
//! untouched.

use std::io::Write;

use tracing::{debug, info};
use wrench_core::{ClassRecord, SymbolModel};

use crate::builder::build_class;
use crate::collect::{candidates, CandidateSet};
use crate::config::Conventions;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::OpsResult;
use crate::output::OutputDir;
use crate::responses::{preview_entry, GeneratedClass};

/// State of one generation run.
#[derive(Debug)]
pub struct Run<'m> {
    conventions: &'m Conventions,
    candidates: CandidateSet<'m>,
    diagnostics: Diagnostics,
}

impl<'m> Run<'m> {
    pub fn new(conventions: &'m Conventions) -> Self {
        Self {
            conventions,
            candidates: CandidateSet::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Collect the torqueable classes of `model`. Returns the number of
    /// candidates added.
    pub fn collect(&mut self, model: &'m SymbolModel) -> usize {
        info!("Searching torqueable classes...");
        let before = self.candidates.len();
        for candidate in candidates(model, self.conventions) {
            self.candidates.insert(candidate, &mut self.diagnostics);
        }
        self.candidates.len() - before
    }

    /// Build a record for every collected candidate, in collection order.
    pub fn build(&mut self) -> OpsResult<Vec<ClassRecord>> {
        info!("Processing torqueable classes...");
        let mut records = Vec::with_capacity(self.candidates.len());
        for candidate in self.candidates.iter() {
            debug!(class = candidate.name(), location = %candidate.source_location, "Processing class");
            records.push(build_class(candidate, self.conventions, &mut self.diagnostics)?);
        }
        Ok(records)
    }

    /// Write every record to `output` and its preview to `preview`.
    ///
    /// Each class is previewed before its file is opened, so a class whose
    /// file cannot be written still shows up. The failed write is reported
    /// and the class skipped.
    pub fn emit<W: Write>(
        &mut self,
        records: &[ClassRecord],
        output: &OutputDir,
        preview: &mut W,
    ) -> Vec<GeneratedClass> {
        info!("Generating Torque classes...");
        let mut generated = Vec::with_capacity(records.len());

        for record in records {
            let path = output.path_for(record);
            let entry = preview_entry(record, Some(&path));
            if let Err(e) = preview.write_all(entry.as_bytes()) {
                self.diagnostics.report(
                    DiagnosticKind::Io,
                    Some(&record.name),
                    format!("Failed to write preview: {e}"),
                );
            }

            let bytes = match output.write(record) {
                Ok(bytes) => bytes,
                Err(e) => {
                    self.diagnostics.report(
                        DiagnosticKind::Io,
                        Some(&record.name),
                        format!("Failed to write {}: {}", path.display(), e),
                    );
                    continue;
                }
            };

            generated.push(GeneratedClass {
                name: record.name.clone(),
                path,
                bytes,
            });
        }

        if let Err(e) = preview.flush() {
            self.diagnostics
                .report(DiagnosticKind::Io, None, format!("Failed to flush preview: {e}"));
        }
        generated
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// End the run, handing back what it reported.
    pub fn finish(self) -> Diagnostics {
        self.diagnostics
    }
}
