//! v8-wrench Operations Layer
//!
//! This crate turns symbol dumps of V8's C++ object headers into Torque
//! class definitions. It can be consumed by the CLI or by build tooling,
//! ensuring consistent behavior and type-safe interactions.
//!
//! ## Architecture
//!
//! - **Requests**: Typed input DTOs for each operation
//! - **Responses**: Typed output DTOs with all relevant data
//! - **OpsContext**: The main service that executes operations
//! - **Run**: The collect, build and emit phases of one generation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wrench_ops::{Config, GenerateRequest, OpsContext};
//!
//! fn main() -> Result<(), wrench_ops::OpsError> {
//!     let ctx = OpsContext::new(Config::load()?);
//!
//!     let request = GenerateRequest::new(["out/symbols"]);
//!     let response = ctx.generate(&request, &mut std::io::stdout())?;
//!
//!     println!("Wrote {} Torque classes", response.written_count());
//!     Ok(())
//! }
//! ```

mod annotations;
mod builder;
mod collect;
mod config;
mod context;
mod diagnostics;
mod error;
mod fields;
mod output;
mod render;
mod requests;
mod responses;
mod run;
mod scan;

#[cfg(test)]
mod fixtures;

// Re-export public API
pub use annotations::decode_annotations;
pub use builder::build_class;
pub use collect::{candidates, is_torqueable, matches_qualified_name, Candidate, CandidateSet};
pub use config::{normalize_output_dir, Config, Conventions, CONFIG_KEYS};
pub use context::OpsContext;
pub use diagnostics::{ClassReporter, Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{OpsError, OpsResult};
pub use fields::{extract_fields, offset_field_name, strip_alias_underscore, FLOAT64};
pub use output::OutputDir;
pub use render::{render_class, render_file, TorqueClass, TorqueFile, GENERATOR_NAME};
pub use requests::*;
pub use responses::*;
pub use run::Run;
pub use scan::{find_symbol_dumps, load_symbol_model};
