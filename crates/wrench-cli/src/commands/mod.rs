//! CLI command implementations.

pub mod config;
pub mod generate;
pub mod inspect;

use wrench_ops::OpsError;

/// Attach the failing action to an operation error. A broken invariant of
/// the input aborts before anything is written, and says so.
pub(crate) fn failure(action: &str, error: OpsError) -> anyhow::Error {
    let context = if error.is_invariant_violation() {
        format!("{action} aborted: the symbol dumps violate a class layout invariant")
    } else {
        format!("{action} failed")
    };
    anyhow::Error::new(error).context(context)
}
