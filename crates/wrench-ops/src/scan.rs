//! Symbol dump discovery and loading.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use wrench_core::{SymbolModel, TranslationUnit};

use crate::error::{OpsError, OpsResult};

/// Resolve the inputs to a sorted list of symbol dumps.
///
/// Files are taken as given, whatever their name. Directories are walked
/// for files ending in `suffix`, skipping hidden and build directories.
pub fn find_symbol_dumps(inputs: &[PathBuf], suffix: &str) -> OpsResult<Vec<PathBuf>> {
    let mut dumps = Vec::new();

    for input in inputs {
        if input.is_file() {
            dumps.push(input.clone());
            continue;
        }
        if !input.is_dir() {
            return Err(OpsError::SymbolDumpRead {
                path: input.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            });
        }

        let before = dumps.len();
        for entry in WalkDir::new(input)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || (!is_hidden(e) && !is_blacklisted(e)))
        {
            let entry = entry.map_err(|e| walk_error(input, e))?;
            if entry.file_type().is_file() && has_suffix(entry.path(), suffix) {
                dumps.push(entry.into_path());
            }
        }
        debug!(input = %input.display(), found = dumps.len() - before, "Scanned directory");
    }

    if dumps.is_empty() {
        return Err(OpsError::NoInputs {
            inputs: inputs.to_vec(),
        });
    }

    dumps.sort();
    dumps.dedup();
    Ok(dumps)
}

/// Parse every dump into one model, units in the given order.
pub fn load_symbol_model(paths: &[PathBuf]) -> OpsResult<SymbolModel> {
    let units = paths
        .iter()
        .map(|path| load_unit(path))
        .collect::<OpsResult<Vec<_>>>()?;
    Ok(SymbolModel::new(units))
}

fn load_unit(path: &Path) -> OpsResult<TranslationUnit> {
    let contents = std::fs::read_to_string(path).map_err(|source| OpsError::SymbolDumpRead {
        path: path.to_path_buf(),
        source,
    })?;
    let unit = TranslationUnit::from_json(&contents).map_err(|source| {
        OpsError::SymbolDumpParse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), unit = %unit.path, decls = unit.decls.len(), "Loaded symbol dump");
    Ok(unit)
}

fn walk_error(input: &Path, error: walkdir::Error) -> OpsError {
    let path = error
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.to_path_buf());
    OpsError::SymbolDumpRead {
        path,
        source: error.into(),
    }
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.ends_with(suffix))
        .unwrap_or(false)
}

/// Check if entry is hidden (starts with .).
fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// Check if entry is a build or dependency directory.
fn is_blacklisted(entry: &walkdir::DirEntry) -> bool {
    const BLACKLIST: &[&str] = &["node_modules", "target", "third_party", "__pycache__", "venv"];

    entry
        .file_name()
        .to_str()
        .map(|s| BLACKLIST.contains(&s))
        .unwrap_or(false)
}
