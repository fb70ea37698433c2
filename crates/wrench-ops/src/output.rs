//! Writing generated classes to the output directory.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;
use wrench_core::ClassRecord;

use crate::config::normalize_output_dir;
use crate::error::OpsResult;
use crate::render::TorqueFile;

/// Destination directory for `.tq` files.
///
/// The directory must already exist; it is never created.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn new(root: impl AsRef<Path>) -> OpsResult<Self> {
        Ok(Self {
            root: normalize_output_dir(root.as_ref())?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<snake_case name>.tq`.
    pub fn path_for(&self, record: &ClassRecord) -> PathBuf {
        self.root.join(record.file_name())
    }

    /// Write (or overwrite) the file of one class. Returns the bytes written.
    pub fn write(&self, record: &ClassRecord) -> std::io::Result<u64> {
        let path = self.path_for(record);
        let contents = TorqueFile(record).to_string();

        let mut file = File::create(&path)?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;

        debug!(path = %path.display(), bytes = contents.len(), "Wrote Torque file");
        Ok(contents.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_file;
    use std::fs;
    use tempfile::TempDir;
    use wrench_core::Field;

    fn record() -> ClassRecord {
        ClassRecord::new("HeapNumber", "src/objects/heap-number.h:20:7")
            .extends("PrimitiveHeapObject")
            .with_field(Field::new("float64", "value"))
    }

    #[test]
    fn test_path_for_uses_snake_case() {
        let out = OutputDir::new("gen/objects/").unwrap();
        assert_eq!(out.root(), Path::new("gen/objects"));
        assert_eq!(
            out.path_for(&record()),
            PathBuf::from("gen/objects/heap_number.tq")
        );
    }

    #[test]
    fn test_write_replaces_existing_contents() {
        let temp = TempDir::new().unwrap();
        let out = OutputDir::new(temp.path()).unwrap();
        let path = out.path_for(&record());
        fs::write(&path, "stale contents that are longer than the new file ".repeat(20)).unwrap();

        let bytes = out.write(&record()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_file(&record()));
        assert_eq!(bytes, written.len() as u64);
    }

    #[test]
    fn test_missing_directory_is_not_created() {
        let temp = TempDir::new().unwrap();
        let out = OutputDir::new(temp.path().join("missing")).unwrap();

        assert!(out.write(&record()).is_err());
        assert!(!temp.path().join("missing").exists());
    }
}
