//! Inspect command implementation.
//!
//! Builds class records from symbol dumps and prints them without touching
//! the output directory.

use std::path::PathBuf;

use anyhow::Result;
use wrench_core::ClassRecord;
use wrench_ops::{InspectRequest, OpsContext};

use super::failure;

/// Output format for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Unknown format: {}. Use 'text' or 'json'", s),
        }
    }
}

/// Inspect the classes found in the given dumps.
pub fn execute(ctx: &OpsContext, inputs: Vec<PathBuf>, format: OutputFormat) -> Result<()> {
    let response = ctx
        .inspect(&InspectRequest::new(inputs))
        .map_err(|e| failure("Inspection", e))?;

    match format {
        OutputFormat::Text => {
            print!("{}", response.preview());
            println!();
            println!("{}", summary(&response.records));
            for diagnostic in &response.diagnostics {
                println!("  {diagnostic}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn summary(records: &[ClassRecord]) -> String {
    let fields: usize = records.iter().map(|r| r.fields.len()).sum();
    let annotations: usize = records.iter().map(|r| r.annotations.len()).sum();
    format!(
        "{} classes, {} fields, {} annotations",
        records.len(),
        fields,
        annotations
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrench_core::Field;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("md".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![
            ClassRecord::new("A", "a.h:1:7").with_field(Field::new("Smi", "x")),
            ClassRecord::new("B", "b.h:1:7"),
        ];
        assert_eq!(summary(&records), "2 classes, 1 fields, 0 annotations");
    }
}
