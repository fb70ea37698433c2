//! Recoverable problems found while collecting, building and writing classes.
//!
//! Every diagnostic is logged when reported and kept for the caller, so a
//! run can finish and still say what it skipped.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Category of a recoverable problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The same declaration was collected twice; the second sighting is dropped.
    DuplicateCandidate,
    /// An annotation, field, friend or base did not have the expected shape.
    ShapeMismatch,
    /// A recognized construct the generator does not handle.
    UnsupportedKind,
    /// An output file could not be written.
    Io,
}

impl DiagnosticKind {
    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::DuplicateCandidate => "duplicate candidate",
            DiagnosticKind::ShapeMismatch => "shape mismatch",
            DiagnosticKind::UnsupportedKind => "unsupported kind",
            DiagnosticKind::Io => "io",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Class being processed, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.class {
            Some(class) => write!(f, "[{}] {}: {}", self.kind, class, self.message),
            None => write!(f, "[{}] {}", self.kind, self.message),
        }
    }
}

/// Ordered collection of diagnostics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log a problem.
    pub fn report(
        &mut self,
        kind: DiagnosticKind,
        class: Option<&str>,
        message: impl Into<String>,
    ) {
        let diagnostic = Diagnostic {
            kind,
            class: class.map(str::to_string),
            message: message.into(),
        };
        warn!(kind = %diagnostic.kind, class = diagnostic.class.as_deref().unwrap_or("-"), "{}", diagnostic.message);
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Class-scoped reporter handed to the per-class extraction steps.
pub struct ClassReporter<'d> {
    class: &'d str,
    diagnostics: &'d mut Diagnostics,
}

impl<'d> ClassReporter<'d> {
    pub fn new(class: &'d str, diagnostics: &'d mut Diagnostics) -> Self {
        Self { class, diagnostics }
    }

    pub fn class(&self) -> &str {
        self.class
    }

    pub fn shape_mismatch(&mut self, message: impl Into<String>) {
        self.diagnostics
            .report(DiagnosticKind::ShapeMismatch, Some(self.class), message);
    }

    pub fn unsupported(&mut self, message: impl Into<String>) {
        self.diagnostics
            .report(DiagnosticKind::UnsupportedKind, Some(self.class), message);
    }
}
