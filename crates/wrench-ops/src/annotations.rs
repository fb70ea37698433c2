//! Decoding of the annotation list carried by the friend marker.
//!
//! `friend tq::Torque<tq::GenerateCppClass, tq::Reserve<3, 7>>;` encodes the
//! annotations `@generateCppClass` and `@reserve(3, 7)`: one record type per
//! annotation, with integral template arguments as annotation arguments.

use tracing::debug;
use wrench_core::{ClassAnnotation, TemplateArg, TemplateSpecializationType};

use crate::config::Conventions;
use crate::diagnostics::ClassReporter;

/// Decode every annotation of a marker specialization, in order.
///
/// A specialization of some other template yields no annotations. Malformed
/// entries are reported and skipped without affecting their siblings.
pub fn decode_annotations(
    container: &TemplateSpecializationType,
    conventions: &Conventions,
    reporter: &mut ClassReporter<'_>,
) -> Vec<ClassAnnotation> {
    if container.template.name != conventions.marker_name {
        reporter.shape_mismatch(format!(
            "Not a '{}' marker: {}",
            conventions.marker_name,
            container.template.qualified_name()
        ));
        return Vec::new();
    }

    debug!(class = reporter.class(), count = container.args.len(), "Annotations");
    container
        .args
        .iter()
        .filter_map(|arg| decode_annotation(arg, conventions, reporter))
        .collect()
}

fn decode_annotation(
    arg: &TemplateArg,
    conventions: &Conventions,
    reporter: &mut ClassReporter<'_>,
) -> Option<ClassAnnotation> {
    let spelling = arg.to_string();

    let Some(ty) = arg.as_type() else {
        reporter.shape_mismatch(format!(
            "Class annotation '{spelling}' is a {} argument, not a type",
            arg.kind_name()
        ));
        return None;
    };

    let Some(record) = ty.as_record() else {
        reporter.shape_mismatch(format!("Class annotation '{spelling}' is not a record"));
        return None;
    };

    if record.innermost_namespace().unwrap_or_default() != conventions.annotation_namespace {
        reporter.shape_mismatch(format!(
            "Class annotation '{spelling}' is not in '{}' namespace",
            conventions.annotation_namespace
        ));
        return None;
    }

    let mut annotation = ClassAnnotation::new(record.name.as_str());
    for (index, arg) in record.template_args.iter().enumerate() {
        match arg {
            TemplateArg::Integral { value } => {
                debug!(index, value = %value, "integral argument");
                annotation.arguments.push(value.to_string());
            }
            other => {
                reporter.unsupported(format!(
                    "Class annotation '{spelling}' contains unexpected template argument kind: {}",
                    other.kind_name()
                ));
                break;
            }
        }
    }

    debug!(name = %annotation.name, arguments = ?annotation.arguments, "annotation");
    Some(annotation)
}
