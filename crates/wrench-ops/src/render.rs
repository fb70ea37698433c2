//! Torque text rendering.
//!
//! ```text
//! @generateCppClass
//! @reserve(3, 7)
//! class HeapNumber extends PrimitiveHeapObject {
//!   value: float64;
//! }
//! ```
//!
//! Output depends only on the record, so rendering the same record twice
//! produces identical bytes.

use std::fmt;

use wrench_core::{to_camel_case, ClassRecord};

/// Name written into the provenance header.
pub const GENERATOR_NAME: &str = "v8-wrench";

/// The annotation and class body of a record, as used for previews.
#[derive(Debug, Clone, Copy)]
pub struct TorqueClass<'a>(pub &'a ClassRecord);

/// A complete generated file: provenance header followed by the class.
#[derive(Debug, Clone, Copy)]
pub struct TorqueFile<'a>(pub &'a ClassRecord);

impl fmt::Display for TorqueClass<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = self.0;

        for annotation in &class.annotations {
            write!(f, "@{}", to_camel_case(&annotation.name))?;
            if !annotation.arguments.is_empty() {
                write!(f, "({})", annotation.arguments.join(", "))?;
            }
            writeln!(f)?;
        }

        write!(f, "class {}", class.name)?;
        if let Some(base) = &class.base_class {
            write!(f, " extends {base}")?;
        }
        writeln!(f, " {{")?;

        for field in &class.fields {
            writeln!(f, "  {}: {};", field.name, field.ty)?;
        }

        writeln!(f, "}}")
    }
}

impl fmt::Display for TorqueFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_file_header(f, &self.0.source_location)?;
        write!(f, "{}", TorqueClass(self.0))
    }
}

fn write_file_header(f: &mut fmt::Formatter<'_>, source_location: &str) -> fmt::Result {
    writeln!(f, "// This file is automatically generated by {GENERATOR_NAME}.")?;
    writeln!(f, "//")?;
    writeln!(
        f,
        "// WARNING: All modifications to this file will be lost with the next build!"
    )?;
    writeln!(f, "//")?;
    writeln!(f, "// Source file: {source_location}")?;
    writeln!(f, "//")?;
    writeln!(f)
}

/// Render the class body without a header.
pub fn render_class(record: &ClassRecord) -> String {
    TorqueClass(record).to_string()
}

/// Render the full file contents written to disk.
pub fn render_file(record: &ClassRecord) -> String {
    TorqueFile(record).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrench_core::{ClassAnnotation, Field};

    #[test]
    fn test_annotations_without_fields() {
        let record = ClassRecord::new("X", "x.h:1:7")
            .with_annotation(ClassAnnotation::new("A"))
            .with_annotation(ClassAnnotation::new("B").with_argument("3").with_argument("7"));

        // Annotation names go through camelCase, so `A` is written `@a`.
        assert_eq!(render_class(&record), "@a\n@b(3, 7)\nclass X {\n}\n");
    }

    #[test]
    fn test_base_and_fields() {
        let record = ClassRecord::new("X", "x.h:1:7")
            .extends("Y")
            .with_field(Field::new("Smi", "value"))
            .with_field(Field::new("float64", "weight"));

        assert_eq!(
            render_class(&record),
            "class X extends Y {\n  value: Smi;\n  weight: float64;\n}\n"
        );
    }

    #[test]
    fn test_annotation_names_are_camel_cased() {
        let record = ClassRecord::new("Foo", "foo.h:1:7")
            .with_annotation(ClassAnnotation::new("GenerateCppClass"))
            .with_annotation(ClassAnnotation::new("do_not_generate_cast"));

        assert_eq!(
            render_class(&record),
            "@generateCppClass\n@doNotGenerateCast\nclass Foo {\n}\n"
        );
    }

    #[test]
    fn test_file_has_provenance_header() {
        let record = ClassRecord::new("HeapNumber", "src/objects/heap-number.h:20:7")
            .extends("PrimitiveHeapObject")
            .with_field(Field::new("float64", "value"));

        let expected = "\
// This file is automatically generated by v8-wrench.
//
// WARNING: All modifications to this file will be lost with the next build!
//
// Source file: src/objects/heap-number.h:20:7
//

class HeapNumber extends PrimitiveHeapObject {
  value: float64;
}
";
        assert_eq!(render_file(&record), expected);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let record = ClassRecord::new("Foo", "foo.h:1:7")
            .with_annotation(ClassAnnotation::new("A").with_argument("1"))
            .with_field(Field::new("Smi", "a"))
            .with_field(Field::new("Smi", "b"));

        assert_eq!(render_file(&record), render_file(&record.clone()));
    }
}
