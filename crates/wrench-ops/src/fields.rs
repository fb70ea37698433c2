//! Field inference from `k<Name>Offset` constants.
//!
//! A static data member such as
//!
//! ```text
//! static constexpr Field<Smi>::Offset kHashFieldOffset = ...;
//! ```
//!
//! declares a field `hash_field: Smi`. The constant's value is never read.

use tracing::debug;
use wrench_core::{to_snake_case, BuiltinKind, Decl, Field, RecordDecl, TemplateArg, Type};

use crate::config::Conventions;
use crate::diagnostics::ClassReporter;
use crate::error::{OpsError, OpsResult};

const OFFSET_PREFIX: &str = "k";
const OFFSET_SUFFIX: &str = "Offset";

/// Torque alias for a C++ `double`.
pub const FLOAT64: &str = "float64";

/// `kFooBarOffset` -> `FooBar`.
pub fn offset_stem(identifier: &str) -> Option<&str> {
    identifier
        .strip_prefix(OFFSET_PREFIX)?
        .strip_suffix(OFFSET_SUFFIX)
}

/// `kFooBarOffset` -> `foo_bar`.
pub fn offset_field_name(identifier: &str) -> Option<String> {
    offset_stem(identifier).map(to_snake_case)
}

/// `_Smi` -> `Smi`. Exactly one leading underscore is removed.
pub fn strip_alias_underscore(ty: &str) -> &str {
    ty.strip_prefix('_').unwrap_or(ty)
}

/// Extract the fields of a class from its direct members, in declaration order.
///
/// Members that do not follow the offset-constant convention are ignored
/// silently. A field whose type cannot be expressed is reported and skipped,
/// except for builtins other than `double`, which abort the run.
pub fn extract_fields(
    record: &RecordDecl,
    conventions: &Conventions,
    reporter: &mut ClassReporter<'_>,
) -> OpsResult<Vec<Field>> {
    let mut fields = Vec::new();

    for member in &record.members {
        let Some(var) = member.as_var() else {
            continue;
        };
        if !var.is_static() {
            continue;
        }
        let Some(stem) = offset_stem(&member.name) else {
            continue;
        };
        let Some(field_args) = field_template_args(&var.ty, &conventions.field_template) else {
            continue;
        };
        let Some(first) = field_args.first() else {
            continue;
        };
        if stem.is_empty() {
            reporter.shape_mismatch(format!(
                "Declaration '{}' does not name a field",
                member.name
            ));
            continue;
        }

        let Some(ty) = resolve_field_type(member, first, reporter)? else {
            continue;
        };

        let field = Field::new(strip_alias_underscore(&ty), to_snake_case(stem));
        debug!(class = reporter.class(), field = %field.name, ty = %field.ty, "field");
        fields.push(field);
    }

    Ok(fields)
}

/// Arguments of `Field<...>` when `ty` is spelled `Field<...>::Something`.
fn field_template_args<'t>(ty: &'t Type, field_template: &str) -> Option<&'t [TemplateArg]> {
    let elaborated = ty.unqualified().as_elaborated()?;
    let spec = elaborated.qualifier.as_deref()?.as_template_specialization()?;
    (spec.template.name == field_template).then_some(spec.args.as_slice())
}

fn resolve_field_type(
    member: &Decl,
    arg: &TemplateArg,
    reporter: &mut ClassReporter<'_>,
) -> OpsResult<Option<String>> {
    let Some(ty) = arg.as_type() else {
        reporter.shape_mismatch(format!(
            "Field argument '{arg}' of declaration '{}' is not a type",
            member.name
        ));
        return Ok(None);
    };
    let ty = ty.unqualified();

    if let Some(record) = ty.as_record() {
        if record.name.is_empty() {
            reporter.shape_mismatch(format!(
                "Type '{ty}' of declaration '{}' is an anonymous record",
                member.name
            ));
            return Ok(None);
        }
        return Ok(Some(record.name.clone()));
    }

    if let Some(builtin) = ty.as_builtin() {
        return match builtin {
            BuiltinKind::Double => Ok(Some(FLOAT64.to_string())),
            other => Err(OpsError::UnsupportedBuiltin {
                class: reporter.class().to_string(),
                member: member.name.clone(),
                builtin: other,
            }),
        };
    }

    reporter.unsupported(format!(
        "Type '{ty}' of declaration '{}' cannot be handled",
        member.name
    ));
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticKind, Diagnostics};
    use crate::fixtures::*;
    use wrench_core::{DeclKind, PointerType, StorageClass, TemplateName};

    fn record_of(members: Vec<Decl>) -> RecordDecl {
        match class_decl(1, "Foo", vec![], members).kind {
            DeclKind::Record(record) => record,
            other => panic!("Expected record, got {:?}", other),
        }
    }

    fn extract(members: Vec<Decl>) -> (OpsResult<Vec<Field>>, Diagnostics) {
        let record = record_of(members);
        let mut diagnostics = Diagnostics::new();
        let fields = {
            let mut reporter = ClassReporter::new("Foo", &mut diagnostics);
            extract_fields(&record, &Conventions::default(), &mut reporter)
        };
        (fields, diagnostics)
    }

    #[test]
    fn test_offset_field_name() {
        assert_eq!(offset_field_name("kFooBarOffset").as_deref(), Some("foo_bar"));
        assert_eq!(offset_field_name("kValueOffset").as_deref(), Some("value"));
        assert_eq!(offset_field_name("kHeaderSize"), None);
        assert_eq!(offset_field_name("ValueOffset"), None);
    }

    #[test]
    fn test_strip_alias_underscore() {
        assert_eq!(strip_alias_underscore("_Smi"), "Smi");
        assert_eq!(strip_alias_underscore("Smi"), "Smi");
        assert_eq!(strip_alias_underscore("__Smi"), "_Smi");
    }

    #[test]
    fn test_extracts_fields_in_declaration_order() {
        let (fields, diagnostics) = extract(vec![
            offset_constant("kValueOffset", class_type("Smi")),
            offset_constant("kWeightOffset", Type::builtin(BuiltinKind::Double)),
            offset_constant("kRawHashOffset", class_type("_Uint32T")),
        ]);

        assert!(diagnostics.is_empty());
        assert_eq!(
            fields.unwrap(),
            vec![
                Field::new("Smi", "value"),
                Field::new("float64", "weight"),
                Field::new("Uint32T", "raw_hash"),
            ]
        );
    }

    #[test]
    fn test_ignores_members_outside_the_convention() {
        let field_ty = field_offset_type(class_type("Smi"));
        let (fields, diagnostics) = extract(vec![
            // Not static.
            var("kValueOffset", field_ty.clone(), StorageClass::None),
            // Wrong name.
            static_var("kHeaderSize", field_ty.clone()),
            // Not elaborated.
            static_var("kPlainOffset", Type::builtin(BuiltinKind::Int)),
            // Not the Field template.
            static_var(
                "kOtherOffset",
                Type::elaborated(
                    Some(Type::specialization(
                        TemplateName::new("Slot"),
                        vec![TemplateArg::ty(class_type("Smi"))],
                    )),
                    Type::builtin(BuiltinKind::Int),
                ),
            ),
            // Field without arguments.
            static_var(
                "kEmptyOffset",
                Type::elaborated(
                    Some(Type::specialization(TemplateName::new("Field"), vec![])),
                    Type::builtin(BuiltinKind::Int),
                ),
            ),
            marker_friend(vec![]),
        ]);

        assert!(fields.unwrap().is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unhandled_type_kind_is_reported_and_skipped() {
        let pointer = Type::Pointer(PointerType {
            pointee: Box::new(class_type("Object")),
        });
        let (fields, diagnostics) = extract(vec![
            offset_constant("kRawOffset", pointer),
            offset_constant("kNextOffset", class_type("Object")),
        ]);

        assert_eq!(fields.unwrap(), vec![Field::new("Object", "next")]);
        assert_eq!(diagnostics.count(DiagnosticKind::UnsupportedKind), 1);
    }

    #[test]
    fn test_non_type_field_argument_is_reported() {
        let ty = Type::elaborated(
            Some(Type::specialization(
                TemplateName::new("Field"),
                vec![TemplateArg::integral(8)],
            )),
            Type::builtin(BuiltinKind::Int),
        );
        let (fields, diagnostics) = extract(vec![static_var("kSizeOffset", ty)]);

        assert!(fields.unwrap().is_empty());
        assert_eq!(diagnostics.count(DiagnosticKind::ShapeMismatch), 1);
    }

    #[test]
    fn test_other_builtin_is_fatal() {
        let (fields, _) = extract(vec![
            offset_constant("kValueOffset", class_type("Smi")),
            offset_constant("kLengthOffset", Type::builtin(BuiltinKind::Int)),
        ]);

        match fields {
            Err(OpsError::UnsupportedBuiltin {
                class,
                member,
                builtin,
            }) => {
                assert_eq!(class, "Foo");
                assert_eq!(member, "kLengthOffset");
                assert_eq!(builtin, BuiltinKind::Int);
            }
            other => panic!("Expected UnsupportedBuiltin, got {:?}", other),
        }
    }

    #[test]
    fn test_const_qualified_double_maps_to_float64() {
        let (fields, _) = extract(vec![offset_constant(
            "kValueOffset",
            Type::constant(Type::typedef("double_t", Type::builtin(BuiltinKind::Double))),
        )]);
        assert_eq!(fields.unwrap(), vec![Field::new("float64", "value")]);
    }

    #[test]
    fn test_bare_offset_name_is_reported() {
        let (fields, diagnostics) = extract(vec![offset_constant("kOffset", class_type("Smi"))]);
        assert!(fields.unwrap().is_empty());
        assert_eq!(diagnostics.count(DiagnosticKind::ShapeMismatch), 1);
    }

    #[test]
    fn test_bare_offset_name_never_resolves_its_type() {
        let (fields, diagnostics) = extract(vec![
            offset_constant("kOffset", Type::builtin(BuiltinKind::Int)),
            offset_constant("kValueOffset", class_type("Smi")),
        ]);
        assert_eq!(fields.unwrap(), vec![Field::new("Smi", "value")]);
        assert_eq!(diagnostics.count(DiagnosticKind::ShapeMismatch), 1);
    }
}
