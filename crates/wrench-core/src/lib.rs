//! Core domain types shared across the v8-wrench workspace.
//!
//! Two halves live here: the [`symbol`] model handed over by the C++
//! front-end, and the [`ClassRecord`] family that the generator builds from
//! it and renders into Torque class files.

use serde::{Deserialize, Serialize};

pub mod naming;
pub mod symbol;

pub use naming::{to_camel_case, to_snake_case};
pub use symbol::{
    BaseSpecifier, BuiltinKind, BuiltinType, Decl, DeclId, DeclKind, Declarations,
    ElaboratedType, FriendDecl, NamespaceDecl, OtherType, PointerType, QualifiedType, RecordDecl,
    RecordTag, RecordType, ScopedDecl, SourceLocation, StorageClass, SymbolModel, TemplateArg,
    TemplateName, TemplateSpecializationType, TranslationUnit, Type, TypedefType, VarDecl,
};

// =============================================================================
// Class Records
// =============================================================================

/// A decoded class annotation, e.g. `@GenerateCppClass` or `@Reserve(3, 7)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAnnotation {
    /// Record name of the annotation as written in C++ (`GenerateCppClass`).
    pub name: String,
    /// Integral arguments rendered as decimal text, in declaration order.
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl ClassAnnotation {
    /// Create an annotation without arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Append an argument.
    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }
}

/// A field inferred from a `k<Name>Offset` constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Torque type, either a class name or a builtin alias such as `float64`.
    #[serde(rename = "type")]
    pub ty: String,
    /// snake_case field name.
    pub name: String,
}

impl Field {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// Everything the renderer needs to know about one generated class.
///
/// Records are populated once by the builder and are read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Class name as declared.
    pub name: String,
    /// The single base class, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_class: Option<String>,
    /// Annotations in declaration order.
    #[serde(default)]
    pub annotations: Vec<ClassAnnotation>,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// `file:line:column` of the declaration, for provenance only.
    pub source_location: String,
}

impl ClassRecord {
    /// Create a record with no base, annotations or fields.
    pub fn new(name: impl Into<String>, source_location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_location: source_location.into(),
            ..Self::default()
        }
    }

    /// Set the base class.
    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.base_class = Some(base.into());
        self
    }

    /// Append an annotation.
    pub fn with_annotation(mut self, annotation: ClassAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Append a field.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Name of the generated file, `<snake_case(name)>.tq`.
    pub fn file_name(&self) -> String {
        format!("{}.tq", to_snake_case(&self.name))
    }
}
