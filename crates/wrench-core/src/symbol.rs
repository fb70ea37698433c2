//! Declarative symbol model produced by the C++ front-end.
//!
//! The front-end (a clang-based dumper that is not part of this workspace)
//! parses the sources, resolves types, templates and namespaces, and writes
//! one [`TranslationUnit`] per analyzed file as JSON. The generator only
//! reads this model; it never mutates it.
//!
//! Kinds of declarations and types are closed sum types so that every
//! consumer matches them exhaustively.

use std::fmt;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

// =============================================================================
// Identity and Locations
// =============================================================================

/// Identity of a declaration.
///
/// The front-end assigns the same id to the same declaration even when it is
/// reached from several translation units (e.g. a header included twice).
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DeclId(pub u64);

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position of a declaration in the source tree.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

// =============================================================================
// Translation Units
// =============================================================================

/// Declarations of one parsed source file.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TranslationUnit {
    /// Main source file of the unit.
    pub path: String,
    /// Top-level declarations in source order.
    #[serde(default)]
    pub decls: Vec<Decl>,
}

impl TranslationUnit {
    pub fn new(path: impl Into<String>, decls: Vec<Decl>) -> Self {
        Self {
            path: path.into(),
            decls,
        }
    }

    /// Parse a unit from its JSON dump.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// All translation units under analysis.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SymbolModel {
    pub units: Vec<TranslationUnit>,
}

impl SymbolModel {
    pub fn new(units: Vec<TranslationUnit>) -> Self {
        Self { units }
    }

    /// Walk every declaration of every unit, depth first, in source order.
    ///
    /// Each call starts a fresh walk.
    pub fn declarations(&self) -> Declarations<'_> {
        Declarations {
            units: self.units.iter(),
            stack: Vec::new(),
        }
    }

    /// Number of declarations reachable through [`Self::declarations`].
    pub fn decl_count(&self) -> usize {
        self.declarations().count()
    }
}

// =============================================================================
// Declarations
// =============================================================================

/// A named declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decl {
    pub id: DeclId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: SourceLocation,
    #[serde(flatten)]
    pub kind: DeclKind,
}

impl Decl {
    pub fn new(id: u64, name: impl Into<String>, location: SourceLocation, kind: DeclKind) -> Self {
        Self {
            id: DeclId(id),
            name: name.into(),
            location,
            kind,
        }
    }

    pub fn as_record(&self) -> Option<&RecordDecl> {
        match &self.kind {
            DeclKind::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_var(&self) -> Option<&VarDecl> {
        match &self.kind {
            DeclKind::Var(var) => Some(var),
            _ => None,
        }
    }

    pub fn as_friend(&self) -> Option<&FriendDecl> {
        match &self.kind {
            DeclKind::Friend(friend) => Some(friend),
            _ => None,
        }
    }
}

/// Kind-specific part of a declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclKind {
    Namespace(NamespaceDecl),
    /// `class`, `struct` or `union`, including template specializations.
    Record(RecordDecl),
    Var(VarDecl),
    Friend(FriendDecl),
    /// Anything the generator has no use for (functions, enums, aliases...).
    Other,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NamespaceDecl {
    #[serde(default)]
    pub decls: Vec<Decl>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordTag {
    #[default]
    Class,
    Struct,
    Union,
}

/// A class, struct or union declaration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RecordDecl {
    #[serde(default)]
    pub tag: RecordTag,
    /// Direct base specifiers in declaration order.
    #[serde(default)]
    pub bases: Vec<BaseSpecifier>,
    /// Direct member declarations in declaration order, friends included.
    #[serde(default)]
    pub members: Vec<Decl>,
    /// Arguments when this record is a class template specialization.
    #[serde(default)]
    pub template_args: Vec<TemplateArg>,
}

impl RecordDecl {
    /// Whether this is a `class` or `struct` (not a `union`).
    pub fn is_class_or_struct(&self) -> bool {
        matches!(self.tag, RecordTag::Class | RecordTag::Struct)
    }

    /// Direct friend declarations.
    pub fn friends(&self) -> impl Iterator<Item = &FriendDecl> {
        self.members.iter().filter_map(Decl::as_friend)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseSpecifier {
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default)]
    pub is_virtual: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageClass {
    #[default]
    None,
    Static,
    Extern,
}

/// A variable; inside a record with `static` storage it is a static data member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarDecl {
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default)]
    pub storage: StorageClass,
}

impl VarDecl {
    pub fn is_static(&self) -> bool {
        self.storage == StorageClass::Static
    }
}

/// `friend T;` or `friend void f();`. Only friend types carry a type.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FriendDecl {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<Type>,
}

// =============================================================================
// Declaration Walker
// =============================================================================

/// A declaration together with its enclosing namespace chain.
#[derive(Debug, Clone)]
pub struct ScopedDecl<'a> {
    pub decl: &'a Decl,
    /// Enclosing namespaces, outermost first.
    pub namespaces: Vec<&'a str>,
}

/// Depth-first, pre-order walk over a [`SymbolModel`].
///
/// Namespaces and records are yielded before their contents.
#[derive(Debug, Clone)]
pub struct Declarations<'a> {
    units: std::slice::Iter<'a, TranslationUnit>,
    stack: Vec<Frame<'a>>,
}

#[derive(Debug, Clone)]
struct Frame<'a> {
    decls: std::slice::Iter<'a, Decl>,
    namespace: Option<&'a str>,
}

impl<'a> Iterator for Declarations<'a> {
    type Item = ScopedDecl<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(frame) = self.stack.last_mut() else {
                let unit = self.units.next()?;
                self.stack.push(Frame {
                    decls: unit.decls.iter(),
                    namespace: None,
                });
                continue;
            };

            let Some(decl) = frame.decls.next() else {
                self.stack.pop();
                continue;
            };

            let namespaces = self.stack.iter().filter_map(|f| f.namespace).collect();
            match &decl.kind {
                DeclKind::Namespace(ns) => self.stack.push(Frame {
                    decls: ns.decls.iter(),
                    namespace: Some(decl.name.as_str()),
                }),
                DeclKind::Record(record) => self.stack.push(Frame {
                    decls: record.members.iter(),
                    namespace: None,
                }),
                DeclKind::Var(_) | DeclKind::Friend(_) | DeclKind::Other => {}
            }
            return Some(ScopedDecl { decl, namespaces });
        }
    }
}

// =============================================================================
// Types
// =============================================================================

/// A C++ type as resolved by the front-end.
///
/// Sugar (elaborated names, typedefs, alias templates, cv-qualifiers) is kept
/// so that consumers can match the written shape; [`Type::desugar`] and
/// friends strip it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Record(RecordType),
    Builtin(BuiltinType),
    TemplateSpecialization(TemplateSpecializationType),
    /// A name written with a keyword or qualifier, e.g. `tq::Torque<...>` or
    /// `Field<Smi>::Offset`.
    Elaborated(ElaboratedType),
    Qualified(QualifiedType),
    Typedef(TypedefType),
    Pointer(PointerType),
    Other(OtherType),
}

/// Reference to a class, struct or union.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordType {
    pub name: String,
    /// Enclosing namespaces, outermost first.
    #[serde(default)]
    pub scope: Vec<String>,
    /// Arguments when the record is a class template specialization.
    #[serde(default)]
    pub template_args: Vec<TemplateArg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decl: Option<DeclId>,
}

impl RecordType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn in_scope<I, S>(mut self, scope: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = scope.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_template_args(mut self, args: Vec<TemplateArg>) -> Self {
        self.template_args = args;
        self
    }

    /// `ns::inner::Name`.
    pub fn qualified_name(&self) -> String {
        qualify(&self.scope, &self.name)
    }

    /// The nearest enclosing namespace.
    pub fn innermost_namespace(&self) -> Option<&str> {
        self.scope.last().map(String::as_str)
    }

    pub fn is_specialization(&self) -> bool {
        !self.template_args.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinType {
    pub builtin: BuiltinKind,
}

/// Builtin (fundamental) types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinKind {
    Void,
    Bool,
    Char,
    SignedChar,
    UnsignedChar,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Float,
    Double,
    LongDouble,
    NullPtr,
    #[serde(other)]
    Unknown,
}

impl BuiltinKind {
    /// C++ spelling.
    pub fn spelling(&self) -> &'static str {
        match self {
            BuiltinKind::Void => "void",
            BuiltinKind::Bool => "bool",
            BuiltinKind::Char => "char",
            BuiltinKind::SignedChar => "signed char",
            BuiltinKind::UnsignedChar => "unsigned char",
            BuiltinKind::Short => "short",
            BuiltinKind::UnsignedShort => "unsigned short",
            BuiltinKind::Int => "int",
            BuiltinKind::UnsignedInt => "unsigned int",
            BuiltinKind::Long => "long",
            BuiltinKind::UnsignedLong => "unsigned long",
            BuiltinKind::LongLong => "long long",
            BuiltinKind::UnsignedLongLong => "unsigned long long",
            BuiltinKind::Float => "float",
            BuiltinKind::Double => "double",
            BuiltinKind::LongDouble => "long double",
            BuiltinKind::NullPtr => "std::nullptr_t",
            BuiltinKind::Unknown => "<unknown builtin>",
        }
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Name of a class or alias template.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateName {
    pub name: String,
    #[serde(default)]
    pub scope: Vec<String>,
}

impl TemplateName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: Vec::new(),
        }
    }

    pub fn qualified_name(&self) -> String {
        qualify(&self.scope, &self.name)
    }
}

/// `Template<Args...>` as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSpecializationType {
    pub template: TemplateName,
    #[serde(default)]
    pub args: Vec<TemplateArg>,
    /// The type this specialization stands for, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desugared: Option<Box<Type>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElaboratedType {
    /// Nested-name qualifier, e.g. `Field<Smi>` in `Field<Smi>::Offset`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<Box<Type>>,
    pub named: Box<Type>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifiedType {
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_volatile: bool,
    pub inner: Box<Type>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedefType {
    pub name: String,
    pub underlying: Box<Type>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerType {
    pub pointee: Box<Type>,
}

/// Types the model does not distinguish (functions, arrays, member pointers...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherType {
    pub spelling: String,
}

impl Type {
    pub fn record(record: RecordType) -> Self {
        Type::Record(record)
    }

    pub fn builtin(builtin: BuiltinKind) -> Self {
        Type::Builtin(BuiltinType { builtin })
    }

    pub fn specialization(template: TemplateName, args: Vec<TemplateArg>) -> Self {
        Type::TemplateSpecialization(TemplateSpecializationType {
            template,
            args,
            desugared: None,
        })
    }

    pub fn elaborated(qualifier: Option<Type>, named: Type) -> Self {
        Type::Elaborated(ElaboratedType {
            qualifier: qualifier.map(Box::new),
            named: Box::new(named),
        })
    }

    pub fn constant(inner: Type) -> Self {
        Type::Qualified(QualifiedType {
            is_const: true,
            is_volatile: false,
            inner: Box::new(inner),
        })
    }

    pub fn typedef(name: impl Into<String>, underlying: Type) -> Self {
        Type::Typedef(TypedefType {
            name: name.into(),
            underlying: Box::new(underlying),
        })
    }

    /// Remove one layer of sugar. Non-sugar types return themselves.
    pub fn desugar(&self) -> &Type {
        match self {
            Type::Elaborated(elaborated) => &elaborated.named,
            Type::Typedef(typedef) => &typedef.underlying,
            Type::TemplateSpecialization(spec) => spec.desugared.as_deref().unwrap_or(self),
            Type::Record(_)
            | Type::Builtin(_)
            | Type::Qualified(_)
            | Type::Pointer(_)
            | Type::Other(_) => self,
        }
    }

    /// Strip outer cv-qualifiers, keeping any sugar underneath.
    pub fn unqualified(&self) -> &Type {
        let mut ty = self;
        while let Type::Qualified(qualified) = ty {
            ty = &qualified.inner;
        }
        ty
    }

    /// Strip all cv-qualifiers and sugar.
    pub fn unqualified_desugared(&self) -> &Type {
        let mut ty = self;
        loop {
            let next = ty.unqualified().desugar();
            if std::ptr::eq(next, ty) {
                return ty;
            }
            ty = next;
        }
    }

    /// The record this type names, looking through sugar and qualifiers.
    pub fn as_record(&self) -> Option<&RecordType> {
        match self.unqualified_desugared() {
            Type::Record(record) => Some(record),
            _ => None,
        }
    }

    /// The builtin this type names, looking through sugar and qualifiers.
    pub fn as_builtin(&self) -> Option<BuiltinKind> {
        match self.unqualified_desugared() {
            Type::Builtin(builtin) => Some(builtin.builtin),
            _ => None,
        }
    }

    pub fn as_elaborated(&self) -> Option<&ElaboratedType> {
        match self {
            Type::Elaborated(elaborated) => Some(elaborated),
            _ => None,
        }
    }

    pub fn as_template_specialization(&self) -> Option<&TemplateSpecializationType> {
        match self {
            Type::TemplateSpecialization(spec) => Some(spec),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Record(record) => {
                f.write_str(&record.qualified_name())?;
                if record.is_specialization() {
                    write_args(f, &record.template_args)?;
                }
                Ok(())
            }
            Type::Builtin(builtin) => f.write_str(builtin.builtin.spelling()),
            Type::TemplateSpecialization(spec) => {
                f.write_str(&spec.template.qualified_name())?;
                write_args(f, &spec.args)
            }
            Type::Elaborated(elaborated) => match &elaborated.qualifier {
                Some(qualifier) => write!(f, "{}::{}", qualifier, elaborated.named),
                None => write!(f, "{}", elaborated.named),
            },
            Type::Qualified(qualified) => {
                if qualified.is_const {
                    f.write_str("const ")?;
                }
                if qualified.is_volatile {
                    f.write_str("volatile ")?;
                }
                write!(f, "{}", qualified.inner)
            }
            Type::Typedef(typedef) => f.write_str(&typedef.name),
            Type::Pointer(pointer) => write!(f, "{} *", pointer.pointee),
            Type::Other(other) => f.write_str(&other.spelling),
        }
    }
}

// =============================================================================
// Template Arguments
// =============================================================================

/// One argument of a template specialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateArg {
    Type {
        #[serde(rename = "type")]
        ty: Type,
    },
    /// Arbitrary precision integral value.
    Integral {
        #[serde(with = "decimal")]
        value: BigInt,
    },
    NullPtr,
    Declaration {
        name: String,
    },
    Template {
        name: String,
    },
    Expression {
        spelling: String,
    },
    Pack {
        #[serde(default)]
        args: Vec<TemplateArg>,
    },
}

impl TemplateArg {
    pub fn ty(ty: Type) -> Self {
        TemplateArg::Type { ty }
    }

    pub fn integral(value: impl Into<BigInt>) -> Self {
        TemplateArg::Integral {
            value: value.into(),
        }
    }

    pub fn as_type(&self) -> Option<&Type> {
        match self {
            TemplateArg::Type { ty } => Some(ty),
            _ => None,
        }
    }

    /// Name of the argument kind, as used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TemplateArg::Type { .. } => "type",
            TemplateArg::Integral { .. } => "integral",
            TemplateArg::NullPtr => "null_ptr",
            TemplateArg::Declaration { .. } => "declaration",
            TemplateArg::Template { .. } => "template",
            TemplateArg::Expression { .. } => "expression",
            TemplateArg::Pack { .. } => "pack",
        }
    }
}

impl fmt::Display for TemplateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateArg::Type { ty } => write!(f, "{ty}"),
            TemplateArg::Integral { value } => write!(f, "{value}"),
            TemplateArg::NullPtr => f.write_str("nullptr"),
            TemplateArg::Declaration { name } | TemplateArg::Template { name } => {
                f.write_str(name)
            }
            TemplateArg::Expression { spelling } => f.write_str(spelling),
            TemplateArg::Pack { args } => {
                for (i, arg) in args.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                Ok(())
            }
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[TemplateArg]) -> fmt::Result {
    f.write_str("<")?;
    for (i, arg) in args.iter().enumerate() {
        if i != 0 {
            f.write_str(", ")?;
        }
        write!(f, "{arg}")?;
    }
    f.write_str(">")
}

fn qualify(scope: &[String], name: &str) -> String {
    if scope.is_empty() {
        return name.to_string();
    }
    format!("{}::{}", scope.join("::"), name)
}

/// Integral values travel as decimal strings. JSON numbers are accepted on
/// input as long as they fit in 64 bits; larger values must be strings.
mod decimal {
    use std::fmt;

    use num_bigint::BigInt;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        deserializer.deserialize_any(DecimalVisitor)
    }

    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = BigInt;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer or a decimal string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<BigInt, E> {
            Ok(BigInt::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<BigInt, E> {
            Ok(BigInt::from(v))
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<BigInt, E> {
            Ok(BigInt::from(v))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<BigInt, E> {
            Ok(BigInt::from(v))
        }

        // JSON numbers outside the 64-bit range reach us already rounded.
        fn visit_f64<E: de::Error>(self, v: f64) -> Result<BigInt, E> {
            Err(E::custom(format!(
                "integral value {v} is not an exact 64-bit integer; write it as a decimal string"
            )))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<BigInt, E> {
            v.trim().parse().map_err(E::custom)
        }
    }
}
