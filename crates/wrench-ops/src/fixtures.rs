//! Symbol model builders shared by the unit tests.
//!
//! The shapes mirror what the clang front-end emits for V8-style headers:
//!
//! ```text
//! namespace v8::internal {
//! class HeapNumber : public PrimitiveHeapObject {
//!   friend tq::Torque<tq::GenerateCppClass, tq::Reserve<3, 7>>;
//!   static constexpr Field<double>::Offset kValueOffset = ...;
//! };
//! }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use wrench_core::{
    BaseSpecifier, BuiltinKind, Decl, DeclKind, FriendDecl, NamespaceDecl, RecordDecl, RecordTag,
    RecordType, SourceLocation, StorageClass, SymbolModel, TemplateArg, TemplateName,
    TemplateSpecializationType, TranslationUnit, Type, VarDecl,
};

static NEXT_ID: AtomicU64 = AtomicU64::new(1000);

pub fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

pub fn loc(file: &str, line: u32) -> SourceLocation {
    SourceLocation::new(file, line, 7)
}

/// A class type in `v8::internal`.
pub fn class_type(name: &str) -> Type {
    Type::record(RecordType::new(name).in_scope(["v8", "internal"]))
}

/// `tq::<name><args...>` as an annotation container argument.
pub fn annotation(name: &str, args: Vec<TemplateArg>) -> TemplateArg {
    TemplateArg::ty(Type::elaborated(
        None,
        Type::record(
            RecordType::new(name)
                .in_scope(["tq"])
                .with_template_args(args),
        ),
    ))
}

/// The `tq::Torque<annotations...>` specialization type.
pub fn marker_type(annotations: Vec<TemplateArg>) -> Type {
    Type::TemplateSpecialization(TemplateSpecializationType {
        template: TemplateName {
            name: "Torque".to_string(),
            scope: vec!["tq".to_string()],
        },
        args: annotations.clone(),
        desugared: Some(Box::new(Type::record(
            RecordType::new("Torque")
                .in_scope(["tq"])
                .with_template_args(annotations),
        ))),
    })
}

/// `friend tq::Torque<annotations...>;`
pub fn marker_friend(annotations: Vec<TemplateArg>) -> Decl {
    friend(Type::elaborated(None, marker_type(annotations)))
}

pub fn friend(ty: Type) -> Decl {
    Decl::new(
        next_id(),
        "",
        loc("friend.h", 1),
        DeclKind::Friend(FriendDecl { ty: Some(ty) }),
    )
}

/// `Field<field_type>::Offset`.
pub fn field_offset_type(field_type: Type) -> Type {
    Type::elaborated(
        Some(Type::specialization(
            TemplateName::new("Field"),
            vec![TemplateArg::ty(field_type)],
        )),
        Type::typedef("Offset", Type::builtin(BuiltinKind::Int)),
    )
}

/// `static constexpr Field<field_type>::Offset <name> = ...;`
pub fn offset_constant(name: &str, field_type: Type) -> Decl {
    static_var(name, Type::constant(field_offset_type(field_type)))
}

pub fn static_var(name: &str, ty: Type) -> Decl {
    var(name, ty, StorageClass::Static)
}

pub fn var(name: &str, ty: Type, storage: StorageClass) -> Decl {
    Decl::new(
        next_id(),
        name,
        loc("members.h", 1),
        DeclKind::Var(VarDecl { ty, storage }),
    )
}

pub fn base(name: &str) -> BaseSpecifier {
    BaseSpecifier {
        ty: Type::elaborated(None, class_type(name)),
        is_virtual: false,
    }
}

pub fn class_decl(id: u64, name: &str, bases: Vec<BaseSpecifier>, members: Vec<Decl>) -> Decl {
    Decl::new(
        id,
        name,
        loc(&format!("src/objects/{}.h", wrench_core::to_snake_case(name)), 20),
        DeclKind::Record(RecordDecl {
            tag: RecordTag::Class,
            bases,
            members,
            template_args: Vec::new(),
        }),
    )
}

pub fn namespace(name: &str, decls: Vec<Decl>) -> Decl {
    Decl::new(
        next_id(),
        name,
        loc("ns.h", 1),
        DeclKind::Namespace(NamespaceDecl { decls }),
    )
}

/// One unit with `decls` inside `namespace v8 { namespace internal { ... } }`.
pub fn unit(path: &str, decls: Vec<Decl>) -> TranslationUnit {
    TranslationUnit::new(
        path,
        vec![namespace("v8", vec![namespace("internal", decls)])],
    )
}

pub fn model(units: Vec<TranslationUnit>) -> SymbolModel {
    SymbolModel::new(units)
}

/// `HeapNumber : PrimitiveHeapObject` with one annotation and a double field.
pub fn heap_number(id: u64) -> Decl {
    class_decl(
        id,
        "HeapNumber",
        vec![base("PrimitiveHeapObject")],
        vec![
            marker_friend(vec![annotation("GenerateCppClass", vec![])]),
            offset_constant("kValueOffset", Type::builtin(BuiltinKind::Double)),
        ],
    )
}
