//! Discovery of torqueable classes.
//!
//! A class is torqueable when it directly befriends the marker template:
//!
//! ```text
//! class Foo : public HeapObject {
//!   friend tq::Torque<...>;
//! };
//! ```

use std::collections::HashSet;

use tracing::info;
use wrench_core::{Decl, DeclId, RecordDecl, SymbolModel, Type};

use crate::config::Conventions;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// A class declaration selected for generation.
#[derive(Debug, Clone)]
pub struct Candidate<'m> {
    pub decl: &'m Decl,
    pub record: &'m RecordDecl,
    /// Enclosing namespaces, outermost first.
    pub namespaces: Vec<&'m str>,
    /// `file:line:column` of the declaration.
    pub source_location: String,
}

impl Candidate<'_> {
    pub fn id(&self) -> DeclId {
        self.decl.id
    }

    pub fn name(&self) -> &str {
        &self.decl.name
    }
}

/// Whether a qualified name matches a pattern the way clang's `hasName`
/// does: equal, or ending in `::<pattern>`.
pub fn matches_qualified_name(qualified: &str, pattern: &str) -> bool {
    let pattern = pattern.trim_start_matches("::");
    qualified == pattern
        || qualified
            .strip_suffix(pattern)
            .is_some_and(|prefix| prefix.ends_with("::"))
}

/// Whether a class or struct directly contains a friend declaration of the
/// marker record.
pub fn is_torqueable(record: &RecordDecl, conventions: &Conventions) -> bool {
    if !record.is_class_or_struct() {
        return false;
    }
    let marker = conventions.marker_qualified_name();
    record.friends().any(|friend| {
        friend
            .ty
            .as_ref()
            .and_then(befriended_name)
            .is_some_and(|name| matches_qualified_name(&name, &marker))
    })
}

/// Qualified name of a befriended type. A specialization the front-end did
/// not resolve to a record is named by its template.
fn befriended_name(ty: &Type) -> Option<String> {
    match ty.unqualified_desugared() {
        Type::Record(record) => Some(record.qualified_name()),
        Type::TemplateSpecialization(spec) => Some(spec.template.qualified_name()),
        _ => None,
    }
}

/// Lazily select the torqueable classes of a model, in walk order.
///
/// The iterator can be cloned to restart the selection; it performs no
/// de-duplication.
pub fn candidates<'m>(
    model: &'m SymbolModel,
    conventions: &'m Conventions,
) -> impl Iterator<Item = Candidate<'m>> + Clone + 'm {
    model.declarations().filter_map(move |scoped| {
        let record = scoped.decl.as_record()?;
        is_torqueable(record, conventions).then(|| Candidate {
            decl: scoped.decl,
            record,
            namespaces: scoped.namespaces,
            source_location: scoped.decl.location.to_string(),
        })
    })
}

/// Collected candidates, each declaration at most once, in first-seen order.
#[derive(Debug, Default)]
pub struct CandidateSet<'m> {
    candidates: Vec<Candidate<'m>>,
    seen: HashSet<DeclId>,
}

impl<'m> CandidateSet<'m> {
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Add a candidate. A declaration seen before is reported as a duplicate
    /// and dropped; the first sighting is kept.
    pub fn insert(&mut self, candidate: Candidate<'m>, diagnostics: &mut Diagnostics) -> bool {
        if !self.seen.insert(candidate.id()) {
            diagnostics.report(
                DiagnosticKind::DuplicateCandidate,
                Some(candidate.name()),
                format!(
                    "Class '{}' ({}) found multiple times",
                    candidate.name(),
                    candidate.source_location
                ),
            );
            return false;
        }

        info!(
            class = candidate.name(),
            namespace = %candidate.namespaces.join("::"),
            location = %candidate.source_location,
            "Found torqueable class"
        );
        self.candidates.push(candidate);
        true
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate<'m>> {
        self.candidates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use wrench_core::{DeclKind, RecordTag, RecordType, TemplateName};

    #[test]
    fn test_matches_qualified_name() {
        assert!(matches_qualified_name("tq::Torque", "tq::Torque"));
        assert!(matches_qualified_name("v8::tq::Torque", "tq::Torque"));
        assert!(matches_qualified_name("tq::Torque", "::tq::Torque"));
        assert!(!matches_qualified_name("xtq::Torque", "tq::Torque"));
        assert!(!matches_qualified_name("tq::TorqueX", "tq::Torque"));
        assert!(!matches_qualified_name("Torque", "tq::Torque"));
    }

    #[test]
    fn test_selects_only_marked_classes() {
        let plain = class_decl(1, "Plain", vec![], vec![]);
        let marked = heap_number(2);
        let other_friend = class_decl(
            3,
            "Befriends",
            vec![],
            vec![friend(Type::elaborated(None, class_type("Factory")))],
        );
        let model = model(vec![unit("a.cc", vec![plain, marked, other_friend])]);
        let conventions = Conventions::default();

        let names: Vec<_> = candidates(&model, &conventions)
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["HeapNumber"]);

        let first = candidates(&model, &conventions).next().unwrap();
        assert_eq!(first.namespaces, vec!["v8", "internal"]);
        assert_eq!(first.source_location, "src/objects/heap_number.h:20:7");
    }

    #[test]
    fn test_unresolved_marker_specialization_is_selected() {
        let unresolved = Type::specialization(
            TemplateName {
                name: "Torque".to_string(),
                scope: vec!["tq".to_string()],
            },
            vec![annotation("GenerateCppClass", vec![])],
        );
        let decl = class_decl(1, "Foo", vec![], vec![friend(Type::elaborated(None, unresolved))]);
        let model = model(vec![unit("a.cc", vec![decl])]);

        let conventions = Conventions::default();
        let found: Vec<_> = candidates(&model, &conventions).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Foo");
    }

    #[test]
    fn test_unions_are_not_candidates() {
        let mut decl = heap_number(1);
        if let DeclKind::Record(record) = &mut decl.kind {
            record.tag = RecordTag::Union;
        }
        let model = model(vec![unit("a.cc", vec![decl])]);
        assert_eq!(candidates(&model, &Conventions::default()).count(), 0);
    }

    #[test]
    fn test_marker_in_other_namespace_is_ignored() {
        let fake_marker = friend(Type::record(RecordType::new("Torque").in_scope(["fake"])));
        let model = model(vec![unit(
            "a.cc",
            vec![class_decl(1, "Foo", vec![], vec![fake_marker])],
        )]);
        assert_eq!(candidates(&model, &Conventions::default()).count(), 0);
    }

    #[test]
    fn test_nested_classes_are_found() {
        let inner = heap_number(2);
        let outer = class_decl(1, "Outer", vec![], vec![inner]);
        let model = model(vec![unit("a.cc", vec![outer])]);

        let names: Vec<_> = candidates(&model, &Conventions::default())
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["HeapNumber"]);
    }

    #[test]
    fn test_candidate_selection_is_restartable() {
        let model = model(vec![unit("a.cc", vec![heap_number(1), heap_number(2)])]);
        let conventions = Conventions::default();
        let selection = candidates(&model, &conventions);

        let first: Vec<_> = selection.clone().map(|c| c.id()).collect();
        let second: Vec<_> = selection.map(|c| c.id()).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_duplicates_keep_first_sighting() {
        // The same header reached from two translation units.
        let model = model(vec![
            unit("a.cc", vec![heap_number(7)]),
            unit("b.cc", vec![heap_number(7)]),
        ]);
        let conventions = Conventions::default();
        let mut diagnostics = Diagnostics::new();
        let mut set = CandidateSet::new();

        let inserted: Vec<bool> = candidates(&model, &conventions)
            .map(|c| set.insert(c, &mut diagnostics))
            .collect();

        assert_eq!(inserted, vec![true, false]);
        assert_eq!(set.len(), 1);
        assert_eq!(diagnostics.count(DiagnosticKind::DuplicateCandidate), 1);
        let first_walked = model.declarations().find(|s| s.decl.id == DeclId(7)).unwrap();
        let kept = set.iter().next().unwrap();
        assert!(std::ptr::eq(kept.decl, first_walked.decl));
    }
}
