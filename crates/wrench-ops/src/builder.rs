//! Assembly of a [`ClassRecord`] from a collected candidate.

use tracing::debug;
use wrench_core::{ClassRecord, FriendDecl, RecordDecl};

use crate::annotations::decode_annotations;
use crate::collect::Candidate;
use crate::config::Conventions;
use crate::diagnostics::{ClassReporter, Diagnostics};
use crate::error::{OpsError, OpsResult};
use crate::fields::extract_fields;

/// Build the class record of one candidate.
///
/// Friend, annotation and field problems are reported and skipped. A class
/// with more than one base or a field of an unmapped builtin type is an
/// error.
pub fn build_class(
    candidate: &Candidate<'_>,
    conventions: &Conventions,
    diagnostics: &mut Diagnostics,
) -> OpsResult<ClassRecord> {
    let name = candidate.name();
    let mut reporter = ClassReporter::new(name, diagnostics);
    let mut class = ClassRecord::new(name, candidate.source_location.as_str());

    for friend in candidate.record.friends() {
        apply_friend(&mut class, friend, conventions, &mut reporter);
    }

    class.base_class = base_class(candidate, &mut reporter)?;
    class.fields = extract_fields(candidate.record, conventions, &mut reporter)?;

    debug!(
        class = %class.name,
        base = class.base_class.as_deref().unwrap_or("-"),
        annotations = class.annotations.len(),
        fields = class.fields.len(),
        "Built class"
    );
    Ok(class)
}

/// Decode one friend declaration. Each qualifying friend replaces the
/// annotations of any earlier one.
fn apply_friend(
    class: &mut ClassRecord,
    friend: &FriendDecl,
    conventions: &Conventions,
    reporter: &mut ClassReporter<'_>,
) {
    let Some(ty) = friend.ty.as_ref() else {
        reporter.shape_mismatch("Friend declaration does not name a type");
        return;
    };
    let Some(elaborated) = ty.as_elaborated() else {
        reporter.shape_mismatch(format!("Friend type '{ty}' is not elaborated"));
        return;
    };
    let Some(container) = elaborated.named.as_template_specialization() else {
        reporter.shape_mismatch(format!(
            "Friend type '{ty}' is not a template specialization"
        ));
        return;
    };

    let annotations = decode_annotations(container, conventions, reporter);
    if !class.annotations.is_empty() {
        debug!(
            class = reporter.class(),
            previous = class.annotations.len(),
            "Replacing annotations from an earlier friend"
        );
    }
    class.annotations = annotations;
}

fn base_class(
    candidate: &Candidate<'_>,
    reporter: &mut ClassReporter<'_>,
) -> OpsResult<Option<String>> {
    let RecordDecl { bases, .. } = candidate.record;
    match bases.as_slice() {
        [] => Ok(None),
        [base] => match base.ty.as_record() {
            Some(record) => Ok(Some(record.name.clone())),
            None => {
                reporter.shape_mismatch(format!("Base '{}' is not a class", base.ty));
                Ok(None)
            }
        },
        _ => Err(OpsError::MultipleBases {
            class: candidate.name().to_string(),
            location: candidate.source_location.clone(),
            count: bases.len(),
        }),
    }
}
