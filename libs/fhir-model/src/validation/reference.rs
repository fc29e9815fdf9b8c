//! Reference target checking.
//!
//! The resource kind of a reference comes from a relative literal reference
//! (`Patient/123`, `Patient/123/_history/2`, `Patient?identifier=x`) and from
//! the explicit `Reference.type`. When neither yields a kind (local
//! `#fragment`, anything with a URI scheme, other opaque values) the check
//! passes.

use crate::datatypes::Reference;
use crate::error::ViolationKind;
use crate::schema::is_resource_type;
use regex::Regex;
use std::sync::OnceLock;

const RESOURCE_TYPE_GROUP: usize = 1;

fn reference_pattern() -> &'static Regex {
    static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();
    REFERENCE_RE.get_or_init(|| {
        Regex::new(
            r"^([A-Z][A-Za-z]+)/[A-Za-z0-9\-\.]{1,64}(/_history/[A-Za-z0-9\-\.]{1,64})?$",
        )
        .expect("reference regex must compile")
    })
}

/// `scheme:rest` with a non-empty scheme and rest: absolute URLs, `urn:`
/// URIs and the like. Only the part before a `?` is inspected.
fn has_scheme(reference: &str) -> bool {
    let head = reference.split('?').next().unwrap_or_default();
    matches!(head.find(':'), Some(i) if i > 0 && head.len() > i + 1)
}

/// The resource kind named by a literal reference, if it can be determined.
///
/// The prefix of a conditional reference is returned as is, so
/// `Patient/1?x` yields `Patient/1` and fails the resource type check.
pub fn literal_kind(reference: &str) -> Option<&str> {
    if reference.starts_with('#') || has_scheme(reference) {
        return None;
    }
    if let Some((kind, _query)) = reference.split_once('?') {
        return Some(kind).filter(|k| !k.is_empty());
    }
    reference_pattern()
        .captures(reference)
        .and_then(|caps| caps.get(RESOURCE_TYPE_GROUP))
        .map(|m| m.as_str())
}

/// Checks `reference` against the allowed target kinds of its field. An
/// empty `allowed` set means any resource type.
pub(crate) fn check_target(reference: &Reference, allowed: &[&'static str]) -> Vec<ViolationKind> {
    let mut problems = Vec::new();
    let literal = reference.reference_value();
    let declared = reference.type_value();
    let literal_type = literal.and_then(literal_kind);
    let reference_text = literal.or(declared).unwrap_or_default().to_string();

    if literal_type.is_none() && declared.is_none() {
        tracing::trace!(
            reference = reference_text.as_str(),
            "resource kind not determinable, skipping target check"
        );
        return problems;
    }

    for kind in literal_type.into_iter().chain(declared) {
        if !is_resource_type(kind) {
            problems.push(ViolationKind::UnknownResourceType {
                reference: reference_text.clone(),
                found: kind.to_string(),
            });
        } else if !allowed.is_empty() && !allowed.contains(&kind) {
            problems.push(ViolationKind::ReferenceTarget {
                reference: reference_text.clone(),
                found: kind.to_string(),
                allowed: allowed.to_vec(),
            });
        }
    }

    if let (Some(literal_type), Some(declared)) = (literal_type, declared) {
        if literal_type != declared {
            problems.push(ViolationKind::ReferenceTypeMismatch {
                reference: reference_text,
                literal: literal_type.to_string(),
                declared: declared.to_string(),
            });
        }
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_and_versioned_literals() {
        assert_eq!(literal_kind("Patient/123"), Some("Patient"));
        assert_eq!(literal_kind("Patient/123/_history/4"), Some("Patient"));
    }

    #[test]
    fn references_with_a_scheme_are_not_typed() {
        assert_eq!(literal_kind("https://fhir.example.org/r4/Organization/org-1"), None);
        assert_eq!(literal_kind("http://other.example.org/fhir/Patient/1/_history/2"), None);
        assert_eq!(literal_kind("urn:oid:1.2.3"), None);
        assert!(!has_scheme(":Patient/1"));
        assert!(!has_scheme("Patient:"));
        assert!(!has_scheme("Patient?identifier=http://x|1"));
    }

    #[test]
    fn conditional_references() {
        assert_eq!(literal_kind("Patient?identifier=http://x|1"), Some("Patient"));
        assert_eq!(literal_kind("Patient/1?_summary=true"), Some("Patient/1"));
        assert_eq!(literal_kind("?name=x"), None);
    }

    #[test]
    fn undeterminable_kinds() {
        assert_eq!(literal_kind("#contained-1"), None);
        assert_eq!(literal_kind("urn:uuid:53fefa32-fcbb-4ff8-8a92-55ee120877b7"), None);
        assert_eq!(literal_kind("not a reference"), None);
        assert_eq!(literal_kind("patient/123"), None);
    }
}
