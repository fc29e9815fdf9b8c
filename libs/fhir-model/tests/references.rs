mod common;

use common::*;
use ferrum_model::datatypes::Reference;
use ferrum_model::prelude::*;
use ferrum_model::resource::{Binary, ClaimCareTeam, Patient};
use ferrum_model::validation::reference::literal_kind;
use ferrum_model::{ModelConfig, ViolationKind};

fn typed(literal: &str, declared: &str) -> Reference {
    Reference::builder()
        .reference(literal)
        .r#type(declared)
        .build()
        .unwrap()
}

#[test]
fn claim_patient_must_reference_a_patient() {
    let err = claim_without_patient()
        .patient(reference("Organization/1"))
        .build()
        .unwrap_err();
    let violation = &err.violations()[0];
    assert_eq!(violation.field, "patient");
    assert_eq!(
        violation.kind,
        ViolationKind::ReferenceTarget {
            reference: "Organization/1".to_string(),
            found: "Organization".to_string(),
            allowed: vec!["Patient"],
        }
    );

    let claim = claim_without_patient()
        .patient(reference("Patient/1"))
        .build()
        .unwrap();
    assert_eq!(
        claim.patient().and_then(Reference::target_kind),
        Some("Patient")
    );
}

#[test]
fn provider_accepts_each_listed_target() {
    for literal in ["Practitioner/1", "PractitionerRole/1", "Organization/1"] {
        let claim = claim_without_patient()
            .patient(reference("Patient/1"))
            .provider(reference(literal))
            .build();
        assert!(claim.is_ok(), "{literal}");
    }
    let err = claim_without_patient()
        .patient(reference("Patient/1"))
        .provider(reference("Device/1"))
        .build()
        .unwrap_err();
    assert!(err.violations().iter().all(|v| v.field == "provider"));
}

#[test]
fn declared_type_must_agree_with_the_literal() {
    let err = claim_without_patient()
        .patient(typed("Patient/1", "Organization"))
        .build()
        .unwrap_err();
    let kinds: Vec<_> = err.violations().iter().map(|v| &v.kind).collect();
    assert_eq!(kinds.len(), 2);
    assert!(matches!(kinds[0], ViolationKind::ReferenceTarget { found, .. } if found == "Organization"));
    assert!(matches!(
        kinds[1],
        ViolationKind::ReferenceTypeMismatch { literal, declared, .. }
            if literal == "Patient" && declared == "Organization"
    ));

    assert!(claim_without_patient()
        .patient(typed("Patient/1", "Patient"))
        .build()
        .is_ok());
}

#[test]
fn unknown_resource_types_are_reported() {
    let err = claim_without_patient()
        .patient(reference("Patientx/1"))
        .build()
        .unwrap_err();
    assert!(matches!(
        &err.violations()[0].kind,
        ViolationKind::UnknownResourceType { found, .. } if found == "Patientx"
    ));
}

#[test]
fn undeterminable_kinds_pass() {
    for literal in [
        "#p1",
        "urn:uuid:53fefa32-fcbb-4ff8-8a92-55ee120877b7",
        "patient/123",
    ] {
        assert!(
            claim_without_patient()
                .patient(reference(literal))
                .build()
                .is_ok(),
            "{literal}"
        );
    }
}

#[test]
fn type_hint_alone_is_checked() {
    let identified = Reference::builder().r#type("Group").display("Team A").build().unwrap();
    let err = claim_without_patient()
        .patient(identified)
        .build()
        .unwrap_err();
    assert_eq!(err.violations()[0].field, "patient");
}

#[test]
fn references_with_a_scheme_are_not_target_checked() {
    for literal in [
        "https://fhir.example.org/r4/Patient/p-1/_history/2",
        "https://fhir.example.org/r4/Organization/o-1",
        "http://other.example.org/fhir/Organization/1",
    ] {
        assert!(
            claim_without_patient()
                .patient(reference(literal))
                .build()
                .is_ok(),
            "{literal}"
        );
    }

    // the type hint is still checked
    let err = claim_without_patient()
        .patient(typed("http://other.example.org/fhir/Organization/1", "Organization"))
        .build()
        .unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert!(matches!(
        &err.violations()[0].kind,
        ViolationKind::ReferenceTarget { found, .. } if found == "Organization"
    ));
}

#[test]
fn conditional_literals_use_the_query_prefix() {
    assert!(claim_without_patient()
        .patient(reference("Patient?identifier=http://hospital.example|12345"))
        .build()
        .is_ok());
    assert_eq!(literal_kind("Organization?name=Acme"), Some("Organization"));

    let err = claim_without_patient()
        .patient(reference("Patient/1?_summary=true"))
        .build()
        .unwrap_err();
    assert!(matches!(
        &err.violations()[0].kind,
        ViolationKind::UnknownResourceType { found, .. } if found == "Patient/1"
    ));
}

#[test]
fn backbone_and_resource_references_are_checked() {
    let team = ClaimCareTeam::builder()
        .sequence(1)
        .provider(reference("Patient/1"))
        .build()
        .unwrap_err();
    assert_eq!(team.violations()[0].path, "Claim.careTeam.provider");

    let patient = Patient::builder()
        .managing_organization(reference("Practitioner/1"))
        .build()
        .unwrap_err();
    assert_eq!(patient.violations()[0].field, "managingOrganization");
}

#[test]
fn fields_without_targets_accept_any_resource() {
    let binary = Binary::builder()
        .content_type("application/pdf")
        .security_context(reference("DocumentReference/1"))
        .build()
        .unwrap();
    assert!(binary.security_context().is_some());
}

#[test]
fn reference_checks_can_be_disabled() {
    let builder = claim_without_patient().patient(reference("Organization/1"));
    assert!(builder.clone().build().is_err());

    let config = ModelConfig::default().with_reference_type_checks(false);
    assert!(builder.clone().build_with(&config).is_ok());
    assert!(builder.build_with(&ModelConfig::lenient()).is_ok());
}
