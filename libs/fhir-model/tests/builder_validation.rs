mod common;

use common::*;
use ferrum_model::datatypes::{Address, Attachment, Extension, Identifier, Narrative, Period};
use ferrum_model::prelude::*;
use ferrum_model::primitive::{FhirDate, FhirString, PositiveInt};
use ferrum_model::resource::{Binary, Claim, ClaimPayee, Organization, Patient};
use ferrum_model::{present_elements, Error, ModelConfig, ViolationKind};
use quickcheck::{QuickCheck, TestResult};

#[test]
fn claim_reports_each_missing_required_field() {
    let err = claim_without_patient().build().unwrap_err();
    assert_eq!(err.violations().len(), 1, "{err}");
    assert_eq!(err.violations()[0].path, "Claim.patient");
    assert_eq!(err.violations()[0].kind, ViolationKind::MissingRequired);

    let err = claim_without_patient()
        .patient(reference("Patient/1"))
        .set_insurance(Vec::new())
        .build()
        .unwrap_err();
    assert_eq!(err.violations().len(), 1, "{err}");
    assert_eq!(err.violations()[0].field, "insurance");

    let err = Claim::builder()
        .r#type(concept("http://x", "oral"))
        .r#use("claim")
        .patient(reference("Patient/1"))
        .created(FhirDate::Year(2014))
        .provider(reference("Organization/1"))
        .priority(concept("http://x", "normal"))
        .insurance(insurance(1))
        .build()
        .unwrap_err();
    assert_eq!(err.violations().len(), 1, "{err}");
    assert_eq!(err.violations()[0].field, "status");
}

#[test]
fn violations_are_accumulated_not_short_circuited() {
    let err = Claim::builder()
        .status(" active")
        .patient(reference("Organization/1"))
        .build()
        .unwrap_err();
    let validation = match &err {
        Error::Validation(v) => v,
        other => panic!("unexpected error: {other}"),
    };
    assert_eq!(validation.node, "Claim");
    assert!(validation.has_violation_for("status"));
    assert!(validation.has_violation_for("patient"));
    assert!(validation.has_violation_for("insurance"));
    assert!(err.to_string().contains("Claim"));
}

#[test]
fn list_fields_are_empty_never_absent() {
    let claim = minimal_claim();
    assert!(claim.identifier().is_empty());
    assert!(claim.related().is_empty());
    assert!(claim.care_team().is_empty());
    assert!(claim.supporting_info().is_empty());
    assert!(claim.diagnosis().is_empty());
    assert!(claim.item().is_empty());
    assert!(claim.contained().is_empty());
    assert!(claim.extension().is_empty());
    assert!(claim.modifier_extension().is_empty());
    assert_eq!(claim.insurance().len(), 1);
}

#[test]
fn list_setters_append_extend_and_replace() {
    let a = Identifier::builder().value("a").build().unwrap();
    let b = Identifier::builder().value("b").build().unwrap();
    let c = Identifier::builder().value("c").build().unwrap();

    let patient = Patient::builder()
        .identifier(a.clone())
        .extend_identifier([b.clone(), c.clone()])
        .build()
        .unwrap();
    assert_eq!(patient.identifier(), &[a.clone(), b.clone(), c.clone()]);

    let replaced = patient.to_builder().set_identifier([c.clone()]).build().unwrap();
    assert_eq!(replaced.identifier(), &[c]);
}

#[test]
fn to_builder_round_trips() {
    let claim = oral_claim();
    let rebuilt = claim.to_builder().build().unwrap();
    assert_eq!(rebuilt, claim);
    assert_eq!(rebuilt.hash_code(), claim.hash_code());

    let item = &claim.item()[0];
    assert_eq!(&item.to_builder().build().unwrap(), item);
}

/// Property: to_builder().build() reproduces any node that built once
#[test]
fn prop_to_builder_round_trip() {
    fn prop(city: String, lines: Vec<String>) -> TestResult {
        let built = lines
            .iter()
            .fold(Address::builder().city(city.as_str()), |b, line| {
                b.line(line.as_str())
            })
            .build();
        let Ok(address) = built else {
            return TestResult::discard();
        };
        match address.to_builder().build() {
            Ok(rebuilt) => TestResult::from_bool(
                rebuilt == address && rebuilt.line().len() == lines.len(),
            ),
            Err(_) => TestResult::failed(),
        }
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(String, Vec<String>) -> TestResult);
}

#[test]
fn to_builder_then_edit_leaves_the_original_untouched() {
    let claim = minimal_claim();
    let cancelled = claim.to_builder().status("cancelled").build().unwrap();
    assert_eq!(
        claim.status().and_then(|s| s.value()).map(String::as_str),
        Some("active")
    );
    assert_eq!(
        cancelled.status().and_then(|s| s.value()).map(String::as_str),
        Some("cancelled")
    );
    assert_ne!(claim, cancelled);
}

#[test]
fn empty_composites_are_rejected() {
    let err = Period::builder().build().unwrap_err();
    assert_eq!(err.violations()[0].kind, ViolationKind::Empty);
    assert_eq!(err.violations()[0].path, "Period");

    let err = Organization::builder().build().unwrap_err();
    assert_eq!(err.violations()[0].kind, ViolationKind::Empty);
}

#[test]
fn an_element_id_alone_counts_as_content() {
    let period = Period::builder().id("p1").build().unwrap();
    assert_eq!(period.id(), Some("p1"));
}

#[test]
fn a_url_alone_does_not_make_an_extension() {
    let err = Extension::builder()
        .url("http://example.org/flag")
        .build()
        .unwrap_err();
    assert_eq!(err.violations()[0].kind, ViolationKind::Empty);
}

#[test]
fn primitives_may_be_empty_when_extended() {
    let flag = Extension::builder()
        .url("http://hl7.org/fhir/StructureDefinition/data-absent-reason")
        .value(ferrum_model::primitive::Code::of("unknown"))
        .build()
        .unwrap();
    let name = FhirString::builder().extension(flag).build().unwrap();
    assert!(!name.has_value());
    assert!(!name.is_empty());
    let org = Organization::builder().name(name).build().unwrap();
    assert!(org.name().unwrap().value().is_none());
}

#[test]
fn backbone_required_fields_are_enforced() {
    let err = ClaimPayee::builder()
        .party(reference("Patient/1"))
        .build()
        .unwrap_err();
    assert_eq!(err.violations()[0].path, "Claim.payee.type");
}

#[test]
fn primitive_formats_are_checked_by_the_parent() {
    let err = Binary::builder()
        .content_type("text/plain")
        .data("not base64!")
        .build()
        .unwrap_err();
    assert_eq!(err.violations()[0].field, "data");

    let err = Attachment::builder().size(-1).build().unwrap_err();
    assert_eq!(err.violations()[0].field, "size");

    let err = PositiveInt::builder().value(0).build().unwrap_err();
    assert_eq!(err.violations()[0].path, "positiveInt.value");
}

#[test]
fn control_characters_depend_on_config() {
    let builder = Organization::builder().name("Acme\u{0007}");
    assert!(builder.clone().build().is_err());
    let config = ModelConfig::default().with_control_char_checks(false);
    assert!(builder.build_with(&config).is_ok());
}

#[test]
fn narrative_needs_status_and_div() {
    let err = Narrative::builder().status("generated").build().unwrap_err();
    assert!(err.violations().iter().any(|v| v.field == "div"));
}

#[test]
fn nullable_collections_pass_the_caller_contract_gate() {
    let decoded: Option<Vec<Option<Identifier>>> = Some(vec![
        Some(Identifier::builder().value("1").build().unwrap()),
        None,
    ]);
    let err = present_elements("identifier", decoded).unwrap_err();
    assert!(matches!(err, Error::CallerContract { .. }));
    assert!(err.violations().is_empty());

    let absent: Option<Vec<Option<Identifier>>> = None;
    assert!(matches!(
        present_elements("identifier", absent),
        Err(Error::CallerContract { .. })
    ));

    let ok: Option<Vec<Option<Identifier>>> =
        Some(vec![Some(Identifier::builder().value("1").build().unwrap())]);
    let identifiers = present_elements("identifier", ok).unwrap();
    let patient = Patient::builder().set_identifier(identifiers).build().unwrap();
    assert_eq!(patient.identifier().len(), 1);
}
