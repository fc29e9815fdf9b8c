mod common;

use chrono::NaiveDate;
use common::*;
use ferrum_model::datatypes::{Coding, Extension, Period};
use ferrum_model::prelude::*;
use ferrum_model::primitive::{Date, FhirDate, FhirString, PositiveInt};
use ferrum_model::resource::{
    ClaimAccident, ClaimDiagnosis, ClaimSupportingInfo, CLAIM_SUPPORTING_INFO_SCHEMA,
};
use ferrum_model::schema::DataType;
use ferrum_model::{Value, ViolationKind};

fn info() -> ferrum_model::resource::ClaimSupportingInfoBuilder {
    ClaimSupportingInfo::builder()
        .sequence(1)
        .category(concept("http://example.org/info", "exception"))
}

#[test]
fn setting_one_choice_type_replaces_the_other() {
    let period = Period::builder()
        .start(FhirDate::Year(2020))
        .build()
        .unwrap();
    let built = info()
        .timing_date(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap())
        .timing_period(period.clone())
        .build()
        .unwrap();
    let timing = built.timing().unwrap();
    assert!(timing.is::<Period>());
    assert!(timing.get::<Date>().is_none());
    assert_eq!(timing.get::<Period>(), Some(&period));
}

#[test]
fn a_type_outside_the_choice_set_is_rejected() {
    let coding = Coding::builder().code("x").build().unwrap();
    let err = info().value(coding).build().unwrap_err();
    let violation = &err.violations()[0];
    assert_eq!(violation.path, "Claim.supportingInfo.value");
    match &violation.kind {
        ViolationKind::ChoiceType { found, allowed } => {
            assert_eq!(*found, "Coding");
            assert_eq!(
                allowed,
                &vec!["boolean", "string", "Quantity", "Attachment", "Reference"]
            );
        }
        other => panic!("unexpected violation: {other:?}"),
    }
}

#[test]
fn primitive_members_of_a_choice_are_checked() {
    let err = info().value_string("  ").build().unwrap_err();
    assert!(matches!(
        err.violations()[0].kind,
        ViolationKind::InvalidPrimitive { .. }
    ));

    let ok = info().value_boolean(true).build().unwrap();
    assert_eq!(
        ok.value().and_then(|v| v.get::<ferrum_model::primitive::Boolean>()).and_then(|b| b.value()),
        Some(&true)
    );
}

#[test]
fn element_names_resolve_both_ways() {
    let timing = CLAIM_SUPPORTING_INFO_SCHEMA.field("timing").unwrap();
    assert!(timing.is_choice());
    assert_eq!(timing.choice_element_name(DataType::Date), "timingDate");

    let (field, data_type) = CLAIM_SUPPORTING_INFO_SCHEMA
        .choice_field_for("valueAttachment")
        .unwrap();
    assert_eq!(field.name, "value");
    assert_eq!(data_type, DataType::Attachment);
    assert!(CLAIM_SUPPORTING_INFO_SCHEMA
        .choice_field_for("valueCoding")
        .is_none());
}

#[test]
fn references_inside_a_choice_are_target_checked() {
    let err = ClaimDiagnosis::builder()
        .sequence(1)
        .diagnosis_reference(reference("Observation/o1"))
        .build()
        .unwrap_err();
    assert!(matches!(
        err.violations()[0].kind,
        ViolationKind::ReferenceTarget { .. }
    ));

    let accident = ClaimAccident::builder()
        .date(FhirDate::Year(2014))
        .location_reference(reference("Location/ph"))
        .build()
        .unwrap();
    assert!(accident.location().unwrap().as_reference().is_some());

    let err = ClaimAccident::builder()
        .date(FhirDate::Year(2014))
        .location_reference(reference("Patient/1"))
        .build()
        .unwrap_err();
    assert_eq!(err.violations()[0].path, "Claim.accident.location");
}

#[test]
fn extension_values_accept_any_member() {
    let ext = Extension::builder()
        .url("http://example.org/priority")
        .value(PositiveInt::of(2))
        .build()
        .unwrap();
    assert_eq!(ext.value().map(Value::data_type), Some(DataType::PositiveInt));

    let err = Extension::builder()
        .url("http://example.org/priority")
        .value(PositiveInt::of(0))
        .build()
        .unwrap_err();
    assert_eq!(err.violations()[0].field, "value");

    let text = Value::from(FhirString::of("note"));
    assert_eq!(text.as_node().type_name(), "string");
}
