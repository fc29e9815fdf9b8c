#![allow(dead_code)]

use chrono::NaiveDate;
use ferrum_model::datatypes::{CodeableConcept, Coding, Money, Reference};
use ferrum_model::prelude::*;
use ferrum_model::primitive::FhirDate;
use ferrum_model::resource::{
    Claim, ClaimBuilder, ClaimCareTeam, ClaimDiagnosis, ClaimInsurance, ClaimItem,
    ClaimItemDetail, ClaimSupportingInfo,
};
use rust_decimal::Decimal;

pub fn concept(system: &str, code: &str) -> CodeableConcept {
    CodeableConcept::builder()
        .coding(Coding::builder().system(system).code(code).build().unwrap())
        .build()
        .unwrap()
}

pub fn reference(literal: &str) -> Reference {
    Reference::to(literal).unwrap()
}

pub fn usd(amount: i64) -> Money {
    Money::builder()
        .value(Decimal::new(amount, 2))
        .currency("USD")
        .build()
        .unwrap()
}

pub fn insurance(sequence: i32) -> ClaimInsurance {
    ClaimInsurance::builder()
        .sequence(sequence)
        .focal(sequence == 1)
        .coverage(reference(&format!("Coverage/{}", 9876 + sequence)))
        .build()
        .unwrap()
}

/// A claim builder with every required field set except `patient`.
pub fn claim_without_patient() -> ClaimBuilder {
    Claim::builder()
        .id("100150")
        .status("active")
        .r#type(concept(
            "http://terminology.hl7.org/CodeSystem/claim-type",
            "oral",
        ))
        .r#use("claim")
        .created(FhirDate::Date(NaiveDate::from_ymd_opt(2014, 8, 16).unwrap()))
        .provider(reference("Organization/1"))
        .priority(concept(
            "http://terminology.hl7.org/CodeSystem/processpriority",
            "normal",
        ))
        .insurance(insurance(1))
}

pub fn minimal_claim() -> Claim {
    claim_without_patient()
        .patient(reference("Patient/1"))
        .build()
        .unwrap()
}

/// An oral-health claim with care team, diagnosis, supporting info and a
/// two-level item tree.
pub fn oral_claim() -> Claim {
    let care_team = ClaimCareTeam::builder()
        .sequence(1)
        .provider(reference("Practitioner/example"))
        .build()
        .unwrap();
    let diagnosis = ClaimDiagnosis::builder()
        .sequence(1)
        .diagnosis_codeable_concept(concept("http://hl7.org/fhir/sid/icd-10", "123456"))
        .build()
        .unwrap();
    let info = ClaimSupportingInfo::builder()
        .sequence(1)
        .category(concept(
            "http://terminology.hl7.org/CodeSystem/claiminformationcategory",
            "missingtooth",
        ))
        .timing_date(NaiveDate::from_ymd_opt(2012, 4, 7).unwrap())
        .build()
        .unwrap();
    let detail = ClaimItemDetail::builder()
        .sequence(1)
        .product_or_service(concept("http://example.org/fhir/oralservicecodes", "1101"))
        .net(usd(4000))
        .build()
        .unwrap();
    let item = ClaimItem::builder()
        .sequence(1)
        .care_team_sequence(1)
        .product_or_service(concept("http://example.org/fhir/oralservicecodes", "1200"))
        .serviced_date(NaiveDate::from_ymd_opt(2014, 8, 16).unwrap())
        .unit_price(usd(13500))
        .net(usd(13500))
        .detail(detail)
        .build()
        .unwrap();
    claim_without_patient()
        .patient(reference("Patient/1"))
        .care_team(care_team)
        .diagnosis(diagnosis)
        .supporting_info(info)
        .item(item)
        .total(usd(13500))
        .build()
        .unwrap()
}
