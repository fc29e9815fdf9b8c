//! The Claim resource and its backbone elements.

/// Generates the append, extend and replace setters of list fields.
macro_rules! list_setters {
    ($($field:ident, $extend:ident, $set:ident: $item:ty;)+) => {$(
        pub fn $field(mut self, value: impl Into<$item>) -> Self {
            self.$field.push(value.into());
            self
        }

        pub fn $extend(mut self, values: impl IntoIterator<Item = $item>) -> Self {
            self.$field.extend(values);
            self
        }

        pub fn $set(mut self, values: impl IntoIterator<Item = $item>) -> Self {
            self.$field = values.into_iter().collect();
            self
        }
    )+};
}

mod elements;
mod item;
mod supporting;

pub use elements::{
    ClaimAccident, ClaimAccidentBuilder, ClaimCareTeam, ClaimCareTeamBuilder, ClaimInsurance,
    ClaimInsuranceBuilder, ClaimPayee, ClaimPayeeBuilder, ClaimRelated, ClaimRelatedBuilder,
    CLAIM_ACCIDENT_SCHEMA, CLAIM_CARE_TEAM_SCHEMA, CLAIM_INSURANCE_SCHEMA, CLAIM_PAYEE_SCHEMA,
    CLAIM_RELATED_SCHEMA,
};
pub use item::{
    ClaimItem, ClaimItemBuilder, ClaimItemDetail, ClaimItemDetailBuilder, CLAIM_ITEM_DETAIL_SCHEMA,
    CLAIM_ITEM_SCHEMA,
};
pub use supporting::{
    ClaimDiagnosis, ClaimDiagnosisBuilder, ClaimSupportingInfo, ClaimSupportingInfoBuilder,
    CLAIM_DIAGNOSIS_SCHEMA, CLAIM_SUPPORTING_INFO_SCHEMA,
};

use super::{domain_resource_capabilities, DomainResource, DOMAIN_RESOURCE_SCHEMA};
use crate::builder::{Builder, ToBuilder};
use crate::config::ModelConfig;
use crate::datatypes::{CodeableConcept, Identifier, Money, Period, Reference};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::{Code, DateTime};
use crate::schema::{Binding, DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_list, accept_opt, Visitable, Visitor};
use std::any::Any;

const IDENTIFIER: FieldInfo = FieldInfo::new("identifier", &[DataType::Identifier]).repeating();
const STATUS: FieldInfo = FieldInfo::new("status", &[DataType::Code])
    .required()
    .summary()
    .modifier()
    .binding(Binding::required(
        "ClaimStatus",
        "http://hl7.org/fhir/ValueSet/fm-status|4.3.0",
    ));
const TYPE: FieldInfo = FieldInfo::new("type", &[DataType::CodeableConcept])
    .required()
    .summary();
const SUB_TYPE: FieldInfo = FieldInfo::new("subType", &[DataType::CodeableConcept]);
const USE: FieldInfo = FieldInfo::new("use", &[DataType::Code])
    .required()
    .summary()
    .binding(Binding::required(
        "Use",
        "http://hl7.org/fhir/ValueSet/claim-use|4.3.0",
    ));
const PATIENT: FieldInfo = FieldInfo::new("patient", &[DataType::Reference])
    .required()
    .summary()
    .targets(&["Patient"]);
const BILLABLE_PERIOD: FieldInfo = FieldInfo::new("billablePeriod", &[DataType::Period]).summary();
const CREATED: FieldInfo = FieldInfo::new("created", &[DataType::DateTime])
    .required()
    .summary();
const ENTERER: FieldInfo = FieldInfo::new("enterer", &[DataType::Reference])
    .targets(&["Practitioner", "PractitionerRole"]);
const INSURER: FieldInfo = FieldInfo::new("insurer", &[DataType::Reference])
    .summary()
    .targets(&["Organization"]);
const PROVIDER: FieldInfo = FieldInfo::new("provider", &[DataType::Reference])
    .required()
    .summary()
    .targets(&["Practitioner", "PractitionerRole", "Organization"]);
const PRIORITY: FieldInfo = FieldInfo::new("priority", &[DataType::CodeableConcept])
    .required()
    .summary();
const FUNDS_RESERVE: FieldInfo = FieldInfo::new("fundsReserve", &[DataType::CodeableConcept]);
const RELATED: FieldInfo = FieldInfo::new("related", &[DataType::BackboneElement]).repeating();
const PRESCRIPTION: FieldInfo = FieldInfo::new("prescription", &[DataType::Reference]).targets(&[
    "DeviceRequest",
    "MedicationRequest",
    "VisionPrescription",
]);
const ORIGINAL_PRESCRIPTION: FieldInfo =
    FieldInfo::new("originalPrescription", &[DataType::Reference]).targets(&[
        "DeviceRequest",
        "MedicationRequest",
        "VisionPrescription",
    ]);
const PAYEE: FieldInfo = FieldInfo::new("payee", &[DataType::BackboneElement]);
const REFERRAL: FieldInfo =
    FieldInfo::new("referral", &[DataType::Reference]).targets(&["ServiceRequest"]);
const FACILITY: FieldInfo = FieldInfo::new("facility", &[DataType::Reference]).targets(&["Location"]);
const CARE_TEAM: FieldInfo = FieldInfo::new("careTeam", &[DataType::BackboneElement]).repeating();
const SUPPORTING_INFO: FieldInfo =
    FieldInfo::new("supportingInfo", &[DataType::BackboneElement]).repeating();
const DIAGNOSIS: FieldInfo = FieldInfo::new("diagnosis", &[DataType::BackboneElement]).repeating();
const INSURANCE: FieldInfo = FieldInfo::new("insurance", &[DataType::BackboneElement])
    .required()
    .repeating()
    .summary();
const ACCIDENT: FieldInfo = FieldInfo::new("accident", &[DataType::BackboneElement]);
const ITEM: FieldInfo = FieldInfo::new("item", &[DataType::BackboneElement]).repeating();
const TOTAL: FieldInfo = FieldInfo::new("total", &[DataType::Money]);

pub const CLAIM_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Claim",
    kind: NodeKind::Resource,
    base: Some(&DOMAIN_RESOURCE_SCHEMA),
    fields: &[
        IDENTIFIER,
        STATUS,
        TYPE,
        SUB_TYPE,
        USE,
        PATIENT,
        BILLABLE_PERIOD,
        CREATED,
        ENTERER,
        INSURER,
        PROVIDER,
        PRIORITY,
        FUNDS_RESERVE,
        RELATED,
        PRESCRIPTION,
        ORIGINAL_PRESCRIPTION,
        PAYEE,
        REFERRAL,
        FACILITY,
        CARE_TEAM,
        SUPPORTING_INFO,
        DIAGNOSIS,
        INSURANCE,
        ACCIDENT,
        ITEM,
        TOTAL,
    ],
    constraints: &[],
};

/// A provider's request for adjudication or reimbursement of products and
/// services rendered to a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub(crate) domain: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) status: Option<Code>,
    pub(crate) r#type: Option<CodeableConcept>,
    pub(crate) sub_type: Option<CodeableConcept>,
    pub(crate) r#use: Option<Code>,
    pub(crate) patient: Option<Reference>,
    pub(crate) billable_period: Option<Period>,
    pub(crate) created: Option<DateTime>,
    pub(crate) enterer: Option<Reference>,
    pub(crate) insurer: Option<Reference>,
    pub(crate) provider: Option<Reference>,
    pub(crate) priority: Option<CodeableConcept>,
    pub(crate) funds_reserve: Option<CodeableConcept>,
    pub(crate) related: Vec<ClaimRelated>,
    pub(crate) prescription: Option<Reference>,
    pub(crate) original_prescription: Option<Reference>,
    pub(crate) payee: Option<ClaimPayee>,
    pub(crate) referral: Option<Reference>,
    pub(crate) facility: Option<Reference>,
    pub(crate) care_team: Vec<ClaimCareTeam>,
    pub(crate) supporting_info: Vec<ClaimSupportingInfo>,
    pub(crate) diagnosis: Vec<ClaimDiagnosis>,
    pub(crate) insurance: Vec<ClaimInsurance>,
    pub(crate) accident: Option<ClaimAccident>,
    pub(crate) item: Vec<ClaimItem>,
    pub(crate) total: Option<Money>,
    hash: HashCache,
}

cached_hash!(Claim =>
    domain,
    identifier,
    status,
    r#type,
    sub_type,
    r#use,
    patient,
    billable_period,
    created,
    enterer,
    insurer,
    provider,
    priority,
    funds_reserve,
    related,
    prescription,
    original_prescription,
    payee,
    referral,
    facility,
    care_team,
    supporting_info,
    diagnosis,
    insurance,
    accident,
    item,
    total,
);
domain_resource_capabilities!(Claim, ClaimBuilder);

impl Claim {
    pub fn builder() -> ClaimBuilder {
        ClaimBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// `active | cancelled | draft | entered-in-error`. Always present on a
    /// built claim.
    pub fn status(&self) -> Option<&Code> {
        self.status.as_ref()
    }

    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    pub fn sub_type(&self) -> Option<&CodeableConcept> {
        self.sub_type.as_ref()
    }

    /// `claim | preauthorization | predetermination`.
    pub fn r#use(&self) -> Option<&Code> {
        self.r#use.as_ref()
    }

    pub fn patient(&self) -> Option<&Reference> {
        self.patient.as_ref()
    }

    pub fn billable_period(&self) -> Option<&Period> {
        self.billable_period.as_ref()
    }

    pub fn created(&self) -> Option<&DateTime> {
        self.created.as_ref()
    }

    pub fn enterer(&self) -> Option<&Reference> {
        self.enterer.as_ref()
    }

    pub fn insurer(&self) -> Option<&Reference> {
        self.insurer.as_ref()
    }

    pub fn provider(&self) -> Option<&Reference> {
        self.provider.as_ref()
    }

    pub fn priority(&self) -> Option<&CodeableConcept> {
        self.priority.as_ref()
    }

    pub fn funds_reserve(&self) -> Option<&CodeableConcept> {
        self.funds_reserve.as_ref()
    }

    pub fn related(&self) -> &[ClaimRelated] {
        &self.related
    }

    pub fn prescription(&self) -> Option<&Reference> {
        self.prescription.as_ref()
    }

    pub fn original_prescription(&self) -> Option<&Reference> {
        self.original_prescription.as_ref()
    }

    pub fn payee(&self) -> Option<&ClaimPayee> {
        self.payee.as_ref()
    }

    pub fn referral(&self) -> Option<&Reference> {
        self.referral.as_ref()
    }

    pub fn facility(&self) -> Option<&Reference> {
        self.facility.as_ref()
    }

    pub fn care_team(&self) -> &[ClaimCareTeam] {
        &self.care_team
    }

    pub fn supporting_info(&self) -> &[ClaimSupportingInfo] {
        &self.supporting_info
    }

    pub fn diagnosis(&self) -> &[ClaimDiagnosis] {
        &self.diagnosis
    }

    /// Never empty on a built claim.
    pub fn insurance(&self) -> &[ClaimInsurance] {
        &self.insurance
    }

    pub fn accident(&self) -> Option<&ClaimAccident> {
        self.accident.as_ref()
    }

    pub fn item(&self) -> &[ClaimItem] {
        &self.item
    }

    pub fn total(&self) -> Option<&Money> {
        self.total.as_ref()
    }

    /// The insurance marked `focal`, if any.
    pub fn focal_insurance(&self) -> Option<&ClaimInsurance> {
        self.insurance
            .iter()
            .find(|i| i.focal().and_then(|f| f.value()).copied() == Some(true))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClaimBuilder {
    domain: DomainResource,
    identifier: Vec<Identifier>,
    status: Option<Code>,
    r#type: Option<CodeableConcept>,
    sub_type: Option<CodeableConcept>,
    r#use: Option<Code>,
    patient: Option<Reference>,
    billable_period: Option<Period>,
    created: Option<DateTime>,
    enterer: Option<Reference>,
    insurer: Option<Reference>,
    provider: Option<Reference>,
    priority: Option<CodeableConcept>,
    funds_reserve: Option<CodeableConcept>,
    related: Vec<ClaimRelated>,
    prescription: Option<Reference>,
    original_prescription: Option<Reference>,
    payee: Option<ClaimPayee>,
    referral: Option<Reference>,
    facility: Option<Reference>,
    care_team: Vec<ClaimCareTeam>,
    supporting_info: Vec<ClaimSupportingInfo>,
    diagnosis: Vec<ClaimDiagnosis>,
    insurance: Vec<ClaimInsurance>,
    accident: Option<ClaimAccident>,
    item: Vec<ClaimItem>,
    total: Option<Money>,
}

impl ClaimBuilder {
    list_setters! {
        identifier, extend_identifier, set_identifier: Identifier;
        related, extend_related, set_related: ClaimRelated;
        care_team, extend_care_team, set_care_team: ClaimCareTeam;
        supporting_info, extend_supporting_info, set_supporting_info: ClaimSupportingInfo;
        diagnosis, extend_diagnosis, set_diagnosis: ClaimDiagnosis;
        insurance, extend_insurance, set_insurance: ClaimInsurance;
        item, extend_item, set_item: ClaimItem;
    }

    pub fn status(mut self, status: impl Into<Code>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn r#type(mut self, r#type: CodeableConcept) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn sub_type(mut self, sub_type: CodeableConcept) -> Self {
        self.sub_type = Some(sub_type);
        self
    }

    pub fn r#use(mut self, r#use: impl Into<Code>) -> Self {
        self.r#use = Some(r#use.into());
        self
    }

    pub fn patient(mut self, patient: Reference) -> Self {
        self.patient = Some(patient);
        self
    }

    pub fn billable_period(mut self, billable_period: Period) -> Self {
        self.billable_period = Some(billable_period);
        self
    }

    pub fn created(mut self, created: impl Into<DateTime>) -> Self {
        self.created = Some(created.into());
        self
    }

    pub fn enterer(mut self, enterer: Reference) -> Self {
        self.enterer = Some(enterer);
        self
    }

    pub fn insurer(mut self, insurer: Reference) -> Self {
        self.insurer = Some(insurer);
        self
    }

    pub fn provider(mut self, provider: Reference) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn priority(mut self, priority: CodeableConcept) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn funds_reserve(mut self, funds_reserve: CodeableConcept) -> Self {
        self.funds_reserve = Some(funds_reserve);
        self
    }

    pub fn prescription(mut self, prescription: Reference) -> Self {
        self.prescription = Some(prescription);
        self
    }

    pub fn original_prescription(mut self, prescription: Reference) -> Self {
        self.original_prescription = Some(prescription);
        self
    }

    pub fn payee(mut self, payee: ClaimPayee) -> Self {
        self.payee = Some(payee);
        self
    }

    pub fn referral(mut self, referral: Reference) -> Self {
        self.referral = Some(referral);
        self
    }

    pub fn facility(mut self, facility: Reference) -> Self {
        self.facility = Some(facility);
        self
    }

    pub fn accident(mut self, accident: ClaimAccident) -> Self {
        self.accident = Some(accident);
        self
    }

    pub fn total(mut self, total: Money) -> Self {
        self.total = Some(total);
        self
    }
}

impl Builder for ClaimBuilder {
    type Node = Claim;

    fn build_with(self, config: &ModelConfig) -> Result<Claim> {
        let node = Claim {
            domain: self.domain,
            identifier: self.identifier,
            status: self.status,
            r#type: self.r#type,
            sub_type: self.sub_type,
            r#use: self.r#use,
            patient: self.patient,
            billable_period: self.billable_period,
            created: self.created,
            enterer: self.enterer,
            insurer: self.insurer,
            provider: self.provider,
            priority: self.priority,
            funds_reserve: self.funds_reserve,
            related: self.related,
            prescription: self.prescription,
            original_prescription: self.original_prescription,
            payee: self.payee,
            referral: self.referral,
            facility: self.facility,
            care_team: self.care_team,
            supporting_info: self.supporting_info,
            diagnosis: self.diagnosis,
            insurance: self.insurance,
            accident: self.accident,
            item: self.item,
            total: self.total,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(CLAIM_SCHEMA.type_name, config);
        node.domain.validate(&mut ctx);
        ctx.list(&IDENTIFIER, &node.identifier);
        ctx.primitive(&STATUS, node.status.as_ref());
        ctx.single(&TYPE, node.r#type.as_ref());
        ctx.single(&SUB_TYPE, node.sub_type.as_ref());
        ctx.primitive(&USE, node.r#use.as_ref());
        ctx.reference(&PATIENT, node.patient.as_ref());
        ctx.single(&BILLABLE_PERIOD, node.billable_period.as_ref());
        ctx.primitive(&CREATED, node.created.as_ref());
        ctx.reference(&ENTERER, node.enterer.as_ref());
        ctx.reference(&INSURER, node.insurer.as_ref());
        ctx.reference(&PROVIDER, node.provider.as_ref());
        ctx.single(&PRIORITY, node.priority.as_ref());
        ctx.single(&FUNDS_RESERVE, node.funds_reserve.as_ref());
        ctx.list(&RELATED, &node.related);
        ctx.reference(&PRESCRIPTION, node.prescription.as_ref());
        ctx.reference(&ORIGINAL_PRESCRIPTION, node.original_prescription.as_ref());
        ctx.single(&PAYEE, node.payee.as_ref());
        ctx.reference(&REFERRAL, node.referral.as_ref());
        ctx.reference(&FACILITY, node.facility.as_ref());
        ctx.list(&CARE_TEAM, &node.care_team);
        ctx.list(&SUPPORTING_INFO, &node.supporting_info);
        ctx.list(&DIAGNOSIS, &node.diagnosis);
        ctx.list(&INSURANCE, &node.insurance);
        ctx.single(&ACCIDENT, node.accident.as_ref());
        ctx.list(&ITEM, &node.item);
        ctx.single(&TOTAL, node.total.as_ref());
        ctx.value_or_children(
            node.domain.has_content()
                || !node.identifier.is_empty()
                || node.status.is_some()
                || node.r#type.is_some()
                || node.sub_type.is_some()
                || node.r#use.is_some()
                || node.patient.is_some()
                || node.billable_period.is_some()
                || node.created.is_some()
                || node.enterer.is_some()
                || node.insurer.is_some()
                || node.provider.is_some()
                || node.priority.is_some()
                || node.funds_reserve.is_some()
                || !node.related.is_empty()
                || node.prescription.is_some()
                || node.original_prescription.is_some()
                || node.payee.is_some()
                || node.referral.is_some()
                || node.facility.is_some()
                || !node.care_team.is_empty()
                || !node.supporting_info.is_empty()
                || !node.diagnosis.is_empty()
                || !node.insurance.is_empty()
                || node.accident.is_some()
                || !node.item.is_empty()
                || node.total.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Claim {
    type Builder = ClaimBuilder;

    fn to_builder(&self) -> ClaimBuilder {
        ClaimBuilder {
            domain: self.domain.clone(),
            identifier: self.identifier.clone(),
            status: self.status.clone(),
            r#type: self.r#type.clone(),
            sub_type: self.sub_type.clone(),
            r#use: self.r#use.clone(),
            patient: self.patient.clone(),
            billable_period: self.billable_period.clone(),
            created: self.created.clone(),
            enterer: self.enterer.clone(),
            insurer: self.insurer.clone(),
            provider: self.provider.clone(),
            priority: self.priority.clone(),
            funds_reserve: self.funds_reserve.clone(),
            related: self.related.clone(),
            prescription: self.prescription.clone(),
            original_prescription: self.original_prescription.clone(),
            payee: self.payee.clone(),
            referral: self.referral.clone(),
            facility: self.facility.clone(),
            care_team: self.care_team.clone(),
            supporting_info: self.supporting_info.clone(),
            diagnosis: self.diagnosis.clone(),
            insurance: self.insurance.clone(),
            accident: self.accident.clone(),
            item: self.item.clone(),
            total: self.total.clone(),
        }
    }
}

impl Visitable for Claim {
    fn schema(&self) -> &'static NodeSchema {
        &CLAIM_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.domain.accept_children(visitor);
        accept_list(IDENTIFIER.name, &self.identifier, visitor);
        accept_opt(STATUS.name, self.status.as_ref(), visitor);
        accept_opt(TYPE.name, self.r#type.as_ref(), visitor);
        accept_opt(SUB_TYPE.name, self.sub_type.as_ref(), visitor);
        accept_opt(USE.name, self.r#use.as_ref(), visitor);
        accept_opt(PATIENT.name, self.patient.as_ref(), visitor);
        accept_opt(BILLABLE_PERIOD.name, self.billable_period.as_ref(), visitor);
        accept_opt(CREATED.name, self.created.as_ref(), visitor);
        accept_opt(ENTERER.name, self.enterer.as_ref(), visitor);
        accept_opt(INSURER.name, self.insurer.as_ref(), visitor);
        accept_opt(PROVIDER.name, self.provider.as_ref(), visitor);
        accept_opt(PRIORITY.name, self.priority.as_ref(), visitor);
        accept_opt(FUNDS_RESERVE.name, self.funds_reserve.as_ref(), visitor);
        accept_list(RELATED.name, &self.related, visitor);
        accept_opt(PRESCRIPTION.name, self.prescription.as_ref(), visitor);
        accept_opt(
            ORIGINAL_PRESCRIPTION.name,
            self.original_prescription.as_ref(),
            visitor,
        );
        accept_opt(PAYEE.name, self.payee.as_ref(), visitor);
        accept_opt(REFERRAL.name, self.referral.as_ref(), visitor);
        accept_opt(FACILITY.name, self.facility.as_ref(), visitor);
        accept_list(CARE_TEAM.name, &self.care_team, visitor);
        accept_list(SUPPORTING_INFO.name, &self.supporting_info, visitor);
        accept_list(DIAGNOSIS.name, &self.diagnosis, visitor);
        accept_list(INSURANCE.name, &self.insurance, visitor);
        accept_opt(ACCIDENT.name, self.accident.as_ref(), visitor);
        accept_list(ITEM.name, &self.item, visitor);
        accept_opt(TOTAL.name, self.total.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::Coding;
    use crate::error::ViolationKind;
    use crate::primitive::FhirDate;

    fn concept(system: &str, code: &str) -> CodeableConcept {
        CodeableConcept::builder()
            .coding(Coding::builder().system(system).code(code).build().unwrap())
            .build()
            .unwrap()
    }

    fn insurance(sequence: i32, focal: bool) -> ClaimInsurance {
        ClaimInsurance::builder()
            .sequence(sequence)
            .focal(focal)
            .coverage(Reference::to(format!("Coverage/cov-{}", sequence)).unwrap())
            .build()
            .unwrap()
    }

    fn minimal() -> ClaimBuilder {
        Claim::builder()
            .status("active")
            .r#type(concept(
                "http://terminology.hl7.org/CodeSystem/claim-type",
                "oral",
            ))
            .r#use("claim")
            .patient(Reference::to("Patient/1").unwrap())
            .created(FhirDate::Date(
                chrono::NaiveDate::from_ymd_opt(2014, 8, 16).unwrap(),
            ))
            .provider(Reference::to("Organization/1").unwrap())
            .priority(concept(
                "http://terminology.hl7.org/CodeSystem/processpriority",
                "normal",
            ))
            .insurance(insurance(1, true))
    }

    #[test]
    fn minimal_claim_builds() {
        let claim = minimal().build().unwrap();
        assert_eq!(claim.status().and_then(|s| s.value()).map(String::as_str), Some("active"));
        assert!(claim.item().is_empty());
        assert!(claim.related().is_empty());
    }

    #[test]
    fn every_missing_required_field_is_reported() {
        let total = Money::builder()
            .value(rust_decimal::Decimal::TEN)
            .currency("USD")
            .build()
            .unwrap();
        let err = Claim::builder().total(total).build().unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "status",
                "type",
                "use",
                "patient",
                "created",
                "provider",
                "priority",
                "insurance"
            ]
        );
        assert!(err
            .violations()
            .iter()
            .all(|v| v.kind == ViolationKind::MissingRequired));
    }

    #[test]
    fn focal_insurance_is_found() {
        let claim = minimal()
            .set_insurance([insurance(1, false), insurance(2, true)])
            .build()
            .unwrap();
        assert_eq!(
            claim.focal_insurance().and_then(|i| i.sequence()).and_then(|s| s.value()),
            Some(&2)
        );
    }

    #[test]
    fn provider_may_be_any_declared_target() {
        for target in ["Practitioner/1", "PractitionerRole/1", "Organization/1"] {
            assert!(minimal()
                .provider(Reference::to(target).unwrap())
                .build()
                .is_ok());
        }
        let err = minimal()
            .provider(Reference::to("Patient/1").unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err.violations()[0].path, "Claim.provider");
    }
}
