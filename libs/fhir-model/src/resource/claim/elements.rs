//! Small backbone elements of [`Claim`](super::Claim).

use crate::builder::{Builder, ToBuilder};
use crate::choice::Value;
use crate::config::ModelConfig;
use crate::datatypes::{Address, CodeableConcept, Identifier, Reference};
use crate::element::{backbone_capabilities, BackboneElement, BACKBONE_ELEMENT_SCHEMA};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::{Boolean, Date, FhirString, PositiveInt};
use crate::schema::{DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_choice, accept_list, accept_opt, Visitable, Visitor};
use std::any::Any;

const RELATED_CLAIM: FieldInfo =
    FieldInfo::new("claim", &[DataType::Reference]).targets(&["Claim"]);
const RELATED_RELATIONSHIP: FieldInfo =
    FieldInfo::new("relationship", &[DataType::CodeableConcept]);
const RELATED_REFERENCE: FieldInfo = FieldInfo::new("reference", &[DataType::Identifier]);

pub const CLAIM_RELATED_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Claim.related",
    kind: NodeKind::Backbone,
    base: Some(&BACKBONE_ELEMENT_SCHEMA),
    fields: &[RELATED_CLAIM, RELATED_RELATIONSHIP, RELATED_REFERENCE],
    constraints: &[],
};

/// A prior or corollary claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRelated {
    pub(crate) backbone: BackboneElement,
    pub(crate) claim: Option<Reference>,
    pub(crate) relationship: Option<CodeableConcept>,
    pub(crate) reference: Option<Identifier>,
    hash: HashCache,
}

cached_hash!(ClaimRelated => backbone, claim, relationship, reference);
backbone_capabilities!(ClaimRelated, ClaimRelatedBuilder);

impl ClaimRelated {
    pub fn builder() -> ClaimRelatedBuilder {
        ClaimRelatedBuilder::default()
    }

    pub fn claim(&self) -> Option<&Reference> {
        self.claim.as_ref()
    }

    pub fn relationship(&self) -> Option<&CodeableConcept> {
        self.relationship.as_ref()
    }

    /// File or case reference of the related claim.
    pub fn reference(&self) -> Option<&Identifier> {
        self.reference.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClaimRelatedBuilder {
    backbone: BackboneElement,
    claim: Option<Reference>,
    relationship: Option<CodeableConcept>,
    reference: Option<Identifier>,
}

impl ClaimRelatedBuilder {
    pub fn claim(mut self, claim: Reference) -> Self {
        self.claim = Some(claim);
        self
    }

    pub fn relationship(mut self, relationship: CodeableConcept) -> Self {
        self.relationship = Some(relationship);
        self
    }

    pub fn reference(mut self, reference: Identifier) -> Self {
        self.reference = Some(reference);
        self
    }
}

impl Builder for ClaimRelatedBuilder {
    type Node = ClaimRelated;

    fn build_with(self, config: &ModelConfig) -> Result<ClaimRelated> {
        let node = ClaimRelated {
            backbone: self.backbone,
            claim: self.claim,
            relationship: self.relationship,
            reference: self.reference,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(CLAIM_RELATED_SCHEMA.type_name, config);
        ctx.backbone(&node.backbone);
        ctx.reference(&RELATED_CLAIM, node.claim.as_ref());
        ctx.single(&RELATED_RELATIONSHIP, node.relationship.as_ref());
        ctx.single(&RELATED_REFERENCE, node.reference.as_ref());
        ctx.value_or_children(
            node.backbone.has_content()
                || node.claim.is_some()
                || node.relationship.is_some()
                || node.reference.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for ClaimRelated {
    type Builder = ClaimRelatedBuilder;

    fn to_builder(&self) -> ClaimRelatedBuilder {
        ClaimRelatedBuilder {
            backbone: self.backbone.clone(),
            claim: self.claim.clone(),
            relationship: self.relationship.clone(),
            reference: self.reference.clone(),
        }
    }
}

impl Visitable for ClaimRelated {
    fn schema(&self) -> &'static NodeSchema {
        &CLAIM_RELATED_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.backbone.accept_children(visitor);
        accept_opt(RELATED_CLAIM.name, self.claim.as_ref(), visitor);
        accept_opt(RELATED_RELATIONSHIP.name, self.relationship.as_ref(), visitor);
        accept_opt(RELATED_REFERENCE.name, self.reference.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

const PAYEE_TYPE: FieldInfo = FieldInfo::new("type", &[DataType::CodeableConcept]).required();
const PAYEE_PARTY: FieldInfo = FieldInfo::new("party", &[DataType::Reference]).targets(&[
    "Practitioner",
    "PractitionerRole",
    "Organization",
    "Patient",
    "RelatedPerson",
]);

pub const CLAIM_PAYEE_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Claim.payee",
    kind: NodeKind::Backbone,
    base: Some(&BACKBONE_ELEMENT_SCHEMA),
    fields: &[PAYEE_TYPE, PAYEE_PARTY],
    constraints: &[],
};

/// Recipient of the benefits payable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimPayee {
    pub(crate) backbone: BackboneElement,
    pub(crate) r#type: Option<CodeableConcept>,
    pub(crate) party: Option<Reference>,
    hash: HashCache,
}

cached_hash!(ClaimPayee => backbone, r#type, party);
backbone_capabilities!(ClaimPayee, ClaimPayeeBuilder);

impl ClaimPayee {
    pub fn builder() -> ClaimPayeeBuilder {
        ClaimPayeeBuilder::default()
    }

    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    pub fn party(&self) -> Option<&Reference> {
        self.party.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClaimPayeeBuilder {
    backbone: BackboneElement,
    r#type: Option<CodeableConcept>,
    party: Option<Reference>,
}

impl ClaimPayeeBuilder {
    pub fn r#type(mut self, r#type: CodeableConcept) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn party(mut self, party: Reference) -> Self {
        self.party = Some(party);
        self
    }
}

impl Builder for ClaimPayeeBuilder {
    type Node = ClaimPayee;

    fn build_with(self, config: &ModelConfig) -> Result<ClaimPayee> {
        let node = ClaimPayee {
            backbone: self.backbone,
            r#type: self.r#type,
            party: self.party,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(CLAIM_PAYEE_SCHEMA.type_name, config);
        ctx.backbone(&node.backbone);
        ctx.single(&PAYEE_TYPE, node.r#type.as_ref());
        ctx.reference(&PAYEE_PARTY, node.party.as_ref());
        ctx.value_or_children(
            node.backbone.has_content() || node.r#type.is_some() || node.party.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for ClaimPayee {
    type Builder = ClaimPayeeBuilder;

    fn to_builder(&self) -> ClaimPayeeBuilder {
        ClaimPayeeBuilder {
            backbone: self.backbone.clone(),
            r#type: self.r#type.clone(),
            party: self.party.clone(),
        }
    }
}

impl Visitable for ClaimPayee {
    fn schema(&self) -> &'static NodeSchema {
        &CLAIM_PAYEE_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.backbone.accept_children(visitor);
        accept_opt(PAYEE_TYPE.name, self.r#type.as_ref(), visitor);
        accept_opt(PAYEE_PARTY.name, self.party.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

const CARE_TEAM_SEQUENCE: FieldInfo =
    FieldInfo::new("sequence", &[DataType::PositiveInt]).required();
const CARE_TEAM_PROVIDER: FieldInfo = FieldInfo::new("provider", &[DataType::Reference])
    .required()
    .targets(&["Practitioner", "PractitionerRole", "Organization"]);
const CARE_TEAM_RESPONSIBLE: FieldInfo = FieldInfo::new("responsible", &[DataType::Boolean]);
const CARE_TEAM_ROLE: FieldInfo = FieldInfo::new("role", &[DataType::CodeableConcept]);
const CARE_TEAM_QUALIFICATION: FieldInfo =
    FieldInfo::new("qualification", &[DataType::CodeableConcept]);

pub const CLAIM_CARE_TEAM_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Claim.careTeam",
    kind: NodeKind::Backbone,
    base: Some(&BACKBONE_ELEMENT_SCHEMA),
    fields: &[
        CARE_TEAM_SEQUENCE,
        CARE_TEAM_PROVIDER,
        CARE_TEAM_RESPONSIBLE,
        CARE_TEAM_ROLE,
        CARE_TEAM_QUALIFICATION,
    ],
    constraints: &[],
};

/// A member of the team that provided the products and services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimCareTeam {
    pub(crate) backbone: BackboneElement,
    pub(crate) sequence: Option<PositiveInt>,
    pub(crate) provider: Option<Reference>,
    pub(crate) responsible: Option<Boolean>,
    pub(crate) role: Option<CodeableConcept>,
    pub(crate) qualification: Option<CodeableConcept>,
    hash: HashCache,
}

cached_hash!(ClaimCareTeam => backbone, sequence, provider, responsible, role, qualification);
backbone_capabilities!(ClaimCareTeam, ClaimCareTeamBuilder);

impl ClaimCareTeam {
    pub fn builder() -> ClaimCareTeamBuilder {
        ClaimCareTeamBuilder::default()
    }

    pub fn sequence(&self) -> Option<&PositiveInt> {
        self.sequence.as_ref()
    }

    pub fn provider(&self) -> Option<&Reference> {
        self.provider.as_ref()
    }

    pub fn responsible(&self) -> Option<&Boolean> {
        self.responsible.as_ref()
    }

    pub fn role(&self) -> Option<&CodeableConcept> {
        self.role.as_ref()
    }

    pub fn qualification(&self) -> Option<&CodeableConcept> {
        self.qualification.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClaimCareTeamBuilder {
    backbone: BackboneElement,
    sequence: Option<PositiveInt>,
    provider: Option<Reference>,
    responsible: Option<Boolean>,
    role: Option<CodeableConcept>,
    qualification: Option<CodeableConcept>,
}

impl ClaimCareTeamBuilder {
    pub fn sequence(mut self, sequence: impl Into<PositiveInt>) -> Self {
        self.sequence = Some(sequence.into());
        self
    }

    pub fn provider(mut self, provider: Reference) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn responsible(mut self, responsible: impl Into<Boolean>) -> Self {
        self.responsible = Some(responsible.into());
        self
    }

    pub fn role(mut self, role: CodeableConcept) -> Self {
        self.role = Some(role);
        self
    }

    pub fn qualification(mut self, qualification: CodeableConcept) -> Self {
        self.qualification = Some(qualification);
        self
    }
}

impl Builder for ClaimCareTeamBuilder {
    type Node = ClaimCareTeam;

    fn build_with(self, config: &ModelConfig) -> Result<ClaimCareTeam> {
        let node = ClaimCareTeam {
            backbone: self.backbone,
            sequence: self.sequence,
            provider: self.provider,
            responsible: self.responsible,
            role: self.role,
            qualification: self.qualification,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(CLAIM_CARE_TEAM_SCHEMA.type_name, config);
        ctx.backbone(&node.backbone);
        ctx.primitive(&CARE_TEAM_SEQUENCE, node.sequence.as_ref());
        ctx.reference(&CARE_TEAM_PROVIDER, node.provider.as_ref());
        ctx.primitive(&CARE_TEAM_RESPONSIBLE, node.responsible.as_ref());
        ctx.single(&CARE_TEAM_ROLE, node.role.as_ref());
        ctx.single(&CARE_TEAM_QUALIFICATION, node.qualification.as_ref());
        ctx.value_or_children(
            node.backbone.has_content()
                || node.sequence.is_some()
                || node.provider.is_some()
                || node.responsible.is_some()
                || node.role.is_some()
                || node.qualification.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for ClaimCareTeam {
    type Builder = ClaimCareTeamBuilder;

    fn to_builder(&self) -> ClaimCareTeamBuilder {
        ClaimCareTeamBuilder {
            backbone: self.backbone.clone(),
            sequence: self.sequence.clone(),
            provider: self.provider.clone(),
            responsible: self.responsible.clone(),
            role: self.role.clone(),
            qualification: self.qualification.clone(),
        }
    }
}

impl Visitable for ClaimCareTeam {
    fn schema(&self) -> &'static NodeSchema {
        &CLAIM_CARE_TEAM_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.backbone.accept_children(visitor);
        accept_opt(CARE_TEAM_SEQUENCE.name, self.sequence.as_ref(), visitor);
        accept_opt(CARE_TEAM_PROVIDER.name, self.provider.as_ref(), visitor);
        accept_opt(CARE_TEAM_RESPONSIBLE.name, self.responsible.as_ref(), visitor);
        accept_opt(CARE_TEAM_ROLE.name, self.role.as_ref(), visitor);
        accept_opt(CARE_TEAM_QUALIFICATION.name, self.qualification.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

const INSURANCE_SEQUENCE: FieldInfo =
    FieldInfo::new("sequence", &[DataType::PositiveInt]).required();
const INSURANCE_FOCAL: FieldInfo = FieldInfo::new("focal", &[DataType::Boolean]).required();
const INSURANCE_IDENTIFIER: FieldInfo = FieldInfo::new("identifier", &[DataType::Identifier]);
const INSURANCE_COVERAGE: FieldInfo = FieldInfo::new("coverage", &[DataType::Reference])
    .required()
    .targets(&["Coverage"]);
const INSURANCE_BUSINESS_ARRANGEMENT: FieldInfo =
    FieldInfo::new("businessArrangement", &[DataType::String]);
const INSURANCE_PRE_AUTH_REF: FieldInfo =
    FieldInfo::new("preAuthRef", &[DataType::String]).repeating();
const INSURANCE_CLAIM_RESPONSE: FieldInfo =
    FieldInfo::new("claimResponse", &[DataType::Reference]).targets(&["ClaimResponse"]);

pub const CLAIM_INSURANCE_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Claim.insurance",
    kind: NodeKind::Backbone,
    base: Some(&BACKBONE_ELEMENT_SCHEMA),
    fields: &[
        INSURANCE_SEQUENCE,
        INSURANCE_FOCAL,
        INSURANCE_IDENTIFIER,
        INSURANCE_COVERAGE,
        INSURANCE_BUSINESS_ARRANGEMENT,
        INSURANCE_PRE_AUTH_REF,
        INSURANCE_CLAIM_RESPONSE,
    ],
    constraints: &[],
};

/// Coverage to be used for adjudication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimInsurance {
    pub(crate) backbone: BackboneElement,
    pub(crate) sequence: Option<PositiveInt>,
    pub(crate) focal: Option<Boolean>,
    pub(crate) identifier: Option<Identifier>,
    pub(crate) coverage: Option<Reference>,
    pub(crate) business_arrangement: Option<FhirString>,
    pub(crate) pre_auth_ref: Vec<FhirString>,
    pub(crate) claim_response: Option<Reference>,
    hash: HashCache,
}

cached_hash!(ClaimInsurance =>
    backbone,
    sequence,
    focal,
    identifier,
    coverage,
    business_arrangement,
    pre_auth_ref,
    claim_response,
);
backbone_capabilities!(ClaimInsurance, ClaimInsuranceBuilder);

impl ClaimInsurance {
    pub fn builder() -> ClaimInsuranceBuilder {
        ClaimInsuranceBuilder::default()
    }

    pub fn sequence(&self) -> Option<&PositiveInt> {
        self.sequence.as_ref()
    }

    /// Whether this coverage is the one to adjudicate against.
    pub fn focal(&self) -> Option<&Boolean> {
        self.focal.as_ref()
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    pub fn coverage(&self) -> Option<&Reference> {
        self.coverage.as_ref()
    }

    pub fn business_arrangement(&self) -> Option<&FhirString> {
        self.business_arrangement.as_ref()
    }

    pub fn pre_auth_ref(&self) -> &[FhirString] {
        &self.pre_auth_ref
    }

    pub fn claim_response(&self) -> Option<&Reference> {
        self.claim_response.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClaimInsuranceBuilder {
    backbone: BackboneElement,
    sequence: Option<PositiveInt>,
    focal: Option<Boolean>,
    identifier: Option<Identifier>,
    coverage: Option<Reference>,
    business_arrangement: Option<FhirString>,
    pre_auth_ref: Vec<FhirString>,
    claim_response: Option<Reference>,
}

impl ClaimInsuranceBuilder {
    pub fn sequence(mut self, sequence: impl Into<PositiveInt>) -> Self {
        self.sequence = Some(sequence.into());
        self
    }

    pub fn focal(mut self, focal: impl Into<Boolean>) -> Self {
        self.focal = Some(focal.into());
        self
    }

    pub fn identifier(mut self, identifier: Identifier) -> Self {
        self.identifier = Some(identifier);
        self
    }

    pub fn coverage(mut self, coverage: Reference) -> Self {
        self.coverage = Some(coverage);
        self
    }

    pub fn business_arrangement(mut self, arrangement: impl Into<FhirString>) -> Self {
        self.business_arrangement = Some(arrangement.into());
        self
    }

    pub fn pre_auth_ref(mut self, pre_auth_ref: impl Into<FhirString>) -> Self {
        self.pre_auth_ref.push(pre_auth_ref.into());
        self
    }

    pub fn extend_pre_auth_ref(mut self, refs: impl IntoIterator<Item = FhirString>) -> Self {
        self.pre_auth_ref.extend(refs);
        self
    }

    pub fn set_pre_auth_ref(mut self, refs: impl IntoIterator<Item = FhirString>) -> Self {
        self.pre_auth_ref = refs.into_iter().collect();
        self
    }

    pub fn claim_response(mut self, claim_response: Reference) -> Self {
        self.claim_response = Some(claim_response);
        self
    }
}

impl Builder for ClaimInsuranceBuilder {
    type Node = ClaimInsurance;

    fn build_with(self, config: &ModelConfig) -> Result<ClaimInsurance> {
        let node = ClaimInsurance {
            backbone: self.backbone,
            sequence: self.sequence,
            focal: self.focal,
            identifier: self.identifier,
            coverage: self.coverage,
            business_arrangement: self.business_arrangement,
            pre_auth_ref: self.pre_auth_ref,
            claim_response: self.claim_response,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(CLAIM_INSURANCE_SCHEMA.type_name, config);
        ctx.backbone(&node.backbone);
        ctx.primitive(&INSURANCE_SEQUENCE, node.sequence.as_ref());
        ctx.primitive(&INSURANCE_FOCAL, node.focal.as_ref());
        ctx.single(&INSURANCE_IDENTIFIER, node.identifier.as_ref());
        ctx.reference(&INSURANCE_COVERAGE, node.coverage.as_ref());
        ctx.primitive(
            &INSURANCE_BUSINESS_ARRANGEMENT,
            node.business_arrangement.as_ref(),
        );
        ctx.primitives(&INSURANCE_PRE_AUTH_REF, &node.pre_auth_ref);
        ctx.reference(&INSURANCE_CLAIM_RESPONSE, node.claim_response.as_ref());
        ctx.value_or_children(
            node.backbone.has_content()
                || node.sequence.is_some()
                || node.focal.is_some()
                || node.identifier.is_some()
                || node.coverage.is_some()
                || node.business_arrangement.is_some()
                || !node.pre_auth_ref.is_empty()
                || node.claim_response.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for ClaimInsurance {
    type Builder = ClaimInsuranceBuilder;

    fn to_builder(&self) -> ClaimInsuranceBuilder {
        ClaimInsuranceBuilder {
            backbone: self.backbone.clone(),
            sequence: self.sequence.clone(),
            focal: self.focal.clone(),
            identifier: self.identifier.clone(),
            coverage: self.coverage.clone(),
            business_arrangement: self.business_arrangement.clone(),
            pre_auth_ref: self.pre_auth_ref.clone(),
            claim_response: self.claim_response.clone(),
        }
    }
}

impl Visitable for ClaimInsurance {
    fn schema(&self) -> &'static NodeSchema {
        &CLAIM_INSURANCE_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.backbone.accept_children(visitor);
        accept_opt(INSURANCE_SEQUENCE.name, self.sequence.as_ref(), visitor);
        accept_opt(INSURANCE_FOCAL.name, self.focal.as_ref(), visitor);
        accept_opt(INSURANCE_IDENTIFIER.name, self.identifier.as_ref(), visitor);
        accept_opt(INSURANCE_COVERAGE.name, self.coverage.as_ref(), visitor);
        accept_opt(
            INSURANCE_BUSINESS_ARRANGEMENT.name,
            self.business_arrangement.as_ref(),
            visitor,
        );
        accept_list(INSURANCE_PRE_AUTH_REF.name, &self.pre_auth_ref, visitor);
        accept_opt(INSURANCE_CLAIM_RESPONSE.name, self.claim_response.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

const ACCIDENT_DATE: FieldInfo = FieldInfo::new("date", &[DataType::Date]).required();
const ACCIDENT_TYPE: FieldInfo = FieldInfo::new("type", &[DataType::CodeableConcept]);
const ACCIDENT_LOCATION: FieldInfo =
    FieldInfo::new("location", &[DataType::Address, DataType::Reference]).targets(&["Location"]);

pub const CLAIM_ACCIDENT_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Claim.accident",
    kind: NodeKind::Backbone,
    base: Some(&BACKBONE_ELEMENT_SCHEMA),
    fields: &[ACCIDENT_DATE, ACCIDENT_TYPE, ACCIDENT_LOCATION],
    constraints: &[],
};

/// Details of the event when the services were required by an accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimAccident {
    pub(crate) backbone: BackboneElement,
    pub(crate) date: Option<Date>,
    pub(crate) r#type: Option<CodeableConcept>,
    pub(crate) location: Option<Value>,
    hash: HashCache,
}

cached_hash!(ClaimAccident => backbone, date, r#type, location);
backbone_capabilities!(ClaimAccident, ClaimAccidentBuilder);

impl ClaimAccident {
    pub fn builder() -> ClaimAccidentBuilder {
        ClaimAccidentBuilder::default()
    }

    pub fn date(&self) -> Option<&Date> {
        self.date.as_ref()
    }

    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    /// `locationAddress` or `locationReference`.
    pub fn location(&self) -> Option<&Value> {
        self.location.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClaimAccidentBuilder {
    backbone: BackboneElement,
    date: Option<Date>,
    r#type: Option<CodeableConcept>,
    location: Option<Value>,
}

impl ClaimAccidentBuilder {
    pub fn date(mut self, date: impl Into<Date>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn r#type(mut self, r#type: CodeableConcept) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn location(mut self, location: impl Into<Value>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn location_address(self, address: Address) -> Self {
        self.location(address)
    }

    pub fn location_reference(self, reference: Reference) -> Self {
        self.location(reference)
    }
}

impl Builder for ClaimAccidentBuilder {
    type Node = ClaimAccident;

    fn build_with(self, config: &ModelConfig) -> Result<ClaimAccident> {
        let node = ClaimAccident {
            backbone: self.backbone,
            date: self.date,
            r#type: self.r#type,
            location: self.location,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(CLAIM_ACCIDENT_SCHEMA.type_name, config);
        ctx.backbone(&node.backbone);
        ctx.primitive(&ACCIDENT_DATE, node.date.as_ref());
        ctx.single(&ACCIDENT_TYPE, node.r#type.as_ref());
        ctx.choice(&ACCIDENT_LOCATION, node.location.as_ref());
        ctx.value_or_children(
            node.backbone.has_content()
                || node.date.is_some()
                || node.r#type.is_some()
                || node.location.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for ClaimAccident {
    type Builder = ClaimAccidentBuilder;

    fn to_builder(&self) -> ClaimAccidentBuilder {
        ClaimAccidentBuilder {
            backbone: self.backbone.clone(),
            date: self.date.clone(),
            r#type: self.r#type.clone(),
            location: self.location.clone(),
        }
    }
}

impl Visitable for ClaimAccident {
    fn schema(&self) -> &'static NodeSchema {
        &CLAIM_ACCIDENT_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.backbone.accept_children(visitor);
        accept_opt(ACCIDENT_DATE.name, self.date.as_ref(), visitor);
        accept_opt(ACCIDENT_TYPE.name, self.r#type.as_ref(), visitor);
        accept_choice(&ACCIDENT_LOCATION, self.location.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViolationKind;
    use crate::primitive::FhirDate;

    #[test]
    fn insurance_requires_sequence_focal_and_coverage() {
        let err = ClaimInsurance::builder()
            .business_arrangement("group-7")
            .build()
            .unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["sequence", "focal", "coverage"]);
    }

    #[test]
    fn care_team_sequence_must_be_positive() {
        let err = ClaimCareTeam::builder()
            .sequence(0)
            .provider(Reference::to("Practitioner/p1").unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err.violations()[0].path, "Claim.careTeam.sequence");
    }

    #[test]
    fn accident_location_rejects_types_outside_its_choice() {
        let err = ClaimAccident::builder()
            .date(FhirDate::Year(2023))
            .location(FhirString::of("on the corner".to_string()))
            .build()
            .unwrap_err();
        assert!(matches!(
            err.violations()[0].kind,
            ViolationKind::ChoiceType { found: "string", .. }
        ));
    }

    #[test]
    fn accident_location_reference_is_target_checked() {
        let err = ClaimAccident::builder()
            .date(FhirDate::Year(2023))
            .location_reference(Reference::to("Patient/p1").unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(
            err.violations()[0].kind,
            ViolationKind::ReferenceTarget { .. }
        ));
        assert!(ClaimAccident::builder()
            .date(FhirDate::Year(2023))
            .location_reference(Reference::to("Location/l1").unwrap())
            .build()
            .is_ok());
    }
}
