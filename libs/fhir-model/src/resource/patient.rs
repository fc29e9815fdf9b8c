use super::{domain_resource_capabilities, DomainResource, DOMAIN_RESOURCE_SCHEMA};
use crate::builder::{Builder, ToBuilder};
use crate::config::ModelConfig;
use crate::datatypes::{Identifier, Reference};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::{Boolean, Code, Date};
use crate::schema::{Binding, DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_list, accept_opt, Visitable, Visitor};
use std::any::Any;

const IDENTIFIER: FieldInfo = FieldInfo::new("identifier", &[DataType::Identifier])
    .repeating()
    .summary();
const ACTIVE: FieldInfo = FieldInfo::new("active", &[DataType::Boolean])
    .summary()
    .modifier();
const GENDER: FieldInfo = FieldInfo::new("gender", &[DataType::Code])
    .summary()
    .binding(Binding::required(
        "AdministrativeGender",
        "http://hl7.org/fhir/ValueSet/administrative-gender|4.3.0",
    ));
const BIRTH_DATE: FieldInfo = FieldInfo::new("birthDate", &[DataType::Date]).summary();
const MANAGING_ORGANIZATION: FieldInfo =
    FieldInfo::new("managingOrganization", &[DataType::Reference])
        .summary()
        .targets(&["Organization"]);

pub const PATIENT_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Patient",
    kind: NodeKind::Resource,
    base: Some(&DOMAIN_RESOURCE_SCHEMA),
    fields: &[IDENTIFIER, ACTIVE, GENDER, BIRTH_DATE, MANAGING_ORGANIZATION],
    constraints: &[],
};

/// Demographics of a person receiving care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub(crate) domain: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) active: Option<Boolean>,
    pub(crate) gender: Option<Code>,
    pub(crate) birth_date: Option<Date>,
    pub(crate) managing_organization: Option<Reference>,
    hash: HashCache,
}

cached_hash!(Patient => domain, identifier, active, gender, birth_date, managing_organization);
domain_resource_capabilities!(Patient, PatientBuilder);

impl Patient {
    pub fn builder() -> PatientBuilder {
        PatientBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn active(&self) -> Option<&Boolean> {
        self.active.as_ref()
    }

    pub fn gender(&self) -> Option<&Code> {
        self.gender.as_ref()
    }

    pub fn birth_date(&self) -> Option<&Date> {
        self.birth_date.as_ref()
    }

    pub fn managing_organization(&self) -> Option<&Reference> {
        self.managing_organization.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatientBuilder {
    domain: DomainResource,
    identifier: Vec<Identifier>,
    active: Option<Boolean>,
    gender: Option<Code>,
    birth_date: Option<Date>,
    managing_organization: Option<Reference>,
}

impl PatientBuilder {
    pub fn identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn extend_identifier(mut self, identifiers: impl IntoIterator<Item = Identifier>) -> Self {
        self.identifier.extend(identifiers);
        self
    }

    pub fn set_identifier(mut self, identifiers: impl IntoIterator<Item = Identifier>) -> Self {
        self.identifier = identifiers.into_iter().collect();
        self
    }

    pub fn active(mut self, active: impl Into<Boolean>) -> Self {
        self.active = Some(active.into());
        self
    }

    pub fn gender(mut self, gender: impl Into<Code>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn birth_date(mut self, birth_date: impl Into<Date>) -> Self {
        self.birth_date = Some(birth_date.into());
        self
    }

    pub fn managing_organization(mut self, organization: Reference) -> Self {
        self.managing_organization = Some(organization);
        self
    }
}

impl Builder for PatientBuilder {
    type Node = Patient;

    fn build_with(self, config: &ModelConfig) -> Result<Patient> {
        let node = Patient {
            domain: self.domain,
            identifier: self.identifier,
            active: self.active,
            gender: self.gender,
            birth_date: self.birth_date,
            managing_organization: self.managing_organization,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(PATIENT_SCHEMA.type_name, config);
        node.domain.validate(&mut ctx);
        ctx.list(&IDENTIFIER, &node.identifier);
        ctx.primitive(&ACTIVE, node.active.as_ref());
        ctx.primitive(&GENDER, node.gender.as_ref());
        ctx.primitive(&BIRTH_DATE, node.birth_date.as_ref());
        ctx.reference(&MANAGING_ORGANIZATION, node.managing_organization.as_ref());
        ctx.value_or_children(
            node.domain.has_content()
                || !node.identifier.is_empty()
                || node.active.is_some()
                || node.gender.is_some()
                || node.birth_date.is_some()
                || node.managing_organization.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Patient {
    type Builder = PatientBuilder;

    fn to_builder(&self) -> PatientBuilder {
        PatientBuilder {
            domain: self.domain.clone(),
            identifier: self.identifier.clone(),
            active: self.active.clone(),
            gender: self.gender.clone(),
            birth_date: self.birth_date.clone(),
            managing_organization: self.managing_organization.clone(),
        }
    }
}

impl Visitable for Patient {
    fn schema(&self) -> &'static NodeSchema {
        &PATIENT_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.domain.accept_children(visitor);
        accept_list(IDENTIFIER.name, &self.identifier, visitor);
        accept_opt(ACTIVE.name, self.active.as_ref(), visitor);
        accept_opt(GENDER.name, self.gender.as_ref(), visitor);
        accept_opt(BIRTH_DATE.name, self.birth_date.as_ref(), visitor);
        accept_opt(
            MANAGING_ORGANIZATION.name,
            self.managing_organization.as_ref(),
            visitor,
        );
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
