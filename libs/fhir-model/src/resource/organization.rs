use super::{domain_resource_capabilities, DomainResource, DOMAIN_RESOURCE_SCHEMA};
use crate::builder::{Builder, ToBuilder};
use crate::config::ModelConfig;
use crate::datatypes::{CodeableConcept, Identifier, Reference};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::{Boolean, FhirString};
use crate::schema::{Constraint, ConstraintLevel, DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_list, accept_opt, Visitable, Visitor};
use std::any::Any;

const IDENTIFIER: FieldInfo = FieldInfo::new("identifier", &[DataType::Identifier])
    .repeating()
    .summary();
const ACTIVE: FieldInfo = FieldInfo::new("active", &[DataType::Boolean])
    .summary()
    .modifier();
const TYPE: FieldInfo = FieldInfo::new("type", &[DataType::CodeableConcept])
    .repeating()
    .summary();
const NAME: FieldInfo = FieldInfo::new("name", &[DataType::String]).summary();
const PART_OF: FieldInfo = FieldInfo::new("partOf", &[DataType::Reference])
    .summary()
    .targets(&["Organization"]);

pub const ORGANIZATION_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Organization",
    kind: NodeKind::Resource,
    base: Some(&DOMAIN_RESOURCE_SCHEMA),
    fields: &[IDENTIFIER, ACTIVE, TYPE, NAME, PART_OF],
    constraints: &[Constraint {
        id: "org-1",
        level: ConstraintLevel::Rule,
        location: "(base)",
        description: "The organization SHALL at least have a name or an identifier, and possibly more than one",
        expression: "(identifier.count() + name.count()) > 0",
    }],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub(crate) domain: DomainResource,
    pub(crate) identifier: Vec<Identifier>,
    pub(crate) active: Option<Boolean>,
    pub(crate) r#type: Vec<CodeableConcept>,
    pub(crate) name: Option<FhirString>,
    pub(crate) part_of: Option<Reference>,
    hash: HashCache,
}

cached_hash!(Organization => domain, identifier, active, r#type, name, part_of);
domain_resource_capabilities!(Organization, OrganizationBuilder);

impl Organization {
    pub fn builder() -> OrganizationBuilder {
        OrganizationBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn active(&self) -> Option<&Boolean> {
        self.active.as_ref()
    }

    pub fn r#type(&self) -> &[CodeableConcept] {
        &self.r#type
    }

    pub fn name(&self) -> Option<&FhirString> {
        self.name.as_ref()
    }

    pub fn part_of(&self) -> Option<&Reference> {
        self.part_of.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrganizationBuilder {
    domain: DomainResource,
    identifier: Vec<Identifier>,
    active: Option<Boolean>,
    r#type: Vec<CodeableConcept>,
    name: Option<FhirString>,
    part_of: Option<Reference>,
}

impl OrganizationBuilder {
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

    pub fn r#type(mut self, r#type: CodeableConcept) -> Self {
        self.r#type.push(r#type);
        self
    }

    pub fn extend_type(mut self, types: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.r#type.extend(types);
        self
    }

    pub fn set_type(mut self, types: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.r#type = types.into_iter().collect();
        self
    }

    pub fn name(mut self, name: impl Into<FhirString>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn part_of(mut self, part_of: Reference) -> Self {
        self.part_of = Some(part_of);
        self
    }
}

impl Builder for OrganizationBuilder {
    type Node = Organization;

    fn build_with(self, config: &ModelConfig) -> Result<Organization> {
        let node = Organization {
            domain: self.domain,
            identifier: self.identifier,
            active: self.active,
            r#type: self.r#type,
            name: self.name,
            part_of: self.part_of,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(ORGANIZATION_SCHEMA.type_name, config);
        node.domain.validate(&mut ctx);
        ctx.list(&IDENTIFIER, &node.identifier);
        ctx.primitive(&ACTIVE, node.active.as_ref());
        ctx.list(&TYPE, &node.r#type);
        ctx.primitive(&NAME, node.name.as_ref());
        ctx.reference(&PART_OF, node.part_of.as_ref());
        ctx.value_or_children(
            node.domain.has_content()
                || !node.identifier.is_empty()
                || node.active.is_some()
                || !node.r#type.is_empty()
                || node.name.is_some()
                || node.part_of.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Organization {
    type Builder = OrganizationBuilder;

    fn to_builder(&self) -> OrganizationBuilder {
        OrganizationBuilder {
            domain: self.domain.clone(),
            identifier: self.identifier.clone(),
            active: self.active.clone(),
            r#type: self.r#type.clone(),
            name: self.name.clone(),
            part_of: self.part_of.clone(),
        }
    }
}

impl Visitable for Organization {
    fn schema(&self) -> &'static NodeSchema {
        &ORGANIZATION_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.domain.accept_children(visitor);
        accept_list(IDENTIFIER.name, &self.identifier, visitor);
        accept_opt(ACTIVE.name, self.active.as_ref(), visitor);
        accept_list(TYPE.name, &self.r#type, visitor);
        accept_opt(NAME.name, self.name.as_ref(), visitor);
        accept_opt(PART_OF.name, self.part_of.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
