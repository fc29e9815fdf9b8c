//! Resources: the root-addressable nodes.
//!
//! A resource embeds a [`ResourceBase`] (logical id, meta, implicit rules,
//! language); a domain resource embeds a [`DomainResource`], which adds
//! narrative, contained resources and extension slots. [`Resource`] is the
//! closed union of every resource type in the model and is what `contained`
//! lists hold.

mod binary;
mod claim;
mod organization;
mod patient;

pub use binary::{Binary, BinaryBuilder, BINARY_SCHEMA};
pub use claim::*;
pub use organization::{Organization, OrganizationBuilder, ORGANIZATION_SCHEMA};
pub use patient::{Patient, PatientBuilder, PATIENT_SCHEMA};

use crate::datatypes::{Extension, Meta, Narrative};
use crate::element::{EXTENSION, MODIFIER_EXTENSION};
use crate::primitive::{Code, Uri};
use crate::schema::{Binding, Constraint, ConstraintLevel, DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::{primitive as checks, ValidationContext};
use crate::visitor::{accept_each, accept_list, accept_opt, ValueRef, Visitable, Visitor};

const ID: FieldInfo = FieldInfo::new("id", &[DataType::Id]).summary();
const META: FieldInfo = FieldInfo::new("meta", &[DataType::Meta]).summary();
const IMPLICIT_RULES: FieldInfo = FieldInfo::new("implicitRules", &[DataType::Uri])
    .summary()
    .modifier();
const LANGUAGE: FieldInfo = FieldInfo::new("language", &[DataType::Code]).binding(Binding {
    name: "Language",
    strength: crate::schema::BindingStrength::Preferred,
    value_set: "http://hl7.org/fhir/ValueSet/languages",
});
const TEXT: FieldInfo = FieldInfo::new("text", &[DataType::Narrative]);
const CONTAINED: FieldInfo = FieldInfo::new("contained", &[DataType::Resource]).repeating();

pub const RESOURCE_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Resource",
    kind: NodeKind::Resource,
    base: None,
    fields: &[ID, META, IMPLICIT_RULES, LANGUAGE],
    constraints: &[],
};

const fn dom_rule(id: &'static str, description: &'static str, expression: &'static str) -> Constraint {
    Constraint {
        id,
        level: ConstraintLevel::Rule,
        location: "(base)",
        description,
        expression,
    }
}

pub const DOMAIN_RESOURCE_SCHEMA: NodeSchema = NodeSchema {
    type_name: "DomainResource",
    kind: NodeKind::Resource,
    base: Some(&RESOURCE_SCHEMA),
    fields: &[TEXT, CONTAINED, EXTENSION, MODIFIER_EXTENSION],
    constraints: &[
        dom_rule(
            "dom-2",
            "If the resource is contained in another resource, it SHALL NOT contain nested Resources",
            "contained.contained.empty()",
        ),
        dom_rule(
            "dom-3",
            "If the resource is contained in another resource, it SHALL be referred to from elsewhere in the resource or SHALL refer to the containing resource",
            "contained.where((('#'+id in (%resource.descendants().reference | %resource.descendants().as(canonical) | %resource.descendants().as(uri) | %resource.descendants().as(url))) or descendants().where(reference = '#').exists() or descendants().where(as(canonical) = '#').exists() or descendants().where(as(uri) = '#').exists()).not()).trace('unmatched', id).empty()",
        ),
        dom_rule(
            "dom-4",
            "If a resource is contained in another resource, it SHALL NOT have a meta.versionId or a meta.lastUpdated",
            "contained.meta.versionId.empty() and contained.meta.lastUpdated.empty()",
        ),
        dom_rule(
            "dom-5",
            "If a resource is contained in another resource, it SHALL NOT have a security label",
            "contained.meta.security.empty()",
        ),
        Constraint {
            id: "dom-6",
            level: ConstraintLevel::Warning,
            location: "(base)",
            description: "A resource should have narrative for robust management",
            expression: "text.`div`.exists()",
        },
    ],
};

/// Fields every resource carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceBase {
    pub(crate) id: Option<String>,
    pub(crate) meta: Option<Meta>,
    pub(crate) implicit_rules: Option<Uri>,
    pub(crate) language: Option<Code>,
}

impl ResourceBase {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn implicit_rules(&self) -> Option<&Uri> {
        self.implicit_rules.as_ref()
    }

    pub fn language(&self) -> Option<&Code> {
        self.language.as_ref()
    }

    pub fn has_content(&self) -> bool {
        self.id.is_some()
            || self.meta.is_some()
            || self.implicit_rules.is_some()
            || self.language.is_some()
    }

    pub(crate) fn validate(&self, ctx: &mut ValidationContext<'_>) {
        if let Some(id) = &self.id {
            if let Err(message) = checks::check_id(id, ctx.config()) {
                ctx.invalid_primitive(ID.name, None, message);
            }
        }
        ctx.single(&META, self.meta.as_ref());
        ctx.primitive(&IMPLICIT_RULES, self.implicit_rules.as_ref());
        ctx.primitive(&LANGUAGE, self.language.as_ref());
    }

    pub(crate) fn accept_children(&self, visitor: &mut dyn Visitor) {
        if let Some(id) = &self.id {
            visitor.visit_value(ID.name, ValueRef::String(id));
        }
        accept_opt(META.name, self.meta.as_ref(), visitor);
        accept_opt(IMPLICIT_RULES.name, self.implicit_rules.as_ref(), visitor);
        accept_opt(LANGUAGE.name, self.language.as_ref(), visitor);
    }
}

/// Fields every domain resource carries on top of [`ResourceBase`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DomainResource {
    pub(crate) resource: ResourceBase,
    pub(crate) text: Option<Narrative>,
    pub(crate) contained: Vec<Resource>,
    pub(crate) extension: Vec<Extension>,
    pub(crate) modifier_extension: Vec<Extension>,
}

impl DomainResource {
    pub fn resource(&self) -> &ResourceBase {
        &self.resource
    }

    pub fn text(&self) -> Option<&Narrative> {
        self.text.as_ref()
    }

    pub fn contained(&self) -> &[Resource] {
        &self.contained
    }

    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    pub fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    pub fn has_content(&self) -> bool {
        self.resource.has_content()
            || self.text.is_some()
            || !self.contained.is_empty()
            || !self.extension.is_empty()
            || !self.modifier_extension.is_empty()
    }

    /// The contained resource with the given local id (without `#`).
    pub fn find_contained(&self, id: &str) -> Option<&Resource> {
        self.contained.iter().find(|r| r.id() == Some(id))
    }

    pub(crate) fn validate(&self, ctx: &mut ValidationContext<'_>) {
        self.resource.validate(ctx);
        ctx.single(&TEXT, self.text.as_ref());
        ctx.list(&CONTAINED, &self.contained);
        ctx.list(&EXTENSION, &self.extension);
        ctx.list(&MODIFIER_EXTENSION, &self.modifier_extension);
    }

    pub(crate) fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.resource.accept_children(visitor);
        accept_opt(TEXT.name, self.text.as_ref(), visitor);
        accept_each(
            CONTAINED.name,
            self.contained.iter().map(Resource::as_node),
            self.contained.len(),
            visitor,
        );
        accept_list(EXTENSION.name, &self.extension, visitor);
        accept_list(MODIFIER_EXTENSION.name, &self.modifier_extension, visitor);
    }
}

/// Read access to the resource capability.
pub trait ResourceNode: Visitable {
    fn resource(&self) -> &ResourceBase;

    fn id(&self) -> Option<&str> {
        self.resource().id()
    }

    fn meta(&self) -> Option<&Meta> {
        self.resource().meta()
    }

    fn implicit_rules(&self) -> Option<&Uri> {
        self.resource().implicit_rules()
    }

    fn language(&self) -> Option<&Code> {
        self.resource().language()
    }
}

/// Read access to the domain resource capability.
pub trait DomainResourceNode: ResourceNode {
    fn domain(&self) -> &DomainResource;

    fn text(&self) -> Option<&Narrative> {
        self.domain().text()
    }

    fn contained(&self) -> &[Resource] {
        self.domain().contained()
    }

    fn extension(&self) -> &[Extension] {
        self.domain().extension()
    }
}

/// Implements the resource capability traits for a domain resource type that
/// stores its [`DomainResource`] in a field named `domain`, the builder
/// traits for its builder, and the conversion into [`Resource`].
macro_rules! domain_resource_capabilities {
    ($node:ident, $builder:ty) => {
        impl $crate::resource::ResourceNode for $node {
            fn resource(&self) -> &$crate::resource::ResourceBase {
                &self.domain.resource
            }
        }

        impl $crate::resource::DomainResourceNode for $node {
            fn domain(&self) -> &$crate::resource::DomainResource {
                &self.domain
            }
        }

        impl $crate::element::HasModifierExtension for $node {
            fn modifier_extension(&self) -> &[$crate::datatypes::Extension] {
                &self.domain.modifier_extension
            }
        }

        impl $crate::builder::ResourceBuilder for $builder {
            fn resource_mut(&mut self) -> &mut $crate::resource::ResourceBase {
                &mut self.domain.resource
            }
        }

        impl $crate::builder::DomainResourceBuilder for $builder {
            fn domain_mut(&mut self) -> &mut $crate::resource::DomainResource {
                &mut self.domain
            }
        }

        impl From<$node> for $crate::resource::Resource {
            fn from(resource: $node) -> Self {
                $crate::resource::Resource::$node(resource)
            }
        }
    };
}

pub(crate) use domain_resource_capabilities;

/// Every resource type in the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    Binary(Binary),
    Claim(Claim),
    Organization(Organization),
    Patient(Patient),
}

impl Resource {
    pub fn resource_type(&self) -> &'static str {
        self.as_node().type_name()
    }

    pub fn as_node(&self) -> &dyn Visitable {
        match self {
            Resource::Binary(r) => r,
            Resource::Claim(r) => r,
            Resource::Organization(r) => r,
            Resource::Patient(r) => r,
        }
    }

    pub fn base(&self) -> &ResourceBase {
        match self {
            Resource::Binary(r) => r.resource(),
            Resource::Claim(r) => r.resource(),
            Resource::Organization(r) => r.resource(),
            Resource::Patient(r) => r.resource(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.base().id()
    }

    /// The resource as a `T`, if it is one.
    pub fn get<T: Visitable>(&self) -> Option<&T> {
        self.as_node().downcast_ref::<T>()
    }

    pub fn hash_code(&self) -> u64 {
        match self {
            Resource::Binary(r) => r.hash_code(),
            Resource::Claim(r) => r.hash_code(),
            Resource::Organization(r) => r.hash_code(),
            Resource::Patient(r) => r.hash_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{Builder, DomainResourceBuilder, ResourceBuilder};

    #[test]
    fn resource_ids_use_the_id_rule() {
        let err = Patient::builder().id("bad id!").build().unwrap_err();
        assert_eq!(err.violations()[0].path, "Patient.id");
        assert!(Patient::builder().id("pat-1").build().is_ok());
    }

    #[test]
    fn contained_resources_are_found_by_local_id() {
        let org = Organization::builder().id("org1").name("Acme").build().unwrap();
        let patient = Patient::builder()
            .contained(org.clone())
            .managing_organization(crate::datatypes::Reference::to("#org1").unwrap())
            .build()
            .unwrap();
        let found = patient.domain().find_contained("org1").unwrap();
        assert_eq!(found.resource_type(), "Organization");
        assert_eq!(found.get::<Organization>(), Some(&org));
    }

    #[test]
    fn abstract_schemas_chain() {
        let names: Vec<_> = DOMAIN_RESOURCE_SCHEMA
            .all_fields()
            .iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "id",
                "meta",
                "implicitRules",
                "language",
                "text",
                "contained",
                "extension",
                "modifierExtension"
            ]
        );
    }
}
