use super::Identifier;
use crate::builder::{Builder, ElementBuilder, ToBuilder};
use crate::config::ModelConfig;
use crate::element::{Element, HasElement, ELEMENT_SCHEMA};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::{FhirString, Uri};
use crate::schema::{Constraint, ConstraintLevel, DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::reference::literal_kind;
use crate::validation::ValidationContext;
use crate::visitor::{accept_opt, Visitable, Visitor};
use std::any::Any;

const REFERENCE: FieldInfo = FieldInfo::new("reference", &[DataType::String]).summary();
const TYPE: FieldInfo = FieldInfo::new("type", &[DataType::Uri]).summary();
const IDENTIFIER: FieldInfo = FieldInfo::new("identifier", &[DataType::Identifier]).summary();
const DISPLAY: FieldInfo = FieldInfo::new("display", &[DataType::String]).summary();

pub const REF_1: Constraint = Constraint {
    id: "ref-1",
    level: ConstraintLevel::Rule,
    location: "(base)",
    description: "SHALL have a contained resource if a local reference is provided",
    expression: "reference.startsWith('#').not() or (reference.substring(1).trace('url') in %rootResource.contained.id.trace('ids'))",
};

pub const REFERENCE_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Reference",
    kind: NodeKind::Complex,
    base: Some(&ELEMENT_SCHEMA),
    fields: &[REFERENCE, TYPE, IDENTIFIER, DISPLAY],
    constraints: &[REF_1],
};

/// A pointer to another resource, by literal reference, logical identifier
/// or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub(crate) element: Element,
    pub(crate) reference: Option<FhirString>,
    pub(crate) r#type: Option<Uri>,
    pub(crate) identifier: Option<Box<Identifier>>,
    pub(crate) display: Option<FhirString>,
    hash: HashCache,
}

cached_hash!(Reference => element, reference, r#type, identifier, display);

impl Reference {
    pub fn builder() -> ReferenceBuilder {
        ReferenceBuilder::default()
    }

    /// Shorthand for a reference holding only a literal reference string.
    pub fn to(reference: impl Into<String>) -> Result<Reference> {
        Reference::builder().reference(reference.into()).build()
    }

    pub fn reference(&self) -> Option<&FhirString> {
        self.reference.as_ref()
    }

    pub fn r#type(&self) -> Option<&Uri> {
        self.r#type.as_ref()
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_deref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    pub fn reference_value(&self) -> Option<&str> {
        self.reference.as_ref().and_then(|r| r.value()).map(String::as_str)
    }

    pub fn type_value(&self) -> Option<&str> {
        self.r#type.as_ref().and_then(|t| t.value()).map(String::as_str)
    }

    /// Whether the literal reference points at a contained resource.
    pub fn is_local(&self) -> bool {
        self.reference_value().is_some_and(|r| r.starts_with('#'))
    }

    /// The resource kind named by the reference, from `type` or the literal.
    pub fn target_kind(&self) -> Option<&str> {
        self.type_value()
            .or_else(|| self.reference_value().and_then(literal_kind))
    }
}

impl HasElement for Reference {
    fn element(&self) -> &Element {
        &self.element
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceBuilder {
    element: Element,
    reference: Option<FhirString>,
    r#type: Option<Uri>,
    identifier: Option<Box<Identifier>>,
    display: Option<FhirString>,
}

impl ReferenceBuilder {
    pub fn reference(mut self, reference: impl Into<FhirString>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn r#type(mut self, r#type: impl Into<Uri>) -> Self {
        self.r#type = Some(r#type.into());
        self
    }

    pub fn identifier(mut self, identifier: Identifier) -> Self {
        self.identifier = Some(Box::new(identifier));
        self
    }

    pub fn display(mut self, display: impl Into<FhirString>) -> Self {
        self.display = Some(display.into());
        self
    }
}

impl ElementBuilder for ReferenceBuilder {
    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Builder for ReferenceBuilder {
    type Node = Reference;

    fn build_with(self, config: &ModelConfig) -> Result<Reference> {
        let node = Reference {
            element: self.element,
            reference: self.reference,
            r#type: self.r#type,
            identifier: self.identifier,
            display: self.display,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(REFERENCE_SCHEMA.type_name, config);
        ctx.element(&node.element);
        ctx.primitive(&REFERENCE, node.reference.as_ref());
        ctx.primitive(&TYPE, node.r#type.as_ref());
        ctx.single(&IDENTIFIER, node.identifier.as_ref());
        ctx.primitive(&DISPLAY, node.display.as_ref());
        ctx.value_or_children(
            node.element.has_content()
                || node.reference.is_some()
                || node.r#type.is_some()
                || node.identifier.is_some()
                || node.display.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Reference {
    type Builder = ReferenceBuilder;

    fn to_builder(&self) -> ReferenceBuilder {
        ReferenceBuilder {
            element: self.element.clone(),
            reference: self.reference.clone(),
            r#type: self.r#type.clone(),
            identifier: self.identifier.clone(),
            display: self.display.clone(),
        }
    }
}

impl Visitable for Reference {
    fn schema(&self) -> &'static NodeSchema {
        &REFERENCE_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_opt(REFERENCE.name, self.reference.as_ref(), visitor);
        accept_opt(TYPE.name, self.r#type.as_ref(), visitor);
        accept_opt(IDENTIFIER.name, self.identifier.as_deref(), visitor);
        accept_opt(DISPLAY.name, self.display.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_kind_prefers_the_explicit_type() {
        let reference = Reference::builder()
            .reference("Patient/1")
            .r#type("Group")
            .build()
            .unwrap();
        assert_eq!(reference.target_kind(), Some("Group"));
        assert_eq!(Reference::to("Patient/1").unwrap().target_kind(), Some("Patient"));
        assert!(Reference::to("#p1").unwrap().is_local());
    }

    #[test]
    fn empty_reference_is_rejected() {
        let err = Reference::builder().build().unwrap_err();
        assert_eq!(err.violations().len(), 1);
    }
}
