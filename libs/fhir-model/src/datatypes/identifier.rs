use super::{CodeableConcept, Period, Reference};
use crate::builder::{Builder, ElementBuilder, ToBuilder};
use crate::config::ModelConfig;
use crate::element::{Element, HasElement, ELEMENT_SCHEMA};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::{Code, FhirString, Uri};
use crate::schema::{Binding, DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_opt, Visitable, Visitor};
use std::any::Any;

const USE: FieldInfo = FieldInfo::new("use", &[DataType::Code])
    .summary()
    .modifier()
    .binding(Binding::required(
        "IdentifierUse",
        "http://hl7.org/fhir/ValueSet/identifier-use|4.3.0",
    ));
const TYPE: FieldInfo = FieldInfo::new("type", &[DataType::CodeableConcept]).summary();
const SYSTEM: FieldInfo = FieldInfo::new("system", &[DataType::Uri]).summary();
const VALUE: FieldInfo = FieldInfo::new("value", &[DataType::String]).summary();
const PERIOD: FieldInfo = FieldInfo::new("period", &[DataType::Period]).summary();
const ASSIGNER: FieldInfo = FieldInfo::new("assigner", &[DataType::Reference])
    .summary()
    .targets(&["Organization"]);

pub const IDENTIFIER_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Identifier",
    kind: NodeKind::Complex,
    base: Some(&ELEMENT_SCHEMA),
    fields: &[USE, TYPE, SYSTEM, VALUE, PERIOD, ASSIGNER],
    constraints: &[],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub(crate) element: Element,
    pub(crate) r#use: Option<Code>,
    pub(crate) r#type: Option<CodeableConcept>,
    pub(crate) system: Option<Uri>,
    pub(crate) value: Option<FhirString>,
    pub(crate) period: Option<Period>,
    pub(crate) assigner: Option<Reference>,
    hash: HashCache,
}

cached_hash!(Identifier => element, r#use, r#type, system, value, period, assigner);

impl Identifier {
    pub fn builder() -> IdentifierBuilder {
        IdentifierBuilder::default()
    }

    pub fn r#use(&self) -> Option<&Code> {
        self.r#use.as_ref()
    }

    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn value(&self) -> Option<&FhirString> {
        self.value.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn assigner(&self) -> Option<&Reference> {
        self.assigner.as_ref()
    }
}

impl HasElement for Identifier {
    fn element(&self) -> &Element {
        &self.element
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdentifierBuilder {
    element: Element,
    r#use: Option<Code>,
    r#type: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
    assigner: Option<Reference>,
}

impl IdentifierBuilder {
    pub fn r#use(mut self, r#use: impl Into<Code>) -> Self {
        self.r#use = Some(r#use.into());
        self
    }

    pub fn r#type(mut self, r#type: CodeableConcept) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn system(mut self, system: impl Into<Uri>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn value(mut self, value: impl Into<FhirString>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn assigner(mut self, assigner: Reference) -> Self {
        self.assigner = Some(assigner);
        self
    }
}

impl ElementBuilder for IdentifierBuilder {
    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Builder for IdentifierBuilder {
    type Node = Identifier;

    fn build_with(self, config: &ModelConfig) -> Result<Identifier> {
        let node = Identifier {
            element: self.element,
            r#use: self.r#use,
            r#type: self.r#type,
            system: self.system,
            value: self.value,
            period: self.period,
            assigner: self.assigner,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(IDENTIFIER_SCHEMA.type_name, config);
        ctx.element(&node.element);
        ctx.primitive(&USE, node.r#use.as_ref());
        ctx.single(&TYPE, node.r#type.as_ref());
        ctx.primitive(&SYSTEM, node.system.as_ref());
        ctx.primitive(&VALUE, node.value.as_ref());
        ctx.single(&PERIOD, node.period.as_ref());
        ctx.reference(&ASSIGNER, node.assigner.as_ref());
        ctx.value_or_children(
            node.element.has_content()
                || node.r#use.is_some()
                || node.r#type.is_some()
                || node.system.is_some()
                || node.value.is_some()
                || node.period.is_some()
                || node.assigner.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Identifier {
    type Builder = IdentifierBuilder;

    fn to_builder(&self) -> IdentifierBuilder {
        IdentifierBuilder {
            element: self.element.clone(),
            r#use: self.r#use.clone(),
            r#type: self.r#type.clone(),
            system: self.system.clone(),
            value: self.value.clone(),
            period: self.period.clone(),
            assigner: self.assigner.clone(),
        }
    }
}

impl Visitable for Identifier {
    fn schema(&self) -> &'static NodeSchema {
        &IDENTIFIER_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_opt(USE.name, self.r#use.as_ref(), visitor);
        accept_opt(TYPE.name, self.r#type.as_ref(), visitor);
        accept_opt(SYSTEM.name, self.system.as_ref(), visitor);
        accept_opt(VALUE.name, self.value.as_ref(), visitor);
        accept_opt(PERIOD.name, self.period.as_ref(), visitor);
        accept_opt(ASSIGNER.name, self.assigner.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
