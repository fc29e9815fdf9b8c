use crate::builder::{Builder, ElementBuilder, ToBuilder};
use crate::config::ModelConfig;
use crate::element::{Element, HasElement, ELEMENT_SCHEMA};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::{Boolean, Code, FhirString, Uri};
use crate::schema::{DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_list, accept_opt, Visitable, Visitor};
use std::any::Any;

const SYSTEM: FieldInfo = FieldInfo::new("system", &[DataType::Uri]).summary();
const VERSION: FieldInfo = FieldInfo::new("version", &[DataType::String]).summary();
const CODE: FieldInfo = FieldInfo::new("code", &[DataType::Code]).summary();
const DISPLAY: FieldInfo = FieldInfo::new("display", &[DataType::String]).summary();
const USER_SELECTED: FieldInfo = FieldInfo::new("userSelected", &[DataType::Boolean]).summary();

pub const CODING_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Coding",
    kind: NodeKind::Complex,
    base: Some(&ELEMENT_SCHEMA),
    fields: &[SYSTEM, VERSION, CODE, DISPLAY, USER_SELECTED],
    constraints: &[],
};

/// A code defined by a terminology system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coding {
    pub(crate) element: Element,
    pub(crate) system: Option<Uri>,
    pub(crate) version: Option<FhirString>,
    pub(crate) code: Option<Code>,
    pub(crate) display: Option<FhirString>,
    pub(crate) user_selected: Option<Boolean>,
    hash: HashCache,
}

cached_hash!(Coding => element, system, version, code, display, user_selected);

impl Coding {
    pub fn builder() -> CodingBuilder {
        CodingBuilder::default()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn version(&self) -> Option<&FhirString> {
        self.version.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    pub fn user_selected(&self) -> Option<&Boolean> {
        self.user_selected.as_ref()
    }

    /// Whether this coding has the given system and code values.
    pub fn is(&self, system: &str, code: &str) -> bool {
        self.system.as_ref().and_then(|s| s.value()).map(String::as_str) == Some(system)
            && self.code.as_ref().and_then(|c| c.value()).map(String::as_str) == Some(code)
    }
}

impl HasElement for Coding {
    fn element(&self) -> &Element {
        &self.element
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodingBuilder {
    element: Element,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<Boolean>,
}

impl CodingBuilder {
    pub fn system(mut self, system: impl Into<Uri>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn version(mut self, version: impl Into<FhirString>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn code(mut self, code: impl Into<Code>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn display(mut self, display: impl Into<FhirString>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn user_selected(mut self, user_selected: impl Into<Boolean>) -> Self {
        self.user_selected = Some(user_selected.into());
        self
    }
}

impl ElementBuilder for CodingBuilder {
    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Builder for CodingBuilder {
    type Node = Coding;

    fn build_with(self, config: &ModelConfig) -> Result<Coding> {
        let node = Coding {
            element: self.element,
            system: self.system,
            version: self.version,
            code: self.code,
            display: self.display,
            user_selected: self.user_selected,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(CODING_SCHEMA.type_name, config);
        ctx.element(&node.element);
        ctx.primitive(&SYSTEM, node.system.as_ref());
        ctx.primitive(&VERSION, node.version.as_ref());
        ctx.primitive(&CODE, node.code.as_ref());
        ctx.primitive(&DISPLAY, node.display.as_ref());
        ctx.primitive(&USER_SELECTED, node.user_selected.as_ref());
        ctx.value_or_children(
            node.element.has_content()
                || node.system.is_some()
                || node.version.is_some()
                || node.code.is_some()
                || node.display.is_some()
                || node.user_selected.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Coding {
    type Builder = CodingBuilder;

    fn to_builder(&self) -> CodingBuilder {
        CodingBuilder {
            element: self.element.clone(),
            system: self.system.clone(),
            version: self.version.clone(),
            code: self.code.clone(),
            display: self.display.clone(),
            user_selected: self.user_selected.clone(),
        }
    }
}

impl Visitable for Coding {
    fn schema(&self) -> &'static NodeSchema {
        &CODING_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_opt(SYSTEM.name, self.system.as_ref(), visitor);
        accept_opt(VERSION.name, self.version.as_ref(), visitor);
        accept_opt(CODE.name, self.code.as_ref(), visitor);
        accept_opt(DISPLAY.name, self.display.as_ref(), visitor);
        accept_opt(USER_SELECTED.name, self.user_selected.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

const CODING: FieldInfo = FieldInfo::new("coding", &[DataType::Coding])
    .repeating()
    .summary();
const TEXT: FieldInfo = FieldInfo::new("text", &[DataType::String]).summary();

pub const CODEABLE_CONCEPT_SCHEMA: NodeSchema = NodeSchema {
    type_name: "CodeableConcept",
    kind: NodeKind::Complex,
    base: Some(&ELEMENT_SCHEMA),
    fields: &[CODING, TEXT],
    constraints: &[],
};

/// A concept given by codings and/or text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeableConcept {
    pub(crate) element: Element,
    pub(crate) coding: Vec<Coding>,
    pub(crate) text: Option<FhirString>,
    hash: HashCache,
}

cached_hash!(CodeableConcept => element, coding, text);

impl CodeableConcept {
    pub fn builder() -> CodeableConceptBuilder {
        CodeableConceptBuilder::default()
    }

    pub fn coding(&self) -> &[Coding] {
        &self.coding
    }

    pub fn text(&self) -> Option<&FhirString> {
        self.text.as_ref()
    }

    pub fn has_coding(&self, system: &str, code: &str) -> bool {
        self.coding.iter().any(|c| c.is(system, code))
    }
}

impl HasElement for CodeableConcept {
    fn element(&self) -> &Element {
        &self.element
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeableConceptBuilder {
    element: Element,
    coding: Vec<Coding>,
    text: Option<FhirString>,
}

impl CodeableConceptBuilder {
    pub fn coding(mut self, coding: Coding) -> Self {
        self.coding.push(coding);
        self
    }

    pub fn extend_coding(mut self, coding: impl IntoIterator<Item = Coding>) -> Self {
        self.coding.extend(coding);
        self
    }

    pub fn set_coding(mut self, coding: impl IntoIterator<Item = Coding>) -> Self {
        self.coding = coding.into_iter().collect();
        self
    }

    pub fn text(mut self, text: impl Into<FhirString>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl ElementBuilder for CodeableConceptBuilder {
    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Builder for CodeableConceptBuilder {
    type Node = CodeableConcept;

    fn build_with(self, config: &ModelConfig) -> Result<CodeableConcept> {
        let node = CodeableConcept {
            element: self.element,
            coding: self.coding,
            text: self.text,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(CODEABLE_CONCEPT_SCHEMA.type_name, config);
        ctx.element(&node.element);
        ctx.list(&CODING, &node.coding);
        ctx.primitive(&TEXT, node.text.as_ref());
        ctx.value_or_children(
            node.element.has_content() || !node.coding.is_empty() || node.text.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for CodeableConcept {
    type Builder = CodeableConceptBuilder;

    fn to_builder(&self) -> CodeableConceptBuilder {
        CodeableConceptBuilder {
            element: self.element.clone(),
            coding: self.coding.clone(),
            text: self.text.clone(),
        }
    }
}

impl Visitable for CodeableConcept {
    fn schema(&self) -> &'static NodeSchema {
        &CODEABLE_CONCEPT_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_list(CODING.name, &self.coding, visitor);
        accept_opt(TEXT.name, self.text.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
