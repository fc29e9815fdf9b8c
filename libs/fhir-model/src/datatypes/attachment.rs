use crate::builder::{Builder, ElementBuilder, ToBuilder};
use crate::config::ModelConfig;
use crate::element::{Element, HasElement, ELEMENT_SCHEMA};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::{Base64Binary, Code, DateTime, FhirString, UnsignedInt, Uri};
use crate::schema::{Binding, Constraint, ConstraintLevel, DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_opt, Visitable, Visitor};
use std::any::Any;

const CONTENT_TYPE: FieldInfo = FieldInfo::new("contentType", &[DataType::Code])
    .summary()
    .binding(Binding::required(
        "MimeType",
        "http://hl7.org/fhir/ValueSet/mimetypes|4.3.0",
    ));
const LANGUAGE: FieldInfo = FieldInfo::new("language", &[DataType::Code]).summary();
const DATA: FieldInfo = FieldInfo::new("data", &[DataType::Base64Binary]);
const URL: FieldInfo = FieldInfo::new("url", &[DataType::Uri]).summary();
const SIZE: FieldInfo = FieldInfo::new("size", &[DataType::UnsignedInt]).summary();
const TITLE: FieldInfo = FieldInfo::new("title", &[DataType::String]).summary();
const CREATION: FieldInfo = FieldInfo::new("creation", &[DataType::DateTime]).summary();

pub const ATT_1: Constraint = Constraint {
    id: "att-1",
    level: ConstraintLevel::Rule,
    location: "(base)",
    description: "If the Attachment has data, it SHALL have a contentType",
    expression: "data.empty() or contentType.exists()",
};

pub const ATTACHMENT_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Attachment",
    kind: NodeKind::Complex,
    base: Some(&ELEMENT_SCHEMA),
    fields: &[CONTENT_TYPE, LANGUAGE, DATA, URL, SIZE, TITLE, CREATION],
    constraints: &[ATT_1],
};

/// Content in a format defined elsewhere, inline or by url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub(crate) element: Element,
    pub(crate) content_type: Option<Code>,
    pub(crate) language: Option<Code>,
    pub(crate) data: Option<Base64Binary>,
    pub(crate) url: Option<Uri>,
    pub(crate) size: Option<UnsignedInt>,
    pub(crate) title: Option<FhirString>,
    pub(crate) creation: Option<DateTime>,
    hash: HashCache,
}

cached_hash!(Attachment => element, content_type, language, data, url, size, title, creation);

impl Attachment {
    pub fn builder() -> AttachmentBuilder {
        AttachmentBuilder::default()
    }

    pub fn content_type(&self) -> Option<&Code> {
        self.content_type.as_ref()
    }

    pub fn language(&self) -> Option<&Code> {
        self.language.as_ref()
    }

    pub fn data(&self) -> Option<&Base64Binary> {
        self.data.as_ref()
    }

    pub fn url(&self) -> Option<&Uri> {
        self.url.as_ref()
    }

    pub fn size(&self) -> Option<&UnsignedInt> {
        self.size.as_ref()
    }

    pub fn title(&self) -> Option<&FhirString> {
        self.title.as_ref()
    }

    pub fn creation(&self) -> Option<&DateTime> {
        self.creation.as_ref()
    }
}

impl HasElement for Attachment {
    fn element(&self) -> &Element {
        &self.element
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttachmentBuilder {
    element: Element,
    content_type: Option<Code>,
    language: Option<Code>,
    data: Option<Base64Binary>,
    url: Option<Uri>,
    size: Option<UnsignedInt>,
    title: Option<FhirString>,
    creation: Option<DateTime>,
}

impl AttachmentBuilder {
    pub fn content_type(mut self, content_type: impl Into<Code>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn language(mut self, language: impl Into<Code>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn data(mut self, data: impl Into<Base64Binary>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn url(mut self, url: impl Into<Uri>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn size(mut self, size: impl Into<UnsignedInt>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn title(mut self, title: impl Into<FhirString>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn creation(mut self, creation: impl Into<DateTime>) -> Self {
        self.creation = Some(creation.into());
        self
    }
}

impl ElementBuilder for AttachmentBuilder {
    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Builder for AttachmentBuilder {
    type Node = Attachment;

    fn build_with(self, config: &ModelConfig) -> Result<Attachment> {
        let node = Attachment {
            element: self.element,
            content_type: self.content_type,
            language: self.language,
            data: self.data,
            url: self.url,
            size: self.size,
            title: self.title,
            creation: self.creation,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(ATTACHMENT_SCHEMA.type_name, config);
        ctx.element(&node.element);
        ctx.primitive(&CONTENT_TYPE, node.content_type.as_ref());
        ctx.primitive(&LANGUAGE, node.language.as_ref());
        ctx.primitive(&DATA, node.data.as_ref());
        ctx.primitive(&URL, node.url.as_ref());
        ctx.primitive(&SIZE, node.size.as_ref());
        ctx.primitive(&TITLE, node.title.as_ref());
        ctx.primitive(&CREATION, node.creation.as_ref());
        ctx.value_or_children(
            node.element.has_content()
                || node.content_type.is_some()
                || node.language.is_some()
                || node.data.is_some()
                || node.url.is_some()
                || node.size.is_some()
                || node.title.is_some()
                || node.creation.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Attachment {
    type Builder = AttachmentBuilder;

    fn to_builder(&self) -> AttachmentBuilder {
        AttachmentBuilder {
            element: self.element.clone(),
            content_type: self.content_type.clone(),
            language: self.language.clone(),
            data: self.data.clone(),
            url: self.url.clone(),
            size: self.size.clone(),
            title: self.title.clone(),
            creation: self.creation.clone(),
        }
    }
}

impl Visitable for Attachment {
    fn schema(&self) -> &'static NodeSchema {
        &ATTACHMENT_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_opt(CONTENT_TYPE.name, self.content_type.as_ref(), visitor);
        accept_opt(LANGUAGE.name, self.language.as_ref(), visitor);
        accept_opt(DATA.name, self.data.as_ref(), visitor);
        accept_opt(URL.name, self.url.as_ref(), visitor);
        accept_opt(SIZE.name, self.size.as_ref(), visitor);
        accept_opt(TITLE.name, self.title.as_ref(), visitor);
        accept_opt(CREATION.name, self.creation.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
