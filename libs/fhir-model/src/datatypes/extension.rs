use crate::builder::{Builder, ElementBuilder, ToBuilder};
use crate::choice::{Value, VALUE_TYPES};
use crate::config::ModelConfig;
use crate::element::{Element, HasElement, ELEMENT_SCHEMA, EXT_1};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::schema::{DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_choice, ValueRef, Visitable, Visitor};
use std::any::Any;

const URL: FieldInfo = FieldInfo::new("url", &[DataType::Uri]).required();
const VALUE: FieldInfo = FieldInfo::new("value", VALUE_TYPES);

pub const EXTENSION_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Extension",
    kind: NodeKind::Complex,
    base: Some(&ELEMENT_SCHEMA),
    fields: &[URL, VALUE],
    constraints: &[EXT_1],
};

/// URL-keyed extension data. Complex extensions nest further extensions
/// instead of carrying a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub(crate) element: Element,
    pub(crate) url: Option<String>,
    pub(crate) value: Option<Value>,
    hash: HashCache,
}

cached_hash!(Extension => element, url, value);

impl Extension {
    pub fn builder() -> ExtensionBuilder {
        ExtensionBuilder::default()
    }

    /// Always present on a built extension.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

impl HasElement for Extension {
    fn element(&self) -> &Element {
        &self.element
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    element: Element,
    url: Option<String>,
    value: Option<Value>,
}

impl ExtensionBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl ElementBuilder for ExtensionBuilder {
    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Builder for ExtensionBuilder {
    type Node = Extension;

    fn build_with(self, config: &ModelConfig) -> Result<Extension> {
        let node = Extension {
            element: self.element,
            url: self.url,
            value: self.value,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(EXTENSION_SCHEMA.type_name, config);
        ctx.element(&node.element);
        ctx.single(&URL, node.url.as_ref());
        if let Some(url) = &node.url {
            if let Err(message) = crate::validation::primitive::check_uri(url, config) {
                ctx.invalid_primitive(URL.name, None, message);
            }
        }
        ctx.choice(&VALUE, node.value.as_ref());
        ctx.value_or_children(node.element.has_content() || node.value.is_some());
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Extension {
    type Builder = ExtensionBuilder;

    fn to_builder(&self) -> ExtensionBuilder {
        ExtensionBuilder {
            element: self.element.clone(),
            url: self.url.clone(),
            value: self.value.clone(),
        }
    }
}

impl Visitable for Extension {
    fn schema(&self) -> &'static NodeSchema {
        &EXTENSION_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        if let Some(url) = &self.url {
            visitor.visit_value(URL.name, ValueRef::String(url));
        }
        accept_choice(&VALUE, self.value.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
