use super::{Resource, ResourceBase, ResourceNode, RESOURCE_SCHEMA};
use crate::builder::{Builder, ResourceBuilder, ToBuilder};
use crate::config::ModelConfig;
use crate::datatypes::Reference;
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::{Base64Binary, Code};
use crate::schema::{Binding, DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_opt, Visitable, Visitor};
use std::any::Any;

const CONTENT_TYPE: FieldInfo = FieldInfo::new("contentType", &[DataType::Code])
    .required()
    .summary()
    .binding(Binding::required(
        "MimeType",
        "http://hl7.org/fhir/ValueSet/mimetypes|4.3.0",
    ));
const SECURITY_CONTEXT: FieldInfo = FieldInfo::new("securityContext", &[DataType::Reference]);
const DATA: FieldInfo = FieldInfo::new("data", &[DataType::Base64Binary]);

pub const BINARY_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Binary",
    kind: NodeKind::Resource,
    base: Some(&RESOURCE_SCHEMA),
    fields: &[CONTENT_TYPE, SECURITY_CONTEXT, DATA],
    constraints: &[],
};

/// Raw content with a mime type. A bare resource: no narrative, contained
/// resources or extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    pub(crate) resource: ResourceBase,
    pub(crate) content_type: Option<Code>,
    pub(crate) security_context: Option<Reference>,
    pub(crate) data: Option<Base64Binary>,
    hash: HashCache,
}

cached_hash!(Binary => resource, content_type, security_context, data);

impl Binary {
    pub fn builder() -> BinaryBuilder {
        BinaryBuilder::default()
    }

    /// Always present on a built value.
    pub fn content_type(&self) -> Option<&Code> {
        self.content_type.as_ref()
    }

    pub fn security_context(&self) -> Option<&Reference> {
        self.security_context.as_ref()
    }

    pub fn data(&self) -> Option<&Base64Binary> {
        self.data.as_ref()
    }
}

impl ResourceNode for Binary {
    fn resource(&self) -> &ResourceBase {
        &self.resource
    }
}

impl From<Binary> for Resource {
    fn from(binary: Binary) -> Self {
        Resource::Binary(binary)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BinaryBuilder {
    resource: ResourceBase,
    content_type: Option<Code>,
    security_context: Option<Reference>,
    data: Option<Base64Binary>,
}

impl BinaryBuilder {
    pub fn content_type(mut self, content_type: impl Into<Code>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn security_context(mut self, security_context: Reference) -> Self {
        self.security_context = Some(security_context);
        self
    }

    pub fn data(mut self, data: impl Into<Base64Binary>) -> Self {
        self.data = Some(data.into());
        self
    }
}

impl ResourceBuilder for BinaryBuilder {
    fn resource_mut(&mut self) -> &mut ResourceBase {
        &mut self.resource
    }
}

impl Builder for BinaryBuilder {
    type Node = Binary;

    fn build_with(self, config: &ModelConfig) -> Result<Binary> {
        let node = Binary {
            resource: self.resource,
            content_type: self.content_type,
            security_context: self.security_context,
            data: self.data,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(BINARY_SCHEMA.type_name, config);
        node.resource.validate(&mut ctx);
        ctx.primitive(&CONTENT_TYPE, node.content_type.as_ref());
        ctx.reference(&SECURITY_CONTEXT, node.security_context.as_ref());
        ctx.primitive(&DATA, node.data.as_ref());
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Binary {
    type Builder = BinaryBuilder;

    fn to_builder(&self) -> BinaryBuilder {
        BinaryBuilder {
            resource: self.resource.clone(),
            content_type: self.content_type.clone(),
            security_context: self.security_context.clone(),
            data: self.data.clone(),
        }
    }
}

impl Visitable for Binary {
    fn schema(&self) -> &'static NodeSchema {
        &BINARY_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.resource.accept_children(visitor);
        accept_opt(CONTENT_TYPE.name, self.content_type.as_ref(), visitor);
        accept_opt(SECURITY_CONTEXT.name, self.security_context.as_ref(), visitor);
        accept_opt(DATA.name, self.data.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_needs_a_content_type() {
        let err = Binary::builder().data("aGVsbG8=").build().unwrap_err();
        assert_eq!(err.violations()[0].path, "Binary.contentType");
    }

    #[test]
    fn binary_data_must_be_base64() {
        let err = Binary::builder()
            .content_type("text/plain")
            .data("hello")
            .build()
            .unwrap_err();
        assert_eq!(err.violations()[0].field, "data");
    }

    #[test]
    fn security_context_accepts_any_resource_type() {
        let binary = Binary::builder()
            .content_type("application/pdf")
            .security_context(Reference::to("DocumentReference/doc-1").unwrap())
            .build()
            .unwrap();
        assert_eq!(Resource::from(binary).resource_type(), "Binary");
    }
}
