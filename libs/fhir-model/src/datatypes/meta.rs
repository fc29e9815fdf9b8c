use super::Coding;
use crate::builder::{Builder, ElementBuilder, ToBuilder};
use crate::config::ModelConfig;
use crate::element::{Element, HasElement, ELEMENT_SCHEMA};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::{Code, DateTime, Id, Uri, Xhtml};
use crate::schema::{Binding, DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_list, accept_opt, Visitable, Visitor};
use std::any::Any;

const VERSION_ID: FieldInfo = FieldInfo::new("versionId", &[DataType::Id]).summary();
const LAST_UPDATED: FieldInfo = FieldInfo::new("lastUpdated", &[DataType::DateTime]).summary();
const SOURCE: FieldInfo = FieldInfo::new("source", &[DataType::Uri]).summary();
const PROFILE: FieldInfo = FieldInfo::new("profile", &[DataType::Uri])
    .repeating()
    .summary();
const SECURITY: FieldInfo = FieldInfo::new("security", &[DataType::Coding])
    .repeating()
    .summary();
const TAG: FieldInfo = FieldInfo::new("tag", &[DataType::Coding])
    .repeating()
    .summary();

pub const META_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Meta",
    kind: NodeKind::Complex,
    base: Some(&ELEMENT_SCHEMA),
    fields: &[VERSION_ID, LAST_UPDATED, SOURCE, PROFILE, SECURITY, TAG],
    constraints: &[],
};

/// Version and provenance stamp of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub(crate) element: Element,
    pub(crate) version_id: Option<Id>,
    pub(crate) last_updated: Option<DateTime>,
    pub(crate) source: Option<Uri>,
    pub(crate) profile: Vec<Uri>,
    pub(crate) security: Vec<Coding>,
    pub(crate) tag: Vec<Coding>,
    hash: HashCache,
}

cached_hash!(Meta => element, version_id, last_updated, source, profile, security, tag);

impl Meta {
    pub fn builder() -> MetaBuilder {
        MetaBuilder::default()
    }

    pub fn version_id(&self) -> Option<&Id> {
        self.version_id.as_ref()
    }

    pub fn last_updated(&self) -> Option<&DateTime> {
        self.last_updated.as_ref()
    }

    pub fn source(&self) -> Option<&Uri> {
        self.source.as_ref()
    }

    pub fn profile(&self) -> &[Uri] {
        &self.profile
    }

    pub fn security(&self) -> &[Coding] {
        &self.security
    }

    pub fn tag(&self) -> &[Coding] {
        &self.tag
    }
}

impl HasElement for Meta {
    fn element(&self) -> &Element {
        &self.element
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetaBuilder {
    element: Element,
    version_id: Option<Id>,
    last_updated: Option<DateTime>,
    source: Option<Uri>,
    profile: Vec<Uri>,
    security: Vec<Coding>,
    tag: Vec<Coding>,
}

impl MetaBuilder {
    pub fn version_id(mut self, version_id: impl Into<Id>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    pub fn last_updated(mut self, last_updated: impl Into<DateTime>) -> Self {
        self.last_updated = Some(last_updated.into());
        self
    }

    pub fn source(mut self, source: impl Into<Uri>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn profile(mut self, profile: impl Into<Uri>) -> Self {
        self.profile.push(profile.into());
        self
    }

    pub fn set_profile<U: Into<Uri>>(mut self, profiles: impl IntoIterator<Item = U>) -> Self {
        self.profile = profiles.into_iter().map(Into::into).collect();
        self
    }

    pub fn security(mut self, security: Coding) -> Self {
        self.security.push(security);
        self
    }

    pub fn set_security(mut self, security: impl IntoIterator<Item = Coding>) -> Self {
        self.security = security.into_iter().collect();
        self
    }

    pub fn tag(mut self, tag: Coding) -> Self {
        self.tag.push(tag);
        self
    }

    pub fn set_tag(mut self, tags: impl IntoIterator<Item = Coding>) -> Self {
        self.tag = tags.into_iter().collect();
        self
    }
}

impl ElementBuilder for MetaBuilder {
    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Builder for MetaBuilder {
    type Node = Meta;

    fn build_with(self, config: &ModelConfig) -> Result<Meta> {
        let node = Meta {
            element: self.element,
            version_id: self.version_id,
            last_updated: self.last_updated,
            source: self.source,
            profile: self.profile,
            security: self.security,
            tag: self.tag,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(META_SCHEMA.type_name, config);
        ctx.element(&node.element);
        ctx.primitive(&VERSION_ID, node.version_id.as_ref());
        ctx.primitive(&LAST_UPDATED, node.last_updated.as_ref());
        ctx.primitive(&SOURCE, node.source.as_ref());
        ctx.primitives(&PROFILE, &node.profile);
        ctx.list(&SECURITY, &node.security);
        ctx.list(&TAG, &node.tag);
        ctx.value_or_children(
            node.element.has_content()
                || node.version_id.is_some()
                || node.last_updated.is_some()
                || node.source.is_some()
                || !node.profile.is_empty()
                || !node.security.is_empty()
                || !node.tag.is_empty(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Meta {
    type Builder = MetaBuilder;

    fn to_builder(&self) -> MetaBuilder {
        MetaBuilder {
            element: self.element.clone(),
            version_id: self.version_id.clone(),
            last_updated: self.last_updated.clone(),
            source: self.source.clone(),
            profile: self.profile.clone(),
            security: self.security.clone(),
            tag: self.tag.clone(),
        }
    }
}

impl Visitable for Meta {
    fn schema(&self) -> &'static NodeSchema {
        &META_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_opt(VERSION_ID.name, self.version_id.as_ref(), visitor);
        accept_opt(LAST_UPDATED.name, self.last_updated.as_ref(), visitor);
        accept_opt(SOURCE.name, self.source.as_ref(), visitor);
        accept_list(PROFILE.name, &self.profile, visitor);
        accept_list(SECURITY.name, &self.security, visitor);
        accept_list(TAG.name, &self.tag, visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

const STATUS: FieldInfo = FieldInfo::new("status", &[DataType::Code])
    .required()
    .binding(Binding::required(
        "NarrativeStatus",
        "http://hl7.org/fhir/ValueSet/narrative-status|4.3.0",
    ));
const DIV: FieldInfo = FieldInfo::new("div", &[DataType::Xhtml]).required();

pub const NARRATIVE_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Narrative",
    kind: NodeKind::Complex,
    base: Some(&ELEMENT_SCHEMA),
    fields: &[STATUS, DIV],
    constraints: &[],
};

/// Human-readable summary of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub(crate) element: Element,
    pub(crate) status: Option<Code>,
    pub(crate) div: Option<Xhtml>,
    hash: HashCache,
}

cached_hash!(Narrative => element, status, div);

impl Narrative {
    pub fn builder() -> NarrativeBuilder {
        NarrativeBuilder::default()
    }

    pub fn status(&self) -> Option<&Code> {
        self.status.as_ref()
    }

    pub fn div(&self) -> Option<&Xhtml> {
        self.div.as_ref()
    }
}

impl HasElement for Narrative {
    fn element(&self) -> &Element {
        &self.element
    }
}

#[derive(Debug, Clone, Default)]
pub struct NarrativeBuilder {
    element: Element,
    status: Option<Code>,
    div: Option<Xhtml>,
}

impl NarrativeBuilder {
    pub fn status(mut self, status: impl Into<Code>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn div(mut self, div: impl Into<Xhtml>) -> Self {
        self.div = Some(div.into());
        self
    }
}

impl ElementBuilder for NarrativeBuilder {
    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Builder for NarrativeBuilder {
    type Node = Narrative;

    fn build_with(self, config: &ModelConfig) -> Result<Narrative> {
        let node = Narrative {
            element: self.element,
            status: self.status,
            div: self.div,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(NARRATIVE_SCHEMA.type_name, config);
        ctx.element(&node.element);
        ctx.primitive(&STATUS, node.status.as_ref());
        ctx.primitive(&DIV, node.div.as_ref());
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Narrative {
    type Builder = NarrativeBuilder;

    fn to_builder(&self) -> NarrativeBuilder {
        NarrativeBuilder {
            element: self.element.clone(),
            status: self.status.clone(),
            div: self.div.clone(),
        }
    }
}

impl Visitable for Narrative {
    fn schema(&self) -> &'static NodeSchema {
        &NARRATIVE_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_opt(STATUS.name, self.status.as_ref(), visitor);
        accept_opt(DIV.name, self.div.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
