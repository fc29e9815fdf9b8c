//! Builder traits.
//!
//! Builders are plain owned staging values: setters take `self` and return
//! it, `build_with` consumes the builder, validates and returns the frozen
//! node. The capability traits below provide the setters for the embedded
//! capability structs once, so node builders only implement an accessor.

use crate::config::ModelConfig;
use crate::datatypes::{Extension, Meta, Narrative};
use crate::element::{BackboneElement, Element};
use crate::error::{Error, Result};
use crate::primitive::{Code, Uri};
use crate::resource::{DomainResource, Resource, ResourceBase};

pub trait Builder: Sized {
    type Node;

    /// Validates the staged values with `config` and freezes them.
    fn build_with(self, config: &ModelConfig) -> Result<Self::Node>;

    fn build(self) -> Result<Self::Node> {
        self.build_with(&ModelConfig::default())
    }
}

/// Conversion of a built node back into a builder holding the same values.
pub trait ToBuilder {
    type Builder: Builder;

    fn to_builder(&self) -> Self::Builder;
}

pub trait ElementBuilder: Sized {
    fn element_mut(&mut self) -> &mut Element;

    fn id(mut self, id: impl Into<String>) -> Self {
        self.element_mut().id = Some(id.into());
        self
    }

    fn extension(mut self, extension: Extension) -> Self {
        self.element_mut().extension.push(extension);
        self
    }

    fn extend_extension(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.element_mut().extension.extend(extensions);
        self
    }

    fn set_extension(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.element_mut().extension = extensions.into_iter().collect();
        self
    }
}

pub trait BackboneElementBuilder: ElementBuilder {
    fn backbone_mut(&mut self) -> &mut BackboneElement;

    fn modifier_extension(mut self, extension: Extension) -> Self {
        self.backbone_mut().modifier_extension.push(extension);
        self
    }

    fn extend_modifier_extension(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.backbone_mut().modifier_extension.extend(extensions);
        self
    }

    fn set_modifier_extension(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.backbone_mut().modifier_extension = extensions.into_iter().collect();
        self
    }
}

pub trait ResourceBuilder: Sized {
    fn resource_mut(&mut self) -> &mut ResourceBase;

    /// Logical id of the resource.
    fn id(mut self, id: impl Into<String>) -> Self {
        self.resource_mut().id = Some(id.into());
        self
    }

    fn meta(mut self, meta: Meta) -> Self {
        self.resource_mut().meta = Some(meta);
        self
    }

    fn implicit_rules(mut self, implicit_rules: impl Into<Uri>) -> Self {
        self.resource_mut().implicit_rules = Some(implicit_rules.into());
        self
    }

    fn language(mut self, language: impl Into<Code>) -> Self {
        self.resource_mut().language = Some(language.into());
        self
    }
}

pub trait DomainResourceBuilder: ResourceBuilder {
    fn domain_mut(&mut self) -> &mut DomainResource;

    fn text(mut self, text: Narrative) -> Self {
        self.domain_mut().text = Some(text);
        self
    }

    fn contained(mut self, resource: impl Into<Resource>) -> Self {
        self.domain_mut().contained.push(resource.into());
        self
    }

    fn extend_contained(mut self, resources: impl IntoIterator<Item = Resource>) -> Self {
        self.domain_mut().contained.extend(resources);
        self
    }

    fn set_contained(mut self, resources: impl IntoIterator<Item = Resource>) -> Self {
        self.domain_mut().contained = resources.into_iter().collect();
        self
    }

    fn extension(mut self, extension: Extension) -> Self {
        self.domain_mut().extension.push(extension);
        self
    }

    fn extend_extension(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.domain_mut().extension.extend(extensions);
        self
    }

    fn set_extension(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.domain_mut().extension = extensions.into_iter().collect();
        self
    }

    fn modifier_extension(mut self, extension: Extension) -> Self {
        self.domain_mut().modifier_extension.push(extension);
        self
    }

    fn extend_modifier_extension(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.domain_mut().modifier_extension.extend(extensions);
        self
    }

    fn set_modifier_extension(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.domain_mut().modifier_extension = extensions.into_iter().collect();
        self
    }
}

/// Unwraps a collection from a nullable source.
///
/// Decoded wire data and foreign callers can hand over a missing collection
/// or a collection with missing entries; both are caller errors, distinct
/// from an empty collection. The typed setters cannot express either state,
/// so this is the gate such input passes before reaching them.
pub fn present_elements<T, I>(field: &str, values: Option<I>) -> Result<Vec<T>>
where
    I: IntoIterator<Item = Option<T>>,
{
    let values = values.ok_or_else(|| Error::CallerContract {
        field: field.to_string(),
        reason: "collection is absent".to_string(),
    })?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            value.ok_or_else(|| Error::CallerContract {
                field: field.to_string(),
                reason: format!("element at index {} is absent", index),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_collections_pass_through() {
        let values = present_elements("line", Some(vec![Some("a"), Some("b")])).unwrap();
        assert_eq!(values, vec!["a", "b"]);
        let empty: Vec<&str> = present_elements("line", Some(Vec::new())).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn absent_collection_is_a_caller_error() {
        let err = present_elements::<&str, Vec<Option<&str>>>("line", None).unwrap_err();
        assert!(matches!(err, Error::CallerContract { ref field, .. } if field == "line"));
    }

    #[test]
    fn absent_element_is_a_caller_error() {
        let err = present_elements("line", Some(vec![Some("a"), None])).unwrap_err();
        match err {
            Error::CallerContract { reason, .. } => assert!(reason.contains("index 1")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
