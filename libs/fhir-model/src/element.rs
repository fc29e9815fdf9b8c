//! Capability structs shared by every non-resource node.
//!
//! Node types embed these by value instead of inheriting from them: a
//! complex datatype holds an [`Element`], a backbone element holds a
//! [`BackboneElement`]. Validation and traversal work on the embedded struct.

use crate::datatypes::Extension;
use crate::schema::{Constraint, ConstraintLevel, DataType, FieldInfo, NodeKind, NodeSchema};
use crate::visitor::{accept_list, ValueRef, Visitor};

pub const ELE_1: Constraint = Constraint {
    id: "ele-1",
    level: ConstraintLevel::Rule,
    location: "(base)",
    description: "All FHIR elements must have a @value or children",
    expression: "hasValue() or (children().count() > id.count())",
};

pub const EXT_1: Constraint = Constraint {
    id: "ext-1",
    level: ConstraintLevel::Rule,
    location: "(base)",
    description: "Must have either extensions or value[x], not both",
    expression: "extension.exists() != value.exists()",
};

pub(crate) const ID: FieldInfo = FieldInfo::new("id", &[DataType::String]);
pub(crate) const EXTENSION: FieldInfo =
    FieldInfo::new("extension", &[DataType::Extension]).repeating();
pub(crate) const MODIFIER_EXTENSION: FieldInfo =
    FieldInfo::new("modifierExtension", &[DataType::Extension])
        .repeating()
        .summary()
        .modifier();

pub const ELEMENT_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Element",
    kind: NodeKind::Complex,
    base: None,
    fields: &[ID, EXTENSION],
    constraints: &[ELE_1],
};

pub const BACKBONE_ELEMENT_SCHEMA: NodeSchema = NodeSchema {
    type_name: "BackboneElement",
    kind: NodeKind::Backbone,
    base: Some(&ELEMENT_SCHEMA),
    fields: &[MODIFIER_EXTENSION],
    constraints: &[],
};

/// Internal id and extensions carried by every element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Element {
    pub(crate) id: Option<String>,
    pub(crate) extension: Vec<Extension>,
}

impl Element {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    /// Whether the id or any extension is set. These count as children for
    /// the value-or-children rule.
    pub fn has_content(&self) -> bool {
        self.id.is_some() || !self.extension.is_empty()
    }

    /// Extensions with the given url, in stored order.
    pub fn extensions_by_url<'a>(&'a self, url: &'a str) -> impl Iterator<Item = &'a Extension> {
        self.extension.iter().filter(move |e| e.url() == Some(url))
    }

    pub(crate) fn accept_children(&self, visitor: &mut dyn Visitor) {
        if let Some(id) = &self.id {
            visitor.visit_value(ID.name, ValueRef::String(id));
        }
        accept_list(EXTENSION.name, &self.extension, visitor);
    }
}

/// An [`Element`] plus modifier extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BackboneElement {
    pub(crate) element: Element,
    pub(crate) modifier_extension: Vec<Extension>,
}

impl BackboneElement {
    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    pub fn has_content(&self) -> bool {
        self.element.has_content() || !self.modifier_extension.is_empty()
    }

    pub(crate) fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_list(MODIFIER_EXTENSION.name, &self.modifier_extension, visitor);
    }
}

/// Read access to the element capability of a node.
pub trait HasElement {
    fn element(&self) -> &Element;

    fn id(&self) -> Option<&str> {
        self.element().id()
    }

    fn extension(&self) -> &[Extension] {
        self.element().extension()
    }
}

/// Read access to modifier extensions, implemented by backbone elements and
/// domain resources.
pub trait HasModifierExtension {
    fn modifier_extension(&self) -> &[Extension];

    /// A consumer that does not understand every modifier extension must not
    /// interpret the containing node.
    fn has_modifier_extension(&self) -> bool {
        !self.modifier_extension().is_empty()
    }
}

impl HasElement for BackboneElement {
    fn element(&self) -> &Element {
        &self.element
    }
}

impl HasModifierExtension for BackboneElement {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

/// Implements the element capability traits for a backbone node type that
/// stores its [`BackboneElement`] in a field named `backbone`, and the
/// matching builder traits for its builder.
macro_rules! backbone_capabilities {
    ($node:ty, $builder:ty) => {
        impl $crate::element::HasElement for $node {
            fn element(&self) -> &$crate::element::Element {
                &self.backbone.element
            }
        }

        impl $crate::element::HasModifierExtension for $node {
            fn modifier_extension(&self) -> &[$crate::datatypes::Extension] {
                &self.backbone.modifier_extension
            }
        }

        impl $crate::builder::ElementBuilder for $builder {
            fn element_mut(&mut self) -> &mut $crate::element::Element {
                &mut self.backbone.element
            }
        }

        impl $crate::builder::BackboneElementBuilder for $builder {
            fn backbone_mut(&mut self) -> &mut $crate::element::BackboneElement {
                &mut self.backbone
            }
        }
    };
}

pub(crate) use backbone_capabilities;
