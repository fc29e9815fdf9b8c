//! Generic traversal over built node trees.
//!
//! Each node type implements [`Visitable::accept_children`], which only lists
//! its children in declaration order under their field names. Everything a
//! traversal does lives in the [`Visitor`]. The per-node protocol is driven by
//! [`walk`]:
//!
//! ```text
//! pre_visit ─► visit_start ─► visit ─► (children) ─► visit_end ─► post_visit
//! ```
//!
//! `pre_visit` returning `false` skips the node entirely. `visit` returning
//! `false` skips its children, but `visit_end` and `post_visit` still run, so
//! enter and exit hooks are always paired.

mod collecting;
mod constraint;
mod path;

pub use collecting::CollectingVisitor;
pub use constraint::{ConstraintEvaluator, ConstraintFailure, ConstraintVisitor};
pub use path::PathVisitor;

use crate::choice::Value;
use crate::primitive::{FhirDate, FhirDateTime};
use crate::schema::{FieldInfo, NodeKind, NodeSchema};
use std::any::Any;
use std::fmt;

/// Callbacks invoked while walking a node tree. Every method has a no-op
/// default.
pub trait Visitor {
    /// Return `false` to skip this node and its subtree.
    fn pre_visit(&mut self, _node: &dyn Visitable) -> bool {
        true
    }

    fn visit_start(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Visitable) {}

    /// Return `false` to skip the node's children.
    fn visit(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Visitable) -> bool {
        true
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Visitable) {}

    fn post_visit(&mut self, _node: &dyn Visitable) {}

    /// Called before the elements of a non-empty list field.
    fn visit_list_start(&mut self, _name: &str, _len: usize) {}

    fn visit_list_end(&mut self, _name: &str, _len: usize) {}

    /// A leaf value: a primitive's payload or an element's internal id.
    fn visit_value(&mut self, _name: &str, _value: ValueRef<'_>) {}
}

/// A node that can be walked by a [`Visitor`].
pub trait Visitable: Any + fmt::Debug + Send + Sync {
    fn schema(&self) -> &'static NodeSchema;

    /// Walks the children in field declaration order.
    fn accept_children(&self, visitor: &mut dyn Visitor);

    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &'static str {
        self.schema().type_name
    }

    fn node_kind(&self) -> NodeKind {
        self.schema().kind
    }
}

impl<'a> dyn Visitable + 'a {
    pub fn downcast_ref<T: Visitable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Visitable>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Runs the visit protocol for one node and, unless pruned, its subtree.
pub fn walk(node: &dyn Visitable, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
    if !visitor.pre_visit(node) {
        return;
    }
    visitor.visit_start(name, index, node);
    if visitor.visit(name, index, node) {
        node.accept_children(visitor);
    }
    visitor.visit_end(name, index, node);
    visitor.post_visit(node);
}

/// Walks a tree from its root, named after the root's type.
pub fn walk_root(root: &dyn Visitable, visitor: &mut dyn Visitor) {
    walk(root, root.type_name(), None, visitor);
}

pub(crate) fn accept_opt<T: Visitable>(name: &str, node: Option<&T>, visitor: &mut dyn Visitor) {
    if let Some(node) = node {
        walk(node, name, None, visitor);
    }
}

pub(crate) fn accept_list<T: Visitable>(name: &str, nodes: &[T], visitor: &mut dyn Visitor) {
    accept_each(name, nodes.iter().map(|n| n as &dyn Visitable), nodes.len(), visitor);
}

pub(crate) fn accept_each<'a>(
    name: &str,
    nodes: impl Iterator<Item = &'a dyn Visitable>,
    len: usize,
    visitor: &mut dyn Visitor,
) {
    if len == 0 {
        return;
    }
    visitor.visit_list_start(name, len);
    for (index, node) in nodes.enumerate() {
        walk(node, name, Some(index), visitor);
    }
    visitor.visit_list_end(name, len);
}

/// Visits a choice value under its type-specific element name.
pub(crate) fn accept_choice(field: &FieldInfo, value: Option<&Value>, visitor: &mut dyn Visitor) {
    if let Some(value) = value {
        let name = field.choice_element_name(value.data_type());
        walk(value.as_node(), &name, None, visitor);
    }
}

/// A borrowed leaf value reported through [`Visitor::visit_value`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRef<'a> {
    Boolean(bool),
    Integer(i32),
    Decimal(&'a rust_decimal::Decimal),
    String(&'a str),
    Date(&'a FhirDate),
    DateTime(&'a FhirDateTime),
}

impl fmt::Display for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueRef::Boolean(v) => write!(f, "{}", v),
            ValueRef::Integer(v) => write!(f, "{}", v),
            ValueRef::Decimal(v) => write!(f, "{}", v),
            ValueRef::String(v) => f.write_str(v),
            ValueRef::Date(v) => write!(f, "{}", v),
            ValueRef::DateTime(v) => write!(f, "{}", v),
        }
    }
}
