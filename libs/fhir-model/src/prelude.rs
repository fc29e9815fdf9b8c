//! Traits needed in scope to build, read and traverse nodes.
//!
//! ```
//! use ferrum_model::prelude::*;
//! ```

pub use crate::builder::{
    BackboneElementBuilder, Builder, DomainResourceBuilder, ElementBuilder, ResourceBuilder,
    ToBuilder,
};
pub use crate::choice::ChoiceMember;
pub use crate::element::{HasElement, HasModifierExtension};
pub use crate::resource::{DomainResourceNode, ResourceNode};
pub use crate::visitor::{Visitable, Visitor};
