//! Immutable, validated FHIR node trees.
//!
//! This crate provides the typed-tree framework FHIR resource types are built
//! on, together with a small set of datatypes and resources expressed in it.
//!
//! # Module Organization
//!
//! - `schema`: declarative field and constraint metadata per node type
//! - `primitive`, `datatypes`, `resource`: the node types
//! - `choice`: the closed union stored by `value[x]`-style fields
//! - `builder`, `validation`: staged construction checked once at `build()`
//! - `visitor`: generic pre-order traversal with paired enter/exit hooks
//!
//! # Design
//!
//! - **Immutable**: nodes are created through builders and never change;
//!   edits go through `to_builder()` and a fresh `build()`
//! - **Validated once**: `build()` reports every cardinality, choice-type,
//!   reference-target, format and emptiness violation together
//! - **Composition**: element, backbone and resource capabilities are
//!   embedded structs with accessor traits, not a class hierarchy
//! - **Thread-safe**: built nodes are `Send + Sync`; hash codes are cached
//!   in a write-once cell
//!
//! # Example
//!
//! ```rust
//! use ferrum_model::datatypes::{CodeableConcept, Coding, Reference};
//! use ferrum_model::prelude::*;
//! use ferrum_model::resource::{Claim, ClaimInsurance};
//! use ferrum_model::primitive::FhirDate;
//!
//! fn concept(code: &str) -> CodeableConcept {
//!     CodeableConcept::builder()
//!         .coding(Coding::builder().code(code).build().unwrap())
//!         .build()
//!         .unwrap()
//! }
//!
//! let insurance = ClaimInsurance::builder()
//!     .sequence(1)
//!     .focal(true)
//!     .coverage(Reference::to("Coverage/9876B1").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let builder = Claim::builder()
//!     .status("active")
//!     .r#type(concept("oral"))
//!     .r#use("claim")
//!     .created(FhirDate::Year(2014))
//!     .provider(Reference::to("Organization/1").unwrap())
//!     .priority(concept("normal"))
//!     .insurance(insurance);
//!
//! let err = builder
//!     .clone()
//!     .patient(Reference::to("Organization/1").unwrap())
//!     .build()
//!     .unwrap_err();
//! assert_eq!(err.violations()[0].field, "patient");
//!
//! let claim = builder
//!     .patient(Reference::to("Patient/1").unwrap())
//!     .build()
//!     .unwrap();
//! assert_eq!(claim.to_builder().build().unwrap(), claim);
//! ```

pub mod builder;
pub mod choice;
pub mod config;
pub mod datatypes;
pub mod element;
pub mod error;
pub mod hash;
pub mod prelude;
pub mod primitive;
pub mod resource;
pub mod schema;
pub mod validation;
pub mod visitor;

pub use builder::{present_elements, Builder, ToBuilder};
pub use choice::Value;
pub use config::ModelConfig;
pub use error::{Error, Result, ValidationError, Violation, ViolationKind};
pub use resource::Resource;
pub use visitor::{walk, walk_root, Visitable, Visitor};
