//! Complex datatypes.
//!
//! Each type follows the same layout: field metadata consts, a public
//! `*_SCHEMA`, the immutable node with accessors, its builder, and the
//! `ToBuilder` / `Visitable` impls.

mod address;
mod attachment;
mod coding;
mod extension;
mod identifier;
mod meta;
mod period;
mod quantity;
mod reference;

pub use address::{Address, AddressBuilder, ADDRESS_SCHEMA};
pub use attachment::{Attachment, AttachmentBuilder, ATTACHMENT_SCHEMA, ATT_1};
pub use coding::{
    CodeableConcept, CodeableConceptBuilder, Coding, CodingBuilder, CODEABLE_CONCEPT_SCHEMA,
    CODING_SCHEMA,
};
pub use extension::{Extension, ExtensionBuilder, EXTENSION_SCHEMA};
pub use identifier::{Identifier, IdentifierBuilder, IDENTIFIER_SCHEMA};
pub use meta::{Meta, MetaBuilder, Narrative, NarrativeBuilder, META_SCHEMA, NARRATIVE_SCHEMA};
pub use period::{Period, PeriodBuilder, PERIOD_SCHEMA, PER_1};
pub use quantity::{Money, MoneyBuilder, Quantity, QuantityBuilder, MONEY_SCHEMA, QTY_3, QUANTITY_SCHEMA};
pub use reference::{Reference, ReferenceBuilder, REFERENCE_SCHEMA, REF_1};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{Builder, ElementBuilder, ToBuilder};
    use crate::choice::Value;
    use crate::error::ViolationKind;
    use crate::primitive::{FhirDate, FhirString, PositiveInt};

    #[test]
    fn empty_composites_are_rejected() {
        let err = Period::builder().build().unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].kind, ViolationKind::Empty);
    }

    #[test]
    fn an_internal_id_counts_as_content() {
        assert!(Period::builder().id("p1").build().is_ok());
    }

    #[test]
    fn extension_requires_url_and_value_or_children() {
        let err = Extension::builder().build().unwrap_err();
        let violations = err.violations();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "url");
        assert_eq!(violations[1].kind, ViolationKind::Empty);
    }

    #[test]
    fn extensions_nest() {
        let inner = Extension::builder()
            .url("detail")
            .value(FhirString::of("x"))
            .build()
            .unwrap();
        let outer = Extension::builder()
            .url("http://example.org/fhir/StructureDefinition/complex")
            .extension(inner.clone())
            .build()
            .unwrap();
        assert_eq!(outer.element.extension(), &[inner]);
        assert!(outer.value().is_none());
    }

    #[test]
    fn extension_value_primitives_are_checked() {
        let err = Extension::builder()
            .url("http://example.org/count")
            .value(PositiveInt::of(0))
            .build()
            .unwrap_err();
        assert!(matches!(
            err.violations()[0].kind,
            ViolationKind::InvalidPrimitive { .. }
        ));
    }

    #[test]
    fn to_builder_round_trip() {
        let period = Period::builder()
            .start(FhirDate::YearMonth(2024, 1))
            .build()
            .unwrap();
        let extension = Extension::builder()
            .url("http://example.org/when")
            .value(Value::Period(period))
            .build()
            .unwrap();
        assert_eq!(extension.to_builder().build().unwrap(), extension);
    }

    #[test]
    fn narrative_requires_status_and_div() {
        let err = Narrative::builder().status("generated").build().unwrap_err();
        assert_eq!(err.violations()[0].path, "Narrative.div");
        assert!(Narrative::builder()
            .status("generated")
            .div("<div xmlns=\"http://www.w3.org/1999/xhtml\">text</div>")
            .build()
            .is_ok());
    }
}
