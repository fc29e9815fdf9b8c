use super::Period;
use crate::builder::{Builder, ElementBuilder, ToBuilder};
use crate::config::ModelConfig;
use crate::element::{Element, HasElement, ELEMENT_SCHEMA};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::{Code, FhirString};
use crate::schema::{Binding, DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_list, accept_opt, Visitable, Visitor};
use std::any::Any;

const USE: FieldInfo = FieldInfo::new("use", &[DataType::Code])
    .summary()
    .modifier()
    .binding(Binding::required(
        "AddressUse",
        "http://hl7.org/fhir/ValueSet/address-use|4.3.0",
    ));
const TYPE: FieldInfo = FieldInfo::new("type", &[DataType::Code])
    .summary()
    .binding(Binding::required(
        "AddressType",
        "http://hl7.org/fhir/ValueSet/address-type|4.3.0",
    ));
const TEXT: FieldInfo = FieldInfo::new("text", &[DataType::String]).summary();
const LINE: FieldInfo = FieldInfo::new("line", &[DataType::String])
    .repeating()
    .summary();
const CITY: FieldInfo = FieldInfo::new("city", &[DataType::String]).summary();
const DISTRICT: FieldInfo = FieldInfo::new("district", &[DataType::String]).summary();
const STATE: FieldInfo = FieldInfo::new("state", &[DataType::String]).summary();
const POSTAL_CODE: FieldInfo = FieldInfo::new("postalCode", &[DataType::String]).summary();
const COUNTRY: FieldInfo = FieldInfo::new("country", &[DataType::String]).summary();
const PERIOD: FieldInfo = FieldInfo::new("period", &[DataType::Period]).summary();

pub const ADDRESS_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Address",
    kind: NodeKind::Complex,
    base: Some(&ELEMENT_SCHEMA),
    fields: &[USE, TYPE, TEXT, LINE, CITY, DISTRICT, STATE, POSTAL_CODE, COUNTRY, PERIOD],
    constraints: &[],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub(crate) element: Element,
    pub(crate) r#use: Option<Code>,
    pub(crate) r#type: Option<Code>,
    pub(crate) text: Option<FhirString>,
    pub(crate) line: Vec<FhirString>,
    pub(crate) city: Option<FhirString>,
    pub(crate) district: Option<FhirString>,
    pub(crate) state: Option<FhirString>,
    pub(crate) postal_code: Option<FhirString>,
    pub(crate) country: Option<FhirString>,
    pub(crate) period: Option<Period>,
    hash: HashCache,
}

cached_hash!(Address =>
    element, r#use, r#type, text, line, city, district, state, postal_code, country, period,
);

impl Address {
    pub fn builder() -> AddressBuilder {
        AddressBuilder::default()
    }

    pub fn r#use(&self) -> Option<&Code> {
        self.r#use.as_ref()
    }

    pub fn r#type(&self) -> Option<&Code> {
        self.r#type.as_ref()
    }

    pub fn text(&self) -> Option<&FhirString> {
        self.text.as_ref()
    }

    pub fn line(&self) -> &[FhirString] {
        &self.line
    }

    pub fn city(&self) -> Option<&FhirString> {
        self.city.as_ref()
    }

    pub fn district(&self) -> Option<&FhirString> {
        self.district.as_ref()
    }

    pub fn state(&self) -> Option<&FhirString> {
        self.state.as_ref()
    }

    pub fn postal_code(&self) -> Option<&FhirString> {
        self.postal_code.as_ref()
    }

    pub fn country(&self) -> Option<&FhirString> {
        self.country.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }
}

impl HasElement for Address {
    fn element(&self) -> &Element {
        &self.element
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddressBuilder {
    element: Element,
    r#use: Option<Code>,
    r#type: Option<Code>,
    text: Option<FhirString>,
    line: Vec<FhirString>,
    city: Option<FhirString>,
    district: Option<FhirString>,
    state: Option<FhirString>,
    postal_code: Option<FhirString>,
    country: Option<FhirString>,
    period: Option<Period>,
}

impl AddressBuilder {
    pub fn r#use(mut self, r#use: impl Into<Code>) -> Self {
        self.r#use = Some(r#use.into());
        self
    }

    pub fn r#type(mut self, r#type: impl Into<Code>) -> Self {
        self.r#type = Some(r#type.into());
        self
    }

    pub fn text(mut self, text: impl Into<FhirString>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn line(mut self, line: impl Into<FhirString>) -> Self {
        self.line.push(line.into());
        self
    }

    pub fn extend_line<S: Into<FhirString>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.line.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn set_line<S: Into<FhirString>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.line = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn city(mut self, city: impl Into<FhirString>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn district(mut self, district: impl Into<FhirString>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn state(mut self, state: impl Into<FhirString>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn postal_code(mut self, postal_code: impl Into<FhirString>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn country(mut self, country: impl Into<FhirString>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }
}

impl ElementBuilder for AddressBuilder {
    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Builder for AddressBuilder {
    type Node = Address;

    fn build_with(self, config: &ModelConfig) -> Result<Address> {
        let node = Address {
            element: self.element,
            r#use: self.r#use,
            r#type: self.r#type,
            text: self.text,
            line: self.line,
            city: self.city,
            district: self.district,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
            period: self.period,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(ADDRESS_SCHEMA.type_name, config);
        ctx.element(&node.element);
        ctx.primitive(&USE, node.r#use.as_ref());
        ctx.primitive(&TYPE, node.r#type.as_ref());
        ctx.primitive(&TEXT, node.text.as_ref());
        ctx.primitives(&LINE, &node.line);
        ctx.primitive(&CITY, node.city.as_ref());
        ctx.primitive(&DISTRICT, node.district.as_ref());
        ctx.primitive(&STATE, node.state.as_ref());
        ctx.primitive(&POSTAL_CODE, node.postal_code.as_ref());
        ctx.primitive(&COUNTRY, node.country.as_ref());
        ctx.single(&PERIOD, node.period.as_ref());
        ctx.value_or_children(
            node.element.has_content()
                || node.r#use.is_some()
                || node.r#type.is_some()
                || node.text.is_some()
                || !node.line.is_empty()
                || node.city.is_some()
                || node.district.is_some()
                || node.state.is_some()
                || node.postal_code.is_some()
                || node.country.is_some()
                || node.period.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Address {
    type Builder = AddressBuilder;

    fn to_builder(&self) -> AddressBuilder {
        AddressBuilder {
            element: self.element.clone(),
            r#use: self.r#use.clone(),
            r#type: self.r#type.clone(),
            text: self.text.clone(),
            line: self.line.clone(),
            city: self.city.clone(),
            district: self.district.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
            period: self.period.clone(),
        }
    }
}

impl Visitable for Address {
    fn schema(&self) -> &'static NodeSchema {
        &ADDRESS_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_opt(USE.name, self.r#use.as_ref(), visitor);
        accept_opt(TYPE.name, self.r#type.as_ref(), visitor);
        accept_opt(TEXT.name, self.text.as_ref(), visitor);
        accept_list(LINE.name, &self.line, visitor);
        accept_opt(CITY.name, self.city.as_ref(), visitor);
        accept_opt(DISTRICT.name, self.district.as_ref(), visitor);
        accept_opt(STATE.name, self.state.as_ref(), visitor);
        accept_opt(POSTAL_CODE.name, self.postal_code.as_ref(), visitor);
        accept_opt(COUNTRY.name, self.country.as_ref(), visitor);
        accept_opt(PERIOD.name, self.period.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
