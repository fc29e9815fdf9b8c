use crate::builder::{Builder, ElementBuilder, ToBuilder};
use crate::config::ModelConfig;
use crate::element::{Element, HasElement, ELEMENT_SCHEMA};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::{Code, Decimal, FhirString, Uri};
use crate::schema::{Binding, Constraint, ConstraintLevel, DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_opt, Visitable, Visitor};
use std::any::Any;

const VALUE: FieldInfo = FieldInfo::new("value", &[DataType::Decimal]).summary();
const COMPARATOR: FieldInfo = FieldInfo::new("comparator", &[DataType::Code])
    .summary()
    .modifier()
    .binding(Binding::required(
        "QuantityComparator",
        "http://hl7.org/fhir/ValueSet/quantity-comparator|4.3.0",
    ));
const UNIT: FieldInfo = FieldInfo::new("unit", &[DataType::String]).summary();
const SYSTEM: FieldInfo = FieldInfo::new("system", &[DataType::Uri]).summary();
const CODE: FieldInfo = FieldInfo::new("code", &[DataType::Code]).summary();

pub const QTY_3: Constraint = Constraint {
    id: "qty-3",
    level: ConstraintLevel::Rule,
    location: "(base)",
    description: "If a code for the unit is present, the system SHALL also be present",
    expression: "code.empty() or system.exists()",
};

pub const QUANTITY_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Quantity",
    kind: NodeKind::Complex,
    base: Some(&ELEMENT_SCHEMA),
    fields: &[VALUE, COMPARATOR, UNIT, SYSTEM, CODE],
    constraints: &[QTY_3],
};

/// A measured amount, optionally coded in a unit system such as UCUM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    pub(crate) element: Element,
    pub(crate) value: Option<Decimal>,
    pub(crate) comparator: Option<Code>,
    pub(crate) unit: Option<FhirString>,
    pub(crate) system: Option<Uri>,
    pub(crate) code: Option<Code>,
    hash: HashCache,
}

cached_hash!(Quantity => element, value, comparator, unit, system, code);

impl Quantity {
    pub fn builder() -> QuantityBuilder {
        QuantityBuilder::default()
    }

    pub fn value(&self) -> Option<&Decimal> {
        self.value.as_ref()
    }

    pub fn comparator(&self) -> Option<&Code> {
        self.comparator.as_ref()
    }

    pub fn unit(&self) -> Option<&FhirString> {
        self.unit.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }
}

impl HasElement for Quantity {
    fn element(&self) -> &Element {
        &self.element
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuantityBuilder {
    element: Element,
    value: Option<Decimal>,
    comparator: Option<Code>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
}

impl QuantityBuilder {
    pub fn value(mut self, value: impl Into<Decimal>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn comparator(mut self, comparator: impl Into<Code>) -> Self {
        self.comparator = Some(comparator.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<FhirString>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn system(mut self, system: impl Into<Uri>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn code(mut self, code: impl Into<Code>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl ElementBuilder for QuantityBuilder {
    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Builder for QuantityBuilder {
    type Node = Quantity;

    fn build_with(self, config: &ModelConfig) -> Result<Quantity> {
        let node = Quantity {
            element: self.element,
            value: self.value,
            comparator: self.comparator,
            unit: self.unit,
            system: self.system,
            code: self.code,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(QUANTITY_SCHEMA.type_name, config);
        ctx.element(&node.element);
        ctx.primitive(&VALUE, node.value.as_ref());
        ctx.primitive(&COMPARATOR, node.comparator.as_ref());
        ctx.primitive(&UNIT, node.unit.as_ref());
        ctx.primitive(&SYSTEM, node.system.as_ref());
        ctx.primitive(&CODE, node.code.as_ref());
        ctx.value_or_children(
            node.element.has_content()
                || node.value.is_some()
                || node.comparator.is_some()
                || node.unit.is_some()
                || node.system.is_some()
                || node.code.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Quantity {
    type Builder = QuantityBuilder;

    fn to_builder(&self) -> QuantityBuilder {
        QuantityBuilder {
            element: self.element.clone(),
            value: self.value.clone(),
            comparator: self.comparator.clone(),
            unit: self.unit.clone(),
            system: self.system.clone(),
            code: self.code.clone(),
        }
    }
}

impl Visitable for Quantity {
    fn schema(&self) -> &'static NodeSchema {
        &QUANTITY_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_opt(VALUE.name, self.value.as_ref(), visitor);
        accept_opt(COMPARATOR.name, self.comparator.as_ref(), visitor);
        accept_opt(UNIT.name, self.unit.as_ref(), visitor);
        accept_opt(SYSTEM.name, self.system.as_ref(), visitor);
        accept_opt(CODE.name, self.code.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

const MONEY_VALUE: FieldInfo = FieldInfo::new("value", &[DataType::Decimal]).summary();
const CURRENCY: FieldInfo = FieldInfo::new("currency", &[DataType::Code])
    .summary()
    .binding(Binding::required(
        "CurrencyCode",
        "http://hl7.org/fhir/ValueSet/currencies|4.3.0",
    ));

pub const MONEY_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Money",
    kind: NodeKind::Complex,
    base: Some(&ELEMENT_SCHEMA),
    fields: &[MONEY_VALUE, CURRENCY],
    constraints: &[],
};

/// An amount of currency (ISO 4217 code).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    pub(crate) element: Element,
    pub(crate) value: Option<Decimal>,
    pub(crate) currency: Option<Code>,
    hash: HashCache,
}

cached_hash!(Money => element, value, currency);

impl Money {
    pub fn builder() -> MoneyBuilder {
        MoneyBuilder::default()
    }

    pub fn value(&self) -> Option<&Decimal> {
        self.value.as_ref()
    }

    pub fn currency(&self) -> Option<&Code> {
        self.currency.as_ref()
    }
}

impl HasElement for Money {
    fn element(&self) -> &Element {
        &self.element
    }
}

#[derive(Debug, Clone, Default)]
pub struct MoneyBuilder {
    element: Element,
    value: Option<Decimal>,
    currency: Option<Code>,
}

impl MoneyBuilder {
    pub fn value(mut self, value: impl Into<Decimal>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn currency(mut self, currency: impl Into<Code>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

impl ElementBuilder for MoneyBuilder {
    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Builder for MoneyBuilder {
    type Node = Money;

    fn build_with(self, config: &ModelConfig) -> Result<Money> {
        let node = Money {
            element: self.element,
            value: self.value,
            currency: self.currency,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(MONEY_SCHEMA.type_name, config);
        ctx.element(&node.element);
        ctx.primitive(&MONEY_VALUE, node.value.as_ref());
        ctx.primitive(&CURRENCY, node.currency.as_ref());
        ctx.value_or_children(
            node.element.has_content() || node.value.is_some() || node.currency.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Money {
    type Builder = MoneyBuilder;

    fn to_builder(&self) -> MoneyBuilder {
        MoneyBuilder {
            element: self.element.clone(),
            value: self.value.clone(),
            currency: self.currency.clone(),
        }
    }
}

impl Visitable for Money {
    fn schema(&self) -> &'static NodeSchema {
        &MONEY_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_opt(MONEY_VALUE.name, self.value.as_ref(), visitor);
        accept_opt(CURRENCY.name, self.currency.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
