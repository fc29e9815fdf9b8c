use crate::builder::{Builder, ElementBuilder, ToBuilder};
use crate::config::ModelConfig;
use crate::element::{Element, HasElement, ELEMENT_SCHEMA};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::DateTime;
use crate::schema::{Constraint, ConstraintLevel, DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_opt, Visitable, Visitor};
use std::any::Any;

const START: FieldInfo = FieldInfo::new("start", &[DataType::DateTime]).summary();
const END: FieldInfo = FieldInfo::new("end", &[DataType::DateTime]).summary();

pub const PER_1: Constraint = Constraint {
    id: "per-1",
    level: ConstraintLevel::Rule,
    location: "(base)",
    description: "If present, start SHALL have a lower value than end",
    expression: "start.hasValue().not() or end.hasValue().not() or (start <= end)",
};

pub const PERIOD_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Period",
    kind: NodeKind::Complex,
    base: Some(&ELEMENT_SCHEMA),
    fields: &[START, END],
    constraints: &[PER_1],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub(crate) element: Element,
    pub(crate) start: Option<DateTime>,
    pub(crate) end: Option<DateTime>,
    hash: HashCache,
}

cached_hash!(Period => element, start, end);

impl Period {
    pub fn builder() -> PeriodBuilder {
        PeriodBuilder::default()
    }

    pub fn start(&self) -> Option<&DateTime> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&DateTime> {
        self.end.as_ref()
    }
}

impl HasElement for Period {
    fn element(&self) -> &Element {
        &self.element
    }
}

#[derive(Debug, Clone, Default)]
pub struct PeriodBuilder {
    element: Element,
    start: Option<DateTime>,
    end: Option<DateTime>,
}

impl PeriodBuilder {
    pub fn start(mut self, start: impl Into<DateTime>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn end(mut self, end: impl Into<DateTime>) -> Self {
        self.end = Some(end.into());
        self
    }
}

impl ElementBuilder for PeriodBuilder {
    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Builder for PeriodBuilder {
    type Node = Period;

    fn build_with(self, config: &ModelConfig) -> Result<Period> {
        let node = Period {
            element: self.element,
            start: self.start,
            end: self.end,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(PERIOD_SCHEMA.type_name, config);
        ctx.element(&node.element);
        ctx.primitive(&START, node.start.as_ref());
        ctx.primitive(&END, node.end.as_ref());
        ctx.value_or_children(
            node.element.has_content() || node.start.is_some() || node.end.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for Period {
    type Builder = PeriodBuilder;

    fn to_builder(&self) -> PeriodBuilder {
        PeriodBuilder {
            element: self.element.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }
}

impl Visitable for Period {
    fn schema(&self) -> &'static NodeSchema {
        &PERIOD_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_opt(START.name, self.start.as_ref(), visitor);
        accept_opt(END.name, self.end.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
