//! Build-time validation.
//!
//! Every `build_with` creates one [`ValidationContext`], feeds it each field
//! together with the field's [`FieldInfo`], and calls [`finish`]. Checks never
//! short-circuit: all violations of a node are reported together.
//!
//! [`finish`]: ValidationContext::finish

pub mod primitive;
pub mod reference;

use crate::choice::Value;
use crate::config::ModelConfig;
use crate::datatypes::Reference;
use crate::element::{BackboneElement, Element};
use crate::error::{Result, ValidationError, Violation, ViolationKind};
use crate::primitive::{Primitive, PrimitiveKind};
use crate::schema::FieldInfo;

pub struct ValidationContext<'a> {
    node: &'static str,
    config: &'a ModelConfig,
    violations: Vec<Violation>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(node: &'static str, config: &'a ModelConfig) -> Self {
        Self {
            node,
            config,
            violations: Vec::new(),
        }
    }

    pub fn config(&self) -> &ModelConfig {
        self.config
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    fn push(&mut self, field: &str, index: Option<usize>, kind: ViolationKind) {
        let path = match index {
            Some(i) => format!("{}.{}[{}]", self.node, field, i),
            None => format!("{}.{}", self.node, field),
        };
        self.violations.push(Violation {
            path,
            field: field.to_string(),
            kind,
        });
    }

    pub fn invalid_primitive(&mut self, field: &str, index: Option<usize>, message: String) {
        self.push(field, index, ViolationKind::InvalidPrimitive { message });
    }

    /// Checks the internal id of an element.
    pub fn element(&mut self, element: &Element) {
        if let Some(id) = element.id() {
            if let Err(message) = primitive::check_string(id, self.config) {
                self.invalid_primitive("id", None, message);
            }
        }
    }

    pub fn backbone(&mut self, backbone: &BackboneElement) {
        self.element(backbone.element());
    }

    /// Presence of a single-valued field.
    pub fn single<T>(&mut self, field: &FieldInfo, value: Option<&T>) {
        if field.is_required() && value.is_none() {
            self.push(field.name, None, ViolationKind::MissingRequired);
        }
    }

    /// Cardinality of a list field.
    pub fn list<T>(&mut self, field: &FieldInfo, values: &[T]) {
        if field.is_required() && values.is_empty() {
            self.push(field.name, None, ViolationKind::MissingRequired);
        }
        if let Some(max) = field.max {
            if self.config.enforce_max_cardinality && values.len() > max as usize {
                self.push(
                    field.name,
                    None,
                    ViolationKind::TooMany {
                        max,
                        actual: values.len(),
                    },
                );
            }
        }
    }

    pub fn primitive<K: PrimitiveKind>(&mut self, field: &FieldInfo, value: Option<&Primitive<K>>) {
        self.single(field, value);
        if let Some(value) = value {
            self.check_primitive(field, None, value);
        }
    }

    pub fn primitives<K: PrimitiveKind>(&mut self, field: &FieldInfo, values: &[Primitive<K>]) {
        self.list(field, values);
        for (i, value) in values.iter().enumerate() {
            self.check_primitive(field, Some(i), value);
        }
    }

    fn check_primitive<K: PrimitiveKind>(
        &mut self,
        field: &FieldInfo,
        index: Option<usize>,
        value: &Primitive<K>,
    ) {
        if let Err(message) = value.check(self.config) {
            self.invalid_primitive(field.name, index, message);
        }
    }

    /// Presence, type membership and, for references, target kind of a
    /// choice field.
    pub fn choice(&mut self, field: &FieldInfo, value: Option<&Value>) {
        self.single(field, value);
        let Some(value) = value else {
            return;
        };
        let data_type = value.data_type();
        if !field.permits(data_type) {
            self.push(
                field.name,
                None,
                ViolationKind::ChoiceType {
                    found: data_type.name(),
                    allowed: field.type_names(),
                },
            );
            return;
        }
        if let Err(message) = value.check_primitive(self.config) {
            self.invalid_primitive(field.name, None, message);
        }
        if let Some(reference) = value.as_reference() {
            self.check_reference(field, None, reference);
        }
    }

    pub fn reference(&mut self, field: &FieldInfo, value: Option<&Reference>) {
        self.single(field, value);
        if let Some(reference) = value {
            self.check_reference(field, None, reference);
        }
    }

    pub fn references(&mut self, field: &FieldInfo, values: &[Reference]) {
        self.list(field, values);
        for (i, reference) in values.iter().enumerate() {
            self.check_reference(field, Some(i), reference);
        }
    }

    fn check_reference(&mut self, field: &FieldInfo, index: Option<usize>, reference: &Reference) {
        if !self.config.check_reference_types {
            return;
        }
        for kind in reference::check_target(reference, field.reference_targets) {
            self.push(field.name, index, kind);
        }
    }

    /// Composite nodes need at least one field, extension or id set.
    pub fn value_or_children(&mut self, has_content: bool) {
        if !has_content {
            self.violations.push(Violation {
                path: self.node.to_string(),
                field: String::new(),
                kind: ViolationKind::Empty,
            });
        }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn finish(self) -> Result<()> {
        if self.violations.is_empty() {
            return Ok(());
        }
        tracing::debug!(
            node = self.node,
            violations = self.violations.len(),
            "build rejected"
        );
        Err(ValidationError {
            node: self.node,
            violations: self.violations,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DataType;

    const NAME: FieldInfo = FieldInfo::new("name", &[DataType::String]).required();
    const LINE: FieldInfo = FieldInfo::new("line", &[DataType::String]).repeating();
    const PAIR: FieldInfo = FieldInfo::new("pair", &[DataType::String]).max(2);

    #[test]
    fn violations_accumulate() {
        let config = ModelConfig::default();
        let mut ctx = ValidationContext::new("Sample", &config);
        ctx.single::<String>(&NAME, None);
        ctx.list(&PAIR, &[1, 2, 3]);
        ctx.list(&LINE, &[1, 2, 3]);
        let err = ctx.finish().unwrap_err();
        let paths: Vec<_> = err.violations().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["Sample.name", "Sample.pair"]);
    }

    #[test]
    fn max_cardinality_can_be_relaxed() {
        let config = ModelConfig {
            enforce_max_cardinality: false,
            ..ModelConfig::default()
        };
        let mut ctx = ValidationContext::new("Sample", &config);
        ctx.list(&PAIR, &[1, 2, 3]);
        assert!(ctx.finish().is_ok());
    }

    #[test]
    fn empty_node_violation_names_the_node() {
        let config = ModelConfig::default();
        let mut ctx = ValidationContext::new("Period", &config);
        ctx.value_or_children(false);
        let err = ctx.finish().unwrap_err();
        assert_eq!(err.violations()[0].path, "Period");
        assert_eq!(err.violations()[0].kind, ViolationKind::Empty);
    }
}
