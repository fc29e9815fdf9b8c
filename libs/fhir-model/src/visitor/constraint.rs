//! Hooks for an external invariant evaluator.
//!
//! Node schemas carry their FHIRPath invariants as [`Constraint`] metadata
//! but the model does not evaluate them. [`ConstraintVisitor`] walks a tree
//! and hands every node together with each constraint of its schema (base
//! schemas included) to a [`ConstraintEvaluator`], recording failures with
//! the path of the node they were found on.

use super::path::PathStack;
use super::{Visitable, Visitor};
use crate::schema::{Constraint, ConstraintLevel};
use std::fmt;

/// Evaluates one invariant against one node.
pub trait ConstraintEvaluator {
    /// `Ok(true)` when the node satisfies the constraint. `Err` when the
    /// expression could not be evaluated at all.
    fn evaluate(
        &mut self,
        node: &dyn Visitable,
        constraint: &Constraint,
    ) -> std::result::Result<bool, String>;
}

impl<F> ConstraintEvaluator for F
where
    F: FnMut(&dyn Visitable, &Constraint) -> std::result::Result<bool, String>,
{
    fn evaluate(
        &mut self,
        node: &dyn Visitable,
        constraint: &Constraint,
    ) -> std::result::Result<bool, String> {
        self(node, constraint)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintFailure {
    pub path: String,
    pub constraint: &'static str,
    pub level: ConstraintLevel,
    pub description: &'static str,
    /// Set when evaluation itself failed rather than returning `false`.
    pub error: Option<String>,
}

impl ConstraintFailure {
    pub fn is_error(&self) -> bool {
        self.level == ConstraintLevel::Rule
    }
}

impl fmt::Display for ConstraintFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.path, self.description, self.constraint)?;
        if let Some(error) = &self.error {
            write!(f, ": {}", error)?;
        }
        Ok(())
    }
}

pub struct ConstraintVisitor<E> {
    evaluator: E,
    stack: PathStack,
    failures: Vec<ConstraintFailure>,
    evaluated: usize,
}

impl<E: ConstraintEvaluator> ConstraintVisitor<E> {
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            stack: PathStack::default(),
            failures: Vec::new(),
            evaluated: 0,
        }
    }

    pub fn failures(&self) -> &[ConstraintFailure] {
        &self.failures
    }

    /// Number of (node, constraint) pairs handed to the evaluator.
    pub fn evaluated(&self) -> usize {
        self.evaluated
    }

    pub fn has_errors(&self) -> bool {
        self.failures.iter().any(ConstraintFailure::is_error)
    }

    pub fn into_failures(self) -> Vec<ConstraintFailure> {
        self.failures
    }
}

impl<E: ConstraintEvaluator> Visitor for ConstraintVisitor<E> {
    fn visit_start(&mut self, name: &str, index: Option<usize>, node: &dyn Visitable) {
        self.stack.push(name, index);
        for constraint in node.schema().all_constraints() {
            self.evaluated += 1;
            let error = match self.evaluator.evaluate(node, constraint) {
                Ok(true) => continue,
                Ok(false) => None,
                Err(error) => Some(error),
            };
            let failure = ConstraintFailure {
                path: self.stack.current(),
                constraint: constraint.id,
                level: constraint.level,
                description: constraint.description,
                error,
            };
            tracing::trace!(%failure, "constraint failed");
            self.failures.push(failure);
        }
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Visitable) {
        self.stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::datatypes::Period;
    use crate::primitive::FhirDate;
    use crate::resource::Organization;
    use crate::visitor::walk_root;

    #[test]
    fn evaluator_sees_inherited_constraints() {
        let period = Period::builder().start(FhirDate::Year(2020)).build().unwrap();
        let mut seen = Vec::new();
        let mut visitor = ConstraintVisitor::new(
            |node: &dyn Visitable, c: &Constraint| -> Result<bool, String> {
                seen.push((node.type_name(), c.id));
                Ok(true)
            },
        );
        walk_root(&period, &mut visitor);
        assert!(visitor.failures().is_empty());
        drop(visitor);
        assert!(seen.contains(&("Period", "ele-1")));
        assert!(seen.contains(&("Period", "per-1")));
    }

    #[test]
    fn failures_carry_path_and_level() {
        let org = Organization::builder().name("Acme").build().unwrap();
        let mut visitor = ConstraintVisitor::new(
            |_: &dyn Visitable, c: &Constraint| -> Result<bool, String> {
                match c.id {
                    "dom-6" => Ok(false),
                    "org-1" => Err("unsupported function".to_string()),
                    _ => Ok(true),
                }
            },
        );
        walk_root(&org, &mut visitor);
        let failures = visitor.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].constraint, "dom-6");
        assert_eq!(failures[0].path, "Organization");
        assert!(!failures[0].is_error());
        assert_eq!(failures[1].error.as_deref(), Some("unsupported function"));
        assert!(visitor.has_errors());
    }
}
