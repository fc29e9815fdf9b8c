use super::{ValueRef, Visitable, Visitor};

/// Segment stack shared by visitors that need the location of the current
/// node. Pushed in `visit_start`, popped in `visit_end`.
#[derive(Debug, Default)]
pub(crate) struct PathStack {
    segments: Vec<String>,
}

impl PathStack {
    pub(crate) fn push(&mut self, name: &str, index: Option<usize>) {
        let segment = match index {
            Some(i) => format!("{}[{}]", name, i),
            None => name.to_string(),
        };
        self.segments.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }

    pub(crate) fn depth(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn current(&self) -> String {
        self.segments.join(".")
    }

    pub(crate) fn child(&self, name: &str) -> String {
        if self.segments.is_empty() {
            return name.to_string();
        }
        format!("{}.{}", self.current(), name)
    }
}

/// Records the FHIRPath-style location of every node and leaf value in
/// visit order, e.g. `Claim.item[0].productOrService.coding[0].code`.
#[derive(Debug, Default)]
pub struct PathVisitor {
    stack: PathStack,
    paths: Vec<String>,
    values: Vec<(String, String)>,
    max_depth: usize,
}

impl PathVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths of every visited node, parents before children.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Leaf values with their paths, rendered with `Display`.
    pub fn values(&self) -> &[(String, String)] {
        &self.values
    }

    pub fn value_at(&self, path: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, v)| v.as_str())
    }

    /// Current nesting depth. Zero once a walk has completed.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Visitor for PathVisitor {
    fn visit_start(&mut self, name: &str, index: Option<usize>, _node: &dyn Visitable) {
        self.stack.push(name, index);
        self.max_depth = self.max_depth.max(self.stack.depth());
        self.paths.push(self.stack.current());
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Visitable) {
        self.stack.pop();
    }

    fn visit_value(&mut self, name: &str, value: ValueRef<'_>) {
        self.values.push((self.stack.child(name), value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::datatypes::{CodeableConcept, Coding};
    use crate::visitor::walk_root;

    #[test]
    fn paths_follow_field_names_and_indices() {
        let concept = CodeableConcept::builder()
            .coding(Coding::builder().system("http://loinc.org").build().unwrap())
            .coding(Coding::builder().code("1234-5").build().unwrap())
            .text("panel")
            .build()
            .unwrap();
        let mut visitor = PathVisitor::new();
        walk_root(&concept, &mut visitor);
        assert_eq!(
            visitor.paths(),
            &[
                "CodeableConcept",
                "CodeableConcept.coding[0]",
                "CodeableConcept.coding[0].system",
                "CodeableConcept.coding[1]",
                "CodeableConcept.coding[1].code",
                "CodeableConcept.text",
            ]
        );
        assert_eq!(
            visitor.value_at("CodeableConcept.coding[1].code.value"),
            Some("1234-5")
        );
        assert_eq!(visitor.depth(), 0);
        assert_eq!(visitor.max_depth(), 3);
    }
}
