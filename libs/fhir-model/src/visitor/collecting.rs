use super::{Visitable, Visitor};

/// Collects a clone of every node of type `T` in a tree, in visit order.
#[derive(Debug)]
pub struct CollectingVisitor<T> {
    items: Vec<T>,
    descend_into_matches: bool,
}

impl<T> Default for CollectingVisitor<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            descend_into_matches: true,
        }
    }
}

impl<T: Visitable + Clone> CollectingVisitor<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop at the first match on each branch instead of also collecting
    /// nested matches (an extension inside an extension, say).
    pub fn outermost_only(mut self) -> Self {
        self.descend_into_matches = false;
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: Visitable + Clone> Visitor for CollectingVisitor<T> {
    fn visit(&mut self, _name: &str, _index: Option<usize>, node: &dyn Visitable) -> bool {
        match node.downcast_ref::<T>() {
            Some(item) => {
                self.items.push(item.clone());
                self.descend_into_matches
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{Builder, ElementBuilder};
    use crate::datatypes::{Extension, Identifier};
    use crate::primitive::FhirString;
    use crate::visitor::walk_root;

    fn nested() -> Identifier {
        let inner = Extension::builder()
            .url("http://example.org/inner")
            .value(FhirString::of("x".to_string()))
            .build()
            .unwrap();
        let outer = Extension::builder()
            .url("http://example.org/outer")
            .extension(inner)
            .build()
            .unwrap();
        Identifier::builder()
            .value("123")
            .extension(outer)
            .build()
            .unwrap()
    }

    #[test]
    fn collects_nested_matches() {
        let mut visitor = CollectingVisitor::<Extension>::new();
        walk_root(&nested(), &mut visitor);
        let urls: Vec<_> = visitor.items().iter().filter_map(|e| e.url()).collect();
        assert_eq!(urls, vec!["http://example.org/outer", "http://example.org/inner"]);
    }

    #[test]
    fn outermost_only_prunes_below_matches() {
        let mut visitor = CollectingVisitor::<Extension>::new().outermost_only();
        walk_root(&nested(), &mut visitor);
        assert_eq!(visitor.into_items().len(), 1);
    }
}
