mod common;

use common::*;
use ferrum_model::datatypes::{CodeableConcept, Reference};
use ferrum_model::prelude::*;
use ferrum_model::resource::{ClaimItem, Organization, Patient};
use ferrum_model::visitor::{CollectingVisitor, PathVisitor, ValueRef};
use ferrum_model::walk_root;

/// Records the hook sequence of a walk.
#[derive(Default)]
struct Trace {
    events: Vec<String>,
    depth: usize,
    max_depth: usize,
    skip_children_of: Option<&'static str>,
    veto: Option<&'static str>,
}

fn segment(name: &str, index: Option<usize>) -> String {
    match index {
        Some(i) => format!("{name}[{i}]"),
        None => name.to_string(),
    }
}

impl Visitor for Trace {
    fn pre_visit(&mut self, node: &dyn Visitable) -> bool {
        self.veto != Some(node.type_name())
    }

    fn visit_start(&mut self, name: &str, index: Option<usize>, node: &dyn Visitable) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.events
            .push(format!("start {} {}", segment(name, index), node.type_name()));
    }

    fn visit(&mut self, _name: &str, _index: Option<usize>, node: &dyn Visitable) -> bool {
        self.skip_children_of != Some(node.type_name())
    }

    fn visit_end(&mut self, name: &str, index: Option<usize>, _node: &dyn Visitable) {
        self.depth -= 1;
        self.events.push(format!("end {}", segment(name, index)));
    }

    fn visit_list_start(&mut self, name: &str, len: usize) {
        self.events.push(format!("list {name} {len}"));
    }

    fn visit_list_end(&mut self, name: &str, len: usize) {
        self.events.push(format!("/list {name} {len}"));
    }

    fn visit_value(&mut self, name: &str, value: ValueRef<'_>) {
        self.events.push(format!("value {name}={value}"));
    }
}

impl Trace {
    fn count(&self, prefix: &str) -> usize {
        self.events.iter().filter(|e| e.starts_with(prefix)).count()
    }
}

#[test]
fn enter_and_exit_hooks_are_balanced() {
    let claim = oral_claim();
    let mut trace = Trace::default();
    walk_root(&claim, &mut trace);
    assert_eq!(trace.depth, 0);
    assert_eq!(trace.count("start "), trace.count("end "));
    assert_eq!(trace.count("list "), trace.count("/list "));
    assert_eq!(trace.events.first().map(String::as_str), Some("start Claim Claim"));
    assert_eq!(trace.events.last().map(String::as_str), Some("end Claim"));
    // Claim > item > detail > productOrService > coding > code
    assert!(trace.max_depth >= 6);
}

#[test]
fn children_follow_field_declaration_order() {
    let claim = minimal_claim();
    let mut paths = PathVisitor::new();
    walk_root(&claim, &mut paths);
    let top_level: Vec<&str> = paths
        .paths()
        .iter()
        .filter(|p| p.matches('.').count() == 1)
        .map(|p| p.trim_start_matches("Claim."))
        .collect();
    assert_eq!(
        top_level,
        vec![
            "status",
            "type",
            "use",
            "patient",
            "created",
            "provider",
            "priority",
            "insurance[0]"
        ]
    );
    assert_eq!(paths.value_at("Claim.id"), Some("100150"));
    assert_eq!(paths.value_at("Claim.status.value"), Some("active"));
    assert_eq!(
        paths.value_at("Claim.insurance[0].coverage.reference.value"),
        Some("Coverage/9877")
    );
}

#[test]
fn choice_values_are_visited_under_their_typed_name() {
    let claim = oral_claim();
    let mut paths = PathVisitor::new();
    walk_root(&claim, &mut paths);
    assert!(paths
        .paths()
        .iter()
        .any(|p| p == "Claim.supportingInfo[0].timingDate"));
    assert!(paths
        .paths()
        .iter()
        .any(|p| p == "Claim.diagnosis[0].diagnosisCodeableConcept"));
    assert_eq!(
        paths.value_at("Claim.item[0].servicedDate.value"),
        Some("2014-08-16")
    );
}

#[test]
fn visit_false_prunes_children_but_keeps_the_exit_hooks() {
    let claim = oral_claim();
    let mut trace = Trace {
        skip_children_of: Some("Claim.item"),
        ..Trace::default()
    };
    walk_root(&claim, &mut trace);
    assert!(trace.events.iter().any(|e| e == "start item[0] Claim.item"));
    assert!(trace.events.iter().any(|e| e == "end item[0]"));
    assert!(!trace.events.iter().any(|e| e.contains("detail")));
    assert_eq!(trace.count("start "), trace.count("end "));
}

#[test]
fn pre_visit_false_skips_the_whole_node() {
    let claim = minimal_claim();
    let mut trace = Trace {
        veto: Some("CodeableConcept"),
        ..Trace::default()
    };
    walk_root(&claim, &mut trace);
    assert!(!trace.events.iter().any(|e| e.ends_with(" CodeableConcept")));
    assert!(!trace.events.iter().any(|e| e.starts_with("end type")));
    assert!(trace.events.iter().any(|e| e.starts_with("start patient")));
}

#[test]
fn empty_lists_are_not_announced() {
    let claim = minimal_claim();
    let mut trace = Trace::default();
    walk_root(&claim, &mut trace);
    assert!(trace.events.iter().any(|e| e == "list insurance 1"));
    assert!(!trace.events.iter().any(|e| e.starts_with("list item")));
    assert!(!trace.events.iter().any(|e| e.starts_with("list identifier")));
}

#[test]
fn collecting_visitor_finds_every_reference() {
    let claim = oral_claim();
    let mut collector = CollectingVisitor::<Reference>::new();
    walk_root(&claim, &mut collector);
    let literals: Vec<&str> = collector
        .items()
        .iter()
        .filter_map(Reference::reference_value)
        .collect();
    assert_eq!(
        literals,
        vec![
            "Patient/1",
            "Organization/1",
            "Practitioner/example",
            "Coverage/9877"
        ]
    );

    let mut items = CollectingVisitor::<ClaimItem>::new();
    walk_root(&claim, &mut items);
    assert_eq!(items.into_items().len(), 1);

    let mut concepts = CollectingVisitor::<CodeableConcept>::new();
    walk_root(&claim, &mut concepts);
    // type, priority, supportingInfo category, diagnosis, item and detail
    // productOrService
    assert_eq!(concepts.items().len(), 6);
}

#[test]
fn contained_resources_are_walked() {
    let org = Organization::builder()
        .id("org1")
        .name("Acme")
        .build()
        .unwrap();
    let patient = Patient::builder()
        .contained(org)
        .managing_organization(reference("#org1"))
        .build()
        .unwrap();
    let mut paths = PathVisitor::new();
    walk_root(&patient, &mut paths);
    assert!(paths
        .paths()
        .iter()
        .any(|p| p == "Patient.contained[0]"));
    assert_eq!(paths.value_at("Patient.contained[0].id"), Some("org1"));
    assert_eq!(
        paths.value_at("Patient.contained[0].name.value"),
        Some("Acme")
    );
}
