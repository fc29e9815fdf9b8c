mod common;

use common::*;
use ferrum_model::datatypes::{Identifier, Period};
use ferrum_model::prelude::*;
use ferrum_model::primitive::{FhirDate, FhirDateTime};
use ferrum_model::resource::{Claim, Organization, Resource};
use ferrum_model::Value;
use quickcheck::{QuickCheck, TestResult};
use std::collections::HashSet;

fn identifier(system: &str, value: &str) -> Option<Identifier> {
    Identifier::builder()
        .system(system)
        .value(value)
        .build()
        .ok()
}

/// Property: independently built equal nodes hash equally
#[test]
fn prop_equal_nodes_hash_equally() {
    fn prop(value: String, active: bool) -> TestResult {
        let Some(id) = identifier("http://example.org/ids", &value) else {
            return TestResult::discard();
        };
        let build = || {
            Organization::builder()
                .identifier(id.clone())
                .active(active)
                .name("Acme")
                .build()
        };
        match (build(), build()) {
            (Ok(a), Ok(b)) => TestResult::from_bool(a == b && a.hash_code() == b.hash_code()),
            _ => TestResult::discard(),
        }
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(String, bool) -> TestResult);
}

/// Property: changing a field breaks equality
#[test]
fn prop_changed_field_breaks_equality() {
    fn prop(a: String, b: String) -> TestResult {
        if a == b {
            return TestResult::discard();
        }
        match (identifier("http://x", &a), identifier("http://x", &b)) {
            (Some(x), Some(y)) => TestResult::from_bool(x != y),
            _ => TestResult::discard(),
        }
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(String, String) -> TestResult);
}

#[test]
fn rebuilt_trees_hash_equally() {
    let a = oral_claim();
    let b = oral_claim();
    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());

    let changed = a.to_builder().status("draft").build().unwrap();
    assert_ne!(a, changed);
    assert_ne!(a.hash_code(), changed.hash_code());
}

#[test]
fn created_offsets_are_part_of_claim_equality() {
    let created = |text: &str| {
        let value: FhirDateTime = text.parse().unwrap();
        minimal_claim().to_builder().created(value).build().unwrap()
    };
    let local = created("2024-05-01T10:30:00+02:00");
    let utc = created("2024-05-01T08:30:00Z");
    assert_ne!(local, utc);
    assert_ne!(local.hash_code(), utc.hash_code());
    assert_eq!(local, created("2024-05-01T10:30:00+02:00"));
}

#[test]
fn hash_code_is_stable_across_calls() {
    let claim = oral_claim();
    let first = claim.hash_code();
    assert_eq!(claim.hash_code(), first);
    assert_eq!(claim.clone().hash_code(), first);
}

#[test]
fn nodes_work_as_set_keys() {
    let mut seen = HashSet::new();
    assert!(seen.insert(minimal_claim()));
    assert!(!seen.insert(minimal_claim()));
    assert!(seen.insert(oral_claim()));
    assert_eq!(seen.len(), 2);

    let resources: HashSet<Resource> = [
        Resource::from(minimal_claim()),
        Resource::from(minimal_claim()),
    ]
    .into_iter()
    .collect();
    assert_eq!(resources.len(), 1);
}

#[test]
fn choice_values_compare_by_variant() {
    let period = Period::builder().start(FhirDate::Year(2020)).build().unwrap();
    let as_period = Value::from(period.clone());
    let as_date = Value::from(ferrum_model::primitive::Date::of(FhirDate::Year(2020)));
    assert_ne!(as_period, as_date);
    assert_eq!(as_period, Value::from(period));
}

#[test]
fn built_nodes_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Claim>();
    assert_send_sync::<Resource>();
    assert_send_sync::<Identifier>();
    assert_send_sync::<Value>();

    let claim = std::sync::Arc::new(oral_claim());
    let expected = claim.hash_code();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let claim = std::sync::Arc::clone(&claim);
            std::thread::spawn(move || claim.hash_code())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
