//! End-to-end behaviour of the lineage cache through the public API.

use lineage_core::{
    CycleCheck, HierarchyError, LineageCache, LineageCacheConfig, LineageError, NodeHierarchy,
    NodeState,
};
use rstest::{fixture, rstest};

#[fixture]
fn widgets() -> LineageCache<String> {
    let mut cache = LineageCache::with_config(LineageCacheConfig::new().with_capacity(8));
    cache.add_root("window").expect("window is valid");
    cache.add_root("theme").expect("theme is valid");
    for button in ["ok", "cancel"] {
        cache
            .add_element(button, &["window", "theme"])
            .expect("buttons are valid");
    }
    cache
        .add_element("title", &["window"])
        .expect("title is valid");
    cache
}

#[test]
fn leaves_of_one_root_share_data() {
    let mut cache = LineageCache::new();
    cache.add_root("root").expect("root is valid");
    cache.add_element("leafA", &["root"]).expect("leafA is valid");
    cache.add_element("leafB", &["root"]).expect("leafB is valid");

    cache.set_data("leafA", 42).expect("leafA is enabled");
    assert_eq!(cache.get_data("leafB").expect("leafB is known"), Some(&42));
}

#[rstest]
fn identical_parent_lists_share_one_slot(mut widgets: LineageCache<String>) {
    widgets
        .set_data("ok", "button-style".to_owned())
        .expect("ok is enabled");
    assert_eq!(
        widgets.get_data("cancel").expect("cancel is known"),
        Some(&"button-style".to_owned())
    );
    assert_eq!(widgets.get_data("title").expect("title is known"), None);
}

#[rstest]
fn lazily_computed_payloads_are_reused(mut widgets: LineageCache<String>) {
    let mut computed = Vec::new();
    for element in ["ok", "cancel", "title"] {
        let value = widgets
            .get_or_insert_with(element, || {
                computed.push(element);
                format!("computed-for-{element}")
            })
            .expect("widgets are enabled")
            .clone();
        assert!(value.starts_with("computed-for-"));
    }
    assert_eq!(computed, vec!["ok", "title"]);
    assert_eq!(widgets.cached_len(), 2);
}

#[rstest]
fn ancestry_is_queryable_after_registration(widgets: LineageCache<String>) {
    assert!(widgets.is_ancestor("ok", "theme").expect("both known"));
    assert!(!widgets.is_ancestor("title", "theme").expect("both known"));
    assert_eq!(widgets.element_count(), 5);
    assert_eq!(widgets.hierarchy().len(), 5);
}

#[test]
fn provisional_parent_becomes_writable_once_added() {
    let mut cache = LineageCache::new();
    cache.add_element("x", &["p"]).expect("x is valid");
    assert_eq!(cache.state("p").expect("encodes"), Some(NodeState::Provisional));
    assert!(matches!(
        cache.set_data("p", 1),
        Err(LineageError::ElementNotRegistered { .. })
    ));

    cache.add_element("p", &[] as &[&str]).expect("p is valid");
    cache.set_data("p", 1).expect("p is enabled");
    assert_eq!(cache.get_data("p").expect("p is known"), Some(&1));
}

#[rstest]
#[case::direct(CycleCheck::Direct)]
#[case::transitive(CycleCheck::Transitive)]
fn reverse_edges_are_rejected(#[case] cycle_check: CycleCheck) {
    let mut hierarchy = NodeHierarchy::with_cycle_check(cycle_check);
    hierarchy.add_parent(10, 20).expect("first edge is valid");
    let err = hierarchy
        .add_parent(20, 10)
        .expect_err("reverse edge closes a cycle");
    assert_eq!(
        err,
        HierarchyError::CycleDetected {
            child: 20,
            parent: 10
        }
    );
    assert!(hierarchy.get_parents(20).is_empty());
}

#[test]
fn caches_can_be_shared_behind_a_lock() {
    use std::sync::{Arc, Mutex};
    use std::thread;

    let cache = Arc::new(Mutex::new(LineageCache::<usize>::new()));
    {
        let mut guard = cache.lock().expect("lock poisoned");
        guard.add_root("root").expect("root is valid");
    }

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let mut guard = cache.lock().expect("lock poisoned");
                let element = format!("leaf-{worker}");
                guard
                    .add_element(&element, &["root"])
                    .expect("leaf is valid");
                *guard
                    .get_or_insert_with(&element, || worker)
                    .expect("leaf is enabled")
            })
        })
        .collect();
    let results: Vec<usize> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker panicked"))
        .collect();

    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
}
