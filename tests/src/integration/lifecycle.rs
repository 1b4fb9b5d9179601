//! # Lifecycle Scenarios
//!
//! Attach, replace, remove and teardown as observed through the four hooks.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use component_core::{Component, ComponentExt, ComponentKey};
    use component_telemetry::init_test_logging;
    use std::sync::Arc;

    // =========================================================================
    // ATTACH
    // =========================================================================

    /// Parent hook runs before the child's own hook, and the payload survives.
    #[test]
    fn test_attach_hook_order_and_payload() {
        init_test_logging();
        let log = HookLog::new();
        let parent = Arc::new(SampleBasicComponent::new("parent", &log));

        parent.add_component(SampleValueComponent::new(1).with_log(&log));

        assert_eq!(
            log.take(),
            vec![
                component_attached("parent", SampleValueComponent::LABEL),
                attached_to(SampleValueComponent::LABEL),
            ]
        );
        let child = parent.get_component::<SampleValueComponent>().unwrap();
        assert_eq!(child.value(), 1);
    }

    #[test]
    fn test_child_sees_parent_during_attach_hook() {
        init_test_logging();
        let log = HookLog::new();
        let parent = Arc::new(SampleNode::default());

        let child = parent.add_component(SampleBasicComponent::new("child", &log));

        assert_eq!(log.events(), vec![attached_to("child")]);
        assert!(child.get_parent::<SampleNode>().is_some());
        assert!(child.get_parent::<SampleValueComponent>().is_none());
    }

    #[test]
    fn test_uniqueness_under_repeated_adds() {
        init_test_logging();
        let parent = Arc::new(SampleNode::default());

        for value in 0..10 {
            parent.add_component(SampleValueComponent::new(value));
            parent.add_component(SampleNode::default());
        }

        let keys = parent.registry().keys();
        assert_eq!(keys.len(), 2);
        assert_eq!(
            keys.iter()
                .filter(|k| **k == ComponentKey::of::<SampleValueComponent>())
                .count(),
            1
        );
        assert_eq!(
            parent.get_component::<SampleValueComponent>().unwrap().value(),
            9
        );
    }

    // =========================================================================
    // REPLACE
    // =========================================================================

    #[test]
    fn test_replace_detaches_old_exactly_once_before_new_attaches() {
        init_test_logging();
        let log = HookLog::new();
        let parent = Arc::new(SampleNode::default());

        parent.add_component(SampleBasicComponent::new("a", &log));
        let old = parent.get_component::<SampleBasicComponent>().unwrap();
        parent.add_component(SampleBasicComponent::new("b", &log));

        let current = parent.get_component::<SampleBasicComponent>().unwrap();
        assert_eq!(current.label(), "b");
        assert!(!Arc::ptr_eq(&old, &current));
        assert!(!old.registry().is_attached());

        let is_old_detach = |e: &HookEvent| matches!(e, HookEvent::DetachedFrom { component, .. } if component == "a");
        assert_eq!(log.count(is_old_detach), 1);

        let detach_at = log.position(is_old_detach).unwrap();
        let attach_at = log.position(|e| *e == attached_to("b")).unwrap();
        assert!(detach_at < attach_at);
    }

    #[test]
    fn test_replace_notifies_owner_for_both_children() {
        init_test_logging();
        let log = HookLog::new();
        let parent = Arc::new(SampleBasicComponent::new("parent", &log));

        parent.add_component(SampleValueComponent::new(1).with_log(&log));
        log.take();
        parent.add_component(SampleValueComponent::new(2).with_log(&log));

        assert_eq!(
            log.take(),
            vec![
                component_detached("parent", SampleValueComponent::LABEL),
                detached_from(SampleValueComponent::LABEL, true),
                component_attached("parent", SampleValueComponent::LABEL),
                attached_to(SampleValueComponent::LABEL),
            ]
        );
        assert_eq!(
            parent.get_component::<SampleValueComponent>().unwrap().value(),
            2
        );
    }

    // =========================================================================
    // REMOVE
    // =========================================================================

    #[test]
    fn test_remove_fires_child_then_parent_hook() {
        init_test_logging();
        let log = HookLog::new();
        let parent = Arc::new(SampleBasicComponent::new("parent", &log));
        let child = parent.add_component(SampleBasicComponent::new("child", &log));
        log.take();

        assert!(parent.remove_component::<SampleBasicComponent>());

        assert_eq!(
            log.take(),
            vec![
                detached_from("child", true),
                component_detached("parent", "child"),
            ]
        );
        assert!(child.get_parent::<SampleBasicComponent>().is_none());
        assert!(parent.registry().is_empty());
    }

    #[test]
    fn test_remove_absent_leaves_registry_unchanged() {
        init_test_logging();
        let log = HookLog::new();
        let parent = Arc::new(SampleBasicComponent::new("parent", &log));
        parent.add_component(SampleNode::default());
        let before = parent.registry().keys();
        log.take();

        assert!(!parent.remove_component::<SampleValueComponent>());

        assert_eq!(parent.registry().keys(), before);
        assert!(log.events().is_empty());
    }

    // =========================================================================
    // TEARDOWN
    // =========================================================================

    #[test]
    fn test_destroying_parent_notifies_every_child_once() {
        init_test_logging();
        let log = HookLog::new();
        let parent = Arc::new(SampleBasicComponent::new("parent", &log));
        parent.add_component(SampleBasicComponent::new("first", &log));
        parent.add_component(SampleValueComponent::new(7).with_log(&log));
        log.take();

        drop(parent);

        let mut events = log.take();
        events.sort_by_key(|e| format!("{e:?}"));
        let mut expected = vec![
            detached_from("first", false),
            detached_from(SampleValueComponent::LABEL, false),
        ];
        expected.sort_by_key(|e| format!("{e:?}"));
        assert_eq!(events, expected);
    }

    #[test]
    fn test_teardown_releases_externally_held_children() {
        init_test_logging();
        let log = HookLog::new();
        let parent = Arc::new(SampleNode::default());
        let held = parent.add_component(SampleBasicComponent::new("held", &log));

        drop(parent);

        assert!(!held.registry().is_attached());
        assert_eq!(log.count(|e| *e == detached_from("held", false)), 1);

        // Still usable as a standalone root.
        let adopter = Arc::new(SampleNode::default());
        assert!(adopter.adopt_component(held).is_ok());
    }

    #[test]
    fn test_teardown_walks_nested_tree() {
        init_test_logging();
        let log = HookLog::new();
        let root = Arc::new(SampleNode::default());
        let middle = root.add_component(SampleBasicComponent::new("middle", &log));
        middle.add_component(SampleValueComponent::new(3).with_log(&log));
        drop(middle);
        log.take();

        drop(root);

        assert_eq!(
            log.take(),
            vec![
                detached_from("middle", false),
                detached_from(SampleValueComponent::LABEL, false),
            ]
        );
    }

    #[test]
    fn test_enumeration_reports_keys_and_types() {
        init_test_logging();
        let log = HookLog::new();
        let parent = Arc::new(SampleNode::default());
        parent.add_component(SampleValueComponent::new(5));
        parent.add_component(SampleBasicComponent::new("basic", &log));

        let mut labels: Vec<String> = parent
            .get_components()
            .iter()
            .map(|(key, child)| {
                assert_eq!(*key, child.key());
                label_of(child.as_ref())
            })
            .collect();
        labels.sort();

        assert_eq!(labels, vec!["basic".to_string(), "value".to_string()]);
    }
}
