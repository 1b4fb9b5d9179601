//! # Component Registry - Type-Keyed Sub-Component Storage
//!
//! Holds at most one child per concrete component type, the non-owning
//! back-reference to the parent, and the protocol that fires lifecycle hooks
//! around every structural change.
//!
//! ## Locking
//!
//! ```text
//!   mutation_gate (ReentrantMutex)      held for a whole structural operation,
//!        │                              hooks included; readers never take it
//!        ▼
//!   children (RwLock<HashMap>)          write-locked only for the insert/remove
//!                                       itself, released before any hook runs
//!
//!   parent (RwLock<Option<Weak>>)       this node's own back-reference
//! ```
//!
//! - Readers (`get`, `has`, `components`) only take the `children` read lock,
//!   so they never wait on a hook.
//! - Hooks run after the structural change is visible to other threads. The
//!   exception is a replace: the displaced child's detach hooks run while it
//!   still occupies the slot, and the slot is overwritten after them.
//! - The gate is reentrant: a hook may mutate the same registry from the same
//!   thread, while writers on other threads wait for the whole sequence.
//! - A registry never holds its lock while taking an ancestor's or a
//!   descendant's `children` lock.

use crate::component::{Component, ComponentKey};
use crate::error::ComponentError;
use crate::metrics;
use parking_lot::{ReentrantMutex, RwLock};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, trace, warn};

/// Sub-component storage embedded in every component.
pub struct ComponentRegistry {
    /// Children by concrete type.
    children: RwLock<HashMap<ComponentKey, Arc<dyn Component>>>,
    /// Back-reference to the component whose registry holds this one's owner.
    parent: RwLock<Option<Weak<dyn Component>>>,
    /// Serialises structural operations and their hooks.
    mutation_gate: ReentrantMutex<()>,
}

impl ComponentRegistry {
    /// Create an empty, unattached registry.
    pub fn new() -> Self {
        Self {
            children: RwLock::new(HashMap::new()),
            parent: RwLock::new(None),
            mutation_gate: ReentrantMutex::new(()),
        }
    }

    /// Get the child of type `T`, if present.
    pub fn get<T: Component>(&self) -> Option<Arc<T>> {
        let key = ComponentKey::of::<T>();
        let child = self.get_dyn(&key);

        metrics::global().record_lookup(child.is_some());
        trace!(component = %key, found = child.is_some(), "Component lookup");

        child.and_then(|child| child.downcast_arc::<T>())
    }

    /// Get a child by key without downcasting it.
    pub fn get_dyn(&self, key: &ComponentKey) -> Option<Arc<dyn Component>> {
        self.children.read().get(key).cloned()
    }

    /// Check whether a child of type `T` is present.
    pub fn has<T: Component>(&self) -> bool {
        let found = self.contains_key(&ComponentKey::of::<T>());
        metrics::global().record_lookup(found);
        found
    }

    pub fn contains_key(&self, key: &ComponentKey) -> bool {
        self.children.read().contains_key(key)
    }

    /// Point-in-time copy of all children.
    ///
    /// The snapshot is taken under one read lock, so it never reflects a
    /// half-applied structural change. Mutating it does not affect the
    /// registry.
    pub fn components(&self) -> Vec<(ComponentKey, Arc<dyn Component>)> {
        self.children
            .read()
            .iter()
            .map(|(key, child)| (*key, Arc::clone(child)))
            .collect()
    }

    /// Keys of all children.
    pub fn keys(&self) -> Vec<ComponentKey> {
        self.children.read().keys().copied().collect()
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.read().is_empty()
    }

    /// The parent this component is attached to, viewed as `T`.
    ///
    /// Resolves from the moment the attach hooks start until the detach
    /// hooks have finished. `None` when standalone, when the parent is of
    /// another type, or while the parent itself is being dropped.
    pub fn parent<T: Component>(&self) -> Option<Arc<T>> {
        self.parent_dyn()?.downcast_arc::<T>()
    }

    /// The parent this component is attached to, without downcasting.
    pub fn parent_dyn(&self) -> Option<Arc<dyn Component>> {
        self.parent.read().as_ref().and_then(Weak::upgrade)
    }

    /// Whether this component currently sits in a live parent's registry.
    pub fn is_attached(&self) -> bool {
        self.parent_dyn().is_some()
    }

    /// Number of live ancestors above this component.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent_dyn();
        while let Some(node) = current {
            depth += 1;
            current = node.registry().parent_dyn();
        }
        depth
    }

    /// Record `owner` as the parent unless another live parent holds us.
    fn claim_parent(&self, owner: &Arc<dyn Component>) -> bool {
        let mut parent = self.parent.write();
        if parent.as_ref().is_some_and(|p| p.strong_count() > 0) {
            return false;
        }
        *parent = Some(Arc::downgrade(owner));
        true
    }

    fn release_parent(&self) {
        *self.parent.write() = None;
    }

    /// Clear the back-reference if it points at a parent that no longer
    /// exists. Returns `false` when a live parent has claimed us since.
    fn release_parent_if_dangling(&self) -> bool {
        let mut parent = self.parent.write();
        match parent.as_ref() {
            Some(p) if p.strong_count() > 0 => false,
            Some(_) => {
                *parent = None;
                true
            }
            None => false,
        }
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("children", &self.keys())
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Tearing down a component notifies every child still attached, then
/// releases them; each released child's own registry repeats this, so the
/// notification walks the subtree depth-first.
///
/// The parent-side `on_component_detached` hook is not fired: the parent is
/// the value being destroyed. A child adopted elsewhere while the teardown is
/// running (by an earlier sibling's hook or another thread) belongs to its new
/// parent and is skipped.
impl Drop for ComponentRegistry {
    fn drop(&mut self) {
        let children = std::mem::take(self.children.get_mut());
        for (key, child) in &children {
            if !child.registry().release_parent_if_dangling() {
                trace!(component = %key, "Component re-parented during teardown");
                continue;
            }
            child.on_detached_from_component();
            metrics::global().record_detach(false);
            trace!(component = %key, "Component detached during teardown");
        }
    }
}

/// Attach a freshly constructed child to `owner` under `key`.
///
/// The child cannot be held by another registry yet, so no ownership check
/// is needed.
pub(crate) fn attach(owner: &Arc<dyn Component>, key: ComponentKey, child: Arc<dyn Component>) {
    let _gate = owner.registry().mutation_gate.lock();
    *child.registry().parent.write() = Some(Arc::downgrade(owner));
    insert_and_notify(owner, key, child);
}

/// Attach an externally owned child to `owner` under `key`.
///
/// # Errors
///
/// - [`ComponentError::CycleDetected`] if `child` is `owner` or one of its
///   ancestors.
/// - [`ComponentError::AlreadyAttached`] if `child` already has a live parent.
pub(crate) fn adopt(
    owner: &Arc<dyn Component>,
    key: ComponentKey,
    child: Arc<dyn Component>,
) -> Result<(), ComponentError> {
    let _gate = owner.registry().mutation_gate.lock();

    let rejection = if is_self_or_ancestor(&child, owner) {
        Some(ComponentError::CycleDetected {
            type_name: key.type_name(),
        })
    } else if !child.registry().claim_parent(owner) {
        Some(ComponentError::AlreadyAttached {
            type_name: key.type_name(),
        })
    } else {
        None
    };

    metrics::global().record_adoption(rejection.is_none());
    if let Some(err) = rejection {
        warn!(
            component = %key,
            owner = %owner.key(),
            error = %err,
            "Adoption rejected"
        );
        return Err(err);
    }

    insert_and_notify(owner, key, child);
    Ok(())
}

/// Get the child of type `T`, constructing and attaching a default one if it
/// is missing. Atomic with respect to other writers on the same registry.
pub(crate) fn acquire<T: Component + Default>(owner: &Arc<dyn Component>) -> Arc<T> {
    let _gate = owner.registry().mutation_gate.lock();

    if let Some(existing) = owner.registry().get::<T>() {
        return existing;
    }

    let child = Arc::new(T::default());
    attach(owner, ComponentKey::of::<T>(), child.clone());
    child
}

/// Remove the child under `key` from `owner`, firing the detach hooks.
///
/// Returns the child so the caller decides between releasing it (remove)
/// and keeping it (separate). `None` if the slot is empty.
pub(crate) fn detach(
    owner: &dyn Component,
    key: &ComponentKey,
    separated: bool,
) -> Option<Arc<dyn Component>> {
    let registry = owner.registry();
    let _gate = registry.mutation_gate.lock();

    let child = registry.children.write().remove(key)?;

    child.on_detached_from_component();
    owner.on_component_detached(child.as_ref());
    child.registry().release_parent();

    metrics::global().record_detach(separated);
    debug!(
        component = %key,
        owner = %owner.key(),
        separated,
        "Component detached"
    );

    Some(child)
}

/// Store `child` and run the replace/attach hook sequence.
///
/// Caller holds the owner's mutation gate and has already pointed the child's
/// back-reference at `owner`. A displaced child gets its detach hooks while it
/// still occupies the slot; the slot is overwritten afterwards.
fn insert_and_notify(owner: &Arc<dyn Component>, key: ComponentKey, child: Arc<dyn Component>) {
    let registry = owner.registry();

    let outgoing = registry.get_dyn(&key);
    if let Some(old) = &outgoing {
        owner.on_component_detached(old.as_ref());
        old.on_detached_from_component();
    }

    let displaced = registry.children.write().insert(key, Arc::clone(&child));

    if let Some(old) = &outgoing {
        old.registry().release_parent();
        debug!(
            component = %key,
            owner = %owner.key(),
            "Component replaced"
        );
    }

    metrics::global().record_attach(displaced.is_some());
    debug!(
        component = %key,
        owner = %owner.key(),
        "Component attached"
    );

    owner.on_component_attached(child.as_ref());
    child.on_attached_to_component();
}

/// Whether `candidate` is `node` itself or sits above it in the tree.
fn is_self_or_ancestor(candidate: &Arc<dyn Component>, node: &Arc<dyn Component>) -> bool {
    let target = Arc::as_ptr(candidate) as *const ();
    let mut current = Some(Arc::clone(node));
    while let Some(n) = current {
        if Arc::as_ptr(&n) as *const () == target {
            return true;
        }
        current = n.registry().parent_dyn();
    }
    false
}
