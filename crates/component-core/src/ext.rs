//! # Composition Operations
//!
//! The typed operations callers use to rearrange a component tree. They are
//! defined on shared handles (`Arc<P>` and `Arc<dyn Component>`) because
//! attaching a child records a weak back-reference to the handle's
//! allocation.
//!
//! ```rust,ignore
//! use component_core::ComponentExt;
//!
//! let window = Arc::new(Window::default());
//! window.add_component(Transform::at(0, 0));
//!
//! let transform = window.separate_component::<Transform>().unwrap();
//! other_window.adopt_component(transform)?;
//! ```

use crate::component::{Component, ComponentKey};
use crate::error::ComponentError;
use crate::registry;
use std::sync::Arc;

mod sealed {
    use crate::component::Component;
    use std::sync::Arc;

    pub trait Owner {
        fn component(&self) -> &dyn Component;
        fn handle(&self) -> Arc<dyn Component>;
    }

    impl<P: Component> Owner for Arc<P> {
        fn component(&self) -> &dyn Component {
            &**self
        }

        fn handle(&self) -> Arc<dyn Component> {
            Arc::clone(self) as Arc<dyn Component>
        }
    }

    impl Owner for Arc<dyn Component> {
        fn component(&self) -> &dyn Component {
            &**self
        }

        fn handle(&self) -> Arc<dyn Component> {
            Arc::clone(self)
        }
    }
}

/// Typed registry operations on a component handle.
///
/// Every type parameter `T` names the slot: a registry holds at most one
/// child per concrete type.
pub trait ComponentExt: sealed::Owner {
    /// Attach `component` under `T`'s key, replacing (and releasing) any
    /// existing child of that type first.
    ///
    /// The displaced child's detach hooks run while it still occupies the
    /// slot; `get_component::<T>()` returns the new child only after they
    /// finish. The new child's parent reference is already set by then.
    ///
    /// Returns a handle to the stored child; the registry stays its owner.
    fn add_component<T: Component>(&self, component: T) -> Arc<T> {
        let child = Arc::new(component);
        registry::attach(&self.handle(), ComponentKey::of::<T>(), child.clone());
        child
    }

    /// Attach an already constructed component, typically one separated from
    /// another parent. Replacement semantics match [`add_component`].
    ///
    /// # Errors
    ///
    /// - [`ComponentError::AlreadyAttached`] if it still has a live parent.
    /// - [`ComponentError::CycleDetected`] if it is this component or one of
    ///   its ancestors.
    ///
    /// [`add_component`]: ComponentExt::add_component
    fn adopt_component<T: Component>(&self, component: Arc<T>) -> Result<Arc<T>, ComponentError> {
        registry::adopt(&self.handle(), ComponentKey::of::<T>(), component.clone())?;
        Ok(component)
    }

    /// Detach and release the child of type `T`.
    ///
    /// Returns `false` (and changes nothing) when there is no such child.
    fn remove_component<T: Component>(&self) -> bool {
        registry::detach(self.component(), &ComponentKey::of::<T>(), false).is_some()
    }

    /// Get the child of type `T`.
    fn get_component<T: Component>(&self) -> Option<Arc<T>> {
        self.component().registry().get::<T>()
    }

    /// Check whether a child of type `T` is present.
    fn has_component<T: Component>(&self) -> bool {
        self.component().registry().has::<T>()
    }

    /// Get the child of type `T`, attaching `T::default()` first if absent.
    fn acquire_component<T: Component + Default>(&self) -> Arc<T> {
        registry::acquire::<T>(&self.handle())
    }

    /// Detach the child of type `T` and hand it back instead of releasing it.
    ///
    /// The returned component is standalone: its parent reference is cleared
    /// and it can be adopted elsewhere.
    fn separate_component<T: Component>(&self) -> Option<Arc<T>> {
        registry::detach(self.component(), &ComponentKey::of::<T>(), true)?.downcast_arc::<T>()
    }

    /// The parent this component is attached to, viewed as `T`.
    fn get_parent<T: Component>(&self) -> Option<Arc<T>> {
        self.component().registry().parent::<T>()
    }

    /// Snapshot of all children, for enumeration and introspection.
    fn get_components(&self) -> Vec<(ComponentKey, Arc<dyn Component>)> {
        self.component().registry().components()
    }
}

impl<O: sealed::Owner> ComponentExt for O {}
