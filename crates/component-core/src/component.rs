//! # Component Trait - Type-Keyed Composition Contract
//!
//! Defines what it means to be a component: a payload that carries its own
//! [`ComponentRegistry`] of sub-components and may observe its attachment
//! lifecycle through four optional hooks.
//!
//! ## Example Implementation
//!
//! ```rust,ignore
//! use component_core::{Component, ComponentRegistry};
//!
//! #[derive(Default)]
//! pub struct Renderable {
//!     registry: ComponentRegistry,
//! }
//!
//! impl Component for Renderable {
//!     fn registry(&self) -> &ComponentRegistry {
//!         &self.registry
//!     }
//!
//!     fn on_attached_to_component(&self) {
//!         // self.registry.parent::<Window>() is valid here
//!     }
//! }
//! ```

use crate::registry::ComponentRegistry;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Type-erasure helper implemented for every `Any + Send + Sync` type.
///
/// Lets a `dyn Component` be turned back into its concrete type without
/// every component writing the conversion by hand.
pub trait AsAny: Any + Send + Sync {
    /// Borrow as `&dyn Any` for `downcast_ref`.
    fn as_any(&self) -> &dyn Any;

    /// Convert a shared handle into `Arc<dyn Any>` for `Arc::downcast`.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// Name of the concrete type.
    fn component_type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn component_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// The contract every composable unit implements.
///
/// A component is both a payload (whatever state the concrete type carries)
/// and a registry of at most one child per concrete type. The registry lives
/// in the concrete type and is exposed through [`Component::registry`].
///
/// Payload state is not protected by the registry: components are shared
/// across threads behind `Arc`, so mutable payload uses interior mutability.
pub trait Component: AsAny {
    /// The registry holding this component's sub-components.
    fn registry(&self) -> &ComponentRegistry;

    /// Invoked on a child right after it has been placed into a parent's
    /// registry. `registry().parent()` already resolves to the new parent.
    fn on_attached_to_component(&self) {}

    /// Invoked on a child right before it leaves a parent's registry through
    /// removal or separation. `registry().parent()` still resolves here.
    fn on_detached_from_component(&self) {}

    /// Invoked on a parent before the new child's own attach hook.
    fn on_component_attached(&self, _component: &dyn Component) {}

    /// Invoked on a parent after the leaving child's own detach hook.
    fn on_component_detached(&self, _component: &dyn Component) {}
}

impl dyn Component {
    /// Whether the concrete type behind this trait object is `T`.
    pub fn is<T: Component>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Checked downcast of a borrowed trait object.
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Checked downcast of a shared handle; `None` on type mismatch.
    pub fn downcast_arc<T: Component>(self: Arc<Self>) -> Option<Arc<T>> {
        self.into_any_arc().downcast::<T>().ok()
    }

    /// Key this component occupies in a parent's registry.
    pub fn key(&self) -> ComponentKey {
        ComponentKey {
            type_id: Any::type_id(self.as_any()),
            type_name: self.component_type_name(),
        }
    }
}

impl fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("type", &self.component_type_name())
            .field("children", &self.registry().len())
            .finish()
    }
}

/// Stable identifier of a concrete component type.
///
/// Equality and hashing use the [`TypeId`] only; the name is carried for
/// logging and introspection.
#[derive(Clone, Copy)]
pub struct ComponentKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl ComponentKey {
    /// Key for the concrete type `T`.
    pub fn of<T: Component>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name without its module path (`a::b::Foo<c::Bar>` -> `Foo<Bar>`).
    pub fn short_name(&self) -> String {
        let mut out = String::with_capacity(self.type_name.len());
        let mut segment = String::new();
        for ch in self.type_name.chars() {
            match ch {
                ':' => segment.clear(),
                '<' | '>' | ',' | ' ' | '[' | ']' | '(' | ')' | '&' | ';' => {
                    out.push_str(&segment);
                    segment.clear();
                    out.push(ch);
                }
                _ => segment.push(ch),
            }
        }
        out.push_str(&segment);
        out
    }
}

impl PartialEq for ComponentKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ComponentKey {}

impl Hash for ComponentKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentKey").field(&self.type_name).finish()
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// Implement [`Component`] for a type that keeps its registry in a field and
/// does not override any lifecycle hook.
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Tag { registry: ComponentRegistry }
/// impl_component!(Tag);
///
/// struct Named { children: ComponentRegistry, name: String }
/// impl_component!(Named, children);
/// ```
#[macro_export]
macro_rules! impl_component {
    ($ty:ty) => {
        $crate::impl_component!($ty, registry);
    };
    ($ty:ty, $field:ident) => {
        impl $crate::Component for $ty {
            fn registry(&self) -> &$crate::ComponentRegistry {
                &self.$field
            }
        }
    };
}
