//! # Component Core - Runtime Type-Keyed Composition
//!
//! Lets behaviour be composed onto an object at runtime instead of through
//! static subtyping: every component owns a registry of sub-components keyed
//! by their concrete type, and the tree can be inspected and rearranged while
//! the program runs.
//!
//! ## Architecture
//!
//! ```text
//!            ┌───────────────────────────┐
//!            │  Window (Arc<Window>)     │
//!            │  registry: {              │
//!            │    Transform ──────────┐  │
//!            │    Renderable ──────┐  │  │
//!            │  }                  │  │  │
//!            └─────────────────────┼──┼──┘
//!                       ▲  Weak    │  │ Arc (owned)
//!                       └──────────┴──┘
//! ```
//!
//! - **[`Component`]**: trait with a registry accessor and four lifecycle
//!   hooks, all no-ops by default.
//! - **[`ComponentRegistry`]**: per-component storage; at most one child per
//!   concrete type, a weak back-reference to the parent.
//! - **[`ComponentExt`]**: add / adopt / remove / get / has / acquire /
//!   separate / parent lookup on component handles.
//!
//! ## Invariants
//!
//! - A key maps to at most one child; adding a second child of the same type
//!   replaces the first (detach-old, then attach-new).
//! - A component is a child of at most one registry at a time; adoption of an
//!   attached component or of an ancestor is refused.
//! - A child's parent reference resolves from its attach hooks until its
//!   detach hooks have run, and never to a parent that is being dropped.
//! - Registry reads run concurrently; structural changes are exclusive and
//!   become visible before the hooks that accompany them run, except that a
//!   replaced child is notified before its slot is overwritten.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use component_core::{impl_component, ComponentExt, ComponentRegistry};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Health {
//!     registry: ComponentRegistry,
//!     points: AtomicU32,
//! }
//! impl_component!(Health);
//!
//! let player = Arc::new(Player::default());
//! let health = player.acquire_component::<Health>();
//! assert!(player.has_component::<Health>());
//!
//! let detached = player.separate_component::<Health>().unwrap();
//! npc.adopt_component(detached)?;
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod component;
pub mod error;
pub mod ext;
pub mod metrics;
pub mod registry;

// Re-export main types
pub use component::{AsAny, Component, ComponentKey};
pub use error::ComponentError;
pub use ext::ComponentExt;
pub use metrics::{MetricsSnapshot, RegistryMetrics};
pub use registry::ComponentRegistry;
