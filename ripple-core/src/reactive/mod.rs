//! Reactive Primitives
//!
//! This module implements the core reactive system: refs, computeds, and
//! effects, and the tracking machinery connecting them.
//!
//! # Concepts
//!
//! ## Refs
//!
//! A [`Ref`] is a container for mutable state. When a ref is read inside a
//! running effect, the ref subscribes that effect. When the ref is written,
//! every subscribed effect re-runs.
//!
//! ## Computeds
//!
//! A [`Computed`] is a read-only value derived from a getter. It holds no
//! cache: every read runs the getter, and the cells the getter reads
//! subscribe whatever effect is active, so effects see through any number
//! of computeds to the refs underneath.
//!
//! ## Effects
//!
//! An [`Effect`] is a side-effecting computation. It runs once on creation
//! and again each time a cell it read is written.
//!
//! # Implementation Notes
//!
//! The currently running effect is held in a single process-wide register
//! guarded by a reentrant lock (see [`ReactiveContext`]). Only one effect
//! body runs at a time; cascades triggered from inside a body re-enter the
//! lock on the same thread.

mod cell;
mod context;
mod derived;
mod effect;
mod reference;
mod subscriber;

pub use cell::{CellId, ReactiveCell};
pub use context::{CriticalSection, ReactiveContext};
pub use derived::Computed;
pub use effect::{watch_effect, Effect};
pub use reference::Ref;
pub use subscriber::{EffectId, SubscriberSet};

/// Create a mutable reactive cell with an initial value.
pub fn ref_cell<T>(initial: T) -> Ref<T>
where
    T: Clone + Send + Sync + 'static,
{
    Ref::new(initial)
}

/// Create a read-only cell derived from `getter`.
///
/// The getter does not run until the first read.
pub fn computed<T, F>(getter: F) -> Computed<T>
where
    T: Send + Sync + 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    Computed::new(getter)
}
