//! The abstract reactive cell.
//!
//! [`Ref`](super::Ref) and [`Computed`](super::Computed) are both cells: each
//! has an identity and a [`SubscriberSet`], and both share the track and
//! trigger steps defined here.

use std::sync::atomic::{AtomicU64, Ordering};

use super::context::ReactiveContext;
use super::subscriber::SubscriberSet;
use super::EffectId;
use crate::error::ReactiveError;

/// Unique identifier for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(u64);

impl CellId {
    /// Generate a new unique cell ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for CellId {
    fn default() -> Self {
        Self::new()
    }
}

/// A unit of reactive state with a subscriber set.
///
/// `read` subscribes the active effect (if any) and returns the value.
/// `write` replaces the value and re-runs every subscriber, or fails for
/// cells that cannot be written.
pub trait ReactiveCell<T>: Send + Sync {
    /// The cell's unique ID.
    fn id(&self) -> CellId;

    /// Read the value, subscribing the active effect.
    fn read(&self) -> T;

    /// Write a new value and trigger subscribers.
    fn write(&self, value: T) -> Result<(), ReactiveError>;

    /// Number of effects subscribed to this cell.
    fn subscriber_count(&self) -> usize;

    /// Whether the given effect is subscribed to this cell.
    fn is_subscribed(&self, effect: EffectId) -> bool;
}

/// Subscribe the active effect to the cell owning `subscribers`.
pub(crate) fn track(cell: CellId, subscribers: &SubscriberSet) {
    if let Some(effect) = ReactiveContext::current_effect() {
        if subscribers.insert(&effect) {
            tracing::trace!(?cell, effect = ?effect.id(), "subscribed");
        }
    }
}

/// Run every subscriber of the cell owning `subscribers`.
///
/// The caller must hold the effect lock, so the snapshot and the runs happen
/// in one critical section.
pub(crate) fn trigger(cell: CellId, subscribers: &SubscriberSet) {
    let effects = subscribers.snapshot();
    tracing::trace!(?cell, subscribers = effects.len(), "trigger");

    for effect in effects {
        effect.run();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Effect;

    #[test]
    fn cell_ids_are_unique() {
        let c1 = CellId::new();
        let c2 = CellId::new();
        let c3 = CellId::new();

        assert_ne!(c1, c2);
        assert_ne!(c2, c3);
        assert_ne!(c1, c3);
    }

    #[test]
    fn track_without_active_effect_is_noop() {
        let subscribers = SubscriberSet::new();
        track(CellId::new(), &subscribers);
        assert!(subscribers.is_empty());
    }

    #[test]
    fn track_inside_context_subscribes_once() {
        let cell = CellId::new();
        let subscribers = SubscriberSet::new();
        let effect = Effect::new(|| {});

        {
            let _ctx = ReactiveContext::enter(&effect);
            track(cell, &subscribers);
            track(cell, &subscribers);
        }

        assert_eq!(subscribers.ids(), vec![effect.id()]);
    }
}
