//! Computed Implementation
//!
//! A Computed is a read-only cell whose value is derived from a getter.
//!
//! # How Computeds Work
//!
//! 1. Construction stores the getter and nothing else. The getter does not
//!    run until the first read.
//!
//! 2. Every read subscribes the active effect to the computed itself, then
//!    runs the getter. Cells the getter reads subscribe the same effect, so
//!    a write to any of them re-runs that effect, however many computeds
//!    sit in between.
//!
//! 3. Nothing is cached: each read recomputes from scratch, so a read after
//!    a dependency changed always sees the new value.
//!
//! Writes are rejected with [`ReactiveError::IllegalWrite`].

use std::fmt::Debug;
use std::sync::Arc;

use super::cell::{self, CellId, ReactiveCell};
use super::subscriber::SubscriberSet;
use super::EffectId;
use crate::error::ReactiveError;

/// A derived, read-only reactive cell.
///
/// # Example
///
/// ```rust
/// use ripple_core::reactive::{Computed, Ref};
///
/// let count = Ref::new(2);
/// let count_clone = count.clone();
/// let doubled = Computed::new(move || count_clone.get() * 2);
///
/// assert_eq!(doubled.get(), 4);
/// count.set(5);
/// assert_eq!(doubled.get(), 10);
/// assert!(doubled.set(1).is_err());
/// ```
pub struct Computed<T>
where
    T: Send + Sync + 'static,
{
    /// Unique identifier for this cell.
    id: CellId,

    /// The derivation, run on every read.
    getter: Arc<dyn Fn() -> T + Send + Sync>,

    /// Effects that read this cell while active.
    subscribers: Arc<SubscriberSet>,
}

impl<T> Computed<T>
where
    T: Send + Sync + 'static,
{
    /// Create a new computed from a getter.
    ///
    /// The getter is not invoked until the first read.
    pub fn new<F>(getter: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            id: CellId::new(),
            getter: Arc::new(getter),
            subscribers: Arc::new(SubscriberSet::new()),
        }
    }

    /// Evaluate the getter, subscribing the active effect first.
    pub fn get(&self) -> T {
        cell::track(self.id, &self.subscribers);
        (self.getter)()
    }

    /// Evaluate the getter without subscribing to this computed.
    ///
    /// Cells the getter reads still subscribe the active effect, if any.
    pub fn get_untracked(&self) -> T {
        (self.getter)()
    }

    /// Always fails: computeds are read-only.
    pub fn set(&self, _value: T) -> Result<(), ReactiveError> {
        tracing::debug!(cell = ?self.id, "rejected write to computed");
        Err(ReactiveError::IllegalWrite { cell: self.id })
    }

    /// Get the number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T> ReactiveCell<T> for Computed<T>
where
    T: Send + Sync + 'static,
{
    fn id(&self) -> CellId {
        self.id
    }

    fn read(&self) -> T {
        self.get()
    }

    fn write(&self, value: T) -> Result<(), ReactiveError> {
        self.set(value)
    }

    fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn is_subscribed(&self, effect: EffectId) -> bool {
        self.subscribers.contains(effect)
    }
}

impl<T> Clone for Computed<T>
where
    T: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            getter: Arc::clone(&self.getter),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T> Debug for Computed<T>
where
    T: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Computed")
            .field("id", &self.id)
            .field("subscriber_count", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{Effect, Ref};
    use std::sync::atomic::{AtomicI32, Ordering};

    #[test]
    fn computed_is_lazy() {
        let evaluations = Arc::new(AtomicI32::new(0));
        let evaluations_clone = evaluations.clone();

        let computed = Computed::new(move || {
            evaluations_clone.fetch_add(1, Ordering::SeqCst);
            7
        });

        assert_eq!(evaluations.load(Ordering::SeqCst), 0);
        assert_eq!(computed.get(), 7);
        assert_eq!(evaluations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn computed_recomputes_on_every_read() {
        let evaluations = Arc::new(AtomicI32::new(0));
        let evaluations_clone = evaluations.clone();

        let computed = Computed::new(move || {
            evaluations_clone.fetch_add(1, Ordering::SeqCst);
            42
        });

        assert_eq!(computed.get(), 42);
        assert_eq!(computed.get(), 42);
        assert_eq!(computed.get_untracked(), 42);
        assert_eq!(evaluations.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn computed_is_fresh_after_dependency_write() {
        let base = Ref::new(3);
        let base_clone = base.clone();
        let squared = Computed::new(move || base_clone.get() * base_clone.get());

        assert_eq!(squared.get(), 9);
        base.set(-4);
        assert_eq!(squared.get(), 16);
    }

    #[test]
    fn computed_rejects_writes() {
        let computed = Computed::new(|| 1);
        let id = ReactiveCell::id(&computed);

        assert_eq!(
            computed.set(2),
            Err(ReactiveError::IllegalWrite { cell: id })
        );
        assert_eq!(
            computed.write(3),
            Err(ReactiveError::IllegalWrite { cell: id })
        );
        assert_eq!(computed.get(), 1);
    }

    #[test]
    fn computed_read_subscribes_effect_to_itself_and_sources() {
        let source = Ref::new(1);
        let source_clone = source.clone();
        let plus_one = Computed::new(move || source_clone.get() + 1);

        let plus_one_clone = plus_one.clone();
        let effect = Effect::new(move || {
            plus_one_clone.get();
        });

        assert!(plus_one.is_subscribed(effect.id()));
        assert!(source.is_subscribed(effect.id()));
    }

    #[test]
    fn computed_read_outside_effect_does_not_subscribe() {
        let source = Ref::new(1);
        let source_clone = source.clone();
        let plus_one = Computed::new(move || source_clone.get() + 1);

        assert_eq!(plus_one.get(), 2);
        assert_eq!(plus_one.subscriber_count(), 0);
        assert_eq!(source.subscriber_count(), 0);
    }
}
