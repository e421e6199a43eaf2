//! Ref Implementation
//!
//! A Ref is the fundamental reactive primitive. It holds a value and
//! tracks which effects depend on it.
//!
//! # How Refs Work
//!
//! 1. When a ref is read while an effect is active, the ref registers that
//!    effect as a subscriber.
//!
//! 2. When a ref's value is written, every subscriber re-runs synchronously,
//!    in subscription order.
//!
//! 3. Subscribers are never removed. An effect that stopped reading the ref
//!    keeps being re-run by it.
//!
//! # Thread Safety
//!
//! The value is protected by a RwLock. Writes additionally hold the
//! process-wide effect lock across the value swap and the trigger cascade,
//! so concurrent writers are observed by subscribers one at a time.

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::RwLock;

use super::cell::{self, CellId, ReactiveCell};
use super::context::ReactiveContext;
use super::subscriber::SubscriberSet;
use super::EffectId;
use crate::error::ReactiveError;

/// A mutable reactive cell holding a value of type T.
///
/// # Example
///
/// ```rust
/// use ripple_core::reactive::Ref;
///
/// let count = Ref::new(0);
/// count.set(5);
/// count.update(|n| n + 1);
/// assert_eq!(count.get(), 6);
/// ```
pub struct Ref<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Unique identifier for this cell.
    id: CellId,

    /// The current value.
    value: Arc<RwLock<T>>,

    /// Effects that read this cell while active.
    subscribers: Arc<SubscriberSet>,
}

impl<T> Ref<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new ref with the given initial value.
    ///
    /// Nothing is tracked at construction.
    pub fn new(value: T) -> Self {
        Self {
            id: CellId::new(),
            value: Arc::new(RwLock::new(value)),
            subscribers: Arc::new(SubscriberSet::new()),
        }
    }

    /// Get the current value.
    ///
    /// If called inside a running effect, this also subscribes that effect.
    pub fn get(&self) -> T {
        cell::track(self.id, &self.subscribers);
        self.value.read().clone()
    }

    /// Get the current value without tracking.
    pub fn get_untracked(&self) -> T {
        self.value.read().clone()
    }

    /// Set a new value and run every subscriber.
    pub fn set(&self, value: T) {
        let _section = ReactiveContext::critical_section();

        *self.value.write() = value;
        cell::trigger(self.id, &self.subscribers);
    }

    /// Update the value using a function of the current value.
    ///
    /// The read and the write happen in one critical section, so no other
    /// writer can slip in between. The read is untracked, and `f` runs on a
    /// copy of the value, so it may write cells whose subscribers write back
    /// into this one.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let _section = ReactiveContext::critical_section();

        let current = self.value.read().clone();
        let next = f(&current);
        self.set(next);
    }

    /// Get the number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T> ReactiveCell<T> for Ref<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn id(&self) -> CellId {
        self.id
    }

    fn read(&self) -> T {
        self.get()
    }

    fn write(&self, value: T) -> Result<(), ReactiveError> {
        self.set(value);
        Ok(())
    }

    fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn is_subscribed(&self, effect: EffectId) -> bool {
        self.subscribers.contains(effect)
    }
}

impl<T> Clone for Ref<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Arc::clone(&self.value),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T> Debug for Ref<T>
where
    T: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ref")
            .field("id", &self.id)
            .field("value", &self.get_untracked())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
