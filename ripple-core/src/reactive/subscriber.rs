//! Subscriber bookkeeping for reactive cells.
//!
//! Every cell owns a [`SubscriberSet`]: the effects that read it while they
//! were active. Membership is keyed by [`EffectId`], so an effect that reads
//! the same cell several times in one run is stored once.

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use parking_lot::Mutex;
use smallvec::SmallVec;

use super::Effect;

/// Unique identifier for an effect.
///
/// Each effect gets a unique ID when created. Cells key their subscriber
/// sets by this ID, which is what makes re-subscription a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectId(u64);

impl EffectId {
    /// Generate a new unique effect ID.
    ///
    /// Uses an atomic counter to ensure uniqueness across threads.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for EffectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Effects collected for a single trigger pass.
///
/// Most cells have a handful of dependents, so the snapshot stays inline.
pub(crate) type Snapshot = SmallVec<[Effect; 4]>;

/// The set of effects subscribed to one cell.
///
/// The lock only guards the map itself. It is never held while an effect
/// body runs, so a subscriber may read or write the owning cell freely.
#[derive(Default)]
pub struct SubscriberSet {
    effects: Mutex<IndexMap<EffectId, Effect>>,
}

impl SubscriberSet {
    /// Create an empty subscriber set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `effect` to the set.
    ///
    /// Returns `false` if it was already subscribed.
    pub fn insert(&self, effect: &Effect) -> bool {
        let mut effects = self.effects.lock();
        if effects.contains_key(&effect.id()) {
            return false;
        }
        effects.insert(effect.id(), effect.clone());
        true
    }

    /// Check whether the effect with the given ID is subscribed.
    pub fn contains(&self, id: EffectId) -> bool {
        self.effects.lock().contains_key(&id)
    }

    /// Number of subscribed effects.
    pub fn len(&self) -> usize {
        self.effects.lock().len()
    }

    /// Whether no effect is subscribed.
    pub fn is_empty(&self) -> bool {
        self.effects.lock().is_empty()
    }

    /// IDs of the subscribed effects, in subscription order.
    pub fn ids(&self) -> Vec<EffectId> {
        self.effects.lock().keys().copied().collect()
    }

    /// Clone out the current subscribers so they can run without the lock.
    ///
    /// Effects subscribed while the snapshot is being run are picked up by
    /// the next trigger, not this one.
    pub(crate) fn snapshot(&self) -> Snapshot {
        self.effects.lock().values().cloned().collect()
    }
}

impl std::fmt::Debug for SubscriberSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.ids()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_ids_are_unique() {
        let id1 = EffectId::new();
        let id2 = EffectId::new();
        let id3 = EffectId::new();

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);
    }

    #[test]
    fn insert_is_idempotent() {
        let set = SubscriberSet::new();
        let effect = Effect::new(|| {});

        assert!(set.insert(&effect));
        assert!(!set.insert(&effect));
        assert!(!set.insert(&effect.clone()));

        assert_eq!(set.len(), 1);
        assert!(set.contains(effect.id()));
    }

    #[test]
    fn identical_bodies_are_distinct_subscribers() {
        let set = SubscriberSet::new();
        let first = Effect::new(|| {});
        let second = Effect::new(|| {});

        set.insert(&first);
        set.insert(&second);

        assert_eq!(set.ids(), vec![first.id(), second.id()]);
    }

    #[test]
    fn snapshot_is_detached_from_set() {
        let set = SubscriberSet::new();
        let first = Effect::new(|| {});
        set.insert(&first);

        let snapshot = set.snapshot();
        set.insert(&Effect::new(|| {}));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }
}
