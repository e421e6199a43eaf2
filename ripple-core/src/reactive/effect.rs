//! Effect Implementation
//!
//! An Effect is a side-effecting computation that re-runs whenever a cell it
//! read is written.
//!
//! # How Effects Work
//!
//! 1. When created, the effect runs its body immediately to establish its
//!    initial subscriptions.
//!
//! 2. Every run enters a [`ReactiveContext`]: the process-wide effect lock
//!    is taken and the effect becomes the active effect. Each cell read by
//!    the body subscribes it. The context is dropped when the body returns
//!    or unwinds, restoring the register and releasing the lock.
//!
//! 3. A write to any subscribed cell runs the effect again, through the same
//!    protocol. Subscriptions accumulate across runs and are never cleared.
//!
//! # Limitations
//!
//! An effect that writes a cell it also reads (directly or through a
//! computed) re-enters itself without bound until the stack overflows.
//! There is no cycle detection.
//!
//! Subscriber sets hold strong handles, so an effect and everything its body
//! captures stay alive as long as any cell it read is alive. Disposing an
//! effect stops it from running; it does not remove it from those sets.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use super::context::ReactiveContext;
use super::subscriber::EffectId;

struct EffectInner {
    /// Unique identifier, used as the subscription key.
    id: EffectId,

    /// The effect body.
    body: Box<dyn Fn() + Send + Sync>,

    /// Whether the effect has been disposed.
    disposed: AtomicBool,

    /// Number of times the body has run.
    run_count: AtomicUsize,
}

/// A side-effecting computation that runs when its dependencies change.
///
/// Cloning an `Effect` yields another handle to the same effect: same ID,
/// same run count, same disposal state.
///
/// # Example
///
/// ```rust
/// use ripple_core::reactive::{Effect, Ref};
///
/// let count = Ref::new(0);
/// let count_clone = count.clone();
///
/// let effect = Effect::new(move || {
///     println!("Count is: {}", count_clone.get());
/// });
///
/// count.set(5); // Prints: "Count is: 5"
/// assert_eq!(effect.run_count(), 2);
/// ```
#[derive(Clone)]
pub struct Effect {
    inner: Arc<EffectInner>,
}

impl Effect {
    /// Create a new effect with the given body.
    ///
    /// The body runs immediately to establish initial subscriptions.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let effect = Self {
            inner: Arc::new(EffectInner {
                id: EffectId::new(),
                body: Box::new(body),
                disposed: AtomicBool::new(false),
                run_count: AtomicUsize::new(0),
            }),
        };
        tracing::debug!(effect = ?effect.id(), "effect created");

        effect.run();
        effect
    }

    /// Get the effect's unique ID.
    pub fn id(&self) -> EffectId {
        self.inner.id
    }

    /// Run the body as the active effect.
    ///
    /// Blocks until no other effect is running on another thread. Called
    /// by cells on every write; calling it directly behaves the same way.
    /// Panics from the body propagate after the context is restored.
    pub fn run(&self) {
        if self.is_disposed() {
            return;
        }

        let _ctx = ReactiveContext::enter(self);

        let run = self.inner.run_count.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(effect = ?self.id(), run, "running effect");

        (self.inner.body)();
    }

    /// Dispose of the effect.
    ///
    /// After disposal, the effect will not run again.
    pub fn dispose(&self) {
        if !self.inner.disposed.swap(true, Ordering::SeqCst) {
            tracing::debug!(effect = ?self.id(), "effect disposed");
        }
    }

    /// Check if the effect has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::SeqCst)
    }

    /// Get the number of times the body has run.
    pub fn run_count(&self) -> usize {
        self.inner.run_count.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect")
            .field("id", &self.id())
            .field("run_count", &self.run_count())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Watch the cells read by `body` and re-run it whenever one is written.
///
/// The body runs once immediately. No handle is returned: the effect lives
/// for as long as the cells it read, and cannot be cancelled. Use
/// [`Effect::new`] to keep a handle.
pub fn watch_effect<F>(body: F)
where
    F: Fn() + Send + Sync + 'static,
{
    Effect::new(body);
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
