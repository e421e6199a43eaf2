//! Reactive Context
//!
//! The reactive context tracks which effect is currently running.
//! This enables automatic dependency tracking: when a cell is read,
//! we can register the current effect as a subscriber.
//!
//! # Implementation
//!
//! There is exactly one active-effect register for the whole process, and it
//! lives inside a process-wide reentrant mutex. Entering a context locks the
//! mutex, swaps the effect into the register and remembers what was there
//! before. Dropping the context puts the previous occupant back and unlocks.
//!
//! Because the register sits inside the lock:
//!
//! - At most one effect body runs at a time, across all threads.
//! - A write issued from inside an effect body re-locks on the same thread,
//!   so trigger cascades nest without deadlocking.
//! - A read on a thread that does not hold the lock sees no active effect
//!   and never subscribes anything. Reads never block.
//!
//! The register is restored when the guard drops, so the exit path taken
//! while unwinding from a panicking body clears it just like a normal return.

use std::cell::RefCell;

use parking_lot::{const_reentrant_mutex, ReentrantMutex, ReentrantMutexGuard};

use super::{Effect, EffectId};
use crate::error::ReactiveError;

type Register = RefCell<Option<Effect>>;

/// The active-effect register and the lock serializing every effect run.
static REGISTER: ReentrantMutex<Register> = const_reentrant_mutex(RefCell::new(None));

/// Guard that marks an effect as active for as long as it lives.
///
/// Holding a `ReactiveContext` means holding the process-wide lock. The guard
/// is not `Send`: it must be dropped on the thread that entered it.
pub struct ReactiveContext {
    effect_id: EffectId,
    previous: Option<Effect>,
    register: ReentrantMutexGuard<'static, Register>,
}

impl ReactiveContext {
    /// Make `effect` the active effect.
    ///
    /// Blocks until no other thread is running an effect. While the returned
    /// guard lives, any cell read on this thread subscribes `effect`.
    pub fn enter(effect: &Effect) -> Self {
        let register = REGISTER.lock();
        let previous = register.replace(Some(effect.clone()));

        Self {
            effect_id: effect.id(),
            previous,
            register,
        }
    }

    /// Hold the lock without changing the active effect.
    ///
    /// Writes take this for the duration of the value swap and the trigger
    /// cascade, so they are ordered with respect to every effect run.
    pub fn critical_section() -> CriticalSection {
        CriticalSection {
            _register: REGISTER.lock(),
        }
    }

    /// Check if an effect is active on the calling thread.
    pub fn is_active() -> bool {
        Self::current_effect().is_some()
    }

    /// The effect active on the calling thread, if any.
    ///
    /// Returns `None` without blocking when another thread holds the lock:
    /// whatever that thread is running is not ours to subscribe.
    pub fn current_effect() -> Option<Effect> {
        let register = REGISTER.try_lock()?;
        let effect = register.borrow().clone();
        effect
    }

    /// ID of the effect active on the calling thread, if any.
    pub fn current_effect_id() -> Option<EffectId> {
        Self::current_effect().map(|effect| effect.id())
    }
}

impl Drop for ReactiveContext {
    fn drop(&mut self) {
        let found = self
            .register
            .replace(self.previous.take())
            .map(|effect| effect.id());

        if found != Some(self.effect_id) {
            let err = ReactiveError::TrackingState {
                expected: self.effect_id,
                found,
            };
            tracing::error!(error = %err, "active-effect register corrupted");

            // Panicking again while unwinding would abort the process.
            if !std::thread::panicking() {
                panic!("{err}");
            }
        }
    }
}

/// Guard holding the effect lock with the register left untouched.
pub struct CriticalSection {
    _register: ReentrantMutexGuard<'static, Register>,
}
