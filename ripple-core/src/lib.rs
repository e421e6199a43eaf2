//! Ripple Core
//!
//! This crate provides a fine-grained reactive dependency-tracking runtime.
//! It implements:
//!
//! - Mutable cells ([`Ref`](reactive::Ref)) that record who reads them
//! - Derived cells ([`Computed`](reactive::Computed)) evaluated on every read
//! - Effects that re-run whenever a cell they read is written
//!
//! Dependencies are discovered implicitly: reading a cell while an effect is
//! running subscribes that effect, and writing the cell re-runs it.
//!
//! # Architecture
//!
//! - `reactive`: the primitives and the tracking machinery
//! - `error`: the error type surfaced by cells and the tracking layer
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use ripple_core::{computed, ref_cell, watch_effect};
//!
//! let a = ref_cell(2);
//! let b = ref_cell(3);
//! let (a2, b2) = (a.clone(), b.clone());
//! let c = computed(move || a2.get() + b2.get());
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let seen_clone = seen.clone();
//! watch_effect(move || seen_clone.lock().unwrap().push(c.get()));
//!
//! a.set(10);
//! b.set(1000);
//! b.set(-10);
//! assert_eq!(*seen.lock().unwrap(), vec![5, 13, 1010, 0]);
//! ```

pub mod error;
pub mod reactive;

pub use error::ReactiveError;
pub use reactive::{computed, ref_cell, watch_effect, Computed, Effect, ReactiveCell, Ref};
