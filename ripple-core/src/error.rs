//! Error types for the reactive runtime.

use thiserror::Error;

use crate::reactive::{CellId, EffectId};

/// Errors surfaced by reactive cells and the tracking machinery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactiveError {
    /// A write was attempted on a computed cell.
    ///
    /// Computed cells derive their value from a getter and are read-only.
    #[error("cannot set value of computed cell {cell:?}")]
    IllegalWrite { cell: CellId },

    /// The active-effect register did not hold the effect that was exiting.
    ///
    /// This means the register was corrupted by an unbalanced enter/exit
    /// pair and dependency attribution can no longer be trusted.
    #[error("active effect mismatch on exit: expected {expected:?}, found {found:?}")]
    TrackingState {
        expected: EffectId,
        found: Option<EffectId>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_write_message_names_cell() {
        let cell = CellId::new();
        let err = ReactiveError::IllegalWrite { cell };
        let message = err.to_string();

        assert!(message.starts_with("cannot set value of computed cell"));
        assert!(message.contains(&format!("{cell:?}")));
    }

    #[test]
    fn tracking_state_message_reports_both_sides() {
        let expected = EffectId::new();
        let err = ReactiveError::TrackingState {
            expected,
            found: None,
        };

        let message = err.to_string();
        assert!(message.contains(&format!("{expected:?}")));
        assert!(message.contains("None"));
    }
}
