#![forbid(unsafe_code)]

//! Per-dialog visibility phase machine.
//!
//! The machine walks `Closed → Opening → Open → Closing → Closed` and nothing
//! else. Each stepper admits exactly one source phase and reports whether it
//! fired, so out-of-phase or repeated requests coalesce into no-ops instead of
//! producing half-applied transitions.
//!
//! Lifecycle notifications for these steps are emitted by the composing
//! [`DialogController`](crate::controller::DialogController), which also
//! performs the stack/focus/scroll side effects between the two halves of a
//! transition.
//!
//! # Invariants
//!
//! - The phase is always one of the four variants; there is no transient
//!   in-between state observable from outside.
//! - `Closing` is never skipped: a close always steps `Open → Closing` before
//!   `Closing → Closed`.
//! - At most one transition is in flight; a second `begin_*` while the
//!   matching phase is not current returns `false` and changes nothing.

use tracing::trace;

/// The visibility phase of a dialog instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Not visible; the resting initial and terminal phase.
    #[default]
    Closed,
    /// Open admitted, entrance in progress.
    Opening,
    /// Fully open and interactive.
    Open,
    /// Close admitted, exit in progress.
    Closing,
}

/// Owns a dialog's [`Visibility`] phase and its transition guards.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityController {
    phase: Visibility,
}

impl VisibilityController {
    /// Create a controller in the `Closed` phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Visibility {
        self.phase
    }

    /// Whether the dialog occupies the screen (any phase but `Closed`).
    ///
    /// Stays `true` through `Closing` so exit animations have something to
    /// render.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.phase != Visibility::Closed
    }

    /// `Closed → Opening`. Returns `false` (no-op) from any other phase.
    pub fn begin_open(&mut self) -> bool {
        self.step(Visibility::Closed, Visibility::Opening)
    }

    /// `Opening → Open`. Returns `false` (no-op) from any other phase.
    pub fn finish_open(&mut self) -> bool {
        self.step(Visibility::Opening, Visibility::Open)
    }

    /// `Open → Closing`. Returns `false` (no-op) from any other phase.
    pub fn begin_close(&mut self) -> bool {
        self.step(Visibility::Open, Visibility::Closing)
    }

    /// `Closing → Closed`. Returns `false` (no-op) from any other phase.
    pub fn finish_close(&mut self) -> bool {
        self.step(Visibility::Closing, Visibility::Closed)
    }

    fn step(&mut self, from: Visibility, to: Visibility) -> bool {
        if self.phase != from {
            trace!(?from, ?to, current = ?self.phase, "visibility step coalesced");
            return false;
        }
        self.phase = to;
        trace!(?from, ?to, "visibility step");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_open_close_cycle() {
        let mut v = VisibilityController::new();
        assert_eq!(v.phase(), Visibility::Closed);
        assert!(!v.is_visible());

        assert!(v.begin_open());
        assert_eq!(v.phase(), Visibility::Opening);
        assert!(v.is_visible());

        assert!(v.finish_open());
        assert_eq!(v.phase(), Visibility::Open);

        assert!(v.begin_close());
        assert_eq!(v.phase(), Visibility::Closing);
        assert!(v.is_visible());

        assert!(v.finish_close());
        assert_eq!(v.phase(), Visibility::Closed);
        assert!(!v.is_visible());
    }

    #[test]
    fn open_when_open_is_noop() {
        let mut v = VisibilityController::new();
        assert!(v.begin_open());
        assert!(v.finish_open());

        assert!(!v.begin_open());
        assert_eq!(v.phase(), Visibility::Open);
    }

    #[test]
    fn close_when_closed_is_noop() {
        let mut v = VisibilityController::new();
        assert!(!v.begin_close());
        assert!(!v.finish_close());
        assert_eq!(v.phase(), Visibility::Closed);
    }

    #[test]
    fn close_never_skips_closing() {
        let mut v = VisibilityController::new();
        v.begin_open();
        v.finish_open();

        // finish_close without begin_close must not fire.
        assert!(!v.finish_close());
        assert_eq!(v.phase(), Visibility::Open);

        assert!(v.begin_close());
        assert!(v.finish_close());
        assert_eq!(v.phase(), Visibility::Closed);
    }

    #[test]
    fn second_begin_while_transition_pending_is_noop() {
        let mut v = VisibilityController::new();
        assert!(v.begin_open());
        assert!(!v.begin_open());
        assert!(!v.begin_close());
        assert_eq!(v.phase(), Visibility::Opening);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone, Copy)]
        enum Op {
            BeginOpen,
            FinishOpen,
            BeginClose,
            FinishClose,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                Just(Op::BeginOpen),
                Just(Op::FinishOpen),
                Just(Op::BeginClose),
                Just(Op::FinishClose),
            ]
        }

        proptest! {
            /// Any sequence of steppers only ever walks the four-phase cycle
            /// in order; a stepper that fires always lands on its target.
            #[test]
            fn phase_walks_cycle(ops in proptest::collection::vec(op_strategy(), 0..64)) {
                let mut v = VisibilityController::new();
                for op in ops {
                    let before = v.phase();
                    let (fired, expect_from, expect_to) = match op {
                        Op::BeginOpen => (v.begin_open(), Visibility::Closed, Visibility::Opening),
                        Op::FinishOpen => (v.finish_open(), Visibility::Opening, Visibility::Open),
                        Op::BeginClose => (v.begin_close(), Visibility::Open, Visibility::Closing),
                        Op::FinishClose => (v.finish_close(), Visibility::Closing, Visibility::Closed),
                    };
                    if fired {
                        prop_assert_eq!(before, expect_from);
                        prop_assert_eq!(v.phase(), expect_to);
                    } else {
                        prop_assert_eq!(v.phase(), before);
                    }
                }
            }
        }
    }
}
