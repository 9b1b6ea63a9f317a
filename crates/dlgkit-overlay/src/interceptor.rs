#![forbid(unsafe_code)]

//! Dismissal interception: the gate between `close-requested` and `closing`.
//!
//! A dialog may install a `before_close` callback ("are you sure you want to
//! discard changes?"). When a close is requested the callback receives a
//! [`CloseGuard`] — a single-use continuation capability — and the close
//! suspends until the guard is redeemed through
//! [`DialogController::resolve_close`](crate::controller::DialogController::resolve_close).
//! Without a callback the gate passes immediately.
//!
//! Every close path routes through this gate, including escape-key and
//! overlay-click dismissal, so the interceptor cannot be bypassed.
//!
//! # Failure Modes
//!
//! - A guard that is never redeemed leaves the dialog open indefinitely. That
//!   is the caller's intent, not a fault; nothing is logged above trace level.
//! - A guard held across a re-open of the same dialog is stale (its
//!   generation no longer matches) and redeeming it is a no-op.
//! - Redeeming the same guard twice is a no-op the second time.

use tracing::trace;

use crate::id::DialogId;

/// Callback invoked before a close is finalized.
///
/// Receives the continuation capability for this close request. The callback
/// may stash the guard and redeem it later (or never); the engine does not
/// time out the suspension.
pub type BeforeClose = Box<dyn FnMut(CloseGuard)>;

/// Single-use capability that lets a suspended close proceed.
///
/// Carries the dialog id and the open-generation it was minted for; the gate
/// refuses guards from any other generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseGuard {
    dialog: DialogId,
    generation: u64,
}

impl CloseGuard {
    pub(crate) fn new(dialog: DialogId, generation: u64) -> Self {
        Self { dialog, generation }
    }

    /// The dialog this guard belongs to.
    #[inline]
    pub fn dialog_id(&self) -> DialogId {
        self.dialog
    }
}

/// Outcome of presenting a close request to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// No interceptor installed; the close proceeds immediately.
    Proceed,
    /// The interceptor was invoked; the close is suspended until its guard
    /// is redeemed.
    Suspended,
}

/// Holds the optional `before_close` interceptor and the outstanding guard,
/// if any, for one dialog.
#[derive(Default)]
pub struct DismissalGate {
    before_close: Option<BeforeClose>,
    /// Generation of the outstanding (unredeemed) guard.
    pending: Option<u64>,
}

impl std::fmt::Debug for DismissalGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DismissalGate")
            .field("intercepted", &self.before_close.is_some())
            .field("pending", &self.pending)
            .finish()
    }
}

impl DismissalGate {
    /// Create a gate, optionally with an interceptor.
    pub fn new(before_close: Option<BeforeClose>) -> Self {
        Self {
            before_close,
            pending: None,
        }
    }

    /// Whether a close request is currently suspended on this gate.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Present a close request for `(dialog, generation)`.
    ///
    /// With no interceptor installed this returns [`GateDecision::Proceed`].
    /// Otherwise the interceptor is invoked with a freshly minted guard and
    /// the request suspends.
    pub fn request(&mut self, dialog: DialogId, generation: u64) -> GateDecision {
        match self.before_close.as_mut() {
            None => GateDecision::Proceed,
            Some(before_close) => {
                self.pending = Some(generation);
                trace!(dialog = dialog.id(), generation, "close suspended on interceptor");
                before_close(CloseGuard::new(dialog, generation));
                GateDecision::Suspended
            }
        }
    }

    /// Redeem a guard for `(dialog, generation)`.
    ///
    /// Returns `true` exactly once per suspended request, and only for a
    /// guard minted for the current suspension. Stale, duplicate, or foreign
    /// guards return `false` and change nothing.
    pub fn redeem(&mut self, guard: CloseGuard, dialog: DialogId, generation: u64) -> bool {
        if guard.dialog != dialog || guard.generation != generation {
            trace!(dialog = dialog.id(), "stale close guard ignored");
            return false;
        }
        if self.pending != Some(generation) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Discard any outstanding suspension, leaving its guard stale.
    pub fn abandon(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn no_interceptor_proceeds() {
        let mut gate = DismissalGate::new(None);
        let id = DialogId::next();
        assert_eq!(gate.request(id, 1), GateDecision::Proceed);
        assert!(!gate.is_pending());
    }

    #[test]
    fn interceptor_suspends_until_redeemed() {
        let slot: Rc<Cell<Option<CloseGuard>>> = Rc::new(Cell::new(None));
        let captured = Rc::clone(&slot);
        let mut gate = DismissalGate::new(Some(Box::new(move |guard| {
            captured.set(Some(guard));
        })));
        let id = DialogId::next();

        assert_eq!(gate.request(id, 1), GateDecision::Suspended);
        assert!(gate.is_pending());

        let guard = slot.get().unwrap();
        assert_eq!(guard.dialog_id(), id);
        assert!(gate.redeem(guard, id, 1));
        assert!(!gate.is_pending());
    }

    #[test]
    fn double_redeem_is_noop() {
        let slot: Rc<Cell<Option<CloseGuard>>> = Rc::new(Cell::new(None));
        let captured = Rc::clone(&slot);
        let mut gate = DismissalGate::new(Some(Box::new(move |guard| {
            captured.set(Some(guard));
        })));
        let id = DialogId::next();

        gate.request(id, 3);
        let guard = slot.get().unwrap();
        assert!(gate.redeem(guard, id, 3));
        assert!(!gate.redeem(guard, id, 3));
    }

    #[test]
    fn stale_generation_guard_rejected() {
        let slot: Rc<Cell<Option<CloseGuard>>> = Rc::new(Cell::new(None));
        let captured = Rc::clone(&slot);
        let mut gate = DismissalGate::new(Some(Box::new(move |guard| {
            captured.set(Some(guard));
        })));
        let id = DialogId::next();

        gate.request(id, 1);
        let old_guard = slot.get().unwrap();
        gate.abandon();

        // Dialog re-opened; close requested under a new generation.
        gate.request(id, 2);
        assert!(!gate.redeem(old_guard, id, 2));
        assert!(gate.is_pending());
    }

    #[test]
    fn foreign_dialog_guard_rejected() {
        let mut gate = DismissalGate::new(Some(Box::new(|_| {})));
        let id = DialogId::next();
        let other = DialogId::next();

        gate.request(id, 1);
        assert!(!gate.redeem(CloseGuard::new(other, 1), id, 1));
        assert!(gate.is_pending());
    }
}
