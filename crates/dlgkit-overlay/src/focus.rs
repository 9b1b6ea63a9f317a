#![forbid(unsafe_code)]

//! Focus capture, trapping, and restoration across dialog open/close.
//!
//! The engine is headless, so focus is modeled over opaque [`FocusId`] nodes
//! the host reports as live (`insert_node`/`remove_node` mirror mount and
//! unmount in the presentation tree). "No focused node" means focus rests on
//! the document body.
//!
//! Opening a dialog captures a [`FocusSnapshot`] of the prior focus, moves
//! focus to the dialog's first focusable content node (or its container when
//! it has none), and pushes a trap. Only the topmost trap is active: focus
//! changes that would escape it are redirected back inside, and tab cycling
//! wraps around its members. Covered dialogs' traps lie dormant until they
//! become topmost again.
//!
//! # Invariants
//!
//! - A snapshot is captured per open and consumed exactly once by the
//!   matching release; re-capture for the same dialog discards the stale
//!   snapshot (an open racing a close wins).
//! - Restoring to a node that no longer exists falls back to the body.
//!
//! # Failure Modes
//!
//! - `release` for a dialog with no trap is a no-op.
//! - `focus` on a dead node is a no-op.
//! - `focus_next`/`focus_prev` without an active trap are no-ops; there is no
//!   global tab order to cycle.

use ahash::AHashSet;
use tracing::trace;

use crate::id::{DialogId, FocusId};

/// The focus captured when a dialog opened; `None` means the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusSnapshot {
    previous: Option<FocusId>,
}

impl FocusSnapshot {
    /// The previously focused node, if any.
    #[inline]
    pub fn previous(&self) -> Option<FocusId> {
        self.previous
    }
}

/// An installed focus trap for one open dialog.
#[derive(Debug, Clone)]
struct FocusTrap {
    dialog: DialogId,
    container: FocusId,
    contents: Vec<FocusId>,
    snapshot: FocusSnapshot,
}

impl FocusTrap {
    fn admits(&self, id: FocusId) -> bool {
        id == self.container || self.contents.contains(&id)
    }
}

/// Process-wide focus state: live nodes, the focused node, and the trap
/// stack. One instance per application.
#[derive(Debug, Default)]
pub struct FocusManager {
    nodes: AHashSet<FocusId>,
    /// Focused node; `None` is the document body.
    current: Option<FocusId>,
    /// Traps in dialog stacking order (bottom to top); only the last is
    /// active.
    traps: Vec<FocusTrap>,
}

impl FocusManager {
    /// Create a manager with no nodes and body focus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a focusable node as live.
    pub fn insert_node(&mut self, id: FocusId) {
        self.nodes.insert(id);
    }

    /// Report a node as removed from the host tree.
    ///
    /// If it was focused, focus falls back to the body.
    pub fn remove_node(&mut self, id: FocusId) {
        self.nodes.remove(&id);
        if self.current == Some(id) {
            self.current = None;
        }
    }

    /// Whether `id` is currently live.
    pub fn is_live(&self, id: FocusId) -> bool {
        self.nodes.contains(&id)
    }

    /// The focused node; `None` means the body.
    #[inline]
    pub fn current(&self) -> Option<FocusId> {
        self.current
    }

    /// Focus a node.
    ///
    /// Dead nodes are ignored. While a trap is active, a target outside it is
    /// a focus-out and gets redirected to the trap's first focusable member.
    pub fn focus(&mut self, id: FocusId) {
        if !self.nodes.contains(&id) {
            return;
        }
        if let Some(trap) = self.traps.last()
            && !trap.admits(id)
        {
            let fallback = self.initial_target(self.traps.len() - 1);
            trace!(denied = id.id(), redirected = fallback.id(), "focus redirected into trap");
            self.current = Some(fallback);
            return;
        }
        self.current = Some(id);
    }

    /// Capture the current focus for `dialog`, focus its initial target, and
    /// push its trap.
    ///
    /// An existing trap for the same dialog is replaced and its stale
    /// snapshot discarded; the fresh capture wins.
    pub fn capture_and_trap(&mut self, dialog: DialogId, container: FocusId, contents: Vec<FocusId>) {
        self.traps.retain(|t| t.dialog != dialog);
        self.nodes.insert(container);

        let snapshot = FocusSnapshot {
            previous: self.current,
        };
        self.traps.push(FocusTrap {
            dialog,
            container,
            contents,
            snapshot,
        });

        let target = self.initial_target(self.traps.len() - 1);
        self.current = Some(target);
        trace!(dialog = dialog.id(), focused = target.id(), "focus captured and trapped");
    }

    /// Pop `dialog`'s trap and, when it was the active one, restore focus to
    /// its snapshot — or the body if that node is gone.
    pub fn release(&mut self, dialog: DialogId) {
        let Some(idx) = self.traps.iter().position(|t| t.dialog == dialog) else {
            return;
        };
        let was_top = idx + 1 == self.traps.len();
        let trap = self.traps.remove(idx);

        if was_top {
            self.current = trap.snapshot.previous().filter(|id| self.nodes.contains(id));
            trace!(dialog = dialog.id(), restored = ?self.current, "focus released");
        }
    }

    /// Advance focus within the active trap, wrapping past the last member.
    pub fn focus_next(&mut self) {
        self.cycle(true);
    }

    /// Move focus backwards within the active trap, wrapping past the first
    /// member.
    pub fn focus_prev(&mut self) {
        self.cycle(false);
    }

    /// Whether any trap is active.
    pub fn is_trapped(&self) -> bool {
        !self.traps.is_empty()
    }

    /// The dialog owning the active trap.
    pub fn trap_owner(&self) -> Option<DialogId> {
        self.traps.last().map(|t| t.dialog)
    }

    /// Number of installed traps (active plus dormant).
    pub fn trap_depth(&self) -> usize {
        self.traps.len()
    }

    /// First focusable content node of the trap at `idx`, or its container.
    fn initial_target(&self, idx: usize) -> FocusId {
        let trap = &self.traps[idx];
        trap.contents
            .iter()
            .copied()
            .find(|id| self.nodes.contains(id))
            .unwrap_or(trap.container)
    }

    fn cycle(&mut self, forward: bool) {
        let Some(trap) = self.traps.last() else {
            return;
        };
        let members: Vec<FocusId> = trap
            .contents
            .iter()
            .copied()
            .filter(|id| self.nodes.contains(id))
            .collect();
        if members.is_empty() {
            self.current = Some(trap.container);
            return;
        }

        let next = match self.current.and_then(|c| members.iter().position(|&m| m == c)) {
            Some(pos) if forward => members[(pos + 1) % members.len()],
            Some(pos) => members[(pos + members.len() - 1) % members.len()],
            // Entering from the container (or from outside): wrap to an end.
            None if forward => members[0],
            None => members[members.len() - 1],
        };
        self.current = Some(next);
    }
}
