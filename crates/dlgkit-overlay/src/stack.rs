#![forbid(unsafe_code)]

//! Stack coordination for nested dialogs: registration order, z-indices, and
//! the topmost dialog.
//!
//! The coordinator is the single process-wide registry of currently-open
//! dialogs. Insertion order is stacking order; only the topmost (last
//! registered, still present) dialog should receive escape/overlay dismissal.
//!
//! # Invariants
//!
//! - An id appears at most once; re-registering an open id returns its
//!   existing z-index without duplicating the entry.
//! - Every fresh assignment is strictly above every earlier assignment for
//!   the life of the process, even when dialogs mix base overrides, so a
//!   later-opened dialog always renders above earlier ones — including
//!   re-opened instances of the same dialog.
//! - `unregister` is idempotent; removing an absent id is a no-op (covers
//!   double-unmount races).
//!
//! # Failure Modes
//!
//! - `topmost()` on an empty registry returns `None` (no panic).
//! - `z_index()` for an unregistered id returns `None`.

use tracing::trace;

use crate::id::DialogId;

/// Base z-index for the overlay layer.
pub const BASE_OVERLAY_Z: u32 = 2000;

/// Z-index increment between dialogs (leaves room for internal layers such
/// as the overlay backdrop beneath each dialog body).
pub const Z_INCREMENT: u32 = 10;

/// Lightweight projection of an open dialog held in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackEntry {
    /// The dialog's id.
    pub id: DialogId,
    /// The z-index assigned at registration.
    pub z_index: u32,
    /// Whether the dialog is modal (dims content behind it).
    pub modal: bool,
}

/// Ordered registry of open dialogs.
///
/// One instance per application; mutation happens only through
/// [`register`](Self::register) and [`unregister`](Self::unregister).
#[derive(Debug, Default)]
pub struct StackCoordinator {
    /// Entries in stacking order (bottom to top).
    entries: Vec<StackEntry>,
    /// Lowest z-index available to the next fresh assignment; never reset.
    next_z: u32,
}

impl StackCoordinator {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an open dialog and assign its z-index.
    ///
    /// `base` overrides [`BASE_OVERLAY_Z`] as a floor for this dialog; the
    /// assignment is never below any earlier one, so ordering holds across
    /// mixed bases. Registering an id that is already present returns the
    /// existing z-index unchanged.
    pub fn register(&mut self, id: DialogId, modal: bool, base: Option<u32>) -> u32 {
        if let Some(entry) = self.entries.iter().find(|e| e.id == id) {
            return entry.z_index;
        }

        let z_index = self.next_z.max(base.unwrap_or(BASE_OVERLAY_Z));
        self.next_z = z_index + Z_INCREMENT;
        self.entries.push(StackEntry { id, z_index, modal });
        trace!(dialog = id.id(), z_index, depth = self.entries.len(), "dialog registered");
        z_index
    }

    /// Remove a dialog from the registry. No-op if the id is not present.
    pub fn unregister(&mut self, id: DialogId) {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() != before {
            trace!(dialog = id.id(), depth = self.entries.len(), "dialog unregistered");
        }
    }

    /// The last-registered id among currently-registered entries.
    pub fn topmost(&self) -> Option<DialogId> {
        self.entries.last().map(|e| e.id)
    }

    /// The z-index assigned to `id`, if it is registered.
    pub fn z_index(&self, id: DialogId) -> Option<u32> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.z_index)
    }

    /// Whether `id` is currently registered.
    pub fn contains(&self, id: DialogId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of currently-open dialogs.
    #[inline]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Whether no dialogs are open.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The registered entries in stacking order (bottom to top).
    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }
}
