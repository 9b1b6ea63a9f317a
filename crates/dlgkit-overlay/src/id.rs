#![forbid(unsafe_code)]

//! Process-unique identifiers for dialogs and focusable nodes.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for unique dialog IDs.
static DIALOG_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Global counter for unique focus node IDs.
static FOCUS_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a dialog instance.
///
/// Ids are never reused within a process, so a stale id held after a dialog
/// is destroyed can only ever miss lookups (a no-op), never alias a newer
/// dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogId(u64);

impl DialogId {
    /// Allocate a new unique dialog ID.
    pub fn next() -> Self {
        Self(DIALOG_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Handle to a focusable node in the host presentation tree.
///
/// The engine never dereferences these; it only compares them and tracks
/// which ones the host has reported as live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusId(u64);

impl FocusId {
    /// Allocate a new unique focus node ID.
    pub fn next() -> Self {
        Self(FOCUS_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}
