#![forbid(unsafe_code)]

//! Lifecycle notifications emitted by a dialog controller.
//!
//! Events accumulate in a per-dialog FIFO queue and are drained by the
//! consumer (typically once per host event-loop turn) via
//! [`DialogController::take_events`](crate::controller::DialogController::take_events).
//! Observers use them to hook animations or side effects onto transitions.

/// A lifecycle notification for one dialog instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    /// An open was admitted; the dialog is entering its opening phase.
    OpenRequested,
    /// The open transition completed; the dialog is fully open.
    Opened,
    /// A close was requested. If a `before_close` interceptor is installed,
    /// the close may suspend after this event and never progress further.
    CloseRequested,
    /// The close transition completed; the dialog is fully closed.
    Closed,
    /// Bindable mirror of `visible`, updated on every confirmed transition:
    /// `true` when an open is admitted, `false` when a close completes.
    VisibleChanged(bool),
}

impl DialogEvent {
    /// Whether this event marks the end of a transition (open or close).
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Opened | Self::Closed)
    }
}
