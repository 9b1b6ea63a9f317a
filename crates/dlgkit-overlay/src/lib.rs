#![forbid(unsafe_code)]

//! Headless dialog lifecycle engine.
//!
//! This crate owns the hard part of a dialog component: the interaction state
//! machine that keeps visibility, nesting, focus, and scroll locking coherent
//! when several dialogs are open at once. It renders nothing. A presentation
//! layer drives it with discrete events (clicks, key presses, programmatic
//! calls) and reads back a small state surface per dialog.
//!
//! # Architecture
//!
//! - [`VisibilityController`]: per-dialog phase machine
//!   (`Closed → Opening → Open → Closing`), idempotent on repeated requests.
//! - [`DismissalGate`]: optional `before_close` interception; a close suspends
//!   until its [`CloseGuard`] is redeemed.
//! - [`StackCoordinator`]: ordered registry of open dialogs with monotonically
//!   increasing z-indices and a single topmost dialog.
//! - [`FocusManager`]: focus capture, trap (topmost dialog only), and restore
//!   with body fallback.
//! - [`ScrollLock`]: reference-counted lock on the underlying scroll target.
//! - [`DialogController`]: the composition root a dialog instance consumes,
//!   wired through a shared [`OverlayContext`].
//!
//! # Execution model
//!
//! Single-threaded, run-to-completion: every operation finishes before the
//! next event is processed. The one deliberate suspension is an intercepted
//! close, which parks until [`DialogController::resolve_close`] is called.
//!
//! # Failure Modes
//!
//! None of the entry points panic or return errors. Stale ids, double
//! transitions, and unredeemed close guards are all absorbed as no-ops; the
//! observable consequence (e.g. a dialog that stays open) is the defined
//! behavior, not a fault.

pub mod controller;
pub mod event;
pub mod focus;
pub mod id;
pub mod interceptor;
pub mod options;
pub mod scroll_lock;
pub mod stack;
pub mod visibility;

pub use controller::{ClickTarget, DialogController, OverlayContext};
pub use event::DialogEvent;
pub use focus::{FocusManager, FocusSnapshot};
pub use id::{DialogId, FocusId};
pub use interceptor::{BeforeClose, CloseGuard, DismissalGate, GateDecision};
pub use options::DialogOptions;
pub use scroll_lock::{ScrollLock, ScrollLockObserver};
pub use stack::{BASE_OVERLAY_Z, StackCoordinator, StackEntry, Z_INCREMENT};
pub use visibility::{Visibility, VisibilityController};
