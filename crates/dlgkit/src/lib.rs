#![forbid(unsafe_code)]

//! Public surface of the dlgkit dialog component.
//!
//! This crate is the barrel that wires the pieces together for applications:
//! the [`Dialog`] component (installable into a host
//! [`ComponentRegistry`](dlgkit_utils::ComponentRegistry)), the
//! [`use_dialog`] hook returning the lifecycle controller, and the shared
//! [`constants`]. The engine itself lives in `dlgkit-overlay`.
//!
//! # Example
//!
//! ```
//! use dlgkit::prelude::*;
//!
//! let mut registry = ComponentRegistry::new();
//! Dialog::new().installable().install(&mut registry);
//!
//! let mut ctx = OverlayContext::new();
//! let mut dialog = use_dialog(DialogOptions::new().title("Settings"));
//! dialog.request_open(&mut ctx);
//! assert!(dialog.visible());
//!
//! dialog.on_escape_press(&mut ctx);
//! assert!(!dialog.visible());
//! ```

pub mod component;
pub mod constants;
pub mod use_dialog;

pub use component::Dialog;
pub use use_dialog::{DialogStateView, consume_dialog_state, provide_dialog_state, use_dialog};

pub use dlgkit_overlay::{
    BeforeClose, ClickTarget, CloseGuard, DialogController, DialogEvent, DialogId, DialogOptions,
    FocusId, FocusManager, OverlayContext, ScrollLockObserver, Visibility,
};
pub use dlgkit_utils::{Component, ComponentRegistry, ContextMap, WithInstall, with_install};

/// Everything an application typically needs.
pub mod prelude {
    pub use crate::component::Dialog;
    pub use crate::constants::{DIALOG_COMPONENT_NAME, DIALOG_CONTEXT_KEY};
    pub use crate::use_dialog::{DialogStateView, use_dialog};
    pub use dlgkit_overlay::{
        ClickTarget, DialogController, DialogEvent, DialogId, DialogOptions, FocusId,
        OverlayContext, Visibility,
    };
    pub use dlgkit_utils::{Component, ComponentRegistry, ContextMap};
}
