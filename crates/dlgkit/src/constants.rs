#![forbid(unsafe_code)]

//! Shared literal keys for the dialog component.

/// Key under which a dialog's [`DialogStateView`](crate::DialogStateView) is
/// provided to nested presentation elements through a
/// [`ContextMap`](dlgkit_utils::ContextMap).
pub const DIALOG_CONTEXT_KEY: &str = "dlgkit.dialog";

/// Conventional registration name of the dialog component.
pub const DIALOG_COMPONENT_NAME: &str = "DlgDialog";

pub use dlgkit_overlay::{BASE_OVERLAY_Z, Z_INCREMENT};
