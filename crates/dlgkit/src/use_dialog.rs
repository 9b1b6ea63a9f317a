#![forbid(unsafe_code)]

//! Hook-style entry point and the state view handed down the tree.

use dlgkit_overlay::{DialogController, DialogId, DialogOptions, OverlayContext, Visibility};
use dlgkit_utils::ContextMap;

use crate::constants::DIALOG_CONTEXT_KEY;

/// Create the lifecycle controller for one dialog instance.
///
/// The composition root a dialog's presentation layer builds on: drive it
/// with `request_open`/`request_close`/`on_escape_press`/`on_overlay_click`
/// and read back [`DialogStateView`] snapshots for rendering.
pub fn use_dialog(options: DialogOptions) -> DialogController {
    DialogController::new(options)
}

/// Immutable snapshot of a dialog's state for the presentation layer.
///
/// Captured per render; nested elements receive it explicitly (or through a
/// [`ContextMap`] under [`DIALOG_CONTEXT_KEY`]) rather than by ambient
/// lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogStateView {
    /// The dialog's id.
    pub id: DialogId,
    /// Whether the dialog occupies the screen.
    pub visible: bool,
    /// Current visibility phase.
    pub phase: Visibility,
    /// Assigned z-index while open.
    pub z_index: Option<u32>,
    /// Whether this dialog is the topmost open dialog.
    pub topmost: bool,
    /// Configured title, if any.
    pub title: Option<String>,
}

impl DialogStateView {
    /// Capture a snapshot of `dialog` against the shared context.
    pub fn capture(dialog: &DialogController, ctx: &OverlayContext) -> Self {
        Self {
            id: dialog.id(),
            visible: dialog.visible(),
            phase: dialog.phase(),
            z_index: dialog.z_index(),
            topmost: dialog.is_topmost(ctx),
            title: dialog.title().map(str::to_owned),
        }
    }
}

/// Provide a dialog's state view to descendants under the shared key.
pub fn provide_dialog_state(context: &mut ContextMap, view: DialogStateView) {
    context.provide(DIALOG_CONTEXT_KEY, view);
}

/// Consume the dialog state view a parent provided, if any.
pub fn consume_dialog_state(context: &ContextMap) -> Option<&DialogStateView> {
    context.consume::<DialogStateView>(DIALOG_CONTEXT_KEY)
}
