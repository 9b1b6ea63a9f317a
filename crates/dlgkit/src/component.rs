#![forbid(unsafe_code)]

//! The dialog component wrapper applications install and mount.

use dlgkit_overlay::{DialogController, DialogOptions};
use dlgkit_utils::{Component, WithInstall, with_install};

use crate::constants::DIALOG_COMPONENT_NAME;

/// The dialog component: configuration waiting to be mounted.
///
/// Mounting produces the [`DialogController`] a dialog instance consumes;
/// the component itself is what gets registered with a host application via
/// [`installable`](Self::installable).
#[derive(Debug, Default)]
pub struct Dialog {
    options: DialogOptions,
}

impl Dialog {
    /// Create a dialog component with default options.
    pub fn new() -> Self {
        Self {
            options: DialogOptions::new(),
        }
    }

    /// Create a dialog component from prepared options.
    pub fn with_options(options: DialogOptions) -> Self {
        Self { options }
    }

    /// The configured options.
    pub fn options(&self) -> &DialogOptions {
        &self.options
    }

    /// Wrap this component with the install capability
    /// (the `with_install(Dialog)` of the export surface).
    pub fn installable(self) -> WithInstall<Self> {
        with_install(self)
    }

    /// Mount the component, producing the controller for one dialog
    /// instance.
    pub fn mount(self) -> DialogController {
        DialogController::new(self.options)
    }
}

impl Component for Dialog {
    fn component_name(&self) -> &'static str {
        DIALOG_COMPONENT_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlgkit_utils::ComponentRegistry;

    #[test]
    fn installs_under_conventional_name_once() {
        let mut registry = ComponentRegistry::new();
        let dialog = Dialog::new().installable();

        assert!(dialog.install(&mut registry));
        assert!(registry.is_installed(DIALOG_COMPONENT_NAME));
        assert!(!dialog.install(&mut registry));
    }

    #[test]
    fn mount_produces_controller_with_options() {
        let dialog = Dialog::with_options(DialogOptions::new().title("About"));
        let controller = dialog.mount();
        assert_eq!(controller.title(), Some("About"));
        assert!(!controller.visible());
    }
}
