#![forbid(unsafe_code)]

//! Per-dialog configuration.

use crate::interceptor::BeforeClose;

/// Dialog configuration consumed by
/// [`DialogController`](crate::controller::DialogController).
pub struct DialogOptions {
    /// Optional dialog title, surfaced to the presentation layer.
    pub title: Option<String>,
    /// Whether the dialog dims and blocks the content behind it.
    pub modal: bool,
    /// Whether the host should mount the dialog at the document/root level
    /// instead of in place.
    pub append_to_body: bool,
    /// Whether clicking the overlay itself requests a close.
    pub close_on_click_overlay: bool,
    /// Whether pressing escape requests a close.
    pub close_on_press_escape: bool,
    /// Whether opening this dialog acquires the shared scroll lock.
    pub lock_scroll: bool,
    /// Override for the stack's base z-index.
    pub z_index_base: Option<u32>,
    /// Interceptor consulted before any close is finalized.
    pub before_close: Option<BeforeClose>,
}

impl std::fmt::Debug for DialogOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogOptions")
            .field("title", &self.title)
            .field("modal", &self.modal)
            .field("append_to_body", &self.append_to_body)
            .field("close_on_click_overlay", &self.close_on_click_overlay)
            .field("close_on_press_escape", &self.close_on_press_escape)
            .field("lock_scroll", &self.lock_scroll)
            .field("z_index_base", &self.z_index_base)
            .field("before_close", &self.before_close.is_some())
            .finish()
    }
}

impl Default for DialogOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogOptions {
    /// Create options with the conventional defaults: modal, escape and
    /// overlay-click close enabled, scroll locking on.
    pub fn new() -> Self {
        Self {
            title: None,
            modal: true,
            append_to_body: false,
            close_on_click_overlay: true,
            close_on_press_escape: true,
            lock_scroll: true,
            z_index_base: None,
            before_close: None,
        }
    }

    /// Set the dialog title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set whether the dialog is modal.
    pub fn modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    /// Set whether the dialog mounts at the document root.
    pub fn append_to_body(mut self, append: bool) -> Self {
        self.append_to_body = append;
        self
    }

    /// Set whether clicking the overlay requests a close.
    pub fn close_on_click_overlay(mut self, close: bool) -> Self {
        self.close_on_click_overlay = close;
        self
    }

    /// Set whether escape requests a close.
    pub fn close_on_press_escape(mut self, close: bool) -> Self {
        self.close_on_press_escape = close;
        self
    }

    /// Set whether opening acquires the scroll lock.
    pub fn lock_scroll(mut self, lock: bool) -> Self {
        self.lock_scroll = lock;
        self
    }

    /// Override the base z-index for this dialog.
    pub fn z_index_base(mut self, base: u32) -> Self {
        self.z_index_base = Some(base);
        self
    }

    /// Install a `before_close` interceptor.
    pub fn before_close(mut self, before_close: BeforeClose) -> Self {
        self.before_close = Some(before_close);
        self
    }
}
