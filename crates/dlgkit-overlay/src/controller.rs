#![forbid(unsafe_code)]

//! The composition root: per-dialog controllers over shared overlay services.
//!
//! [`OverlayContext`] owns the process-wide pieces — stack coordinator, focus
//! manager, scroll lock — as a single explicitly-constructed instance per
//! application. [`DialogController`] wires one dialog's visibility machine,
//! dismissal gate, and options to those services and is the sole integration
//! point the surrounding presentation layer depends on.
//!
//! Opening runs visibility → stack registration → focus capture → scroll
//! acquisition; closing reverses the order, gated by the dismissal
//! interceptor. Both run to completion within one call; the only suspension
//! is an intercepted close, which parks until [`DialogController::resolve_close`].
//!
//! # Invariants
//!
//! - Stack and scroll-lock state mutate only through controller transitions;
//!   the context exposes them read-only.
//! - A dialog holds at most one stack entry, one focus trap, and one scroll
//!   reference, all dropped exactly when its close completes.
//! - Escape and overlay clicks only ever close the topmost dialog, and only
//!   through the same gated close path as programmatic requests.

use tracing::{debug, trace};

use crate::event::DialogEvent;
use crate::focus::FocusManager;
use crate::id::{DialogId, FocusId};
use crate::interceptor::{CloseGuard, DismissalGate, GateDecision};
use crate::options::DialogOptions;
use crate::scroll_lock::{ScrollLock, ScrollLockObserver};
use crate::stack::{StackCoordinator, StackEntry};
use crate::visibility::{Visibility, VisibilityController};

/// What an overlay-layer click actually hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The overlay backdrop itself.
    Overlay,
    /// A descendant of the overlay (the dialog body or its children).
    Content,
}

/// Shared overlay services: one owned instance per application.
///
/// Starts empty (no open dialogs, zero scroll references, body focus) and has
/// no teardown beyond being dropped at process exit.
#[derive(Debug, Default)]
pub struct OverlayContext {
    stack: StackCoordinator,
    focus: FocusManager,
    scroll: ScrollLock,
}

impl OverlayContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// The topmost open dialog, if any.
    pub fn topmost(&self) -> Option<DialogId> {
        self.stack.topmost()
    }

    /// Number of currently-open dialogs.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Whether `id` is currently open (registered on the stack).
    pub fn contains(&self, id: DialogId) -> bool {
        self.stack.contains(id)
    }

    /// Open dialogs in stacking order (bottom to top).
    pub fn entries(&self) -> &[StackEntry] {
        self.stack.entries()
    }

    /// Read access to the focus model.
    pub fn focus(&self) -> &FocusManager {
        &self.focus
    }

    /// Mutable access to the focus model, for the host to mirror its
    /// presentation tree (`insert_node`/`remove_node`) and drive tab cycling.
    pub fn focus_mut(&mut self) -> &mut FocusManager {
        &mut self.focus
    }

    /// Whether the scroll lock is currently engaged.
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll.is_locked()
    }

    /// Current scroll-lock reference count.
    pub fn scroll_lock_count(&self) -> u32 {
        self.scroll.lock_count()
    }

    /// Install the observer notified on scroll-lock engage/disengage edges.
    pub fn set_scroll_observer(&mut self, observer: ScrollLockObserver) {
        self.scroll.set_observer(observer);
    }
}

/// Lifecycle controller for one dialog instance.
///
/// Created when the dialog component mounts; owns the dialog's state
/// exclusively. The shared [`OverlayContext`] holds only the non-owning stack
/// entry while the dialog is open.
pub struct DialogController {
    id: DialogId,
    options: DialogOptions,
    visibility: VisibilityController,
    gate: DismissalGate,
    /// Bumped on every admitted open; stale close guards carry an older one.
    generation: u64,
    z_index: Option<u32>,
    /// Focus node standing in for the dialog's root container.
    focus_container: FocusId,
    /// Focusable descendants, in tab order, as declared by the host.
    focus_contents: Vec<FocusId>,
    /// Whether this dialog currently holds a scroll-lock reference.
    scroll_held: bool,
    events: Vec<DialogEvent>,
}

impl std::fmt::Debug for DialogController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogController")
            .field("id", &self.id)
            .field("phase", &self.visibility.phase())
            .field("z_index", &self.z_index)
            .field("close_pending", &self.gate.is_pending())
            .finish()
    }
}

impl DialogController {
    /// Create a controller for a freshly mounted dialog.
    pub fn new(mut options: DialogOptions) -> Self {
        let gate = DismissalGate::new(options.before_close.take());
        Self {
            id: DialogId::next(),
            options,
            visibility: VisibilityController::new(),
            gate,
            generation: 0,
            z_index: None,
            focus_container: FocusId::next(),
            focus_contents: Vec::new(),
            scroll_held: false,
            events: Vec::new(),
        }
    }

    /// This dialog's id.
    #[inline]
    pub fn id(&self) -> DialogId {
        self.id
    }

    /// The dialog title, if configured.
    pub fn title(&self) -> Option<&str> {
        self.options.title.as_deref()
    }

    /// The configuration this controller was built with (minus the
    /// `before_close` interceptor, which the gate owns).
    pub fn options(&self) -> &DialogOptions {
        &self.options
    }

    /// The focus node standing in for the dialog's root container.
    #[inline]
    pub fn focus_container(&self) -> FocusId {
        self.focus_container
    }

    /// Declare the dialog's focusable descendants in tab order.
    ///
    /// Takes effect on the next open; the first live node listed receives
    /// initial focus.
    pub fn set_focus_contents(&mut self, contents: Vec<FocusId>) {
        self.focus_contents = contents;
    }

    /// Current visibility phase.
    #[inline]
    pub fn phase(&self) -> Visibility {
        self.visibility.phase()
    }

    /// Whether the dialog occupies the screen.
    #[inline]
    pub fn visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// The z-index assigned for the current open, if open.
    #[inline]
    pub fn z_index(&self) -> Option<u32> {
        self.z_index
    }

    /// Whether this dialog is the topmost open dialog.
    pub fn is_topmost(&self, ctx: &OverlayContext) -> bool {
        ctx.stack.topmost() == Some(self.id)
    }

    /// Whether a close request is suspended on the interceptor.
    pub fn is_close_pending(&self) -> bool {
        self.gate.is_pending()
    }

    /// Drain the lifecycle events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<DialogEvent> {
        std::mem::take(&mut self.events)
    }

    /// Open the dialog.
    ///
    /// No-op unless the dialog is closed. Registers on the stack, captures
    /// and traps focus, and acquires the scroll lock, emitting
    /// `OpenRequested`, the `VisibleChanged(true)` mirror, and `Opened`.
    pub fn request_open(&mut self, ctx: &mut OverlayContext) {
        if !self.visibility.begin_open() {
            trace!(dialog = self.id.id(), "open request coalesced");
            return;
        }
        self.generation += 1;
        // A close left suspended in a previous life can never resume now.
        self.gate.abandon();

        self.push(DialogEvent::OpenRequested);
        self.push(DialogEvent::VisibleChanged(true));

        let z = ctx
            .stack
            .register(self.id, self.options.modal, self.options.z_index_base);
        self.z_index = Some(z);

        ctx.focus
            .capture_and_trap(self.id, self.focus_container, self.focus_contents.clone());

        if self.options.lock_scroll {
            ctx.scroll.acquire();
            self.scroll_held = true;
        }

        self.visibility.finish_open();
        self.push(DialogEvent::Opened);
        debug!(dialog = self.id.id(), z_index = z, "dialog opened");
    }

    /// Request a close.
    ///
    /// No-op unless the dialog is open with no close already suspended.
    /// Emits `CloseRequested`, then either completes the close or suspends
    /// it on the `before_close` interceptor.
    pub fn request_close(&mut self, ctx: &mut OverlayContext) {
        if self.visibility.phase() != Visibility::Open {
            trace!(dialog = self.id.id(), "close request coalesced");
            return;
        }
        if self.gate.is_pending() {
            trace!(dialog = self.id.id(), "close already suspended");
            return;
        }

        self.push(DialogEvent::CloseRequested);
        match self.gate.request(self.id, self.generation) {
            GateDecision::Proceed => self.finalize_close(ctx),
            GateDecision::Suspended => {}
        }
    }

    /// Redeem a [`CloseGuard`] handed to the `before_close` interceptor,
    /// letting the suspended close proceed. Stale or duplicate guards are
    /// no-ops.
    pub fn resolve_close(&mut self, ctx: &mut OverlayContext, guard: CloseGuard) {
        if !self.gate.redeem(guard, self.id, self.generation) {
            return;
        }
        self.finalize_close(ctx);
    }

    /// Escape-key dismissal: closes only if enabled for this dialog and it
    /// is topmost, and always through the gated close path.
    pub fn on_escape_press(&mut self, ctx: &mut OverlayContext) {
        if !self.options.close_on_press_escape {
            return;
        }
        if !self.is_topmost(ctx) {
            trace!(dialog = self.id.id(), "escape ignored, not topmost");
            return;
        }
        self.request_close(ctx);
    }

    /// Overlay-click dismissal: closes only if enabled, the click hit the
    /// overlay itself rather than a descendant, and this dialog is topmost.
    pub fn on_overlay_click(&mut self, ctx: &mut OverlayContext, target: ClickTarget) {
        if !self.options.close_on_click_overlay {
            return;
        }
        if target != ClickTarget::Overlay {
            return;
        }
        if !self.is_topmost(ctx) {
            trace!(dialog = self.id.id(), "overlay click ignored, not topmost");
            return;
        }
        self.request_close(ctx);
    }

    /// Unmount path: abandon any suspended close and, if the dialog is still
    /// visible, finish closing without consulting the interceptor so the
    /// shared registries never leak an entry for a dead dialog.
    pub fn teardown(&mut self, ctx: &mut OverlayContext) {
        self.gate.abandon();
        if self.visibility.phase() == Visibility::Open {
            self.finalize_close(ctx);
        }
    }

    /// `Open → Closing → Closed`, releasing shared resources in the reverse
    /// of acquisition order.
    fn finalize_close(&mut self, ctx: &mut OverlayContext) {
        if !self.visibility.begin_close() {
            return;
        }

        if self.scroll_held {
            ctx.scroll.release();
            self.scroll_held = false;
        }

        ctx.focus.release(self.id);
        ctx.focus.remove_node(self.focus_container);

        ctx.stack.unregister(self.id);
        self.z_index = None;

        self.visibility.finish_close();
        self.push(DialogEvent::Closed);
        self.push(DialogEvent::VisibleChanged(false));
        debug!(dialog = self.id.id(), "dialog closed");
    }

    fn push(&mut self, event: DialogEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn open_dialog(ctx: &mut OverlayContext) -> DialogController {
        let mut dialog = DialogController::new(DialogOptions::new());
        dialog.request_open(ctx);
        dialog
    }

    #[test]
    fn open_emits_lifecycle_events_in_order() {
        let mut ctx = OverlayContext::new();
        let mut dialog = DialogController::new(DialogOptions::new());

        dialog.request_open(&mut ctx);
        assert_eq!(
            dialog.take_events(),
            vec![
                DialogEvent::OpenRequested,
                DialogEvent::VisibleChanged(true),
                DialogEvent::Opened,
            ]
        );
        assert!(dialog.visible());
        assert_eq!(dialog.phase(), Visibility::Open);
    }

    #[test]
    fn close_emits_lifecycle_events_in_order() {
        let mut ctx = OverlayContext::new();
        let mut dialog = open_dialog(&mut ctx);
        dialog.take_events();

        dialog.request_close(&mut ctx);
        assert_eq!(
            dialog.take_events(),
            vec![
                DialogEvent::CloseRequested,
                DialogEvent::Closed,
                DialogEvent::VisibleChanged(false),
            ]
        );
        assert!(!dialog.visible());
        assert_eq!(dialog.phase(), Visibility::Closed);
    }

    #[test]
    fn double_open_and_double_close_are_noops() {
        let mut ctx = OverlayContext::new();
        let mut dialog = open_dialog(&mut ctx);
        dialog.take_events();

        dialog.request_open(&mut ctx);
        assert!(dialog.take_events().is_empty());
        assert_eq!(ctx.depth(), 1);

        dialog.request_close(&mut ctx);
        dialog.take_events();
        dialog.request_close(&mut ctx);
        assert!(dialog.take_events().is_empty());
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn stacking_order_and_topmost() {
        let mut ctx = OverlayContext::new();
        let mut a = open_dialog(&mut ctx);
        let mut b = open_dialog(&mut ctx);
        let mut c = open_dialog(&mut ctx);

        assert_eq!(ctx.topmost(), Some(c.id()));
        assert!(c.is_topmost(&ctx));
        assert!(!a.is_topmost(&ctx));

        c.request_close(&mut ctx);
        assert_eq!(ctx.topmost(), Some(b.id()));

        b.request_close(&mut ctx);
        a.request_close(&mut ctx);
        assert!(ctx.topmost().is_none());
    }

    #[test]
    fn z_index_monotone_across_reopen() {
        let mut ctx = OverlayContext::new();
        let mut a = DialogController::new(DialogOptions::new());
        let mut b = DialogController::new(DialogOptions::new());

        a.request_open(&mut ctx);
        let za1 = a.z_index().unwrap();
        b.request_open(&mut ctx);
        let zb = b.z_index().unwrap();
        assert!(zb > za1);

        a.request_close(&mut ctx);
        a.request_open(&mut ctx);
        let za2 = a.z_index().unwrap();
        assert!(za2 > zb);
        assert_eq!(ctx.topmost(), Some(a.id()));
    }

    #[test]
    fn scroll_lock_reference_counting() {
        let mut ctx = OverlayContext::new();
        let mut a = open_dialog(&mut ctx);
        let mut b = open_dialog(&mut ctx);
        assert!(ctx.is_scroll_locked());
        assert_eq!(ctx.scroll_lock_count(), 2);

        b.request_close(&mut ctx);
        assert!(ctx.is_scroll_locked());

        a.request_close(&mut ctx);
        assert!(!ctx.is_scroll_locked());
    }

    #[test]
    fn lock_scroll_disabled_skips_acquisition() {
        let mut ctx = OverlayContext::new();
        let mut dialog = DialogController::new(DialogOptions::new().lock_scroll(false));
        dialog.request_open(&mut ctx);
        assert!(!ctx.is_scroll_locked());
        dialog.request_close(&mut ctx);
        assert_eq!(ctx.scroll_lock_count(), 0);
    }

    #[test]
    fn focus_captured_and_restored() {
        let mut ctx = OverlayContext::new();
        let trigger = FocusId::next();
        ctx.focus_mut().insert_node(trigger);
        ctx.focus_mut().focus(trigger);

        let field = FocusId::next();
        ctx.focus_mut().insert_node(field);
        let mut dialog = DialogController::new(DialogOptions::new());
        dialog.set_focus_contents(vec![field]);

        dialog.request_open(&mut ctx);
        assert_eq!(ctx.focus().current(), Some(field));
        assert_eq!(ctx.focus().trap_owner(), Some(dialog.id()));

        dialog.request_close(&mut ctx);
        assert_eq!(ctx.focus().current(), Some(trigger));
        assert!(!ctx.focus().is_trapped());
    }

    #[test]
    fn escape_on_non_topmost_emits_nothing() {
        let mut ctx = OverlayContext::new();
        let mut bottom = open_dialog(&mut ctx);
        let _top = open_dialog(&mut ctx);
        bottom.take_events();

        bottom.on_escape_press(&mut ctx);
        assert!(bottom.take_events().is_empty());
        assert!(bottom.visible());
    }

    #[test]
    fn escape_respects_option() {
        let mut ctx = OverlayContext::new();
        let mut dialog = DialogController::new(DialogOptions::new().close_on_press_escape(false));
        dialog.request_open(&mut ctx);
        dialog.take_events();

        dialog.on_escape_press(&mut ctx);
        assert!(dialog.take_events().is_empty());
        assert!(dialog.visible());
    }

    #[test]
    fn overlay_click_closes_only_on_overlay_target() {
        let mut ctx = OverlayContext::new();
        let mut dialog = open_dialog(&mut ctx);
        dialog.take_events();

        dialog.on_overlay_click(&mut ctx, ClickTarget::Content);
        assert!(dialog.visible());

        dialog.on_overlay_click(&mut ctx, ClickTarget::Overlay);
        assert!(!dialog.visible());
    }

    #[test]
    fn overlay_click_respects_option_and_topmost() {
        let mut ctx = OverlayContext::new();
        let mut opted_out =
            DialogController::new(DialogOptions::new().close_on_click_overlay(false));
        opted_out.request_open(&mut ctx);
        opted_out.on_overlay_click(&mut ctx, ClickTarget::Overlay);
        assert!(opted_out.visible());

        let _top = open_dialog(&mut ctx);
        // opted_out is now covered as well; still open either way.
        opted_out.on_overlay_click(&mut ctx, ClickTarget::Overlay);
        assert!(opted_out.visible());
    }

    #[test]
    fn interceptor_suspends_close_until_resolved() {
        let slot: Rc<Cell<Option<CloseGuard>>> = Rc::new(Cell::new(None));
        let captured = Rc::clone(&slot);
        let mut ctx = OverlayContext::new();
        let mut dialog = DialogController::new(
            DialogOptions::new().before_close(Box::new(move |guard| captured.set(Some(guard)))),
        );

        dialog.request_open(&mut ctx);
        dialog.take_events();

        dialog.request_close(&mut ctx);
        assert_eq!(dialog.take_events(), vec![DialogEvent::CloseRequested]);
        assert!(dialog.visible());
        assert!(dialog.is_close_pending());
        assert!(ctx.is_scroll_locked());

        // Coalesced while suspended.
        dialog.request_close(&mut ctx);
        assert!(dialog.take_events().is_empty());

        let guard = slot.get().unwrap();
        dialog.resolve_close(&mut ctx, guard);
        assert_eq!(
            dialog.take_events(),
            vec![DialogEvent::Closed, DialogEvent::VisibleChanged(false)]
        );
        assert!(!dialog.visible());
        assert!(!ctx.is_scroll_locked());
    }

    #[test]
    fn unresolved_interceptor_keeps_dialog_open() {
        let mut ctx = OverlayContext::new();
        let mut dialog = DialogController::new(
            DialogOptions::new().before_close(Box::new(|_| {
                // Continuation deliberately dropped; the close never lands.
            })),
        );
        dialog.request_open(&mut ctx);
        dialog.request_close(&mut ctx);

        assert!(dialog.visible());
        assert_eq!(dialog.phase(), Visibility::Open);
        assert!(ctx.contains(dialog.id()));
    }

    #[test]
    fn stale_guard_after_reopen_is_noop() {
        let slot: Rc<Cell<Option<CloseGuard>>> = Rc::new(Cell::new(None));
        let captured = Rc::clone(&slot);
        let mut ctx = OverlayContext::new();
        let mut dialog = DialogController::new(
            DialogOptions::new().before_close(Box::new(move |guard| captured.set(Some(guard)))),
        );

        dialog.request_open(&mut ctx);
        dialog.request_close(&mut ctx);
        let old_guard = slot.get().unwrap();

        // Host force-closes, then the dialog opens again.
        dialog.teardown(&mut ctx);
        dialog.request_open(&mut ctx);
        dialog.take_events();

        dialog.resolve_close(&mut ctx, old_guard);
        assert!(dialog.visible());
        assert!(dialog.take_events().is_empty());
    }

    #[test]
    fn teardown_releases_shared_state() {
        let mut ctx = OverlayContext::new();
        let mut dialog = open_dialog(&mut ctx);
        assert!(ctx.contains(dialog.id()));
        assert!(ctx.is_scroll_locked());

        dialog.teardown(&mut ctx);
        assert!(!ctx.contains(dialog.id()));
        assert!(!ctx.is_scroll_locked());
        assert!(!dialog.visible());

        // Double teardown covers the double-unmount race.
        dialog.teardown(&mut ctx);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn escape_routes_through_interceptor() {
        let invoked: Rc<Cell<bool>> = Rc::new(Cell::new(false));
        let flag = Rc::clone(&invoked);
        let mut ctx = OverlayContext::new();
        let mut dialog = DialogController::new(
            DialogOptions::new().before_close(Box::new(move |_| flag.set(true))),
        );

        dialog.request_open(&mut ctx);
        dialog.on_escape_press(&mut ctx);

        assert!(invoked.get());
        assert!(dialog.visible());
    }
}
