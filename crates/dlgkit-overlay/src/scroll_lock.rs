#![forbid(unsafe_code)]

//! Reference-counted lock on the underlying page/container scroll.
//!
//! Stacked dialogs each take a reference on the same lock; the lock style is
//! applied exactly on the 0→1 transition and removed exactly on 1→0, so an
//! inner dialog closing never unlocks scroll while an outer dialog remains
//! open.
//!
//! The engine does not touch the host's scroll target itself; an optional
//! observer is called once per engage/disengage edge for the host to apply
//! and remove the lock style.

use tracing::trace;

/// Called with `true` when the lock engages (0→1) and `false` when it
/// disengages (1→0). Never called for intermediate count changes.
pub type ScrollLockObserver = Box<dyn FnMut(bool)>;

/// Process-wide scroll lock counter. One instance per application; mutation
/// only through [`acquire`](Self::acquire) and [`release`](Self::release).
#[derive(Default)]
pub struct ScrollLock {
    count: u32,
    observer: Option<ScrollLockObserver>,
}

impl std::fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLock")
            .field("count", &self.count)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl ScrollLock {
    /// Create an unlocked counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the engage/disengage observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: ScrollLockObserver) {
        self.observer = Some(observer);
    }

    /// Take a reference on the lock, engaging it on the 0→1 edge.
    pub fn acquire(&mut self) {
        self.count += 1;
        trace!(count = self.count, "scroll lock acquired");
        if self.count == 1
            && let Some(observer) = self.observer.as_mut()
        {
            observer(true);
        }
    }

    /// Drop a reference, disengaging the lock on the 1→0 edge.
    ///
    /// Releasing an unlocked counter is a no-op; the count never goes below
    /// zero.
    pub fn release(&mut self) {
        if self.count == 0 {
            return;
        }
        self.count -= 1;
        trace!(count = self.count, "scroll lock released");
        if self.count == 0
            && let Some(observer) = self.observer.as_mut()
        {
            observer(false);
        }
    }

    /// Whether the lock is currently engaged.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.count > 0
    }

    /// Current reference count.
    #[inline]
    pub fn lock_count(&self) -> u32 {
        self.count
    }
}
