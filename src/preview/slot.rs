//! Single-instance window slot shared by the preview and the answer overlay

use log::debug;

/// A window that may contain sensitive content and can be hidden on demand
pub trait SensitiveWindow {
    fn present(&self);
    fn conceal(&self);
    fn is_shown(&self) -> bool;
    fn dispose(&self);
}

/// Holds at most one window; installing a new one destroys the old one
pub struct WindowSlot<W: SensitiveWindow> {
    current: Option<W>,
}

impl<W: SensitiveWindow> Default for WindowSlot<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: SensitiveWindow> WindowSlot<W> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Dispose the current window, then build and install its replacement.
    /// A concealed replacement is never presented.
    pub fn install(&mut self, build: impl FnOnce() -> W, concealed: bool) {
        self.clear();
        let window = build();
        if concealed {
            debug!("Installing window concealed");
            window.conceal();
        } else {
            window.present();
        }
        self.current = Some(window);
    }

    pub fn clear(&mut self) {
        if let Some(old) = self.current.take() {
            old.dispose();
        }
    }

    pub fn hide(&self) {
        if let Some(ref window) = self.current {
            window.conceal();
        }
    }

    pub fn unhide(&self) {
        if let Some(ref window) = self.current {
            window.present();
        }
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<&W> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::FakeWindow;
    use super::*;

    #[test]
    fn install_disposes_previous_window() {
        let mut slot = WindowSlot::new();
        let first = FakeWindow::default();
        slot.install(|| first.clone(), false);
        slot.install(FakeWindow::default, false);
        assert!(first.disposed.get());
        assert!(slot.current().unwrap().is_shown());
    }

    #[test]
    fn clear_leaves_slot_empty() {
        let mut slot = WindowSlot::new();
        slot.install(FakeWindow::default, true);
        slot.clear();
        assert!(slot.current().is_none());
        slot.hide();
        slot.unhide();
    }

    #[test]
    fn hide_and_unhide_are_idempotent() {
        let mut slot = WindowSlot::new();
        slot.install(FakeWindow::default, false);
        slot.hide();
        slot.hide();
        assert!(!slot.current().unwrap().is_shown());
        slot.unhide();
        slot.unhide();
        assert!(slot.current().unwrap().is_shown());
    }
}
