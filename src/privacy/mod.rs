//! Privacy mode
//!
//! One visibility state machine for every sensitive window. The flag is
//! shared read-only with presenters so a window created while hidden never
//! appears on screen.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info};

use crate::preview::{PreviewPresenter, SensitiveWindow, VisibilityQuery, WindowSlot};

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    pub fn flipped(self) -> Self {
        match self {
            Visibility::Visible => Visibility::Hidden,
            Visibility::Hidden => Visibility::Visible,
        }
    }

    pub fn is_hidden(self) -> bool {
        self == Visibility::Hidden
    }
}

/// Something privacy mode can hide and bring back
pub trait Concealable {
    fn hide(&self);
    fn unhide(&self);
}

impl<W: SensitiveWindow> Concealable for RefCell<WindowSlot<W>> {
    fn hide(&self) {
        self.borrow().hide();
    }

    fn unhide(&self) {
        self.borrow().unhide();
    }
}

impl<W: SensitiveWindow> Concealable for RefCell<PreviewPresenter<W>> {
    fn hide(&self) {
        self.borrow().hide();
    }

    fn unhide(&self) {
        self.borrow().unhide();
    }
}

/// Labels shown by the main window for a given visibility
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivacyChrome {
    pub toggle_label: &'static str,
    pub window_title: &'static str,
    pub status: &'static str,
    pub alert: bool,
}

impl PrivacyChrome {
    pub fn for_visibility(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Visible => Self {
                toggle_label: "Enable Privacy Mode",
                window_title: "LeetCode Helper",
                status: "Privacy mode disabled.",
                alert: false,
            },
            Visibility::Hidden => Self {
                toggle_label: "Disable Privacy Mode",
                window_title: "LeetCode Helper (Privacy Mode)",
                status: "Privacy mode enabled.",
                alert: true,
            },
        }
    }
}

/// Identifies one privacy test so a late restore cannot end a newer one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rehearsal(u64);

#[derive(Default)]
pub struct PrivacyMode {
    state: Rc<Cell<Visibility>>,
    targets: Vec<Rc<dyn Concealable>>,
    rehearsal: Option<Rehearsal>,
    rehearsals_started: u64,
}

impl PrivacyMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a window holder to follow every transition
    pub fn register(&mut self, target: Rc<dyn Concealable>) {
        self.targets.push(target);
    }

    pub fn state(&self) -> Visibility {
        self.state.get()
    }

    pub fn is_rehearsing(&self) -> bool {
        self.rehearsal.is_some()
    }

    /// A read-only view of the hidden flag for presenters
    pub fn visibility_query(&self) -> VisibilityQuery {
        let state = self.state.clone();
        Rc::new(move || state.get().is_hidden())
    }

    pub fn set(&mut self, visibility: Visibility) -> Visibility {
        info!("Privacy mode: {:?}", visibility);
        self.state.set(visibility);
        self.rehearsal = None;
        self.apply(visibility);
        visibility
    }

    pub fn toggle(&mut self) -> Visibility {
        self.set(self.state().flipped())
    }

    /// Show what the opposite mode looks like without changing the real state.
    /// The caller schedules [`restore`](Self::restore) with the returned token.
    pub fn rehearse(&mut self) -> (Rehearsal, Visibility) {
        let preview = self.state().flipped();
        self.rehearsals_started += 1;
        let rehearsal = Rehearsal(self.rehearsals_started);
        debug!("Rehearsing privacy mode as {:?} ({:?})", preview, rehearsal);
        self.rehearsal = Some(rehearsal);
        self.apply(preview);
        (rehearsal, preview)
    }

    /// Re-apply the real state after a rehearsal.
    ///
    /// Returns `None` without touching any window when `rehearsal` is no
    /// longer the running test, i.e. a later toggle or test replaced it.
    pub fn restore(&mut self, rehearsal: Rehearsal) -> Option<Visibility> {
        if self.rehearsal != Some(rehearsal) {
            debug!("Ignoring restore for finished {:?}", rehearsal);
            return None;
        }
        let actual = self.state();
        debug!("Restoring privacy mode to {:?}", actual);
        self.rehearsal = None;
        self.apply(actual);
        Some(actual)
    }

    fn apply(&self, visibility: Visibility) {
        for target in &self.targets {
            match visibility {
                Visibility::Hidden => target.hide(),
                Visibility::Visible => target.unhide(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::testing::FakeWindow;

    fn mode_with_window() -> (PrivacyMode, FakeWindow) {
        let window = FakeWindow::default();
        let mut slot = WindowSlot::new();
        slot.install(|| window.clone(), false);
        let mut mode = PrivacyMode::new();
        mode.register(Rc::new(RefCell::new(slot)));
        (mode, window)
    }

    #[test]
    fn toggle_flips_state_and_windows() {
        let (mut mode, window) = mode_with_window();
        assert_eq!(mode.toggle(), Visibility::Hidden);
        assert!(!window.is_shown());
        assert_eq!(mode.toggle(), Visibility::Visible);
        assert!(window.is_shown());
    }

    #[test]
    fn set_is_idempotent() {
        let (mut mode, window) = mode_with_window();
        mode.set(Visibility::Hidden);
        mode.set(Visibility::Hidden);
        assert_eq!(mode.state(), Visibility::Hidden);
        assert!(!window.is_shown());
    }

    #[test]
    fn query_tracks_the_shared_flag() {
        let mut mode = PrivacyMode::new();
        let query = mode.visibility_query();
        assert!(!query());
        mode.toggle();
        assert!(query());
    }

    #[test]
    fn rehearsal_does_not_change_real_state() {
        let (mut mode, window) = mode_with_window();
        let query = mode.visibility_query();

        let (rehearsal, shown) = mode.rehearse();
        assert_eq!(shown, Visibility::Hidden);
        assert!(mode.is_rehearsing());
        assert!(!window.is_shown());
        assert!(!query());

        assert_eq!(mode.restore(rehearsal), Some(Visibility::Visible));
        assert!(!mode.is_rehearsing());
        assert!(window.is_shown());
    }

    #[test]
    fn rehearsal_from_hidden_shows_then_hides_again() {
        let (mut mode, window) = mode_with_window();
        mode.set(Visibility::Hidden);
        let (rehearsal, _) = mode.rehearse();
        assert!(window.is_shown());
        mode.restore(rehearsal);
        assert!(!window.is_shown());
    }

    #[test]
    fn toggle_during_rehearsal_wins() {
        let (mut mode, window) = mode_with_window();
        let (rehearsal, _) = mode.rehearse();
        mode.toggle();
        assert!(!mode.is_rehearsing());
        assert_eq!(mode.restore(rehearsal), None);
        assert_eq!(mode.state(), Visibility::Hidden);
        assert!(!window.is_shown());
    }

    #[test]
    fn late_restore_does_not_cut_a_newer_test_short() {
        let (mut mode, window) = mode_with_window();
        let (first, _) = mode.rehearse();
        mode.toggle();
        let (second, shown) = mode.rehearse();
        assert_eq!(shown, Visibility::Visible);
        assert!(window.is_shown());

        assert_eq!(mode.restore(first), None);
        assert!(mode.is_rehearsing());
        assert!(window.is_shown());

        assert_eq!(mode.restore(second), Some(Visibility::Hidden));
        assert!(!mode.is_rehearsing());
        assert!(!window.is_shown());
    }

    #[test]
    fn transitions_without_windows_are_inert() {
        let mut slot: WindowSlot<FakeWindow> = WindowSlot::new();
        slot.clear();
        let mut mode = PrivacyMode::new();
        mode.register(Rc::new(RefCell::new(slot)));
        mode.toggle();
        let (rehearsal, _) = mode.rehearse();
        assert_eq!(mode.restore(rehearsal), Some(Visibility::Hidden));
        assert_eq!(mode.state(), Visibility::Hidden);
    }

    #[test]
    fn chrome_follows_visibility() {
        let hidden = PrivacyChrome::for_visibility(Visibility::Hidden);
        assert_eq!(hidden.toggle_label, "Disable Privacy Mode");
        assert!(hidden.window_title.ends_with("(Privacy Mode)"));
        assert!(hidden.alert);

        let visible = PrivacyChrome::for_visibility(Visibility::Visible);
        assert_eq!(visible.window_title, "LeetCode Helper");
        assert!(!visible.alert);
    }
}
