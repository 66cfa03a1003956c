//! Preview module
//!
//! Shows the most recent capture in a small, hideable window. Window
//! toolkit details live behind [`SensitiveWindow`] so the replace and
//! visibility rules can be checked without a display.

mod slot;

pub use slot::{SensitiveWindow, WindowSlot};

use std::rc::Rc;

use image::imageops::{self, FilterType};
use image::RgbImage;
use log::debug;

use crate::capture::CapturedImage;

/// Thumbnail size in display units. The aspect ratio is not preserved.
pub const THUMBNAIL_WIDTH: u32 = 280;
pub const THUMBNAIL_HEIGHT: u32 = 180;

/// Answers "should sensitive windows be hidden right now?"
pub type VisibilityQuery = Rc<dyn Fn() -> bool>;

/// Builds a preview window around an optional thumbnail
pub type PreviewFactory<W> = Box<dyn Fn(Option<&RgbImage>) -> W>;

/// Stretch a capture to the fixed thumbnail size; empty captures have no thumbnail
pub fn thumbnail(image: &CapturedImage) -> Option<RgbImage> {
    if image.is_empty() {
        return None;
    }
    Some(imageops::resize(
        image.pixels(),
        THUMBNAIL_WIDTH,
        THUMBNAIL_HEIGHT,
        FilterType::Triangle,
    ))
}

pub struct PreviewPresenter<W: SensitiveWindow> {
    slot: WindowSlot<W>,
    concealed: VisibilityQuery,
    factory: PreviewFactory<W>,
}

impl<W: SensitiveWindow> PreviewPresenter<W> {
    pub fn new(concealed: VisibilityQuery, factory: PreviewFactory<W>) -> Self {
        Self {
            slot: WindowSlot::new(),
            concealed,
            factory,
        }
    }

    /// Replace any existing preview with one for `image`.
    ///
    /// The hidden flag is read once here; later flips are applied through
    /// [`hide`](Self::hide) and [`unhide`](Self::unhide).
    pub fn show(&mut self, image: CapturedImage) {
        debug!("Showing preview of {}x{} capture", image.width(), image.height());
        let thumb = thumbnail(&image);
        let concealed = (self.concealed)();
        let factory = &self.factory;
        self.slot.install(|| factory(thumb.as_ref()), concealed);
    }

    pub fn hide(&self) {
        self.slot.hide();
    }

    pub fn unhide(&self) {
        self.slot.unhide();
    }

    #[cfg(test)]
    pub fn window(&self) -> Option<&W> {
        self.slot.current()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::SensitiveWindow;

    /// In-memory window that records what was done to it
    #[derive(Clone, Default)]
    pub struct FakeWindow {
        pub shown: Rc<Cell<bool>>,
        pub disposed: Rc<Cell<bool>>,
        pub thumbnail_size: Option<(u32, u32)>,
    }

    impl SensitiveWindow for FakeWindow {
        fn present(&self) {
            self.shown.set(true);
        }

        fn conceal(&self) {
            self.shown.set(false);
        }

        fn is_shown(&self) -> bool {
            self.shown.get()
        }

        fn dispose(&self) {
            self.shown.set(false);
            self.disposed.set(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::testing::FakeWindow;
    use super::*;

    fn presenter(hidden: Rc<Cell<bool>>) -> PreviewPresenter<FakeWindow> {
        PreviewPresenter::new(
            Rc::new(move || hidden.get()),
            Box::new(|thumb| FakeWindow {
                thumbnail_size: thumb.map(|t| t.dimensions()),
                ..FakeWindow::default()
            }),
        )
    }

    #[test]
    fn thumbnail_is_stretched_to_fixed_size() {
        let thumb = thumbnail(&CapturedImage::blank(300, 200)).unwrap();
        assert_eq!(thumb.dimensions(), (THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT));

        let tall = thumbnail(&CapturedImage::blank(20, 900)).unwrap();
        assert_eq!(tall.dimensions(), (280, 180));
    }

    #[test]
    fn empty_capture_has_no_thumbnail() {
        assert!(thumbnail(&CapturedImage::blank(0, 0)).is_none());
        assert!(thumbnail(&CapturedImage::blank(120, 0)).is_none());
    }

    #[test]
    fn show_is_visible_when_not_hidden() {
        let mut presenter = presenter(Rc::new(Cell::new(false)));
        presenter.show(CapturedImage::blank(300, 200));
        let window = presenter.window().unwrap();
        assert!(window.is_shown());
        assert_eq!(window.thumbnail_size, Some((280, 180)));
    }

    #[test]
    fn show_is_concealed_when_hidden() {
        let mut presenter = presenter(Rc::new(Cell::new(true)));
        presenter.show(CapturedImage::blank(300, 200));
        assert!(!presenter.window().unwrap().is_shown());
    }

    #[test]
    fn hidden_flag_is_read_only_at_creation() {
        let hidden = Rc::new(Cell::new(true));
        let mut presenter = presenter(hidden.clone());
        presenter.show(CapturedImage::blank(10, 10));
        hidden.set(false);
        assert!(!presenter.window().unwrap().is_shown());
        presenter.unhide();
        assert!(presenter.window().unwrap().is_shown());
    }

    #[test]
    fn second_show_replaces_the_first_window() {
        let mut presenter = presenter(Rc::new(Cell::new(false)));
        presenter.show(CapturedImage::blank(50, 50));
        let first = presenter.window().unwrap().clone();
        presenter.show(CapturedImage::blank(60, 40));

        assert!(first.disposed.get());
        assert!(!first.is_shown());
        let second = presenter.window().unwrap();
        assert!(!second.disposed.get());
        assert!(second.is_shown());
        assert_eq!(second.thumbnail_size, Some((THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT)));
    }

    #[test]
    fn hide_and_unhide_without_window_are_inert() {
        let presenter = presenter(Rc::new(Cell::new(false)));
        presenter.hide();
        presenter.unhide();
        assert!(presenter.window().is_none());
    }

    #[test]
    fn empty_capture_still_opens_a_preview() {
        let mut presenter = presenter(Rc::new(Cell::new(false)));
        presenter.show(CapturedImage::blank(0, 0));
        let window = presenter.window().unwrap();
        assert!(window.is_shown());
        assert_eq!(window.thumbnail_size, None);
    }
}
