//! Capture module for selecting and grabbing a screen region
//!
//! The gesture state machine and the frame grabber are kept apart from the
//! GTK overlay in `ui::overlay` so both can be tested headless.

pub mod screen;
pub mod selection;

pub use screen::{CaptureError, CapturedImage, FrameGrabber, XcapGrabber};
pub use selection::{GestureError, Rectangle, SelectionGesture};

use log::error;

use crate::preview::{PreviewPresenter, SensitiveWindow};

/// Snapshot a finalized selection and hand the pixels to the preview.
///
/// On failure nothing is shown and the previous preview is left untouched.
pub fn deliver<G, W>(
    grabber: &G,
    presenter: &mut PreviewPresenter<W>,
    rect: Rectangle,
) -> Result<(u32, u32), CaptureError>
where
    G: FrameGrabber + ?Sized,
    W: SensitiveWindow,
{
    let image = grabber.capture(rect).inspect_err(|e| {
        error!("Failed to capture {:?}: {}", rect, e);
    })?;
    let size = (image.width(), image.height());
    presenter.show(image);
    Ok(size)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use xcap::XCapError;

    use super::*;
    use crate::preview::testing::FakeWindow;

    /// Produces a solid image of the requested size and remembers each request
    #[derive(Default)]
    struct FakeGrabber {
        requests: RefCell<Vec<Rectangle>>,
        fail: bool,
    }

    impl FrameGrabber for FakeGrabber {
        fn capture(&self, rect: Rectangle) -> Result<CapturedImage, CaptureError> {
            self.requests.borrow_mut().push(rect);
            if self.fail {
                return Err(CaptureError::Os(XCapError::new("permission denied")));
            }
            let rect = rect.normalized();
            Ok(CapturedImage::blank(rect.width(), rect.height()))
        }
    }

    fn presenter(hidden: bool) -> PreviewPresenter<FakeWindow> {
        let hidden = Rc::new(Cell::new(hidden));
        PreviewPresenter::new(
            Rc::new(move || hidden.get()),
            Box::new(|thumb| FakeWindow {
                thumbnail_size: thumb.map(|t| t.dimensions()),
                ..FakeWindow::default()
            }),
        )
    }

    fn drag(from: (i32, i32), to: (i32, i32)) -> Rectangle {
        let mut gesture = SelectionGesture::new();
        gesture.arm().unwrap();
        gesture.press(from.0, from.1);
        gesture.motion(to.0, to.1);
        gesture.release(to.0, to.1).unwrap()
    }

    #[test]
    fn drag_capture_and_preview_end_to_end() {
        let grabber = FakeGrabber::default();
        let mut presenter = presenter(false);

        let rect = drag((100, 100), (400, 300));
        assert_eq!(rect, Rectangle::new(100, 100, 400, 300));

        let size = deliver(&grabber, &mut presenter, rect).unwrap();
        assert_eq!(size, (300, 200));

        let window = presenter.window().unwrap();
        assert!(window.is_shown());
        assert_eq!(window.thumbnail_size, Some((280, 180)));
        assert_eq!(grabber.requests.borrow().as_slice(), &[rect]);
    }

    #[test]
    fn reverse_drag_requests_the_same_region() {
        let grabber = FakeGrabber::default();
        let mut presenter = presenter(false);
        deliver(&grabber, &mut presenter, drag((400, 300), (100, 100))).unwrap();
        deliver(&grabber, &mut presenter, drag((100, 100), (400, 300))).unwrap();
        let requests = grabber.requests.borrow();
        assert_eq!(requests[0], requests[1]);
    }

    #[test]
    fn capture_while_hidden_stays_concealed() {
        let mut presenter = presenter(true);
        deliver(&FakeGrabber::default(), &mut presenter, drag((0, 0), (30, 30))).unwrap();
        assert!(!presenter.window().unwrap().is_shown());
    }

    #[test]
    fn failed_capture_leaves_no_new_preview() {
        let mut presenter = presenter(false);
        deliver(&FakeGrabber::default(), &mut presenter, drag((0, 0), (30, 30))).unwrap();
        let before = presenter.window().unwrap().clone();

        let failing = FakeGrabber {
            fail: true,
            ..FakeGrabber::default()
        };
        let err = deliver(&failing, &mut presenter, drag((5, 5), (50, 50))).unwrap_err();
        assert!(matches!(err, CaptureError::Os(_)));
        assert!(!before.disposed.get());
        assert_eq!(presenter.window().unwrap().thumbnail_size, Some((280, 180)));
    }

    #[test]
    fn degenerate_drag_flows_through() {
        let mut presenter = presenter(false);
        let size = deliver(&XcapGrabber, &mut presenter, drag((70, 70), (70, 70))).unwrap();
        assert_eq!(size, (0, 0));
        assert_eq!(presenter.window().unwrap().thumbnail_size, None);
    }
}
