use gtk4 as gtk;

use log::warn;

use crate::capture::Rectangle;

/// Paint the translucent overlay and, while dragging, the selection outline.
///
/// `origin` is the screen position of the overlay's top-left corner.
pub fn draw_overlay(
    cr: &gtk::cairo::Context,
    width: f64,
    height: f64,
    outline: Option<Rectangle>,
    origin: (i32, i32),
) {
    cr.set_source_rgba(0.0, 0.0, 0.0, 0.3);
    cr.rectangle(0.0, 0.0, width, height);
    if let Err(e) = cr.fill() {
        warn!("Failed to paint capture overlay: {}", e);
        return;
    }

    if let Some(rect) = outline {
        let (x, y) = rect.origin();
        cr.set_source_rgb(1.0, 0.0, 0.0);
        cr.set_line_width(2.0);
        cr.rectangle(
            (x - origin.0) as f64,
            (y - origin.1) as f64,
            rect.width() as f64,
            rect.height() as f64,
        );
        if let Err(e) = cr.stroke() {
            warn!("Failed to stroke selection outline: {}", e);
        }
    }
}
