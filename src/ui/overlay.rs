//! Full-screen capture overlay
//!
//! Opens a translucent window, tracks one primary-button drag, tears itself
//! down on release and then hands the finalized rectangle to the consumer.

use gtk4 as gtk;

use gtk::prelude::*;
use gtk::{glib, DrawingArea, GestureDrag};
use log::{debug, info};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::capture::{GestureError, Rectangle, SelectionGesture};
use crate::ui::drawing::draw_overlay;

/// Receives the finalized selection once the overlay is gone
pub type RectangleConsumer = Rc<dyn Fn(Rectangle)>;

struct CaptureOverlay {
    window: gtk::Window,
    drawing_area: DrawingArea,
    /// Screen position of the monitor the overlay covers
    origin: Rc<Cell<(i32, i32)>>,
}

/// Open the overlay. Rejected while another overlay is still armed.
pub fn start_capture(
    parent: &impl IsA<gtk::Window>,
    gesture: &Rc<RefCell<SelectionGesture>>,
    settle: Duration,
    on_selected: RectangleConsumer,
) -> Result<(), GestureError> {
    gesture.borrow_mut().arm()?;
    info!("Opening capture overlay");

    let overlay = create_overlay(parent, gesture);
    connect_drag_handlers(&overlay, gesture, settle, on_selected);

    overlay.window.connect_close_request({
        let gesture = gesture.clone();
        move |_| {
            gesture.borrow_mut().abandon();
            glib::Propagation::Proceed
        }
    });

    overlay.window.fullscreen();
    overlay.window.present();
    overlay.drawing_area.grab_focus();
    Ok(())
}

fn create_overlay(
    parent: &impl IsA<gtk::Window>,
    gesture: &Rc<RefCell<SelectionGesture>>,
) -> CaptureOverlay {
    let drawing_area = DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .focusable(true)
        .build();
    drawing_area.set_cursor_from_name(Some("crosshair"));

    let window = gtk::Window::builder()
        .transient_for(parent)
        .modal(true)
        .decorated(false)
        .css_classes(["capture-overlay"])
        .child(&drawing_area)
        .build();

    let origin = Rc::new(Cell::new((0, 0)));

    drawing_area.set_draw_func({
        let gesture = gesture.clone();
        let origin = origin.clone();
        move |_, cr, width, height| {
            let outline = gesture.borrow().outline();
            draw_overlay(cr, width as f64, height as f64, outline, origin.get());
        }
    });

    CaptureOverlay {
        window,
        drawing_area,
        origin,
    }
}

fn connect_drag_handlers(
    overlay: &CaptureOverlay,
    gesture: &Rc<RefCell<SelectionGesture>>,
    settle: Duration,
    on_selected: RectangleConsumer,
) {
    let drag = GestureDrag::new();
    drag.set_button(1);

    drag.connect_drag_begin({
        let gesture = gesture.clone();
        let window = overlay.window.clone();
        let drawing_area = overlay.drawing_area.clone();
        let origin = overlay.origin.clone();
        move |_, x, y| {
            origin.set(monitor_origin(&window));
            let (sx, sy) = to_screen(origin.get(), x, y);
            if gesture.borrow_mut().press(sx, sy) {
                drawing_area.queue_draw();
            }
        }
    });

    drag.connect_drag_update({
        let gesture = gesture.clone();
        let drawing_area = overlay.drawing_area.clone();
        let origin = overlay.origin.clone();
        move |drag, offset_x, offset_y| {
            if let Some((start_x, start_y)) = drag.start_point() {
                let (sx, sy) = to_screen(origin.get(), start_x + offset_x, start_y + offset_y);
                if gesture.borrow_mut().motion(sx, sy).is_some() {
                    drawing_area.queue_draw();
                }
            }
        }
    });

    drag.connect_drag_end({
        let gesture = gesture.clone();
        let window = overlay.window.clone();
        let origin = overlay.origin.clone();
        move |drag, offset_x, offset_y| {
            let Some((start_x, start_y)) = drag.start_point() else {
                return;
            };
            let (sx, sy) = to_screen(origin.get(), start_x + offset_x, start_y + offset_y);
            let finalized = gesture.borrow_mut().release(sx, sy);

            if let Some(rect) = finalized {
                window.destroy();
                settle_main_loop(settle);
                on_selected(rect);
                gesture.borrow_mut().abandon();
            }
        }
    });

    overlay.drawing_area.add_controller(drag);
}

/// Let the compositor drop the overlay before the screen is read
fn settle_main_loop(settle: Duration) {
    let context = glib::MainContext::default();
    while context.pending() {
        context.iteration(false);
    }
    debug!("Waiting {:?} for the overlay to leave the screen", settle);
    std::thread::sleep(settle);
}

fn monitor_origin(window: &gtk::Window) -> (i32, i32) {
    window
        .surface()
        .and_then(|surface| WidgetExt::display(window).monitor_at_surface(&surface))
        .map(|monitor| {
            let geometry = monitor.geometry();
            (geometry.x(), geometry.y())
        })
        .unwrap_or((0, 0))
}

fn to_screen(origin: (i32, i32), x: f64, y: f64) -> (i32, i32) {
    (origin.0 + x.round() as i32, origin.1 + y.round() as i32)
}
