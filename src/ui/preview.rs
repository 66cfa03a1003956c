use gtk4 as gtk;

use gtk::prelude::*;
use gtk::{gdk, glib, Orientation};
use image::RgbImage;

use crate::preview::{SensitiveWindow, THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH};

/// Small window holding the latest capture; closing it only hides it
pub struct PreviewWindow {
    window: gtk::Window,
}

impl PreviewWindow {
    pub fn new(parent: &impl IsA<gtk::Window>, thumbnail: Option<&RgbImage>) -> Self {
        let picture = match thumbnail {
            Some(thumb) => gtk::Picture::for_paintable(&texture_from_rgb(thumb)),
            None => gtk::Picture::new(),
        };
        picture.set_size_request(THUMBNAIL_WIDTH as i32, THUMBNAIL_HEIGHT as i32);
        picture.set_content_fit(gtk::ContentFit::Fill);
        picture.set_can_shrink(false);

        let close_btn = gtk::Button::builder()
            .label("Close Preview")
            .halign(gtk::Align::Center)
            .build();

        let content = gtk::Box::builder()
            .orientation(Orientation::Vertical)
            .spacing(5)
            .margin_top(10)
            .margin_bottom(10)
            .margin_start(10)
            .margin_end(10)
            .build();
        content.append(&picture);
        content.append(&close_btn);

        let window = gtk::Window::builder()
            .title("Capture Preview")
            .transient_for(parent)
            .default_width(300)
            .default_height(200)
            .hide_on_close(true)
            .child(&content)
            .build();

        close_btn.connect_clicked({
            let window = window.clone();
            move |_| window.set_visible(false)
        });

        Self { window }
    }
}

impl SensitiveWindow for PreviewWindow {
    fn present(&self) {
        self.window.present();
    }

    fn conceal(&self) {
        self.window.set_visible(false);
    }

    fn is_shown(&self) -> bool {
        self.window.is_visible()
    }

    fn dispose(&self) {
        self.window.destroy();
    }
}

fn texture_from_rgb(image: &RgbImage) -> gdk::MemoryTexture {
    let (width, height) = image.dimensions();
    let bytes = glib::Bytes::from(image.as_raw());
    gdk::MemoryTexture::new(
        width as i32,
        height as i32,
        gdk::MemoryFormat::R8g8b8,
        &bytes,
        width as usize * 3,
    )
}
