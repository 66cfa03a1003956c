use gtk4 as gtk;

use gtk::prelude::*;
use gtk::Orientation;

use crate::privacy::{PrivacyChrome, Visibility};

pub struct ControlComponents {
    pub content: gtk::Box,
    pub text_view: gtk::TextView,
    pub capture_btn: gtk::Button,
    pub send_btn: gtk::Button,
    pub privacy_btn: gtk::Button,
    pub test_privacy_btn: gtk::Button,
    pub status_label: gtk::Label,
}

impl ControlComponents {
    /// The problem text as typed or pasted, trimmed
    pub fn question_text(&self) -> String {
        let buffer = self.text_view.buffer();
        buffer
            .text(&buffer.start_iter(), &buffer.end_iter(), false)
            .trim()
            .to_string()
    }

    pub fn set_status(&self, message: &str) {
        self.status_label.set_text(message);
    }
}

pub fn create_controls() -> ControlComponents {
    let prompt_label = gtk::Label::builder()
        .label("Paste the problem statement or code:")
        .halign(gtk::Align::Start)
        .build();

    let text_view = gtk::TextView::builder()
        .wrap_mode(gtk::WrapMode::WordChar)
        .monospace(true)
        .top_margin(5)
        .bottom_margin(5)
        .left_margin(5)
        .right_margin(5)
        .build();

    let scrolled = gtk::ScrolledWindow::builder()
        .child(&text_view)
        .hscrollbar_policy(gtk::PolicyType::Never)
        .vexpand(true)
        .build();
    scrolled.add_css_class("card");

    let capture_btn = gtk::Button::with_label("Capture Screen Region");
    capture_btn.add_css_class("suggested-action");

    let send_btn = gtk::Button::with_label("Send to LLM");

    let chrome = PrivacyChrome::for_visibility(Visibility::Visible);
    let privacy_btn = gtk::Button::with_label(chrome.toggle_label);
    let test_privacy_btn = gtk::Button::with_label("Test Privacy Mode");

    let button_row = gtk::Box::builder()
        .orientation(Orientation::Horizontal)
        .spacing(4)
        .build();
    button_row.append(&capture_btn);
    button_row.append(&send_btn);
    button_row.append(&privacy_btn);
    button_row.append(&test_privacy_btn);

    let status_label = gtk::Label::builder()
        .label("Ready.")
        .halign(gtk::Align::Start)
        .ellipsize(gtk::pango::EllipsizeMode::End)
        .build();
    status_label.add_css_class("dim-label");

    let content = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(6)
        .margin_top(10)
        .margin_bottom(6)
        .margin_start(10)
        .margin_end(10)
        .vexpand(true)
        .build();
    content.append(&prompt_label);
    content.append(&scrolled);
    content.append(&button_row);
    content.append(&gtk::Separator::new(Orientation::Horizontal));
    content.append(&status_label);

    ControlComponents {
        content,
        text_view,
        capture_btn,
        send_btn,
        privacy_btn,
        test_privacy_btn,
        status_label,
    }
}
