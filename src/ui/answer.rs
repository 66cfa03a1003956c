use gtk4 as gtk;

use gtk::prelude::*;
use gtk::Orientation;
use log::info;

use crate::preview::SensitiveWindow;
use crate::ui::clipboard::ClipboardManager;

/// Read-only window showing the LLM answer with a copy button
pub struct AnswerWindow {
    window: gtk::Window,
}

impl AnswerWindow {
    pub fn new(
        parent: &impl IsA<gtk::Window>,
        answer: &str,
        on_copied: impl Fn() + 'static,
    ) -> Self {
        let buffer = gtk::TextBuffer::new(None);
        buffer.set_text(answer);

        let text_view = gtk::TextView::builder()
            .buffer(&buffer)
            .editable(false)
            .cursor_visible(false)
            .wrap_mode(gtk::WrapMode::Word)
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

        let copy_btn = gtk::Button::builder()
            .label("Copy Answer")
            .halign(gtk::Align::Center)
            .build();
        copy_btn.connect_clicked({
            let answer = answer.to_string();
            move |btn| {
                ClipboardManager::from_widget(btn).copy_text(&answer);
                info!("Answer copied to clipboard");
                on_copied();
            }
        });

        let content = gtk::Box::builder()
            .orientation(Orientation::Vertical)
            .spacing(5)
            .margin_top(5)
            .margin_bottom(5)
            .margin_start(5)
            .margin_end(5)
            .build();
        content.append(&scrolled);
        content.append(&copy_btn);

        let window = gtk::Window::builder()
            .title("LLM Answer")
            .transient_for(parent)
            .default_width(500)
            .default_height(300)
            .hide_on_close(true)
            .child(&content)
            .build();

        Self { window }
    }
}

impl SensitiveWindow for AnswerWindow {
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
