use gtk::{gio, glib};
use gtk4 as gtk;
use libadwaita as adw;
use log::{debug, error, info, warn};

use gtk4::prelude::*;
use std::rc::Rc;

use crate::app::{Action, AppState};
use crate::capture;
use crate::privacy::{PrivacyChrome, Visibility};
use crate::ui::answer::AnswerWindow;
use crate::ui::dialogs::show_error;
use crate::ui::header::HeaderComponents;
use crate::ui::overlay::{self, RectangleConsumer};
use crate::ui::shortcuts::show_shortcuts_dialog;
use crate::ui::toolbar::ControlComponents;

pub struct UiComponents {
    pub window: adw::ApplicationWindow,
    pub header: HeaderComponents,
    pub controls: ControlComponents,
}

/// Open the capture overlay; the selection is grabbed and previewed on release
pub fn start_capture(state: &Rc<AppState>, components: &Rc<UiComponents>) {
    let on_selected: RectangleConsumer = Rc::new({
        let state = state.clone();
        let components = components.clone();
        move |rect| {
            let result = {
                let mut preview = state.preview.borrow_mut();
                capture::deliver(state.grabber.as_ref(), &mut *preview, rect)
            };
            match result {
                Ok((width, height)) => {
                    info!("Preview updated with {}x{} capture", width, height);
                    components
                        .controls
                        .set_status(&format!("Captured {}x{} region.", width, height));
                }
                Err(e) => components
                    .controls
                    .set_status(&format!("Capture failed: {}", e)),
            }
        }
    });

    if let Err(e) = overlay::start_capture(
        &components.window,
        &state.gesture,
        state.config.capture_settle,
        on_selected,
    ) {
        warn!("Capture not started: {}", e);
        components.controls.set_status(&e.to_string());
    }
}

/// Send the problem text to the LLM without blocking the main loop
pub fn send_question(state: &Rc<AppState>, components: &Rc<UiComponents>) {
    let text = components.controls.question_text();
    if text.is_empty() {
        components
            .controls
            .set_status("Please enter or capture the problem text.");
        return;
    }

    let client = match state.llm {
        Ok(ref client) => client.clone(),
        Err(ref reason) => {
            components.controls.set_status(&format!("Error: {}", reason));
            show_error(&components.window, "Failed to send to LLM", reason);
            return;
        }
    };

    let Some(permit) = state.requests.try_acquire() else {
        debug!("Send ignored, a request is already in flight");
        return;
    };

    components.controls.set_status("Sending to API...");
    components.controls.send_btn.set_sensitive(false);
    debug!("Dispatching {} chars to {}", text.len(), client.model());

    let state = state.clone();
    let components = components.clone();
    glib::spawn_future_local(async move {
        let result = gio::spawn_blocking(move || client.send_question(&text)).await;
        drop(permit);
        components.controls.send_btn.set_sensitive(true);

        match result {
            Ok(Ok(answer)) => {
                show_answer(&state, &components, &answer);
                components.controls.set_status("Answer received.");
            }
            Ok(Err(e)) => {
                error!("LLM request failed: {}", e);
                components.controls.set_status(&format!("Error: {}", e));
                show_error(&components.window, "Failed to send to LLM", &e.to_string());
            }
            Err(_) => {
                error!("LLM request thread panicked");
                components.controls.set_status("Error: the request was aborted.");
            }
        }
    });
}

fn show_answer(state: &Rc<AppState>, components: &Rc<UiComponents>, answer: &str) {
    let concealed = state.is_hidden();
    let on_copied = {
        let components = components.clone();
        move || {
            components
                .controls
                .set_status("Answer copied to clipboard.")
        }
    };
    state.answer.borrow_mut().install(
        || AnswerWindow::new(&components.window, answer, on_copied),
        concealed,
    );
}

fn apply_privacy_chrome(components: &UiComponents, visibility: Visibility, status: &str) {
    let chrome = PrivacyChrome::for_visibility(visibility);
    components.controls.privacy_btn.set_label(chrome.toggle_label);
    components.window.set_title(Some(chrome.window_title));
    components.header.title.set_title(chrome.window_title);
    components.controls.set_status(status);

    let label = &components.controls.status_label;
    if chrome.alert {
        label.remove_css_class("dim-label");
        label.add_css_class("error");
    } else {
        label.remove_css_class("error");
        label.add_css_class("dim-label");
    }
}

pub fn toggle_privacy(state: &Rc<AppState>, components: &Rc<UiComponents>) {
    let visibility = state.privacy.borrow_mut().toggle();
    let chrome = PrivacyChrome::for_visibility(visibility);
    apply_privacy_chrome(components, visibility, chrome.status);
}

/// Flip the sensitive windows briefly, then put the real state back
pub fn test_privacy(state: &Rc<AppState>, components: &Rc<UiComponents>) {
    if state.privacy.borrow().is_rehearsing() {
        debug!("Privacy test already running");
        return;
    }

    let (rehearsal, shown) = state.privacy.borrow_mut().rehearse();
    let chrome = PrivacyChrome::for_visibility(shown);
    apply_privacy_chrome(components, shown, &format!("[Test] {}", chrome.status));

    let state = state.clone();
    let components = components.clone();
    glib::timeout_add_local_once(state.config.privacy_test, move || {
        let Some(actual) = state.privacy.borrow_mut().restore(rehearsal) else {
            return;
        };
        let status = match actual {
            Visibility::Hidden => PrivacyChrome::for_visibility(actual).status,
            Visibility::Visible => "Ready.",
        };
        apply_privacy_chrome(&components, actual, status);
    });
}

pub fn dispatch_action(state: &Rc<AppState>, components: &Rc<UiComponents>, action: Action) {
    debug!("Shortcut action: {:?}", action);
    match action {
        Action::Capture => start_capture(state, components),
        Action::Send => send_question(state, components),
        Action::TogglePrivacy => toggle_privacy(state, components),
        Action::TestPrivacy => test_privacy(state, components),
        Action::ShowShortcuts => show_shortcuts_dialog(&state.shortcuts, &components.window),
        Action::Quit => components.window.close(),
    }
}

pub fn connect_button_handlers(state: &Rc<AppState>, components: &Rc<UiComponents>) {
    let buttons = [
        (&components.controls.capture_btn, Action::Capture),
        (&components.controls.send_btn, Action::Send),
        (&components.controls.privacy_btn, Action::TogglePrivacy),
        (&components.controls.test_privacy_btn, Action::TestPrivacy),
        (&components.header.shortcuts_btn, Action::ShowShortcuts),
    ];

    for (button, action) in buttons {
        button.connect_clicked({
            let state = state.clone();
            let components = components.clone();
            move |_| dispatch_action(&state, &components, action)
        });
    }
}

pub fn connect_shortcut_handler(state: &Rc<AppState>, components: &Rc<UiComponents>) {
    let key_controller = gtk::EventControllerKey::new();
    key_controller.set_propagation_phase(gtk::PropagationPhase::Capture);

    key_controller.connect_key_pressed({
        let state = state.clone();
        let components = components.clone();
        move |_, key, _, modifiers| match state.shortcuts.get_action(key, modifiers) {
            Some(action) => {
                dispatch_action(&state, &components, action);
                glib::Propagation::Stop
            }
            None => glib::Propagation::Proceed,
        }
    });

    components.window.add_controller(key_controller);
}

pub fn connect_all_handlers(state: &Rc<AppState>, components: &Rc<UiComponents>) {
    debug!("Initializing UI handlers");
    connect_button_handlers(state, components);
    connect_shortcut_handler(state, components);
}
