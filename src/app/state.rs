//! Application state types
//!
//! Components never reach into this struct. The presenters only see a
//! visibility query and the overlay only sees a rectangle callback; the
//! UI handlers are the sole place where the pieces meet.

use libadwaita as adw;

use log::{info, warn};
use std::cell::RefCell;
use std::rc::Rc;

use super::config::{AppConfig, ShortcutConfig};
use crate::capture::{FrameGrabber, SelectionGesture, XcapGrabber};
use crate::llm::{ChatClient, LlmConfig, RequestGate};
use crate::preview::{PreviewPresenter, WindowSlot};
use crate::privacy::PrivacyMode;
use crate::ui::answer::AnswerWindow;
use crate::ui::preview::PreviewWindow;

/// Main application state
pub struct AppState {
    pub config: AppConfig,
    pub shortcuts: ShortcutConfig,
    /// Gesture of the capture overlay, shared across overlays so only one can be armed
    pub gesture: Rc<RefCell<SelectionGesture>>,
    pub grabber: Box<dyn FrameGrabber>,
    pub preview: Rc<RefCell<PreviewPresenter<PreviewWindow>>>,
    pub answer: Rc<RefCell<WindowSlot<AnswerWindow>>>,
    pub privacy: RefCell<PrivacyMode>,
    /// The chat client, or why it could not be set up
    pub llm: Result<ChatClient, String>,
    /// Shared by the Send button and its shortcut
    pub requests: RequestGate,
}

impl AppState {
    pub fn new(parent: &adw::ApplicationWindow, config: AppConfig) -> Rc<Self> {
        let mut privacy = PrivacyMode::new();

        let preview = Rc::new(RefCell::new(PreviewPresenter::new(
            privacy.visibility_query(),
            Box::new({
                let parent = parent.clone();
                move |thumbnail| PreviewWindow::new(&parent, thumbnail)
            }),
        )));
        let answer = Rc::new(RefCell::new(WindowSlot::new()));

        privacy.register(preview.clone());
        privacy.register(answer.clone());

        Rc::new(Self {
            config,
            shortcuts: ShortcutConfig::new(),
            gesture: Rc::new(RefCell::new(SelectionGesture::new())),
            grabber: Box::new(XcapGrabber),
            preview,
            answer,
            privacy: RefCell::new(privacy),
            llm: connect_llm(),
            requests: RequestGate::new(),
        })
    }

    /// Whether sensitive windows should currently be hidden
    pub fn is_hidden(&self) -> bool {
        self.privacy.borrow().state().is_hidden()
    }
}

fn connect_llm() -> Result<ChatClient, String> {
    let client = LlmConfig::from_env()
        .map_err(|e| e.to_string())
        .and_then(|config| ChatClient::new(config).map_err(|e| e.to_string()));

    match client {
        Ok(ref client) => info!("LLM client ready (model {})", client.model()),
        Err(ref reason) => warn!("LLM client unavailable: {}", reason),
    }
    client
}
