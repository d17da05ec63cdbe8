//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::{Notice, PageView};
use crate::messages::Page;
use crate::models::Alert;
use crate::storage::Theme;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    /// Active page and its resources
    pub view: PageView,
    /// Header notification list (first few recent alerts)
    pub notifications: Vec<Alert>,
    pub theme: Theme,
    pub base_url: String,

    pub selected_row: usize,
    pub generating: bool,
    pub downloading: bool,

    // Popups
    pub notice: Option<Notice>,
    pub show_help: bool,
    pub show_notifications: bool,
}

impl RenderState {
    pub fn page(&self) -> Page {
        self.view.page()
    }

    pub fn popup_open(&self) -> bool {
        self.notice.is_some() || self.show_help || self.show_notifications
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            view: PageView::mount(Page::default()),
            notifications: Vec::new(),
            theme: Theme::default(),
            base_url: crate::constants::API_BASE_URL.to_string(),
            selected_row: 0,
            generating: false,
            downloading: false,
            notice: None,
            show_help: false,
            show_notifications: false,
        }
    }
}
