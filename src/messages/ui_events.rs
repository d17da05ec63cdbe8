//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::ReportFormat;

/// Dashboard pages
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Analysis,
    Alerts,
    Audit,
    Reports,
    Settings,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Dashboard,
        Page::Analysis,
        Page::Alerts,
        Page::Audit,
        Page::Reports,
        Page::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Analysis => "Claim Analysis",
            Page::Alerts => "Alerts",
            Page::Audit => "Audit Trail",
            Page::Reports => "Reports",
            Page::Settings => "Settings",
        }
    }

    pub fn index(&self) -> usize {
        Page::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    fn from_digit(c: char) -> Option<Page> {
        let idx = c.to_digit(10)? as usize;
        idx.checked_sub(1).and_then(|i| Page::ALL.get(i).copied())
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Navigation
    SwitchPage(Page),
    NextPage,
    PrevPage,
    SelectNext,
    SelectPrev,

    // Data
    Refetch,

    // Reports
    GenerateReport,
    DownloadReport(ReportFormat),

    // Appearance
    ToggleTheme,

    // Popups
    ToggleNotifications,
    ToggleHelp,
    Dismiss,

    // System
    Quit,
}

/// Map key event to UI event based on what is on screen
pub fn key_to_ui_event(key: KeyEvent, page: Page, popup_open: bool) -> Option<UiEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // A popup swallows everything except its dismissal
    if popup_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | '?' | 'n') => {
                Some(UiEvent::Dismiss)
            }
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char(c @ '1'..='6') => Page::from_digit(c).map(UiEvent::SwitchPage),
        KeyCode::Tab => Some(UiEvent::NextPage),
        KeyCode::BackTab => Some(UiEvent::PrevPage),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Char('r') => Some(UiEvent::Refetch),
        KeyCode::Char('t') => Some(UiEvent::ToggleTheme),
        KeyCode::Char('n') => Some(UiEvent::ToggleNotifications),
        KeyCode::Esc => Some(UiEvent::Dismiss),
        KeyCode::Char('g') if page == Page::Reports => Some(UiEvent::GenerateReport),
        KeyCode::Char('d') if page == Page::Reports => {
            Some(UiEvent::DownloadReport(ReportFormat::Json))
        }
        KeyCode::Char('c') if page == Page::Reports => {
            Some(UiEvent::DownloadReport(ReportFormat::Csv))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_switch_pages() {
        assert_eq!(
            key_to_ui_event(key(KeyCode::Char('5')), Page::Dashboard, false),
            Some(UiEvent::SwitchPage(Page::Reports))
        );
        assert_eq!(key_to_ui_event(key(KeyCode::Char('7')), Page::Dashboard, false), None);
    }

    #[test]
    fn test_report_keys_only_on_reports_page() {
        assert_eq!(key_to_ui_event(key(KeyCode::Char('g')), Page::Alerts, false), None);
        assert_eq!(
            key_to_ui_event(key(KeyCode::Char('c')), Page::Reports, false),
            Some(UiEvent::DownloadReport(ReportFormat::Csv))
        );
    }

    #[test]
    fn test_popup_swallows_keys() {
        assert_eq!(key_to_ui_event(key(KeyCode::Char('r')), Page::Reports, true), None);
        assert_eq!(
            key_to_ui_event(key(KeyCode::Esc), Page::Reports, true),
            Some(UiEvent::Dismiss)
        );
    }
}
