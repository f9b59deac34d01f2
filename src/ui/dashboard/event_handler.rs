use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events that can occur in the dashboard TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    /// Quit the application
    Quit,
    /// Collapse the wait and fetch immediately
    RefreshNow,
    /// Open the selected item's URL in the browser
    OpenUrl,
    /// Move the selection up
    RowUp,
    /// Move the selection down
    RowDown,
    /// No action
    None,
}

/// Map a key press to a dashboard event.
pub fn map_key(key: KeyEvent) -> DashboardEvent {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return DashboardEvent::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => DashboardEvent::Quit,
        KeyCode::Char('r') => DashboardEvent::RefreshNow,
        KeyCode::Char('o') | KeyCode::Enter => DashboardEvent::OpenUrl,
        KeyCode::Up | KeyCode::Char('k') => DashboardEvent::RowUp,
        KeyCode::Down | KeyCode::Char('j') => DashboardEvent::RowDown,
        _ => DashboardEvent::None,
    }
}
