use crossterm::event::KeyCode;

/// Events that can occur in the panel TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// Quit the application
    Quit,
    /// Switch between the dark and light theme
    ToggleTheme,
    /// No action
    None,
}

impl PanelEvent {
    pub fn from_key(code: KeyCode) -> Self {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => PanelEvent::Quit,
            KeyCode::Char('d') => PanelEvent::ToggleTheme,
            _ => PanelEvent::None,
        }
    }
}
