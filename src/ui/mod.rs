//! UI modules for Gamedock
//!
//! This module contains the window's rendering code, organized by tab.

mod components;
mod downloads_tab;
mod library_tab;
pub mod main_action;
pub mod theme;

pub use components::{render_section_frame, render_tab};
pub use downloads_tab::render_downloads_tab;
pub use library_tab::render_library_tab;

use theme::Theme;

/// Application tabs representing the main navigation sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Library tab: every configured game with its main action
    #[default]
    Library,
    /// Downloads tab: queue order, pause/resume, finished history
    Downloads,
}

/// UI-related state
pub struct UiState {
    /// Current theme
    pub current_theme: Theme,
    /// Currently selected tab
    pub active_tab: Tab,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
}

impl UiState {
    /// Create a new UiState with the given theme
    pub fn new(theme: Theme) -> Self {
        Self {
            current_theme: theme,
            active_tab: Tab::default(),
            theme_dirty: true, // Apply theme on first frame
        }
    }
}
