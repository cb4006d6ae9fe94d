//! Theme and styling definitions
//!
//! Centralized place for all color and style definitions.

use ratatui::style::{Color, Modifier, Style};

/// Colors used across the TUI
pub struct Theme {
    // Header colors
    pub header_title: Color,
    pub header_tab: Color,
    pub header_tab_active: Color,
    pub header_version: Color,

    // Release status colors
    pub status_deployed: Color,
    pub status_failed: Color,
    pub status_pending: Color,
    pub status_other: Color,

    // Table colors
    pub table_header: Color,
    pub table_cursor_bg: Color,
    pub table_selected: Color,
    pub table_normal: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_label: Color,

    // Input colors
    pub input_prompt: Color,
    pub input_focused: Color,
    pub input_disabled: Color,

    // Dialog colors
    pub dialog_border: Color,
    pub dialog_error: Color,
    pub dialog_warning: Color,
    pub dialog_confirm: Color,
    pub dialog_cancel: Color,

    // Footer colors
    pub footer_key: Color,
    pub footer_busy: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_title: Color::Cyan,
            header_tab: Color::Gray,
            header_tab_active: Color::Yellow,
            header_version: Color::Green,

            status_deployed: Color::Green,
            status_failed: Color::Red,
            status_pending: Color::Yellow,
            status_other: Color::Gray,

            table_header: Color::Cyan,
            table_cursor_bg: Color::DarkGray,
            table_selected: Color::Blue,
            table_normal: Color::White,

            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_label: Color::Cyan,

            input_prompt: Color::Yellow,
            input_focused: Color::Yellow,
            input_disabled: Color::DarkGray,

            dialog_border: Color::Cyan,
            dialog_error: Color::Red,
            dialog_warning: Color::Yellow,
            dialog_confirm: Color::Green,
            dialog_cancel: Color::Red,

            footer_key: Color::Yellow,
            footer_busy: Color::Magenta,
        }
    }
}

impl Theme {
    pub fn header_title_style(&self) -> Style {
        Style::default()
            .fg(self.header_title)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_tab_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.header_tab_active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(self.header_tab)
        }
    }

    /// Color for a helm release status (`deployed`, `failed`, `pending-install`, ...)
    pub fn release_status_style(&self, status: &str) -> Style {
        let color = match status {
            "deployed" | "superseded" => self.status_deployed,
            "failed" => self.status_failed,
            s if s.starts_with("pending") || s == "uninstalling" => self.status_pending,
            _ => self.status_other,
        };
        Style::default().fg(color)
    }

    pub fn table_header_style(&self) -> Style {
        Style::default()
            .fg(self.table_header)
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_row_style(&self, under_cursor: bool, selected: bool) -> Style {
        let mut style = Style::default().fg(if selected {
            self.table_selected
        } else {
            self.table_normal
        });
        if selected {
            style = style.add_modifier(Modifier::BOLD);
        }
        if under_cursor {
            style = style.bg(self.table_cursor_bg);
        }
        style
    }

    pub fn input_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.input_focused)
        } else {
            Style::default().fg(self.text_primary)
        }
    }

    pub fn button_style(&self, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(self.dialog_confirm)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.input_disabled)
        }
    }

    pub fn footer_key_style(&self) -> Style {
        Style::default().fg(self.footer_key)
    }

    pub fn dialog_error_style(&self) -> Style {
        Style::default()
            .fg(self.dialog_error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dialog_warning_style(&self) -> Style {
        Style::default()
            .fg(self.dialog_warning)
            .add_modifier(Modifier::BOLD)
    }
}
