//! Confirmation dialog rendering

use crate::tui::theme::Theme;
use crate::tui::views::helpers::centered_rect;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render a yes/no dialog centered over `area`
pub fn render_confirmation(f: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
    let key = |k: &'static str, color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("⚠ ", theme.dialog_warning_style()),
            Span::styled("CONFIRMATION REQUIRED", theme.dialog_warning_style()),
        ]),
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            key("y", theme.dialog_confirm),
            Span::raw(" to confirm, "),
            key("n", theme.dialog_cancel),
            Span::raw(" or "),
            key("Esc", theme.dialog_cancel),
            Span::raw(" to cancel"),
        ]),
    ];

    let dialog_area = centered_rect(60, 10, area);
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog_warning));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, dialog_area);
    f.render_widget(paragraph, dialog_area);
}
