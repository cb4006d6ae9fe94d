//! Footer and error banner rendering

use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render key hints, plus a busy marker while a remote call is in flight
pub fn render_footer(
    f: &mut Frame,
    area: Rect,
    hints: &[(&str, &str)],
    busy: Option<&str>,
    theme: &Theme,
) {
    let mut spans = Vec::new();
    if let Some(busy) = busy {
        spans.push(Span::styled(
            format!("{}... ", busy),
            Style::default()
                .fg(theme.footer_busy)
                .add_modifier(Modifier::BOLD),
        ));
    }
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(format!("<{}>", key), theme.footer_key_style()));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(footer, area);
}

/// Render the global error message
pub fn render_error_banner(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("✗ ", theme.dialog_error_style()),
        Span::styled(message.to_string(), Style::default().fg(theme.dialog_error)),
        Span::raw("  "),
        Span::styled("<esc>", theme.footer_key_style()),
        Span::styled(" dismiss", Style::default().fg(theme.text_secondary)),
    ]);
    let banner = Paragraph::new(line)
        .block(
            Block::default()
                .title("Error")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.dialog_error)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(banner, area);
}
