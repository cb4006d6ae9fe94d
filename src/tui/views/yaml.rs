//! YAML text rendering
//!
//! Used for the chart README and values tabs and for the values a release
//! was installed with.

use crate::dialogs::UsedValuesDialog;
use crate::tui::theme::Theme;
use crate::tui::views::helpers::{create_themed_block, render_loading_state};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Clear, Paragraph, Wrap},
};

/// Render `text` starting at `scroll_offset`, clamping the offset to the content
pub fn render_yaml_text(
    f: &mut Frame,
    area: Rect,
    title: &str,
    text: &str,
    scroll_offset: &mut usize,
    theme: &Theme,
) {
    let all_lines: Vec<&str> = text.lines().collect();
    let visible_height = area.height.saturating_sub(2) as usize;

    let max_scroll = all_lines.len().saturating_sub(visible_height);
    *scroll_offset = (*scroll_offset).min(max_scroll);

    // leading spaces carry YAML structure, keep them
    let visible_lines: Vec<Line> = all_lines
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| Line::from(*line))
        .collect();

    let paragraph = Paragraph::new(visible_lines)
        .block(create_themed_block(title, theme))
        .style(Style::default().fg(theme.text_primary))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Render the used values dialog over most of `area`
pub fn render_used_values(
    f: &mut Frame,
    area: Rect,
    dialog: &UsedValuesDialog,
    scroll_offset: &mut usize,
    theme: &Theme,
) {
    let dialog_area = Rect {
        x: area.x + area.width / 10,
        y: area.y + 1,
        width: area.width - area.width / 5,
        height: area.height.saturating_sub(2),
    };
    let title = match dialog.release() {
        Some(release) => format!("Values of {}/{}", release.namespace, release.name),
        None => "Values".to_string(),
    };

    f.render_widget(Clear, dialog_area);
    match dialog.values() {
        Some(values) if !dialog.is_loading() => {
            let text = if values.trim().is_empty() {
                "# installed with the chart defaults"
            } else {
                values
            };
            render_yaml_text(f, dialog_area, &title, text, scroll_offset, theme);
        }
        _ => render_loading_state(f, dialog_area, &title, "Fetching values...", theme),
    }
}
