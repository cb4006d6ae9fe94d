//! Form dialog rendering
//!
//! Shared by the repository add/edit dialog and the install dialog.

use crate::dialogs::Form;
use crate::tui::theme::Theme;
use crate::tui::views::helpers::centered_rect;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// What the form dialog shows besides its fields
pub struct FormDialogView<'a> {
    pub title: &'a str,
    /// Read-only context lines above the fields
    pub context: Vec<(&'a str, &'a str)>,
    pub form: &'a Form,
    /// Inline failure of the last submit
    pub error: Option<&'a str>,
    pub can_submit: bool,
    pub submit_label: &'a str,
}

pub fn render_form_dialog(f: &mut Frame, area: Rect, view: &FormDialogView, theme: &Theme) {
    let mut lines = Vec::new();
    for (label, value) in &view.context {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(theme.text_label)),
            Span::styled(value.to_string(), Style::default().fg(theme.text_primary)),
        ]));
    }
    if !view.context.is_empty() {
        lines.push(Line::from(""));
    }

    let focused = view.form.focused();
    for field in view.form.fields() {
        let is_focused = focused == Some(field.name);
        let cursor = if is_focused { "█" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<12}", field.label),
                Style::default().fg(theme.input_prompt),
            ),
            Span::styled(
                format!("{}{}", field.value(), cursor),
                theme.input_style(is_focused),
            ),
        ]));
        match view.form.visible_error(field.name) {
            Some(error) => lines.push(Line::from(Span::styled(
                format!("{:<12}{}", "", error),
                Style::default().fg(theme.dialog_error),
            ))),
            None => lines.push(Line::from("")),
        }
    }

    if let Some(error) = view.error {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            theme.dialog_error_style(),
        )));
        lines.push(Line::from(""));
    }

    let submit = if view.form.is_submitting() {
        "Submitting...".to_string()
    } else {
        format!("[ {} ]", view.submit_label)
    };
    lines.push(Line::from(vec![
        Span::styled(submit, theme.button_style(view.can_submit)),
        Span::raw("  "),
        Span::styled("<enter>", theme.footer_key_style()),
        Span::raw(" submit  "),
        Span::styled("<tab>", theme.footer_key_style()),
        Span::raw(" next field  "),
        Span::styled("<esc>", theme.footer_key_style()),
        Span::raw(" cancel"),
    ]));

    let height = lines.len() as u16 + 2;
    let dialog_area = centered_rect(70, height, area);
    let block = Block::default()
        .title(view.title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog_border));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, dialog_area);
    f.render_widget(paragraph, dialog_area);
}
