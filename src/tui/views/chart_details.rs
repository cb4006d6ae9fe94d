//! Chart details screen: README, editable values and chart metadata

use crate::controllers::ChartDetailsController;
use crate::models::ChartInfo;
use crate::tui::app::state::DetailsTab;
use crate::tui::editor::ValuesEditor;
use crate::tui::theme::Theme;
use crate::tui::views::helpers::{create_themed_block, render_loading_state};
use crate::tui::views::yaml::render_yaml_text;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

#[allow(clippy::too_many_arguments)]
pub fn render_chart_details(
    f: &mut Frame,
    area: Rect,
    controller: &ChartDetailsController,
    editor: &mut ValuesEditor,
    tab: DetailsTab,
    editing: bool,
    scroll_offset: &mut usize,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_tabs(f, chunks[0], tab, theme);

    let Some(details) = controller.details() else {
        render_loading_state(
            f,
            chunks[1],
            controller.name(),
            "Loading chart details...",
            theme,
        );
        return;
    };

    match tab {
        DetailsTab::Readme => {
            let readme = if details.readme.trim().is_empty() {
                "This chart has no README."
            } else {
                details.readme.as_str()
            };
            render_yaml_text(f, chunks[1], "README", readme, scroll_offset, theme);
        }
        DetailsTab::Values => render_values_editor(f, chunks[1], editor, editing, theme),
        DetailsTab::Chart => render_chart_info(f, chunks[1], &details.info, scroll_offset, theme),
    }
}

fn render_tabs(f: &mut Frame, area: Rect, active: DetailsTab, theme: &Theme) {
    let mut spans = Vec::new();
    for tab in DetailsTab::ALL {
        spans.push(Span::styled(
            format!(" {} ", tab.title()),
            theme.header_tab_style(tab == active),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("<tab>", theme.footer_key_style()));
    spans.push(Span::styled(
        " switch",
        Style::default().fg(theme.text_secondary),
    ));
    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_values_editor(
    f: &mut Frame,
    area: Rect,
    editor: &mut ValuesEditor,
    editing: bool,
    theme: &Theme,
) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let first = editor.scroll_for(visible_height);
    let lines: Vec<Line> = editor
        .lines()
        .iter()
        .skip(first)
        .take(visible_height)
        .map(|line| Line::from(line.clone()))
        .collect();

    let title = if editing {
        "Values (editing, <esc> to stop)"
    } else {
        "Values (<e> to edit)"
    };
    let border = if editing {
        theme.input_focused
    } else {
        theme.text_label
    };
    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(theme.text_primary))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    f.render_widget(paragraph, area);

    if editing {
        let (row, col) = editor.cursor();
        let x = area.x + 1 + col as u16;
        let y = area.y + 1 + (row - first) as u16;
        if x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1) {
            f.set_cursor_position(Position::new(x, y));
        }
    }
}

fn render_chart_info(
    f: &mut Frame,
    area: Rect,
    info: &ChartInfo,
    scroll_offset: &mut usize,
    theme: &Theme,
) {
    let mut rows: Vec<(&str, String)> = vec![
        ("Name", info.name.clone()),
        ("Version", info.version.clone()),
    ];
    let optional = [
        ("App version", &info.app_version),
        ("Type", &info.chart_type),
        ("Description", &info.description),
        ("Home", &info.home),
        ("API version", &info.api_version),
        ("Kube version", &info.kube_version),
        ("Condition", &info.condition),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            rows.push((label, value.clone()));
        }
    }
    if info.deprecated {
        rows.push(("Deprecated", "yes".to_string()));
    }
    if !info.keywords.is_empty() {
        rows.push(("Keywords", info.keywords.join(", ")));
    }
    for source in &info.sources {
        rows.push(("Source", source.clone()));
    }
    for maintainer in &info.maintainers {
        let contact = maintainer
            .email
            .as_deref()
            .or(maintainer.url.as_deref())
            .map(|c| format!(" <{}>", c))
            .unwrap_or_default();
        rows.push(("Maintainer", format!("{}{}", maintainer.name, contact)));
    }
    for dependency in &info.dependencies {
        rows.push((
            "Dependency",
            format!(
                "{} {} ({})",
                dependency.name, dependency.version, dependency.repository
            ),
        ));
    }
    for (key, value) in &info.annotations {
        rows.push(("Annotation", format!("{}: {}", key, value)));
    }

    let visible_height = area.height.saturating_sub(2) as usize;
    *scroll_offset = (*scroll_offset).min(rows.len().saturating_sub(visible_height));

    let lines: Vec<Line> = rows
        .into_iter()
        .skip(*scroll_offset)
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<14}", label), Style::default().fg(theme.text_label)),
                Span::styled(value, Style::default().fg(theme.text_primary)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(create_themed_block("Chart", theme))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
