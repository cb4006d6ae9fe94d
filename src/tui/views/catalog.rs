//! Chart catalog screen: search bar plus results

use crate::controllers::CatalogController;
use crate::tui::theme::Theme;
use crate::tui::views::helpers::{render_empty_state, render_loading_state, truncate_message};
use crate::tui::views::table::{TableRow, render_table};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph},
};

const COLUMNS: [(&str, Constraint); 4] = [
    ("NAME", Constraint::Min(28)),
    ("CHART VERSION", Constraint::Length(14)),
    ("APP VERSION", Constraint::Length(14)),
    ("DESCRIPTION", Constraint::Percentage(50)),
];

const DESCRIPTION_MAX: usize = 80;

pub fn render_catalog(
    f: &mut Frame,
    area: Rect,
    controller: &CatalogController,
    searching: bool,
    cursor: usize,
    scroll_offset: &mut usize,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_search_bar(f, chunks[0], controller.query(), searching, theme);

    let charts = controller.charts();
    let title = format!("Charts ({})", charts.len());
    if controller.is_loading() && charts.is_empty() {
        render_loading_state(f, chunks[1], &title, "Searching charts...", theme);
        return;
    }
    if charts.is_empty() {
        render_empty_state(
            f,
            chunks[1],
            &title,
            "No charts found",
            "Try another search or add a repository <2>",
            theme,
        );
        return;
    }

    let rows = charts
        .iter()
        .map(|chart| TableRow {
            cells: vec![
                Cell::from(chart.name.clone()),
                Cell::from(chart.version.clone()),
                Cell::from(chart.app_version.clone()),
                Cell::from(truncate_message(&chart.description, DESCRIPTION_MAX)),
            ],
            selected: controller.list().is_selected(chart),
        })
        .collect();

    render_table(f, chunks[1], &title, &COLUMNS, rows, cursor, scroll_offset, theme);
}

fn render_search_bar(f: &mut Frame, area: Rect, query: &str, searching: bool, theme: &Theme) {
    let mut spans = vec![
        Span::styled("/", Style::default().fg(theme.input_prompt)),
        Span::styled(query.to_string(), theme.input_style(searching)),
    ];
    if searching {
        spans.push(Span::styled("█", theme.input_style(true)));
    } else if query.is_empty() {
        spans.push(Span::styled(
            "press / to search",
            Style::default().fg(theme.text_secondary),
        ));
    }

    let border = if searching {
        theme.input_focused
    } else {
        theme.text_label
    };
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(paragraph, area);
}
