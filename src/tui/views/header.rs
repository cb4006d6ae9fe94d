//! Header view rendering

use crate::controllers::Route;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Top-level screens reachable from the header, with their hotkeys
const TABS: [(char, Route); 3] = [
    ('1', Route::Releases),
    ('2', Route::Repositories),
    ('3', Route::Catalog),
];

/// Render the title, the screen tabs and the helm version
pub fn render_header(
    f: &mut Frame,
    area: Rect,
    route: &Route,
    helm_version: Option<&str>,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(28)])
        .split(area);

    let mut spans = vec![
        Span::styled("helmdeck", theme.header_title_style()),
        Span::raw("  "),
    ];
    for (key, tab) in TABS.iter() {
        // chart details lives under the catalog tab
        let active = tab == route
            || (*tab == Route::Catalog && matches!(route, Route::ChartDetails(_)));
        spans.push(Span::styled(format!("<{}>", key), theme.footer_key_style()));
        spans.push(Span::styled(
            format!(" {}", tab.title()),
            theme.header_tab_style(active),
        ));
        spans.push(Span::raw("  "));
    }
    if let Route::ChartDetails(name) = route {
        spans.push(Span::styled(format!("> {}", name), theme.header_tab_style(true)));
    }

    let left = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(left, chunks[0]);

    let version = helm_version.unwrap_or("...");
    let right = Paragraph::new(Line::from(vec![
        Span::styled("helm ", Style::default().fg(theme.text_secondary)),
        Span::styled(version.to_string(), Style::default().fg(theme.header_version)),
    ]))
    .alignment(ratatui::layout::Alignment::Right)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(right, chunks[1]);
}
