//! Installed releases screen

use crate::controllers::{ListPhase, ReleasesController};
use crate::models::Keyed;
use crate::tui::theme::Theme;
use crate::tui::views::helpers::{render_empty_state, render_loading_state};
use crate::tui::views::table::{TableRow, render_table};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::Span,
    widgets::Cell,
};

const COLUMNS: [(&str, Constraint); 7] = [
    ("NAME", Constraint::Min(20)),
    ("NAMESPACE", Constraint::Min(15)),
    ("REVISION", Constraint::Length(9)),
    ("STATUS", Constraint::Length(16)),
    ("CHART", Constraint::Min(24)),
    ("APP VERSION", Constraint::Length(12)),
    ("UPDATED", Constraint::Length(20)),
];

pub fn render_releases(
    f: &mut Frame,
    area: Rect,
    controller: &ReleasesController,
    cursor: usize,
    scroll_offset: &mut usize,
    theme: &Theme,
) {
    let releases = controller.releases();
    let title = format!("Installed charts ({})", releases.len());

    if releases.is_empty() {
        match controller.phase() {
            ListPhase::Idle | ListPhase::Loading => {
                render_loading_state(f, area, &title, "Loading releases...", theme)
            }
            _ => render_empty_state(
                f,
                area,
                &title,
                "No releases installed",
                "Install one from the catalog <3>",
                theme,
            ),
        }
        return;
    }

    let rows = releases
        .iter()
        .map(|release| TableRow {
            cells: vec![
                Cell::from(release.name.clone()),
                Cell::from(release.namespace.clone()),
                Cell::from(release.revision.clone()),
                Cell::from(Span::styled(
                    release.status.clone(),
                    theme.release_status_style(&release.status),
                )),
                Cell::from(release.chart.clone()),
                Cell::from(release.app_version.clone()),
                Cell::from(release.updated.format("%Y-%m-%d %H:%M:%S").to_string()),
            ],
            selected: controller.list().selected_key() == Some(&release.key()),
        })
        .collect();

    render_table(f, area, &title, &COLUMNS, rows, cursor, scroll_offset, theme);
}
