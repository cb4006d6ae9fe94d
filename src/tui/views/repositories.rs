//! Repositories screen

use crate::controllers::{ListPhase, RepositoriesController};
use crate::tui::theme::Theme;
use crate::tui::views::helpers::{render_empty_state, render_loading_state};
use crate::tui::views::table::{TableRow, render_table};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::Cell,
};

const COLUMNS: [(&str, Constraint); 2] = [
    ("NAME", Constraint::Min(20)),
    ("URL", Constraint::Percentage(70)),
];

pub fn render_repositories(
    f: &mut Frame,
    area: Rect,
    controller: &RepositoriesController,
    cursor: usize,
    scroll_offset: &mut usize,
    theme: &Theme,
) {
    let repos = controller.repos();
    let title = format!("Repositories ({})", repos.len());

    if repos.is_empty() {
        match controller.phase() {
            ListPhase::Idle | ListPhase::Loading => {
                render_loading_state(f, area, &title, "Loading repositories...", theme)
            }
            _ => render_empty_state(
                f,
                area,
                &title,
                "No repositories configured",
                "Press <a> to add one",
                theme,
            ),
        }
        return;
    }

    let rows = repos
        .iter()
        .map(|repo| TableRow {
            cells: vec![Cell::from(repo.name.clone()), Cell::from(repo.url.clone())],
            selected: controller.list().is_selected(repo),
        })
        .collect();

    render_table(f, area, &title, &COLUMNS, rows, cursor, scroll_offset, theme);
}
