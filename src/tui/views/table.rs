//! Scrollable list table shared by the list screens

use crate::tui::theme::Theme;
use crate::tui::views::helpers::{create_themed_block, update_scroll_offset};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Cell, Row, Table},
};

/// Rows kept visible above and below the cursor
const SCROLL_BUFFER: usize = 2;

/// One table row; `selected` marks the list's current selection
pub struct TableRow {
    pub cells: Vec<Cell<'static>>,
    pub selected: bool,
}

/// Render `rows` under `columns`, highlighting the cursor row
///
/// The first column is a selection marker and is added here.
#[allow(clippy::too_many_arguments)]
pub fn render_table(
    f: &mut Frame,
    area: Rect,
    title: &str,
    columns: &[(&str, Constraint)],
    rows: Vec<TableRow>,
    cursor: usize,
    scroll_offset: &mut usize,
    theme: &Theme,
) {
    // borders and header row
    let visible_height = (area.height as usize).saturating_sub(3);
    update_scroll_offset(cursor, visible_height, scroll_offset, SCROLL_BUFFER);

    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(columns.iter().map(|(name, _)| Cell::from(name.to_string()))),
    )
    .style(theme.table_header_style());

    let rows: Vec<Row> = rows
        .into_iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(i, row)| {
            let marker = if row.selected { "●" } else { " " };
            let style = theme.table_row_style(i == cursor, row.selected);
            Row::new(std::iter::once(Cell::from(Span::raw(marker))).chain(row.cells))
                .style(style)
        })
        .collect();

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(1))
        .chain(columns.iter().map(|(_, width)| *width))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(create_themed_block(title, theme));
    f.render_widget(table, area);
}
