//! Rendering logic for the application
//!
//! Layout: header, optional error banner, the current screen, footer hints.
//! Dialogs are drawn last, over the screen.

use super::core::{App, Screen};
use super::state::{DetailsTab, InputMode};
use crate::controllers::{ReleasesDialog, RepositoriesDialog};
use crate::dialogs::RepoDialogMode;
use crate::tui::views::{self, FormDialogView};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

impl App {
    /// Main render entry point
    pub fn render(&mut self, f: &mut Frame) {
        let error = self.errors.message();
        let mut constraints = vec![Constraint::Length(3)];
        if error.is_some() {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(3));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(f.area());

        views::render_header(f, chunks[0], &self.route, self.version.version(), &self.theme);

        let (body, footer) = match &error {
            Some(message) => {
                views::render_error_banner(f, chunks[1], message, &self.theme);
                (chunks[2], chunks[3])
            }
            None => (chunks[1], chunks[2]),
        };

        // table borders and header row
        self.view_state.page_size = (body.height as usize).saturating_sub(3);
        self.render_body(f, body);
        self.render_dialogs(f, body);

        let hints = self.footer_hints();
        views::render_footer(f, footer, &hints, self.busy_label(), &self.theme);
    }

    fn render_body(&mut self, f: &mut Frame, area: Rect) {
        let state = &mut self.view_state;
        let theme = &self.theme;
        match &mut self.screen {
            Screen::Releases(c) => views::render_releases(
                f,
                area,
                c,
                state.cursor,
                &mut state.scroll_offset,
                theme,
            ),
            Screen::Repositories(c) => views::render_repositories(
                f,
                area,
                c,
                state.cursor,
                &mut state.scroll_offset,
                theme,
            ),
            Screen::Catalog(c) => views::render_catalog(
                f,
                area,
                c,
                state.input_mode == InputMode::Search,
                state.cursor,
                &mut state.scroll_offset,
                theme,
            ),
            Screen::ChartDetails { controller, editor } => views::render_chart_details(
                f,
                area,
                controller,
                editor,
                state.details_tab,
                state.input_mode == InputMode::EditValues,
                &mut state.text_scroll_offset,
                theme,
            ),
        }
    }

    fn render_dialogs(&mut self, f: &mut Frame, area: Rect) {
        let state = &mut self.view_state;
        let theme = &self.theme;
        match &self.screen {
            Screen::Releases(c) => match c.visible_dialog() {
                Some(ReleasesDialog::ConfirmUninstall) => {
                    let name = c.selected().map(|r| r.name.as_str()).unwrap_or_default();
                    views::render_confirmation(
                        f,
                        area,
                        "Uninstall release",
                        &format!("Uninstall release '{}'?", name),
                        theme,
                    );
                }
                Some(ReleasesDialog::UsedValues) => {
                    if let Some(dialog) = c.used_values() {
                        views::render_used_values(
                            f,
                            area,
                            dialog,
                            &mut state.text_scroll_offset,
                            theme,
                        );
                    }
                }
                None => {}
            },
            Screen::Repositories(c) => match c.visible_dialog() {
                Some(RepositoriesDialog::ConfirmDelete) => {
                    let name = c.selected().map(|r| r.name.as_str()).unwrap_or_default();
                    views::render_confirmation(
                        f,
                        area,
                        "Delete repository",
                        &format!("Delete repository '{}'?", name),
                        theme,
                    );
                }
                Some(RepositoriesDialog::Add) | Some(RepositoriesDialog::Edit) => {
                    if let Some(dialog) = c.repo_dialog() {
                        let context = match dialog.mode() {
                            RepoDialogMode::Add => Vec::new(),
                            RepoDialogMode::Edit { old_name } => {
                                vec![("Editing", old_name.as_str())]
                            }
                        };
                        let view = FormDialogView {
                            title: dialog.title(),
                            context,
                            form: dialog.form(),
                            error: dialog.error(),
                            can_submit: dialog.can_submit(),
                            submit_label: "Save",
                        };
                        views::render_form_dialog(f, area, &view, theme);
                    }
                }
                None => {}
            },
            Screen::Catalog(_) => {}
            Screen::ChartDetails { controller, editor } => {
                if let Some(dialog) = controller.install_dialog() {
                    let values = if editor.is_loaded() {
                        "from the Values tab"
                    } else {
                        "chart defaults"
                    };
                    let view = FormDialogView {
                        title: "Install chart",
                        context: vec![("Chart", dialog.chart_name()), ("Values", values)],
                        form: dialog.form(),
                        error: dialog.error(),
                        can_submit: dialog.can_submit(),
                        submit_label: "Install",
                    };
                    views::render_form_dialog(f, area, &view, theme);
                }
            }
        }
    }

    /// Remote call currently shown as in flight
    fn busy_label(&self) -> Option<&'static str> {
        match &self.screen {
            Screen::Releases(c) if c.list().is_mutating() => Some("Uninstalling"),
            Screen::Releases(c) if c.list().is_loading() => Some("Loading"),
            Screen::Repositories(c) if c.list().is_mutating() => Some("Deleting"),
            Screen::Repositories(c) if c.is_refreshing() => Some("Refreshing"),
            Screen::Repositories(c) if c.list().is_loading() => Some("Loading"),
            Screen::Catalog(c) if c.is_loading() => Some("Searching"),
            Screen::ChartDetails { controller, .. } if controller.is_loading() => Some("Loading"),
            _ => None,
        }
    }

    fn footer_hints(&self) -> Vec<(&'static str, &'static str)> {
        let mut hints = match (&self.screen, self.view_state.input_mode) {
            (Screen::Catalog(_), InputMode::Search) => {
                return vec![("enter", "done"), ("esc", "done"), ("backspace", "delete")];
            }
            (Screen::ChartDetails { .. }, InputMode::EditValues) => {
                return vec![("esc", "stop editing"), ("arrows", "move")];
            }
            (Screen::Releases(c), _) if c.visible_dialog().is_some() => {
                return vec![("esc", "close")];
            }
            (Screen::Repositories(c), _) if c.visible_dialog().is_some() => {
                return vec![("esc", "close")];
            }
            (Screen::ChartDetails { controller, .. }, _)
                if controller.install_dialog().is_some() =>
            {
                return vec![("enter", "install"), ("esc", "cancel")];
            }
            (Screen::Releases(_), _) => vec![
                ("j/k", "move"),
                ("space", "select"),
                ("d", "uninstall"),
                ("v", "values"),
                ("r", "reload"),
            ],
            (Screen::Repositories(_), _) => vec![
                ("j/k", "move"),
                ("space", "select"),
                ("a", "add"),
                ("e", "edit"),
                ("d", "delete"),
                ("u", "update index"),
                ("r", "reload"),
            ],
            (Screen::Catalog(_), _) => vec![
                ("j/k", "move"),
                ("/", "search"),
                ("enter", "open"),
                ("space", "select"),
            ],
            (Screen::ChartDetails { .. }, _) => {
                let mut hints = vec![("tab", "switch tab"), ("i", "install")];
                if self.view_state.details_tab == DetailsTab::Values {
                    hints.push(("e", "edit values"));
                }
                hints.push(("esc", "back"));
                hints
            }
        };
        hints.extend([("1/2/3", "screens"), ("q", "quit")]);
        hints
    }
}
