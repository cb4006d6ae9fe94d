//! Event handling for the application
//!
//! Keys go to the innermost thing that wants them: an open dialog first,
//! then a text input, then global shortcuts, then the current screen.

use super::core::{App, Screen};
use super::state::{DetailsTab, InputMode, ViewState};
use crate::controllers::{
    CatalogController, ReleasesAction, ReleasesController, ReleasesDialog, RepositoriesAction,
    RepositoriesController, RepositoriesDialog, Route,
};
use crate::dialogs::Form;
use crate::models::Keyed;
use crate::tui::editor::ValuesEditor;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a form dialog should do after a key press
enum FormKey {
    Submit,
    Cancel,
    Edited,
    Ignored,
}

/// Feed a key into a form; editing keys are applied here
fn form_key(form: &mut Form, key: KeyEvent) -> FormKey {
    match key.code {
        KeyCode::Enter => FormKey::Submit,
        KeyCode::Esc => FormKey::Cancel,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            form.focus_next();
            FormKey::Edited
        }
        KeyCode::Backspace => {
            form.backspace();
            FormKey::Edited
        }
        KeyCode::Char(c) => {
            form.input(c);
            FormKey::Edited
        }
        _ => FormKey::Ignored,
    }
}

impl App {
    /// Main keyboard event handler
    ///
    /// Returns `Ok(true)` when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(true);
        }

        if self.has_modal() || self.view_state.input_mode != InputMode::Normal {
            let next = self.handle_screen_key(key);
            return self.follow(next).map(|_| false);
        }

        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc if self.errors.is_set() => {
                self.errors.clear();
                return Ok(false);
            }
            KeyCode::Char('1') => return self.follow(Some(Route::Releases)).map(|_| false),
            KeyCode::Char('2') => return self.follow(Some(Route::Repositories)).map(|_| false),
            KeyCode::Char('3') => return self.follow(Some(Route::Catalog)).map(|_| false),
            _ => {}
        }

        let next = self.handle_screen_key(key);
        self.follow(next).map(|_| false)
    }

    /// Scroll wheel moves the cursor, or the text in text views
    pub fn handle_scroll(&mut self, delta: isize) {
        let len = self.list_len();
        match &self.screen {
            Screen::ChartDetails { .. } => self.view_state.scroll_text(delta),
            Screen::Releases(c) if c.visible_dialog() == Some(ReleasesDialog::UsedValues) => {
                self.view_state.scroll_text(delta)
            }
            _ if !self.has_modal() => self.view_state.move_cursor(delta, len),
            _ => {}
        }
    }

    /// Whether a dialog currently owns the keyboard
    pub fn has_modal(&self) -> bool {
        match &self.screen {
            Screen::Releases(c) => c.visible_dialog().is_some(),
            Screen::Repositories(c) => c.visible_dialog().is_some(),
            Screen::Catalog(_) => false,
            Screen::ChartDetails { controller, .. } => controller.install_dialog().is_some(),
        }
    }

    /// Navigate if a handler asked to; navigation failures land in the error channel
    fn follow(&mut self, next: Option<Route>) -> anyhow::Result<()> {
        let Some(route) = next else {
            return Ok(());
        };
        if &route == self.route() {
            return Ok(());
        }
        if let Err(e) = self.navigate(route) {
            tracing::warn!("Navigation failed: {}", e);
            self.errors.report_error(&e);
        }
        Ok(())
    }

    fn handle_screen_key(&mut self, key: KeyEvent) -> Option<Route> {
        let state = &mut self.view_state;
        match &mut self.screen {
            Screen::Releases(c) => {
                handle_releases_key(c, state, key);
                None
            }
            Screen::Repositories(c) => {
                handle_repositories_key(c, state, key);
                None
            }
            Screen::Catalog(c) => handle_catalog_key(c, state, key),
            Screen::ChartDetails { controller, editor } => {
                if controller.install_dialog().is_some() {
                    if let Some(dialog) = controller.install_dialog_mut() {
                        match form_key(dialog.form_mut(), key) {
                            FormKey::Submit => {
                                controller.submit_install(&*editor);
                            }
                            FormKey::Cancel => {
                                controller.cancel_install();
                            }
                            FormKey::Edited | FormKey::Ignored => {}
                        }
                    }
                    return None;
                }
                if state.input_mode == InputMode::EditValues {
                    handle_editor_key(editor, state, key);
                    return None;
                }
                match key.code {
                    KeyCode::Tab => {
                        state.details_tab = state.details_tab.next();
                        state.text_scroll_offset = 0;
                    }
                    KeyCode::Char('i') => {
                        controller.open_install();
                    }
                    KeyCode::Char('e')
                        if state.details_tab == DetailsTab::Values
                            && editor.is_loaded() =>
                    {
                        state.input_mode = InputMode::EditValues;
                    }
                    KeyCode::Char('j') | KeyCode::Down => state.scroll_text(1),
                    KeyCode::Char('k') | KeyCode::Up => state.scroll_text(-1),
                    KeyCode::PageDown => state.scroll_text(state.page_size.max(1) as isize),
                    KeyCode::PageUp => state.scroll_text(-(state.page_size.max(1) as isize)),
                    KeyCode::Esc | KeyCode::Backspace => return Some(Route::Catalog),
                    _ => {}
                }
                None
            }
        }
    }
}

/// Cursor movement shared by the list screens; returns whether the key was used
fn move_key(state: &mut ViewState, key: KeyEvent, len: usize) -> bool {
    let page = state.page_size.max(1) as isize;
    let delta = match key.code {
        KeyCode::Char('j') | KeyCode::Down => 1,
        KeyCode::Char('k') | KeyCode::Up => -1,
        KeyCode::PageDown => page,
        KeyCode::PageUp => -page,
        KeyCode::Char('g') | KeyCode::Home => -(len as isize),
        KeyCode::Char('G') | KeyCode::End => len as isize,
        _ => return false,
    };
    state.move_cursor(delta, len);
    true
}

fn handle_releases_key(c: &mut ReleasesController, state: &mut ViewState, key: KeyEvent) {
    match c.visible_dialog() {
        Some(ReleasesDialog::ConfirmUninstall) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                c.dispatch(ReleasesAction::ConfirmUninstall)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                c.dispatch(ReleasesAction::CloseDialog)
            }
            _ => {}
        },
        Some(ReleasesDialog::UsedValues) => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                c.dispatch(ReleasesAction::CloseDialog);
                state.text_scroll_offset = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => state.scroll_text(1),
            KeyCode::Char('k') | KeyCode::Up => state.scroll_text(-1),
            _ => {}
        },
        None => {
            if move_key(state, key, c.releases().len()) {
                return;
            }
            match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => {
                    if let Some(release) = c.releases().get(state.cursor) {
                        let key = release.key();
                        c.dispatch(ReleasesAction::Toggle(key));
                    }
                }
                KeyCode::Char('d') => c.dispatch(ReleasesAction::OpenUninstall),
                KeyCode::Char('v') => {
                    state.text_scroll_offset = 0;
                    c.dispatch(ReleasesAction::OpenUsedValues);
                }
                KeyCode::Char('r') => c.dispatch(ReleasesAction::Reload),
                _ => {}
            }
        }
    }
}

fn handle_repositories_key(c: &mut RepositoriesController, state: &mut ViewState, key: KeyEvent) {
    match c.visible_dialog() {
        Some(RepositoriesDialog::ConfirmDelete) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                c.dispatch(RepositoriesAction::ConfirmDelete)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                c.dispatch(RepositoriesAction::CloseDialog)
            }
            _ => {}
        },
        Some(RepositoriesDialog::Add) | Some(RepositoriesDialog::Edit) => {
            let Some(dialog) = c.repo_dialog_mut() else {
                return;
            };
            match form_key(dialog.form_mut(), key) {
                FormKey::Submit => c.dispatch(RepositoriesAction::SubmitRepo),
                FormKey::Cancel => c.dispatch(RepositoriesAction::CancelRepo),
                FormKey::Edited | FormKey::Ignored => {}
            }
        }
        None => {
            if move_key(state, key, c.repos().len()) {
                return;
            }
            match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => {
                    if let Some(repo) = c.repos().get(state.cursor) {
                        let name = repo.key();
                        c.dispatch(RepositoriesAction::Toggle(name));
                    }
                }
                KeyCode::Char('a') => c.dispatch(RepositoriesAction::OpenAdd),
                KeyCode::Char('e') => c.dispatch(RepositoriesAction::OpenEdit),
                KeyCode::Char('d') => c.dispatch(RepositoriesAction::OpenDelete),
                KeyCode::Char('u') => c.dispatch(RepositoriesAction::Refresh),
                KeyCode::Char('r') => c.dispatch(RepositoriesAction::Reload),
                _ => {}
            }
        }
    }
}

fn handle_catalog_key(
    c: &mut CatalogController,
    state: &mut ViewState,
    key: KeyEvent,
) -> Option<Route> {
    if state.input_mode == InputMode::Search {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => state.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                let mut query = c.query().to_string();
                query.pop();
                c.set_query(query);
                state.cursor = 0;
            }
            KeyCode::Char(ch) => {
                c.set_query(format!("{}{}", c.query(), ch));
                state.cursor = 0;
            }
            _ => {}
        }
        return None;
    }

    if move_key(state, key, c.charts().len()) {
        return None;
    }
    match key.code {
        KeyCode::Char('/') => state.input_mode = InputMode::Search,
        KeyCode::Char(' ') => {
            if let Some(chart) = c.charts().get(state.cursor) {
                let name = chart.key();
                c.toggle(name);
            }
        }
        KeyCode::Enter => {
            if let Some(chart) = c.charts().get(state.cursor) {
                let name = chart.key();
                c.select(name);
            }
            return c.selected_chart_route();
        }
        _ => {}
    }
    None
}

fn handle_editor_key(editor: &mut ValuesEditor, state: &mut ViewState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.input_mode = InputMode::Normal,
        KeyCode::Enter => editor.newline(),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Up => editor.move_up(),
        KeyCode::Down => editor.move_down(),
        // YAML has no tabs
        KeyCode::Tab => {
            editor.insert(' ');
            editor.insert(' ');
        }
        KeyCode::Char(c) => editor.insert(c),
        _ => {}
    }
}
