//! Core App struct and navigation

use super::state::ViewState;
use crate::backend::SharedBackend;
use crate::config::{Config, StartView};
use crate::controllers::{
    CatalogController, ChartDetailsController, HelmVersion, ReleasesController,
    RepositoriesController, Route,
};
use crate::error_channel::ErrorChannel;
use crate::tui::editor::ValuesEditor;
use crate::tui::theme::Theme;

/// The mounted screen and the controller that drives it
pub enum Screen {
    Releases(ReleasesController),
    Repositories(RepositoriesController),
    Catalog(CatalogController),
    ChartDetails {
        controller: ChartDetailsController,
        editor: ValuesEditor,
    },
}

/// Main application state
///
/// Owns the composition root: the backend handle and the error channel are
/// created once and handed to every controller the app mounts.
pub struct App {
    pub(super) backend: SharedBackend,
    pub(super) errors: ErrorChannel,
    pub(super) config: Config,
    pub(super) theme: Theme,
    pub(super) route: Route,
    pub(super) screen: Screen,
    pub(super) version: HelmVersion,
    pub(super) view_state: ViewState,
}

pub fn start_route(view: StartView) -> Route {
    match view {
        StartView::Releases => Route::Releases,
        StartView::Repositories => Route::Repositories,
        StartView::Catalog => Route::Catalog,
    }
}

impl App {
    pub fn new(backend: SharedBackend, config: Config) -> anyhow::Result<Self> {
        let errors = ErrorChannel::new();
        let mut version = HelmVersion::new(backend.clone(), errors.clone());
        version.mount();

        let route = start_route(config.ui.start_view);
        let screen = mount_screen(&backend, &errors, &config, &route)?;
        tracing::debug!("Starting on {:?}", route);

        Ok(Self {
            backend,
            errors,
            config,
            theme: Theme::default(),
            route,
            screen,
            version,
            view_state: ViewState::default(),
        })
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn errors(&self) -> &ErrorChannel {
        &self.errors
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Unmount the current screen and mount the one `route` names
    ///
    /// On failure the current screen stays.
    pub fn navigate(&mut self, route: Route) -> anyhow::Result<()> {
        let screen = mount_screen(&self.backend, &self.errors, &self.config, &route)?;
        tracing::debug!("Navigating from {:?} to {:?}", self.route, route);
        self.screen = screen;
        self.route = route;
        self.view_state.reset();
        Ok(())
    }

    /// Number of rows in the current list, if the screen shows one
    pub fn list_len(&self) -> usize {
        match &self.screen {
            Screen::Releases(c) => c.releases().len(),
            Screen::Repositories(c) => c.repos().len(),
            Screen::Catalog(c) => c.charts().len(),
            Screen::ChartDetails { .. } => 0,
        }
    }

    /// Apply every finished remote call; returns whether anything changed
    pub fn poll(&mut self) -> anyhow::Result<bool> {
        let mut changed = self.version.poll()?;
        let next = match &mut self.screen {
            Screen::Releases(c) => {
                changed |= c.poll()?;
                None
            }
            Screen::Repositories(c) => {
                changed |= c.poll()?;
                None
            }
            Screen::Catalog(c) => {
                changed |= c.poll()?;
                None
            }
            Screen::ChartDetails { controller, editor } => {
                let next = controller.poll()?;
                if !editor.is_loaded()
                    && let Some(details) = controller.details()
                {
                    editor.load(&details.values);
                    changed = true;
                }
                next
            }
        };

        let len = self.list_len();
        self.view_state.clamp_cursor(len);

        if let Some(route) = next {
            self.navigate(route)?;
            changed = true;
        }
        Ok(changed)
    }
}

fn mount_screen(
    backend: &SharedBackend,
    errors: &ErrorChannel,
    config: &Config,
    route: &Route,
) -> anyhow::Result<Screen> {
    let screen = match route {
        Route::Releases => {
            let mut controller = ReleasesController::new(backend.clone(), errors.clone());
            controller.mount();
            Screen::Releases(controller)
        }
        Route::Repositories => {
            let mut controller = RepositoriesController::new(backend.clone(), errors.clone());
            controller.mount();
            Screen::Repositories(controller)
        }
        Route::Catalog => {
            let mut controller =
                CatalogController::new(backend.clone(), errors.clone(), config.ui.search_delay());
            controller.mount();
            Screen::Catalog(controller)
        }
        Route::ChartDetails(name) => {
            let mut controller =
                ChartDetailsController::new(backend.clone(), errors.clone(), name.clone());
            controller.mount()?;
            Screen::ChartDetails {
                controller,
                editor: ValuesEditor::new(),
            }
        }
    };
    Ok(screen)
}
