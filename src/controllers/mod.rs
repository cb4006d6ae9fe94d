//! View controllers
//!
//! One controller per screen. Controllers own their view state and every
//! remote call they start; the UI loop drives them through `poll` and never
//! touches their state from another task.
//!
//! Structure:
//! - `list.rs` - generic list with selection and optimistic removal
//! - `releases.rs`, `repositories.rs`, `catalog.rs` - the list screens
//! - `chart_details.rs` - chart details and the install dialog
//! - `version.rs` - helm version badge

pub mod catalog;
pub mod chart_details;
pub mod list;
pub mod releases;
pub mod repositories;
pub mod version;

pub use catalog::CatalogController;
pub use chart_details::ChartDetailsController;
pub use list::{ListPhase, ResourceList};
pub use releases::{ReleasesAction, ReleasesController, ReleasesDialog};
pub use repositories::{RepositoriesAction, RepositoriesController, RepositoriesDialog};
pub use version::HelmVersion;

/// Screens the client can navigate to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Releases,
    Repositories,
    Catalog,
    ChartDetails(String),
}

impl Route {
    pub fn title(&self) -> &str {
        match self {
            Route::Releases => "Installed charts",
            Route::Repositories => "Repositories",
            Route::Catalog => "Catalog",
            Route::ChartDetails(name) => name,
        }
    }
}
