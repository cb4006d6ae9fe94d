//! Helm data model
//!
//! Backend-owned DTOs. The client treats every value here as an immutable
//! snapshot: collections are replaced wholesale after a fetch, never patched
//! field by field.
//!
//! Structure:
//! - `release.rs` - installed chart instances
//! - `repo.rs` - chart repositories
//! - `chart.rs` - catalog entries, chart metadata and the install request

pub mod chart;
pub mod release;
pub mod repo;

pub use chart::{
    ChartDependency, ChartDetails, ChartInfo, ChartListItem, ChartMaintainer, InstallChartRequest,
};
pub use release::{Release, ReleaseKey};
pub use repo::Repo;

use std::fmt::Debug;

/// Identity of an entity inside a list view
///
/// Two items with the same key are the same entity, regardless of their
/// other fields. Selection and optimistic removal work on keys only.
pub trait Keyed {
    type Key: Clone + PartialEq + Debug + Send + 'static;

    fn key(&self) -> Self::Key;
}
