//! View rendering modules
//!
//! One module per screen, plus the pieces they share: tables, dialogs,
//! YAML text and the header/footer chrome.

mod catalog;
mod chart_details;
mod confirmation;
mod footer;
mod form;
mod header;
mod helpers;
mod releases;
mod repositories;
mod table;
mod yaml;

pub use catalog::*;
pub use chart_details::*;
pub use confirmation::*;
pub use footer::*;
pub use form::*;
pub use header::*;
pub use helpers::*;
pub use releases::*;
pub use repositories::*;
pub use table::*;
pub use yaml::*;
