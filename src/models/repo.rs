//! Repository model

use super::Keyed;
use serde::{Deserialize, Serialize};

/// A named remote source of charts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
    pub url: String,
}

impl Keyed for Repo {
    type Key = String;

    fn key(&self) -> String {
        self.name.clone()
    }
}
