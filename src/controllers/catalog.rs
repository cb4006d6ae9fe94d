//! Chart catalog screen
//!
//! The query is typed freely; searches follow the debounced value. The first
//! search runs on mount with an empty filter, which lists every chart.

use super::Route;
use super::list::ResourceList;
use crate::backend::{BackendResult, SharedBackend};
use crate::debounce::Debouncer;
use crate::effects::{RunOnChange, RunOnce};
use crate::error_channel::ErrorChannel;
use crate::models::ChartListItem;
use std::time::Duration;

/// Search delay when configuration does not say otherwise
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(500);

pub struct CatalogController {
    backend: SharedBackend,
    query: String,
    debouncer: Debouncer<String>,
    search: RunOnChange<String, BackendResult<Vec<ChartListItem>>>,
    list: ResourceList<ChartListItem>,
    mounted: RunOnce,
}

impl CatalogController {
    pub fn new(backend: SharedBackend, errors: ErrorChannel, delay: Duration) -> Self {
        Self {
            backend,
            query: String::new(),
            debouncer: Debouncer::new(String::new(), delay),
            search: RunOnChange::new("search charts"),
            list: ResourceList::new("search charts", errors),
            mounted: RunOnce::new(),
        }
    }

    pub fn mount(&mut self) {
        if self.mounted.begin() {
            self.search_current();
        }
    }

    /// What the user has typed so far
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The query searches are run with
    pub fn debounced_query(&self) -> &str {
        self.debouncer.current()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.debouncer.push(self.query.clone());
    }

    pub fn charts(&self) -> &[ChartListItem] {
        self.list.items()
    }

    pub fn list(&self) -> &ResourceList<ChartListItem> {
        &self.list
    }

    pub fn is_loading(&self) -> bool {
        self.list.is_loading()
    }

    pub fn toggle(&mut self, name: String) {
        self.list.toggle(name);
    }

    pub fn select(&mut self, name: String) {
        self.list.select(name);
    }

    /// Where opening the selected chart leads
    pub fn selected_chart_route(&self) -> Option<Route> {
        self.list
            .selected()
            .map(|chart| Route::ChartDetails(chart.name.clone()))
    }

    fn search_current(&mut self) {
        let backend = self.backend.clone();
        let filter = self.debouncer.current().clone();
        let started = self.search.update(&filter, |filter| {
            let filter = filter.clone();
            async move { backend.find_charts_in_repo(&filter).await }
        });
        if started {
            self.list.expect_load();
        }
    }

    pub fn poll(&mut self) -> anyhow::Result<bool> {
        let mut changed = false;
        if self.debouncer.poll() {
            tracing::debug!("Search query settled on {:?}", self.debouncer.current());
            self.search_current();
            changed = true;
        }
        if let Some(result) = self.search.poll() {
            self.list.apply_load(result?);
            changed = true;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockHelmBackend;
    use mockall::predicate::eq;
    use std::sync::Arc;
    use tokio::time::sleep;

    fn chart(name: &str) -> ChartListItem {
        ChartListItem {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            app_version: "1.0.0".to_string(),
            description: String::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_lists_everything() {
        let mut backend = MockHelmBackend::new();
        backend
            .expect_find_charts_in_repo()
            .with(eq(""))
            .times(1)
            .returning(|_| Ok(vec![chart("bitnami/nginx"), chart("bitnami/redis")]));

        let mut catalog =
            CatalogController::new(Arc::new(backend), ErrorChannel::new(), DEFAULT_SEARCH_DELAY);
        catalog.mount();
        catalog.mount();
        assert!(catalog.is_loading());

        sleep(Duration::from_millis(5)).await;
        catalog.poll().unwrap();
        assert_eq!(catalog.charts().len(), 2);
        assert!(!catalog.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_selected_chart_route() {
        let mut backend = MockHelmBackend::new();
        backend
            .expect_find_charts_in_repo()
            .returning(|_| Ok(vec![chart("bitnami/nginx")]));

        let mut catalog =
            CatalogController::new(Arc::new(backend), ErrorChannel::new(), DEFAULT_SEARCH_DELAY);
        catalog.mount();
        sleep(Duration::from_millis(5)).await;
        catalog.poll().unwrap();

        assert_eq!(catalog.selected_chart_route(), None);
        catalog.toggle("bitnami/nginx".to_string());
        assert_eq!(
            catalog.selected_chart_route(),
            Some(Route::ChartDetails("bitnami/nginx".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_waits_for_delay() {
        let mut backend = MockHelmBackend::new();
        backend
            .expect_find_charts_in_repo()
            .with(eq(""))
            .returning(|_| Ok(vec![]));
        backend
            .expect_find_charts_in_repo()
            .with(eq("redis"))
            .times(1)
            .returning(|_| Ok(vec![chart("bitnami/redis")]));

        let mut catalog =
            CatalogController::new(Arc::new(backend), ErrorChannel::new(), DEFAULT_SEARCH_DELAY);
        catalog.mount();
        sleep(Duration::from_millis(5)).await;
        catalog.poll().unwrap();

        catalog.set_query("redis");
        assert_eq!(catalog.query(), "redis");
        assert_eq!(catalog.debounced_query(), "");

        sleep(Duration::from_millis(600)).await;
        assert!(catalog.poll().unwrap());
        assert_eq!(catalog.debounced_query(), "redis");
        sleep(Duration::from_millis(5)).await;
        catalog.poll().unwrap();
        assert_eq!(catalog.charts(), &[chart("bitnami/redis")]);
    }
}
