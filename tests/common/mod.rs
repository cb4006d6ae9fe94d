//! Shared test support: an in-memory helm backend
//!
//! Behaves like a small helm installation. Every call is recorded as a short
//! string so tests can assert on what reached the backend and in which order.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::DateTime;
use helmdeck::backend::{BackendError, BackendResult, HelmBackend};
use helmdeck::models::{
    ChartDetails, ChartInfo, ChartListItem, InstallChartRequest, Release, Repo,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<String>>,
    releases: Mutex<Vec<Release>>,
    repos: Mutex<Vec<Repo>>,
    charts: Vec<ChartListItem>,
    /// Operation name -> error message returned instead of succeeding
    failures: Mutex<HashMap<&'static str, String>>,
    delay: Duration,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_releases(self, releases: Vec<Release>) -> Self {
        *self.releases.lock().unwrap() = releases;
        self
    }

    pub fn with_repos(self, repos: Vec<Repo>) -> Self {
        *self.repos.lock().unwrap() = repos;
        self
    }

    pub fn with_charts(mut self, charts: Vec<ChartListItem>) -> Self {
        self.charts = charts;
        self
    }

    /// Every call takes `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Make `operation` fail with `message` until [`succeed`](Self::succeed)
    pub fn fail(&self, operation: &'static str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(operation, message.to_string());
    }

    pub fn succeed(&self, operation: &'static str) {
        self.failures.lock().unwrap().remove(operation);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, operation: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.split(' ').next() == Some(operation))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn releases(&self) -> Vec<Release> {
        self.releases.lock().unwrap().clone()
    }

    pub fn repos_snapshot(&self) -> Vec<Repo> {
        self.repos.lock().unwrap().clone()
    }

    async fn call(&self, operation: &'static str, args: &[&str]) -> BackendResult<()> {
        let mut line = operation.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().unwrap().push(line);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.failures.lock().unwrap().get(operation) {
            Some(message) => Err(BackendError::Command(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl HelmBackend for FakeBackend {
    async fn list_releases(&self) -> BackendResult<Vec<Release>> {
        self.call("list_releases", &[]).await?;
        Ok(self.releases())
    }

    async fn repos(&self) -> BackendResult<Vec<Repo>> {
        self.call("repos", &[]).await?;
        Ok(self.repos_snapshot())
    }

    async fn version(&self) -> BackendResult<String> {
        self.call("version", &[]).await?;
        Ok("v3.14.2".to_string())
    }

    async fn delete_repository(&self, name: &str) -> BackendResult<()> {
        self.call("delete_repository", &[name]).await?;
        self.repos.lock().unwrap().retain(|r| r.name != name);
        Ok(())
    }

    async fn add_repository(&self, name: &str, url: &str) -> BackendResult<()> {
        self.call("add_repository", &[name, url]).await?;
        self.repos.lock().unwrap().push(repo(name, url));
        Ok(())
    }

    async fn update_repository(&self, old_name: &str, name: &str, url: &str) -> BackendResult<()> {
        self.call("update_repository", &[old_name, name, url]).await?;
        let mut repos = self.repos.lock().unwrap();
        repos.retain(|r| r.name != old_name);
        repos.push(repo(name, url));
        Ok(())
    }

    async fn refresh_repositories(&self) -> BackendResult<()> {
        self.call("refresh_repositories", &[]).await
    }

    async fn find_charts_in_repo(&self, filter: &str) -> BackendResult<Vec<ChartListItem>> {
        self.call("find_charts_in_repo", &[filter]).await?;
        Ok(self
            .charts
            .iter()
            .filter(|c| c.name.contains(filter))
            .cloned()
            .collect())
    }

    async fn get_chart_details(&self, name: &str) -> BackendResult<ChartDetails> {
        self.call("get_chart_details", &[name]).await?;
        Ok(ChartDetails {
            info: ChartInfo {
                name: name.to_string(),
                version: "1.0.0".to_string(),
                ..Default::default()
            },
            readme: format!("# {}", name),
            values: "replicaCount: 1\n".to_string(),
        })
    }

    async fn install_chart(&self, request: &InstallChartRequest) -> BackendResult<()> {
        let values = request.values.as_deref().unwrap_or("-");
        self.call(
            "install_chart",
            &[
                request.name.as_str(),
                request.chart_name.as_str(),
                request.namespace.as_str(),
                values,
            ],
        )
        .await?;
        self.releases.lock().unwrap().push(release(&request.name, &request.namespace));
        Ok(())
    }

    async fn uninstall_chart(&self, release_name: &str, namespace: &str) -> BackendResult<()> {
        self.call("uninstall_chart", &[release_name, namespace]).await?;
        self.releases
            .lock()
            .unwrap()
            .retain(|r| !(r.name == release_name && r.namespace == namespace));
        Ok(())
    }

    async fn get_values(&self, release_name: &str, namespace: &str) -> BackendResult<String> {
        self.call("get_values", &[release_name, namespace]).await?;
        Ok(format!("# values of {}/{}\n", namespace, release_name))
    }
}

pub fn release(name: &str, namespace: &str) -> Release {
    Release {
        name: name.to_string(),
        namespace: namespace.to_string(),
        revision: "1".to_string(),
        updated: DateTime::parse_from_rfc3339("2024-03-01T10:00:00+00:00").unwrap(),
        status: "deployed".to_string(),
        chart: format!("{}-1.0.0", name),
        app_version: "1.0.0".to_string(),
    }
}

pub fn repo(name: &str, url: &str) -> Repo {
    Repo {
        name: name.to_string(),
        url: url.to_string(),
    }
}

pub fn chart(name: &str) -> ChartListItem {
    ChartListItem {
        name: name.to_string(),
        version: "1.0.0".to_string(),
        app_version: "1.0.0".to_string(),
        description: format!("{} chart", name),
    }
}

/// Give spawned backend calls a chance to finish
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}
