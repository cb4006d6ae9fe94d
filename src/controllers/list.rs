//! Generic list controller
//!
//! Shared by every list view. Holds one backend collection, at most one
//! selected identity, and the in-flight load, mutation and refresh calls.
//!
//! Phase transitions:
//! - `Idle -> Loading -> Loaded` on the first load
//! - `Loaded -> Mutating -> Loaded` for delete / uninstall
//! - `Loaded -> Refreshing -> Loaded` for bulk refresh actions
//!
//! A failed load still ends in `Loaded`, keeping the previous collection.

use crate::backend::BackendResult;
use crate::effects::{Pending, take_ready};
use crate::error_channel::ErrorChannel;
use crate::models::Keyed;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    Mutating,
    Refreshing,
}

#[derive(Debug)]
pub struct ResourceList<T: Keyed> {
    label: &'static str,
    errors: ErrorChannel,
    items: Vec<T>,
    selected: Option<T::Key>,
    loaded: bool,
    load: Option<Pending<BackendResult<Vec<T>>>>,
    /// Set while a load driven from outside this list is in flight
    awaiting_load: bool,
    /// Identities removed after the current load was started
    removed_during_load: Vec<T::Key>,
    mutation: Option<(T::Key, Pending<BackendResult<()>>)>,
    refresh: Option<Pending<BackendResult<()>>>,
}

impl<T> ResourceList<T>
where
    T: Keyed + Send + 'static,
{
    pub fn new(label: &'static str, errors: ErrorChannel) -> Self {
        Self {
            label,
            errors,
            items: Vec::new(),
            selected: None,
            loaded: false,
            load: None,
            awaiting_load: false,
            removed_during_load: Vec::new(),
            mutation: None,
            refresh: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn errors(&self) -> &ErrorChannel {
        &self.errors
    }

    pub fn phase(&self) -> ListPhase {
        if self.mutation.is_some() {
            ListPhase::Mutating
        } else if self.refresh.is_some() {
            ListPhase::Refreshing
        } else if self.is_loading() {
            ListPhase::Loading
        } else if self.loaded {
            ListPhase::Loaded
        } else {
            ListPhase::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_some() || self.awaiting_load
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fetch the whole collection, replacing any load still in flight
    pub fn start_load<Fut>(&mut self, fetch: Fut)
    where
        Fut: Future<Output = BackendResult<Vec<T>>> + Send + 'static,
    {
        if self.load.is_some() {
            tracing::debug!("Replacing in-flight {} load", self.label);
        }
        self.removed_during_load.clear();
        self.load = Some(Pending::spawn(self.label, fetch));
    }

    /// Note that a load started elsewhere will be handed to [`apply_load`]
    ///
    /// [`apply_load`]: ResourceList::apply_load
    pub fn expect_load(&mut self) {
        self.removed_during_load.clear();
        self.awaiting_load = true;
    }

    /// Apply a finished fetch
    pub fn apply_load(&mut self, result: BackendResult<Vec<T>>) {
        self.awaiting_load = false;
        self.loaded = true;
        let tombstones = std::mem::take(&mut self.removed_during_load);

        match result {
            Ok(items) => {
                self.items = items
                    .into_iter()
                    .filter(|item| !tombstones.contains(&item.key()))
                    .collect();
                tracing::debug!("Loaded {} {} items", self.items.len(), self.label);

                if let Some(key) = &self.selected
                    && !self.items.iter().any(|item| &item.key() == key)
                {
                    tracing::debug!("Selected {:?} is gone after reload", key);
                    self.selected = None;
                }
            }
            Err(e) => {
                tracing::warn!("Loading {} failed: {}", self.label, e);
                self.errors.report_error(&e);
            }
        }
    }

    pub fn selected_key(&self) -> Option<&T::Key> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&T> {
        let key = self.selected.as_ref()?;
        self.items.iter().find(|item| &item.key() == key)
    }

    pub fn is_selected(&self, item: &T) -> bool {
        self.selected.as_ref() == Some(&item.key())
    }

    pub fn select(&mut self, key: T::Key) {
        self.selected = Some(key);
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Select `key`, or clear the selection if it is already selected
    pub fn toggle(&mut self, key: T::Key) {
        if self.selected.as_ref() == Some(&key) {
            self.selected = None;
        } else {
            self.selected = Some(key);
        }
    }

    pub fn is_mutating(&self) -> bool {
        self.mutation.is_some()
    }

    /// Run `action` against the selected item
    ///
    /// The selection is cleared right away. The item is removed only once the
    /// backend confirms. Refused when nothing is selected or another mutation
    /// is still running.
    pub fn start_mutation<F, Fut>(&mut self, label: &'static str, action: F) -> bool
    where
        F: FnOnce(T::Key) -> Fut,
        Fut: Future<Output = BackendResult<()>> + Send + 'static,
    {
        if self.mutation.is_some() {
            tracing::debug!("Ignoring {}: a mutation is already running", label);
            return false;
        }
        let Some(key) = self.selected.take() else {
            return false;
        };
        tracing::debug!("Starting {} of {:?}", label, key);
        let pending = Pending::spawn(label, action(key.clone()));
        self.mutation = Some((key, pending));
        true
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_some()
    }

    /// Delegate a bulk refresh; the list itself is not reloaded
    pub fn start_refresh<Fut>(&mut self, label: &'static str, refresh: Fut) -> bool
    where
        Fut: Future<Output = BackendResult<()>> + Send + 'static,
    {
        if self.refresh.is_some() {
            tracing::debug!("Ignoring {}: already running", label);
            return false;
        }
        self.refresh = Some(Pending::spawn(label, refresh));
        true
    }

    /// Apply whatever has finished; returns whether anything changed
    pub fn poll(&mut self) -> anyhow::Result<bool> {
        let mut changed = false;

        if let Some(result) = take_ready(&mut self.load) {
            self.apply_load(result?);
            changed = true;
        }

        if let Some(result) = self.mutation.as_mut().and_then(|(_, p)| p.try_take()) {
            let Some((key, pending)) = self.mutation.take() else {
                return Ok(changed);
            };
            match result? {
                Ok(()) => {
                    tracing::info!("{} of {:?} succeeded", pending.label(), key);
                    self.items.retain(|item| item.key() != key);
                    if self.is_loading() {
                        self.removed_during_load.push(key);
                    }
                }
                Err(e) => {
                    tracing::warn!("{} of {:?} failed: {}", pending.label(), key, e);
                    self.errors.report_error(&e);
                }
            }
            changed = true;
        }

        if let Some(result) = self.refresh.as_mut().and_then(|p| p.try_take()) {
            let label = self.refresh.take().map(|p| p.label()).unwrap_or(self.label);
            match result? {
                Ok(()) => tracing::info!("{} finished", label),
                Err(e) => {
                    tracing::warn!("{} failed: {}", label, e);
                    self.errors.report_error(&e);
                }
            }
            changed = true;
        }

        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(&'static str);

    impl Keyed for Item {
        type Key = &'static str;

        fn key(&self) -> &'static str {
            self.0
        }
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    async fn loaded(items: Vec<Item>) -> ResourceList<Item> {
        let mut list = ResourceList::new("items", ErrorChannel::new());
        list.start_load(async move { Ok(items) });
        settle().await;
        list.poll().unwrap();
        list
    }

    #[tokio::test]
    async fn test_phases_of_first_load() {
        let mut list: ResourceList<Item> = ResourceList::new("items", ErrorChannel::new());
        assert_eq!(list.phase(), ListPhase::Idle);

        let (tx, rx) = oneshot::channel::<()>();
        list.start_load(async move {
            let _ = rx.await;
            Ok(vec![Item("a")])
        });
        assert_eq!(list.phase(), ListPhase::Loading);

        tx.send(()).unwrap();
        settle().await;
        assert!(list.poll().unwrap());
        assert_eq!(list.phase(), ListPhase::Loaded);
        assert_eq!(list.items(), &[Item("a")]);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_items() {
        let mut list = loaded(vec![Item("a"), Item("b")]).await;
        list.start_load(async { Err(BackendError::Command("boom".to_string())) });
        settle().await;
        list.poll().unwrap();

        assert_eq!(list.phase(), ListPhase::Loaded);
        assert_eq!(list.items().len(), 2);
        assert_eq!(list.errors().message().as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn test_toggle_selection() {
        let mut list = loaded(vec![Item("x"), Item("y")]).await;

        list.toggle("x");
        list.toggle("x");
        assert!(list.selected().is_none());

        list.toggle("x");
        list.toggle("y");
        assert_eq!(list.selected(), Some(&Item("y")));

        list.deselect();
        assert!(list.selected_key().is_none());
    }

    #[tokio::test]
    async fn test_mutation_removes_item_after_confirmation() {
        let mut list = loaded(vec![Item("x"), Item("y")]).await;
        list.select("x");

        let (tx, rx) = oneshot::channel::<()>();
        assert!(list.start_mutation("delete", |_| async move {
            let _ = rx.await;
            Ok(())
        }));
        assert_eq!(list.phase(), ListPhase::Mutating);
        // deselected immediately, still listed until confirmed
        assert!(list.selected().is_none());
        assert_eq!(list.items().len(), 2);

        tx.send(()).unwrap();
        settle().await;
        list.poll().unwrap();
        assert_eq!(list.items(), &[Item("y")]);
        assert_eq!(list.phase(), ListPhase::Loaded);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_items_unchanged() {
        let mut list = loaded(vec![Item("x"), Item("y")]).await;
        list.select("x");
        list.start_mutation("delete", |_| async {
            Err(BackendError::Command("forbidden".to_string()))
        });
        settle().await;
        list.poll().unwrap();

        assert_eq!(list.items(), &[Item("x"), Item("y")]);
        assert!(list.selected().is_none());
        assert_eq!(list.errors().message().as_deref(), Some("forbidden"));
    }

    #[tokio::test]
    async fn test_one_mutation_at_a_time() {
        let mut list = loaded(vec![Item("x"), Item("y")]).await;
        let (_tx, rx) = oneshot::channel::<()>();

        list.select("x");
        assert!(list.start_mutation("delete", |_| async move {
            let _ = rx.await;
            Ok(())
        }));
        list.select("y");
        assert!(!list.start_mutation("delete", |_| async { Ok(()) }));
        // the refused request keeps its selection
        assert_eq!(list.selected_key(), Some(&"y"));
    }

    #[tokio::test]
    async fn test_mutation_needs_selection() {
        let mut list = loaded(vec![Item("x")]).await;
        assert!(!list.start_mutation("delete", |_| async { Ok(()) }));
        assert_eq!(list.phase(), ListPhase::Loaded);
    }

    #[tokio::test]
    async fn test_stale_load_cannot_resurrect_removed_item() {
        let mut list = loaded(vec![Item("x"), Item("y")]).await;

        let (load_tx, load_rx) = oneshot::channel::<()>();
        list.start_load(async move {
            let _ = load_rx.await;
            // fetched before the delete reached the backend
            Ok(vec![Item("x"), Item("y")])
        });
        list.select("x");
        list.start_mutation("delete", |_| async { Ok(()) });
        settle().await;
        list.poll().unwrap();
        assert_eq!(list.items(), &[Item("y")]);

        load_tx.send(()).unwrap();
        settle().await;
        list.poll().unwrap();
        assert_eq!(list.items(), &[Item("y")]);
    }

    #[tokio::test]
    async fn test_reload_drops_missing_selection() {
        let mut list = loaded(vec![Item("x"), Item("y")]).await;
        list.select("x");
        list.start_load(async { Ok(vec![Item("y")]) });
        settle().await;
        list.poll().unwrap();
        assert!(list.selected_key().is_none());

        list.select("y");
        list.start_load(async { Ok(vec![Item("y"), Item("z")]) });
        settle().await;
        list.poll().unwrap();
        assert_eq!(list.selected_key(), Some(&"y"));
    }

    #[tokio::test]
    async fn test_refresh_reports_failure_without_reloading() {
        let mut list = loaded(vec![Item("x")]).await;
        assert!(list.start_refresh("refresh", async {
            Err(BackendError::Command("index unreachable".to_string()))
        }));
        assert_eq!(list.phase(), ListPhase::Refreshing);
        assert!(!list.start_refresh("refresh", async { Ok(()) }));

        settle().await;
        list.poll().unwrap();
        assert_eq!(list.phase(), ListPhase::Loaded);
        assert_eq!(list.items(), &[Item("x")]);
        assert_eq!(
            list.errors().message().as_deref(),
            Some("index unreachable")
        );
    }

    #[tokio::test]
    async fn test_externally_driven_load() {
        let mut list: ResourceList<Item> = ResourceList::new("items", ErrorChannel::new());
        list.expect_load();
        assert_eq!(list.phase(), ListPhase::Loading);
        list.apply_load(Ok(vec![Item("a")]));
        assert_eq!(list.phase(), ListPhase::Loaded);
    }
}
