//! Dashboard state aggregator for the admin screen
//!
//! Composes the user listing, the per-user stats and the tab selection
//! into one view-model. The two resources are fetched independently and
//! tracked through separate tagged states, so either may resolve first
//! without blocking the other's region. Results are applied through epoch
//! tokens; a result arriving for a superseded load is discarded instead
//! of overwriting newer state.

use crate::client::ApiClient;
use crate::filter::FilterState;
use crate::pagination::PaginationState;
use pixelmuse_core::types::{AdminTab, User, UserStats};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifecycle of an independently fetched resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FetchState<T> {
    /// No fetch issued yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded
    Ready(T),
    /// The last fetch failed with a user-readable message
    Failed(String),
}

impl<T> FetchState<T> {
    /// Whether a fetch is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The resolved value, if any
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

/// View-model for the admin dashboard
#[derive(Debug, Default)]
pub struct DashboardState {
    active_tab: AdminTab,
    users: FetchState<Vec<User>>,
    stats: FetchState<Vec<UserStats>>,
    users_epoch: u64,
    stats_epoch: u64,
    pagination: PaginationState,
    filter: FilterState,
}

impl DashboardState {
    /// Create an idle dashboard on the default tab
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected tab
    #[must_use]
    pub const fn active_tab(&self) -> AdminTab {
        self.active_tab
    }

    /// Select a tab
    pub fn set_tab(&mut self, tab: AdminTab) {
        self.active_tab = tab;
    }

    /// State of the user listing resource
    #[must_use]
    pub const fn users(&self) -> &FetchState<Vec<User>> {
        &self.users
    }

    /// State of the stats resource
    #[must_use]
    pub const fn stats(&self) -> &FetchState<Vec<UserStats>> {
        &self.stats
    }

    /// Whether the user listing is loading
    #[must_use]
    pub const fn users_loading(&self) -> bool {
        self.users.is_loading()
    }

    /// Whether the stats are loading
    #[must_use]
    pub const fn stats_loading(&self) -> bool {
        self.stats.is_loading()
    }

    /// Pagination state of the user listing
    #[must_use]
    pub const fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Mutable pagination state
    pub fn pagination_mut(&mut self) -> &mut PaginationState {
        &mut self.pagination
    }

    /// Username filter state
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Mutable username filter state
    pub fn filter_mut(&mut self) -> &mut FilterState {
        &mut self.filter
    }

    /// Begin a user listing load, superseding any in-flight one
    pub fn begin_users_load(&mut self) -> u64 {
        self.users_epoch += 1;
        self.users = FetchState::Loading;
        self.users_epoch
    }

    /// Apply a user listing result for the given epoch
    ///
    /// A stale epoch is discarded; the pagination window is recomputed
    /// from the total row count otherwise.
    pub fn apply_users(&mut self, epoch: u64, users: Vec<User>, total_items: u64) {
        if epoch != self.users_epoch {
            debug!("Discarding stale user listing result (epoch {epoch})");
            return;
        }

        self.users = FetchState::Ready(users);
        self.pagination.set_total_items(total_items);
    }

    /// Record a user listing failure for the given epoch
    pub fn fail_users(&mut self, epoch: u64, message: impl Into<String>) {
        if epoch != self.users_epoch {
            debug!("Discarding stale user listing failure (epoch {epoch})");
            return;
        }

        self.users = FetchState::Failed(message.into());
    }

    /// Begin a stats load, superseding any in-flight one
    pub fn begin_stats_load(&mut self) -> u64 {
        self.stats_epoch += 1;
        self.stats = FetchState::Loading;
        self.stats_epoch
    }

    /// Apply a stats result for the given epoch; stale epochs are discarded
    pub fn apply_stats(&mut self, epoch: u64, stats: Vec<UserStats>) {
        if epoch != self.stats_epoch {
            debug!("Discarding stale stats result (epoch {epoch})");
            return;
        }

        self.stats = FetchState::Ready(stats);
    }

    /// Record a stats failure for the given epoch
    pub fn fail_stats(&mut self, epoch: u64, message: impl Into<String>) {
        if epoch != self.stats_epoch {
            debug!("Discarding stale stats failure (epoch {epoch})");
            return;
        }

        self.stats = FetchState::Failed(message.into());
    }

    /// Users on the current page that pass the username filter
    #[must_use]
    pub fn visible_users(&self) -> Vec<User> {
        self.users
            .value()
            .map(|users| self.filter.apply(users))
            .unwrap_or_default()
    }
}

/// Drives a [`DashboardState`] through the [`ApiClient`]
#[derive(Debug)]
pub struct DashboardController {
    client: ApiClient,
    state: DashboardState,
}

impl DashboardController {
    /// Create a controller over an API client
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: DashboardState::new(),
        }
    }

    /// Current view-model
    #[must_use]
    pub const fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Mutable view-model access
    pub fn state_mut(&mut self) -> &mut DashboardState {
        &mut self.state
    }

    /// Load the user listing for the current page and filter
    pub async fn load_users(&mut self) {
        let page = self.state.pagination().current_page();
        let username = if self.state.filter().is_active() {
            Some(self.state.filter().query().to_string())
        } else {
            None
        };

        let epoch = self.state.begin_users_load();
        match self.client.list_users(page, username.as_deref()).await {
            Ok(response) => {
                let total = u64::try_from(response.total).unwrap_or(0);
                let users = response.users;
                self.state.apply_users(epoch, users, total);
            }
            Err(e) => self.state.fail_users(epoch, e.to_string()),
        }
    }

    /// Load the per-user stats
    pub async fn load_stats(&mut self) {
        let epoch = self.state.begin_stats_load();
        match self.client.user_stats().await {
            Ok(stats) => self.state.apply_stats(epoch, stats),
            Err(e) => self.state.fail_stats(epoch, e.to_string()),
        }
    }

    /// Load both resources concurrently
    ///
    /// The fetches are independent; either may complete first.
    pub async fn refresh(&mut self) {
        let page = self.state.pagination().current_page();
        let username = if self.state.filter().is_active() {
            Some(self.state.filter().query().to_string())
        } else {
            None
        };

        let users_epoch = self.state.begin_users_load();
        let stats_epoch = self.state.begin_stats_load();

        let (users, stats) = tokio::join!(
            self.client.list_users(page, username.as_deref()),
            self.client.user_stats(),
        );

        match users {
            Ok(response) => {
                let total = u64::try_from(response.total).unwrap_or(0);
                self.state.apply_users(users_epoch, response.users, total);
            }
            Err(e) => self.state.fail_users(users_epoch, e.to_string()),
        }

        match stats {
            Ok(stats) => self.state.apply_stats(stats_epoch, stats),
            Err(e) => self.state.fail_stats(stats_epoch, e.to_string()),
        }
    }

    /// Jump to a page and reload the listing
    pub async fn go_to_page(&mut self, page: u32) {
        self.state.pagination_mut().set_page(page);
        self.load_users().await;
    }

    /// Replace the username filter, reset to the first page and reload
    pub async fn set_filter(&mut self, query: impl Into<String>) {
        self.state.filter_mut().set_query(query);
        self.state.pagination_mut().set_page(1);
        self.load_users().await;
    }

    /// Clear the username filter and reload the listing
    pub async fn clear_filter(&mut self) {
        self.state.filter_mut().clear();
        self.state.pagination_mut().set_page(1);
        self.load_users().await;
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn sample_users(count: usize) -> Vec<User> {
        (0..count)
            .map(|i| User {
                id: Uuid::new_v4(),
                email: None,
                username: Some(format!("user{i}")),
                full_name: None,
                created_at: Utc::now(),
                suspended: None,
            })
            .collect()
    }

    fn sample_stats() -> Vec<UserStats> {
        vec![UserStats {
            id: Uuid::new_v4(),
            email: None,
            username: Some("user0".to_string()),
            full_name: None,
            image_count: 3,
        }]
    }

    #[test]
    fn test_starts_idle_on_users_tab() {
        let state = DashboardState::new();
        assert_eq!(state.active_tab(), AdminTab::Users);
        assert_eq!(*state.users(), FetchState::Idle);
        assert_eq!(*state.stats(), FetchState::Idle);
        assert!(!state.users_loading());
        assert!(!state.stats_loading());
    }

    #[test]
    fn test_tab_selection() {
        let mut state = DashboardState::new();
        state.set_tab(AdminTab::Stats);
        assert_eq!(state.active_tab(), AdminTab::Stats);
    }

    #[test]
    fn test_load_cycle_updates_pagination() {
        let mut state = DashboardState::new();

        let epoch = state.begin_users_load();
        assert!(state.users_loading());

        state.apply_users(epoch, sample_users(10), 42);
        assert!(!state.users_loading());
        assert_eq!(state.users().value().map(Vec::len), Some(10));
        assert_eq!(state.pagination().total_pages(), 5);
    }

    #[test]
    fn test_stale_users_result_is_discarded() {
        let mut state = DashboardState::new();

        let first = state.begin_users_load();
        let second = state.begin_users_load();

        // The first load resolves after being superseded
        state.apply_users(first, sample_users(3), 3);
        assert!(state.users_loading());

        state.apply_users(second, sample_users(5), 5);
        assert_eq!(state.users().value().map(Vec::len), Some(5));
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut state = DashboardState::new();

        let first = state.begin_users_load();
        let second = state.begin_users_load();

        state.fail_users(first, "late failure");
        assert!(state.users_loading());

        state.apply_users(second, sample_users(1), 1);
        assert!(state.users().error().is_none());
    }

    #[test]
    fn test_resources_load_independently() {
        let mut state = DashboardState::new();

        let users_epoch = state.begin_users_load();
        let stats_epoch = state.begin_stats_load();
        assert!(state.users_loading());
        assert!(state.stats_loading());

        // Stats may resolve while users are still in flight
        state.apply_stats(stats_epoch, sample_stats());
        assert!(state.users_loading());
        assert!(!state.stats_loading());

        state.fail_users(users_epoch, "network error");
        assert_eq!(state.users().error(), Some("network error"));
        assert_eq!(state.stats().value().map(Vec::len), Some(1));
    }

    #[test]
    fn test_empty_result_collapses_pagination() {
        let mut state = DashboardState::new();
        state.pagination_mut().set_total_items(50);
        state.pagination_mut().set_page(5);

        let epoch = state.begin_users_load();
        state.apply_users(epoch, Vec::new(), 0);

        assert_eq!(state.pagination().total_pages(), 1);
        assert_eq!(state.pagination().current_page(), 1);
    }

    #[test]
    fn test_visible_users_respects_filter() {
        let mut state = DashboardState::new();
        let epoch = state.begin_users_load();
        state.apply_users(epoch, sample_users(5), 5);

        state.filter_mut().set_query("user1");
        let visible = state.visible_users();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.first().and_then(|u| u.username.clone()), Some("user1".to_string()));
    }

    #[test]
    fn test_visible_users_empty_before_first_load() {
        let state = DashboardState::new();
        assert!(state.visible_users().is_empty());
    }
}
