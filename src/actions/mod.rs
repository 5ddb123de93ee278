//! Dashboard Action Set
//!
//! One method per user-triggered operation. Pure state mutations write the
//! tree directly; everything remote goes through exactly one API call, with
//! optimistic mutation and snapshot rollback where the UI expects immediate
//! feedback.

mod fetch;
mod mutate;

use crate::api::DashboardApi;
use crate::api::error::ApiError;
use crate::consts::dashboard_consts::storage_keys;
use crate::download::Archiver;
use crate::environment::Environment;
use crate::notifications::Notifier;
use crate::session::SessionGuard;
use crate::state::{DashboardState, OrderBy, Page, ViewMode};
use crate::storage::KeyValueStore;
use uuid::Uuid;

/// Effect handles the dashboard actions call out to.
pub struct Effects {
    pub api: Box<dyn DashboardApi>,
    pub storage: Box<dyn KeyValueStore>,
    pub notifier: Box<dyn Notifier>,
    pub session: Box<dyn SessionGuard>,
    pub archiver: Box<dyn Archiver>,
}

/// Owns the dashboard state tree and the effect handles the actions need.
///
/// Created once at application start; the observing UI reads the tree via
/// [`Dashboard::state`] and re-renders after each action.
pub struct Dashboard {
    state: DashboardState,
    effects: Effects,
    environment: Environment,
    client_id: String,
}

impl Dashboard {
    pub fn new(effects: Effects, environment: Environment) -> Self {
        Dashboard {
            state: DashboardState::default(),
            effects,
            environment,
            client_id: Uuid::new_v4().to_string(),
        }
    }

    /// Read access for the observing UI.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Restores persisted preferences when the dashboard mounts.
    pub fn dashboard_mounted(&mut self) {
        if let Some(mode) = self
            .effects
            .storage
            .get(storage_keys::VIEW_MODE)
            .and_then(|m| m.parse::<ViewMode>().ok())
        {
            self.state.view_mode = mode;
        }
        if let Some(team) = self.effects.storage.get(storage_keys::TEAM_ID) {
            if !team.is_empty() {
                self.state.active_team = Some(team);
            }
        }
    }

    pub fn sandboxes_selected(&mut self, sandbox_ids: Vec<String>) {
        self.state.selected_sandboxes = sandbox_ids;
    }

    pub fn set_trash_sandboxes(&mut self, sandbox_ids: Vec<String>) {
        self.state.trash_sandbox_ids = sandbox_ids;
    }

    /// Switches the active team and invalidates every team-scoped category.
    /// Selecting the already-active team changes nothing.
    pub fn set_active_team(&mut self, id: Option<String>) {
        if id == self.state.active_team {
            return;
        }

        self.state.active_team = id.clone();
        self.effects
            .storage
            .set(storage_keys::TEAM_ID, id.as_deref().unwrap_or_default());
        self.state.sandboxes.invalidate_team_scoped();
    }

    pub fn drag_changed(&mut self, is_dragging: bool) {
        self.state.is_dragging = is_dragging;
    }

    pub fn order_by_changed(&mut self, order_by: OrderBy) {
        self.state.order_by = order_by;
    }

    pub fn blacklisted_template_added(&mut self, template: String) {
        self.state.filters.blacklisted_templates.push(template);
    }

    pub fn blacklisted_template_removed(&mut self, template: &str) {
        self.state
            .filters
            .blacklisted_templates
            .retain(|current| current != template);
    }

    pub fn blacklisted_templates_cleared(&mut self) {
        self.state.filters.blacklisted_templates.clear();
    }

    pub fn blacklisted_templates_changed(&mut self, templates: Vec<String>) {
        self.state.filters.blacklisted_templates = templates;
    }

    pub fn search_changed(&mut self, search: String) {
        self.state.filters.search = search;
    }

    pub fn view_mode_changed(&mut self, mode: ViewMode) {
        self.state.view_mode = mode;
        self.effects
            .storage
            .set(storage_keys::VIEW_MODE, &mode.to_string());
    }

    /// Routes a page visit to the matching fetch. `location_search` is the
    /// query string of the current navigation location; only the search page
    /// reads it.
    pub async fn get_page(&mut self, page: Page, location_search: &str) {
        match page {
            Page::Recent => self.get_recent_sandboxes().await,
            Page::StartPage => self.get_start_page_sandboxes().await,
            Page::Deleted => self.get_deleted_sandboxes().await,
            Page::Drafts => self.get_drafts().await,
            Page::Templates => self.get_template_sandboxes().await,
            Page::Search => {
                let query = query_param(location_search, "query").unwrap_or_default();
                self.get_search_sandboxes(&query).await;
            }
            _ => {}
        }
    }

    /// Raises the user-visible notice for a failed action and keeps the
    /// underlying error in the log.
    fn report_error(&self, message: &str, err: &ApiError) {
        log::warn!("{}: {}", message, err);
        self.effects.notifier.error(message);
    }
}

/// Extracts a parameter from a URL query string such as `?query=foo&x=1`.
fn query_param(location_search: &str, name: &str) -> Option<String> {
    location_search
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| {
                urlencoding::decode(value)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| value.to_string())
            })
        })
}


#[cfg(test)]
mod tests {
    use super::testutil::{dashboard_with, sandbox};
    use super::*;
    use crate::api::MockDashboardApi;

    #[test]
    fn test_set_active_team_invalidates_team_scoped_categories() {
        let (mut dashboard, _toasts) = dashboard_with(MockDashboardApi::new());
        dashboard.state.sandboxes.recent = Some(vec![sandbox("a")]);
        dashboard.state.sandboxes.deleted = Some(vec![sandbox("b")]);

        dashboard.set_active_team(Some("team-1".to_string()));

        assert!(dashboard.state().sandboxes.recent.is_none());
        assert!(dashboard.state().sandboxes.deleted.is_some());
        assert_eq!(dashboard.state().active_team.as_deref(), Some("team-1"));
    }

    #[test]
    fn test_set_active_team_same_team_is_a_no_op() {
        let (mut dashboard, _toasts) = dashboard_with(MockDashboardApi::new());
        dashboard.set_active_team(Some("team-1".to_string()));
        dashboard.state.sandboxes.recent = Some(vec![sandbox("a")]);

        let before = dashboard.state().clone();
        dashboard.set_active_team(Some("team-1".to_string()));

        assert_eq!(dashboard.state(), &before);
        assert!(dashboard.state().sandboxes.recent.is_some());
    }

    #[test]
    fn test_set_active_team_persists_team_id() {
        let (mut dashboard, _toasts) = dashboard_with(MockDashboardApi::new());
        dashboard.set_active_team(Some("team-9".to_string()));

        assert_eq!(
            dashboard.effects.storage.get(storage_keys::TEAM_ID),
            Some("team-9".to_string())
        );
    }

    #[test]
    fn test_view_mode_changed_persists_mode() {
        let (mut dashboard, _toasts) = dashboard_with(MockDashboardApi::new());
        dashboard.view_mode_changed(ViewMode::List);

        assert_eq!(dashboard.state().view_mode, ViewMode::List);
        assert_eq!(
            dashboard.effects.storage.get(storage_keys::VIEW_MODE),
            Some("list".to_string())
        );
    }

    #[test]
    fn test_dashboard_mounted_restores_persisted_preferences() {
        let (mut dashboard, _toasts) = dashboard_with(MockDashboardApi::new());
        dashboard.effects.storage.set(storage_keys::VIEW_MODE, "list");
        dashboard.effects.storage.set(storage_keys::TEAM_ID, "team-3");

        dashboard.dashboard_mounted();

        assert_eq!(dashboard.state().view_mode, ViewMode::List);
        assert_eq!(dashboard.state().active_team.as_deref(), Some("team-3"));
    }

    #[test]
    fn test_dashboard_mounted_ignores_garbage_view_mode() {
        let (mut dashboard, _toasts) = dashboard_with(MockDashboardApi::new());
        dashboard
            .effects
            .storage
            .set(storage_keys::VIEW_MODE, "tiles");

        dashboard.dashboard_mounted();

        assert_eq!(dashboard.state().view_mode, ViewMode::Grid);
    }

    #[test]
    fn test_blacklist_edits() {
        let (mut dashboard, _toasts) = dashboard_with(MockDashboardApi::new());
        dashboard.blacklisted_template_added("node".to_string());
        dashboard.blacklisted_template_added("react".to_string());
        dashboard.blacklisted_template_removed("node");

        assert_eq!(
            dashboard.state().filters.blacklisted_templates,
            vec!["react".to_string()]
        );

        dashboard.blacklisted_templates_cleared();
        assert!(dashboard.state().filters.blacklisted_templates.is_empty());

        dashboard.blacklisted_templates_changed(vec!["vue".to_string()]);
        assert_eq!(
            dashboard.state().filters.blacklisted_templates,
            vec!["vue".to_string()]
        );
    }

    #[test]
    fn test_query_param_extraction() {
        assert_eq!(
            query_param("?query=foo%20bar&page=2", "query"),
            Some("foo bar".to_string())
        );
        assert_eq!(query_param("query=foo", "query"), Some("foo".to_string()));
        assert_eq!(query_param("?page=2", "query"), None);
        assert_eq!(query_param("", "query"), None);
    }

    #[tokio::test]
    async fn test_get_page_ignores_non_fetchable_categories() {
        // The API mock has no expectations; any call would panic.
        let (mut dashboard, _toasts) = dashboard_with(MockDashboardApi::new());
        dashboard.get_page(Page::All, "").await;
        dashboard.get_page(Page::TemplateStartPage, "").await;
        dashboard.get_page(Page::RecentStartPage, "").await;
    }
}
