//! Fetch-and-populate actions for the sandbox categories.
//!
//! Every fetch runs behind the session guard, issues exactly one API call,
//! and writes the filtered result into its category. Failures leave the
//! category untouched and raise a toast; there are no retries.

use super::Dashboard;
use crate::consts::dashboard_consts::{DRAFTS_FOLDER_ID, fetch_limits};
use crate::search::SearchIndex;
use crate::state::{Folder, Sandbox};
use std::collections::BTreeMap;

impl Dashboard {
    /// Loads the RECENT category: requests a large window upstream, keeps
    /// only the active team's sandboxes, and truncates for display.
    pub async fn get_recent_sandboxes(&mut self) {
        if !self.effects.session.ensure_loaded().await {
            return;
        }
        let order_by = self.state.order_by.clone();
        match self
            .effects
            .api
            .recent_sandboxes(fetch_limits::RECENT_REQUEST_LIMIT, &order_by)
            .await
        {
            Ok(sandboxes) => {
                let team = self.state.active_team.clone();
                let recent: Vec<Sandbox> = sandboxes
                    .into_iter()
                    .filter(|sandbox| sandbox.belongs_to_team(team.as_deref()))
                    .take(fetch_limits::RECENT_KEPT)
                    .collect();
                self.state.sandboxes.recent = Some(recent);
            }
            Err(err) => {
                self.report_error("There was a problem getting your recent sandboxes", &err)
            }
        }
    }

    /// Loads the DRAFTS category from the root collection.
    pub async fn get_drafts(&mut self) {
        if !self.effects.session.ensure_loaded().await {
            return;
        }
        match self
            .effects
            .api
            .sandboxes_by_path("/", self.state.active_team.clone())
            .await
        {
            Ok(sandboxes) => {
                let drafts: Vec<Sandbox> = sandboxes
                    .into_iter()
                    .filter(|sandbox| !sandbox.is_custom_template)
                    .collect();
                self.state.sandboxes.drafts = Some(drafts);
            }
            Err(err) => self.report_error("There was a problem getting your sandboxes", &err),
        }
    }

    /// Loads one folder of the ALL category. The list is stored under the
    /// whitespace-cleaned path.
    pub async fn get_sandboxes_by_path(&mut self, path: &str) {
        if !self.effects.session.ensure_loaded().await {
            return;
        }
        let clean_path = path.replace(' ', "");
        match self
            .effects
            .api
            .sandboxes_by_path(&format!("/{path}"), self.state.active_team.clone())
            .await
        {
            Ok(sandboxes) => {
                let filtered: Vec<Sandbox> = sandboxes
                    .into_iter()
                    .filter(|sandbox| !sandbox.is_custom_template)
                    .collect();
                self.state
                    .sandboxes
                    .all
                    .get_or_insert_with(BTreeMap::new)
                    .insert(clean_path, filtered);
            }
            Err(err) => self.report_error("There was a problem getting your sandboxes", &err),
        }
    }

    /// Loads the DELETED category.
    pub async fn get_deleted_sandboxes(&mut self) {
        if !self.effects.session.ensure_loaded().await {
            return;
        }
        match self.effects.api.deleted_sandboxes().await {
            Ok(sandboxes) => self.state.sandboxes.deleted = Some(sandboxes),
            Err(err) => {
                self.report_error("There was a problem getting your deleted sandboxes", &err)
            }
        }
    }

    /// Loads the TEMPLATES category: the active team's templates, or the
    /// user's own when no team is selected.
    pub async fn get_template_sandboxes(&mut self) {
        if !self.effects.session.ensure_loaded().await {
            return;
        }
        self.state.sandboxes.templates = None;
        let result = match self.state.active_team.clone() {
            Some(team) => self.effects.api.team_templates(&team).await,
            None => self.effects.api.owned_templates(false).await,
        };
        match result {
            Ok(templates) => self.state.sandboxes.templates = Some(templates),
            Err(err) => self.report_error("There was a problem getting your templates", &err),
        }
    }

    /// Loads both start-page categories: a handful of recently used
    /// templates, then a short recents list.
    pub async fn get_start_page_sandboxes(&mut self) {
        if !self.effects.session.ensure_loaded().await {
            return;
        }
        match self.effects.api.recently_used_templates().await {
            Ok(mut templates) => {
                templates.truncate(fetch_limits::START_PAGE_TEMPLATES);
                self.state.sandboxes.template_start_page = Some(templates);
            }
            Err(err) => {
                self.report_error("There was a problem getting your sandboxes", &err);
                return;
            }
        }

        let order_by = self.state.order_by.clone();
        match self
            .effects
            .api
            .recent_sandboxes(fetch_limits::START_PAGE_RECENT, &order_by)
            .await
        {
            Ok(recent) => self.state.sandboxes.recent_start_page = Some(recent),
            Err(err) => self.report_error("There was a problem getting your sandboxes", &err),
        }
    }

    /// Loads the folder listing, prepending the synthetic drafts entry whose
    /// count mirrors the root collection.
    pub async fn get_all_folders(&mut self) {
        if !self.effects.session.ensure_loaded().await {
            return;
        }
        let team = self.state.active_team.clone();
        match self.effects.api.collections(team).await {
            Ok(collections) => {
                let root_count = collections
                    .iter()
                    .find(|collection| collection.path == "/")
                    .map(|collection| collection.sandbox_count)
                    .unwrap_or(0);

                let mut folders = vec![Folder {
                    id: DRAFTS_FOLDER_ID.to_string(),
                    path: "/drafts".to_string(),
                    parent: String::new(),
                    level: 0,
                    name: "Drafts".to_string(),
                    sandboxes: root_count,
                }];
                folders.extend(collections.into_iter().filter_map(|collection| {
                    if collection.id.is_empty() {
                        return None;
                    }
                    let folder =
                        Folder::from_path(collection.id, &collection.path, collection.sandbox_count);
                    (!folder.name.is_empty()).then_some(folder)
                }));

                self.state.all_collections = Some(folders);
            }
            Err(err) => self.report_error("There was a problem getting your sandboxes", &err),
        }
    }

    /// Loads the teams the signed-in user belongs to.
    pub async fn get_teams(&mut self) {
        if self.effects.session.current_user().is_none() {
            return;
        }
        match self.effects.api.teams().await {
            Ok(teams) => self.state.teams = teams,
            Err(err) => self.report_error("There was a problem getting your teams", &err),
        }
    }

    /// Loads the SEARCH category: fetches the candidate set, ranks it with
    /// the weighted fuzzy index, then applies the team, template, and
    /// blacklist filters.
    pub async fn get_search_sandboxes(&mut self, query: &str) {
        if !self.effects.session.ensure_loaded().await {
            return;
        }
        match self.effects.api.search_candidates().await {
            Ok(candidates) => {
                let mut index = SearchIndex::new();
                let ranked = index.search(&candidates, query);

                let team = self.state.active_team.clone();
                let blacklist = self.state.filters.blacklisted_templates.clone();
                let results: Vec<Sandbox> = ranked
                    .into_iter()
                    .filter(|sandbox| !sandbox.is_custom_template)
                    .filter(|sandbox| sandbox.belongs_to_team(team.as_deref()))
                    .filter(|sandbox| {
                        sandbox
                            .source_template
                            .as_ref()
                            .is_none_or(|template| !blacklist.contains(template))
                    })
                    .collect();
                self.state.sandboxes.search = Some(results);
            }
            Err(err) => self.report_error("There was a problem getting your sandboxes", &err),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::actions::testutil::{dashboard_with, sandbox, team_sandbox};
    use crate::actions::{Dashboard, Effects};
    use crate::api::{CollectionSummary, MockDashboardApi};
    use crate::download::NullArchiver;
    use crate::environment::Environment;
    use crate::notifications::{ToastChannel, ToastKind};
    use crate::session::MockSessionGuard;
    use crate::state::Sandbox;
    use crate::storage::MemoryStore;

    fn http_error() -> crate::api::error::ApiError {
        crate::api::error::ApiError::Http {
            status: 500,
            message: "server error".to_string(),
        }
    }

    #[tokio::test]
    async fn test_recent_requests_200_filters_team_and_keeps_50() {
        let mut api = MockDashboardApi::new();
        let mut upstream: Vec<Sandbox> = Vec::new();
        for i in 0..120 {
            upstream.push(team_sandbox(&format!("team-{i}"), "t1"));
            upstream.push(team_sandbox(&format!("other-{i}"), "t2"));
        }
        api.expect_recent_sandboxes()
            .withf(|limit, order_by| *limit == 200 && order_by.field == "updated_at")
            .returning(move |_, _| Ok(upstream.clone()));

        let (mut dashboard, _toasts) = dashboard_with(api);
        dashboard.set_active_team(Some("t1".to_string()));
        dashboard.get_recent_sandboxes().await;

        let recent = dashboard.state().sandboxes.recent.as_ref().unwrap();
        assert_eq!(recent.len(), 50);
        assert!(recent.iter().all(|s| s.team_id() == Some("t1")));
        assert_eq!(recent[0].id, "team-0");
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_category_and_raises_toast() {
        let mut api = MockDashboardApi::new();
        api.expect_recent_sandboxes()
            .returning(|_, _| Err(http_error()));

        let (mut dashboard, mut toasts) = dashboard_with(api);
        dashboard.state.sandboxes.recent = Some(vec![sandbox("kept")]);
        dashboard.get_recent_sandboxes().await;

        assert_eq!(
            dashboard.state().sandboxes.recent,
            Some(vec![sandbox("kept")])
        );
        let toast = toasts.try_recv().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(
            toast.message,
            "There was a problem getting your recent sandboxes"
        );
    }

    #[tokio::test]
    async fn test_fetches_are_skipped_when_session_is_not_loaded() {
        // No API expectations: any call would panic.
        let mut session = MockSessionGuard::new();
        session.expect_ensure_loaded().returning(|| false);
        let (notifier, _toasts) = ToastChannel::new();
        let effects = Effects {
            api: Box::new(MockDashboardApi::new()),
            storage: Box::new(MemoryStore::new()),
            notifier: Box::new(notifier),
            session: Box::new(session),
            archiver: Box::new(NullArchiver),
        };
        let mut dashboard = Dashboard::new(effects, Environment::Staging);

        dashboard.get_recent_sandboxes().await;
        dashboard.get_drafts().await;
        dashboard.get_deleted_sandboxes().await;
        dashboard.get_search_sandboxes("anything").await;

        assert!(dashboard.state().sandboxes.recent.is_none());
        assert!(dashboard.state().sandboxes.drafts.is_none());
    }

    #[tokio::test]
    async fn test_drafts_exclude_custom_templates() {
        let mut api = MockDashboardApi::new();
        api.expect_sandboxes_by_path()
            .withf(|path, team| path == "/" && team.is_none())
            .returning(|_, _| {
                let template = Sandbox {
                    is_custom_template: true,
                    ..sandbox("tpl")
                };
                Ok(vec![sandbox("plain"), template])
            });

        let (mut dashboard, _toasts) = dashboard_with(api);
        dashboard.get_drafts().await;

        assert_eq!(
            dashboard.state().sandboxes.drafts,
            Some(vec![sandbox("plain")])
        );
    }

    #[tokio::test]
    async fn test_sandboxes_by_path_cleans_the_storage_key() {
        let mut api = MockDashboardApi::new();
        api.expect_sandboxes_by_path()
            .withf(|path, _| path == "/my folder")
            .returning(|_, _| Ok(vec![sandbox("a")]));

        let (mut dashboard, _toasts) = dashboard_with(api);
        dashboard.get_sandboxes_by_path("my folder").await;

        let all = dashboard.state().sandboxes.all.as_ref().unwrap();
        assert_eq!(all["myfolder"], vec![sandbox("a")]);
    }

    #[tokio::test]
    async fn test_templates_use_the_team_endpoint_when_a_team_is_active() {
        let mut api = MockDashboardApi::new();
        api.expect_team_templates()
            .withf(|team| team == "t1")
            .returning(|_| Ok(vec![sandbox("tpl-1")]));

        let (mut dashboard, _toasts) = dashboard_with(api);
        dashboard.set_active_team(Some("t1".to_string()));
        dashboard.get_template_sandboxes().await;

        assert_eq!(
            dashboard.state().sandboxes.templates,
            Some(vec![sandbox("tpl-1")])
        );
    }

    #[tokio::test]
    async fn test_templates_fall_back_to_owned_templates() {
        let mut api = MockDashboardApi::new();
        api.expect_owned_templates()
            .withf(|show_all| !*show_all)
            .returning(|_| Ok(vec![sandbox("mine")]));

        let (mut dashboard, _toasts) = dashboard_with(api);
        dashboard.get_template_sandboxes().await;

        assert_eq!(
            dashboard.state().sandboxes.templates,
            Some(vec![sandbox("mine")])
        );
    }

    #[tokio::test]
    async fn test_start_page_truncates_templates_and_requests_short_recents() {
        let mut api = MockDashboardApi::new();
        api.expect_recently_used_templates().returning(|| {
            Ok((0..6).map(|i| sandbox(&format!("tpl-{i}"))).collect())
        });
        api.expect_recent_sandboxes()
            .withf(|limit, _| *limit == 7)
            .returning(|_, _| Ok(vec![sandbox("recent-1")]));

        let (mut dashboard, _toasts) = dashboard_with(api);
        dashboard.get_start_page_sandboxes().await;

        assert_eq!(
            dashboard
                .state()
                .sandboxes
                .template_start_page
                .as_ref()
                .unwrap()
                .len(),
            4
        );
        assert_eq!(
            dashboard.state().sandboxes.recent_start_page,
            Some(vec![sandbox("recent-1")])
        );
    }

    #[tokio::test]
    async fn test_all_folders_prepends_synthetic_drafts_entry() {
        let mut api = MockDashboardApi::new();
        api.expect_collections().returning(|_| {
            Ok(vec![
                CollectionSummary {
                    id: "c-root".to_string(),
                    path: "/".to_string(),
                    sandbox_count: 2,
                },
                CollectionSummary {
                    id: "c-alpha".to_string(),
                    path: "/alpha".to_string(),
                    sandbox_count: 1,
                },
                CollectionSummary {
                    id: "c-beta".to_string(),
                    path: "/alpha/beta".to_string(),
                    sandbox_count: 0,
                },
            ])
        });

        let (mut dashboard, _toasts) = dashboard_with(api);
        dashboard.get_all_folders().await;

        let folders = dashboard.state().all_collections.as_ref().unwrap();
        assert_eq!(folders.len(), 3);
        assert_eq!(folders[0].name, "Drafts");
        assert_eq!(folders[0].sandboxes, 2);
        assert_eq!(folders[1].name, "alpha");
        assert_eq!(folders[1].level, 0);
        assert_eq!(folders[2].name, "beta");
        assert_eq!(folders[2].parent, "alpha");
        assert_eq!(folders[2].level, 1);
    }

    #[tokio::test]
    async fn test_search_ranks_and_filters_candidates() {
        let mut api = MockDashboardApi::new();
        api.expect_search_candidates().returning(|| {
            let mut foobar = team_sandbox("s-foobar", "t1");
            foobar.title = Some("foobar".to_string());
            let mut bar = team_sandbox("s-bar", "t1");
            bar.title = Some("bar".to_string());
            let mut foreign = team_sandbox("s-foreign", "t2");
            foreign.title = Some("foobar elsewhere".to_string());
            let mut template = team_sandbox("s-template", "t1");
            template.title = Some("foobar template".to_string());
            template.is_custom_template = true;
            Ok(vec![foobar, bar, foreign, template])
        });

        let (mut dashboard, _toasts) = dashboard_with(api);
        dashboard.set_active_team(Some("t1".to_string()));
        dashboard.get_search_sandboxes("foo").await;

        let results = dashboard.state().sandboxes.search.as_ref().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "s-foobar");
    }

    #[tokio::test]
    async fn test_search_honors_the_template_blacklist() {
        let mut api = MockDashboardApi::new();
        api.expect_search_candidates().returning(|| {
            let mut node = sandbox("s-node");
            node.title = Some("node starter".to_string());
            node.source_template = Some("node".to_string());
            let mut plain = sandbox("s-plain");
            plain.title = Some("node playground".to_string());
            Ok(vec![node, plain])
        });

        let (mut dashboard, _toasts) = dashboard_with(api);
        dashboard.blacklisted_template_added("node".to_string());
        dashboard.get_search_sandboxes("node").await;

        let results = dashboard.state().sandboxes.search.as_ref().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "s-plain");
    }

    #[tokio::test]
    async fn test_get_teams_requires_a_user() {
        // No API expectations: a call would panic.
        let (notifier, _toasts) = ToastChannel::new();
        let effects = Effects {
            api: Box::new(MockDashboardApi::new()),
            storage: Box::new(MemoryStore::new()),
            notifier: Box::new(notifier),
            session: Box::new(crate::session::AlwaysLoaded::new(None)),
            archiver: Box::new(NullArchiver),
        };
        let mut dashboard = Dashboard::new(effects, Environment::Staging);
        dashboard.get_teams().await;
        assert!(dashboard.state().teams.is_empty());
    }
}
