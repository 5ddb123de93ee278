//! Dashboard state tree
//!
//! The single-instance state observed by the UI. Created once at application
//! start and owned by [`Dashboard`](crate::actions::Dashboard) for the
//! process lifetime; actions are the only writers.

mod model;

pub use model::{CollectionRef, Folder, Sandbox, Team};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Layout used to render sandbox lists.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Sort direction, serialized uppercase on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Direction {
    Asc,
    Desc,
}

/// Sort order applied to sandbox listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl Default for OrderBy {
    fn default() -> Self {
        OrderBy {
            field: "updated_at".to_string(),
            direction: Direction::Desc,
        }
    }
}

/// Active listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub search: String,
    /// Template names excluded from search results.
    pub blacklisted_templates: Vec<String>,
}

/// The fixed set of dashboard pages a route change can request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
pub enum Page {
    Recent,
    StartPage,
    Drafts,
    Templates,
    Deleted,
    Search,
    All,
    TemplateStartPage,
    RecentStartPage,
}

/// Sandbox lists keyed by the fixed view categories.
///
/// `None` means "not yet loaded"; the closed struct guarantees no category
/// outside the enumerated set can ever appear. The ALL category is further
/// keyed by cleaned folder path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SandboxLists {
    pub recent: Option<Vec<Sandbox>>,
    pub drafts: Option<Vec<Sandbox>>,
    pub templates: Option<Vec<Sandbox>>,
    pub deleted: Option<Vec<Sandbox>>,
    pub search: Option<Vec<Sandbox>>,
    pub template_start_page: Option<Vec<Sandbox>>,
    pub recent_start_page: Option<Vec<Sandbox>>,
    pub all: Option<BTreeMap<String, Vec<Sandbox>>>,
}

impl SandboxLists {
    /// Runs `f` over every loaded list, including each folder under ALL.
    pub fn for_each_loaded_mut(&mut self, mut f: impl FnMut(&mut Vec<Sandbox>)) {
        let lists = [
            &mut self.recent,
            &mut self.drafts,
            &mut self.templates,
            &mut self.deleted,
            &mut self.search,
            &mut self.template_start_page,
            &mut self.recent_start_page,
        ];
        for list in lists.into_iter().flatten() {
            f(list);
        }
        if let Some(all) = &mut self.all {
            for list in all.values_mut() {
                f(list);
            }
        }
    }

    /// Drops the given sandbox ids from every loaded list.
    pub fn remove_ids(&mut self, ids: &[String]) {
        self.for_each_loaded_mut(|list| list.retain(|sandbox| !ids.contains(&sandbox.id)));
    }

    /// Drops the given sandbox ids from the two template lists only.
    pub fn remove_template_ids(&mut self, ids: &[String]) {
        for list in [&mut self.templates, &mut self.template_start_page]
            .into_iter()
            .flatten()
        {
            list.retain(|sandbox| !ids.contains(&sandbox.id));
        }
    }

    /// Rewrites the title of one sandbox wherever it is loaded.
    pub fn rename(&mut self, id: &str, title: &str) {
        self.for_each_loaded_mut(|list| {
            for sandbox in list.iter_mut().filter(|s| s.id == id) {
                sandbox.title = Some(title.to_string());
            }
        });
    }

    /// Resets the team-scoped categories to not-loaded, forcing a refetch.
    pub fn invalidate_team_scoped(&mut self) {
        self.drafts = None;
        self.templates = None;
        self.recent = None;
        self.search = None;
        self.all = None;
    }
}

/// Single-instance state tree for the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Currently selected team, or the personal space when absent.
    pub active_team: Option<String>,
    pub view_mode: ViewMode,
    pub order_by: OrderBy,
    pub filters: Filters,
    pub selected_sandboxes: Vec<String>,
    pub trash_sandbox_ids: Vec<String>,
    pub is_dragging: bool,
    pub sandboxes: SandboxLists,
    /// Folder listing, `None` until fetched.
    pub all_collections: Option<Vec<Folder>>,
    pub teams: Vec<Team>,
}
