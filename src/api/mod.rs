use crate::api::error::ApiError;
use crate::state::{OrderBy, Sandbox, Team};

pub(crate) mod client;
pub use client::HttpDashboardApi;
pub mod error;
mod types;
pub use types::{CollectionSummary, CreatedFolder, SandboxDetails};

#[cfg(test)]
use mockall::{automock, predicate::*};

/// Remote data source for every dashboard action that leaves the process.
///
/// Each method is a single request/response call; no retries happen at this
/// layer. Callers own all failure handling.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    /// Most recently updated sandboxes across the user's workspaces.
    async fn recent_sandboxes(
        &self,
        limit: usize,
        order_by: &OrderBy,
    ) -> Result<Vec<Sandbox>, ApiError>;

    /// Sandboxes in the collection at `path`, scoped to `team_id`.
    async fn sandboxes_by_path(
        &self,
        path: &str,
        team_id: Option<String>,
    ) -> Result<Vec<Sandbox>, ApiError>;

    /// Sandboxes currently in the trash.
    async fn deleted_sandboxes(&self) -> Result<Vec<Sandbox>, ApiError>;

    /// Templates owned by the given team.
    async fn team_templates(&self, team_id: &str) -> Result<Vec<Sandbox>, ApiError>;

    /// Templates owned by the signed-in user.
    async fn owned_templates(&self, show_all: bool) -> Result<Vec<Sandbox>, ApiError>;

    /// Templates the user created sandboxes from recently.
    async fn recently_used_templates(&self) -> Result<Vec<Sandbox>, ApiError>;

    /// Full candidate set for client-side search.
    async fn search_candidates(&self) -> Result<Vec<Sandbox>, ApiError>;

    /// Teams the user is a member of.
    async fn teams(&self) -> Result<Vec<Team>, ApiError>;

    /// Collections of the given team, with their sandbox counts.
    async fn collections(&self, team_id: Option<String>) -> Result<Vec<CollectionSummary>, ApiError>;

    /// Creates a folder and returns its authoritative id and path.
    async fn create_folder(
        &self,
        team_id: Option<String>,
        path: &str,
    ) -> Result<CreatedFolder, ApiError>;

    async fn rename_folder(&self, path: &str, new_path: &str) -> Result<(), ApiError>;

    async fn delete_folder(&self, path: &str, team_id: Option<String>) -> Result<(), ApiError>;

    async fn rename_sandbox(&self, id: &str, title: &str) -> Result<(), ApiError>;

    /// Moves the given sandboxes to the trash.
    async fn delete_sandboxes(&self, ids: &[String]) -> Result<(), ApiError>;

    /// Removes the given sandboxes from the trash permanently.
    async fn permanently_delete_sandboxes(&self, ids: &[String]) -> Result<(), ApiError>;

    async fn make_templates(&self, ids: &[String]) -> Result<(), ApiError>;

    async fn unmake_templates(&self, ids: &[String]) -> Result<(), ApiError>;

    /// Moves sandboxes into the collection at `collection_path`.
    async fn add_sandboxes_to_folder(
        &self,
        ids: &[String],
        collection_path: &str,
        team_id: Option<String>,
    ) -> Result<(), ApiError>;

    /// Deletes a custom template.
    async fn delete_template(&self, sandbox_id: &str, template_id: &str) -> Result<(), ApiError>;

    /// A sandbox with its full file tree, for download.
    async fn sandbox_details(&self, id: &str) -> Result<SandboxDetails, ApiError>;
}
