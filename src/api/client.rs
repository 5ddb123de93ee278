//! Dashboard API Client
//!
//! A JSON client for the dashboard backend, covering every query and
//! mutation the action set issues.

use crate::api::DashboardApi;
use crate::api::error::ApiError;
use crate::api::types::{
    CollectionSummary, CollectionsResponse, CreatedFolder, SandboxDetails, SandboxesResponse,
    TeamsResponse, TemplatesResponse,
};
use crate::environment::Environment;
use crate::state::{OrderBy, Sandbox, Team};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;

// User-Agent string with the crate version
const USER_AGENT: &str = concat!("sandbox-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    client: Client,
    environment: Environment,
}

impl HttpDashboardApi {
    pub fn new(environment: Environment) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            environment,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        serde_json::from_slice(&response_bytes).map_err(ApiError::Decode)
    }

    async fn post_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Value,
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        serde_json::from_slice(&response_bytes).map_err(ApiError::Decode)
    }

    async fn post_request_no_response(&self, endpoint: &str, body: Value) -> Result<(), ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await?;

        Self::handle_response_status(response).await?;
        Ok(())
    }

    /// Appends `team_id` to a query string when a team scope is present.
    fn team_query(team_id: Option<&str>) -> String {
        match team_id {
            Some(id) => format!("&team_id={}", urlencoding::encode(id)),
            None => String::new(),
        }
    }
}

#[async_trait::async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn recent_sandboxes(
        &self,
        limit: usize,
        order_by: &OrderBy,
    ) -> Result<Vec<Sandbox>, ApiError> {
        let endpoint = format!(
            "v1/sandboxes/recent?limit={}&order_field={}&order_direction={}",
            limit,
            urlencoding::encode(&order_by.field),
            order_by.direction
        );
        let response: SandboxesResponse = self.get_request(&endpoint).await?;
        Ok(response.sandboxes)
    }

    async fn sandboxes_by_path(
        &self,
        path: &str,
        team_id: Option<String>,
    ) -> Result<Vec<Sandbox>, ApiError> {
        let endpoint = format!(
            "v1/collections/sandboxes?path={}{}",
            urlencoding::encode(path),
            Self::team_query(team_id.as_deref())
        );
        let response: SandboxesResponse = self.get_request(&endpoint).await?;
        Ok(response.sandboxes)
    }

    async fn deleted_sandboxes(&self) -> Result<Vec<Sandbox>, ApiError> {
        let response: SandboxesResponse = self.get_request("v1/sandboxes/deleted").await?;
        Ok(response.sandboxes)
    }

    async fn team_templates(&self, team_id: &str) -> Result<Vec<Sandbox>, ApiError> {
        let endpoint = format!("v1/teams/{}/templates", urlencoding::encode(team_id));
        let response: TemplatesResponse = self.get_request(&endpoint).await?;
        Ok(response.templates)
    }

    async fn owned_templates(&self, show_all: bool) -> Result<Vec<Sandbox>, ApiError> {
        let endpoint = format!("v1/templates/owned?show_all={}", show_all);
        let response: TemplatesResponse = self.get_request(&endpoint).await?;
        Ok(response.templates)
    }

    async fn recently_used_templates(&self) -> Result<Vec<Sandbox>, ApiError> {
        let response: TemplatesResponse = self.get_request("v1/templates/recently-used").await?;
        Ok(response.templates)
    }

    async fn search_candidates(&self) -> Result<Vec<Sandbox>, ApiError> {
        let response: SandboxesResponse = self.get_request("v1/sandboxes/search-candidates").await?;
        Ok(response.sandboxes)
    }

    async fn teams(&self) -> Result<Vec<Team>, ApiError> {
        let response: TeamsResponse = self.get_request("v1/teams").await?;
        Ok(response.teams)
    }

    async fn collections(&self, team_id: Option<String>) -> Result<Vec<CollectionSummary>, ApiError> {
        let endpoint = match team_id {
            Some(id) => format!("v1/collections?team_id={}", urlencoding::encode(&id)),
            None => "v1/collections".to_string(),
        };
        let response: CollectionsResponse = self.get_request(&endpoint).await?;
        Ok(response.collections)
    }

    async fn create_folder(
        &self,
        team_id: Option<String>,
        path: &str,
    ) -> Result<CreatedFolder, ApiError> {
        self.post_request(
            "v1/collections",
            json!({ "team_id": team_id, "path": path }),
        )
        .await
    }

    async fn rename_folder(&self, path: &str, new_path: &str) -> Result<(), ApiError> {
        self.post_request_no_response(
            "v1/collections/rename",
            json!({ "path": path, "new_path": new_path }),
        )
        .await
    }

    async fn delete_folder(&self, path: &str, team_id: Option<String>) -> Result<(), ApiError> {
        self.post_request_no_response(
            "v1/collections/delete",
            json!({ "path": path, "team_id": team_id }),
        )
        .await
    }

    async fn rename_sandbox(&self, id: &str, title: &str) -> Result<(), ApiError> {
        let endpoint = format!("v1/sandboxes/{}/rename", urlencoding::encode(id));
        self.post_request_no_response(&endpoint, json!({ "title": title }))
            .await
    }

    async fn delete_sandboxes(&self, ids: &[String]) -> Result<(), ApiError> {
        self.post_request_no_response("v1/sandboxes/delete", json!({ "sandbox_ids": ids }))
            .await
    }

    async fn permanently_delete_sandboxes(&self, ids: &[String]) -> Result<(), ApiError> {
        self.post_request_no_response(
            "v1/sandboxes/permanently-delete",
            json!({ "sandbox_ids": ids }),
        )
        .await
    }

    async fn make_templates(&self, ids: &[String]) -> Result<(), ApiError> {
        self.post_request_no_response("v1/sandboxes/make-template", json!({ "sandbox_ids": ids }))
            .await
    }

    async fn unmake_templates(&self, ids: &[String]) -> Result<(), ApiError> {
        self.post_request_no_response("v1/sandboxes/unmake-template", json!({ "sandbox_ids": ids }))
            .await
    }

    async fn add_sandboxes_to_folder(
        &self,
        ids: &[String],
        collection_path: &str,
        team_id: Option<String>,
    ) -> Result<(), ApiError> {
        self.post_request_no_response(
            "v1/sandboxes/move",
            json!({
                "sandbox_ids": ids,
                "collection_path": collection_path,
                "team_id": team_id,
            }),
        )
        .await
    }

    async fn delete_template(&self, sandbox_id: &str, template_id: &str) -> Result<(), ApiError> {
        let endpoint = format!("v1/templates/{}/delete", urlencoding::encode(template_id));
        self.post_request_no_response(&endpoint, json!({ "sandbox_id": sandbox_id }))
            .await
    }

    async fn sandbox_details(&self, id: &str) -> Result<SandboxDetails, ApiError> {
        let endpoint = format!("v1/sandboxes/{}", urlencoding::encode(id));
        self.get_request(&endpoint).await
    }
}


#[cfg(test)]
/// These are ignored by default since they require a live dashboard API to run.
mod live_api_tests {
    use super::*;
    use crate::api::DashboardApi;

    #[tokio::test]
    #[ignore] // This test requires a live API instance.
    /// Should list the signed-in user's teams.
    async fn test_teams() {
        let api = HttpDashboardApi::new(Environment::Staging);
        match api.teams().await {
            Ok(teams) => println!("Got {} teams", teams.len()),
            Err(e) => panic!("Failed to list teams: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires a live API instance.
    /// Should list deleted sandboxes.
    async fn test_deleted_sandboxes() {
        let api = HttpDashboardApi::new(Environment::Staging);
        match api.deleted_sandboxes().await {
            Ok(sandboxes) => println!("Got {} deleted sandboxes", sandboxes.len()),
            Err(e) => panic!("Failed to list deleted sandboxes: {}", e),
        }
    }
}
