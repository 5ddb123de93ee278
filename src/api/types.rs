//! Request and response payloads for the dashboard API.

use crate::state::{Sandbox, Team};
use serde::Deserialize;
use serde_json::Value;

/// Envelope for every endpoint returning a plain sandbox list.
#[derive(Debug, Deserialize)]
pub(crate) struct SandboxesResponse {
    pub sandboxes: Vec<Sandbox>,
}

/// Envelope for the template listing endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct TemplatesResponse {
    pub templates: Vec<Sandbox>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamsResponse {
    pub teams: Vec<Team>,
}

/// One collection as listed by the folder endpoint. Derived display fields
/// are computed client-side from `path`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectionSummary {
    pub id: String,
    pub path: String,
    #[serde(default)]
    pub sandbox_count: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionsResponse {
    pub collections: Vec<CollectionSummary>,
}

/// Authoritative fields returned when a folder is created; reconciled into
/// the optimistic placeholder record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedFolder {
    pub id: String,
    pub path: String,
}

/// A sandbox together with its file tree, as needed for download. Modules
/// and directories are opaque to the action set and handed to the archive
/// writer as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SandboxDetails {
    pub sandbox: Sandbox,
    #[serde(default)]
    pub modules: Vec<Value>,
    #[serde(default)]
    pub directories: Vec<Value>,
}
