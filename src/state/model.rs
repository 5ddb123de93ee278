//! Sandbox, folder, and team records held in the state tree.

use serde::{Deserialize, Serialize};

/// Reference to the collection a sandbox lives in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    #[serde(default)]
    pub path: String,
    /// Owning team, absent for sandboxes in the personal space.
    #[serde(default)]
    pub team_id: Option<String>,
}

/// A sandbox as returned by the dashboard API.
///
/// Treated as an opaque payload: the action set filters and maps these
/// records but never interprets them beyond the fields below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sandbox {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    /// Name of the template this sandbox was created from.
    #[serde(default)]
    pub source_template: Option<String>,
    #[serde(default)]
    pub collection: Option<CollectionRef>,
    /// Set once the sandbox has been moved to the trash.
    #[serde(default)]
    pub removed_at: Option<String>,
    /// True for sandboxes that have been turned into custom templates.
    #[serde(default)]
    pub is_custom_template: bool,
}

impl Sandbox {
    /// Team owning the sandbox via its collection, if any.
    pub fn team_id(&self) -> Option<&str> {
        self.collection.as_ref().and_then(|c| c.team_id.as_deref())
    }

    /// Whether the sandbox belongs to the given team scope. A sandbox with no
    /// collection matches the personal (no-team) scope.
    pub fn belongs_to_team(&self, team: Option<&str>) -> bool {
        self.team_id() == team
    }
}

/// A team the user is a member of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
}

/// A collection of sandboxes with a hierarchical, slash-delimited path.
///
/// `name`, `parent`, and `level` are derived from `path` and recomputed
/// whenever the path changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub path: String,
    /// Name of the enclosing folder, empty at the top level.
    pub parent: String,
    /// Nesting depth; top-level folders sit at level zero.
    pub level: usize,
    /// Last path segment.
    pub name: String,
    /// Number of sandboxes in the folder.
    pub sandboxes: usize,
}

impl Folder {
    /// Builds a folder record from its path, deriving the display fields.
    pub fn from_path(id: impl Into<String>, path: &str, sandboxes: usize) -> Self {
        let (name, parent, level) = derive_path_fields(path);
        Folder {
            id: id.into(),
            path: path.to_string(),
            parent,
            level,
            name,
            sandboxes,
        }
    }

    /// Replaces the path and recomputes the derived fields.
    pub fn set_path(&mut self, path: String) {
        let (name, parent, level) = derive_path_fields(&path);
        self.path = path;
        self.name = name;
        self.parent = parent;
        self.level = level;
    }
}

/// Derives `(name, parent, level)` from a slash-delimited folder path.
///
/// `name` is the last non-empty segment and `parent` the segment right
/// before it (empty when there is none). `level` counts the raw split
/// segments minus two, so the leading slash's empty segment is included and
/// top-level folders such as `"/a"` sit at level zero.
fn derive_path_fields(path: &str) -> (String, String, usize) {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let name = segments.last().copied().unwrap_or_default().to_string();
    let parent = if segments.len() >= 2 {
        segments[segments.len() - 2].to_string()
    } else {
        String::new()
    };
    let level = path.split('/').count().saturating_sub(2);
    (name, parent, level)
}
