//! Session readiness guard
//!
//! Every fetch action runs behind this guard so prerequisite session/user
//! data exists before any category is populated.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Ensures the surrounding application session is loaded before a fetch runs.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionGuard: Send + Sync {
    /// Loads session data if needed. Returns false when no session is
    /// available; callers skip their work silently in that case.
    async fn ensure_loaded(&self) -> bool;

    /// Id of the signed-in user, if any.
    fn current_user(&self) -> Option<String>;
}

/// Guard for embedders whose session is loaded before the dashboard mounts.
#[derive(Debug, Clone, Default)]
pub struct AlwaysLoaded {
    user: Option<String>,
}

impl AlwaysLoaded {
    pub fn new(user: Option<String>) -> Self {
        AlwaysLoaded { user }
    }
}

#[async_trait]
impl SessionGuard for AlwaysLoaded {
    async fn ensure_loaded(&self) -> bool {
        true
    }

    fn current_user(&self) -> Option<String> {
        self.user.clone()
    }
}
