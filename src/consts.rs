pub mod dashboard_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all tuning constants for the dashboard action set,
    //! organized by functional area for clarity and maintainability.

    // =============================================================================
    // FETCH LIMITS
    // =============================================================================

    /// Upstream and display limits for the sandbox listings.
    pub mod fetch_limits {
        /// Number of sandboxes requested upstream for the recent view.
        /// Larger than the display limit so team filtering still fills the page.
        pub const RECENT_REQUEST_LIMIT: usize = 200;

        /// Number of recent sandboxes kept after team filtering.
        pub const RECENT_KEPT: usize = 50;

        /// Recently used templates shown on the start page.
        pub const START_PAGE_TEMPLATES: usize = 4;

        /// Recent sandboxes requested for the start page.
        pub const START_PAGE_RECENT: usize = 7;
    }

    // =============================================================================
    // SEARCH TUNING
    // =============================================================================

    /// Relative field weights and cutoff for the fuzzy search ranking.
    pub mod search {
        pub const TITLE_WEIGHT: f32 = 0.4;
        pub const DESCRIPTION_WEIGHT: f32 = 0.2;
        pub const ALIAS_WEIGHT: f32 = 0.2;
        pub const TEMPLATE_WEIGHT: f32 = 0.1;
        pub const ID_WEIGHT: f32 = 0.1;

        /// Minimum weighted relative score for a candidate to appear in results.
        pub const SCORE_THRESHOLD: f32 = 0.1;
    }

    // =============================================================================
    // DURABLE STORAGE
    // =============================================================================

    /// Keys for the handful of preferences persisted across restarts.
    pub mod storage_keys {
        /// Persisted grid/list preference.
        pub const VIEW_MODE: &str = "VIEW_MODE_DASHBOARD";

        /// Persisted active team id.
        pub const TEAM_ID: &str = "TEAM_ID_DASHBOARD";
    }

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// Maximum queued toasts before new ones are dropped.
    pub const TOAST_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // PLACEHOLDER IDS
    // =============================================================================

    /// Id assigned to an optimistically created folder until the server
    /// responds with the real one.
    pub const PENDING_FOLDER_ID: &str = "pending-folder";

    /// Id of the synthetic drafts entry prepended to the folder listing.
    pub const DRAFTS_FOLDER_ID: &str = "drafts-folder";
}
