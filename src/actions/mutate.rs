//! Optimistic write actions.
//!
//! Shared shape: snapshot the affected slice, apply the intended end state
//! immediately, issue the one remote call, then either reconcile server
//! fields into the optimistic records or restore the snapshot verbatim and
//! raise a toast. Nothing is partially reconciled.

use super::Dashboard;
use crate::analytics;
use crate::consts::dashboard_consts::PENDING_FOLDER_ID;
use crate::state::Folder;

impl Dashboard {
    /// Creates a folder optimistically: a placeholder record appears at the
    /// front of the listing and is reconciled with the server id on success.
    /// A no-op until the folder listing has been loaded.
    pub async fn create_folder(&mut self, path: &str) {
        let Some(old_folders) = self.state.all_collections.clone() else {
            return;
        };

        let mut next = vec![Folder::from_path(PENDING_FOLDER_ID, path, 0)];
        next.extend(old_folders.iter().cloned());
        self.state.all_collections = Some(next);

        match self
            .effects
            .api
            .create_folder(self.state.active_team.clone(), path)
            .await
        {
            Ok(created) => {
                if let Some(folders) = &mut self.state.all_collections {
                    for folder in folders.iter_mut().filter(|f| f.id == PENDING_FOLDER_ID) {
                        folder.id = created.id.clone();
                        folder.set_path(created.path.clone());
                    }
                }
            }
            Err(err) => {
                self.state.all_collections = Some(old_folders);
                self.report_error("There was a problem creating your folder", &err);
            }
        }
    }

    /// Rewrites a folder's path in state, recomputing the derived fields.
    pub fn rename_folder_in_state(&mut self, path: &str, new_path: &str) {
        let Some(folders) = &mut self.state.all_collections else {
            return;
        };
        for folder in folders.iter_mut().filter(|f| f.path == path) {
            folder.set_path(new_path.to_string());
        }
    }

    /// Renames a folder optimistically; the rename is undone on failure.
    pub async fn rename_folder(&mut self, path: &str, new_path: &str) {
        if self.state.all_collections.is_none() {
            return;
        }
        self.rename_folder_in_state(path, new_path);

        match self.effects.api.rename_folder(path, new_path).await {
            Ok(()) => {}
            Err(err) => {
                self.rename_folder_in_state(new_path, path);
                self.report_error("There was a problem renaming your folder", &err);
            }
        }
    }

    /// Deletes a folder optimistically, restoring the listing on failure.
    pub async fn delete_folder(&mut self, path: &str) {
        let Some(old_folders) = self.state.all_collections.clone() else {
            return;
        };
        self.state.all_collections = Some(
            old_folders
                .iter()
                .filter(|folder| folder.path != path)
                .cloned()
                .collect(),
        );

        match self
            .effects
            .api
            .delete_folder(path, self.state.active_team.clone())
            .await
        {
            Ok(()) => {}
            Err(err) => {
                self.state.all_collections = Some(old_folders);
                self.report_error("There was a problem deleting your folder", &err);
            }
        }
    }

    /// Rewrites a sandbox title in every loaded category.
    pub fn rename_sandbox_in_state(&mut self, id: &str, title: &str) {
        self.state.sandboxes.rename(id, title);
    }

    /// Renames a sandbox optimistically; the old title is restored in every
    /// category on failure.
    pub async fn rename_sandbox(&mut self, id: &str, title: &str, old_title: &str) {
        self.rename_sandbox_in_state(id, title);

        match self.effects.api.rename_sandbox(id, title).await {
            Ok(()) => {}
            Err(err) => {
                self.rename_sandbox_in_state(id, old_title);
                self.report_error("There was a problem renaming your sandbox", &err);
            }
        }
    }

    /// Moves sandboxes to the trash optimistically, dropping them from every
    /// loaded category. Requires a signed-in user.
    pub async fn delete_sandboxes(&mut self, ids: &[String]) {
        if self.effects.session.current_user().is_none() {
            return;
        }
        let old_sandboxes = self.state.sandboxes.clone();
        self.state.sandboxes.remove_ids(ids);

        match self.effects.api.delete_sandboxes(ids).await {
            Ok(()) => {}
            Err(err) => {
                self.state.sandboxes = old_sandboxes;
                self.report_error("There was a problem deleting your sandbox", &err);
            }
        }
    }

    /// Converts sandboxes into templates. The records leave the regular
    /// categories immediately and come back on failure.
    pub async fn make_templates(&mut self, ids: &[String]) {
        let old_sandboxes = self.state.sandboxes.clone();
        self.state.sandboxes.remove_ids(ids);

        match self.effects.api.make_templates(ids).await {
            Ok(()) => {}
            Err(err) => {
                self.state.sandboxes = old_sandboxes;
                self.report_error("There was a problem making your template", &err);
            }
        }
    }

    /// Converts templates back into plain sandboxes. Only the two template
    /// categories are touched, so only they are snapshotted.
    pub async fn unmake_templates(&mut self, ids: &[String]) {
        let old_templates = self.state.sandboxes.templates.clone();
        let old_start_page = self.state.sandboxes.template_start_page.clone();
        self.state.sandboxes.remove_template_ids(ids);

        match self.effects.api.unmake_templates(ids).await {
            Ok(()) => {}
            Err(err) => {
                self.state.sandboxes.templates = old_templates;
                self.state.sandboxes.template_start_page = old_start_page;
                self.report_error("There was a problem reverting your template", &err);
            }
        }
    }

    /// Permanently removes sandboxes from the trash. A no-op until DELETED
    /// has been loaded.
    pub async fn permanently_delete_sandboxes(&mut self, ids: &[String]) {
        let Some(old_deleted) = self.state.sandboxes.deleted.clone() else {
            return;
        };
        self.state.sandboxes.deleted = Some(
            old_deleted
                .iter()
                .filter(|sandbox| !ids.contains(&sandbox.id))
                .cloned()
                .collect(),
        );

        match self.effects.api.permanently_delete_sandboxes(ids).await {
            Ok(()) => {}
            Err(err) => {
                self.state.sandboxes.deleted = Some(old_deleted);
                self.report_error("There was a problem deleting your sandbox", &err);
            }
        }
    }

    /// Recovers sandboxes from the trash into the active team's root
    /// collection. A no-op until DELETED has been loaded.
    pub async fn recover_sandboxes(&mut self, ids: &[String]) {
        let Some(old_deleted) = self.state.sandboxes.deleted.clone() else {
            return;
        };
        self.state.sandboxes.deleted = Some(
            old_deleted
                .iter()
                .filter(|sandbox| !ids.contains(&sandbox.id))
                .cloned()
                .collect(),
        );

        match self
            .effects
            .api
            .add_sandboxes_to_folder(ids, "/", self.state.active_team.clone())
            .await
        {
            Ok(()) => {}
            Err(err) => {
                self.state.sandboxes.deleted = Some(old_deleted);
                self.report_error("There was a problem recovering your sandbox", &err);
            }
        }
    }

    /// Deletes a custom template. No optimistic mutation: the listing is
    /// refetched by the UI, so this only reports the outcome.
    pub async fn delete_template(&mut self, sandbox_id: &str, template_id: &str) {
        tokio::spawn(analytics::track_template_removed(
            "Context Menu",
            self.environment.clone(),
            self.client_id.clone(),
        ));

        match self.effects.api.delete_template(sandbox_id, template_id).await {
            Ok(()) => self.effects.notifier.success("Template deleted"),
            Err(err) => self.report_error("Could not delete custom template", &err),
        }
    }

    /// Downloads the given sandboxes as archives. Ids are deduplicated, the
    /// file trees are fetched concurrently, and all failures collapse into a
    /// single notice.
    pub async fn download_sandboxes(&mut self, ids: &[String]) {
        let mut unique: Vec<&String> = Vec::new();
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        let fetches = unique.iter().map(|id| self.effects.api.sandbox_details(id));
        let results = futures::future::join_all(fetches).await;

        let mut failures = 0usize;
        for result in results {
            match result {
                Ok(details) => {
                    if let Err(err) = self.effects.archiver.write_archive(&details) {
                        log::warn!("Failed to archive sandbox {}: {}", details.sandbox.id, err);
                        failures += 1;
                    }
                }
                Err(err) => {
                    log::warn!("Failed to fetch sandbox for download: {}", err);
                    failures += 1;
                }
            }
        }

        if failures > 0 {
            self.effects
                .notifier
                .error("There was a problem downloading your sandboxes");
        }
    }
}
