//! Bulk download collaborator.

use crate::api::SandboxDetails;

#[cfg(test)]
use mockall::automock;

/// Writes one sandbox and its file tree into a downloadable archive.
///
/// The implementation is supplied by the embedding application; the action
/// set only sequences the calls and aggregates failures.
#[cfg_attr(test, automock)]
pub trait Archiver: Send + Sync {
    fn write_archive(&self, details: &SandboxDetails) -> std::io::Result<()>;
}

/// Archiver that discards everything, for embedders without a download
/// surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullArchiver;

impl Archiver for NullArchiver {
    fn write_archive(&self, _details: &SandboxDetails) -> std::io::Result<()> {
        Ok(())
    }
}
