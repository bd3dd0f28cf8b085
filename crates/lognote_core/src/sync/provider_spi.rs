//! Provider SPI implemented by sync collaborators.

use crate::sync::provider_types::{SyncRequest, SyncReport, SyncResult};

/// Contract one sync collaborator implements.
///
/// Implementations run the whole pull/stage/commit/push sequence for one
/// request and report which actions occurred. They get no visibility into
/// note content.
pub trait SyncSpi {
    /// Stable provider identifier (`[a-z0-9_-]+`).
    fn provider_id(&self) -> &str;

    /// Executes one synchronization run.
    fn sync(&self, request: SyncRequest) -> SyncResult<SyncReport>;
}
