//! In-process provider registry and selection hooks.

use crate::sync::provider_spi::SyncSpi;
use crate::sync::provider_types::{SyncErrorEnvelope, SyncRequest, SyncReport, SyncResult};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Provider registration/selection errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncRegistryError {
    InvalidProviderId(String),
    DuplicateProviderId(String),
    ProviderNotFound(String),
}

impl Display for SyncRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProviderId(value) => write!(f, "provider id is invalid: {value}"),
            Self::DuplicateProviderId(value) => {
                write!(f, "provider id already registered: {value}")
            }
            Self::ProviderNotFound(value) => write!(f, "provider not found: {value}"),
        }
    }
}

impl Error for SyncRegistryError {}

/// Runtime sync SPI registry.
#[derive(Default)]
pub struct SyncRegistry {
    providers: BTreeMap<String, Arc<dyn SyncSpi>>,
    active_provider_id: Option<String>,
}

impl SyncRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one sync collaborator.
    pub fn register(&mut self, provider: Arc<dyn SyncSpi>) -> Result<(), SyncRegistryError> {
        let provider_id = provider.provider_id().trim().to_string();
        if !is_valid_provider_id(&provider_id) {
            return Err(SyncRegistryError::InvalidProviderId(provider_id));
        }
        if self.providers.contains_key(provider_id.as_str()) {
            return Err(SyncRegistryError::DuplicateProviderId(provider_id));
        }

        self.providers.insert(provider_id, provider);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns sorted provider ids.
    pub fn provider_ids(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Selects one active provider.
    pub fn select_active(&mut self, provider_id: &str) -> Result<(), SyncRegistryError> {
        let normalized = provider_id.trim();
        if !self.providers.contains_key(normalized) {
            return Err(SyncRegistryError::ProviderNotFound(normalized.to_string()));
        }
        self.active_provider_id = Some(normalized.to_string());
        Ok(())
    }

    /// Clears active provider selection.
    pub fn clear_active(&mut self) {
        self.active_provider_id = None;
    }

    /// Returns active provider id.
    pub fn active_provider_id(&self) -> Option<&str> {
        self.active_provider_id.as_deref()
    }

    /// Returns one provider by id.
    pub fn get(&self, provider_id: &str) -> Option<Arc<dyn SyncSpi>> {
        self.providers.get(provider_id.trim()).cloned()
    }

    /// Returns active provider handle.
    pub fn active_provider(&self) -> Option<Arc<dyn SyncSpi>> {
        let id = self.active_provider_id()?;
        self.get(id)
    }

    /// Executes one sync run against the selected provider.
    pub fn sync_active(&self, request: SyncRequest) -> SyncResult<SyncReport> {
        match self.active_provider() {
            Some(provider) => provider.sync(request),
            None => Err(SyncErrorEnvelope::new(
                "registry",
                "provider_not_selected",
                "No active sync provider selected.",
            )),
        }
    }
}

fn is_valid_provider_id(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::{SyncRegistry, SyncRegistryError};
    use crate::sync::provider_spi::SyncSpi;
    use crate::sync::provider_types::{SyncRequest, SyncReport, SyncResult};
    use std::sync::Arc;

    struct FakeProvider {
        provider_id: String,
    }

    impl FakeProvider {
        fn new(provider_id: &str) -> Self {
            Self {
                provider_id: provider_id.to_string(),
            }
        }
    }

    impl SyncSpi for FakeProvider {
        fn provider_id(&self) -> &str {
            &self.provider_id
        }

        fn sync(&self, _request: SyncRequest) -> SyncResult<SyncReport> {
            Ok(SyncReport {
                pulled: true,
                added: true,
                committed: true,
                pushed: false,
                revision: Some("rev-1".to_string()),
            })
        }
    }

    #[test]
    fn registers_and_selects_provider() {
        let mut registry = SyncRegistry::new();
        registry
            .register(Arc::new(FakeProvider::new("git_notes")))
            .expect("provider should register");
        assert_eq!(registry.len(), 1);
        assert!(registry.active_provider_id().is_none());

        registry
            .select_active("git_notes")
            .expect("provider should be selectable");
        assert_eq!(registry.active_provider_id(), Some("git_notes"));
    }

    #[test]
    fn rejects_invalid_or_duplicate_provider_id() {
        let mut registry = SyncRegistry::new();
        let invalid = registry.register(Arc::new(FakeProvider::new("Git Notes")));
        assert!(matches!(
            invalid,
            Err(SyncRegistryError::InvalidProviderId(_))
        ));

        registry
            .register(Arc::new(FakeProvider::new("git_notes")))
            .expect("first provider should register");
        let duplicate = registry.register(Arc::new(FakeProvider::new("git_notes")));
        assert!(matches!(
            duplicate,
            Err(SyncRegistryError::DuplicateProviderId(_))
        ));
    }

    #[test]
    fn sync_without_selection_returns_typed_envelope() {
        let registry = SyncRegistry::new();
        let err = registry
            .sync_active(SyncRequest::for_root("/tmp/notes"))
            .expect_err("without active provider sync should fail");
        assert_eq!(err.code, "provider_not_selected");
    }

    #[test]
    fn sync_active_delegates_and_reports_actions() {
        let mut registry = SyncRegistry::new();
        registry
            .register(Arc::new(FakeProvider::new("git_notes")))
            .expect("provider should register");
        registry
            .select_active("git_notes")
            .expect("provider should select");

        let report = registry
            .sync_active(SyncRequest::for_root("/tmp/notes"))
            .expect("sync should succeed");
        assert!(report.pulled && report.added && report.committed);
        assert!(!report.pushed);
        assert_eq!(report.revision.as_deref(), Some("rev-1"));
    }

    #[test]
    fn sync_fails_again_after_clear_active() {
        let mut registry = SyncRegistry::new();
        registry
            .register(Arc::new(FakeProvider::new("git_notes")))
            .expect("provider should register");
        registry
            .select_active("git_notes")
            .expect("provider should select");

        registry.clear_active();
        let err = registry
            .sync_active(SyncRequest::for_root("/tmp/notes"))
            .expect_err("sync should fail after clear_active");
        assert_eq!(err.code, "provider_not_selected");
    }
}
