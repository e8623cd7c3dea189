use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use super::domain::ApplicationRecord;
use super::messages::Locale;
use super::storage::BlobStorage;
use super::store::{StoreError, SubmissionStore};
use super::validation::{ApplicationDraft, ValidationErrors, Validator};
use super::views::SubmissionCard;

/// Service composing the validator and the submission store.
pub struct ApplicationIntakeService<S> {
    validator: Validator,
    store: Arc<SubmissionStore<S>>,
}

impl<S> ApplicationIntakeService<S>
where
    S: BlobStorage + 'static,
{
    pub fn new(store: Arc<SubmissionStore<S>>, locale: Locale) -> Self {
        Self {
            validator: Validator::new(locale),
            store,
        }
    }

    pub fn locale(&self) -> Locale {
        self.validator.locale()
    }

    /// Validate the draft and, when every field passes, append it to the store.
    pub fn submit(&self, draft: &ApplicationDraft) -> Result<ApplicationRecord, IntakeError> {
        let application = self.validator.validate(draft).map_err(|errors| {
            info!(invalid_fields = errors.len(), "submission rejected");
            errors
        })?;

        let record = self.store.append(application)?;
        Ok(record)
    }

    pub fn submissions(&self) -> Vec<ApplicationRecord> {
        self.store.records()
    }

    /// Cards for the list view, re-read from durable storage so other writers show up.
    pub fn cards(&self) -> Result<Vec<SubmissionCard>, IntakeError> {
        let locale = self.locale();
        let records = self.store.refresh()?;
        Ok(records
            .iter()
            .map(|record| SubmissionCard::from_record(record, locale))
            .collect())
    }

    pub fn export(&self) -> Result<String, IntakeError> {
        Ok(self.store.export_all()?)
    }

    pub fn export_to(&self, dir: &Path, file_name: &str) -> Result<PathBuf, IntakeError> {
        Ok(self.store.export_to(dir, file_name)?)
    }

    pub fn clear(&self) -> Result<(), IntakeError> {
        self.store.clear()?;
        Ok(())
    }

    /// Destructive recovery: wipe durable storage and reload from the now-empty state.
    pub fn reset(&self) -> Result<Vec<ApplicationRecord>, IntakeError> {
        warn!(key = %self.store.key(), "resetting stored submissions");
        self.store.clear()?;
        Ok(self.store.load())
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
}
