use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::applications::domain::Field;
use crate::applications::messages::Locale;
use crate::applications::service::ApplicationIntakeService;
use crate::applications::storage::{BlobStorage, MemoryStorage, StorageError};
use crate::applications::store::{Clock, SubmissionStore, DEFAULT_STORAGE_KEY};
use crate::applications::validation::ApplicationDraft;

pub(super) const START_MILLIS: i64 = 1_727_000_000_000;

/// Clock that only advances when told to.
#[derive(Debug)]
pub(super) struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub(super) fn at(millis: i64) -> Arc<Self> {
        Arc::new(Self {
            now: AtomicI64::new(millis),
        })
    }

    pub(super) fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

pub(super) fn valid_draft() -> ApplicationDraft {
    ApplicationDraft::new()
        .with(Field::Name, "Joana Silva")
        .with(Field::Email, "joana.silva@example.com")
        .with(Field::Phone, "11987654321")
        .with(Field::LinkedinUrl, "https://www.linkedin.com/in/joana-silva")
        .with(Field::EducationLevel, "bachelor")
        .with(Field::Course, "Ciência da Computação")
        .with(Field::Institution, "Universidade de São Paulo")
        .with(Field::LastCompany, "Acme Logística")
        .with(Field::LastPosition, "Desenvolvedora Backend")
        .with(Field::ExperiencePeriod, "2020-2025")
        .with(Field::TechnicalSkills, "Rust, PostgreSQL, Kubernetes")
        .with(Field::SoftSkills, "Comunicação, trabalho em equipe")
        .with(Field::SalaryExpectation, 9500)
        .with(Field::Languages, json!(["Portuguese", "English"]))
        .with(Field::ResumeUrl, "https://drive.google.com/file/d/joana-cv")
        .with(Field::TermsAccepted, true)
}

pub(super) fn second_draft() -> ApplicationDraft {
    valid_draft()
        .with(Field::Name, "Carlos Pereira")
        .with(Field::Email, "carlos@example.com")
        .with(Field::Phone, "2133334444")
        .with(Field::EducationLevel, "master")
        .with(Field::Languages, json!(["Spanish"]))
}

pub(super) fn memory_store(clock: Arc<ManualClock>) -> Arc<SubmissionStore<MemoryStorage>> {
    Arc::new(SubmissionStore::with_options(
        MemoryStorage::new(),
        DEFAULT_STORAGE_KEY,
        clock,
    ))
}

pub(super) fn build_service() -> (
    ApplicationIntakeService<MemoryStorage>,
    Arc<SubmissionStore<MemoryStorage>>,
    Arc<ManualClock>,
) {
    let clock = ManualClock::at(START_MILLIS);
    let store = memory_store(clock.clone());
    let service = ApplicationIntakeService::new(store.clone(), Locale::En);
    (service, store, clock)
}

/// Accepts reads but refuses every write, like a full quota.
pub(super) struct QuotaExceededStorage;

impl BlobStorage for QuotaExceededStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _blob: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }
}

pub(super) struct UnreadableStorage;

impl BlobStorage for UnreadableStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disk offline".to_string()))
    }

    fn write(&self, _key: &str, _blob: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
