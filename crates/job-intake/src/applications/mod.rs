//! Job application intake: field schema, validation, and the persisted submission list.

pub mod boundary;
pub mod domain;
pub mod messages;
pub mod router;
pub mod schema;
pub mod service;
pub mod storage;
pub mod store;
pub mod validation;
pub mod views;

#[cfg(test)]
mod tests;

pub use boundary::{ErrorBoundary, FaultNotice, RenderFault, Rendered};
pub use domain::{
    Application, ApplicationId, ApplicationRecord, EducationLevel, Field, Language,
};
pub use messages::{Locale, Violation};
pub use router::application_router;
pub use schema::{descriptor, FieldDescriptor, FieldKind, FieldValue, Rule, FIELDS};
pub use service::{ApplicationIntakeService, IntakeError};
pub use storage::{BlobStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{
    Clock, StoreError, SubmissionStore, SystemClock, DEFAULT_EXPORT_FILE, DEFAULT_STORAGE_KEY,
};
pub use validation::{validate, ApplicationDraft, ValidationErrors, Validator};
pub use views::{render_cards, SubmissionCard};
