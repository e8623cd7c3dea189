use crate::cli::StorageArgs;
use job_intake::applications::{ApplicationIntakeService, FileStorage, SubmissionStore, SystemClock};
use job_intake::config::AppConfig;
use job_intake::error::AppError;
use job_intake::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load configuration, apply CLI overrides, and install the tracing subscriber.
pub(crate) fn prepare(storage: StorageArgs) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(data_dir) = storage.data_dir {
        config.storage.data_dir = data_dir;
    }
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

pub(crate) fn file_backed_service(config: &AppConfig) -> ApplicationIntakeService<FileStorage> {
    debug!(
        data_dir = %config.storage.data_dir.display(),
        key = %config.storage.key,
        "opening submission store"
    );
    let storage = FileStorage::new(config.storage.data_dir.clone());
    let store = SubmissionStore::with_options(
        storage,
        config.storage.key.clone(),
        Arc::new(SystemClock),
    );
    ApplicationIntakeService::new(Arc::new(store), config.locale)
}

/// Parse a `field=value` pair supplied on the command line.
pub(crate) fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
