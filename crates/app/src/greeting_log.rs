use dtimelog_core::GreetingRecord;
use dtimelog_storage::{Database, GreetingLogError, StorageError};
use thiserror::Error;
use tracing::debug;

/// Errors raised while appending to the greeting log.
#[derive(Debug, Error)]
pub enum LogError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    GreetingLog(#[from] GreetingLogError),
}

/// Opens the greeting log at `database_url`, migrates it and appends `record`.
pub async fn append(database_url: &str, record: &GreetingRecord) -> Result<String, LogError> {
    let database = Database::connect(database_url).await?;
    database.run_migrations().await?;
    debug!(stage = "storage", "greeting log ready");

    let id = database.greeting_log().insert(record).await?;
    Ok(id)
}
