use thiserror::Error;

/// Error kinds surfaced by the store and service layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected input; no state was changed.
    #[error("{0}")]
    Validation(String),

    /// No reminder with the requested id.
    #[error("Reminder not found")]
    NotFound,

    /// The write to the persisted file failed. The in-memory collection has
    /// been rolled back to the last persisted state.
    #[error("failed to persist reminders")]
    Persistence(#[source] std::io::Error),

    /// The persisted file exists but does not parse. Fatal at startup; the
    /// process must not overwrite user data it cannot read.
    #[error("reminder file {path} is corrupt")]
    CorruptStore {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
