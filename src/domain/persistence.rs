use async_trait::async_trait;

use super::error::Error;
use super::reminder::Reminder;

/// Durable storage for the reminder collection. Every save is a full rewrite;
/// there is no append or patch path.
#[async_trait]
pub trait Persister: Send + Sync + 'static {
    /// Returns `Ok(None)` when nothing has been persisted yet (not an error),
    /// `Error::CorruptStore` when stored data exists but cannot be parsed.
    async fn load(&self) -> Result<Option<Vec<Reminder>>, Error>;

    /// Overwrites the persisted collection with `reminders`.
    async fn save(&self, reminders: &[Reminder]) -> Result<(), Error>;
}
