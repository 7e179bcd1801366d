use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::{error::Error, persistence::Persister, reminder::Reminder};

/// File-backed persister: the whole collection lives in one pretty-printed
/// JSON array at a fixed path.
pub struct JsonFilePersister {
    path: PathBuf,
}

impl JsonFilePersister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl Persister for JsonFilePersister {
    async fn load(&self) -> Result<Option<Vec<Reminder>>, Error> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let reminders =
                    serde_json::from_slice(&bytes).map_err(|source| Error::CorruptStore {
                        path: self.path.display().to_string(),
                        source,
                    })?;
                Ok(Some(reminders))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::Persistence(err)),
        }
    }

    async fn save(&self, reminders: &[Reminder]) -> Result<(), Error> {
        let bytes = serde_json::to_vec_pretty(reminders)
            .map_err(|err| Error::Persistence(io::Error::from(err)))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(Error::Persistence)
    }
}
