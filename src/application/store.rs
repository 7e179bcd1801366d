use tokio::sync::Mutex;

use crate::domain::{
    error::Error,
    persistence::Persister,
    reminder::{Reminder, ReminderId},
};

/// Owns the authoritative in-memory collection and mirrors it to the
/// persister on every mutation. Each operation holds the lock across its
/// whole mutate-then-persist sequence, so writers are serialized and a failed
/// save can roll the collection back before anyone else observes it. Memory
/// and disk never diverge.
pub struct Store<P: Persister> {
    persister: P,
    reminders: Mutex<Vec<Reminder>>,
}

impl<P: Persister> Store<P> {
    pub fn new(persister: P) -> Self {
        Self {
            persister,
            reminders: Mutex::new(Vec::new()),
        }
    }

    /// Populates the collection from the persister. An absent file means "no
    /// data yet": an empty collection is persisted immediately to create it.
    /// A corrupt file is fatal and propagates untouched. Returns the number
    /// of records loaded.
    pub async fn load(&self) -> Result<usize, Error> {
        let mut reminders = self.reminders.lock().await;
        match self.persister.load().await? {
            Some(loaded) => {
                let count = loaded.len();
                *reminders = loaded;
                Ok(count)
            }
            None => {
                reminders.clear();
                self.persister.save(&reminders).await?;
                Ok(0)
            }
        }
    }

    /// Full collection in insertion order.
    pub async fn list(&self) -> Vec<Reminder> {
        self.reminders.lock().await.clone()
    }

    pub async fn get(&self, id: &ReminderId) -> Option<Reminder> {
        self.reminders
            .lock()
            .await
            .iter()
            .find(|r| r.id == *id)
            .cloned()
    }

    /// Appends a fully-populated record and persists. On a failed save the
    /// appended record is popped again.
    pub async fn insert(&self, reminder: Reminder) -> Result<(), Error> {
        let mut reminders = self.reminders.lock().await;
        reminders.push(reminder);
        if let Err(err) = self.persister.save(&reminders).await {
            reminders.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Overwrites the record with matching id in place and persists. On a
    /// failed save the previous value is restored, `updated_at` included.
    pub async fn replace(&self, id: &ReminderId, reminder: Reminder) -> Result<Reminder, Error> {
        let mut reminders = self.reminders.lock().await;
        let index = reminders
            .iter()
            .position(|r| r.id == *id)
            .ok_or(Error::NotFound)?;
        let previous = std::mem::replace(&mut reminders[index], reminder);
        if let Err(err) = self.persister.save(&reminders).await {
            reminders[index] = previous;
            return Err(err);
        }
        Ok(reminders[index].clone())
    }

    /// Deletes and returns the record with matching id, persisting the
    /// shrunken collection. On a failed save the record is reinserted at its
    /// original position.
    pub async fn remove(&self, id: &ReminderId) -> Result<Reminder, Error> {
        let mut reminders = self.reminders.lock().await;
        let index = reminders
            .iter()
            .position(|r| r.id == *id)
            .ok_or(Error::NotFound)?;
        let removed = reminders.remove(index);
        if let Err(err) = self.persister.save(&reminders).await {
            reminders.insert(index, removed);
            return Err(err);
        }
        Ok(removed)
    }
}
