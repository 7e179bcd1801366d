use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::store::Store;
use crate::domain::error::Error;
use crate::domain::persistence::Persister;
use crate::domain::reminder::{CreateReminder, Reminder, ReminderId, UpdateReminder};

#[async_trait]
pub trait ReminderService: Send + Sync + 'static {
    async fn list(&self) -> Vec<Reminder>;
    async fn get(&self, id: &ReminderId) -> Result<Reminder, Error>;
    async fn create(&self, input: CreateReminder) -> Result<Reminder, Error>;
    async fn update(&self, id: &ReminderId, input: UpdateReminder) -> Result<Reminder, Error>;
    async fn delete(&self, id: &ReminderId) -> Result<Reminder, Error>;
    async fn complete(&self, id: &ReminderId) -> Result<Reminder, Error>;
}

pub struct ReminderServiceImpl<P: Persister> {
    store: Arc<Store<P>>,
}

impl<P: Persister> ReminderServiceImpl<P> {
    pub fn new(store: Arc<Store<P>>) -> Self {
        Self { store }
    }
}

impl<P: Persister> Clone for ReminderServiceImpl<P> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

#[async_trait]
impl<P: Persister> ReminderService for ReminderServiceImpl<P> {
    async fn list(&self) -> Vec<Reminder> {
        self.store.list().await
    }

    async fn get(&self, id: &ReminderId) -> Result<Reminder, Error> {
        self.store.get(id).await.ok_or(Error::NotFound)
    }

    async fn create(&self, input: CreateReminder) -> Result<Reminder, Error> {
        let title = input.title.unwrap_or_default();
        if title.trim().is_empty() {
            return Err(Error::Validation("Title is required".into()));
        }
        let now = Utc::now();
        let reminder = Reminder {
            id: ReminderId::new(),
            title,
            description: input.description.unwrap_or_default(),
            due_date: input.due_date,
            priority: input.priority.unwrap_or_default(),
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.store.insert(reminder.clone()).await?;
        Ok(reminder)
    }

    // The get/replace pair below is not one critical section: two overlapping
    // updates to the same id are each applied against the value they read,
    // last write wins. Persistence itself stays serialized inside the store.
    async fn update(&self, id: &ReminderId, input: UpdateReminder) -> Result<Reminder, Error> {
        let mut reminder = self.store.get(id).await.ok_or(Error::NotFound)?;
        reminder.merge(input, Utc::now());
        self.store.replace(id, reminder).await
    }

    async fn delete(&self, id: &ReminderId) -> Result<Reminder, Error> {
        self.store.remove(id).await
    }

    async fn complete(&self, id: &ReminderId) -> Result<Reminder, Error> {
        let mut reminder = self.store.get(id).await.ok_or(Error::NotFound)?;
        reminder.completed = true;
        reminder.updated_at = Utc::now();
        self.store.replace(id, reminder).await
    }
}
