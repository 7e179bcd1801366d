pub mod reminder_service;
pub mod store;
