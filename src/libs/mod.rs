pub mod config;
pub mod data_storage;
pub mod formatter;
pub mod messages;
pub mod progress;
pub mod streak;
pub mod summary;
pub mod timer;
pub mod tracker;
pub mod view;
