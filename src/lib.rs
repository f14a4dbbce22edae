//! kvcache - A network-accessible key-value cache
//!
//! A fixed-capacity, thread-safe LRU cache exposed over HTTP with
//! insert-or-update and lookup operations.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheStore, LruCache};
pub use config::Config;
pub use error::CacheError;
