//! # Card Store Crate
//!
//! Durable key/value storage for per-card UI state, shaped after browser
//! `localStorage`: string keys, string values, JSON for structured data.
//!
//! ## Main Components
//!
//! - **store**: the `KeyValueStore` trait and the in-memory `MemoryStore`
//! - **file**: `FileStore`, one JSON object file holding every key
//! - **json**: typed helpers that degrade silently on any storage failure
//! - **keys**: well-known keys and per-feature prefixes
//! - **error**: error types for storage access
//!
//! ## Example Usage
//!
//! ```ignore
//! use card_store::{MemoryStore, json, keys};
//!
//! let store = MemoryStore::new().shared();
//! json::write_json(store.as_ref(), &keys::local_cluster_filter("pods"), &["prod-east"]);
//! let clusters: Option<Vec<String>> =
//!     json::read_json(store.as_ref(), &keys::local_cluster_filter("pods"));
//! ```

pub mod error;
pub mod file;
pub mod json;
pub mod keys;
pub mod store;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use store::{KeyValueStore, MemoryStore, SharedStore};
