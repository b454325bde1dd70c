//! lumina-core
//!
//! Pure domain types and storage key conventions.
//! No I/O; this is the shared vocabulary of the Lumina system.

pub mod error;
pub mod models;
pub mod store_keys;
