//! lumina-storage
//!
//! JSON records on the local filesystem. Thin layer over `tokio::fs`, laid
//! out by the key conventions in `lumina_core::store_keys`. Every scoped
//! operation takes the calling therapist's session explicitly.

pub mod error;
pub mod objects;
pub mod state;
pub mod store;
