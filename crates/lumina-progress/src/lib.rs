//! lumina-progress
//!
//! Longitudinal views over a patient's analysis history and the protocol
//! phase tracker. Pure, synchronous functions over plain records; callers
//! fetch and persist through the storage layer.

pub mod comparative;
pub mod error;
pub mod history;
pub mod labels;
pub mod longitudinal;
pub mod phase;
