pub mod analysis;
pub mod answers;
pub mod category;
pub mod patient;
pub mod phase;
pub mod recommendation;
pub mod session;
pub mod share;
