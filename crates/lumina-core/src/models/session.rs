use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated therapist on whose behalf a storage call is made.
///
/// Passed explicitly to every scoped storage operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapistSession {
    pub user_id: Uuid,
}

impl TherapistSession {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    pub fn owns(&self, owner: Uuid) -> bool {
        self.user_id == owner
    }
}
