use serde::{Deserialize, Serialize};

/// Authenticated owner of remotely stored entries.
///
/// Produced by `lift-auth`, consumed by `lift-store` and `lift-cli`.
/// Contains only data fields, no auth logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerIdentity {
    /// Auth user ID (`sub` claim); the `user_id` column of remote rows.
    pub user_id: String,
    /// Display email of the signed-in user.
    pub email: Option<String>,
}
