use chrono::{DateTime, TimeDelta, Utc};
use lift_core::OwnerIdentity;
use serde::{Deserialize, Serialize};

/// A signed-in session as persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user_id: String,
    pub email: Option<String>,
}

impl Session {
    /// Owner identity carried by this session.
    #[must_use]
    pub fn identity(&self) -> OwnerIdentity {
        OwnerIdentity {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
        }
    }

    /// Check if the access token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + TimeDelta::seconds(buffer_secs);
        self.expires_at <= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_session(expires_at: DateTime<Utc>) -> Session {
        Session {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at,
            user_id: "user-1".into(),
            email: Some("lifter@example.de".into()),
        }
    }

    #[test]
    fn identity_maps_fields() {
        let identity = make_session(Utc::now()).identity();
        assert_eq!(identity.user_id, "user-1");
        assert_eq!(identity.email.as_deref(), Some("lifter@example.de"));
    }

    #[test]
    fn is_near_expiry_false_when_far_future() {
        let session = make_session(Utc::now() + TimeDelta::hours(1));
        assert!(!session.is_near_expiry(60));
    }

    #[test]
    fn is_near_expiry_true_when_past() {
        let session = make_session(Utc::now() - TimeDelta::seconds(10));
        assert!(session.is_near_expiry(60));
    }

    #[test]
    fn is_near_expiry_true_within_buffer() {
        let session = make_session(Utc::now() + TimeDelta::seconds(30));
        assert!(session.is_near_expiry(60));
    }
}
