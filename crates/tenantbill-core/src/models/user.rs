use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Application user. Users are seeded out of band; there is no sign-up flow
/// in this service, and users are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Unique login key. Lookups are exact, case-sensitive matches.
    pub email: String,
    /// Stored and compared in plaintext. Known weakness of the seeded data
    /// set, surfaced in the deployment docs rather than fixed here.
    pub password: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user, safe to return to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User {
            id: "user_1".to_string(),
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
            name: "Ada".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).expect("serialize");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_user_summary_omits_password() {
        let user = User {
            id: "user_1".to_string(),
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
            name: "Ada".to_string(),
            created_at: Utc::now(),
        };
        let summary = UserSummary::from(&user);
        let json = serde_json::to_value(&summary).expect("serialize");
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "a@b.com");
    }
}
