use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Owner,
    Cleaner,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The persisted session under the `authData` storage key. Token and expiry
/// are only present for cleaner sessions in this demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Login payload for POST /auth/login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub user_type: UserType,
}

impl Credentials {
    pub fn owner(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: None,
            user_type: UserType::Owner,
        }
    }

    pub fn cleaner(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Some(password.into()),
            user_type: UserType::Cleaner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_roundtrips_with_type_rename() {
        let session = AuthSession {
            user: User {
                id: "cleaner-1".to_string(),
                email: "cleaner@lakeclean.com".to_string(),
                user_type: UserType::Cleaner,
                name: Some("Professional Cleaner".to_string()),
            },
            token: Some("demo-cleaner-token".to_string()),
            expires_at: None,
        };

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"type\":\"cleaner\""));

        let back: AuthSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn owner_session_omits_token_fields() {
        let session = AuthSession {
            user: User {
                id: "u-1".to_string(),
                email: "demo@email.com".to_string(),
                user_type: UserType::Owner,
                name: None,
            },
            token: None,
            expires_at: None,
        };

        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("token"));
        assert!(!json.contains("expiresAt"));
    }
}
