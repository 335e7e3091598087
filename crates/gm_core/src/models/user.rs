use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Shotcaller,
    User,
}

impl UserRole {
    /// Admin and shotcaller may build rosters and manage member accounts.
    pub fn is_privileged(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Shotcaller)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Shotcaller => "shotcaller",
            UserRole::User => "user",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "shotcaller" => Ok(UserRole::Shotcaller),
            "user" => Ok(UserRole::User),
            other => Err(format!("unknown user role: {other}")),
        }
    }
}

/// Guild member account.
///
/// The PIN is stored as entered; credential hardening is explicitly out of
/// scope for this application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub pin: String,
    pub role: UserRole,
    pub is_active: bool,
    /// Silver balance shown on the leaderboard, adjusted by officers.
    pub silver: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_roundtrip() {
        for role in [UserRole::Admin, UserRole::Shotcaller, UserRole::User] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("officer".parse::<UserRole>().is_err());
    }

    #[test]
    fn privileged_roles() {
        assert!(UserRole::Admin.is_privileged());
        assert!(UserRole::Shotcaller.is_privileged());
        assert!(!UserRole::User.is_privileged());
    }
}
