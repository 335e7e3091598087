use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Upcoming => "upcoming",
            ActivityStatus::Ongoing => "ongoing",
            ActivityStatus::Completed => "completed",
        }
    }
}

impl FromStr for ActivityStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(ActivityStatus::Upcoming),
            "ongoing" => Ok(ActivityStatus::Ongoing),
            "completed" => Ok(ActivityStatus::Completed),
            other => Err(format!("unknown activity status: {other}")),
        }
    }
}

/// Scheduled group event players register for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub composition_id: Option<Uuid>,
    pub scheduled_at: DateTime<Utc>,
    pub status: ActivityStatus,
    /// Once locked the roster is read-only for everyone.
    pub roster_locked: bool,
    pub created_by: Uuid,
}

impl Activity {
    pub fn is_completed(&self) -> bool {
        self.status == ActivityStatus::Completed
    }
}
