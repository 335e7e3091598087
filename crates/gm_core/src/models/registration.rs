use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A player's submitted weapon preferences for one activity.
///
/// One registration per (activity, user); re-submitting replaces the previous
/// one. The first choice is mandatory, the other two optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub id: Uuid,
    pub activity_id: Uuid,
    pub user_id: Uuid,
    pub weapon1_id: Uuid,
    pub weapon2_id: Option<Uuid>,
    pub weapon3_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    /// Ranked weapon choices, first choice first.
    pub fn weapon_choices(&self) -> impl Iterator<Item = Uuid> + '_ {
        std::iter::once(self.weapon1_id)
            .chain(self.weapon2_id)
            .chain(self.weapon3_id)
    }

    pub fn has_weapon(&self, weapon_id: Uuid) -> bool {
        self.weapon_choices().any(|id| id == weapon_id)
    }
}
