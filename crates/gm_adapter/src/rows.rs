//! Flat storage rows, one struct per table of the hosted database schema.
//!
//! Rows keep the storage representation (string enums, wide integer
//! columns, nullable references); translation into domain types lives in
//! [`crate::mapper`] so row shapes never leak past the adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileRow {
    pub id: Uuid,
    pub username: String,
    pub pin: String,
    /// "admin" | "shotcaller" | "user"
    pub role: String,
    pub is_active: bool,
    pub silver: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponRow {
    pub id: Uuid,
    pub name: String,
    pub tier: String,
    pub item_power: Option<i32>,
    pub identifier: String,
    pub icon_url: Option<String>,
    pub category_name: Option<String>,
    pub subcategory_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub total_groups: i16,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionSlotRow {
    pub id: Uuid,
    pub composition_id: Uuid,
    pub group_number: i16,
    /// Null means a free "fill" line with no weapon requirement.
    pub weapon_id: Option<Uuid>,
    pub quantity: i16,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub composition_id: Option<Uuid>,
    pub scheduled_at: DateTime<Utc>,
    /// "upcoming" | "ongoing" | "completed"
    pub status: String,
    pub roaster_locked: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRow {
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

/// One persisted roster cell ("roasters" table, original spelling kept).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRow {
    pub id: Uuid,
    pub activity_id: Uuid,
    pub user_id: Uuid,
    pub weapon_id: Uuid,
    pub group_number: i16,
    pub slot_position: i16,
    pub assigned_by: Uuid,
    pub assigned_at: DateTime<Utc>,
}
