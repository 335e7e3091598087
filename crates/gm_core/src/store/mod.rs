//! Data-access boundary.
//!
//! The core talks to whatever holds the guild's data through [`DataStore`];
//! the shape mirrors the hosted-database tables but carries domain types only.
//! [`MemoryStore`] is the in-process implementation used by tests and small
//! deployments; `gm_adapter` provides the row-backed one.

pub mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::models::{Activity, Composition, Registration, UserProfile, Weapon};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted roster cell as read back from storage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AssignmentRow {
    pub activity_id: Uuid,
    pub user_id: Uuid,
    pub weapon_id: Uuid,
    pub group_number: u8,
    pub slot_position: u8,
    pub assigned_by: Uuid,
    pub assigned_at: DateTime<Utc>,
}

/// An occupied cell about to be persisted; the store stamps attribution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NewAssignment {
    pub user_id: Uuid,
    pub weapon_id: Uuid,
    pub group_number: u8,
    pub slot_position: u8,
}

pub trait DataStore {
    fn list_active_weapons(&self) -> Result<Vec<Weapon>>;
    fn get_weapon(&self, id: Uuid) -> Result<Option<Weapon>>;
    fn insert_weapon(&mut self, weapon: Weapon) -> Result<()>;
    /// Fails with NotFound when the weapon does not exist.
    fn update_weapon(&mut self, weapon: Weapon) -> Result<()>;

    fn get_user(&self, id: Uuid) -> Result<Option<UserProfile>>;
    fn find_user_by_username(&self, username: &str) -> Result<Option<UserProfile>>;
    fn list_users(&self) -> Result<Vec<UserProfile>>;
    fn insert_user(&mut self, user: UserProfile) -> Result<()>;
    /// Fails with NotFound when the user does not exist.
    fn update_user(&mut self, user: UserProfile) -> Result<()>;

    fn get_activity(&self, id: Uuid) -> Result<Option<Activity>>;
    /// Fails with NotFound when the activity does not exist.
    fn update_activity(&mut self, activity: Activity) -> Result<()>;

    /// Composition template with its requirement lines.
    fn get_composition(&self, id: Uuid) -> Result<Option<Composition>>;
    /// Fails with Validation when the template breaks its authoring rules.
    fn insert_composition(&mut self, composition: Composition) -> Result<()>;

    fn list_registrations(&self, activity_id: Uuid) -> Result<Vec<Registration>>;
    /// Insert-or-replace keyed by (activity, user); last write wins.
    fn upsert_registration(&mut self, registration: Registration) -> Result<()>;

    fn list_roster_assignments(&self, activity_id: Uuid) -> Result<Vec<AssignmentRow>>;
    /// Replace the activity's whole roster in one step. Implementations must
    /// not expose a window where the previous rows are gone and the new ones
    /// not yet visible.
    fn replace_roster_assignments(
        &mut self,
        activity_id: Uuid,
        rows: &[NewAssignment],
        assigned_by: Uuid,
    ) -> Result<()>;
}
