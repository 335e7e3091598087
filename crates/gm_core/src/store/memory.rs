use super::{AssignmentRow, DataStore, NewAssignment};
use crate::error::{CoreError, Result};
use crate::models::{Activity, Composition, Registration, UserProfile, Weapon};
use chrono::Utc;
use uuid::Uuid;

/// In-memory [`DataStore`] holding plain domain values.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    weapons: Vec<Weapon>,
    users: Vec<UserProfile>,
    activities: Vec<Activity>,
    compositions: Vec<Composition>,
    registrations: Vec<Registration>,
    assignments: Vec<AssignmentRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Seeding helpers; activities and compositions have no trait-level insert
    // because their authoring screens sit outside the core.

    pub fn add_activity(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    pub fn add_composition(&mut self, composition: Composition) {
        self.compositions.push(composition);
    }

    pub fn add_weapon(&mut self, weapon: Weapon) {
        self.weapons.push(weapon);
    }

    pub fn add_user(&mut self, user: UserProfile) {
        self.users.push(user);
    }

    pub fn add_registration(&mut self, registration: Registration) {
        self.registrations.push(registration);
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}

impl DataStore for MemoryStore {
    fn list_active_weapons(&self) -> Result<Vec<Weapon>> {
        Ok(self.weapons.iter().filter(|w| w.is_active).cloned().collect())
    }

    fn get_weapon(&self, id: Uuid) -> Result<Option<Weapon>> {
        Ok(self.weapons.iter().find(|w| w.id == id).cloned())
    }

    fn insert_weapon(&mut self, weapon: Weapon) -> Result<()> {
        self.weapons.push(weapon);
        Ok(())
    }

    fn update_weapon(&mut self, weapon: Weapon) -> Result<()> {
        match self.weapons.iter_mut().find(|w| w.id == weapon.id) {
            Some(slot) => {
                *slot = weapon;
                Ok(())
            }
            None => Err(CoreError::NotFound(format!("weapon {}", weapon.id))),
        }
    }

    fn get_user(&self, id: Uuid) -> Result<Option<UserProfile>> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<UserProfile>> {
        Ok(self.users.iter().find(|u| u.username == username).cloned())
    }

    fn list_users(&self) -> Result<Vec<UserProfile>> {
        Ok(self.users.clone())
    }

    fn insert_user(&mut self, user: UserProfile) -> Result<()> {
        self.users.push(user);
        Ok(())
    }

    fn update_user(&mut self, user: UserProfile) -> Result<()> {
        match self.users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                *slot = user;
                Ok(())
            }
            None => Err(CoreError::NotFound(format!("user {}", user.id))),
        }
    }

    fn get_activity(&self, id: Uuid) -> Result<Option<Activity>> {
        Ok(self.activities.iter().find(|a| a.id == id).cloned())
    }

    fn update_activity(&mut self, activity: Activity) -> Result<()> {
        match self.activities.iter_mut().find(|a| a.id == activity.id) {
            Some(slot) => {
                *slot = activity;
                Ok(())
            }
            None => Err(CoreError::NotFound(format!("activity {}", activity.id))),
        }
    }

    fn get_composition(&self, id: Uuid) -> Result<Option<Composition>> {
        Ok(self.compositions.iter().find(|c| c.id == id).cloned())
    }

    fn insert_composition(&mut self, composition: Composition) -> Result<()> {
        composition.validate()?;
        self.compositions.push(composition);
        Ok(())
    }

    fn list_registrations(&self, activity_id: Uuid) -> Result<Vec<Registration>> {
        Ok(self
            .registrations
            .iter()
            .filter(|r| r.activity_id == activity_id)
            .cloned()
            .collect())
    }

    fn upsert_registration(&mut self, registration: Registration) -> Result<()> {
        match self
            .registrations
            .iter_mut()
            .find(|r| r.activity_id == registration.activity_id && r.user_id == registration.user_id)
        {
            Some(existing) => *existing = registration,
            None => self.registrations.push(registration),
        }
        Ok(())
    }

    fn list_roster_assignments(&self, activity_id: Uuid) -> Result<Vec<AssignmentRow>> {
        Ok(self
            .assignments
            .iter()
            .filter(|a| a.activity_id == activity_id)
            .copied()
            .collect())
    }

    fn replace_roster_assignments(
        &mut self,
        activity_id: Uuid,
        rows: &[NewAssignment],
        assigned_by: Uuid,
    ) -> Result<()> {
        // Stage the stamped rows before touching the existing set, so an
        // error cannot leave the roster half-replaced.
        let assigned_at = Utc::now();
        let stamped: Vec<AssignmentRow> = rows
            .iter()
            .map(|row| AssignmentRow {
                activity_id,
                user_id: row.user_id,
                weapon_id: row.weapon_id,
                group_number: row.group_number,
                slot_position: row.slot_position,
                assigned_by,
                assigned_at,
            })
            .collect();
        self.assignments.retain(|a| a.activity_id != activity_id);
        self.assignments.extend(stamped);
        Ok(())
    }
}
