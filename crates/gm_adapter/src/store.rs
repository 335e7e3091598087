//! Row-backed [`DataStore`] implementation.

use crate::mapper;
use crate::rows::{
    ActivityRow, CompositionRow, CompositionSlotRow, RegistrationRow, RosterRow, UserProfileRow,
    WeaponRow,
};
use chrono::Utc;
use gm_core::store::{AssignmentRow, DataStore, NewAssignment};
use gm_core::{
    Activity, Composition, CoreError, Registration, Result, UserProfile, Weapon,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The whole guild dataset as flat tables. Serializable as a unit so a
/// snapshot captures a consistent view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuildTables {
    pub users: Vec<UserProfileRow>,
    pub weapons: Vec<WeaponRow>,
    pub compositions: Vec<CompositionRow>,
    pub composition_slots: Vec<CompositionSlotRow>,
    pub activities: Vec<ActivityRow>,
    pub registrations: Vec<RegistrationRow>,
    pub roasters: Vec<RosterRow>,
}

/// [`DataStore`] over [`GuildTables`], translating rows at the boundary.
#[derive(Debug, Clone, Default)]
pub struct TableStore {
    tables: GuildTables,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: GuildTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &GuildTables {
        &self.tables
    }

    pub fn into_tables(self) -> GuildTables {
        self.tables
    }

    /// Seed an activity. Activity authoring screens sit outside the core,
    /// so this is an adapter-level operation, not part of the trait.
    pub fn insert_activity(&mut self, activity: &Activity) {
        self.tables.activities.push(mapper::activity_to_row(activity, None));
    }
}

impl DataStore for TableStore {
    fn list_active_weapons(&self) -> Result<Vec<Weapon>> {
        self.tables
            .weapons
            .iter()
            .filter(|row| row.is_active)
            .map(mapper::weapon_from_row)
            .collect()
    }

    fn get_weapon(&self, id: Uuid) -> Result<Option<Weapon>> {
        self.tables
            .weapons
            .iter()
            .find(|row| row.id == id)
            .map(mapper::weapon_from_row)
            .transpose()
    }

    fn insert_weapon(&mut self, weapon: Weapon) -> Result<()> {
        let row = mapper::weapon_to_row(&weapon)?;
        self.tables.weapons.push(row);
        Ok(())
    }

    fn update_weapon(&mut self, weapon: Weapon) -> Result<()> {
        let mut updated = mapper::weapon_to_row(&weapon)?;
        match self.tables.weapons.iter_mut().find(|row| row.id == weapon.id) {
            Some(row) => {
                updated.created_at = row.created_at;
                *row = updated;
                Ok(())
            }
            None => Err(CoreError::NotFound(format!("weapon {}", weapon.id))),
        }
    }

    fn get_user(&self, id: Uuid) -> Result<Option<UserProfile>> {
        self.tables
            .users
            .iter()
            .find(|row| row.id == id)
            .map(mapper::user_from_row)
            .transpose()
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<UserProfile>> {
        self.tables
            .users
            .iter()
            .find(|row| row.username == username)
            .map(mapper::user_from_row)
            .transpose()
    }

    fn list_users(&self) -> Result<Vec<UserProfile>> {
        self.tables.users.iter().map(mapper::user_from_row).collect()
    }

    fn insert_user(&mut self, user: UserProfile) -> Result<()> {
        self.tables.users.push(mapper::user_to_row(&user));
        Ok(())
    }

    fn update_user(&mut self, user: UserProfile) -> Result<()> {
        match self.tables.users.iter_mut().find(|row| row.id == user.id) {
            Some(row) => {
                *row = mapper::user_to_row(&user);
                Ok(())
            }
            None => Err(CoreError::NotFound(format!("user {}", user.id))),
        }
    }

    fn get_activity(&self, id: Uuid) -> Result<Option<Activity>> {
        self.tables
            .activities
            .iter()
            .find(|row| row.id == id)
            .map(mapper::activity_from_row)
            .transpose()
    }

    fn update_activity(&mut self, activity: Activity) -> Result<()> {
        match self
            .tables
            .activities
            .iter_mut()
            .find(|row| row.id == activity.id)
        {
            Some(row) => {
                let updated = mapper::activity_to_row(&activity, Some(&*row));
                *row = updated;
                Ok(())
            }
            None => Err(CoreError::NotFound(format!("activity {}", activity.id))),
        }
    }

    fn get_composition(&self, id: Uuid) -> Result<Option<Composition>> {
        self.tables
            .compositions
            .iter()
            .find(|row| row.id == id)
            .map(|row| mapper::composition_from_rows(row, &self.tables.composition_slots))
            .transpose()
    }

    fn insert_composition(&mut self, composition: Composition) -> Result<()> {
        composition.validate()?;
        let (header, slots) = mapper::composition_to_rows(&composition);
        self.tables.compositions.push(header);
        self.tables.composition_slots.extend(slots);
        Ok(())
    }

    fn list_registrations(&self, activity_id: Uuid) -> Result<Vec<Registration>> {
        Ok(self
            .tables
            .registrations
            .iter()
            .filter(|row| row.activity_id == activity_id)
            .map(mapper::registration_from_row)
            .collect())
    }

    fn upsert_registration(&mut self, registration: Registration) -> Result<()> {
        let row = mapper::registration_to_row(&registration);
        match self
            .tables
            .registrations
            .iter_mut()
            .find(|r| r.activity_id == registration.activity_id && r.user_id == registration.user_id)
        {
            Some(existing) => *existing = row,
            None => self.tables.registrations.push(row),
        }
        Ok(())
    }

    fn list_roster_assignments(&self, activity_id: Uuid) -> Result<Vec<AssignmentRow>> {
        self.tables
            .roasters
            .iter()
            .filter(|row| row.activity_id == activity_id)
            .map(mapper::assignment_from_row)
            .collect()
    }

    fn replace_roster_assignments(
        &mut self,
        activity_id: Uuid,
        rows: &[NewAssignment],
        assigned_by: Uuid,
    ) -> Result<()> {
        // Stage the complete replacement first; the old rows are only
        // dropped once every new row has been built.
        let assigned_at = Utc::now();
        let staged: Vec<RosterRow> = rows
            .iter()
            .map(|row| RosterRow {
                id: Uuid::new_v4(),
                activity_id,
                user_id: row.user_id,
                weapon_id: row.weapon_id,
                group_number: i16::from(row.group_number),
                slot_position: i16::from(row.slot_position),
                assigned_by,
                assigned_at,
            })
            .collect();
        self.tables.roasters.retain(|row| row.activity_id != activity_id);
        self.tables.roasters.extend(staged);
        Ok(())
    }
}
