use super::{RosterGrid, WeaponSelection};
use crate::auth::{can_manage, Session};
use crate::error::{CoreError, Result};
use crate::models::{Activity, ActivityStatus, Composition, Registration};
use crate::store::DataStore;
use uuid::Uuid;

/// Everything the roster screen works on for one activity: the activity
/// itself, its composition, the registration pool, the armed-weapon
/// selection and the slot grid. Mutations are in-memory only until
/// [`RosterBoard::save`].
#[derive(Debug, Clone)]
pub struct RosterBoard {
    activity: Activity,
    composition: Option<Composition>,
    registrations: Vec<Registration>,
    selection: WeaponSelection,
    grid: RosterGrid,
}

impl RosterBoard {
    /// Load the full board state from the store. Fails with NotFound when
    /// the activity does not exist; a missing composition is tolerated and
    /// yields the one-group fallback grid.
    pub fn load(store: &dyn DataStore, activity_id: Uuid) -> Result<Self> {
        let activity = store
            .get_activity(activity_id)?
            .ok_or_else(|| CoreError::NotFound(format!("activity {activity_id}")))?;
        let composition = match activity.composition_id {
            Some(composition_id) => store.get_composition(composition_id)?,
            None => None,
        };
        let registrations = store.list_registrations(activity_id)?;
        let persisted = store.list_roster_assignments(activity_id)?;

        let selection = WeaponSelection::from_registrations(&registrations);
        let grid = RosterGrid::build(activity_id, composition.as_ref(), &persisted);

        Ok(Self {
            activity,
            composition,
            registrations,
            selection,
            grid,
        })
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn composition(&self) -> Option<&Composition> {
        self.composition.as_ref()
    }

    pub fn grid(&self) -> &RosterGrid {
        &self.grid
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn registration(&self, registration_id: Uuid) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.id == registration_id)
    }

    pub fn registration_for_user(&self, user_id: Uuid) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.user_id == user_id)
    }

    /// Registrants not yet seated anywhere in the grid. This is where
    /// single-seat-per-user is enforced.
    pub fn available_registrations(&self) -> Vec<&Registration> {
        let occupied = self.grid.occupied_user_ids();
        self.registrations
            .iter()
            .filter(|r| !occupied.contains(&r.user_id))
            .collect()
    }

    pub fn can_edit(&self, session: &Session) -> bool {
        can_manage(session.user(), &self.activity) && !self.activity.roster_locked
    }

    fn ensure_editable(&self, session: &Session) -> Result<()> {
        let user = session.user();
        if !user.is_active || !user.role.is_privileged() {
            return Err(CoreError::Unauthorized(
                "roster editing requires an active shotcaller or admin".to_string(),
            ));
        }
        if self.activity.roster_locked || self.activity.is_completed() {
            return Err(CoreError::RosterLocked);
        }
        Ok(())
    }

    /// Arm one of a registrant's weapon choices for their next assignment.
    pub fn select_weapon(&mut self, registration_id: Uuid, weapon_id: Uuid) -> Result<()> {
        let registration = self
            .registrations
            .iter()
            .find(|r| r.id == registration_id)
            .ok_or_else(|| CoreError::NotFound(format!("registration {registration_id}")))?;
        self.selection.select(registration, weapon_id)
    }

    /// Seat a registrant on (group, position) with their armed weapon.
    pub fn assign_registrant(
        &mut self,
        session: &Session,
        group: u8,
        position: u8,
        registration_id: Uuid,
    ) -> Result<()> {
        self.ensure_editable(session)?;
        let registration = self
            .registrations
            .iter()
            .find(|r| r.id == registration_id)
            .ok_or_else(|| CoreError::NotFound(format!("registration {registration_id}")))?;
        let weapon_id = self
            .selection
            .armed(registration_id)
            .unwrap_or(registration.weapon1_id);
        let user_id = registration.user_id;
        self.grid.assign(group, position, user_id, weapon_id)
    }

    pub fn unassign(&mut self, session: &Session, group: u8, position: u8) -> Result<()> {
        self.ensure_editable(session)?;
        self.grid.unassign(group, position)
    }

    /// Persist the grid: replace the activity's stored rows with one row per
    /// occupied slot, in a single store operation.
    pub fn save(&self, store: &mut dyn DataStore, session: &Session) -> Result<()> {
        self.ensure_editable(session)?;
        let rows = self.grid.to_new_assignments();
        store.replace_roster_assignments(self.activity.id, &rows, session.user_id())?;
        log::info!(
            "saved roster for activity {}: {} occupied slots",
            self.activity.id,
            rows.len()
        );
        Ok(())
    }

    /// Save, then lock the roster and move the activity to ongoing.
    pub fn lock_and_start(&mut self, store: &mut dyn DataStore, session: &Session) -> Result<()> {
        self.save(store, session)?;
        self.activity.roster_locked = true;
        self.activity.status = ActivityStatus::Ongoing;
        store.update_activity(self.activity.clone())?;
        log::info!("activity {} locked and started", self.activity.id);
        Ok(())
    }
}
