use crate::error::{CoreError, Result};
use crate::models::Registration;
use std::collections::HashMap;
use uuid::Uuid;

/// Which of each pending registrant's weapon choices is currently armed.
///
/// The armed weapon is what the next assignment of that registrant uses.
/// Defaults to the first choice for every registration.
#[derive(Debug, Clone, Default)]
pub struct WeaponSelection {
    armed: HashMap<Uuid, Uuid>,
}

impl WeaponSelection {
    pub fn from_registrations(registrations: &[Registration]) -> Self {
        let armed = registrations
            .iter()
            .map(|reg| (reg.id, reg.weapon1_id))
            .collect();
        Self { armed }
    }

    /// Arm one of the registration's own choices for the next assignment.
    pub fn select(&mut self, registration: &Registration, weapon_id: Uuid) -> Result<()> {
        if !registration.has_weapon(weapon_id) {
            return Err(CoreError::Validation(format!(
                "weapon {} is not among the registrant's choices",
                weapon_id
            )));
        }
        self.armed.insert(registration.id, weapon_id);
        Ok(())
    }

    pub fn armed(&self, registration_id: Uuid) -> Option<Uuid> {
        self.armed.get(&registration_id).copied()
    }
}
