//! Composition template authoring, open to shotcallers and admins.

use super::admin::require_officer;
use crate::auth::Session;
use crate::error::{CoreError, Result};
use crate::models::{Composition, CompositionRequirement};
use crate::store::DataStore;
use uuid::Uuid;

/// Fields of the composition editor form.
#[derive(Debug, Clone)]
pub struct NewComposition {
    pub name: String,
    pub description: Option<String>,
    pub total_groups: u8,
    pub requirements: Vec<CompositionRequirement>,
}

/// Create a composition template. The per-group capacity and group-range
/// rules are checked here, before anything is stored.
pub fn create_composition(
    store: &mut dyn DataStore,
    session: &Session,
    form: NewComposition,
) -> Result<Composition> {
    require_officer(session)?;
    if form.name.trim().is_empty() {
        return Err(CoreError::Validation(
            "composition name is required".to_string(),
        ));
    }
    let composition = Composition {
        id: Uuid::new_v4(),
        name: form.name,
        description: form.description,
        total_groups: form.total_groups,
        requirements: form.requirements,
        created_by: session.user_id(),
    };
    composition.validate()?;
    store.insert_composition(composition.clone())?;
    log::info!(
        "{} created composition {}",
        session.user().username,
        composition.name
    );
    Ok(composition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UserProfile, UserRole};
    use crate::store::MemoryStore;
    use chrono::Utc;

    fn session(role: UserRole) -> Session {
        let now = Utc::now();
        Session::new(UserProfile {
            id: Uuid::new_v4(),
            username: "caller".to_string(),
            pin: "1234".to_string(),
            role,
            is_active: true,
            silver: 0,
            created_at: now,
            updated_at: now,
        })
    }

    fn form(total_groups: u8, quantities: Vec<(u8, u8)>) -> NewComposition {
        NewComposition {
            name: "Bow front".to_string(),
            description: None,
            total_groups,
            requirements: quantities
                .into_iter()
                .map(|(group_number, quantity)| CompositionRequirement {
                    group_number,
                    weapon_id: Uuid::new_v4(),
                    quantity,
                })
                .collect(),
        }
    }

    #[test]
    fn shotcaller_creates_a_composition() {
        let mut store = MemoryStore::new();
        let officer = session(UserRole::Shotcaller);
        let composition =
            create_composition(&mut store, &officer, form(2, vec![(1, 5), (2, 20)])).unwrap();

        assert_eq!(composition.created_by, officer.user_id());
        let stored = store.get_composition(composition.id).unwrap().unwrap();
        assert_eq!(stored.requirements.len(), 2);
    }

    #[test]
    fn over_capacity_group_is_rejected_before_storage() {
        let mut store = MemoryStore::new();
        let officer = session(UserRole::Admin);
        let err = create_composition(&mut store, &officer, form(1, vec![(1, 15), (1, 6)]))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn plain_member_cannot_author_compositions() {
        let mut store = MemoryStore::new();
        let member = session(UserRole::User);
        assert!(matches!(
            create_composition(&mut store, &member, form(1, vec![(1, 1)])),
            Err(CoreError::Unauthorized(_))
        ));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut store = MemoryStore::new();
        let officer = session(UserRole::Shotcaller);
        let mut bad = form(1, vec![(1, 1)]);
        bad.name = " ".to_string();
        assert!(matches!(
            create_composition(&mut store, &officer, bad),
            Err(CoreError::Validation(_))
        ));
    }
}
