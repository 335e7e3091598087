use crate::auth::Session;
use crate::error::{CoreError, Result};
use crate::models::Registration;
use crate::store::DataStore;
use chrono::Utc;
use uuid::Uuid;

/// What the registration form submits. Weapon slots beyond the first may be
/// left empty.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub weapon1_id: Option<Uuid>,
    pub weapon2_id: Option<Uuid>,
    pub weapon3_id: Option<Uuid>,
    pub notes: Option<String>,
}

/// Submit or update the session user's registration for an activity.
/// One registration per (activity, user); re-submitting replaces it.
pub fn submit_registration(
    store: &mut dyn DataStore,
    session: &Session,
    activity_id: Uuid,
    form: RegistrationForm,
) -> Result<Registration> {
    let activity = store
        .get_activity(activity_id)?
        .ok_or_else(|| CoreError::NotFound(format!("activity {activity_id}")))?;
    if activity.is_completed() {
        return Err(CoreError::Validation(
            "registrations are closed for completed activities".to_string(),
        ));
    }

    let weapon1_id = form
        .weapon1_id
        .ok_or_else(|| CoreError::Validation("select at least one weapon".to_string()))?;

    let now = Utc::now();
    let existing = store
        .list_registrations(activity_id)?
        .into_iter()
        .find(|r| r.user_id == session.user_id());

    let registration = match existing {
        Some(previous) => Registration {
            weapon1_id,
            weapon2_id: form.weapon2_id,
            weapon3_id: form.weapon3_id,
            notes: form.notes,
            updated_at: now,
            ..previous
        },
        None => Registration {
            id: Uuid::new_v4(),
            activity_id,
            user_id: session.user_id(),
            weapon1_id,
            weapon2_id: form.weapon2_id,
            weapon3_id: form.weapon3_id,
            notes: form.notes,
            created_at: now,
            updated_at: now,
        },
    };

    store.upsert_registration(registration.clone())?;
    log::debug!(
        "registration saved for activity {activity_id}, user {}",
        session.user_id()
    );
    Ok(registration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, ActivityStatus, UserProfile, UserRole};
    use crate::store::MemoryStore;

    fn setup(status: ActivityStatus) -> (MemoryStore, Session, Uuid) {
        let mut store = MemoryStore::new();
        let now = Utc::now();
        let user = UserProfile {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            pin: "1234".to_string(),
            role: UserRole::User,
            is_active: true,
            silver: 0,
            created_at: now,
            updated_at: now,
        };
        let activity = Activity {
            id: Uuid::new_v4(),
            name: "ZvZ".to_string(),
            description: None,
            composition_id: None,
            scheduled_at: now,
            status,
            roster_locked: false,
            created_by: user.id,
        };
        let activity_id = activity.id;
        store.add_user(user.clone());
        store.add_activity(activity);
        (store, Session::new(user), activity_id)
    }

    #[test]
    fn first_submission_creates_a_registration() {
        let (mut store, session, activity_id) = setup(ActivityStatus::Upcoming);
        let form = RegistrationForm {
            weapon1_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        let reg = submit_registration(&mut store, &session, activity_id, form).unwrap();
        assert_eq!(reg.user_id, session.user_id());
        assert_eq!(store.list_registrations(activity_id).unwrap().len(), 1);
    }

    #[test]
    fn resubmission_replaces_and_keeps_identity() {
        let (mut store, session, activity_id) = setup(ActivityStatus::Upcoming);
        let first = submit_registration(
            &mut store,
            &session,
            activity_id,
            RegistrationForm {
                weapon1_id: Some(Uuid::new_v4()),
                ..Default::default()
            },
        )
        .unwrap();

        let new_weapon = Uuid::new_v4();
        let second = submit_registration(
            &mut store,
            &session,
            activity_id,
            RegistrationForm {
                weapon1_id: Some(new_weapon),
                notes: Some("can flex".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        let regs = store.list_registrations(activity_id).unwrap();
        assert_eq!(regs.len(), 1);
        assert_eq!(regs[0].weapon1_id, new_weapon);
        assert_eq!(regs[0].notes.as_deref(), Some("can flex"));
    }

    #[test]
    fn missing_first_weapon_is_a_validation_error() {
        let (mut store, session, activity_id) = setup(ActivityStatus::Upcoming);
        let err = submit_registration(
            &mut store,
            &session,
            activity_id,
            RegistrationForm::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn completed_activity_rejects_registration() {
        let (mut store, session, activity_id) = setup(ActivityStatus::Completed);
        let err = submit_registration(
            &mut store,
            &session,
            activity_id,
            RegistrationForm {
                weapon1_id: Some(Uuid::new_v4()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn unknown_activity_is_not_found() {
        let (mut store, session, _) = setup(ActivityStatus::Upcoming);
        let err = submit_registration(
            &mut store,
            &session,
            Uuid::new_v4(),
            RegistrationForm::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }
}
