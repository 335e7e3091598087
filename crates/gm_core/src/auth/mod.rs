//! Account flows and the explicit session object.
//!
//! Sign-up hands out a random 4-digit PIN once; sign-in compares it as
//! entered. Hardening the scheme is out of scope, but the checks live here
//! rather than scattered across screens.

pub mod session;

pub use session::{can_manage, Session};

use crate::error::{CoreError, Result};
use crate::models::{UserProfile, UserRole};
use crate::store::DataStore;
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;

pub fn generate_pin(rng: &mut impl Rng) -> String {
    format!("{:04}", rng.gen_range(0..10_000))
}

pub fn validate_username(username: &str) -> Result<()> {
    if username.len() < USERNAME_MIN_LEN || username.len() > USERNAME_MAX_LEN {
        return Err(CoreError::Validation(format!(
            "username must be {USERNAME_MIN_LEN}-{USERNAME_MAX_LEN} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(CoreError::Validation(
            "username may only contain letters, digits and underscores".to_string(),
        ));
    }
    Ok(())
}

/// Create an account and return it together with the generated PIN. The PIN
/// is shown to the player exactly once.
pub fn sign_up(store: &mut dyn DataStore, username: &str) -> Result<(UserProfile, String)> {
    validate_username(username)?;
    if store.find_user_by_username(username)?.is_some() {
        return Err(CoreError::Validation(format!(
            "username {username} is already taken"
        )));
    }

    let pin = generate_pin(&mut rand::thread_rng());
    let now = Utc::now();
    let user = UserProfile {
        id: Uuid::new_v4(),
        username: username.to_string(),
        pin: pin.clone(),
        role: UserRole::User,
        is_active: true,
        silver: 0,
        created_at: now,
        updated_at: now,
    };
    store.insert_user(user.clone())?;
    log::info!("new member registered: {username}");
    Ok((user, pin))
}

pub fn sign_in(store: &dyn DataStore, username: &str, pin: &str) -> Result<Session> {
    let user = store
        .find_user_by_username(username)?
        .filter(|u| u.is_active)
        .ok_or_else(|| CoreError::Unauthorized("unknown or deactivated account".to_string()))?;
    if user.pin != pin {
        return Err(CoreError::Unauthorized("wrong PIN".to_string()));
    }
    log::info!("{username} signed in");
    Ok(Session::new(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn pin_is_four_digits() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let pin = generate_pin(&mut rng);
            assert_eq!(pin.len(), 4);
            assert!(pin.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn username_rules() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"x".repeat(21)).is_err());
        assert!(validate_username("sp ace").is_err());
        assert!(validate_username("tiré-haut").is_err());
        assert!(validate_username("Shot_caller99").is_ok());
    }

    #[test]
    fn sign_up_then_sign_in() {
        let mut store = MemoryStore::new();
        let (user, pin) = sign_up(&mut store, "Alice").unwrap();
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.silver, 0);

        let session = sign_in(&store, "Alice", &pin).unwrap();
        assert_eq!(session.user().id, user.id);
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let mut store = MemoryStore::new();
        sign_up(&mut store, "Alice").unwrap();
        assert!(matches!(
            sign_up(&mut store, "Alice"),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn wrong_pin_is_unauthorized() {
        let mut store = MemoryStore::new();
        let (_, pin) = sign_up(&mut store, "Alice").unwrap();
        let wrong = if pin == "0000" { "0001" } else { "0000" };
        assert!(matches!(
            sign_in(&store, "Alice", wrong),
            Err(CoreError::Unauthorized(_))
        ));
    }

    #[test]
    fn deactivated_account_cannot_sign_in() {
        let mut store = MemoryStore::new();
        let (mut user, pin) = sign_up(&mut store, "Alice").unwrap();
        user.is_active = false;
        store.update_user(user).unwrap();
        assert!(sign_in(&store, "Alice", &pin).is_err());
    }
}
