//! Member and catalog administration. Role management and weapon catalog
//! edits are admin-only; silver adjustments extend to shotcallers.

use crate::auth::Session;
use crate::error::{CoreError, Result};
use crate::models::{UserProfile, UserRole, Weapon};
use crate::store::DataStore;
use chrono::Utc;
use uuid::Uuid;

fn require_admin(session: &Session) -> Result<()> {
    if !session.is_admin() || !session.user().is_active {
        return Err(CoreError::Unauthorized(
            "this action requires an admin".to_string(),
        ));
    }
    Ok(())
}

pub(super) fn require_officer(session: &Session) -> Result<()> {
    if !session.user().is_active || !session.user().role.is_privileged() {
        return Err(CoreError::Unauthorized(
            "this action requires a shotcaller or admin".to_string(),
        ));
    }
    Ok(())
}

fn load_user(store: &dyn DataStore, user_id: Uuid) -> Result<UserProfile> {
    store
        .get_user(user_id)?
        .ok_or_else(|| CoreError::NotFound(format!("user {user_id}")))
}

pub fn list_users(store: &dyn DataStore, session: &Session) -> Result<Vec<UserProfile>> {
    require_admin(session)?;
    store.list_users()
}

pub fn set_user_role(
    store: &mut dyn DataStore,
    session: &Session,
    user_id: Uuid,
    role: UserRole,
) -> Result<UserProfile> {
    require_admin(session)?;
    let mut user = load_user(store, user_id)?;
    user.role = role;
    user.updated_at = Utc::now();
    store.update_user(user.clone())?;
    log::info!("{} set role of {} to {}", session.user().username, user.username, role.as_str());
    Ok(user)
}

pub fn set_user_active(
    store: &mut dyn DataStore,
    session: &Session,
    user_id: Uuid,
    is_active: bool,
) -> Result<UserProfile> {
    require_admin(session)?;
    let mut user = load_user(store, user_id)?;
    user.is_active = is_active;
    user.updated_at = Utc::now();
    store.update_user(user.clone())?;
    log::info!(
        "{} {} account {}",
        session.user().username,
        if is_active { "activated" } else { "deactivated" },
        user.username
    );
    Ok(user)
}

/// Add or remove silver from a member's balance. The balance may not go
/// negative.
pub fn adjust_silver(
    store: &mut dyn DataStore,
    session: &Session,
    user_id: Uuid,
    delta: i64,
) -> Result<UserProfile> {
    require_officer(session)?;
    let mut user = load_user(store, user_id)?;
    let balance = user.silver.checked_add(delta).filter(|&b| b >= 0).ok_or_else(|| {
        CoreError::Validation(format!(
            "silver balance of {} cannot drop below zero",
            user.username
        ))
    })?;
    user.silver = balance;
    user.updated_at = Utc::now();
    store.update_user(user.clone())?;
    log::info!(
        "{} adjusted silver of {} by {} (now {})",
        session.user().username,
        user.username,
        delta,
        user.silver
    );
    Ok(user)
}

/// Fields an admin fills in when adding a catalog weapon by hand.
#[derive(Debug, Clone)]
pub struct NewWeapon {
    pub name: String,
    pub tier: String,
    pub item_power: Option<u32>,
    pub identifier: String,
    pub icon_url: Option<String>,
    pub category_name: Option<String>,
    pub subcategory_name: Option<String>,
}

pub fn create_weapon(
    store: &mut dyn DataStore,
    session: &Session,
    form: NewWeapon,
) -> Result<Weapon> {
    require_admin(session)?;
    if form.name.trim().is_empty() {
        return Err(CoreError::Validation("weapon name is required".to_string()));
    }
    let weapon = Weapon {
        id: Uuid::new_v4(),
        name: form.name,
        tier: form.tier,
        item_power: form.item_power,
        identifier: form.identifier,
        icon_url: form.icon_url,
        category_name: form.category_name,
        subcategory_name: form.subcategory_name,
        is_active: true,
    };
    store.insert_weapon(weapon.clone())?;
    Ok(weapon)
}

pub fn update_weapon(store: &mut dyn DataStore, session: &Session, weapon: Weapon) -> Result<()> {
    require_admin(session)?;
    store.update_weapon(weapon)
}

/// Retire a weapon from the pickable catalog without deleting the rows that
/// reference it.
pub fn deactivate_weapon(
    store: &mut dyn DataStore,
    session: &Session,
    weapon_id: Uuid,
) -> Result<()> {
    require_admin(session)?;
    let mut weapon = store
        .get_weapon(weapon_id)?
        .ok_or_else(|| CoreError::NotFound(format!("weapon {weapon_id}")))?;
    weapon.is_active = false;
    store.update_weapon(weapon)
}
