//! Row ↔ domain translation.
//!
//! Reads are fallible: a row holding an enum string or numeric column the
//! domain cannot represent surfaces as a Persistence error instead of
//! leaking half-parsed data upward.

use crate::rows::{
    ActivityRow, CompositionRow, CompositionSlotRow, RegistrationRow, RosterRow, UserProfileRow,
    WeaponRow,
};
use chrono::Utc;
use gm_core::store::AssignmentRow;
use gm_core::{
    Activity, Composition, CompositionRequirement, CoreError, Registration, Result, UserProfile,
    Weapon,
};
use uuid::Uuid;

fn narrow_u8(value: i16, column: &str) -> Result<u8> {
    u8::try_from(value)
        .map_err(|_| CoreError::Persistence(format!("column {column} out of range: {value}")))
}

pub fn user_from_row(row: &UserProfileRow) -> Result<UserProfile> {
    Ok(UserProfile {
        id: row.id,
        username: row.username.clone(),
        pin: row.pin.clone(),
        role: row.role.parse().map_err(CoreError::Persistence)?,
        is_active: row.is_active,
        silver: row.silver,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub fn user_to_row(user: &UserProfile) -> UserProfileRow {
    UserProfileRow {
        id: user.id,
        username: user.username.clone(),
        pin: user.pin.clone(),
        role: user.role.as_str().to_string(),
        is_active: user.is_active,
        silver: user.silver,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

pub fn weapon_from_row(row: &WeaponRow) -> Result<Weapon> {
    let item_power = match row.item_power {
        Some(power) => Some(u32::try_from(power).map_err(|_| {
            CoreError::Persistence(format!("column item_power out of range: {power}"))
        })?),
        None => None,
    };
    Ok(Weapon {
        id: row.id,
        name: row.name.clone(),
        tier: row.tier.clone(),
        item_power,
        identifier: row.identifier.clone(),
        icon_url: row.icon_url.clone(),
        category_name: row.category_name.clone(),
        subcategory_name: row.subcategory_name.clone(),
        is_active: row.is_active,
    })
}

pub fn weapon_to_row(weapon: &Weapon) -> Result<WeaponRow> {
    let item_power = match weapon.item_power {
        Some(power) => Some(i32::try_from(power).map_err(|_| {
            CoreError::Persistence(format!("column item_power out of range: {power}"))
        })?),
        None => None,
    };
    Ok(WeaponRow {
        id: weapon.id,
        name: weapon.name.clone(),
        tier: weapon.tier.clone(),
        item_power,
        identifier: weapon.identifier.clone(),
        icon_url: weapon.icon_url.clone(),
        category_name: weapon.category_name.clone(),
        subcategory_name: weapon.subcategory_name.clone(),
        is_active: weapon.is_active,
        created_at: Utc::now(),
    })
}

pub fn activity_from_row(row: &ActivityRow) -> Result<Activity> {
    Ok(Activity {
        id: row.id,
        name: row.name.clone(),
        description: row.description.clone(),
        composition_id: row.composition_id,
        scheduled_at: row.scheduled_at,
        status: row.status.parse().map_err(CoreError::Persistence)?,
        roster_locked: row.roaster_locked,
        created_by: row.created_by,
    })
}

pub fn activity_to_row(activity: &Activity, previous: Option<&ActivityRow>) -> ActivityRow {
    let now = Utc::now();
    ActivityRow {
        id: activity.id,
        name: activity.name.clone(),
        description: activity.description.clone(),
        composition_id: activity.composition_id,
        scheduled_at: activity.scheduled_at,
        status: activity.status.as_str().to_string(),
        roaster_locked: activity.roster_locked,
        created_by: activity.created_by,
        created_at: previous.map(|p| p.created_at).unwrap_or(now),
        updated_at: now,
    }
}

pub fn registration_from_row(row: &RegistrationRow) -> Registration {
    Registration {
        id: row.id,
        activity_id: row.activity_id,
        user_id: row.user_id,
        weapon1_id: row.weapon1_id,
        weapon2_id: row.weapon2_id,
        weapon3_id: row.weapon3_id,
        notes: row.notes.clone(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

pub fn registration_to_row(registration: &Registration) -> RegistrationRow {
    RegistrationRow {
        id: registration.id,
        activity_id: registration.activity_id,
        user_id: registration.user_id,
        weapon1_id: registration.weapon1_id,
        weapon2_id: registration.weapon2_id,
        weapon3_id: registration.weapon3_id,
        notes: registration.notes.clone(),
        created_at: registration.created_at,
        updated_at: registration.updated_at,
    }
}

/// Assemble a composition from its header row and slot rows. Slot rows with
/// a null weapon impose no requirement and are dropped.
pub fn composition_from_rows(
    row: &CompositionRow,
    slots: &[CompositionSlotRow],
) -> Result<Composition> {
    let mut requirements = Vec::new();
    for slot in slots.iter().filter(|s| s.composition_id == row.id) {
        let Some(weapon_id) = slot.weapon_id else {
            continue;
        };
        requirements.push(CompositionRequirement {
            group_number: narrow_u8(slot.group_number, "group_number")?,
            weapon_id,
            quantity: narrow_u8(slot.quantity, "quantity")?,
        });
    }
    Ok(Composition {
        id: row.id,
        name: row.name.clone(),
        description: row.description.clone(),
        total_groups: narrow_u8(row.total_groups, "total_groups")?,
        requirements,
        created_by: row.created_by,
    })
}

pub fn composition_to_rows(composition: &Composition) -> (CompositionRow, Vec<CompositionSlotRow>) {
    let now = Utc::now();
    let header = CompositionRow {
        id: composition.id,
        name: composition.name.clone(),
        description: composition.description.clone(),
        total_groups: i16::from(composition.total_groups),
        created_by: composition.created_by,
        created_at: now,
        updated_at: now,
    };
    let slots = composition
        .requirements
        .iter()
        .map(|req| CompositionSlotRow {
            id: Uuid::new_v4(),
            composition_id: composition.id,
            group_number: i16::from(req.group_number),
            weapon_id: Some(req.weapon_id),
            quantity: i16::from(req.quantity),
            created_at: now,
        })
        .collect();
    (header, slots)
}

pub fn assignment_from_row(row: &RosterRow) -> Result<AssignmentRow> {
    Ok(AssignmentRow {
        activity_id: row.activity_id,
        user_id: row.user_id,
        weapon_id: row.weapon_id,
        group_number: narrow_u8(row.group_number, "group_number")?,
        slot_position: narrow_u8(row.slot_position, "slot_position")?,
        assigned_by: row.assigned_by,
        assigned_at: row.assigned_at,
    })
}
