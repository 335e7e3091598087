//! Page-level operations: one function per user action of the surrounding
//! application, each taking the store boundary and an explicit
//! [`crate::auth::Session`].
//!
//! Roster-screen actions live on [`crate::roster::RosterBoard`], which holds
//! the screen's in-memory state between actions.

pub mod admin;
pub mod composition;
pub mod registration;

pub use admin::{
    adjust_silver, create_weapon, deactivate_weapon, list_users, set_user_active, set_user_role,
    update_weapon, NewWeapon,
};
pub use composition::{create_composition, NewComposition};
pub use registration::{submit_registration, RegistrationForm};
