//! # gm_core - Guild Roster Management Core
//!
//! Domain library for a guild's activity roster workflow: members register
//! weapon preferences for scheduled activities, shotcallers drag registrants
//! onto a composition-shaped slot grid, and the finished roster is saved
//! wholesale through a storage boundary.
//!
//! ## Layout
//! - [`models`] - Weapon, UserProfile, Composition, Activity, Registration
//! - [`roster`] - the slot grid and the board that edits and saves it
//! - [`auth`] - sign-up/sign-in and the explicit [`Session`] object
//! - [`leaderboard`] - silver ranking of active members
//! - [`api`] - page-level operations (registration, administration)
//! - [`store`] - the [`DataStore`] boundary plus an in-memory implementation

pub mod api;
pub mod auth;
pub mod error;
pub mod leaderboard;
pub mod models;
pub mod roster;
pub mod store;

pub use auth::{can_manage, sign_in, sign_up, Session};
pub use error::{CoreError, Result};
pub use leaderboard::{build_leaderboard, format_silver, LeaderboardEntry, LEADERBOARD_LIMIT};
pub use models::{
    Activity, ActivityStatus, Composition, CompositionRequirement, Registration, UserProfile,
    UserRole, Weapon, WEAPON_CATEGORIES,
};
pub use roster::{Occupant, RosterBoard, RosterGrid, RosterSlot, WeaponSelection, GROUP_SIZE};
pub use store::{AssignmentRow, DataStore, MemoryStore, NewAssignment};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
