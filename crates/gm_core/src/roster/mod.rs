//! Roster grid: the in-memory slot grid a shotcaller fills from the
//! registration pool and saves wholesale.

pub mod board;
pub mod grid;
pub mod selection;

pub use board::RosterBoard;
pub use grid::{Occupant, RosterGrid, RosterSlot};
pub use selection::WeaponSelection;

/// Fixed slot capacity of every group.
pub const GROUP_SIZE: u8 = 20;
