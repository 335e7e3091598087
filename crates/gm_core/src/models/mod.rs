pub mod activity;
pub mod composition;
pub mod registration;
pub mod user;
pub mod weapon;

pub use activity::{Activity, ActivityStatus};
pub use composition::{Composition, CompositionRequirement};
pub use registration::Registration;
pub use user::{UserProfile, UserRole};
pub use weapon::{Weapon, WEAPON_CATEGORIES};
