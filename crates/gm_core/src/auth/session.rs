use crate::models::{Activity, UserProfile, UserRole};

/// Signed-in user context, passed explicitly to every operation that needs
/// authorization. There is no ambient current-user state.
#[derive(Debug, Clone)]
pub struct Session {
    user: UserProfile,
}

impl Session {
    pub fn new(user: UserProfile) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn user_id(&self) -> uuid::Uuid {
        self.user.id
    }

    pub fn has_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.user.role)
    }

    pub fn is_admin(&self) -> bool {
        self.user.role == UserRole::Admin
    }

    pub fn is_shotcaller(&self) -> bool {
        self.user.role == UserRole::Shotcaller
    }
}

/// Capability check for roster building and activity management: an active
/// admin or shotcaller, and the activity not yet completed.
pub fn can_manage(user: &UserProfile, activity: &Activity) -> bool {
    user.is_active && user.role.is_privileged() && !activity.is_completed()
}
