//! Silver leaderboard: richest active members, top 50.

use crate::error::Result;
use crate::models::{UserProfile, UserRole};
use crate::store::DataStore;
use serde::Serialize;
use uuid::Uuid;

pub const LEADERBOARD_LIMIT: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub username: String,
    pub silver: i64,
    pub role: UserRole,
}

/// Rank active members by silver, richest first, capped at
/// [`LEADERBOARD_LIMIT`]. Ties keep username order for a stable display.
pub fn build_leaderboard(users: &[UserProfile]) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = users
        .iter()
        .filter(|u| u.is_active)
        .map(|u| LeaderboardEntry {
            user_id: u.id,
            username: u.username.clone(),
            silver: u.silver,
            role: u.role,
        })
        .collect();
    entries.sort_by(|a, b| b.silver.cmp(&a.silver).then_with(|| a.username.cmp(&b.username)));
    entries.truncate(LEADERBOARD_LIMIT);
    entries
}

/// Leaderboard straight from the store. Public to every member, no session.
pub fn leaderboard(store: &dyn DataStore) -> Result<Vec<LeaderboardEntry>> {
    Ok(build_leaderboard(&store.list_users()?))
}

/// Abbreviate a silver amount for card display: 1_500_000 -> "1.5M",
/// 2_000 -> "2K", below a thousand verbatim.
pub fn format_silver(amount: i64) -> String {
    if amount >= 1_000_000 {
        trim_decimal(amount as f64 / 1_000_000.0, "M")
    } else if amount >= 1_000 {
        trim_decimal(amount as f64 / 1_000.0, "K")
    } else {
        amount.to_string()
    }
}

fn trim_decimal(value: f64, suffix: &str) -> String {
    let formatted = format!("{value:.1}");
    let formatted = formatted.strip_suffix(".0").unwrap_or(&formatted);
    format!("{formatted}{suffix}")
}
