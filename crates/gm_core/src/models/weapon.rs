use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role categories used for roster color coding and composition planning.
pub const WEAPON_CATEGORIES: [&str; 5] = ["Tank", "Healer", "DPS Melee", "DPS Range", "Support"];

/// Catalog weapon entry. Supplied by the catalog import, read-only for the
/// roster core apart from admin management.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub id: Uuid,
    pub name: String,
    /// Tier label, e.g. "T8".
    pub tier: String,
    pub item_power: Option<u32>,
    /// Stable catalog identifier, unique per item.
    pub identifier: String,
    pub icon_url: Option<String>,
    pub category_name: Option<String>,
    pub subcategory_name: Option<String>,
    pub is_active: bool,
}

impl Weapon {
    /// Short display symbol, resolved from the subcategory when present and
    /// falling back to the role category.
    pub fn display_symbol(&self) -> &'static str {
        if let Some(symbol) = self.subcategory_name.as_deref().and_then(subcategory_symbol) {
            return symbol;
        }
        match self.category_name.as_deref() {
            Some("Tank") => "🛡️",
            Some("Healer") => "💚",
            Some("DPS Melee") => "⚔️",
            Some("DPS Range") => "🏹",
            Some("Support") => "✨",
            _ => "⚔️",
        }
    }
}

fn subcategory_symbol(subcategory: &str) -> Option<&'static str> {
    let symbol = match subcategory {
        "Axe" => "🪓",
        "Sword" => "⚔️",
        "Mace" | "Hammer" => "🔨",
        "Bow" | "Crossbow" => "🏹",
        "Fire Staff" => "🔥",
        "Holy Staff" => "✨",
        "Frost Staff" => "❄️",
        "Curse Staff" => "💀",
        "Nature Staff" => "🌿",
        "Dagger" => "🗡️",
        "Spear" => "🔱",
        _ => return None,
    };
    Some(symbol)
}
