use crate::error::{CoreError, Result};
use crate::roster::GROUP_SIZE;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of a composition template: "group N wants `quantity` of this weapon".
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompositionRequirement {
    /// 1-based group number.
    pub group_number: u8,
    pub weapon_id: Uuid,
    pub quantity: u8,
}

/// Named composition template declaring the weapon layout for each group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Composition {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub total_groups: u8,
    pub requirements: Vec<CompositionRequirement>,
    pub created_by: Uuid,
}

impl Composition {
    /// Authoring-time validation. Grid assignment never re-checks these.
    pub fn validate(&self) -> Result<()> {
        if self.total_groups == 0 {
            return Err(CoreError::Validation(
                "composition must have at least one group".to_string(),
            ));
        }
        for req in &self.requirements {
            if req.quantity == 0 {
                return Err(CoreError::Validation(format!(
                    "requirement in group {} has zero quantity",
                    req.group_number
                )));
            }
            if req.group_number == 0 || req.group_number > self.total_groups {
                return Err(CoreError::Validation(format!(
                    "requirement references group {} of {}",
                    req.group_number, self.total_groups
                )));
            }
        }
        for group in 1..=self.total_groups {
            let total: u32 = self
                .group_requirements(group)
                .map(|r| u32::from(r.quantity))
                .sum();
            if total > u32::from(GROUP_SIZE) {
                return Err(CoreError::Validation(format!(
                    "group {} requires {} slots, capacity is {}",
                    group, total, GROUP_SIZE
                )));
            }
        }
        Ok(())
    }

    /// Requirements for one group, in authoring order.
    pub fn group_requirements(&self, group: u8) -> impl Iterator<Item = &CompositionRequirement> {
        self.requirements
            .iter()
            .filter(move |r| r.group_number == group)
    }
}
