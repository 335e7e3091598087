use super::GROUP_SIZE;
use crate::error::{CoreError, Result};
use crate::models::Composition;
use crate::store::{AssignmentRow, NewAssignment};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Who sits in a slot and which of their registered weapons they play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub user_id: Uuid,
    pub weapon_id: Uuid,
}

/// One (group, position) cell. `required_weapon_id` is derived from the
/// composition at build time and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSlot {
    pub group_number: u8,
    pub slot_position: u8,
    pub required_weapon_id: Option<Uuid>,
    pub occupant: Option<Occupant>,
}

/// The full grid for one activity: `total_groups` groups of [`GROUP_SIZE`]
/// slots each, always fully materialized.
#[derive(Debug, Clone)]
pub struct RosterGrid {
    activity_id: Uuid,
    total_groups: u8,
    slots: Vec<RosterSlot>,
}

impl RosterGrid {
    /// Build the grid from the composition template and any previously
    /// persisted assignment rows.
    ///
    /// A missing composition falls back to a single group with no required
    /// weapons, so the output length is always `total_groups * GROUP_SIZE`.
    /// Persisted occupants are restored as stored, even when their
    /// registration has since disappeared.
    pub fn build(
        activity_id: Uuid,
        composition: Option<&Composition>,
        persisted: &[AssignmentRow],
    ) -> Self {
        let total_groups = composition
            .map(|c| c.total_groups)
            .filter(|&g| g > 0)
            .unwrap_or(1);

        let mut slots = Vec::with_capacity(usize::from(total_groups) * usize::from(GROUP_SIZE));
        for group in 1..=total_groups {
            let required = flatten_group_requirements(composition, group);
            for position in 1..=GROUP_SIZE {
                let occupant = persisted
                    .iter()
                    .find(|row| row.group_number == group && row.slot_position == position)
                    .map(|row| Occupant {
                        user_id: row.user_id,
                        weapon_id: row.weapon_id,
                    });
                slots.push(RosterSlot {
                    group_number: group,
                    slot_position: position,
                    required_weapon_id: required[usize::from(position) - 1],
                    occupant,
                });
            }
        }

        Self {
            activity_id,
            total_groups,
            slots,
        }
    }

    pub fn activity_id(&self) -> Uuid {
        self.activity_id
    }

    pub fn total_groups(&self) -> u8 {
        self.total_groups
    }

    pub fn slots(&self) -> &[RosterSlot] {
        &self.slots
    }

    pub fn slot(&self, group: u8, position: u8) -> Option<&RosterSlot> {
        self.slots
            .iter()
            .find(|s| s.group_number == group && s.slot_position == position)
    }

    fn slot_mut(&mut self, group: u8, position: u8) -> Result<&mut RosterSlot> {
        self.slots
            .iter_mut()
            .find(|s| s.group_number == group && s.slot_position == position)
            .ok_or_else(|| CoreError::NotFound(format!("slot {group}/{position}")))
    }

    /// Seat a user. An existing occupant is overwritten silently, and a user
    /// already seated elsewhere is not vacated: single-seat-per-user is a
    /// pool-level convention, not a grid invariant.
    pub fn assign(&mut self, group: u8, position: u8, user_id: Uuid, weapon_id: Uuid) -> Result<()> {
        let slot = self.slot_mut(group, position)?;
        slot.occupant = Some(Occupant { user_id, weapon_id });
        Ok(())
    }

    /// Clear a slot unconditionally. The required weapon stays.
    pub fn unassign(&mut self, group: u8, position: u8) -> Result<()> {
        let slot = self.slot_mut(group, position)?;
        slot.occupant = None;
        Ok(())
    }

    /// Users currently seated anywhere in the grid.
    pub fn occupied_user_ids(&self) -> HashSet<Uuid> {
        self.slots
            .iter()
            .filter_map(|s| s.occupant.map(|o| o.user_id))
            .collect()
    }

    pub fn occupied_slots(&self) -> impl Iterator<Item = &RosterSlot> {
        self.slots.iter().filter(|s| s.occupant.is_some())
    }

    /// Rows to persist: one per occupied slot.
    pub fn to_new_assignments(&self) -> Vec<NewAssignment> {
        self.occupied_slots()
            .filter_map(|slot| {
                slot.occupant.map(|occupant| NewAssignment {
                    user_id: occupant.user_id,
                    weapon_id: occupant.weapon_id,
                    group_number: slot.group_number,
                    slot_position: slot.slot_position,
                })
            })
            .collect()
    }
}

/// Flatten a group's requirement list into per-position required weapons:
/// the first requirement's quantity fills positions 1..=q1, the next one
/// q1+1..=q1+q2, and so on. Positions past the declared total stay free.
fn flatten_group_requirements(
    composition: Option<&Composition>,
    group: u8,
) -> [Option<Uuid>; GROUP_SIZE as usize] {
    let mut required = [None; GROUP_SIZE as usize];
    let Some(comp) = composition else {
        return required;
    };

    let mut next = 0usize;
    for req in comp.group_requirements(group) {
        for _ in 0..req.quantity {
            if next >= required.len() {
                return required;
            }
            required[next] = Some(req.weapon_id);
            next += 1;
        }
    }
    required
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompositionRequirement;
    use chrono::Utc;
    use proptest::prelude::*;

    fn composition(total_groups: u8, requirements: Vec<(u8, Uuid, u8)>) -> Composition {
        Composition {
            id: Uuid::new_v4(),
            name: "test".to_string(),
            description: None,
            total_groups,
            requirements: requirements
                .into_iter()
                .map(|(group_number, weapon_id, quantity)| CompositionRequirement {
                    group_number,
                    weapon_id,
                    quantity,
                })
                .collect(),
            created_by: Uuid::new_v4(),
        }
    }

    fn persisted_row(activity_id: Uuid, group: u8, position: u8, user_id: Uuid) -> AssignmentRow {
        AssignmentRow {
            activity_id,
            user_id,
            weapon_id: Uuid::new_v4(),
            group_number: group,
            slot_position: position,
            assigned_by: Uuid::new_v4(),
            assigned_at: Utc::now(),
        }
    }

    #[test]
    fn missing_composition_yields_one_empty_group() {
        let grid = RosterGrid::build(Uuid::new_v4(), None, &[]);
        assert_eq!(grid.total_groups(), 1);
        assert_eq!(grid.slots().len(), usize::from(GROUP_SIZE));
        assert!(grid.slots().iter().all(|s| s.required_weapon_id.is_none()));
        assert!(grid.slots().iter().all(|s| s.occupant.is_none()));
    }

    #[test]
    fn requirements_flatten_positionally() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let comp = composition(1, vec![(1, a, 3), (1, b, 2)]);
        let grid = RosterGrid::build(Uuid::new_v4(), Some(&comp), &[]);

        for position in 1..=3 {
            assert_eq!(grid.slot(1, position).unwrap().required_weapon_id, Some(a));
        }
        for position in 4..=5 {
            assert_eq!(grid.slot(1, position).unwrap().required_weapon_id, Some(b));
        }
        for position in 6..=GROUP_SIZE {
            assert_eq!(grid.slot(1, position).unwrap().required_weapon_id, None);
        }
    }

    #[test]
    fn requirements_do_not_bleed_between_groups() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let comp = composition(2, vec![(1, a, 2), (2, b, 1)]);
        let grid = RosterGrid::build(Uuid::new_v4(), Some(&comp), &[]);

        assert_eq!(grid.slot(1, 1).unwrap().required_weapon_id, Some(a));
        assert_eq!(grid.slot(1, 3).unwrap().required_weapon_id, None);
        assert_eq!(grid.slot(2, 1).unwrap().required_weapon_id, Some(b));
        assert_eq!(grid.slot(2, 2).unwrap().required_weapon_id, None);
    }

    #[test]
    fn persisted_rows_restore_occupants() {
        let activity_id = Uuid::new_v4();
        let user = Uuid::new_v4();
        let row = persisted_row(activity_id, 1, 5, user);
        let grid = RosterGrid::build(activity_id, None, &[row]);

        let slot = grid.slot(1, 5).unwrap();
        let occupant = slot.occupant.unwrap();
        assert_eq!(occupant.user_id, user);
        assert_eq!(occupant.weapon_id, row.weapon_id);
        assert_eq!(grid.occupied_slots().count(), 1);
    }

    #[test]
    fn assign_then_unassign_restores_the_slot() {
        let weapon = Uuid::new_v4();
        let comp = composition(1, vec![(1, weapon, 1)]);
        let mut grid = RosterGrid::build(Uuid::new_v4(), Some(&comp), &[]);

        grid.assign(1, 1, Uuid::new_v4(), weapon).unwrap();
        assert!(grid.slot(1, 1).unwrap().occupant.is_some());

        grid.unassign(1, 1).unwrap();
        let slot = grid.slot(1, 1).unwrap();
        assert!(slot.occupant.is_none());
        assert_eq!(slot.required_weapon_id, Some(weapon));
    }

    #[test]
    fn assign_overwrites_existing_occupant() {
        let mut grid = RosterGrid::build(Uuid::new_v4(), None, &[]);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        grid.assign(1, 1, first, Uuid::new_v4()).unwrap();
        grid.assign(1, 1, second, Uuid::new_v4()).unwrap();

        assert_eq!(grid.slot(1, 1).unwrap().occupant.unwrap().user_id, second);
        assert_eq!(grid.occupied_slots().count(), 1);
    }

    #[test]
    fn grid_permits_the_same_user_in_two_slots() {
        // Single-seat-per-user lives in the available pool, not here.
        let mut grid = RosterGrid::build(Uuid::new_v4(), None, &[]);
        let alice = Uuid::new_v4();
        let weapon = Uuid::new_v4();

        grid.assign(1, 1, alice, weapon).unwrap();
        grid.assign(1, 2, alice, weapon).unwrap();

        assert_eq!(grid.occupied_slots().count(), 2);
        assert_eq!(grid.occupied_user_ids().len(), 1);
    }

    #[test]
    fn out_of_range_slot_is_not_found() {
        let mut grid = RosterGrid::build(Uuid::new_v4(), None, &[]);
        assert!(matches!(
            grid.assign(1, 21, Uuid::new_v4(), Uuid::new_v4()),
            Err(CoreError::NotFound(_))
        ));
        assert!(matches!(grid.unassign(2, 1), Err(CoreError::NotFound(_))));
    }

    #[test]
    fn empty_grid_produces_no_assignment_rows() {
        let grid = RosterGrid::build(Uuid::new_v4(), None, &[]);
        assert!(grid.to_new_assignments().is_empty());
    }

    proptest! {
        #[test]
        fn grid_is_always_fully_materialized(
            total_groups in 1u8..=8,
            reqs in proptest::collection::vec((1u8..=8, 1u8..=6), 0..12),
        ) {
            let comp = composition(
                total_groups,
                reqs.into_iter()
                    .map(|(group, qty)| (group, Uuid::new_v4(), qty))
                    .collect(),
            );
            let grid = RosterGrid::build(Uuid::new_v4(), Some(&comp), &[]);

            prop_assert_eq!(
                grid.slots().len(),
                usize::from(total_groups) * usize::from(GROUP_SIZE)
            );

            let mut seen = HashSet::new();
            for slot in grid.slots() {
                prop_assert!(slot.group_number >= 1 && slot.group_number <= total_groups);
                prop_assert!(slot.slot_position >= 1 && slot.slot_position <= GROUP_SIZE);
                prop_assert!(seen.insert((slot.group_number, slot.slot_position)));
            }
        }

        #[test]
        fn required_weapons_always_form_a_prefix(
            quantities in proptest::collection::vec(1u8..=9, 1..6),
        ) {
            let comp = composition(
                1,
                quantities
                    .iter()
                    .map(|&qty| (1u8, Uuid::new_v4(), qty))
                    .collect(),
            );
            let grid = RosterGrid::build(Uuid::new_v4(), Some(&comp), &[]);

            let declared: usize = quantities.iter().map(|&q| usize::from(q)).sum();
            let expected_filled = declared.min(usize::from(GROUP_SIZE));
            for slot in grid.slots() {
                let filled = usize::from(slot.slot_position) <= expected_filled;
                prop_assert_eq!(slot.required_weapon_id.is_some(), filled);
            }
        }
    }
}
