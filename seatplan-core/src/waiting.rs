//! Projection of unseated employees onto padded waiting slots.

use crate::employee::Employee;
use crate::roster::Roster;

/// Reserved prefix of waiting-slot drop targets. Seat ids never use it.
pub const WAITING_PREFIX: &str = "waiting-";

pub const MIN_WAITING_SLOTS: usize = 10;

/// Extra empty slots kept after the last waiting employee.
pub const WAITING_SLOT_PADDING: usize = 2;

/// Number of slots shown for `unassigned` waiting employees.
pub fn slot_count(unassigned: usize) -> usize {
    MIN_WAITING_SLOTS.max(unassigned + WAITING_SLOT_PADDING)
}

/// Drop-target id of the 1-based `ordinal`-th slot, e.g. `waiting-3`.
pub fn waiting_slot_id(ordinal: usize) -> String {
    format!("{WAITING_PREFIX}{ordinal}")
}

/// One placeholder in the waiting panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingSlot<'a> {
    pub id: String,
    /// 1-based position in the panel.
    pub ordinal: usize,
    pub occupant: Option<&'a Employee>,
}

/// Waiting panel contents for one roster snapshot.
///
/// Slots carry no identity beyond their position; the i-th unseated employee
/// in roster order lands in the i-th slot. Rebuilt from scratch on every call.
#[derive(Debug, Clone)]
pub struct WaitingPool<'a> {
    slots: Vec<WaitingSlot<'a>>,
    unassigned: usize,
}

impl<'a> WaitingPool<'a> {
    pub fn project(roster: &'a Roster) -> Self {
        let waiting: Vec<&Employee> = roster.unassigned().collect();
        let unassigned = waiting.len();

        let slots = (0..slot_count(unassigned))
            .map(|i| WaitingSlot {
                id: waiting_slot_id(i + 1),
                ordinal: i + 1,
                occupant: waiting.get(i).copied(),
            })
            .collect();

        WaitingPool { slots, unassigned }
    }

    pub fn slots(&self) -> &[WaitingSlot<'a>] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn unassigned_count(&self) -> usize {
        self.unassigned
    }

    /// Employee shown in the slot with the given 1-based ordinal.
    pub fn occupant(&self, ordinal: usize) -> Option<&'a Employee> {
        ordinal
            .checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .and_then(|slot| slot.occupant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::tests::employee;

    #[test]
    fn slot_count_has_floor_of_ten() {
        assert_eq!(slot_count(0), 10);
        assert_eq!(slot_count(8), 10);
        assert_eq!(slot_count(9), 11);
        assert_eq!(slot_count(25), 27);
    }

    #[test]
    fn projects_unseated_in_roster_order() {
        let roster = Roster::new([
            employee("a", None),
            employee("b", Some("S1")),
            employee("c", None),
        ])
        .unwrap();

        let pool = WaitingPool::project(&roster);

        assert_eq!(pool.len(), 10);
        assert_eq!(pool.unassigned_count(), 2);
        assert_eq!(pool.slots()[0].id, "waiting-1");
        assert_eq!(pool.slots()[9].id, "waiting-10");
        assert_eq!(pool.occupant(1).unwrap().id.as_str(), "a");
        assert_eq!(pool.occupant(2).unwrap().id.as_str(), "c");
        assert!(pool.slots()[2..].iter().all(|s| s.occupant.is_none()));
        assert!(pool.occupant(0).is_none());
    }

    #[test]
    fn grows_past_minimum() {
        let roster = Roster::new((0..12).map(|i| employee(&format!("e{i}"), None))).unwrap();

        let pool = WaitingPool::project(&roster);

        assert_eq!(pool.len(), 14);
        assert_eq!(pool.slots().iter().filter(|s| s.occupant.is_some()).count(), 12);
        assert!(pool.occupant(12).is_some());
        assert!(pool.occupant(13).is_none());
    }

    #[test]
    fn slot_ids_carry_the_reserved_prefix() {
        assert_eq!(waiting_slot_id(12), "waiting-12");
        assert!(waiting_slot_id(1).starts_with(WAITING_PREFIX));
    }
}
