use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::drag::RESERVED_ENTITY_PREFIX;
use crate::employee::{Employee, EmployeeId};
use crate::error::PlanError;
use crate::seat::SeatId;

/// A single placement write: `employee` ends up on `seat` (or waiting).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatChange {
    pub employee: EmployeeId,
    pub seat: Option<SeatId>,
}

impl SeatChange {
    pub fn new(employee: EmployeeId, seat: Option<SeatId>) -> Self {
        SeatChange { employee, seat }
    }
}

/// Authoritative employee list and their seat assignments.
///
/// Iteration follows seed order and never changes. The store itself does not
/// enforce one employee per seat; callers compute conflict-free batches
/// (see [`crate::drag::plan_drop`]) and hand them to [`Roster::apply`].
#[derive(Debug, Clone, Default)]
pub struct Roster {
    employees: IndexMap<EmployeeId, Employee>,
    revision: u64,
}

impl Roster {
    /// Builds a roster, rejecting duplicate or reserved employee ids.
    pub fn new(employees: impl IntoIterator<Item = Employee>) -> Result<Self, PlanError> {
        let mut map = IndexMap::new();
        for employee in employees {
            if employee.id.as_str().starts_with(RESERVED_ENTITY_PREFIX) {
                return Err(PlanError::ReservedEmployeeId(employee.id));
            }
            match map.entry(employee.id.clone()) {
                Entry::Occupied(_) => return Err(PlanError::DuplicateEmployee(employee.id)),
                Entry::Vacant(slot) => {
                    slot.insert(employee);
                }
            }
        }

        Ok(Roster {
            employees: map,
            revision: 0,
        })
    }

    /// Employee currently sitting on `seat`, scanning the whole roster.
    pub fn find_by_seat(&self, seat: &SeatId) -> Option<&Employee> {
        self.employees
            .values()
            .find(|e| e.seat.as_ref() == Some(seat))
    }

    pub fn find_by_id(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.get(id)
    }

    pub fn contains(&self, id: &EmployeeId) -> bool {
        self.employees.contains_key(id)
    }

    /// Sets (or clears) one employee's seat.
    ///
    /// Unknown ids and writes that would not change anything are ignored.
    /// Returns whether the roster changed.
    pub fn move_to(&mut self, id: &EmployeeId, seat: Option<SeatId>) -> bool {
        self.apply([SeatChange::new(id.clone(), seat)]) > 0
    }

    /// Applies a precomputed batch as one update.
    ///
    /// The revision is bumped once if at least one employee moved. Returns the
    /// number of employees whose seat actually changed.
    pub fn apply(&mut self, changes: impl IntoIterator<Item = SeatChange>) -> usize {
        let mut changed = 0;
        for change in changes {
            let Some(employee) = self.employees.get_mut(&change.employee) else {
                continue;
            };
            if employee.seat != change.seat {
                employee.seat = change.seat;
                changed += 1;
            }
        }
        if changed > 0 {
            self.revision += 1;
        }
        changed
    }

    /// Counter bumped once per effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Unseated employees in roster order.
    pub fn unassigned(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values().filter(|e| !e.is_seated())
    }

    pub fn seated_count(&self) -> usize {
        self.employees.values().filter(|e| e.is_seated()).count()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
