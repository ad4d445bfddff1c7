use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::drag::{DragController, DragEnd, DragEntity, DropOutcome, DropTarget};
use crate::employee::{Employee, EmployeeId};
use crate::error::PlanError;
use crate::pet::{Pet, Position};
use crate::roster::Roster;
use crate::seat::{SeatDirectory, SeatId};
use crate::waiting::WaitingPool;

/// One editable seating chart: the layout, who sits where, the drag in
/// flight and (optionally) the pet.
///
/// Render collaborators read through the query methods and feed gestures
/// into `on_drag_start` / `on_drag_end` / `unassign`.
#[derive(Debug, Clone)]
pub struct SeatingChart {
    directory: SeatDirectory,
    roster: Roster,
    drag: DragController,
    pet: Option<Pet>,
}

impl SeatingChart {
    /// Builds a chart after checking initial seats against the directory:
    /// every seat must exist, be assignable and be claimed at most once.
    pub fn new(directory: SeatDirectory, roster: Roster, pet: Option<Pet>) -> Result<Self, PlanError> {
        let mut claimed: HashMap<&SeatId, &EmployeeId> = HashMap::new();
        for employee in roster.iter() {
            let Some(seat) = &employee.seat else {
                continue;
            };
            match directory.seat(seat) {
                None => {
                    return Err(PlanError::UnknownSeat {
                        employee: employee.id.clone(),
                        seat: seat.clone(),
                    });
                }
                Some(s) if !s.is_assignable() => {
                    return Err(PlanError::UnassignableSeat {
                        employee: employee.id.clone(),
                        seat: seat.clone(),
                    });
                }
                Some(_) => {}
            }
            if let Some(first) = claimed.insert(seat, &employee.id) {
                return Err(PlanError::SeatTaken {
                    seat: seat.clone(),
                    first: first.clone(),
                    second: employee.id.clone(),
                });
            }
        }

        Ok(SeatingChart {
            directory,
            roster,
            drag: DragController::new(),
            pet,
        })
    }

    pub fn directory(&self) -> &SeatDirectory {
        &self.directory
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn pet(&self) -> Option<&Pet> {
        self.pet.as_ref()
    }

    pub fn find_by_seat(&self, seat: &SeatId) -> Option<&Employee> {
        self.roster.find_by_seat(seat)
    }

    pub fn find_by_id(&self, id: &EmployeeId) -> Option<&Employee> {
        self.roster.find_by_id(id)
    }

    pub fn waiting_pool(&self) -> WaitingPool<'_> {
        WaitingPool::project(&self.roster)
    }

    /// Entity currently being dragged, for drag-overlay rendering.
    pub fn active_entity(&self) -> Option<&DragEntity> {
        self.drag.active()
    }

    pub fn on_drag_start(&mut self, entity: DragEntity) {
        self.drag.on_drag_start(entity);
    }

    pub fn on_drag_end(&mut self, end: DragEnd) -> DropOutcome {
        self.drag
            .on_drag_end(&mut self.roster, &self.directory, self.pet.as_mut(), end)
    }

    /// Convenience for hosts that report plain ids.
    pub fn on_drag_end_raw(&mut self, entity: &str, target: Option<&str>, release: Option<Position>) -> DropOutcome {
        self.on_drag_end(DragEnd {
            entity: DragEntity::parse(entity),
            target: target.map(DropTarget::parse),
            release,
        })
    }

    /// What releasing the active drag over `target` would do right now.
    pub fn preview(&self, target: Option<&DropTarget>) -> Option<DropOutcome> {
        self.drag.preview(&self.roster, &self.directory, target)
    }

    /// Sends an employee to the waiting pool without going through a drag.
    #[instrument(level = "debug", skip_all, fields(employee = %employee))]
    pub fn unassign(&mut self, employee: &EmployeeId) -> bool {
        let changed = self.roster.move_to(employee, None);
        debug!(changed, revision = self.roster.revision(), "unassign");
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::tests::employee;
    use crate::seat::{Seat, Section};

    fn directory() -> SeatDirectory {
        SeatDirectory::new(vec![Section {
            key: "s".to_string(),
            title: "S".to_string(),
            row: "upper".to_string(),
            columns: 2,
            seats: vec![Seat::new("A"), Seat::new("B"), Seat::gap("G")],
        }])
        .unwrap()
    }

    #[test]
    fn rejects_inconsistent_initial_seats() {
        let unknown = Roster::new([employee("p1", Some("Z"))]).unwrap();
        assert!(matches!(
            SeatingChart::new(directory(), unknown, None),
            Err(PlanError::UnknownSeat { .. })
        ));

        let gap = Roster::new([employee("p1", Some("G"))]).unwrap();
        assert!(matches!(
            SeatingChart::new(directory(), gap, None),
            Err(PlanError::UnassignableSeat { .. })
        ));

        let twice = Roster::new([employee("p1", Some("A")), employee("p2", Some("A"))]).unwrap();
        assert!(matches!(
            SeatingChart::new(directory(), twice, None),
            Err(PlanError::SeatTaken { ref first, ref second, .. })
                if first.as_str() == "p1" && second.as_str() == "p2"
        ));
    }

    #[test]
    fn unassign_bypasses_drag_session() {
        let roster = Roster::new([employee("p1", Some("A"))]).unwrap();
        let mut chart = SeatingChart::new(directory(), roster, None).unwrap();

        chart.on_drag_start(DragEntity::parse("p1"));
        assert!(chart.unassign(&"p1".into()));
        assert!(chart.find_by_seat(&"A".into()).is_none());
        // the drag in flight is untouched
        assert_eq!(chart.active_entity(), Some(&DragEntity::parse("p1")));

        assert!(!chart.unassign(&"p1".into()));
        assert!(!chart.unassign(&"ghost".into()));
    }

    #[test]
    fn raw_ids_route_to_the_right_path() {
        let roster = Roster::new([employee("p1", None)]).unwrap();
        let mut chart = SeatingChart::new(directory(), roster, Some(Pet::default())).unwrap();

        chart.on_drag_start(DragEntity::parse("p1"));
        let outcome = chart.on_drag_end_raw("p1", Some("B"), None);
        assert!(matches!(outcome, DropOutcome::Move { .. }));

        chart.on_drag_start(DragEntity::parse("@pet"));
        let outcome = chart.on_drag_end_raw("@pet", Some("waiting-2"), Some(Position::new(3, 4)));
        assert_eq!(outcome, DropOutcome::PetPlaced(Position::new(3, 4)));
        assert_eq!(chart.pet().unwrap().position, Some(Position::new(3, 4)));
        assert_eq!(chart.find_by_seat(&"B".into()).unwrap().id.as_str(), "p1");
    }
}
