//! Drag session state machine and the drop decision table.
//!
//! Gesture delivery (pointer capture, hit-testing) belongs to the host. The
//! host reports `drag start` and `drag end` with whatever it was released
//! over; this module decides which roster mutation, if any, follows.

use std::fmt;

use tracing::{debug, instrument, warn};

use crate::employee::EmployeeId;
use crate::pet::{Pet, Position};
use crate::roster::{Roster, SeatChange};
use crate::seat::{SeatDirectory, SeatId};
use crate::waiting::{WAITING_PREFIX, waiting_slot_id};

/// Prefix reserved for non-employee draggables. Employee ids never start with it.
pub const RESERVED_ENTITY_PREFIX: char = '@';

/// Raw draggable id of the office pet.
pub const PET_ENTITY_ID: &str = "@pet";

/// Something that can be picked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DragEntity {
    Employee(EmployeeId),
    Pet,
}

impl DragEntity {
    /// Interprets a raw draggable id as reported by a host.
    pub fn parse(raw: &str) -> Self {
        if raw == PET_ENTITY_ID {
            DragEntity::Pet
        } else {
            DragEntity::Employee(EmployeeId::new(raw))
        }
    }

    pub fn employee(&self) -> Option<&EmployeeId> {
        match self {
            DragEntity::Employee(id) => Some(id),
            DragEntity::Pet => None,
        }
    }

    pub fn is_pet(&self) -> bool {
        matches!(self, DragEntity::Pet)
    }
}

impl From<EmployeeId> for DragEntity {
    fn from(id: EmployeeId) -> Self {
        DragEntity::Employee(id)
    }
}

impl fmt::Display for DragEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragEntity::Employee(id) => write!(f, "{id}"),
            DragEntity::Pet => f.write_str(PET_ENTITY_ID),
        }
    }
}

/// Where a drag was released.
///
/// Waiting slots are recognized by their reserved prefix, never by
/// looking them up among seats.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DropTarget {
    Seat(SeatId),
    /// A waiting slot; the ordinal is kept for display only.
    Waiting(Option<usize>),
}

impl DropTarget {
    /// Interprets a raw droppable id as reported by a host.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(WAITING_PREFIX) {
            Some(rest) => DropTarget::Waiting(rest.parse().ok()),
            None => DropTarget::Seat(SeatId::new(raw)),
        }
    }

    pub fn waiting(ordinal: usize) -> Self {
        DropTarget::Waiting(Some(ordinal))
    }

    pub fn seat(id: impl Into<String>) -> Self {
        DropTarget::Seat(SeatId::new(id))
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropTarget::Seat(id) => write!(f, "{id}"),
            DropTarget::Waiting(Some(n)) => f.write_str(&waiting_slot_id(*n)),
            DropTarget::Waiting(None) => f.write_str(WAITING_PREFIX),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragEntity),
}

/// Why a drag ended without touching the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoChangeReason {
    /// Released over nothing droppable.
    NoTarget,
    UnknownEmployee,
    UnknownSeat,
    /// Target is a structural gap, not an assignable seat.
    StructuralGap,
    /// Dropped back onto the seat it already holds.
    SameSeat,
    /// Unseated employee dropped on the waiting pool.
    AlreadyWaiting,
    /// Pet dragged but the chart has no pet.
    PetDisabled,
    /// Pet released without a known position.
    NoPosition,
}

/// Result of resolving one drag end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    NoChange(NoChangeReason),
    Unassign {
        employee: EmployeeId,
        from: SeatId,
    },
    Move {
        employee: EmployeeId,
        from: Option<SeatId>,
        to: SeatId,
    },
    /// `displaced` sat on `to` and receives `from`, the dragged employee's
    /// seat before the drop (possibly none, sending it to the waiting pool).
    Swap {
        employee: EmployeeId,
        from: Option<SeatId>,
        to: SeatId,
        displaced: EmployeeId,
    },
    PetPlaced(Position),
}

impl DropOutcome {
    /// Roster writes this outcome amounts to, as one batch.
    pub fn changes(&self) -> Vec<SeatChange> {
        match self {
            DropOutcome::NoChange(_) | DropOutcome::PetPlaced(_) => Vec::new(),
            DropOutcome::Unassign { employee, .. } => vec![SeatChange::new(employee.clone(), None)],
            DropOutcome::Move { employee, to, .. } => {
                vec![SeatChange::new(employee.clone(), Some(to.clone()))]
            }
            DropOutcome::Swap {
                employee,
                from,
                to,
                displaced,
            } => vec![
                SeatChange::new(employee.clone(), Some(to.clone())),
                SeatChange::new(displaced.clone(), from.clone()),
            ],
        }
    }

    pub fn is_no_change(&self) -> bool {
        matches!(self, DropOutcome::NoChange(_))
    }
}

/// Decides what dropping `employee` on `target` does to the roster.
///
/// Pure: reads the current snapshot only. For swaps both seat values are
/// taken from this snapshot, before anything is written.
pub fn plan_drop(
    roster: &Roster,
    directory: &SeatDirectory,
    employee: &EmployeeId,
    target: Option<&DropTarget>,
) -> DropOutcome {
    let Some(target) = target else {
        return DropOutcome::NoChange(NoChangeReason::NoTarget);
    };
    let Some(active) = roster.find_by_id(employee) else {
        return DropOutcome::NoChange(NoChangeReason::UnknownEmployee);
    };

    let seat = match target {
        DropTarget::Waiting(_) => {
            return match &active.seat {
                Some(from) => DropOutcome::Unassign {
                    employee: employee.clone(),
                    from: from.clone(),
                },
                None => DropOutcome::NoChange(NoChangeReason::AlreadyWaiting),
            };
        }
        DropTarget::Seat(seat) => seat,
    };

    match directory.seat(seat) {
        None => return DropOutcome::NoChange(NoChangeReason::UnknownSeat),
        Some(s) if !s.is_assignable() => {
            return DropOutcome::NoChange(NoChangeReason::StructuralGap);
        }
        Some(_) => {}
    }
    if active.seat.as_ref() == Some(seat) {
        return DropOutcome::NoChange(NoChangeReason::SameSeat);
    }

    match roster.find_by_seat(seat) {
        Some(other) => DropOutcome::Swap {
            employee: employee.clone(),
            from: active.seat.clone(),
            to: seat.clone(),
            displaced: other.id.clone(),
        },
        None => DropOutcome::Move {
            employee: employee.clone(),
            from: active.seat.clone(),
            to: seat.clone(),
        },
    }
}

/// A finished gesture as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    pub entity: DragEntity,
    pub target: Option<DropTarget>,
    /// Where the dragged visual was released; only the pet uses it.
    pub release: Option<Position>,
}

impl DragEnd {
    pub fn new(entity: DragEntity, target: Option<DropTarget>) -> Self {
        DragEnd {
            entity,
            target,
            release: None,
        }
    }

    pub fn released_at(mut self, at: Position) -> Self {
        self.release = Some(at);
        self
    }
}

/// Tracks the single active drag and resolves drag ends.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn active(&self) -> Option<&DragEntity> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(entity) => Some(entity),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active().is_some()
    }

    /// Records `entity` as the active draggable.
    pub fn on_drag_start(&mut self, entity: DragEntity) {
        if let DragState::Dragging(previous) = &self.state {
            warn!(%previous, %entity, "drag started while another drag was active");
        }
        debug!(%entity, "drag start");
        self.state = DragState::Dragging(entity);
    }

    /// Resolves a drag end and applies its roster writes in one batch.
    ///
    /// Always returns to idle, whatever the outcome.
    #[instrument(level = "debug", skip_all, fields(entity = %end.entity))]
    pub fn on_drag_end(
        &mut self,
        roster: &mut Roster,
        directory: &SeatDirectory,
        pet: Option<&mut Pet>,
        end: DragEnd,
    ) -> DropOutcome {
        let prev_state = std::mem::replace(&mut self.state, DragState::Idle);
        match &prev_state {
            DragState::Dragging(active) if *active == end.entity => {}
            DragState::Dragging(active) => {
                warn!(%active, "drag end reported a different entity than the active one");
            }
            DragState::Idle => warn!("drag end without a drag start"),
        }

        let outcome = match &end.entity {
            DragEntity::Pet => place_pet(pet, end.release),
            DragEntity::Employee(id) => plan_drop(roster, directory, id, end.target.as_ref()),
        };

        let changed = roster.apply(outcome.changes());
        debug!(?outcome, changed, revision = roster.revision(), "drag end");
        outcome
    }

    /// Outcome the active drag would have if released over `target` now.
    pub fn preview(
        &self,
        roster: &Roster,
        directory: &SeatDirectory,
        target: Option<&DropTarget>,
    ) -> Option<DropOutcome> {
        match self.active()? {
            DragEntity::Employee(id) => Some(plan_drop(roster, directory, id, target)),
            DragEntity::Pet => None,
        }
    }
}

fn place_pet(pet: Option<&mut Pet>, release: Option<Position>) -> DropOutcome {
    let Some(pet) = pet else {
        return DropOutcome::NoChange(NoChangeReason::PetDisabled);
    };
    match release {
        Some(at) => {
            pet.place(at);
            DropOutcome::PetPlaced(at)
        }
        None => DropOutcome::NoChange(NoChangeReason::NoPosition),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::tests::employee;
    use crate::seat::{Seat, Section};

    fn directory() -> SeatDirectory {
        SeatDirectory::new(vec![Section {
            key: "main".to_string(),
            title: "Main".to_string(),
            row: "upper".to_string(),
            columns: 2,
            seats: vec![Seat::new("A"), Seat::new("B"), Seat::new("C"), Seat::gap("GAP")],
        }])
        .unwrap()
    }

    fn roster() -> Roster {
        Roster::new([
            employee("p1", Some("A")),
            employee("p2", Some("B")),
            employee("p3", None),
        ])
        .unwrap()
    }

    fn seats(roster: &Roster) -> Vec<(String, Option<String>)> {
        roster
            .iter()
            .map(|e| (e.id.to_string(), e.seat.as_ref().map(|s| s.to_string())))
            .collect()
    }

    #[test]
    fn parse_entities_and_targets() {
        assert_eq!(DragEntity::parse("@pet"), DragEntity::Pet);
        assert_eq!(DragEntity::parse("p1"), DragEntity::Employee("p1".into()));
        assert_eq!(DropTarget::parse("waiting-3"), DropTarget::waiting(3));
        assert_eq!(DropTarget::parse("waiting-x"), DropTarget::Waiting(None));
        assert_eq!(DropTarget::parse("UO1"), DropTarget::seat("UO1"));
        assert_eq!(DropTarget::waiting(7).to_string(), "waiting-7");
    }

    #[test]
    fn plan_covers_decision_table() {
        let dir = directory();
        let r = roster();
        let p1: EmployeeId = "p1".into();
        let p3: EmployeeId = "p3".into();

        assert_eq!(
            plan_drop(&r, &dir, &p1, None),
            DropOutcome::NoChange(NoChangeReason::NoTarget)
        );
        assert_eq!(
            plan_drop(&r, &dir, &p1, Some(&DropTarget::waiting(1))),
            DropOutcome::Unassign {
                employee: p1.clone(),
                from: "A".into()
            }
        );
        assert_eq!(
            plan_drop(&r, &dir, &p3, Some(&DropTarget::waiting(1))),
            DropOutcome::NoChange(NoChangeReason::AlreadyWaiting)
        );
        assert_eq!(
            plan_drop(&r, &dir, &p1, Some(&DropTarget::seat("B"))),
            DropOutcome::Swap {
                employee: p1.clone(),
                from: Some("A".into()),
                to: "B".into(),
                displaced: "p2".into()
            }
        );
        assert_eq!(
            plan_drop(&r, &dir, &p3, Some(&DropTarget::seat("C"))),
            DropOutcome::Move {
                employee: p3.clone(),
                from: None,
                to: "C".into()
            }
        );
        assert_eq!(
            plan_drop(&r, &dir, &p1, Some(&DropTarget::seat("A"))),
            DropOutcome::NoChange(NoChangeReason::SameSeat)
        );
        assert_eq!(
            plan_drop(&r, &dir, &p1, Some(&DropTarget::seat("GAP"))),
            DropOutcome::NoChange(NoChangeReason::StructuralGap)
        );
        assert_eq!(
            plan_drop(&r, &dir, &p1, Some(&DropTarget::seat("Z"))),
            DropOutcome::NoChange(NoChangeReason::UnknownSeat)
        );
        assert_eq!(
            plan_drop(&r, &dir, &"ghost".into(), Some(&DropTarget::seat("C"))),
            DropOutcome::NoChange(NoChangeReason::UnknownEmployee)
        );
    }

    #[test]
    fn swap_uses_pre_mutation_seat() {
        let dir = directory();
        let mut r = roster();
        let mut ctl = DragController::new();

        ctl.on_drag_start(DragEntity::parse("p1"));
        ctl.on_drag_end(
            &mut r,
            &dir,
            None,
            DragEnd::new(DragEntity::parse("p1"), Some(DropTarget::seat("B"))),
        );

        assert_eq!(
            seats(&r),
            [
                ("p1".to_string(), Some("B".to_string())),
                ("p2".to_string(), Some("A".to_string())),
                ("p3".to_string(), None),
            ]
        );
        assert_eq!(r.revision(), 1);
    }

    #[test]
    fn drag_end_always_returns_to_idle() {
        let dir = directory();
        let mut r = roster();
        let mut ctl = DragController::new();

        ctl.on_drag_start(DragEntity::parse("p1"));
        assert!(ctl.is_dragging());
        let outcome = ctl.on_drag_end(&mut r, &dir, None, DragEnd::new(DragEntity::parse("p1"), None));

        assert_eq!(outcome, DropOutcome::NoChange(NoChangeReason::NoTarget));
        assert_eq!(ctl.state(), &DragState::Idle);
        assert_eq!(r.revision(), 0);
    }

    #[test]
    fn gap_and_self_drops_leave_roster_untouched() {
        let dir = directory();
        let mut r = roster();
        let before = seats(&r);
        let mut ctl = DragController::new();

        for target in ["GAP", "A", "nowhere"] {
            ctl.on_drag_start(DragEntity::parse("p1"));
            let outcome = ctl.on_drag_end(
                &mut r,
                &dir,
                None,
                DragEnd::new(DragEntity::parse("p1"), Some(DropTarget::parse(target))),
            );
            assert!(outcome.is_no_change(), "{target}: {outcome:?}");
        }

        assert_eq!(seats(&r), before);
        assert_eq!(r.revision(), 0);
    }

    #[test]
    fn pet_drop_records_position_only() {
        let dir = directory();
        let mut r = roster();
        let mut pet = Pet::default();
        let mut ctl = DragController::new();

        ctl.on_drag_start(DragEntity::Pet);
        let outcome = ctl.on_drag_end(
            &mut r,
            &dir,
            Some(&mut pet),
            DragEnd::new(DragEntity::Pet, Some(DropTarget::seat("C"))).released_at(Position::new(40, 9)),
        );

        assert_eq!(outcome, DropOutcome::PetPlaced(Position::new(40, 9)));
        assert_eq!(pet.position, Some(Position::new(40, 9)));
        assert!(r.find_by_seat(&"C".into()).is_none());
        assert_eq!(r.revision(), 0);
    }

    #[test]
    fn pet_drop_without_pet_or_position() {
        let dir = directory();
        let mut r = roster();
        let mut pet = Pet::default();
        let mut ctl = DragController::new();

        ctl.on_drag_start(DragEntity::Pet);
        let outcome = ctl.on_drag_end(&mut r, &dir, None, DragEnd::new(DragEntity::Pet, None));
        assert_eq!(outcome, DropOutcome::NoChange(NoChangeReason::PetDisabled));

        ctl.on_drag_start(DragEntity::Pet);
        let outcome = ctl.on_drag_end(&mut r, &dir, Some(&mut pet), DragEnd::new(DragEntity::Pet, None));
        assert_eq!(outcome, DropOutcome::NoChange(NoChangeReason::NoPosition));
        assert!(!pet.is_placed());
    }

    #[test]
    fn preview_does_not_mutate() {
        let dir = directory();
        let r = roster();
        let mut ctl = DragController::new();

        assert!(ctl.preview(&r, &dir, Some(&DropTarget::seat("B"))).is_none());

        ctl.on_drag_start(DragEntity::parse("p3"));
        let preview = ctl.preview(&r, &dir, Some(&DropTarget::seat("B"))).unwrap();

        assert!(matches!(preview, DropOutcome::Swap { ref displaced, .. } if displaced.as_str() == "p2"));
        assert_eq!(r.revision(), 0);
        assert!(ctl.is_dragging());
    }

    #[test]
    fn swap_changes_are_computed_together() {
        let outcome = DropOutcome::Swap {
            employee: "p3".into(),
            from: None,
            to: "A".into(),
            displaced: "p2".into(),
        };

        assert_eq!(
            outcome.changes(),
            [
                SeatChange::new("p3".into(), Some("A".into())),
                SeatChange::new("p2".into(), None),
            ]
        );
    }
}
