//! Seatplan is the interaction core of a drag-and-drop seating chart editor.
//!
//! Core concepts:
//! - **SeatDirectory**: Read-only catalog of seat slots, grouped in sections
//! - **Roster**: Employees and the seat each one holds (or none: waiting)
//! - **DragController**: Single active drag, turns drag ends into roster writes
//! - **WaitingPool**: Padded projection of unseated employees onto waiting slots
//! - **SeatingChart**: Ties the above together for a rendering host
//!
//! # Example
//!
//! ```
//! use seatplan_core::{DragEnd, DragEntity, DropTarget, FloorPlan};
//!
//! let mut chart = FloorPlan::builtin()?.into_chart()?;
//!
//! // Drag the first waiting employee onto a vacant seat
//! let waiting = chart.waiting_pool().occupant(1).unwrap().id.clone();
//! chart.on_drag_start(DragEntity::from(waiting.clone()));
//! chart.on_drag_end(DragEnd::new(waiting.clone().into(), Some(DropTarget::seat("UO2"))));
//!
//! assert_eq!(chart.find_by_seat(&"UO2".into()).unwrap().id, waiting);
//! # Ok::<(), seatplan_core::PlanError>(())
//! ```
//!
//! # Invariant
//!
//! At most one employee holds any given seat. The roster does not enforce this
//! itself; every mutation goes through [`plan_drop`] (which swaps instead of
//! stacking) or clears a seat.

mod chart;
mod drag;
mod employee;
mod error;
mod pet;
mod plan;
mod roster;
mod seat;
mod waiting;

pub use chart::SeatingChart;
pub use drag::{
    DragController, DragEnd, DragEntity, DragState, DropOutcome, DropTarget, NoChangeReason, PET_ENTITY_ID,
    RESERVED_ENTITY_PREFIX, plan_drop,
};
pub use employee::{Employee, EmployeeId, Gender};
pub use error::PlanError;
pub use pet::{Pet, Position};
pub use plan::FloorPlan;
pub use roster::{Roster, SeatChange};
pub use seat::{Seat, SeatDirectory, SeatId, Section};
pub use waiting::{
    MIN_WAITING_SLOTS, WAITING_PREFIX, WAITING_SLOT_PADDING, WaitingPool, WaitingSlot, slot_count,
    waiting_slot_id,
};
