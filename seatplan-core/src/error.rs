use crate::employee::EmployeeId;
use crate::seat::SeatId;

/// Errors raised while loading a floor plan.
///
/// Runtime operations on a loaded chart never fail; these only guard the
/// seed data handed to the core.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("failed to parse floor plan: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate seat id: {0}")]
    DuplicateSeat(SeatId),
    #[error("seat id {0} uses the reserved waiting-slot prefix")]
    ReservedSeatId(SeatId),
    #[error("section {0} has zero columns")]
    ZeroColumns(String),
    #[error("duplicate employee id: {0}")]
    DuplicateEmployee(EmployeeId),
    #[error("employee id {0} uses the reserved '@' prefix")]
    ReservedEmployeeId(EmployeeId),
    #[error("employee {employee} references unknown seat {seat}")]
    UnknownSeat { employee: EmployeeId, seat: SeatId },
    #[error("employee {employee} is placed on structural gap {seat}")]
    UnassignableSeat { employee: EmployeeId, seat: SeatId },
    #[error("seat {seat} is claimed by both {first} and {second}")]
    SeatTaken {
        seat: SeatId,
        first: EmployeeId,
        second: EmployeeId,
    },
}
