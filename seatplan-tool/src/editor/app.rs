use ratatui::layout::Rect;
use seatplan_core::{DragEnd, DragEntity, DropOutcome, DropTarget, NoChangeReason, Position, SeatingChart};
use tracing::debug;

use super::layout::FloorLayout;

/// Pointer-side state of the drag in progress. The chart tracks which
/// entity is active; this tracks where it is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerDrag {
    pub entity: DragEntity,
    /// Offset of the pointer inside the picked-up card.
    pub grab: (u16, u16),
    pub pointer: (u16, u16),
    /// Rect the entity was picked up from, drawn dimmed while dragging.
    pub source: Rect,
}

impl PointerDrag {
    /// Top-left of the card following the pointer.
    pub fn origin(&self) -> (u16, u16) {
        (
            self.pointer.0.saturating_sub(self.grab.0),
            self.pointer.1.saturating_sub(self.grab.1),
        )
    }
}

pub struct EditorApp {
    pub chart: SeatingChart,
    pub layout: FloorLayout,
    pub drag: Option<PointerDrag>,
    pub hover: Option<DropTarget>,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl EditorApp {
    pub fn new(chart: SeatingChart) -> Self {
        Self {
            chart,
            layout: FloorLayout::default(),
            drag: None,
            hover: None,
            status: None,
            should_quit: false,
        }
    }

    pub fn relayout(&mut self, area: Rect) {
        self.layout = FloorLayout::compute(area, &self.chart);
    }

    pub fn pointer_down(&mut self, col: u16, row: u16) {
        if self.drag.is_some() {
            self.cancel_drag();
        }
        let Some((entity, source)) = self.layout.draggable_at(col, row, &self.chart) else {
            return;
        };

        self.chart.on_drag_start(entity.clone());
        self.drag = Some(PointerDrag {
            entity,
            grab: (col - source.x, row - source.y),
            pointer: (col, row),
            source,
        });
        self.hover = self.layout.target_at(col, row);
    }

    pub fn pointer_move(&mut self, col: u16, row: u16) {
        let Some(drag) = &mut self.drag else {
            return;
        };
        drag.pointer = (col, row);
        self.hover = self.layout.target_at(col, row);
    }

    pub fn pointer_up(&mut self, col: u16, row: u16) {
        let Some(mut drag) = self.drag.take() else {
            return;
        };
        drag.pointer = (col, row);
        self.hover = None;

        let (x, y) = drag.origin();
        let end = DragEnd::new(drag.entity, self.layout.target_at(col, row))
            .released_at(Position::new(i32::from(x), i32::from(y)));
        let outcome = self.chart.on_drag_end(end);
        self.status = Some(self.describe(&outcome));
    }

    /// Middle click sends whoever sits under the pointer back to waiting.
    pub fn middle_click(&mut self, col: u16, row: u16) {
        let Some(DropTarget::Seat(seat)) = self.layout.target_at(col, row) else {
            return;
        };
        let Some(employee) = self.chart.find_by_seat(&seat).map(|e| e.id.clone()) else {
            return;
        };
        if self.chart.unassign(&employee) {
            self.status = Some(format!("{} is waiting", self.name_of(&employee)));
        }
    }

    /// Ends the drag in progress as a release over nothing.
    pub fn cancel_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.hover = None;
        let outcome = self.chart.on_drag_end(DragEnd::new(drag.entity, None));
        debug!(?outcome, "drag cancelled");
        self.status = Some("Drag cancelled".to_string());
    }

    /// Outcome the dragged employee would have if dropped on the hovered target.
    pub fn hover_preview(&self) -> Option<DropOutcome> {
        self.drag.as_ref()?;
        self.chart.preview(self.hover.as_ref())
    }

    fn name_of(&self, id: &seatplan_core::EmployeeId) -> String {
        self.chart
            .find_by_id(id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn describe(&self, outcome: &DropOutcome) -> String {
        match outcome {
            DropOutcome::Unassign { employee, from } => {
                format!("{} left {} for the waiting list", self.name_of(employee), from)
            }
            DropOutcome::Move { employee, to, .. } => format!("{} moved to {}", self.name_of(employee), to),
            DropOutcome::Swap {
                employee,
                to,
                displaced,
                ..
            } => format!(
                "{} took {}, {} swapped out",
                self.name_of(employee),
                to,
                self.name_of(displaced)
            ),
            DropOutcome::PetPlaced(_) => {
                let name = self.chart.pet().map(|p| p.name.as_str()).unwrap_or("Pet");
                format!("{name} found a new spot")
            }
            DropOutcome::NoChange(reason) => match reason {
                NoChangeReason::NoTarget => "Dropped outside any seat".to_string(),
                NoChangeReason::StructuralGap => "That spot is not a seat".to_string(),
                NoChangeReason::SameSeat => "Already sitting there".to_string(),
                NoChangeReason::AlreadyWaiting => "Already waiting".to_string(),
                NoChangeReason::UnknownEmployee | NoChangeReason::UnknownSeat => "Nothing changed".to_string(),
                NoChangeReason::PetDisabled | NoChangeReason::NoPosition => "Pet stayed put".to_string(),
            },
        }
    }
}
