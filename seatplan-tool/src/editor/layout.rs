//! Screen geometry of the floor plan and the hit-testing built on it.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use seatplan_core::{DragEntity, DropTarget, SeatId, SeatingChart, Section};

pub const CARD_WIDTH: u16 = 12;
pub const CARD_HEIGHT: u16 = 3;
const CARD_GAP: u16 = 1;
const SECTION_GAP: u16 = 2;
const BAND_GAP: u16 = 1;

/// Two card columns plus borders.
pub const PANEL_WIDTH: u16 = 2 * CARD_WIDTH + CARD_GAP + 2;

pub const PET_WIDTH: u16 = 10;
pub const PET_HEIGHT: u16 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatCell {
    pub rect: Rect,
    pub seat: SeatId,
    pub gap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionFrame {
    pub rect: Rect,
    /// Index into the directory's sections.
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitingCell {
    pub rect: Rect,
    pub ordinal: usize,
}

/// Where everything sits on screen for one frame.
#[derive(Debug, Clone, Default)]
pub struct FloorLayout {
    pub header: Rect,
    pub floor: Rect,
    pub panel: Rect,
    pub status: Rect,
    pub sections: Vec<SectionFrame>,
    pub seats: Vec<SeatCell>,
    pub waiting: Vec<WaitingCell>,
    /// Pet cell inside the waiting panel, while the pet is unplaced.
    pub pet_home: Option<Rect>,
    /// Free-floating pet, once placed.
    pub pet: Option<Rect>,
}

fn hit(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.right() && row >= rect.y && row < rect.bottom()
}

fn fits(inner: Rect, rect: Rect) -> bool {
    rect.x >= inner.x && rect.y >= inner.y && rect.right() <= inner.right() && rect.bottom() <= inner.bottom()
}

fn to_cell(v: i32) -> u16 {
    v.clamp(0, i32::from(u16::MAX)) as u16
}

/// Outer size of a section frame, saturating for absurd grids.
fn section_size(section: &Section) -> (u16, u16) {
    let width = section
        .columns
        .saturating_mul(CARD_WIDTH)
        .saturating_add(section.columns.saturating_sub(1).saturating_mul(CARD_GAP))
        .saturating_add(2);
    let height = section.grid_rows().saturating_mul(CARD_HEIGHT).saturating_add(2);
    (width, height)
}

fn grid_cell(origin_x: u16, origin_y: u16, col: u16, row: u16) -> Rect {
    Rect::new(
        origin_x.saturating_add(col.saturating_mul(CARD_WIDTH + CARD_GAP)),
        origin_y.saturating_add(row.saturating_mul(CARD_HEIGHT)),
        CARD_WIDTH,
        CARD_HEIGHT,
    )
}

impl FloorLayout {
    pub fn compute(area: Rect, chart: &SeatingChart) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(1),    // Floor + waiting panel
                Constraint::Length(1), // Status bar
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(PANEL_WIDTH)])
            .split(rows[1]);

        let mut layout = FloorLayout {
            header: rows[0],
            floor: body[0],
            panel: body[1],
            status: rows[2],
            ..Default::default()
        };
        layout.place_sections(chart);
        layout.place_panel(chart);
        layout.place_pet(chart, area);
        layout
    }

    fn place_sections(&mut self, chart: &SeatingChart) {
        let sections = chart.directory().sections();

        // bands in order of first appearance
        let mut bands: Vec<&str> = Vec::new();
        for section in sections {
            if !bands.contains(&section.row.as_str()) {
                bands.push(&section.row);
            }
        }

        let mut y = self.floor.y;
        for band in bands {
            let mut x = self.floor.x;
            let mut band_height = 0;

            for (index, section) in sections.iter().enumerate().filter(|(_, s)| s.row == band) {
                let start_x = x;
                let (width, height) = section_size(section);
                x = x.saturating_add(width).saturating_add(SECTION_GAP);
                band_height = band_height.max(height);

                let rect = Rect::new(start_x, y, width, height);
                if !fits(self.floor, rect) {
                    continue;
                }
                self.sections.push(SectionFrame { rect, index });
                for (i, seat) in section.seats.iter().enumerate() {
                    let (col, row) = section.cell_of(i);
                    self.seats.push(SeatCell {
                        rect: grid_cell(rect.x + 1, rect.y + 1, col, row),
                        seat: seat.id.clone(),
                        gap: seat.empty,
                    });
                }
            }

            y = y.saturating_add(band_height).saturating_add(BAND_GAP);
        }
    }

    fn place_panel(&mut self, chart: &SeatingChart) {
        let inner = Rect::new(
            self.panel.x + 1,
            self.panel.y + 1,
            self.panel.width.saturating_sub(2),
            self.panel.height.saturating_sub(2),
        );

        let pet_in_panel = chart.pet().is_some_and(|p| !p.is_placed());
        let pool = chart.waiting_pool();
        let mut cells = (0u16..).map(|i| grid_cell(inner.x, inner.y, i % 2, i / 2));

        if pet_in_panel {
            self.pet_home = cells.next().filter(|rect| fits(inner, *rect));
        }
        for slot in pool.slots() {
            let Some(rect) = cells.next() else {
                break;
            };
            if !fits(inner, rect) {
                break;
            }
            self.waiting.push(WaitingCell {
                rect,
                ordinal: slot.ordinal,
            });
        }
    }

    fn place_pet(&mut self, chart: &SeatingChart, area: Rect) {
        let Some(at) = chart.pet().and_then(|p| p.position) else {
            return;
        };
        let max_x = area.right().saturating_sub(PET_WIDTH);
        let max_y = area.bottom().saturating_sub(PET_HEIGHT);
        let x = to_cell(at.x).clamp(area.x, max_x.max(area.x));
        let y = to_cell(at.y).clamp(area.y, max_y.max(area.y));
        self.pet = Some(Rect::new(x, y, PET_WIDTH, PET_HEIGHT).intersection(area));
    }

    pub fn seat_cell(&self, seat: &SeatId) -> Option<&SeatCell> {
        self.seats.iter().find(|cell| &cell.seat == seat)
    }

    /// Droppable under the pointer, if any.
    pub fn target_at(&self, col: u16, row: u16) -> Option<DropTarget> {
        if let Some(cell) = self.seats.iter().find(|c| hit(c.rect, col, row)) {
            return Some(DropTarget::Seat(cell.seat.clone()));
        }
        self.waiting
            .iter()
            .find(|c| hit(c.rect, col, row))
            .map(|c| DropTarget::waiting(c.ordinal))
    }

    /// Draggable under the pointer and the rect it occupies. The placed pet
    /// is drawn on top, so it wins.
    pub fn draggable_at(&self, col: u16, row: u16, chart: &SeatingChart) -> Option<(DragEntity, Rect)> {
        for pet in [self.pet, self.pet_home].into_iter().flatten() {
            if hit(pet, col, row) {
                return Some((DragEntity::Pet, pet));
            }
        }

        if let Some(cell) = self.seats.iter().find(|c| hit(c.rect, col, row)) {
            return chart
                .find_by_seat(&cell.seat)
                .map(|e| (DragEntity::Employee(e.id.clone()), cell.rect));
        }

        let cell = self.waiting.iter().find(|c| hit(c.rect, col, row))?;
        chart
            .waiting_pool()
            .occupant(cell.ordinal)
            .map(|e| (DragEntity::Employee(e.id.clone()), cell.rect))
    }
}
