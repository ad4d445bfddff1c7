use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use seatplan_core::{DragEntity, DropOutcome, DropTarget, Employee, NoChangeReason};

use super::app::EditorApp;
use super::layout::{CARD_HEIGHT, CARD_WIDTH, PET_HEIGHT, PET_WIDTH};

const PET_FACE: &str = "=^.^=";

pub fn render(frame: &mut Frame, app: &mut EditorApp) {
    app.relayout(frame.area());

    render_header(frame, app);
    render_floor(frame, app);
    render_waiting(frame, app);
    render_pet(frame, app);
    render_status_bar(frame, app);
    render_drag_overlay(frame, app);
}

/// Card color per department. Unknown departments fall back to gray.
pub fn department_color(department: &str) -> Color {
    match department {
        "Strategy" => Color::Magenta,
        "Design" => Color::LightMagenta,
        "Marketing" => Color::Rgb(0xff, 0x8c, 0x00),
        "Graphics" => Color::Cyan,
        "Meta Dev" => Color::Blue,
        "R&D" => Color::Green,
        "Service" => Color::Yellow,
        "Meta Planning" => Color::Rgb(0x4b, 0x00, 0x82),
        "Jeonbuk Sales" => Color::Red,
        _ => Color::Gray,
    }
}

fn render_header(frame: &mut Frame, app: &EditorApp) {
    let title = format!(
        "seats - {}/{} seats taken, {} waiting",
        app.chart.roster().seated_count(),
        app.chart.directory().assignable_count(),
        app.chart.waiting_pool().unassigned_count(),
    );

    let header = Paragraph::new(title).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    frame.render_widget(header, app.layout.header);
}

fn render_floor(frame: &mut Frame, app: &EditorApp) {
    let sections = app.chart.directory().sections();
    for section in &app.layout.sections {
        let title = &sections[section.index].title;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(title.as_str(), Style::default().add_modifier(Modifier::BOLD)));
        frame.render_widget(block, section.rect);
    }

    let preview = app.hover_preview();
    for cell in &app.layout.seats {
        if cell.gap {
            let gap = Paragraph::new("-")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(gap, Rect { y: cell.rect.y + 1, height: 1, ..cell.rect });
            continue;
        }

        let hovered = app.hover.as_ref() == Some(&DropTarget::Seat(cell.seat.clone()));
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(cell.seat.as_str());
        if hovered {
            block = match &preview {
                Some(DropOutcome::Swap { .. }) => block
                    .border_style(Style::default().fg(Color::Yellow))
                    .title_bottom(Line::from("swap").right_aligned()),
                Some(DropOutcome::Move { .. }) => block.border_style(Style::default().fg(Color::LightBlue)),
                Some(DropOutcome::NoChange(NoChangeReason::SameSeat)) | None => block,
                Some(_) => block.border_style(Style::default().fg(Color::Red)),
            };
        }

        let occupant = app.chart.find_by_seat(&cell.seat);
        let dimmed = occupant.is_some_and(|e| is_dragged(app, e));
        let body = match occupant {
            Some(employee) => employee_line(employee, dimmed),
            None => Line::from(Span::styled("vacant", Style::default().fg(Color::DarkGray))),
        };
        frame.render_widget(Paragraph::new(body).block(block), cell.rect);
    }
}

fn render_waiting(frame: &mut Frame, app: &EditorApp) {
    let pool = app.chart.waiting_pool();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Waiting ({})", pool.unassigned_count()));
    frame.render_widget(block, app.layout.panel);

    let hovered = match &app.hover {
        Some(DropTarget::Waiting(Some(n))) => Some(*n),
        _ => None,
    };
    for cell in &app.layout.waiting {
        let border = if hovered == Some(cell.ordinal) && app.drag.is_some() {
            Color::LightBlue
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));
        let body = match pool.occupant(cell.ordinal) {
            Some(employee) => employee_line(employee, is_dragged(app, employee)),
            None => Line::default(),
        };
        frame.render_widget(Paragraph::new(body).block(block), cell.rect);
    }
}

fn render_pet(frame: &mut Frame, app: &EditorApp) {
    let Some(pet) = app.chart.pet() else {
        return;
    };
    let dragging = app.drag.as_ref().is_some_and(|d| d.entity.is_pet());
    let style = if dragging {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::LightYellow)
    };

    for rect in [app.layout.pet_home, app.layout.pet].into_iter().flatten() {
        frame.render_widget(Clear, rect);
        frame.render_widget(pet_card(&pet.name, style), rect);
    }
}

fn pet_card<'a>(name: &'a str, style: Style) -> Paragraph<'a> {
    Paragraph::new(PET_FACE)
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(name),
        )
}

fn render_status_bar(frame: &mut Frame, app: &EditorApp) {
    let help = "drag: move  middle-click: unassign  Esc: cancel/quit  q: quit";
    let mut spans = vec![Span::styled(help, Style::default().fg(Color::DarkGray))];
    if let Some(status) = &app.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status.as_str(), Style::default().fg(Color::White)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), app.layout.status);
}

/// Card under the pointer while dragging, drawn last so it stays on top.
fn render_drag_overlay(frame: &mut Frame, app: &EditorApp) {
    let Some(drag) = &app.drag else {
        return;
    };
    let area = frame.area();
    let (x, y) = drag.origin();

    match &drag.entity {
        DragEntity::Pet => {
            let Some(pet) = app.chart.pet() else {
                return;
            };
            let rect = Rect::new(x, y, PET_WIDTH, PET_HEIGHT).intersection(area);
            frame.render_widget(Clear, rect);
            frame.render_widget(pet_card(&pet.name, Style::default().fg(Color::LightYellow)), rect);
        }
        DragEntity::Employee(id) => {
            let Some(employee) = app.chart.find_by_id(id) else {
                return;
            };
            let rect = Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT).intersection(area);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(department_color(&employee.department)));
            frame.render_widget(Clear, rect);
            frame.render_widget(Paragraph::new(employee_line(employee, false)).block(block), rect);
        }
    }
}

fn is_dragged(app: &EditorApp, employee: &Employee) -> bool {
    app.drag
        .as_ref()
        .and_then(|d| d.entity.employee())
        .is_some_and(|id| *id == employee.id)
}

fn employee_line(employee: &Employee, dimmed: bool) -> Line<'_> {
    let style = if dimmed {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else {
        Style::default()
            .fg(department_color(&employee.department))
            .add_modifier(Modifier::BOLD)
    };
    Line::from(Span::styled(employee.name.as_str(), style))
}
