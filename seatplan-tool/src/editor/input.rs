use crossterm::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use super::app::EditorApp;

pub fn handle_event(app: &mut EditorApp, event: Event) {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => {}
    }
}

fn handle_key(app: &mut EditorApp, key: KeyEvent) {
    match key.code {
        KeyCode::Esc if app.drag.is_some() => app.cancel_drag(),
        KeyCode::Esc | KeyCode::Char('q') => {
            app.should_quit = true;
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut EditorApp, mouse: MouseEvent) {
    let (col, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.pointer_down(col, row),
        MouseEventKind::Drag(MouseButton::Left) => app.pointer_move(col, row),
        MouseEventKind::Up(MouseButton::Left) => app.pointer_up(col, row),
        MouseEventKind::Down(MouseButton::Middle) => app.middle_click(col, row),
        _ => {}
    }
}
