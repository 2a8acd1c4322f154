use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use super::app_state::TuiState;

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    if state.show_help {
        state.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.quit = true,
        KeyCode::Char(' ') | KeyCode::Enter => state.flip(),
        KeyCode::Char('l') | KeyCode::Char('j') | KeyCode::Right | KeyCode::Down => state.next(),
        KeyCode::Char('h') | KeyCode::Char('k') | KeyCode::Left | KeyCode::Up => state.previous(),
        KeyCode::Char('m') => state.toggle_learned(),
        KeyCode::Char('s') => state.shuffle(),
        KeyCode::Char('S') => state.unshuffle(),
        KeyCode::Char('t') | KeyCode::Tab => state.cycle_sheet(),
        KeyCode::Char('f') => state.cycle_learning_filter(),
        KeyCode::Char('d') => state.toggle_direction(),
        KeyCode::Char('e') => state.export_link(),
        KeyCode::Char('b') => state.export_bookmark(),
        KeyCode::Char('?') => state.show_help = true,
        _ => {}
    }
}

pub fn handle_mouse(state: &mut TuiState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // Click on the card flips it
            if let Some(area) = state.card_area {
                let (col, row) = (mouse.column, mouse.row);
                if col >= area.x && col < area.x + area.width
                    && row >= area.y && row < area.y + area.height
                {
                    state.flip();
                }
            }
        }
        MouseEventKind::ScrollDown => state.next(),
        MouseEventKind::ScrollUp => state.previous(),
        _ => {}
    }
}
