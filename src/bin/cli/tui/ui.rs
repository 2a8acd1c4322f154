use ratatui::prelude::*;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::app_state::TuiState;
use super::{card_widget, status_bar};

const HELP: &[(&str, &str)] = &[
    ("space/enter", "flip card"),
    ("l/→  h/←", "next / previous"),
    ("m", "toggle learned"),
    ("s  S", "shuffle / sheet order"),
    ("t", "cycle sheet"),
    ("f", "cycle learned filter"),
    ("d", "swap direction"),
    ("e", "show progress link"),
    ("b", "save bookmark file"),
    ("q", "quit"),
];

pub fn draw(f: &mut Frame, state: &mut TuiState) {
    let size = f.area();

    // Main layout: card area + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    let card_area = centered(outer[0], 70, 60);
    let status_area = outer[1];

    // Save area for mouse hit-testing
    state.card_area = Some(card_area);

    card_widget::draw(f, card_area, state);
    status_bar::draw(f, status_area, state);

    if state.show_help {
        draw_help(f, size);
    }
}

fn draw_help(f: &mut Frame, area: Rect) {
    let popup = centered(area, 50, 60);
    f.render_widget(Clear, popup);

    let lines: Vec<Line> = HELP
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!(" {:<12}", keys), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();

    let help = Paragraph::new(lines)
        .block(Block::default().title(" Keys ").borders(Borders::ALL));
    f.render_widget(help, popup);
}

/// A rect of `percent_x` by `percent_y` centred in `area`
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
