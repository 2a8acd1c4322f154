use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(Color::Green).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    let view = state.app.session.view();
    let filters = view.filters();
    let stats = state.app.session.stats();

    let text = format!(
        " sheet: {}  showing: {}  {}{}  learned {}/{}   ?: help  q: quit ",
        filters.source,
        filters.learning,
        view.direction().mode_param(),
        if view.is_shuffled() { "  shuffled" } else { "" },
        stats.learned,
        stats.total,
    );

    let status = Paragraph::new(text)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}
