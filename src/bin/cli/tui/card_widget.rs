use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let learned = state.current_is_learned();
    let side_label = if state.flipped { "back" } else { "front" };

    let title = match state.current_card() {
        Some(card) => format!(" {}  {}  ({}) ", card.id(), state.position_label(), side_label),
        None => " No cards ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if learned {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Cyan)
        });

    let Some((text, sentence)) = state.visible_side() else {
        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No cards match the current filters.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  Press f to change the learned filter or t to change sheet.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(Paragraph::new(help_text).block(block), area);
        return;
    };

    // Vertically centre the word
    let inner_height = area.height.saturating_sub(2) as usize;
    let content_height = if sentence.is_some() { 3 } else { 1 };
    let padding = inner_height.saturating_sub(content_height) / 2;

    let mut lines: Vec<Line> = vec![Line::from(""); padding];
    lines.push(Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if let Some(sentence) = sentence {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            sentence.to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
