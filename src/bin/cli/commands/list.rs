use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let session = &app.session;
    let view = session.view();
    let cards = view.displayed_cards();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = cards
                .iter()
                .map(|card| {
                    let faces = view.faces(card);
                    serde_json::json!({
                        "id": card.id(),
                        "sourceIndex": card.source_index,
                        "originalIndex": card.original_index,
                        "front": faces.front,
                        "back": faces.back,
                        "sentence": faces.sentence,
                        "sentenceSide": faces.sentence_side,
                        "learned": session.is_learned(&card.id()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No cards match the current filters.");
                return Ok(());
            }

            for card in &cards {
                let faces = view.faces(card);
                println!(
                    "{}",
                    terminal::render_card_line(card, &faces, session.is_learned(&card.id()), use_color)
                );
            }

            let filters = view.filters();
            println!(
                "\n{} cards (sheet: {}, showing: {}{})",
                cards.len(),
                filters.source,
                filters.learning,
                if view.is_shuffled() { ", shuffled" } else { "" }
            );
        }
    }

    Ok(())
}
