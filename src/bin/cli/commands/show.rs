use anyhow::Result;

use kartei_lib::cards::Direction;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, id: &str, reverse: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let card = app.find_card(id)?;
    let direction = if reverse {
        Direction::Reverse
    } else {
        app.session.view().direction()
    };
    let faces = direction.project(&card.row);
    let learned = app.session.is_learned(&card.id());

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": card.id(),
                "sourceIndex": card.source_index,
                "originalIndex": card.original_index,
                "direction": direction,
                "faces": faces,
                "learned": learned,
                "fields": card.row.fields(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::render_card(card, &faces, learned, use_color));
        }
    }

    Ok(())
}
