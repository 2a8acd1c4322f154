use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &mut App, ids: &[String], format: &OutputFormat, use_color: bool) -> Result<()> {
    // Validate every id before changing anything
    let ids = ids
        .iter()
        .map(|raw| app.find_card(raw).map(|card| card.id()))
        .collect::<Result<Vec<_>>>()?;

    let mut results = Vec::new();
    for id in ids {
        let learned = app.session.toggle_learned(&id);
        results.push((id, learned));
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = results
                .iter()
                .map(|(id, learned)| serde_json::json!({ "id": id, "learned": learned }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for (id, learned) in &results {
                if *learned {
                    println!("{} marked {}", id, paint("learned", Color::GREEN, use_color));
                } else {
                    println!("{} marked {}", id, paint("unlearned", Color::YELLOW, use_color));
                }
            }
        }
    }

    Ok(())
}
