use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.session.deck();
    let sources = app.config.sources_config();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = sources
                .locators
                .iter()
                .enumerate()
                .map(|(index, locator)| {
                    serde_json::json!({
                        "index": index,
                        "locator": locator.to_string(),
                        "cardCount": deck.source_len(index),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{:<6} {:>6}  Source", "Sheet", "Cards");
            println!("{} {}  {}", "\u{2500}".repeat(6), "\u{2500}".repeat(6), "\u{2500}".repeat(6));

            for (index, locator) in sources.locators.iter().enumerate() {
                println!(
                    "{:<6} {:>6}  {}",
                    index,
                    deck.source_len(index),
                    paint(&locator.to_string(), Color::DIM, use_color)
                );
            }

            println!("\n{} cards total", deck.len());
        }
    }

    Ok(())
}
