use anyhow::Result;

use kartei_lib::sheets::CardId;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let session = &app.session;
    let deck = session.deck();
    let stats = session.stats();

    // Per-sheet breakdown
    let per_sheet: Vec<(usize, usize, usize)> = (0..deck.source_count())
        .map(|index| {
            let ids: Vec<CardId> = deck
                .rows()
                .iter()
                .filter(|r| r.source_index == index)
                .map(|r| r.id())
                .collect();
            let learned = ids.iter().filter(|id| session.is_learned(id)).count();
            (index, ids.len(), learned)
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let sheets: Vec<serde_json::Value> = per_sheet
                .iter()
                .map(|(index, total, learned)| {
                    serde_json::json!({ "sheet": index, "total": total, "learned": learned })
                })
                .collect();
            let output = serde_json::json!({ "overall": stats, "sheets": sheets });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for (index, total, learned) in &per_sheet {
                println!("Sheet {:<3} {:>4} / {:<4} learned", index, learned, total);
            }

            let percent = if stats.total == 0 {
                0.0
            } else {
                stats.learned as f64 * 100.0 / stats.total as f64
            };
            println!(
                "\n{} of {} cards learned ({:.0}%), {} to go",
                paint(&stats.learned.to_string(), Color::GREEN, use_color),
                stats.total,
                percent,
                stats.unlearned
            );
        }
    }

    Ok(())
}
