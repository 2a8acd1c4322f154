use std::path::{Path, PathBuf};

use anyhow::Result;

use kartei_lib::progress::bookmark::{default_file_name, write_bookmark, BookmarkOutcome};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

/// A directory gets a dated file name; anything else is used as the file path
fn bookmark_path(target: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(default_file_name(chrono::Local::now().date_naive()))
    } else {
        target.to_path_buf()
    }
}

pub fn run(app: &App, bookmark: Option<&Path>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let url = app.session.export_progress();
    let outcome = bookmark.map(|target| write_bookmark(&bookmark_path(target), &url));

    match format {
        OutputFormat::Json => {
            let mut output = serde_json::json!({ "url": url });
            match &outcome {
                Some(BookmarkOutcome::Written(path)) => {
                    output["bookmark"] = serde_json::json!(path.to_string_lossy());
                }
                Some(BookmarkOutcome::Manual(instructions)) => {
                    output["instructions"] = serde_json::json!(instructions);
                }
                None => {}
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", url);
            match outcome {
                Some(BookmarkOutcome::Written(path)) => {
                    println!(
                        "{}",
                        paint(&format!("Bookmark saved to {}", path.display()), Color::GREEN, use_color)
                    );
                }
                Some(BookmarkOutcome::Manual(instructions)) => {
                    eprintln!("{}", instructions);
                }
                None => {}
            }
        }
    }

    Ok(())
}
