//! Bookmark export: an Internet-shortcut file pointing at a progress link

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkOutcome {
    /// Shortcut file written at this path
    Written(PathBuf),
    /// File could not be created; instructions for saving the link by hand
    Manual(String),
}

/// Contents of a `.url` shortcut file
pub fn bookmark_payload(url: &str) -> String {
    format!("[InternetShortcut]\r\nURL={}\r\n", url)
}

/// e.g. `kartei-progress-2026-10-15.url`
pub fn default_file_name(date: NaiveDate) -> String {
    format!("kartei-progress-{}.url", date.format("%Y-%m-%d"))
}

pub fn manual_instructions(url: &str) -> String {
    format!(
        "Could not create a bookmark file. To save your progress:\n\
         1. Copy this link: {}\n\
         2. Open it in your browser and bookmark the page (Ctrl+D / Cmd+D)",
        url
    )
}

/// Write a shortcut file for `url` at `path`, falling back to manual instructions
pub fn write_bookmark(path: &Path, url: &str) -> BookmarkOutcome {
    let written = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| fs::write(path, bookmark_payload(url)));

    match written {
        Ok(()) => {
            log::info!("Bookmark written to {}", path.display());
            BookmarkOutcome::Written(path.to_path_buf())
        }
        Err(e) => {
            log::warn!("Failed to write bookmark {}: {}", path.display(), e);
            BookmarkOutcome::Manual(manual_instructions(url))
        }
    }
}
