use std::env;

use ratatui::prelude::Rect;

use kartei_lib::cards::{CardFaces, Side};
use kartei_lib::progress::bookmark::{default_file_name, write_bookmark, BookmarkOutcome};
use kartei_lib::sheets::TaggedRow;

use crate::app::App;

pub struct TuiState {
    pub app: App,

    /// Whether the current card shows its back
    pub flipped: bool,

    // Card area for mouse hit-testing (updated each draw)
    pub card_area: Option<Rect>,

    pub flash_message: Option<String>,
    pub show_help: bool,
    pub quit: bool,
}

impl TuiState {
    pub fn new(app: App) -> Self {
        Self {
            app,
            flipped: false,
            card_area: None,
            flash_message: None,
            show_help: false,
            quit: false,
        }
    }

    pub fn current_card(&self) -> Option<&TaggedRow> {
        self.app.session.current_card()
    }

    pub fn current_faces(&self) -> Option<CardFaces<'_>> {
        self.app.session.current_faces()
    }

    /// Text and sentence for the side currently facing up
    pub fn visible_side(&self) -> Option<(&str, Option<&str>)> {
        let faces = self.current_faces()?;
        let side = if self.flipped { Side::Back } else { Side::Front };
        let text = match side {
            Side::Front => faces.front,
            Side::Back => faces.back,
        };
        Some((text, faces.sentence_on(side)))
    }

    pub fn position_label(&self) -> String {
        let view = self.app.session.view();
        if view.is_empty() {
            "0 / 0".to_string()
        } else {
            format!("{} / {}", view.current_index() + 1, view.len())
        }
    }

    pub fn current_is_learned(&self) -> bool {
        self.current_card()
            .map_or(false, |card| self.app.session.is_learned(&card.id()))
    }

    // ==================== Carousel ====================

    pub fn flip(&mut self) {
        if self.current_card().is_some() {
            self.flipped = !self.flipped;
        }
    }

    pub fn next(&mut self) {
        self.app.session.next();
        self.flipped = false;
    }

    pub fn previous(&mut self) {
        self.app.session.previous();
        self.flipped = false;
    }

    // ==================== Filters ====================

    pub fn cycle_sheet(&mut self) {
        let view = self.app.session.view();
        let next = view.filters().source.cycle(view.deck().source_count());
        self.app.session.set_source_filter(next);
        self.flipped = false;
        self.flash_message = Some(format!("Sheet: {}", next));
    }

    pub fn cycle_learning_filter(&mut self) {
        let next = self.app.session.view().filters().learning.cycle();
        self.app.session.set_learning_filter(next);
        self.flipped = false;
        self.flash_message = Some(format!("Showing: {}", next));
    }

    pub fn toggle_direction(&mut self) {
        let next = self.app.session.view().direction().toggled();
        self.app.session.set_direction(next);
        self.flipped = false;
        self.flash_message = Some(format!("Direction: {}", next.mode_param()));
    }

    pub fn shuffle(&mut self) {
        self.app.session.request_shuffle();
        self.flipped = false;
        self.flash_message = Some("Shuffled".to_string());
    }

    pub fn unshuffle(&mut self) {
        self.app.session.clear_shuffle();
        self.flipped = false;
        self.flash_message = Some("Sheet order".to_string());
    }

    // ==================== Progress ====================

    pub fn toggle_learned(&mut self) {
        let Some((id, learned)) = self.app.session.toggle_current() else {
            return;
        };
        self.flipped = false;
        self.flash_message = Some(if learned {
            format!("{} marked learned", id)
        } else {
            format!("{} marked unlearned", id)
        });
    }

    pub fn export_link(&mut self) {
        self.flash_message = Some(self.app.session.export_progress());
    }

    /// Save a bookmark file in the working directory
    pub fn export_bookmark(&mut self) {
        let url = self.app.session.export_progress();
        let dir = env::current_dir().unwrap_or_default();
        let path = dir.join(default_file_name(chrono::Local::now().date_naive()));

        self.flash_message = Some(match write_bookmark(&path, &url) {
            BookmarkOutcome::Written(path) => format!("Bookmark saved to {}", path.display()),
            BookmarkOutcome::Manual(_) => format!("Could not save bookmark. Link: {}", url),
        });
    }
}
