//! Card carousel view model
//!
//! Derives the displayed subset of the deck from the active filters and
//! projects each row onto front/back faces for the chosen direction.

pub mod models;
pub mod view;

pub use models::*;
pub use view::{derive_displayed, fisher_yates, CardViewModel, LearnedLookup};
