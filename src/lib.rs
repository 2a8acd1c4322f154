pub mod cards;
pub mod config;
pub mod progress;
pub mod session;
pub mod sheets;

pub use config::AppConfig;
pub use session::{load_deck, LoadError, Session};
