pub mod export;
pub mod list;
pub mod show;
pub mod sources;
pub mod stats;
pub mod toggle;
