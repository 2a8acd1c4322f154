//! Learned progress for Kartei
//!
//! This module provides:
//! - The learned set with best-effort local persistence
//! - Share-link encoding and restore of progress
//! - Bookmark file export

pub mod bookmark;
pub mod share;
pub mod storage;
pub mod store;

pub use crate::config::DEFAULT_STORAGE_KEY;
pub use bookmark::{write_bookmark, BookmarkOutcome};
pub use share::ShareParams;
pub use storage::{FilePersistence, MemoryPersistence, Persistence, StorageError};
pub use store::{LearnedSet, LearnedStore, ProgressStats};
