//! The learned set: toggling, persistence and restore
//!
//! Persistence is best-effort. Read and write failures are logged and the
//! in-memory set stays authoritative for the rest of the session.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::share::ShareParams;
use super::storage::Persistence;
use crate::cards::{Direction, LearnedLookup, SourceFilter};
use crate::sheets::CardId;

pub type LearnedSet = BTreeSet<CardId>;

/// Learned/unlearned counts over a deck
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub total: usize,
    pub learned: usize,
    pub unlearned: usize,
}

pub struct LearnedStore<P> {
    persistence: P,
    key: String,
    learned: LearnedSet,
    revision: u64,
}

impl<P: Persistence> LearnedStore<P> {
    /// Create an empty store; call [`LearnedStore::load_initial`] to restore state
    pub fn new(persistence: P, key: impl Into<String>) -> Self {
        Self {
            persistence,
            key: key.into(),
            learned: LearnedSet::new(),
            revision: 0,
        }
    }

    /// Restore the learned set at startup.
    ///
    /// A share link's `unlearned` list takes precedence over persisted state:
    /// every id in `all_ids` not listed as unlearned is treated as learned,
    /// and the result is persisted. Without a link the persisted set is used;
    /// with neither the set is empty.
    pub fn load_initial(&mut self, share: Option<&ShareParams>, all_ids: &[CardId]) -> &LearnedSet {
        self.learned = match share.and_then(|s| s.unlearned.as_ref()) {
            Some(unlearned) => {
                let unlearned: HashSet<&CardId> = unlearned.iter().collect();
                let learned: LearnedSet = all_ids
                    .iter()
                    .filter(|id| !unlearned.contains(id))
                    .cloned()
                    .collect();
                log::info!(
                    "Restored progress from share link: {} learned, {} unlearned",
                    learned.len(),
                    all_ids.len() - learned.len()
                );
                learned
            }
            None => self.read_persisted(),
        };

        if share.map_or(false, |s| s.unlearned.is_some()) {
            self.persist();
        }

        self.revision += 1;
        &self.learned
    }

    fn read_persisted(&self) -> LearnedSet {
        match self.persistence.get(&self.key) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<CardId>>(&json) {
                Ok(ids) => {
                    log::debug!("Loaded {} learned cards from storage", ids.len());
                    ids.into_iter().collect()
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable learned state '{}': {}", self.key, e);
                    LearnedSet::new()
                }
            },
            Ok(None) => LearnedSet::new(),
            Err(e) => {
                log::warn!("Failed to read learned state '{}': {}", self.key, e);
                LearnedSet::new()
            }
        }
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.learned) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize learned state: {}", e);
                return;
            }
        };

        if let Err(e) = self.persistence.set(&self.key, &json) {
            log::warn!("Failed to save learned state '{}': {}", self.key, e);
        }
    }

    pub fn is_learned(&self, id: &CardId) -> bool {
        self.learned.contains(id)
    }

    /// Flip membership of `id` and persist. Returns the new membership.
    pub fn toggle_learned(&mut self, id: &CardId) -> bool {
        let now_learned = if self.learned.remove(id) {
            false
        } else {
            self.learned.insert(id.clone());
            true
        };

        self.revision += 1;
        self.persist();
        now_learned
    }

    pub fn learned(&self) -> &LearnedSet {
        &self.learned
    }

    /// Share parameters describing the current progress and view
    pub fn share_params(
        &self,
        all_ids: &[CardId],
        direction: Direction,
        sheet: SourceFilter,
    ) -> ShareParams {
        ShareParams {
            unlearned: Some(
                all_ids
                    .iter()
                    .filter(|id| !self.learned.contains(*id))
                    .cloned()
                    .collect(),
            ),
            direction: Some(direction),
            sheet: Some(sheet),
        }
    }

    /// Build a link that restores the current progress and view
    pub fn export_progress(
        &self,
        all_ids: &[CardId],
        direction: Direction,
        sheet: SourceFilter,
        base_url: &str,
    ) -> String {
        self.share_params(all_ids, direction, sheet).to_url(base_url)
    }

    pub fn stats(&self, all_ids: &[CardId]) -> ProgressStats {
        let learned = all_ids.iter().filter(|id| self.is_learned(id)).count();
        ProgressStats {
            total: all_ids.len(),
            learned,
            unlearned: all_ids.len() - learned,
        }
    }
}

impl<P: Persistence> LearnedLookup for LearnedStore<P> {
    fn is_learned(&self, id: &CardId) -> bool {
        LearnedStore::is_learned(self, id)
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}
