//! A learning session: the loaded deck, the learned store and the view model
//!
//! All mutations go through the session so the derived view always reflects
//! the current learned set.

use std::sync::Arc;

use thiserror::Error;

use crate::cards::{CardFaces, CardViewModel, Direction, LearningFilter, SourceFilter};
use crate::config::AppConfig;
use crate::progress::{LearnedStore, Persistence, ProgressStats, ShareParams};
use crate::sheets::{AggregationError, CardId, Deck, FetchError, HttpFetcher, SourceAggregator, TaggedRow};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] FetchError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

/// Fetch every configured source into one deck
pub async fn load_deck(config: &AppConfig) -> Result<Deck, LoadError> {
    let fetcher = HttpFetcher::new(config.request_timeout())?;
    let aggregator = SourceAggregator::new(Arc::new(config.sources_config()), fetcher);
    Ok(aggregator.load().await?)
}

pub struct Session<P> {
    config: Arc<AppConfig>,
    store: LearnedStore<P>,
    view: CardViewModel,
    all_ids: Vec<CardId>,
}

impl<P: Persistence> Session<P> {
    /// Restore progress (share link first, then storage) and apply any view
    /// settings carried by the share link.
    pub fn new(
        config: Arc<AppConfig>,
        deck: Arc<Deck>,
        persistence: P,
        share: Option<&ShareParams>,
    ) -> Self {
        let all_ids = deck.ids();
        let mut store = LearnedStore::new(persistence, config.storage_key.clone());
        store.load_initial(share, &all_ids);

        let mut view = CardViewModel::new(deck, &store);
        if let Some(share) = share {
            if let Some(direction) = share.direction {
                view.set_direction(direction);
            }
            if let Some(sheet) = share.sheet {
                view.set_source_filter(sheet, &store);
            }
        }

        Self {
            config,
            store,
            view,
            all_ids,
        }
    }

    pub fn view(&self) -> &CardViewModel {
        &self.view
    }

    pub fn store(&self) -> &LearnedStore<P> {
        &self.store
    }

    pub fn deck(&self) -> &Deck {
        self.view.deck()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ==================== View events ====================

    pub fn set_source_filter(&mut self, source: SourceFilter) {
        self.view.set_source_filter(source, &self.store);
    }

    pub fn set_learning_filter(&mut self, learning: LearningFilter) {
        self.view.set_learning_filter(learning, &self.store);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.view.set_direction(direction);
    }

    pub fn request_shuffle(&mut self) {
        self.view.request_shuffle(&self.store);
    }

    pub fn clear_shuffle(&mut self) {
        self.view.clear_shuffle(&self.store);
    }

    pub fn next(&mut self) {
        self.view.next();
    }

    pub fn previous(&mut self) {
        self.view.previous();
    }

    pub fn current_card(&self) -> Option<&TaggedRow> {
        self.view.current_card()
    }

    pub fn current_faces(&self) -> Option<CardFaces<'_>> {
        self.view.current_faces()
    }

    // ==================== Progress ====================

    pub fn is_learned(&self, id: &CardId) -> bool {
        self.store.is_learned(id)
    }

    /// Toggle `id` and re-derive the view if the learning filter depends on it
    pub fn toggle_learned(&mut self, id: &CardId) -> bool {
        let learned = self.store.toggle_learned(id);
        self.view.refresh(&self.store);
        learned
    }

    /// Toggle the card under the carousel cursor
    pub fn toggle_current(&mut self) -> Option<(CardId, bool)> {
        let id = self.view.current_card()?.id();
        let learned = self.toggle_learned(&id);
        Some((id, learned))
    }

    pub fn export_progress(&self) -> String {
        self.store.export_progress(
            &self.all_ids,
            self.view.direction(),
            self.view.filters().source,
            &self.config.share_base_url,
        )
    }

    pub fn stats(&self) -> ProgressStats {
        self.store.stats(&self.all_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::MemoryPersistence;
    use crate::sheets::{Row, BACK_FIELD, FRONT_FIELD};

    fn row(front: &str, back: &str) -> Row {
        Row::from_pairs([(FRONT_FIELD, front), (BACK_FIELD, back)])
    }

    fn deck() -> Arc<Deck> {
        Arc::new(Deck::from_sources(vec![
            vec![row("Hund", "dog"), row("Katze", "cat")],
            vec![row("Haus", "house")],
        ]))
    }

    fn config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            share_base_url: "https://example.com/cards/".to_string(),
            ..AppConfig::default()
        })
    }

    fn displayed(session: &Session<MemoryPersistence>) -> Vec<String> {
        session
            .view()
            .displayed_ids()
            .iter()
            .map(|id| id.to_string())
            .collect()
    }

    #[test]
    fn test_toggle_updates_filtered_view() {
        let mut session = Session::new(config(), deck(), MemoryPersistence::new(), None);
        session.set_learning_filter(LearningFilter::Unlearned);
        assert_eq!(displayed(&session), vec!["0-0", "0-1", "1-0"]);

        assert_eq!(session.toggle_current(), Some((CardId::from("0-0"), true)));
        assert_eq!(displayed(&session), vec!["0-1", "1-0"]);

        let stats = session.stats();
        assert_eq!((stats.learned, stats.unlearned), (1, 2));
    }

    #[test]
    fn test_share_link_applies_view_settings() {
        let share = ShareParams::decode("?unlearned=1-0&mode=en-de&sheet=1");
        let session = Session::new(config(), deck(), MemoryPersistence::new(), Some(&share));

        assert_eq!(session.view().direction(), Direction::Reverse);
        assert_eq!(displayed(&session), vec!["1-0"]);
        assert_eq!(session.current_faces().map(|f| f.front), Some("house"));
        assert!(session.is_learned(&CardId::from("0-0")));
        assert!(!session.is_learned(&CardId::from("1-0")));
    }

    #[test]
    fn test_export_reflects_view() {
        let mut session = Session::new(config(), deck(), MemoryPersistence::new(), None);
        session.toggle_learned(&CardId::from("0-1"));
        session.set_direction(Direction::Reverse);
        session.set_source_filter(SourceFilter::Source(0));

        assert_eq!(
            session.export_progress(),
            "https://example.com/cards/?unlearned=0-0%2C1-0&mode=en-de&sheet=0"
        );
    }

    #[test]
    fn test_toggle_current_on_empty_view() {
        let mut session = Session::new(config(), deck(), MemoryPersistence::new(), None);
        session.set_learning_filter(LearningFilter::Learned);
        assert_eq!(session.toggle_current(), None);
    }
}
