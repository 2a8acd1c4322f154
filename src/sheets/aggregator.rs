//! Concurrent, all-or-nothing loading of every configured sheet

use std::sync::Arc;

use futures_util::future::try_join_all;
use thiserror::Error;

use super::fetch::{FetchError, SheetFetcher, SourceLocator};
use super::models::{Deck, Row};
use super::parser::{parse_rows, ParseError};
use crate::config::SourcesConfig;

#[derive(Error, Debug)]
pub enum SourceFailure {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// The first failure encountered while loading sources
#[derive(Error, Debug)]
#[error("source {source_index} ({locator}) failed: {kind}")]
pub struct AggregationError {
    pub source_index: usize,
    pub locator: SourceLocator,
    #[source]
    pub kind: SourceFailure,
}

pub struct SourceAggregator<F> {
    config: Arc<SourcesConfig>,
    fetcher: F,
}

impl<F: SheetFetcher> SourceAggregator<F> {
    pub fn new(config: Arc<SourcesConfig>, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn sources(&self) -> &[SourceLocator] {
        &self.config.locators
    }

    /// Fetch and parse every source concurrently and combine them into a deck.
    ///
    /// Fails as a whole if any single source fails; rows from sources that
    /// already succeeded are dropped.
    pub async fn load(&self) -> Result<Deck, AggregationError> {
        log::info!("Loading {} sources", self.config.locators.len());

        let loads = self
            .config
            .locators
            .iter()
            .enumerate()
            .map(|(index, locator)| self.load_source(index, locator));

        let per_source = try_join_all(loads).await.map_err(|e| {
            log::error!("Aggregation failed: {}", e);
            e
        })?;

        let deck = Deck::from_sources(per_source);
        log::info!(
            "Loaded {} cards from {} sources",
            deck.len(),
            deck.source_count()
        );
        Ok(deck)
    }

    async fn load_source(
        &self,
        source_index: usize,
        locator: &SourceLocator,
    ) -> Result<Vec<Row>, AggregationError> {
        let fail = |kind: SourceFailure| AggregationError {
            source_index,
            locator: locator.clone(),
            kind,
        };

        let text = self
            .fetcher
            .fetch(locator)
            .await
            .map_err(|e| fail(e.into()))?;
        let rows = parse_rows(&text).map_err(|e| fail(e.into()))?;

        log::debug!("source {}: {} rows", source_index, rows.len());
        Ok(rows)
    }
}
