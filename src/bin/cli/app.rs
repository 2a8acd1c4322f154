use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use kartei_lib::cards::Direction;
use kartei_lib::progress::{FilePersistence, ShareParams};
use kartei_lib::sheets::{CardId, TaggedRow};
use kartei_lib::{load_deck, AppConfig, Session};

use crate::ViewArgs;

/// Shared application state for CLI commands
pub struct App {
    pub config: Arc<AppConfig>,
    pub session: Session<FilePersistence>,
}

impl App {
    /// Load configuration, fetch every sheet and restore progress
    pub fn new(config_path: Option<&Path>, extra_sources: &[String], restore: Option<&str>) -> Result<Self> {
        let mut config = AppConfig::load(config_path).context("Failed to load configuration")?;
        config.sources.extend(extra_sources.iter().cloned());

        if config.sources.is_empty() {
            let path = config_path
                .map(Path::to_path_buf)
                .or_else(AppConfig::default_path)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "config.toml".to_string());
            bail!(
                "No sheets configured. Add `sources = [\"<csv url>\"]` to {} or pass --source",
                path
            );
        }

        let data_dir = config.data_dir().context("Failed to get data directory")?;
        let config = Arc::new(config);

        log::info!("Loading vocabulary...");
        let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
        let deck = runtime
            .block_on(load_deck(&config))
            .context("Failed to load vocabulary from one or more sheets")?;

        let share = restore.map(ShareParams::decode);
        let session = Session::new(
            Arc::clone(&config),
            Arc::new(deck),
            FilePersistence::new(data_dir),
            share.as_ref(),
        );

        Ok(Self { config, session })
    }

    /// Apply command-line view settings on top of any restored ones
    pub fn apply_view(&mut self, view: &ViewArgs) {
        if let Some(sheet) = view.sheet {
            self.session.set_source_filter(sheet);
        }
        if let Some(filter) = view.filter {
            self.session.set_learning_filter(filter);
        }
        if view.reverse {
            self.session.set_direction(Direction::Reverse);
        }
        if view.shuffle {
            self.session.request_shuffle();
        }
    }

    /// Find a card by id, listing a few valid ids if it doesn't exist
    pub fn find_card(&self, raw_id: &str) -> Result<&TaggedRow> {
        let id = CardId::from(raw_id);
        match self.session.deck().get(&id) {
            Some(card) => Ok(card),
            None => {
                let sample = self
                    .session
                    .deck()
                    .ids()
                    .iter()
                    .take(5)
                    .map(|id| format!("  - {}", id))
                    .collect::<Vec<_>>()
                    .join("\n");
                bail!("No card with id '{}'. Ids look like:\n{}", raw_id, sample)
            }
        }
    }
}
