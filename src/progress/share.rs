//! Shareable progress links
//!
//! Query parameters:
//! - `unlearned`: comma-separated card ids still to learn
//! - `mode`: `de-en` (forward) or `en-de` (reverse)
//! - `sheet`: `all` or a sheet index

use crate::cards::{Direction, SourceFilter};
use crate::sheets::CardId;

pub const UNLEARNED_PARAM: &str = "unlearned";
pub const MODE_PARAM: &str = "mode";
pub const SHEET_PARAM: &str = "sheet";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareParams {
    pub unlearned: Option<Vec<CardId>>,
    pub direction: Option<Direction>,
    pub sheet: Option<SourceFilter>,
}

impl ShareParams {
    /// Decode from a full URL or a bare query string.
    ///
    /// Unknown parameters are ignored; invalid `mode`/`sheet` values are
    /// dropped with a warning.
    pub fn decode(input: &str) -> Self {
        let query = match input.split_once('?') {
            Some((_, query)) => query,
            None if input.contains('=') => input,
            None => "",
        };
        let query = query.split('#').next().unwrap_or_default();

        let mut params = ShareParams::default();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key);
            let value = decode_component(value);

            match key.as_str() {
                UNLEARNED_PARAM => {
                    params.unlearned = Some(
                        value
                            .split(',')
                            .map(str::trim)
                            .filter(|id| !id.is_empty())
                            .map(CardId::from)
                            .collect(),
                    );
                }
                MODE_PARAM => {
                    params.direction = Direction::from_mode_param(&value);
                    if params.direction.is_none() {
                        log::warn!("Ignoring unknown mode '{}' in share link", value);
                    }
                }
                SHEET_PARAM => match value.parse::<SourceFilter>() {
                    Ok(sheet) => params.sheet = Some(sheet),
                    Err(e) => log::warn!("Ignoring sheet parameter: {}", e),
                },
                _ => {}
            }
        }

        params
    }

    /// Encode as a query string (without the leading `?`)
    pub fn encode(&self) -> String {
        let mut pairs = Vec::new();

        if let Some(unlearned) = &self.unlearned {
            let joined = unlearned
                .iter()
                .map(CardId::as_str)
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(format!("{}={}", UNLEARNED_PARAM, urlencoding::encode(&joined)));
        }
        if let Some(direction) = self.direction {
            pairs.push(format!("{}={}", MODE_PARAM, direction.mode_param()));
        }
        if let Some(sheet) = self.sheet {
            pairs.push(format!("{}={}", SHEET_PARAM, sheet));
        }

        pairs.join("&")
    }

    /// Attach the parameters to `base_url`, replacing any query or fragment it had
    pub fn to_url(&self, base_url: &str) -> String {
        let base = base_url
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let query = self.encode();
        if query.is_empty() {
            base.to_string()
        } else {
            format!("{}?{}", base, query)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.unlearned.is_none() && self.direction.is_none() && self.sheet.is_none()
    }
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw)
        .map(|s| s.into_owned())
        .unwrap_or(raw)
}
