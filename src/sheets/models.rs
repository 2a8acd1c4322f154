//! Data models for sheet rows and the combined deck

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const FRONT_FIELD: &str = "Front";
pub const BACK_FIELD: &str = "Back";
pub const SENTENCE_FIELD: &str = "Sentence";

/// One record from a sheet, keyed by (trimmed) header name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, String>,
}

impl Row {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    /// Build a row from `(field, value)` pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn front(&self) -> &str {
        self.get(FRONT_FIELD).unwrap_or_default()
    }

    pub fn back(&self) -> &str {
        self.get(BACK_FIELD).unwrap_or_default()
    }

    /// Example sentence, if the sheet has one for this row
    pub fn sentence(&self) -> Option<&str> {
        self.get(SENTENCE_FIELD)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// A row is usable only when it has a non-blank `Front`
    pub fn has_front(&self) -> bool {
        self.get(FRONT_FIELD)
            .map_or(false, |front| !front.trim().is_empty())
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

/// Stable key used to track per-card learned status.
///
/// Formatted as `{source_index}-{source_position}`. Positional: reordering
/// rows in an upstream sheet changes which card an id refers to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(source_index: usize, source_position: usize) -> Self {
        Self(format!("{}-{}", source_index, source_position))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// A row annotated with where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedRow {
    pub row: Row,
    /// Index of the source in the configured list
    pub source_index: usize,
    /// Position in the combined sequence (running counter over all sources)
    pub original_index: usize,
    /// Position within its own source
    pub source_position: usize,
}

impl TaggedRow {
    pub fn id(&self) -> CardId {
        CardId::new(self.source_index, self.source_position)
    }
}

/// The combined, tagged rows of every configured source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    rows: Vec<TaggedRow>,
    source_count: usize,
}

impl Deck {
    /// Tag and concatenate per-source rows, preserving source order and
    /// within-source order.
    pub fn from_sources(sources: Vec<Vec<Row>>) -> Self {
        let source_count = sources.len();
        let mut rows = Vec::with_capacity(sources.iter().map(Vec::len).sum());

        for (source_index, source_rows) in sources.into_iter().enumerate() {
            for (source_position, row) in source_rows.into_iter().enumerate() {
                let original_index = rows.len();
                rows.push(TaggedRow {
                    row,
                    source_index,
                    original_index,
                    source_position,
                });
            }
        }

        Self { rows, source_count }
    }

    pub fn rows(&self) -> &[TaggedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of configured sources, including ones that produced no rows
    pub fn source_count(&self) -> usize {
        self.source_count
    }

    /// Number of rows contributed by one source
    pub fn source_len(&self, source_index: usize) -> usize {
        self.rows
            .iter()
            .filter(|r| r.source_index == source_index)
            .count()
    }

    pub fn ids(&self) -> Vec<CardId> {
        self.rows.iter().map(TaggedRow::id).collect()
    }

    pub fn get(&self, id: &CardId) -> Option<&TaggedRow> {
        self.rows.iter().find(|r| &r.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn row(front: &str, back: &str) -> Row {
        Row::from_pairs([(FRONT_FIELD, front), (BACK_FIELD, back)])
    }

    fn two_source_deck() -> Deck {
        Deck::from_sources(vec![
            vec![row("Hund", "dog"), row("Katze", "cat")],
            vec![row("Haus", "house")],
        ])
    }

    #[test]
    fn test_ids_follow_source_then_position() {
        let deck = two_source_deck();
        let ids: Vec<String> = deck.ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["0-0", "0-1", "1-0"]);
    }

    #[test]
    fn test_original_index_is_contiguous() {
        let deck = Deck::from_sources(vec![
            vec![row("a", "1"), row("b", "2")],
            vec![],
            vec![row("c", "3"), row("d", "4"), row("e", "5")],
        ]);

        let indices: Vec<usize> = deck.rows().iter().map(|r| r.original_index).collect();
        assert_eq!(indices, (0..5).collect::<Vec<_>>());
        assert_eq!(deck.source_count(), 3);
        assert_eq!(deck.source_len(1), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let deck = Deck::from_sources(vec![
            (0..12).map(|i| row(&format!("w{}", i), "x")).collect(),
            (0..3).map(|i| row(&format!("v{}", i), "y")).collect(),
        ]);
        let ids: HashSet<CardId> = deck.ids().into_iter().collect();
        assert_eq!(ids.len(), deck.len());
    }

    #[test]
    fn test_get_by_id() {
        let deck = two_source_deck();
        let tagged = deck.get(&CardId::from("1-0")).unwrap();
        assert_eq!(tagged.row.front(), "Haus");
        assert_eq!(tagged.original_index, 2);
        assert!(deck.get(&CardId::from("2-0")).is_none());
    }

    #[test]
    fn test_blank_sentence_is_none() {
        let r = Row::from_pairs([(FRONT_FIELD, "Hund"), (SENTENCE_FIELD, "  ")]);
        assert_eq!(r.sentence(), None);
        assert!(r.has_front());
        assert!(!row(" ", "x").has_front());
    }
}
