//! View-state models for the card carousel

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sheets::Row;

/// Which sheet's cards are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceFilter {
    #[default]
    All,
    Source(usize),
}

impl SourceFilter {
    pub fn matches(&self, source_index: usize) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Source(index) => *index == source_index,
        }
    }

    /// Cycle all → 0 → 1 → … → all over `source_count` sources
    pub fn cycle(self, source_count: usize) -> Self {
        match self {
            SourceFilter::All if source_count > 0 => SourceFilter::Source(0),
            SourceFilter::Source(i) if i + 1 < source_count => SourceFilter::Source(i + 1),
            _ => SourceFilter::All,
        }
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFilter::All => f.write_str("all"),
            SourceFilter::Source(index) => write!(f, "{}", index),
        }
    }
}

impl FromStr for SourceFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(SourceFilter::All);
        }
        s.parse::<usize>()
            .map(SourceFilter::Source)
            .map_err(|_| format!("expected 'all' or a sheet index, got '{}'", s))
    }
}

/// Filter on learned status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LearningFilter {
    #[default]
    All,
    Learned,
    Unlearned,
}

impl LearningFilter {
    pub fn matches(&self, learned: bool) -> bool {
        match self {
            LearningFilter::All => true,
            LearningFilter::Learned => learned,
            LearningFilter::Unlearned => !learned,
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            LearningFilter::All => LearningFilter::Unlearned,
            LearningFilter::Unlearned => LearningFilter::Learned,
            LearningFilter::Learned => LearningFilter::All,
        }
    }
}

impl fmt::Display for LearningFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LearningFilter::All => "all",
            LearningFilter::Learned => "learned",
            LearningFilter::Unlearned => "unlearned",
        })
    }
}

impl FromStr for LearningFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(LearningFilter::All),
            "learned" => Ok(LearningFilter::Learned),
            "unlearned" => Ok(LearningFilter::Unlearned),
            other => Err(format!("unknown learning filter '{}'", other)),
        }
    }
}

/// Quiz orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// `Front` on the front, sentence with the front (`de-en`)
    #[default]
    Forward,
    /// `Back` on the front, sentence with the back (`en-de`)
    Reverse,
}

impl Direction {
    /// Value of the `mode` share parameter
    pub fn mode_param(&self) -> &'static str {
        match self {
            Direction::Forward => "de-en",
            Direction::Reverse => "en-de",
        }
    }

    pub fn from_mode_param(value: &str) -> Option<Self> {
        match value.trim() {
            "de-en" => Some(Direction::Forward),
            "en-de" => Some(Direction::Reverse),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    /// Project a row onto the two faces of a card
    pub fn project<'a>(&self, row: &'a Row) -> CardFaces<'a> {
        match self {
            Direction::Forward => CardFaces {
                front: row.front(),
                back: row.back(),
                sentence: row.sentence(),
                sentence_side: Side::Front,
            },
            Direction::Reverse => CardFaces {
                front: row.back(),
                back: row.front(),
                sentence: row.sentence(),
                sentence_side: Side::Back,
            },
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(Direction::Forward),
            "reverse" => Ok(Direction::Reverse),
            other => Direction::from_mode_param(other)
                .ok_or_else(|| format!("unknown direction '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Front,
    Back,
}

/// What each face of a card shows under the active direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFaces<'a> {
    pub front: &'a str,
    pub back: &'a str,
    pub sentence: Option<&'a str>,
    pub sentence_side: Side,
}

impl<'a> CardFaces<'a> {
    /// The sentence if it belongs on `side`
    pub fn sentence_on(&self, side: Side) -> Option<&'a str> {
        if self.sentence_side == side {
            self.sentence
        } else {
            None
        }
    }
}

/// Filter inputs the displayed set is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewFilters {
    pub source: SourceFilter,
    pub learning: LearningFilter,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::{BACK_FIELD, FRONT_FIELD, SENTENCE_FIELD};

    fn hund() -> Row {
        Row::from_pairs([
            (FRONT_FIELD, "Hund"),
            (BACK_FIELD, "dog"),
            (SENTENCE_FIELD, "Der Hund läuft."),
        ])
    }

    #[test]
    fn test_forward_projection() {
        let row = hund();
        let faces = Direction::Forward.project(&row);
        assert_eq!(faces.front, "Hund");
        assert_eq!(faces.back, "dog");
        assert_eq!(faces.sentence_on(Side::Front), Some("Der Hund läuft."));
        assert_eq!(faces.sentence_on(Side::Back), None);
    }

    #[test]
    fn test_reverse_projection() {
        let row = hund();
        let faces = Direction::Reverse.project(&row);
        assert_eq!(faces.front, "dog");
        assert_eq!(faces.back, "Hund");
        assert_eq!(faces.sentence_on(Side::Front), None);
        assert_eq!(faces.sentence_on(Side::Back), Some("Der Hund läuft."));
    }

    #[test]
    fn test_mode_param_round_trip() {
        for direction in [Direction::Forward, Direction::Reverse] {
            assert_eq!(Direction::from_mode_param(direction.mode_param()), Some(direction));
        }
        assert_eq!(Direction::from_mode_param("fr-de"), None);
    }

    #[test]
    fn test_source_filter_parse_and_cycle() {
        assert_eq!("all".parse::<SourceFilter>().unwrap(), SourceFilter::All);
        assert_eq!("2".parse::<SourceFilter>().unwrap(), SourceFilter::Source(2));
        assert!("-1".parse::<SourceFilter>().is_err());

        let mut filter = SourceFilter::All;
        let mut seen = Vec::new();
        for _ in 0..3 {
            filter = filter.cycle(2);
            seen.push(filter);
        }
        assert_eq!(
            seen,
            vec![SourceFilter::Source(0), SourceFilter::Source(1), SourceFilter::All]
        );
        assert_eq!(SourceFilter::All.cycle(0), SourceFilter::All);
    }

    #[test]
    fn test_learning_filter_matches() {
        assert!(LearningFilter::All.matches(true));
        assert!(LearningFilter::Learned.matches(true));
        assert!(!LearningFilter::Learned.matches(false));
        assert!(LearningFilter::Unlearned.matches(false));
    }
}
