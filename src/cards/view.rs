//! Derived card view: filtering, shuffling and carousel navigation
//!
//! `displayed_cards` is a pure function of {deck, source filter, learning
//! filter, shuffle generation, learned-set revision}. The view model memoises
//! on those inputs and re-derives only when one of them changes; every
//! re-derivation resets the carousel to the first card.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::models::{CardFaces, Direction, LearningFilter, SourceFilter, ViewFilters};
use crate::sheets::{CardId, Deck, TaggedRow};

/// Read access to learned status, as needed by the learning filter
pub trait LearnedLookup {
    fn is_learned(&self, id: &CardId) -> bool;

    /// Bumped on every change to the learned set
    fn revision(&self) -> u64;
}

/// In-place Fisher–Yates: for i from last down to 1, swap i with a uniform j in [0, i]
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Indices into `deck.rows()` of the cards to display, in display order.
///
/// Source filter first, then learning filter, then (if `shuffle` is given) a
/// fresh permutation.
pub fn derive_displayed<L, R>(
    deck: &Deck,
    filters: &ViewFilters,
    learned: &L,
    shuffle: Option<&mut R>,
) -> Vec<usize>
where
    L: LearnedLookup + ?Sized,
    R: Rng + ?Sized,
{
    let mut displayed: Vec<usize> = deck
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, tagged)| filters.source.matches(tagged.source_index))
        .filter(|(_, tagged)| filters.learning.matches(learned.is_learned(&tagged.id())))
        .map(|(index, _)| index)
        .collect();

    if let Some(rng) = shuffle {
        fisher_yates(&mut displayed, rng);
    }

    displayed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DerivationKey {
    filters: ViewFilters,
    shuffle_generation: Option<u64>,
    // Only tracked when the learning filter depends on it
    learned_revision: Option<u64>,
}

pub struct CardViewModel {
    deck: Arc<Deck>,
    filters: ViewFilters,
    direction: Direction,
    shuffle: bool,
    shuffle_generation: u64,
    displayed: Vec<usize>,
    current: usize,
    derived_for: Option<DerivationKey>,
    rng: StdRng,
}

impl CardViewModel {
    pub fn new(deck: Arc<Deck>, learned: &impl LearnedLookup) -> Self {
        Self::with_rng(deck, learned, StdRng::from_entropy())
    }

    /// Use a specific rng for shuffling (seeded in tests)
    pub fn with_rng(deck: Arc<Deck>, learned: &impl LearnedLookup, rng: StdRng) -> Self {
        let mut view = Self {
            deck,
            filters: ViewFilters::default(),
            direction: Direction::default(),
            shuffle: false,
            shuffle_generation: 0,
            displayed: Vec::new(),
            current: 0,
            derived_for: None,
            rng,
        };
        view.refresh(learned);
        view
    }

    // ==================== Setters ====================

    pub fn set_source_filter(&mut self, source: SourceFilter, learned: &impl LearnedLookup) {
        self.filters.source = source;
        self.refresh(learned);
    }

    pub fn set_learning_filter(&mut self, learning: LearningFilter, learned: &impl LearnedLookup) {
        self.filters.learning = learning;
        self.refresh(learned);
    }

    /// Direction only changes the projection, not the displayed set
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Turn shuffle on and force a new permutation
    pub fn request_shuffle(&mut self, learned: &impl LearnedLookup) {
        self.shuffle = true;
        self.shuffle_generation += 1;
        self.refresh(learned);
    }

    /// Return to sheet order
    pub fn clear_shuffle(&mut self, learned: &impl LearnedLookup) {
        self.shuffle = false;
        self.refresh(learned);
    }

    /// Re-derive if any input changed. Returns whether the displayed set was rebuilt.
    pub fn refresh(&mut self, learned: &impl LearnedLookup) -> bool {
        let key = DerivationKey {
            filters: self.filters,
            shuffle_generation: self.shuffle.then_some(self.shuffle_generation),
            learned_revision: (self.filters.learning != LearningFilter::All)
                .then(|| learned.revision()),
        };

        if self.derived_for == Some(key) {
            return false;
        }

        let rng = if self.shuffle { Some(&mut self.rng) } else { None };
        self.displayed = derive_displayed(&self.deck, &self.filters, learned, rng);
        self.current = 0;
        self.derived_for = Some(key);

        log::debug!(
            "derived {} cards (source={}, learning={}, shuffled={})",
            self.displayed.len(),
            self.filters.source,
            self.filters.learning,
            self.shuffle
        );
        true
    }

    // ==================== Navigation ====================

    pub fn next(&mut self) {
        if self.displayed.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.displayed.len();
    }

    pub fn previous(&mut self) {
        if self.displayed.is_empty() {
            return;
        }
        let len = self.displayed.len();
        self.current = (self.current + len - 1) % len;
    }

    // ==================== Read access ====================

    pub fn deck(&self) -> &Arc<Deck> {
        &self.deck
    }

    pub fn filters(&self) -> ViewFilters {
        self.filters
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.displayed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displayed.is_empty()
    }

    pub fn displayed_cards(&self) -> Vec<&TaggedRow> {
        let rows = self.deck.rows();
        self.displayed.iter().map(|&i| &rows[i]).collect()
    }

    pub fn displayed_ids(&self) -> Vec<CardId> {
        self.displayed_cards().into_iter().map(TaggedRow::id).collect()
    }

    pub fn current_card(&self) -> Option<&TaggedRow> {
        self.displayed
            .get(self.current)
            .map(|&i| &self.deck.rows()[i])
    }

    pub fn faces<'a>(&self, tagged: &'a TaggedRow) -> CardFaces<'a> {
        self.direction.project(&tagged.row)
    }

    pub fn current_faces(&self) -> Option<CardFaces<'_>> {
        self.current_card().map(|tagged| self.faces(tagged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::models::Side;
    use crate::sheets::{Row, BACK_FIELD, FRONT_FIELD, SENTENCE_FIELD};
    use std::collections::BTreeSet;

    #[derive(Default)]
    struct TestLearned {
        ids: BTreeSet<CardId>,
        revision: u64,
    }

    impl TestLearned {
        fn toggle(&mut self, id: &str) {
            let id = CardId::from(id);
            if !self.ids.remove(&id) {
                self.ids.insert(id);
            }
            self.revision += 1;
        }
    }

    impl LearnedLookup for TestLearned {
        fn is_learned(&self, id: &CardId) -> bool {
            self.ids.contains(id)
        }

        fn revision(&self) -> u64 {
            self.revision
        }
    }

    fn row(front: &str, back: &str) -> Row {
        Row::from_pairs([(FRONT_FIELD, front), (BACK_FIELD, back)])
    }

    fn example_deck() -> Arc<Deck> {
        Arc::new(Deck::from_sources(vec![
            vec![row("Hund", "dog"), row("Katze", "cat")],
            vec![row("Haus", "house")],
        ]))
    }

    fn big_deck(n: usize) -> Arc<Deck> {
        Arc::new(Deck::from_sources(vec![(0..n)
            .map(|i| row(&format!("w{}", i), &format!("t{}", i)))
            .collect()]))
    }

    fn seeded(deck: Arc<Deck>, learned: &TestLearned) -> CardViewModel {
        CardViewModel::with_rng(deck, learned, StdRng::seed_from_u64(7))
    }

    fn ids(view: &CardViewModel) -> Vec<String> {
        view.displayed_ids().iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_example_scenario() {
        let mut learned = TestLearned::default();
        let mut view = seeded(example_deck(), &learned);
        assert_eq!(ids(&view), vec!["0-0", "0-1", "1-0"]);

        view.set_source_filter(SourceFilter::Source(1), &learned);
        let fronts: Vec<&str> = view.displayed_cards().iter().map(|c| c.row.front()).collect();
        assert_eq!(fronts, vec!["Haus"]);

        view.set_source_filter(SourceFilter::All, &learned);
        learned.toggle("0-0");
        view.set_learning_filter(LearningFilter::Unlearned, &learned);
        assert_eq!(ids(&view), vec!["0-1", "1-0"]);

        view.set_learning_filter(LearningFilter::Learned, &learned);
        assert_eq!(ids(&view), vec!["0-0"]);
    }

    #[test]
    fn test_learned_change_rederives_only_when_filtered() {
        let mut learned = TestLearned::default();
        let mut view = seeded(example_deck(), &learned);
        view.next();

        learned.toggle("0-1");
        assert!(!view.refresh(&learned));
        assert_eq!(view.current_index(), 1);

        view.set_learning_filter(LearningFilter::Unlearned, &learned);
        assert_eq!(ids(&view), vec!["0-0", "1-0"]);

        learned.toggle("1-0");
        assert!(view.refresh(&learned));
        assert_eq!(ids(&view), vec!["0-0"]);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let learned = TestLearned::default();
        let mut view = seeded(big_deck(30), &learned);
        let before = ids(&view);

        view.request_shuffle(&learned);
        let after = ids(&view);

        let mut sorted_before = before.clone();
        let mut sorted_after = after.clone();
        sorted_before.sort();
        sorted_after.sort();
        assert_eq!(sorted_before, sorted_after);
        assert_ne!(before, after);
        assert!(view.is_shuffled());
    }

    #[test]
    fn test_shuffle_request_rerolls() {
        let learned = TestLearned::default();
        let mut view = seeded(big_deck(30), &learned);

        view.request_shuffle(&learned);
        let first = ids(&view);
        view.request_shuffle(&learned);
        assert_ne!(first, ids(&view));

        // Unchanged inputs keep the permutation
        let second = ids(&view);
        assert!(!view.refresh(&learned));
        assert_eq!(second, ids(&view));
    }

    #[test]
    fn test_filter_change_while_shuffled_reshuffles_subset() {
        let learned = TestLearned::default();
        let deck = Arc::new(Deck::from_sources(vec![
            (0..20).map(|i| row(&format!("a{}", i), "x")).collect(),
            (0..20).map(|i| row(&format!("b{}", i), "y")).collect(),
        ]));
        let mut view = seeded(deck, &learned);
        view.request_shuffle(&learned);

        view.set_source_filter(SourceFilter::Source(1), &learned);
        let displayed = view.displayed_cards();
        assert_eq!(displayed.len(), 20);
        assert!(displayed.iter().all(|c| c.source_index == 1));

        let in_order: Vec<usize> = (0..20).collect();
        let positions: Vec<usize> = displayed.iter().map(|c| c.source_position).collect();
        assert_ne!(positions, in_order);
    }

    #[test]
    fn test_clear_shuffle_restores_order() {
        let learned = TestLearned::default();
        let mut view = seeded(big_deck(10), &learned);
        let ordered = ids(&view);

        view.request_shuffle(&learned);
        view.clear_shuffle(&learned);
        assert_eq!(ids(&view), ordered);
    }

    #[test]
    fn test_wraparound() {
        let learned = TestLearned::default();
        let mut view = seeded(big_deck(5), &learned);

        for _ in 0..5 {
            view.next();
        }
        assert_eq!(view.current_index(), 0);

        view.previous();
        assert_eq!(view.current_index(), 4);
    }

    #[test]
    fn test_navigation_on_empty_is_noop() {
        let mut learned = TestLearned::default();
        let mut view = seeded(example_deck(), &learned);
        view.set_learning_filter(LearningFilter::Learned, &learned);
        assert!(view.is_empty());

        view.next();
        view.previous();
        assert_eq!(view.current_index(), 0);
        assert!(view.current_card().is_none());

        learned.toggle("0-1");
        view.refresh(&learned);
        assert_eq!(view.current_card().map(|c| c.id().to_string()), Some("0-1".into()));
    }

    #[test]
    fn test_rederive_resets_position() {
        let learned = TestLearned::default();
        let mut view = seeded(big_deck(5), &learned);
        view.next();
        view.next();
        assert_eq!(view.current_index(), 2);

        view.set_source_filter(SourceFilter::Source(0), &learned);
        assert_eq!(view.current_index(), 0);
    }

    #[test]
    fn test_direction_keeps_position() {
        let learned = TestLearned::default();
        let deck = Arc::new(Deck::from_sources(vec![vec![Row::from_pairs([
            (FRONT_FIELD, "Hund"),
            (BACK_FIELD, "dog"),
            (SENTENCE_FIELD, "Der Hund läuft."),
        ])]]));
        let mut view = seeded(deck, &learned);

        let faces = view.current_faces().unwrap();
        assert_eq!(faces.front, "Hund");
        assert_eq!(faces.sentence_on(Side::Front), Some("Der Hund läuft."));

        view.set_direction(Direction::Reverse);
        let faces = view.current_faces().unwrap();
        assert_eq!(faces.front, "dog");
        assert_eq!(faces.back, "Hund");
        assert_eq!(faces.sentence_on(Side::Back), Some("Der Hund läuft."));
    }

    #[test]
    fn test_fisher_yates_handles_small_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: Vec<u8> = Vec::new();
        fisher_yates(&mut empty, &mut rng);
        let mut one = vec![9];
        fisher_yates(&mut one, &mut rng);
        assert_eq!(one, vec![9]);
    }
}
