//! Deck, hand and next-card management.
//!
//! All functions here are pure: they take immutable inputs and return new
//! values. Decks are `im::Vector`s, so "copying" a deck to draw from it is
//! O(1) and the caller's deck is never touched.
//!
//! ## Refill policy
//!
//! When a hand slot is played, the preview card moves into that slot and a
//! new preview is drawn, preferring a card id not already in the hand. If
//! only duplicates remain, a duplicate is drawn; if the deck is empty, a
//! random catalog template is substituted. Play is never blocked.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardCatalog, CardId, CardTemplate};
use crate::core::GameRng;

/// Ordered draw pile (front = next draw).
pub type Deck = Vector<CardTemplate>;

/// Hand slots. Four slots stay inline.
pub type Hand = SmallVec<[CardTemplate; 4]>;

/// Build a shuffled deck holding two copies of every catalog template.
///
/// ```
/// use arena_clash::cards::CardCatalog;
/// use arena_clash::core::GameRng;
/// use arena_clash::deck::shuffle;
///
/// let catalog = CardCatalog::standard();
/// let deck = shuffle(&catalog, &mut GameRng::new(1));
/// assert_eq!(deck.len(), 2 * catalog.len());
/// ```
pub fn shuffle(catalog: &CardCatalog, rng: &mut GameRng) -> Deck {
    let mut cards: Vec<CardTemplate> = catalog
        .iter()
        .chain(catalog.iter())
        .cloned()
        .collect();
    rng.shuffle(&mut cards);
    cards.into_iter().collect()
}

/// Draw up to `size` cards, skipping ids already drawn into the hand.
///
/// A duplicate id is only taken when no unique card is left. The hand is
/// shorter than `size` only if the deck runs out.
pub fn draw_hand(deck: &Deck, size: usize) -> (Hand, Deck) {
    let mut remaining = deck.clone();
    let mut hand = Hand::new();
    let mut used: FxHashSet<CardId> = FxHashSet::default();

    while hand.len() < size && !remaining.is_empty() {
        let index = remaining
            .iter()
            .position(|card| !used.contains(&card.id))
            .unwrap_or(0);
        let card = remaining.remove(index);
        used.insert(card.id);
        hand.push(card);
    }

    (hand, remaining)
}

/// Draw the next preview card, preferring an id absent from `hand`.
///
/// Returns `None` only when the deck is empty.
pub fn draw_next_unique(deck: &Deck, hand: &[CardTemplate]) -> (Option<CardTemplate>, Deck) {
    if deck.is_empty() {
        return (None, deck.clone());
    }

    let mut remaining = deck.clone();
    let index = remaining
        .iter()
        .position(|card| hand.iter().all(|held| held.id != card.id))
        .unwrap_or(0);
    let card = remaining.remove(index);
    (Some(card), remaining)
}

/// Replace hand slot `index` with `next`.
///
/// Returns the played card and the new hand, or `None` if `index` is out
/// of range.
pub fn play_slot(hand: &Hand, index: usize, next: CardTemplate) -> Option<(CardTemplate, Hand)> {
    if index >= hand.len() {
        return None;
    }
    let mut new_hand = hand.clone();
    let played = std::mem::replace(&mut new_hand[index], next);
    Some((played, new_hand))
}

/// One side's deck, hand and preview card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckState {
    /// Remaining draw pile.
    pub deck: Deck,
    /// Hand slots.
    pub hand: Hand,
    /// Preview of the card that fills the next played slot.
    pub next_card: CardTemplate,
}

impl DeckState {
    /// Shuffle a fresh doubled deck and deal a hand plus a preview card.
    ///
    /// Panics on an empty catalog.
    pub fn deal(catalog: &CardCatalog, hand_size: usize, rng: &mut GameRng) -> Self {
        assert!(!catalog.is_empty(), "Cannot deal from an empty catalog");

        let shuffled = shuffle(catalog, rng);
        let (mut hand, deck) = draw_hand(&shuffled, hand_size);
        while hand.len() < hand_size {
            if let Some(card) = catalog.random(rng) {
                hand.push(card);
            }
        }

        let (next, deck) = draw_next_unique(&deck, &hand);
        let next_card = next.or_else(|| catalog.random(rng)).unwrap_or_else(|| hand[0].clone());

        Self {
            deck,
            hand,
            next_card,
        }
    }

    /// Play hand slot `index`: the preview moves into the slot and a new
    /// preview is drawn.
    ///
    /// Returns the played card and the new state, or `None` if `index` is
    /// out of range. `self` is left untouched.
    pub fn play(
        &self,
        index: usize,
        catalog: &CardCatalog,
        rng: &mut GameRng,
    ) -> Option<(CardTemplate, DeckState)> {
        let (played, hand) = play_slot(&self.hand, index, self.next_card.clone())?;
        let (next, deck) = draw_next_unique(&self.deck, &hand);
        let next_card = next
            .or_else(|| catalog.random(rng))
            .unwrap_or_else(|| played.clone());

        Some((
            played,
            DeckState {
                deck,
                hand,
                next_card,
            },
        ))
    }

    /// Hand slot `index`, if present.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&CardTemplate> {
        self.hand.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(cards: &[CardTemplate]) -> Vec<u32> {
        cards.iter().map(|c| c.id.raw()).collect()
    }

    fn deck_of(catalog: &CardCatalog, order: &[u32]) -> Deck {
        order
            .iter()
            .filter_map(|&id| catalog.get(CardId::new(id)).cloned())
            .collect()
    }

    #[test]
    fn test_shuffle_doubles_catalog() {
        let catalog = CardCatalog::standard();
        let deck = shuffle(&catalog, &mut GameRng::new(42));

        assert_eq!(deck.len(), 16);
        for template in catalog.iter() {
            assert_eq!(deck.iter().filter(|c| c.id == template.id).count(), 2);
        }
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let catalog = CardCatalog::standard();
        let a = shuffle(&catalog, &mut GameRng::new(9));
        let b = shuffle(&catalog, &mut GameRng::new(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_draw_hand_skips_duplicates() {
        let catalog = CardCatalog::standard();
        let deck = deck_of(&catalog, &[1, 1, 2, 2, 3, 4, 5]);

        let (hand, rest) = draw_hand(&deck, 4);

        assert_eq!(ids(&hand), vec![1, 2, 3, 4]);
        assert_eq!(ids(&rest.iter().cloned().collect::<Vec<_>>()), vec![1, 2, 5]);
        // Input untouched
        assert_eq!(deck.len(), 7);
    }

    #[test]
    fn test_draw_hand_allows_duplicates_when_forced() {
        let catalog = CardCatalog::standard();
        let deck = deck_of(&catalog, &[1, 1, 1, 2]);

        let (hand, rest) = draw_hand(&deck, 4);

        assert_eq!(ids(&hand), vec![1, 2, 1, 1]);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_draw_hand_short_deck() {
        let catalog = CardCatalog::standard();
        let deck = deck_of(&catalog, &[3, 4]);

        let (hand, rest) = draw_hand(&deck, 4);

        assert_eq!(hand.len(), 2);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_draw_next_unique_prefers_absent_id() {
        let catalog = CardCatalog::standard();
        let deck = deck_of(&catalog, &[1, 2, 6, 7]);
        let hand: Vec<_> = deck_of(&catalog, &[1, 2, 3, 4]).into_iter().collect();

        let (card, rest) = draw_next_unique(&deck, &hand);

        assert_eq!(card.map(|c| c.id.raw()), Some(6));
        assert_eq!(ids(&rest.iter().cloned().collect::<Vec<_>>()), vec![1, 2, 7]);
    }

    #[test]
    fn test_draw_next_unique_falls_back_to_any() {
        let catalog = CardCatalog::standard();
        let deck = deck_of(&catalog, &[2, 1]);
        let hand: Vec<_> = deck_of(&catalog, &[1, 2]).into_iter().collect();

        let (card, rest) = draw_next_unique(&deck, &hand);

        assert_eq!(card.map(|c| c.id.raw()), Some(2));
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn test_draw_next_unique_empty_deck() {
        let (card, rest) = draw_next_unique(&Deck::new(), &[]);
        assert!(card.is_none());
        assert!(rest.is_empty());
    }

    #[test]
    fn test_play_slot() {
        let catalog = CardCatalog::standard();
        let hand: Hand = deck_of(&catalog, &[0, 1, 2, 3]).into_iter().collect();
        let next = catalog.get(CardId::new(7)).cloned().unwrap();

        let (played, new_hand) = play_slot(&hand, 2, next.clone()).unwrap();

        assert_eq!(played.id.raw(), 2);
        assert_eq!(ids(&new_hand), vec![0, 1, 7, 3]);
        assert_eq!(ids(&hand), vec![0, 1, 2, 3]);
        assert!(play_slot(&hand, 4, next).is_none());
    }

    #[test]
    fn test_deal_unique_hand_and_preview() {
        let catalog = CardCatalog::standard();
        for seed in 0..50 {
            let state = DeckState::deal(&catalog, 4, &mut GameRng::new(seed));

            assert_eq!(state.hand.len(), 4);
            let mut visible = ids(&state.hand);
            visible.push(state.next_card.id.raw());
            let mut unique = visible.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), 5, "seed {seed}: {visible:?}");
            assert_eq!(state.deck.len(), 11);
        }
    }

    #[test]
    fn test_play_refills_from_preview() {
        let catalog = CardCatalog::standard();
        let mut rng = GameRng::new(3);
        let state = DeckState::deal(&catalog, 4, &mut rng);
        let preview = state.next_card.clone();

        let (played, after) = state.play(1, &catalog, &mut rng).unwrap();

        assert_eq!(played, state.hand[1]);
        assert_eq!(after.hand[1], preview);
        assert_eq!(after.deck.len(), state.deck.len() - 1);
        assert!(after.hand.iter().all(|c| c.id != after.next_card.id));
        assert!(state.play(9, &catalog, &mut rng).is_none());
    }

    #[test]
    fn test_exhausted_deck_never_blocks() {
        let catalog = CardCatalog::standard();
        let mut rng = GameRng::new(11);
        let mut state = DeckState::deal(&catalog, 4, &mut rng);

        for turn in 0..40 {
            let (played, next) = state.play(turn % 4, &catalog, &mut rng).unwrap();
            assert!(catalog.contains(played.id));
            state = next;
        }

        assert!(state.deck.is_empty());
        assert_eq!(state.hand.len(), 4);
        assert!(catalog.contains(state.next_card.id));
    }

    #[test]
    fn test_templates_are_value_copies() {
        let catalog = CardCatalog::standard();
        let mut state = DeckState::deal(&catalog, 4, &mut GameRng::new(5));

        state.hand[0].cost = 99;

        assert!(catalog.iter().all(|t| t.cost <= 5));
        assert_eq!(
            catalog.get(state.hand[1].id).map(|t| t.cost),
            Some(state.hand[1].cost)
        );
    }
}
