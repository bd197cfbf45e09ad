use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

pub const DECK_SIZE: usize = 52;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck exhausted")]
    Exhausted,
    #[error("invalid deck: {0}")]
    InvalidDeck(String),
}

/// An ordered stack of cards. The top of the deck is the end of the vector.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards in suit-then-rank order.
    ///
    /// ```
    /// use holdem_rs::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s)))
            .collect();
        Self { cards }
    }

    /// A standard deck shuffled from `seed`. Equal seeds give equal orders.
    pub fn shuffled(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::shuffled_with(&mut rng)
    }

    pub fn shuffled_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.cards.shuffle(rng);
        deck
    }

    /// A stacked deck for fixtures. The last card in `cards` is dealt first.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() != DECK_SIZE {
            return Err(DeckError::InvalidDeck(format!("expected {DECK_SIZE} cards, got {}", cards.len())));
        }
        let distinct: HashSet<Card> = cards.iter().copied().collect();
        if distinct.len() != DECK_SIZE {
            return Err(DeckError::InvalidDeck("duplicate cards".to_string()));
        }
        Ok(Self { cards })
    }

    /// Build a deck whose first draws are `top` in order, followed by the rest of a
    /// standard deck. Handy for scripting a hand.
    pub fn stacked(top: &[Card]) -> Result<Self, DeckError> {
        let wanted: HashSet<Card> = top.iter().copied().collect();
        if wanted.len() != top.len() {
            return Err(DeckError::InvalidDeck("duplicate cards".to_string()));
        }
        let mut cards: Vec<Card> = Self::standard().cards.into_iter().filter(|c| !wanted.contains(c)).collect();
        cards.extend(top.iter().rev().copied());
        Self::from_cards(cards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Exhausted)
    }

    /// Draws `n` cards or none at all.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::Exhausted);
        }
        Ok((0..n).filter_map(|_| self.cards.pop()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn equal_seeds_give_equal_orders() {
        let d1 = Deck::shuffled(42);
        let d2 = Deck::shuffled(42);
        let d3 = Deck::shuffled(43);
        assert_eq!(d1.cards, d2.cards);
        assert_ne!(d1.cards, d3.cards);
    }

    #[test]
    fn draw_n_is_all_or_nothing() {
        let mut d = Deck::shuffled(7);
        assert_eq!(d.draw_n(50).unwrap().len(), 50);
        assert_eq!(d.draw_n(3), Err(DeckError::Exhausted));
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn from_cards_rejects_short_or_duplicated_decks() {
        let mut cards = Deck::standard().cards;
        cards.pop();
        assert!(matches!(Deck::from_cards(cards.clone()), Err(DeckError::InvalidDeck(_))));
        cards.push(cards[0]);
        assert!(matches!(Deck::from_cards(cards), Err(DeckError::InvalidDeck(_))));
    }

    #[test]
    fn stacked_deals_top_cards_in_order() {
        let top = parse_cards("As Kd 2c").unwrap();
        let mut d = Deck::stacked(&top).unwrap();
        assert_eq!(d.len(), 52);
        assert_eq!(d.draw_n(3).unwrap(), top);
    }
}
