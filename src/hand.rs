use crate::cards::{parse_cards, Card};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many board cards: {0}")]
    TooManyBoardCards(usize),
    #[error("duplicate cards on board")]
    DuplicateBoardCards,
    #[error("hole cards overlap with board")]
    Overlap,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A seat's two private cards.
///
/// ```
/// use holdem_rs::hand::HoleCards;
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// assert!(hole.is_suited());
/// assert!(!hole.is_pair());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match slice {
            [a, b] => Self::try_new(*a, *b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }

    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn is_pair(&self) -> bool {
        self.0.rank() == self.1.rank()
    }

    pub fn is_suited(&self) -> bool {
        self.0.suit() == self.1.suit()
    }

    /// Rank distance between the two cards (0 for a pair).
    pub fn gap(&self) -> u8 {
        self.0.rank().value().abs_diff(self.1.rank().value())
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0.symbolic(), self.1.symbolic())
    }
}

/// Community cards: empty preflop, then 3, 4 and 5 cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > 5 {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(HandError::DuplicateBoardCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn extend<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.cards.extend(cards);
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Board::try_new(cards)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", c.symbolic())?;
        }
        Ok(())
    }
}

/// Collect hole and board cards into one list, rejecting any repeated card.
pub fn combine(hole: &HoleCards, board: &Board) -> Result<Vec<Card>, HandError> {
    if board.len() > 5 {
        return Err(HandError::TooManyBoardCards(board.len()));
    }
    let mut seen = HashSet::with_capacity(7);
    let mut out = Vec::with_capacity(2 + board.len());
    for (i, &c) in hole.as_array().iter().chain(board.as_slice()).enumerate() {
        if !seen.insert(c) {
            return Err(if i < 2 { HandError::DuplicateHoleCards } else { HandError::Overlap });
        }
        out.push(c);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn hole_cards_must_be_distinct() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        assert!(matches!(HoleCards::try_new(a, a), Err(HandError::DuplicateHoleCards)));
        assert!(matches!(HoleCards::from_slice(&[a]), Err(HandError::HoleCount(1))));
    }

    #[test]
    fn hole_card_shape_helpers() {
        let h: HoleCards = "Qh Th".parse().unwrap();
        assert!(h.is_suited());
        assert_eq!(h.gap(), 2);
        let p: HoleCards = "7c 7d".parse().unwrap();
        assert!(p.is_pair());
        assert_eq!(p.gap(), 0);
    }

    #[test]
    fn board_rejects_six_cards_and_dupes() {
        let six = parse_cards("2c 3c 4c 5c 6c 7c").unwrap();
        assert!(matches!(Board::try_new(six), Err(HandError::TooManyBoardCards(6))));
        let dup = parse_cards("2c 2c").unwrap();
        assert!(matches!(Board::try_new(dup), Err(HandError::DuplicateBoardCards)));
    }

    #[test]
    fn combine_catches_overlap() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let board: Board = "As 2c 3c".parse().unwrap();
        assert_eq!(combine(&hole, &board), Err(HandError::Overlap));
        let board: Board = "Ah 2c 3c".parse().unwrap();
        assert_eq!(combine(&hole, &board).unwrap().len(), 5);
    }

    #[test]
    fn board_displays_with_symbols() {
        let board: Board = "Ah 10c 3d".parse().unwrap();
        assert_eq!(board.to_string(), "A♥ 10♣ 3♦");
    }
}
