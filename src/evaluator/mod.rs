pub(crate) mod combinations;
pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{Card, Rank};
use crate::hand::{combine, Board, HandError, HoleCards};
use core::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// Packed, comparable hand strength. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u64);

impl HandValue {
    const CAT_SHIFT: u32 = 48;
    const RANK_STRIDE: u32 = 6;

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Layout, most significant first: category (8 bits), then up to five 6-bit rank
    /// slots holding primary ranks followed by kickers. Unused slots stay zero, so
    /// a missing kicker sorts below any real one.
    pub fn from_parts(category: Category, primary: &[Rank], kickers: &[Rank]) -> Self {
        let mut v: u64 = (category as u64) << Self::CAT_SHIFT;
        for (i, r) in primary.iter().chain(kickers).take(5).enumerate() {
            let offset = Self::CAT_SHIFT - Self::RANK_STRIDE * (i as u32 + 1);
            v |= (r.value() as u64) << offset;
        }
        HandValue(v)
    }

    pub const fn category_rank(self) -> u8 {
        (self.0 >> Self::CAT_SHIFT) as u8
    }
}

/// Hand categories, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::RoyalFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(rank: u8) -> Option<Category> {
        Category::ALL.get(rank as usize).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name for a numeric category rank; unknown ranks give `"Unknown"`.
///
/// ```
/// use holdem_rs::evaluator::hand_type_name;
///
/// assert_eq!(hand_type_name(7), "Four of a Kind");
/// assert_eq!(hand_type_name(42), "Unknown");
/// ```
pub fn hand_type_name(category_rank: u8) -> &'static str {
    Category::from_ordinal(category_rank).map_or("Unknown", Category::name)
}

/// Result of scoring a hand. Ordering and equality go through the packed value only,
/// so two hands differing only in suits compare equal.
#[derive(Debug, Clone)]
pub struct HandScore {
    pub category: Category,
    /// Ranks that define the category, most significant first.
    pub primary: Vec<Rank>,
    pub kickers: Vec<Rank>,
    /// The cards making up the hand, strongest first.
    pub best: Vec<Card>,
    value: HandValue,
}

impl HandScore {
    pub(crate) fn new(category: Category, primary: Vec<Rank>, kickers: Vec<Rank>, best: Vec<Card>) -> Self {
        let value = HandValue::from_parts(category, &primary, &kickers);
        Self { category, primary, kickers, best, value }
    }

    pub const fn value(&self) -> HandValue {
        self.value
    }

    /// Highest rank that matters for this hand: the first primary rank, or the top kicker.
    pub fn top_rank(&self) -> Option<Rank> {
        self.primary.first().or_else(|| self.kickers.first()).copied()
    }
}

impl Ord for HandScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for HandScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandScore {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for HandScore {}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.category)?;
        for (i, c) in self.best.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", c.symbolic())?;
        }
        f.write_str(")")
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("not enough cards to evaluate")]
    NotEnoughCards,
    #[error("too many cards to evaluate: {0}")]
    TooManyCards(usize),
}

/// Best hand from two hole cards and 0 to 5 board cards.
///
/// ```
/// use holdem_rs::evaluator::{evaluate, Category};
/// use holdem_rs::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let score = evaluate(&hole, &board).unwrap();
/// assert_eq!(score.category, Category::Pair);
/// ```
pub fn evaluate(hole: &HoleCards, board: &Board) -> Result<HandScore, EvalError> {
    let cards = combine(hole, board)?;
    evaluate_cards(&cards)
}

/// Best hand from 1 to 7 distinct cards.
///
/// With five or more cards every five-card subset is scored and the strongest kept.
/// Fewer cards are scored as they are; straights and flushes need five cards.
pub fn evaluate_cards(cards: &[Card]) -> Result<HandScore, EvalError> {
    use combinations::Combinations;
    use hand_analysis::HandAnalysis;

    if cards.is_empty() {
        return Err(EvalError::NotEnoughCards);
    }
    if cards.len() > 7 {
        return Err(EvalError::TooManyCards(cards.len()));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    if let Some(&dup) = cards.iter().find(|&&c| !seen.insert(c)) {
        return Err(HandError::DuplicateCard(dup).into());
    }

    if cards.len() <= 5 {
        return Ok(HandAnalysis::new(cards).score());
    }

    let mut best: Option<HandScore> = None;
    let mut hand = [cards[0]; 5];
    for indices in Combinations::new(cards.len(), 5) {
        for (slot, &i) in hand.iter_mut().zip(indices.iter()) {
            *slot = cards[i];
        }
        let score = HandAnalysis::new(&hand).score();
        if best.as_ref().map_or(true, |b| score > *b) {
            best = Some(score);
        }
    }
    best.ok_or(EvalError::NotEnoughCards)
}

/// Score exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandScore {
    hand_analysis::HandAnalysis::new(cards).score()
}

/// Category first, then primary ranks, then kickers; the first difference decides.
///
/// ```
/// use holdem_rs::evaluator::{compare, evaluate};
/// use holdem_rs::hand::{Board, HoleCards};
/// use std::cmp::Ordering;
///
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let aces = evaluate(&"As Ah".parse::<HoleCards>().unwrap(), &board).unwrap();
/// let kings = evaluate(&"Ks Kh".parse::<HoleCards>().unwrap(), &board).unwrap();
/// assert_eq!(compare(&aces, &kings), Ordering::Greater);
/// ```
pub fn compare(a: &HandScore, b: &HandScore) -> Ordering {
    a.cmp(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn score(s: &str) -> HandScore {
        evaluate_cards(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn card_count_limits() {
        assert_eq!(evaluate_cards(&[]), Err(EvalError::NotEnoughCards));
        let eight = parse_cards("2c 3c 4c 5c 6c 7c 8c 9c").unwrap();
        assert_eq!(evaluate_cards(&eight), Err(EvalError::TooManyCards(8)));
    }

    #[test]
    fn duplicate_cards_rejected() {
        let cards = parse_cards("As Kd As").unwrap();
        assert!(matches!(evaluate_cards(&cards), Err(EvalError::InvalidHand(HandError::DuplicateCard(_)))));
    }

    #[test]
    fn preflop_scores_two_cards() {
        let pair = score("9c 9d");
        assert_eq!(pair.category, Category::Pair);
        assert_eq!(pair.primary, vec![Rank::Nine]);
        assert!(pair.kickers.is_empty());

        let high = score("Ac 5d");
        assert_eq!(high.category, Category::HighCard);
        assert_eq!(high.kickers, vec![Rank::Ace, Rank::Five]);
        assert!(pair > high);
    }

    #[test]
    fn four_suited_cards_are_not_a_flush() {
        let s = score("Ah Kh 9h 2h");
        assert_eq!(s.category, Category::HighCard);
    }

    #[test]
    fn royal_flush_is_its_own_category() {
        let royal = score("As Ks Qs Js Ts 2d 3c");
        assert_eq!(royal.category, Category::RoyalFlush);
        let sf = score("Ks Qs Js Ts 9s");
        assert_eq!(sf.category, Category::StraightFlush);
        assert!(royal > sf);
    }

    #[test]
    fn seven_cards_pick_best_five() {
        // board pairs nothing, hole makes a wheel
        let s = score("Ah 2d 3c 4s 5h Kd Qd");
        assert_eq!(s.category, Category::Straight);
        assert_eq!(s.primary, vec![Rank::Five]);
        assert_eq!(s.best.len(), 5);
    }

    #[test]
    fn category_layout() {
        let fh = score("Tc Td Th 2s 2h");
        assert_eq!(fh.primary, vec![Rank::Ten]);
        assert_eq!(fh.kickers, vec![Rank::Two]);

        let tp = score("Jc Jd 9c 9h 2s");
        assert_eq!(tp.primary, vec![Rank::Jack, Rank::Nine]);
        assert_eq!(tp.kickers, vec![Rank::Two]);

        let fl = score("Ah 9h 7h 3h 2h");
        assert_eq!(fl.primary, vec![Rank::Ace, Rank::Nine, Rank::Seven, Rank::Three, Rank::Two]);
        assert!(fl.kickers.is_empty());
    }

    #[test]
    fn kicker_decides_between_equal_pairs() {
        let a = score("Ah Ad Kc 7s 2d");
        let b = score("As Ac Qc 7h 2c");
        assert_eq!(compare(&a, &b), Ordering::Greater);
        let c = score("As Ac Kd 7h 2c");
        assert_eq!(compare(&a, &c), Ordering::Equal);
    }

    #[test]
    fn names_by_rank() {
        assert_eq!(hand_type_name(0), "High Card");
        assert_eq!(hand_type_name(9), "Royal Flush");
        assert_eq!(hand_type_name(10), "Unknown");
        assert_eq!(score("2c 2d 2h 2s 3c").value().category_rank(), 7);
    }
}
