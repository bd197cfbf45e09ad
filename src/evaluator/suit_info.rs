use crate::cards::{Card, Suit};

/// Whether a hand is a flush. Only five same-suited cards count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    pub is_flush: bool,
    pub flush_suit: Option<Suit>,
}

impl SuitInfo {
    pub fn detect(cards: &[Card]) -> Self {
        match cards.first() {
            Some(first) if cards.len() == 5 && cards.iter().all(|c| c.suit() == first.suit()) => {
                SuitInfo { is_flush: true, flush_suit: Some(first.suit()) }
            }
            _ => SuitInfo { is_flush: false, flush_suit: None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn five_spades_is_a_flush() {
        let info = SuitInfo::detect(&parse_cards("As Ks Qs Js 9s").unwrap());
        assert_eq!(info.flush_suit, Some(Suit::Spades));
    }

    #[test]
    fn mixed_or_short_is_not() {
        assert!(!SuitInfo::detect(&parse_cards("As Kh Qs Js 9s").unwrap()).is_flush);
        assert!(!SuitInfo::detect(&parse_cards("2c 3c 4c 7c").unwrap()).is_flush);
        assert!(!SuitInfo::detect(&[]).is_flush);
    }
}
