use super::detector::DETECTORS;
use super::rank_groups::RankGroups;
use super::straight_info::StraightInfo;
use super::suit_info::SuitInfo;
use crate::cards::{Card, Rank};
use crate::evaluator::{Category, HandScore};

/// Facts about a hand of one to five cards, computed once and shared by every detector.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    /// Rank descending, then suit descending.
    pub sorted_cards: Vec<Card>,
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    pub straight_info: StraightInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[Card]) -> Self {
        let mut sorted_cards = cards.to_vec();
        sorted_cards.sort_by(|a, b| b.rank().cmp(&a.rank()).then(b.suit().cmp(&a.suit())));

        let ranks: Vec<Rank> = sorted_cards.iter().map(|c| c.rank()).collect();
        let rank_groups = RankGroups::from_ranks(&ranks);
        let suit_info = SuitInfo::detect(&sorted_cards);
        let straight_info = StraightInfo::detect(&ranks);

        Self { sorted_cards, rank_groups, suit_info, straight_info }
    }

    /// Run the detectors in priority order and score the first match.
    pub fn score(&self) -> HandScore {
        DETECTORS
            .iter()
            .find(|d| d.detect(self))
            .map(|d| d.build(self))
            .unwrap_or_else(|| self.build(Category::HighCard, Vec::new(), self.rank_groups.kickers()))
    }

    /// Build a score. `best` lists the cards of the primary ranks first, then the kickers.
    pub fn build(&self, category: Category, primary: Vec<Rank>, kickers: Vec<Rank>) -> HandScore {
        let mut best = Vec::with_capacity(self.sorted_cards.len());
        if let Some(top) = self.straight_info.top_rank.filter(|_| category.is_straight_like()) {
            // wheel: ace plays low, so show it last
            best.extend(self.sorted_cards.iter().filter(|c| !(top == Rank::Five && c.rank() == Rank::Ace)));
            best.extend(self.sorted_cards.iter().filter(|c| top == Rank::Five && c.rank() == Rank::Ace));
        } else {
            for r in primary.iter().chain(kickers.iter()) {
                best.extend(self.sorted_cards.iter().filter(|c| c.rank() == *r));
            }
        }
        HandScore::new(category, primary, kickers, best)
    }
}

impl Category {
    const fn is_straight_like(self) -> bool {
        matches!(self, Category::Straight | Category::StraightFlush | Category::RoyalFlush)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Suit};

    fn analyse(s: &str) -> HandAnalysis {
        HandAnalysis::new(&parse_cards(s).unwrap())
    }

    #[test]
    fn royal_flush_analysis() {
        let a = analyse("As Ks Qs Js Ts");
        assert!(a.suit_info.is_flush);
        assert!(a.straight_info.is_straight);
        assert_eq!(a.straight_info.top_rank, Some(Rank::Ace));
        assert_eq!(a.rank_groups.quad(), None);
        assert_eq!(a.rank_groups.pairs(), vec![]);
    }

    #[test]
    fn cards_sorted_descending() {
        let a = analyse("3s Ah 5d Kc 9s");
        let ranks: Vec<Rank> = a.sorted_cards.iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![Rank::Ace, Rank::King, Rank::Nine, Rank::Five, Rank::Three]);
    }

    #[test]
    fn best_cards_follow_primary_then_kickers() {
        let s = analyse("2d Kc Kh 2s 9c").score();
        assert_eq!(s.category, Category::TwoPair);
        let ranks: Vec<Rank> = s.best.iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![Rank::King, Rank::King, Rank::Two, Rank::Two, Rank::Nine]);
    }

    #[test]
    fn wheel_shows_ace_last() {
        let s = analyse("Ac 2d 3h 4s 5c").score();
        assert_eq!(s.category, Category::Straight);
        assert_eq!(s.best.last().map(|c| c.rank()), Some(Rank::Ace));
        assert_eq!(s.best.len(), 5);
    }

    #[test]
    fn short_hands_have_no_flush_or_straight() {
        let a = analyse("5h 4h 3h 2h");
        assert!(!a.suit_info.is_flush);
        assert!(!a.straight_info.is_straight);
        assert_eq!(a.sorted_cards[0].suit(), Suit::Hearts);
    }
}
