use super::hand_analysis::HandAnalysis;
use crate::cards::Rank;
use crate::evaluator::{Category, HandScore};

/// One hand category: recognise it and lay out its primary ranks and kickers.
pub trait CategoryDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool;
    fn build(&self, analysis: &HandAnalysis) -> HandScore;
}

fn top(ranks: Vec<Rank>, n: usize) -> Vec<Rank> {
    ranks.into_iter().take(n).collect()
}

fn straight_top(analysis: &HandAnalysis) -> Vec<Rank> {
    analysis.straight_info.top_rank.into_iter().collect()
}

pub struct RoyalFlushDetector;

impl CategoryDetector for RoyalFlushDetector {
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.suit_info.is_flush && a.straight_info.top_rank == Some(Rank::Ace)
    }

    fn build(&self, a: &HandAnalysis) -> HandScore {
        a.build(Category::RoyalFlush, vec![Rank::Ace], Vec::new())
    }
}

pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.suit_info.is_flush && a.straight_info.is_straight
    }

    fn build(&self, a: &HandAnalysis) -> HandScore {
        a.build(Category::StraightFlush, straight_top(a), Vec::new())
    }
}

pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.rank_groups.quad().is_some()
    }

    fn build(&self, a: &HandAnalysis) -> HandScore {
        let primary = a.rank_groups.quad().into_iter().collect();
        a.build(Category::FourOfAKind, primary, top(a.rank_groups.kickers(), 1))
    }
}

pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.rank_groups.has_full_house()
    }

    fn build(&self, a: &HandAnalysis) -> HandScore {
        let primary = a.rank_groups.trips().into_iter().collect();
        a.build(Category::FullHouse, primary, top(a.rank_groups.pairs(), 1))
    }
}

pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.suit_info.is_flush
    }

    fn build(&self, a: &HandAnalysis) -> HandScore {
        let primary = a.sorted_cards.iter().map(|c| c.rank()).collect();
        a.build(Category::Flush, primary, Vec::new())
    }
}

pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.straight_info.is_straight
    }

    fn build(&self, a: &HandAnalysis) -> HandScore {
        a.build(Category::Straight, straight_top(a), Vec::new())
    }
}

pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.rank_groups.trips().is_some()
    }

    fn build(&self, a: &HandAnalysis) -> HandScore {
        let primary = a.rank_groups.trips().into_iter().collect();
        a.build(Category::ThreeOfAKind, primary, top(a.rank_groups.kickers(), 2))
    }
}

pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.rank_groups.pairs().len() >= 2
    }

    fn build(&self, a: &HandAnalysis) -> HandScore {
        a.build(Category::TwoPair, top(a.rank_groups.pairs(), 2), top(a.rank_groups.kickers(), 1))
    }
}

pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.rank_groups.pairs().len() == 1
    }

    fn build(&self, a: &HandAnalysis) -> HandScore {
        a.build(Category::Pair, a.rank_groups.pairs(), top(a.rank_groups.kickers(), 3))
    }
}

pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn detect(&self, _a: &HandAnalysis) -> bool {
        true
    }

    fn build(&self, a: &HandAnalysis) -> HandScore {
        a.build(Category::HighCard, Vec::new(), top(a.rank_groups.kickers(), 5))
    }
}

/// Highest category first; `HighCard` always matches.
pub const DETECTORS: [&dyn CategoryDetector; 10] = [
    &RoyalFlushDetector,
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn analyse(s: &str) -> HandAnalysis {
        HandAnalysis::new(&parse_cards(s).unwrap())
    }

    #[test]
    fn each_fixture_lands_in_its_category() {
        let cases = [
            ("As Ks Qs Js Ts", Category::RoyalFlush),
            ("9h 8h 7h 6h 5h", Category::StraightFlush),
            ("5d 4d 3d 2d Ad", Category::StraightFlush),
            ("Ks Kh Kd Kc 2s", Category::FourOfAKind),
            ("Tc Td Th 2s 2h", Category::FullHouse),
            ("Ad Jd 9d 5d 2d", Category::Flush),
            ("9s 8h 7d 6c 5s", Category::Straight),
            ("Js Jh Jd 9c 7s", Category::ThreeOfAKind),
            ("As Ah Kd Kc Qs", Category::TwoPair),
            ("Js Jh 9d 7c 3s", Category::Pair),
            ("As Kh Jd 9c 7s", Category::HighCard),
        ];
        for (cards, want) in cases {
            assert_eq!(analyse(cards).score().category, want, "{cards}");
        }
    }

    #[test]
    fn straight_flush_outranks_its_parts() {
        let a = analyse("9h 8h 7h 6h 5h");
        assert!(StraightFlushDetector.detect(&a));
        assert!(FlushDetector.detect(&a));
        assert!(StraightDetector.detect(&a));
        assert!(!RoyalFlushDetector.detect(&a));
    }

    #[test]
    fn quads_from_four_cards_have_no_kicker() {
        let s = FourOfAKindDetector.build(&analyse("7s 7h 7d 7c"));
        assert_eq!(s.primary, vec![Rank::Seven]);
        assert!(s.kickers.is_empty());
    }

    #[test]
    fn trips_kickers() {
        let s = ThreeOfAKindDetector.build(&analyse("Qc Qd Qh 9s 2c"));
        assert_eq!(s.primary, vec![Rank::Queen]);
        assert_eq!(s.kickers, vec![Rank::Nine, Rank::Two]);
    }
}
