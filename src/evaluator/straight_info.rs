use crate::cards::Rank;

/// Whether five ranks form a straight, and its top rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub is_straight: bool,
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    const NONE: StraightInfo = StraightInfo { is_straight: false, top_rank: None };

    /// Straights need exactly five distinct ranks. The wheel (A-2-3-4-5) tops out at Five.
    pub fn detect(ranks: &[Rank]) -> Self {
        let mut values: Vec<u8> = ranks.iter().map(|r| r.value()).collect();
        values.sort_unstable_by(|a, b| b.cmp(a));
        values.dedup();
        if values.len() != 5 {
            return Self::NONE;
        }

        if values.windows(2).all(|w| w[0] == w[1] + 1) {
            return StraightInfo { is_straight: true, top_rank: Rank::from_value(values[0]) };
        }
        if values == [14, 5, 4, 3, 2] {
            return StraightInfo { is_straight: true, top_rank: Some(Rank::Five) };
        }
        Self::NONE
    }
}
