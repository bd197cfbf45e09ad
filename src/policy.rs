//! Decision providers: who picks a seat's move.
//!
//! The table asks the acting seat's [`DecisionProvider`] for a move. AI providers answer
//! straight away; [`HumanSeat`] answers `None`, which makes the table yield so the move
//! can arrive later through `Table::submit_action`.

use crate::betting::{Action, ActionKind, Street};
use crate::evaluator::HandScore;
use crate::hand::{Board, HoleCards};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatKind {
    Human,
    Ai,
}

/// Everything a provider may look at when it is asked to act.
#[derive(Debug, Clone)]
pub struct TurnContext {
    pub seat: usize,
    pub street: Street,
    pub table_bet: u64,
    /// This seat's chips in on the current street.
    pub contribution: u64,
    pub to_call: u64,
    /// Smallest legal `Raise` target.
    pub min_raise_to: u64,
    pub stack: u64,
    pub pot: u64,
    pub hole: Option<HoleCards>,
    pub board: Board,
    /// Best hand so far with the cards showing.
    pub hand_score: Option<HandScore>,
}

impl TurnContext {
    /// Highest `Raise` target the stack can pay for.
    pub fn max_raise_to(&self) -> u64 {
        self.stack + self.contribution
    }

    pub fn can_raise(&self) -> bool {
        self.min_raise_to <= self.max_raise_to()
    }
}

/// Move kinds the betting round will accept from this seat.
pub fn legal_actions(ctx: &TurnContext) -> Vec<ActionKind> {
    let mut out = vec![ActionKind::Fold];
    if ctx.to_call == 0 {
        out.push(ActionKind::Check);
    } else {
        out.push(ActionKind::Call);
    }
    if ctx.can_raise() {
        out.push(ActionKind::Raise);
    }
    out
}

pub trait DecisionProvider {
    /// `None` means no decision yet; the table yields and waits.
    fn decide(&mut self, ctx: &TurnContext) -> Option<Action>;

    fn kind(&self) -> SeatKind {
        SeatKind::Ai
    }
}

/// Moves come from outside via `Table::submit_action`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HumanSeat;

impl DecisionProvider for HumanSeat {
    fn decide(&mut self, _ctx: &TurnContext) -> Option<Action> {
        None
    }

    fn kind(&self) -> SeatKind {
        SeatKind::Human
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(|| rand::rng().random()))
}

/// Picks uniformly among legal moves. Raises land between the minimum target and
/// twice that, capped at the stack.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: seeded_rng(seed) }
    }
}

impl DecisionProvider for RandomPolicy {
    fn decide(&mut self, ctx: &TurnContext) -> Option<Action> {
        let legal = legal_actions(ctx);
        let pick = legal[self.rng.random_range(0..legal.len())];
        Some(match pick {
            ActionKind::Fold => Action::Fold,
            ActionKind::Check => Action::Check,
            ActionKind::Call => Action::Call,
            ActionKind::Raise => {
                let lo = ctx.min_raise_to;
                let hi = lo.saturating_mul(2).min(ctx.max_raise_to());
                Action::Raise(self.rng.random_range(lo..=hi))
            }
        })
    }
}

/// How much noise the heuristic adds to its own hand reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    fn noise(self) -> f64 {
        match self {
            Difficulty::Easy => 0.25,
            Difficulty::Medium => 0.12,
            Difficulty::Hard => 0.04,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Hard => Difficulty::Hard,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Difficulty::Hard => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Easy => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weighs fold / check / call / raise by a rough hand strength in [0, 1].
#[derive(Debug, Clone)]
pub struct HeuristicPolicy {
    difficulty: Difficulty,
    rng: ChaCha8Rng,
}

impl HeuristicPolicy {
    pub fn new(difficulty: Difficulty, seed: Option<u64>) -> Self {
        Self { difficulty, rng: seeded_rng(seed) }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl DecisionProvider for HeuristicPolicy {
    fn decide(&mut self, ctx: &TurnContext) -> Option<Action> {
        let noise = self.rng.random_range(-1.0..=1.0) * self.difficulty.noise();
        let s = (estimate_strength(ctx) + noise).clamp(0.0, 1.0);

        let weighted: Vec<(ActionKind, f64)> = legal_actions(ctx)
            .into_iter()
            .map(|k| (k, action_weight(k, s)))
            .filter(|&(_, w)| w > 0.0)
            .collect();
        let total: f64 = weighted.iter().map(|(_, w)| w).sum();
        let mut roll = self.rng.random::<f64>() * total;
        let mut pick = weighted.last().map_or(ActionKind::Fold, |&(k, _)| k);
        for &(k, w) in &weighted {
            if roll < w {
                pick = k;
                break;
            }
            roll -= w;
        }

        Some(match pick {
            ActionKind::Fold => Action::Fold,
            ActionKind::Check => Action::Check,
            ActionKind::Call => Action::Call,
            ActionKind::Raise => Action::Raise(raise_target(ctx, s)),
        })
    }
}

fn action_weight(kind: ActionKind, s: f64) -> f64 {
    match kind {
        ActionKind::Fold => (0.4 - 0.8 * s).max(0.0),
        ActionKind::Call => 0.3 + 0.3 * s,
        ActionKind::Raise => 0.3 + 0.5 * s,
        ActionKind::Check => (0.2 - 0.1 * s).max(0.0),
    }
}

fn raise_target(ctx: &TurnContext, s: f64) -> u64 {
    let base = (ctx.min_raise_to as f64).max(ctx.table_bet as f64 * 1.5);
    let sized = (base * (0.8 + 0.5 * s)).round() as u64;
    sized.clamp(ctx.min_raise_to, ctx.max_raise_to().max(ctx.min_raise_to))
}

/// Preflop reads the two hole cards; later streets read the made hand.
pub fn estimate_strength(ctx: &TurnContext) -> f64 {
    match (&ctx.hand_score, ctx.hole) {
        (Some(score), _) if !ctx.board.is_empty() => made_hand_strength(score),
        (_, Some(hole)) => preflop_strength(&hole),
        _ => 0.0,
    }
}

pub fn preflop_strength(hole: &HoleCards) -> f64 {
    let a = hole.first().rank().value() as f64;
    let b = hole.second().rank().value() as f64;
    let (high, low) = if a >= b { (a, b) } else { (b, a) };
    if hole.is_pair() {
        return (0.8 + high / 140.0).min(1.0);
    }
    let mut s = high / 140.0 + low / 280.0;
    if hole.is_suited() {
        s += 0.12;
    }
    match hole.gap() {
        1 => s += 0.1,
        2 => s += 0.05,
        _ => {}
    }
    s.min(1.0)
}

fn made_hand_strength(score: &HandScore) -> f64 {
    let category = score.category.ordinal() as f64 / 9.0;
    let high = score.top_rank().map_or(0.0, |r| r.value() as f64 / 14.0);
    (category * 0.85 + high * 0.15).clamp(0.0, 1.0)
}
