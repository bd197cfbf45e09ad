//! The round controller.
//!
//! A [`Table`] owns the seats, the deck, the pot and one [`DecisionProvider`] per seat.
//! It deals, runs a [`BettingRound`] per street and settles the pot. Progress is made
//! one unit at a time through [`Table::step`], so a frontend can interleave rendering
//! and human input; [`Table::advance`] and [`Table::play_hand`] loop it for callers
//! that only care about the outcome.
//!
//! Chips only move inside `BettingRound::apply` and settlement, so the sum of all
//! stacks plus the pot is constant at every point between calls.

use crate::betting::{
    Action, ActionError, BettingRound, BettingState, BettingStatus, HandCompleteReason, IllegalAction, Street,
};
use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate, EvalError, HandScore};
use crate::hand::{Board, HoleCards};
use crate::history::HandEvent;
use crate::policy::{DecisionProvider, SeatKind, TurnContext};
use crate::seat::Seat;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;

pub type HandId = u64;

pub const DEFAULT_STARTING_STACK: u64 = 1000;
pub const DEFAULT_MIN_RAISE: u64 = 50;
pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 10;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("no seat has chips")]
    NoActiveSeats,
    #[error("need at least two seats with chips, have {0}")]
    NotEnoughSeats(usize),
    #[error("at most ten seats fit at a table, have {0}")]
    TooManySeats(usize),
    #[error("a hand is already in progress")]
    HandInProgress,
    #[error("no hand in progress")]
    NoHandInProgress,
    #[error("unknown seat {0}")]
    UnknownSeat(usize),
    #[error("waiting on a decision from seat {0}")]
    DecisionPending(usize),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dealing,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Settled,
}

impl Phase {
    fn betting(street: Street) -> Phase {
        match street {
            Street::Preflop => Phase::Preflop,
            Street::Flop => Phase::Flop,
            Street::Turn => Phase::Turn,
            Street::River => Phase::River,
        }
    }

    pub fn in_hand(self) -> bool {
        !matches!(self, Phase::Idle | Phase::Settled)
    }
}

/// Who takes the odd chips when a split pot does not divide evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemainderRule {
    /// A tied winner drawn from the table's RNG.
    #[default]
    Random,
    /// The first tied winner at or after this seat, in seat order.
    ClosestTo(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub min_raise: u64,
    pub first_to_act: usize,
    pub remainder_rule: RemainderRule,
    /// Seeds the deck shuffles and remainder draws. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { min_raise: DEFAULT_MIN_RAISE, first_to_act: 0, remainder_rule: RemainderRule::Random, seed: None }
    }
}

impl TableConfig {
    pub fn with_min_raise(mut self, min_raise: u64) -> Self {
        self.min_raise = min_raise;
        self
    }

    pub fn with_first_to_act(mut self, seat: usize) -> Self {
        self.first_to_act = seat;
        self
    }

    pub fn with_remainder_rule(mut self, rule: RemainderRule) -> Self {
        self.remainder_rule = rule;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A roster entry: who sits down, with how many chips, and who decides for them.
pub struct SeatSpec {
    pub name: String,
    pub stack: u64,
    pub provider: Box<dyn DecisionProvider>,
}

impl SeatSpec {
    pub fn new(name: impl Into<String>, stack: u64, provider: impl DecisionProvider + 'static) -> Self {
        Self { name: name.into(), stack, provider: Box::new(provider) }
    }
}

impl fmt::Debug for SeatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeatSpec")
            .field("name", &self.name)
            .field("stack", &self.stack)
            .field("kind", &self.provider.kind())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    pub seat: usize,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub hand_id: HandId,
    pub reason: HandCompleteReason,
    pub pot: u64,
    /// Tied best hands, in seat order.
    pub winners: Vec<usize>,
    pub payouts: Vec<Payout>,
    pub share: u64,
    pub remainder: u64,
    pub remainder_seat: Option<usize>,
    /// Every hand shown down; empty when the hand ended on folds.
    pub showdown: Vec<(usize, HandScore)>,
}

impl Settlement {
    pub fn total_paid(&self) -> u64 {
        self.payouts.iter().map(|p| p.amount).sum()
    }
}

/// One unit of progress from [`Table::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Acted { seat: usize, action: Action },
    Dealt(Street),
    Awaiting(usize),
    Settled(Settlement),
}

/// Snapshot for rendering.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub hand_id: HandId,
    pub phase: Phase,
    pub pot: u64,
    pub board: Board,
    pub seats: Vec<Seat>,
    pub betting: Option<BettingState>,
}

pub struct Table {
    config: TableConfig,
    seats: Vec<Seat>,
    providers: Vec<Box<dyn DecisionProvider>>,
    rng: ChaCha8Rng,
    deck: Deck,
    board: Board,
    pot: u64,
    phase: Phase,
    round: Option<BettingRound>,
    hand_number: HandId,
    events: Vec<HandEvent>,
    last_settlement: Option<Settlement>,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("hand", &self.hand_number)
            .field("phase", &self.phase)
            .field("pot", &self.pot)
            .field("board", &self.board)
            .field("seats", &self.seats)
            .finish()
    }
}

impl Table {
    pub fn new(config: TableConfig, roster: Vec<SeatSpec>) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap_or_else(|| rand::rng().random()));
        let (seats, providers): (Vec<Seat>, Vec<Box<dyn DecisionProvider>>) = roster
            .into_iter()
            .enumerate()
            .map(|(i, spec)| (Seat::new(i, spec.name, spec.stack), spec.provider))
            .unzip();
        Self {
            config,
            seats,
            providers,
            rng,
            deck: Deck::standard(),
            board: Board::default(),
            pot: 0,
            phase: Phase::Idle,
            round: None,
            hand_number: 0,
            events: Vec::new(),
            last_settlement: None,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat_kind(&self, seat: usize) -> Option<SeatKind> {
        self.providers.get(seat).map(|p| p.kind())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn betting(&self) -> Option<BettingState> {
        self.round.as_ref().map(BettingRound::state)
    }

    /// Seat whose move the current street is waiting on.
    pub fn to_act(&self) -> Option<usize> {
        self.round.as_ref().and_then(BettingRound::to_act)
    }

    /// Events of the current (or last) hand, oldest first.
    pub fn events(&self) -> &[HandEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<HandEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hand_number(&self) -> HandId {
        self.hand_number
    }

    pub fn last_settlement(&self) -> Option<&Settlement> {
        self.last_settlement.as_ref()
    }

    /// Fewer than two seats still have chips.
    pub fn is_game_over(&self) -> bool {
        self.seats.iter().filter(|s| s.stack() > 0).count() < MIN_SEATS
    }

    /// Seats by stack, largest first; equal stacks keep seat order.
    pub fn standings(&self) -> Vec<&Seat> {
        let mut out: Vec<&Seat> = self.seats.iter().collect();
        out.sort_by(|a, b| b.stack().cmp(&a.stack()));
        out
    }

    /// Total chips in play.
    pub fn chips_in_play(&self) -> u64 {
        self.seats.iter().map(Seat::stack).sum::<u64>() + self.pot
    }

    pub fn current_state(&self) -> RoundState {
        RoundState {
            hand_id: self.hand_number,
            phase: self.phase,
            pot: self.pot,
            board: self.board.clone(),
            seats: self.seats.clone(),
            betting: self.betting(),
        }
    }

    /// Shuffle a fresh deck from the table RNG and deal a new hand.
    pub fn start_hand(&mut self) -> Result<HandId, TableError> {
        if self.phase.in_hand() {
            return Err(TableError::HandInProgress);
        }
        let deck = Deck::shuffled_with(&mut self.rng);
        self.start_hand_with_deck(deck)
    }

    /// Deal a new hand from a caller-supplied deck, for scripted hands.
    pub fn start_hand_with_deck(&mut self, mut deck: Deck) -> Result<HandId, TableError> {
        if self.phase.in_hand() {
            return Err(TableError::HandInProgress);
        }
        if self.seats.len() > MAX_SEATS {
            return Err(TableError::TooManySeats(self.seats.len()));
        }
        let eligible = self.seats.iter().filter(|s| s.stack() > 0).count();
        if eligible == 0 {
            return Err(TableError::NoActiveSeats);
        }
        if eligible < MIN_SEATS {
            return Err(TableError::NotEnoughSeats(eligible));
        }

        // deal into locals; the table is untouched until every draw succeeds
        let dealt: Vec<usize> = self.seats.iter().filter(|s| s.stack() > 0).map(Seat::index).collect();
        let firsts = deck.draw_n(dealt.len())?;
        let seconds = deck.draw_n(dealt.len())?;
        let holes = firsts
            .into_iter()
            .zip(seconds)
            .map(|(a, b)| HoleCards::try_new(a, b))
            .collect::<Result<Vec<_>, _>>()
            .map_err(EvalError::from)?;

        self.phase = Phase::Dealing;
        self.hand_number += 1;
        self.deck = deck;
        self.board.clear();
        self.pot = 0;
        self.round = None;
        self.events.clear();
        self.events.push(HandEvent::HandStarted { hand_id: self.hand_number, players: eligible });
        log::info!("hand #{} starting with {eligible} players", self.hand_number);

        for seat in &mut self.seats {
            seat.reset_for_hand();
            if seat.is_sitting_out() {
                self.events.push(HandEvent::SatOut { seat: seat.index(), name: seat.name().to_string() });
            }
        }
        for (i, hole) in dealt.into_iter().zip(holes) {
            self.seats[i].hole = Some(hole);
        }

        self.open_street(Street::Preflop);
        Ok(self.hand_number)
    }

    /// Make exactly one unit of progress: one provider decision, one street dealt, or
    /// settlement. A provider with no decision yields [`Step::Awaiting`].
    pub fn step(&mut self) -> Result<Step, TableError> {
        if !self.phase.in_hand() {
            return Err(TableError::NoHandInProgress);
        }
        let (street, status) = match &self.round {
            Some(round) => (round.street(), round.status()),
            None => return self.settle().map(Step::Settled),
        };
        match status {
            BettingStatus::AwaitingAction(seat) => self.ask_provider(seat),
            BettingStatus::HandComplete(_) => self.settle().map(Step::Settled),
            BettingStatus::StreetComplete => match street.next() {
                Some(next) => {
                    self.deal_street(next)?;
                    Ok(Step::Dealt(next))
                }
                None => {
                    self.phase = Phase::Showdown;
                    self.settle().map(Step::Settled)
                }
            },
        }
    }

    /// Step until the hand settles or a seat has to be waited on.
    pub fn advance(&mut self) -> Result<Step, TableError> {
        loop {
            match self.step()? {
                step @ (Step::Settled(_) | Step::Awaiting(_)) => return Ok(step),
                Step::Acted { .. } | Step::Dealt(_) => {}
            }
        }
    }

    /// Start a hand and run it to the end. If a seat yields, the hand stays suspended
    /// and `DecisionPending` is returned.
    pub fn play_hand(&mut self) -> Result<Settlement, TableError> {
        self.start_hand()?;
        match self.advance()? {
            Step::Settled(s) => Ok(s),
            Step::Awaiting(seat) => Err(TableError::DecisionPending(seat)),
            Step::Acted { .. } | Step::Dealt(_) => Err(TableError::NoHandInProgress),
        }
    }

    /// Apply a move for `seat`, typically from a human frontend. A refused move changes
    /// nothing.
    pub fn submit_action(&mut self, seat: usize, action: Action) -> Result<BettingState, ActionError> {
        let round = self.round.as_mut().ok_or(IllegalAction::BettingClosed)?;
        let effect = round.validate(&self.seats, seat, action)?;
        round.apply(&mut self.seats, &mut self.pot, effect);
        let state = round.state();
        self.record_action(seat, action, effect.chips());
        Ok(state)
    }

    /// Best hand for `seat` with the board as it stands.
    pub fn evaluate(&self, seat: usize) -> Result<HandScore, TableError> {
        let s = self.seats.get(seat).ok_or(TableError::UnknownSeat(seat))?;
        let hole = s.hole().ok_or(TableError::NoHandInProgress)?;
        Ok(evaluate(&hole, &self.board)?)
    }

    pub fn turn_context(&self, seat: usize) -> Result<TurnContext, TableError> {
        let s = self.seats.get(seat).ok_or(TableError::UnknownSeat(seat))?;
        let round = self.round.as_ref().ok_or(TableError::NoHandInProgress)?;
        Ok(TurnContext {
            seat,
            street: round.street(),
            table_bet: round.table_bet(),
            contribution: s.street_contribution(),
            to_call: round.to_call(s),
            min_raise_to: round.min_raise_to(),
            stack: s.stack(),
            pot: self.pot,
            hole: s.hole(),
            board: self.board.clone(),
            hand_score: self.evaluate(seat).ok(),
        })
    }

    fn ask_provider(&mut self, seat: usize) -> Result<Step, TableError> {
        let ctx = self.turn_context(seat)?;
        let provider = self.providers.get_mut(seat).ok_or(TableError::UnknownSeat(seat))?;
        let Some(action) = provider.decide(&ctx) else {
            return Ok(Step::Awaiting(seat));
        };
        match self.submit_action(seat, action) {
            Ok(_) => Ok(Step::Acted { seat, action }),
            Err(error) => {
                log::warn!("seat {seat} chose illegal {action}: {error}; folding");
                self.events.push(HandEvent::Rejected {
                    seat,
                    name: self.seats[seat].name().to_string(),
                    action,
                    error,
                });
                self.submit_action(seat, Action::Fold)?;
                Ok(Step::Acted { seat, action: Action::Fold })
            }
        }
    }

    fn record_action(&mut self, seat: usize, action: Action, chips: u64) {
        let s = &self.seats[seat];
        self.events.push(HandEvent::Acted {
            seat,
            name: s.name().to_string(),
            action,
            chips,
            all_in: chips > 0 && s.stack() == 0,
        });
    }

    fn open_street(&mut self, street: Street) {
        for seat in &mut self.seats {
            seat.reset_for_street();
        }
        self.phase = Phase::betting(street);
        self.round = Some(BettingRound::open(street, &self.seats, self.config.first_to_act, self.config.min_raise));
    }

    fn deal_street(&mut self, street: Street) -> Result<(), TableError> {
        let cards = self.deck.draw_n(street.cards_dealt())?;
        self.board.extend(cards.iter().copied());
        log::info!("{street}: {}", self.board);
        self.events.push(HandEvent::StreetDealt { street, cards });
        self.open_street(street);
        Ok(())
    }

    fn settle(&mut self) -> Result<Settlement, TableError> {
        let live: Vec<usize> = self.seats.iter().filter(|s| s.is_live()).map(Seat::index).collect();
        let pot = self.pot;

        let (reason, winners, showdown) = if live.len() == 1 {
            (HandCompleteReason::AllButOneFolded, live, Vec::new())
        } else {
            self.phase = Phase::Showdown;
            let mut showdown = Vec::with_capacity(live.len());
            for &i in &live {
                let score = self.evaluate(i)?;
                self.events.push(HandEvent::Showdown { seat: i, name: self.seats[i].name().to_string(), score: score.clone() });
                showdown.push((i, score));
            }
            let best = showdown.iter().map(|(_, s)| s).max().cloned();
            let winners = showdown.iter().filter(|(_, s)| Some(s) == best.as_ref()).map(|(i, _)| *i).collect();
            (HandCompleteReason::ShowdownReached, winners, showdown)
        };
        if winners.is_empty() {
            return Err(TableError::NoActiveSeats);
        }

        let n = winners.len() as u64;
        let share = pot / n;
        let remainder = pot % n;
        let remainder_seat = if remainder > 0 { self.pick_remainder_seat(&winners) } else { None };

        let mut payouts = Vec::with_capacity(winners.len());
        for &w in &winners {
            let odd = if remainder_seat == Some(w) { remainder } else { 0 };
            let amount = share + odd;
            self.seats[w].stack += amount;
            payouts.push(Payout { seat: w, amount });
            self.events.push(HandEvent::Won {
                seat: w,
                name: self.seats[w].name().to_string(),
                amount,
                remainder: odd > 0,
            });
            log::info!("hand #{}: {} wins {amount}", self.hand_number, self.seats[w].name());
        }
        self.pot = 0;
        self.round = None;
        self.phase = Phase::Settled;

        let settlement = Settlement {
            hand_id: self.hand_number,
            reason,
            pot,
            winners,
            payouts,
            share,
            remainder,
            remainder_seat,
            showdown,
        };
        self.last_settlement = Some(settlement.clone());
        Ok(settlement)
    }

    fn pick_remainder_seat(&mut self, winners: &[usize]) -> Option<usize> {
        match self.config.remainder_rule {
            RemainderRule::Random => winners.choose(&mut self.rng).copied(),
            RemainderRule::ClosestTo(reference) => {
                winners.iter().copied().find(|&w| w >= reference).or_else(|| winners.first().copied())
            }
        }
    }
}
