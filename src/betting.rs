//! One street of betting.
//!
//! [`BettingRound`] owns the transient per-street state (table bet, who still has to
//! act, the cursor) while chips stay on the [`Seat`]s and in the table's pot. Every
//! move goes through [`BettingRound::validate`], which computes the full effect
//! without touching anything, and then [`BettingRound::apply`], which moves chips
//! and advances the cursor in one step.

use crate::seat::Seat;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Community cards revealed when this street opens.
    pub const fn cards_dealt(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Street::Preflop => "Preflop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A seat's move. `Raise` carries the new table-bet total, not the increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(u64),
}

impl Action {
    pub fn kind(self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call => ActionKind::Call,
            Action::Raise(_) => ActionKind::Raise,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => f.write_str("Fold"),
            Action::Check => f.write_str("Check"),
            Action::Call => f.write_str("Call"),
            Action::Raise(to) => write!(f, "Raise to {to}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IllegalAction {
    #[error("not seat {got}'s turn (waiting on seat {expected:?})")]
    NotYourTurn { expected: Option<usize>, got: usize },
    #[error("seat {0} has folded or is all-in")]
    SeatCannotAct(usize),
    #[error("cannot check facing {to_call}")]
    CannotCheck { to_call: u64 },
    #[error("nothing to call")]
    NothingToCall,
    #[error("raise too small: min {min}, got {got}")]
    RaiseTooSmall { min: u64, got: u64 },
    #[error("no betting open")]
    BettingClosed,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("illegal action: {0}")]
    Illegal(#[from] IllegalAction),
    #[error("insufficient chips: need {needed}, have {stack}")]
    InsufficientChips { needed: u64, stack: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandCompleteReason {
    AllButOneFolded,
    /// Reported by table settlement only; a betting round closes the river
    /// with [`BettingStatus::StreetComplete`] like any other street.
    ShowdownReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BettingStatus {
    AwaitingAction(usize),
    StreetComplete,
    HandComplete(HandCompleteReason),
}

/// Read-only snapshot of a street, for rendering and for the result of a submitted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BettingState {
    pub street: Street,
    pub table_bet: u64,
    pub min_raise_to: u64,
    pub last_raiser: Option<usize>,
    pub to_act: Vec<usize>,
    pub status: BettingStatus,
}

/// What a validated move will do. Only [`BettingRound::validate`] builds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEffect {
    seat: usize,
    action: Action,
    chips: u64,
}

impl ActionEffect {
    pub fn seat(&self) -> usize {
        self.seat
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Chips moving from the seat's stack into the pot.
    pub fn chips(&self) -> u64 {
        self.chips
    }
}

#[derive(Debug, Clone)]
pub struct BettingRound {
    street: Street,
    table_bet: u64,
    min_raise: u64,
    last_raiser: Option<usize>,
    pending: Vec<bool>,
    status: BettingStatus,
}

impl BettingRound {
    /// Open a street. Street contributions on `seats` must already be reset.
    ///
    /// Action starts at `first_to_act` (or the next seat after it that can act) and runs
    /// in seat order. With fewer than two seats able to act the street is complete at
    /// once, and with fewer than two live seats the hand is.
    pub fn open(street: Street, seats: &[Seat], first_to_act: usize, min_raise: u64) -> Self {
        let pending: Vec<bool> = seats.iter().map(Seat::can_act).collect();
        let mut round = Self {
            street,
            table_bet: 0,
            min_raise: min_raise.max(1),
            last_raiser: None,
            pending,
            status: BettingStatus::StreetComplete,
        };
        let live = seats.iter().filter(|s| s.is_live()).count();
        let actors = round.pending.iter().filter(|&&p| p).count();
        round.status = if live < 2 {
            BettingStatus::HandComplete(HandCompleteReason::AllButOneFolded)
        } else if actors < 2 {
            BettingStatus::StreetComplete
        } else {
            round.next_pending(first_to_act)
        };
        round
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn status(&self) -> BettingStatus {
        self.status
    }

    pub fn table_bet(&self) -> u64 {
        self.table_bet
    }

    /// Seat whose move is awaited, if any.
    pub fn to_act(&self) -> Option<usize> {
        match self.status {
            BettingStatus::AwaitingAction(seat) => Some(seat),
            _ => None,
        }
    }

    /// Smallest legal `Raise` target: the configured minimum on an unopened street,
    /// otherwise double the table bet.
    pub fn min_raise_to(&self) -> u64 {
        if self.table_bet == 0 {
            self.min_raise
        } else {
            self.table_bet.saturating_mul(2)
        }
    }

    pub fn to_call(&self, seat: &Seat) -> u64 {
        self.table_bet.saturating_sub(seat.street_contribution())
    }

    pub fn state(&self) -> BettingState {
        BettingState {
            street: self.street,
            table_bet: self.table_bet,
            min_raise_to: self.min_raise_to(),
            last_raiser: self.last_raiser,
            to_act: self.pending.iter().enumerate().filter(|(_, &p)| p).map(|(i, _)| i).collect(),
            status: self.status,
        }
    }

    /// Check a move against the current state without changing anything.
    pub fn validate(&self, seats: &[Seat], seat: usize, action: Action) -> Result<ActionEffect, ActionError> {
        let expected = match self.status {
            BettingStatus::AwaitingAction(s) => s,
            _ => return Err(IllegalAction::BettingClosed.into()),
        };
        if seat != expected {
            return Err(IllegalAction::NotYourTurn { expected: Some(expected), got: seat }.into());
        }
        let s = seats.get(seat).ok_or(IllegalAction::NotYourTurn { expected: Some(expected), got: seat })?;
        if !s.can_act() {
            return Err(IllegalAction::SeatCannotAct(seat).into());
        }

        let to_call = self.to_call(s);
        let chips = match action {
            Action::Fold => 0,
            Action::Check => {
                if to_call > 0 {
                    return Err(IllegalAction::CannotCheck { to_call }.into());
                }
                0
            }
            Action::Call => {
                if to_call == 0 {
                    return Err(IllegalAction::NothingToCall.into());
                }
                // short stacks call all-in
                to_call.min(s.stack())
            }
            Action::Raise(to) => {
                let min = self.min_raise_to();
                if to < min {
                    return Err(IllegalAction::RaiseTooSmall { min, got: to }.into());
                }
                let needed = to - s.street_contribution();
                if needed > s.stack() {
                    return Err(ActionError::InsufficientChips { needed, stack: s.stack() });
                }
                needed
            }
        };
        Ok(ActionEffect { seat, action, chips })
    }

    /// Carry out a move produced by [`validate`](Self::validate) against the same state.
    pub(crate) fn apply(&mut self, seats: &mut [Seat], pot: &mut u64, effect: ActionEffect) -> BettingStatus {
        let ActionEffect { seat, action, chips } = effect;
        let Some(s) = seats.get_mut(seat) else {
            return self.status;
        };
        s.commit(chips, pot);
        s.last_action = Some(action);
        s.folded |= action == Action::Fold;
        self.pending[seat] = false;

        if let Action::Raise(to) = action {
            self.table_bet = to;
            self.last_raiser = Some(seat);
            // a raise re-opens action for everyone else still holding chips
            for (i, other) in seats.iter().enumerate() {
                if i != seat {
                    self.pending[i] = other.can_act();
                }
            }
        }
        log::debug!("{} seat {seat}: {action} ({chips} chips, pot {pot})", self.street);

        self.status = if seats.iter().filter(|s| s.is_live()).count() < 2 {
            BettingStatus::HandComplete(HandCompleteReason::AllButOneFolded)
        } else {
            self.next_pending(seat + 1)
        };
        self.status
    }

    /// Validate then apply. Errors leave every piece of state untouched.
    pub fn submit(
        &mut self,
        seats: &mut [Seat],
        pot: &mut u64,
        seat: usize,
        action: Action,
    ) -> Result<BettingStatus, ActionError> {
        let effect = self.validate(seats, seat, action)?;
        Ok(self.apply(seats, pot, effect))
    }

    fn next_pending(&self, from: usize) -> BettingStatus {
        let n = self.pending.len();
        (0..n)
            .map(|k| (from + k) % n)
            .find(|&i| self.pending[i])
            .map_or(BettingStatus::StreetComplete, BettingStatus::AwaitingAction)
    }
}
