use crate::betting::{Action, ActionError, Street};
use crate::cards::Card;
use crate::evaluator::HandScore;
use std::fmt;

/// What happened during a hand, in order. The table keeps one list per hand.
#[derive(Debug, Clone, PartialEq)]
pub enum HandEvent {
    HandStarted { hand_id: u64, players: usize },
    SatOut { seat: usize, name: String },
    StreetDealt { street: Street, cards: Vec<Card> },
    Acted { seat: usize, name: String, action: Action, chips: u64, all_in: bool },
    /// A decision provider returned a move the betting round refused; the seat folds instead.
    Rejected { seat: usize, name: String, action: Action, error: ActionError },
    Showdown { seat: usize, name: String, score: HandScore },
    Won { seat: usize, name: String, amount: u64, remainder: bool },
}

impl HandEvent {
    pub fn seat(&self) -> Option<usize> {
        match self {
            HandEvent::SatOut { seat, .. }
            | HandEvent::Acted { seat, .. }
            | HandEvent::Rejected { seat, .. }
            | HandEvent::Showdown { seat, .. }
            | HandEvent::Won { seat, .. } => Some(*seat),
            HandEvent::HandStarted { .. } | HandEvent::StreetDealt { .. } => None,
        }
    }
}

impl fmt::Display for HandEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandEvent::HandStarted { hand_id, players } => write!(f, "Hand #{hand_id}: {players} players"),
            HandEvent::SatOut { name, .. } => write!(f, "{name} sits out"),
            HandEvent::StreetDealt { street, cards } => {
                write!(f, "{street}:")?;
                for c in cards {
                    write!(f, " {}", c.symbolic())?;
                }
                Ok(())
            }
            HandEvent::Acted { name, action, chips, all_in, .. } => {
                match action {
                    Action::Call => write!(f, "{name}: Call {chips}")?,
                    other => write!(f, "{name}: {other}")?,
                }
                if *all_in {
                    f.write_str(" (all-in)")?;
                }
                Ok(())
            }
            HandEvent::Rejected { name, action, error, .. } => {
                write!(f, "{name}: {action} refused ({error}), folds")
            }
            HandEvent::Showdown { name, score, .. } => write!(f, "{name} shows {score}"),
            HandEvent::Won { name, amount, remainder, .. } => {
                write!(f, "{name} wins {amount}")?;
                if *remainder {
                    f.write_str(" (odd chip)")?;
                }
                Ok(())
            }
        }
    }
}
