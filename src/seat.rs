use crate::betting::Action;
use crate::hand::HoleCards;

/// One place at the table. Only `stack` carries over between hands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub(crate) index: usize,
    pub(crate) name: String,
    pub(crate) stack: u64,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) folded: bool,
    pub(crate) street_contribution: u64,
    pub(crate) hand_contribution: u64,
    pub(crate) sitting_out: bool,
    pub(crate) last_action: Option<Action>,
}

impl Seat {
    pub fn new(index: usize, name: impl Into<String>, stack: u64) -> Self {
        Self {
            index,
            name: name.into(),
            stack,
            hole: None,
            folded: false,
            street_contribution: 0,
            hand_contribution: 0,
            sitting_out: false,
            last_action: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stack(&self) -> u64 {
        self.stack
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    pub fn is_folded(&self) -> bool {
        self.folded
    }

    /// Chips put in on the current street.
    pub fn street_contribution(&self) -> u64 {
        self.street_contribution
    }

    /// Chips put in over the whole hand.
    pub fn hand_contribution(&self) -> u64 {
        self.hand_contribution
    }

    pub fn is_sitting_out(&self) -> bool {
        self.sitting_out
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    /// Dealt in and not folded.
    pub fn is_live(&self) -> bool {
        !self.folded && !self.sitting_out
    }

    /// Live with no chips behind.
    pub fn is_all_in(&self) -> bool {
        self.is_live() && self.stack == 0
    }

    /// Live and still holding chips, so it can be asked to act.
    pub fn can_act(&self) -> bool {
        self.is_live() && self.stack > 0
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.hole = None;
        self.folded = false;
        self.street_contribution = 0;
        self.hand_contribution = 0;
        self.last_action = None;
        self.sitting_out = self.stack == 0;
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.street_contribution = 0;
        self.last_action = None;
    }

    /// Move `chips` from the stack into the pot.
    pub(crate) fn commit(&mut self, chips: u64, pot: &mut u64) {
        let chips = chips.min(self.stack);
        self.stack -= chips;
        self.street_contribution += chips;
        self.hand_contribution += chips;
        *pot += chips;
    }
}
