use crate::betting::Action;
use crate::history::HandEvent;
use crate::policy::{Difficulty, HeuristicPolicy, HumanSeat};
use crate::table::{SeatSpec, Step, Table, TableConfig, DEFAULT_MIN_RAISE, DEFAULT_STARTING_STACK};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewHand,
    Fold,
    CheckCall,
    RaiseMin,
    AmountOpen,
    AmountDigit(u8),
    AmountBackspace,
    AmountInc,
    AmountDec,
    AmountSubmit,
    AmountCancel,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub started: Instant,
    pub table: Table,
    // Settings the current table was built with
    pub starting_stack: u64,
    pub difficulty: Difficulty,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_opponents: usize,
    pub cfg_starting_stack: u64,
    pub cfg_min_raise: u64,
    pub cfg_difficulty: Difficulty,
    pub cfg_seed: Option<u64>,
    history: Vec<HandEvent>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    amount_entry: Option<String>,
    amount_entry_error: Option<String>,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        let opponents = 4;
        let difficulty = Difficulty::default();
        let table = Self::build_table(opponents, DEFAULT_STARTING_STACK, DEFAULT_MIN_RAISE, difficulty, None);
        Self {
            scene: Scene::Menu,
            started: Instant::now(),
            table,
            starting_stack: DEFAULT_STARTING_STACK,
            difficulty,
            menu_index: 0,
            cfg_opponents: opponents,
            cfg_starting_stack: DEFAULT_STARTING_STACK,
            cfg_min_raise: DEFAULT_MIN_RAISE,
            cfg_difficulty: difficulty,
            cfg_seed: None,
            history: Vec::new(),
            help_open: false,
            history_open: false,
            history_offset: 0,
            amount_entry: None,
            amount_entry_error: None,
            action_error: None,
            action_error_at: None,
        }
    }
}

impl AppState {
    /// The seat the keyboard plays.
    pub const HUMAN_SEAT: usize = 0;
    pub const HISTORY_PAGE_SIZE: usize = 20;
    pub const HISTORY_HANDS: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    /// Seat 0 is the human; every opponent runs the heuristic at `difficulty`.
    pub(crate) fn build_table(
        opponents: usize,
        starting_stack: u64,
        min_raise: u64,
        difficulty: Difficulty,
        seed: Option<u64>,
    ) -> Table {
        let mut roster = Vec::with_capacity(opponents + 1);
        roster.push(SeatSpec::new("You", starting_stack, HumanSeat));
        for i in 1..=opponents {
            let policy = HeuristicPolicy::new(difficulty, seed.map(|s| s.wrapping_add(i as u64)));
            roster.push(SeatSpec::new(format!("AI {i}"), starting_stack, policy));
        }
        let mut config = TableConfig::default().with_min_raise(min_raise);
        if let Some(seed) = seed {
            config = config.with_seed(seed);
        }
        Table::new(config, roster)
    }

    /// The table is waiting on the keyboard.
    pub fn human_to_act(&self) -> bool {
        self.scene == Scene::Table && self.table.to_act() == Some(Self::HUMAN_SEAT)
    }

    /// Between hands with fewer than two funded seats left.
    pub fn game_over(&self) -> bool {
        !self.table.phase().in_hand() && self.table.is_game_over()
    }

    fn submit(&mut self, action: Action) -> bool {
        if !self.human_to_act() {
            return false;
        }
        match self.table.submit_action(Self::HUMAN_SEAT, action) {
            Ok(_) => {
                self.clear_action_error();
                self.collect_events();
                true
            }
            Err(err) => {
                self.set_action_error(err.to_string());
                false
            }
        }
    }

    fn check_or_call(&mut self) -> bool {
        let Ok(ctx) = self.table.turn_context(Self::HUMAN_SEAT) else {
            return false;
        };
        self.submit(if ctx.to_call == 0 { Action::Check } else { Action::Call })
    }

    fn raise_min(&mut self) -> bool {
        let Ok(ctx) = self.table.turn_context(Self::HUMAN_SEAT) else {
            return false;
        };
        self.submit(Action::Raise(ctx.min_raise_to))
    }

    fn collect_events(&mut self) {
        self.history.extend(self.table.drain_events());
        self.trim_history();
    }

    /// Keep only the last `HISTORY_HANDS` hands.
    fn trim_history(&mut self) {
        let starts: Vec<usize> = self
            .history
            .iter()
            .enumerate()
            .filter(|(_, e)| matches!(e, HandEvent::HandStarted { .. }))
            .map(|(i, _)| i)
            .collect();
        if starts.len() > Self::HISTORY_HANDS {
            let cut = starts[starts.len() - Self::HISTORY_HANDS];
            self.history.drain(..cut);
            let max_offset = self.history.len().saturating_sub(Self::HISTORY_PAGE_SIZE);
            self.history_offset = self.history_offset.min(max_offset);
        }
    }

    /// Up to `n` events ending `offset` entries before the newest.
    pub fn history_recent_offset(&self, n: usize, offset: usize) -> &[HandEvent] {
        let end = self.history.len().saturating_sub(offset);
        &self.history[end.saturating_sub(n)..end]
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn amount_entry_active(&self) -> bool {
        self.amount_entry.is_some()
    }

    pub fn amount_entry_text(&self) -> Option<&str> {
        self.amount_entry.as_deref()
    }

    pub fn amount_entry_error(&self) -> Option<&str> {
        self.amount_entry_error.as_deref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn set_action_error(&mut self, msg: String) {
        self.action_error = Some(msg);
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    pub(crate) fn clear_history(&mut self) {
        self.history.clear();
        self.history_offset = 0;
    }

    fn open_amount_entry(&mut self) -> bool {
        if !self.human_to_act() {
            return false;
        }
        let Ok(ctx) = self.table.turn_context(Self::HUMAN_SEAT) else {
            return false;
        };
        self.amount_entry = Some(ctx.min_raise_to.to_string());
        self.amount_entry_error = None;
        true
    }

    fn amount_entry_backspace(&mut self) {
        if let Some(buf) = self.amount_entry.as_mut() {
            buf.pop();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_push_digit(&mut self, digit: u8) {
        if let Some(buf) = self.amount_entry.as_mut() {
            if buf.len() >= 12 {
                return;
            }
            buf.push(char::from(b'0' + digit));
        }
        self.amount_entry_error = None;
    }

    /// Step the typed amount by one minimum raise.
    fn amount_entry_adjust(&mut self, up: bool) {
        let step = self.table.config().min_raise.max(1);
        if let Some(buf) = self.amount_entry.as_mut() {
            let cur = buf.parse::<u64>().unwrap_or(0);
            let next = if up { cur.saturating_add(step) } else { cur.saturating_sub(step) };
            *buf = next.to_string();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_submit(&mut self) -> bool {
        let Some(buf) = self.amount_entry.as_ref() else {
            return false;
        };
        let amount = match buf.parse::<u64>() {
            Ok(v) => v,
            Err(_) => {
                self.amount_entry_error = Some("Invalid amount".to_string());
                return false;
            }
        };
        let Ok(ctx) = self.table.turn_context(Self::HUMAN_SEAT) else {
            self.amount_entry_error = Some("Action not allowed".to_string());
            return false;
        };
        if amount < ctx.min_raise_to {
            self.amount_entry_error = Some(format!("Min raise is {}", ctx.min_raise_to));
            return false;
        }
        if amount > ctx.max_raise_to() {
            self.amount_entry_error = Some(format!("Max raise is {}", ctx.max_raise_to()));
            return false;
        }
        if self.submit(Action::Raise(amount)) {
            self.amount_entry = None;
            self.amount_entry_error = None;
            return true;
        }
        self.amount_entry_error = Some("Action not allowed".to_string());
        false
    }

    fn amount_entry_cancel(&mut self) {
        self.amount_entry = None;
        self.amount_entry_error = None;
    }

    /// Returns true when the input moved the hand forward.
    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset = self.history_len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::NewHand => self.scene == Scene::Table && self.new_hand(),
            InputAction::Fold => self.submit(Action::Fold),
            InputAction::CheckCall => self.check_or_call(),
            InputAction::RaiseMin => self.raise_min(),
            InputAction::AmountOpen => self.open_amount_entry(),
            InputAction::AmountDigit(d) => {
                self.amount_entry_push_digit(d);
                false
            }
            InputAction::AmountBackspace => {
                self.amount_entry_backspace();
                false
            }
            InputAction::AmountInc => {
                self.amount_entry_adjust(true);
                false
            }
            InputAction::AmountDec => {
                self.amount_entry_adjust(false);
                false
            }
            InputAction::AmountSubmit => self.amount_entry_submit(),
            InputAction::AmountCancel => {
                self.amount_entry_cancel();
                false
            }
        }
    }

    /// Deal the next hand unless one is running or the game is over.
    pub fn new_hand(&mut self) -> bool {
        if self.table.phase().in_hand() || self.table.is_game_over() {
            return false;
        }
        match self.table.start_hand() {
            Ok(_) => {
                self.history_offset = 0;
                self.clear_action_error();
                self.collect_events();
                true
            }
            Err(err) => {
                self.set_action_error(err.to_string());
                false
            }
        }
    }

    /// One unit of table progress per tick, so AI moves and deals show up one at a time.
    pub fn on_tick(&mut self) {
        if self.scene != Scene::Table {
            return;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        if !self.table.phase().in_hand() {
            return;
        }
        match self.table.step() {
            Ok(Step::Awaiting(_)) => {}
            Ok(_) => self.collect_events(),
            Err(err) => self.set_action_error(err.to_string()),
        }
    }
}
