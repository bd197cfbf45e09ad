use crate::table::MAX_SEATS;

use super::{AppState, Scene};

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Opponents,
    StartingStack,
    MinRaise,
    Difficulty,
    Seed,
}

const MENU_ITEMS: [MenuItem; 5] =
    [MenuItem::Opponents, MenuItem::StartingStack, MenuItem::MinRaise, MenuItem::Difficulty, MenuItem::Seed];

const MAX_OPPONENTS: usize = MAX_SEATS - 1;
const STACK_STEP: u64 = 100;
const RAISE_STEP: u64 = 10;

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::Opponents => format!("AI Opponents: {}", app.cfg_opponents),
            MenuItem::StartingStack => format!("Starting Stack: ${}", app.cfg_starting_stack),
            MenuItem::MinRaise => format!("Min Raise: {}", app.cfg_min_raise),
            MenuItem::Difficulty => format!("AI Difficulty: {}", app.cfg_difficulty),
            MenuItem::Seed => match app.cfg_seed {
                Some(seed) => format!("Seed: {seed}"),
                None => "Seed: random".to_string(),
            },
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::Opponents => {
                if app.cfg_opponents < MAX_OPPONENTS {
                    app.cfg_opponents += 1;
                }
            }
            MenuItem::StartingStack => {
                app.cfg_starting_stack = app.cfg_starting_stack.saturating_add(STACK_STEP);
            }
            MenuItem::MinRaise => {
                app.cfg_min_raise = app.cfg_min_raise.saturating_add(RAISE_STEP);
            }
            MenuItem::Difficulty => app.cfg_difficulty = app.cfg_difficulty.next(),
            MenuItem::Seed => {
                app.cfg_seed = Some(app.cfg_seed.map_or(1, |s| s.saturating_add(1)));
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::Opponents => {
                if app.cfg_opponents > 1 {
                    app.cfg_opponents -= 1;
                }
            }
            MenuItem::StartingStack => {
                app.cfg_starting_stack = app.cfg_starting_stack.saturating_sub(STACK_STEP).max(STACK_STEP);
            }
            MenuItem::MinRaise => {
                app.cfg_min_raise = app.cfg_min_raise.saturating_sub(RAISE_STEP).max(RAISE_STEP);
            }
            MenuItem::Difficulty => app.cfg_difficulty = app.cfg_difficulty.prev(),
            // back to random below 1
            MenuItem::Seed => {
                app.cfg_seed = app.cfg_seed.and_then(|s| s.checked_sub(1)).filter(|&s| s > 0);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.scene = match self.scene {
            Scene::Menu => Scene::Table,
            _ => {
                self.open_menu();
                Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.menu_index = 0;
        self.cfg_opponents = self.table.seats().len().saturating_sub(1).max(1);
        self.cfg_starting_stack = self.starting_stack;
        self.cfg_min_raise = self.table.config().min_raise;
        self.cfg_difficulty = self.difficulty;
        self.cfg_seed = self.table.config().seed;
        self.scene = Scene::Menu;
    }

    /// Rebuild the table from the edited settings. Any hand in progress is dropped.
    pub fn apply_menu(&mut self) {
        self.cfg_opponents = self.cfg_opponents.clamp(1, MAX_OPPONENTS);
        self.cfg_starting_stack = self.cfg_starting_stack.max(STACK_STEP);
        self.cfg_min_raise = self.cfg_min_raise.max(1);

        self.starting_stack = self.cfg_starting_stack;
        self.difficulty = self.cfg_difficulty;
        self.table = Self::build_table(
            self.cfg_opponents,
            self.cfg_starting_stack,
            self.cfg_min_raise,
            self.cfg_difficulty,
            self.cfg_seed,
        );
        log::info!(
            "new table: {} opponents, stack {}, min raise {}, {}",
            self.cfg_opponents,
            self.cfg_starting_stack,
            self.cfg_min_raise,
            self.cfg_difficulty
        );
        self.clear_history();
        self.scene = Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
