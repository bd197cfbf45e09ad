//! holdem-rs: Texas Hold'em table engine
//!
//! Goals:
//! - Exhaustive best-five-of-seven evaluation with a total order on hands
//! - A validate-then-apply betting engine where chips are always conserved
//! - Seats driven by pluggable decision providers (human or AI)
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_rs::cards::{Card, Rank, Suit};
//! use holdem_rs::evaluator::{evaluate, Category};
//! use holdem_rs::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Queen, Suit::Diamonds),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let score = evaluate(&hole, &board).unwrap();
//! assert_eq!(score.category, Category::Pair);
//! ```
//!
//! ## Quick start: play a hand between AI seats
//! ```
//! use holdem_rs::policy::{Difficulty, HeuristicPolicy, RandomPolicy};
//! use holdem_rs::table::{SeatSpec, Table, TableConfig};
//!
//! let roster = vec![
//!     SeatSpec::new("Ann", 1000, HeuristicPolicy::new(Difficulty::Hard, Some(1))),
//!     SeatSpec::new("Bo", 1000, RandomPolicy::new(Some(2))),
//! ];
//! let mut table = Table::new(TableConfig::default().with_seed(7), roster);
//! let settlement = table.play_hand().unwrap();
//! assert_eq!(settlement.total_paid(), settlement.pot);
//! assert_eq!(table.chips_in_play(), 2000);
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin holdem-rs
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod history;
pub mod policy;
pub mod seat;
pub mod table;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
