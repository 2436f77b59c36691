//! # Holdem Table
//!
//! The turn-by-turn mechanics of a multi-player Texas Hold'em table:
//! dealer/blind rotation, card dealing, and phase progression
//! (preflop → flop → turn → showdown).
//!
//! This is not a full poker rules engine. Betting-round resolution,
//! pot accounting, and hand ranking are left to external collaborators;
//! the crate models the table state machine that drives a hand from
//! setup through showdown.
//!
//! ## Example
//!
//! ```
//! use holdem_table::{Action, Phase, Table, TableConfig};
//!
//! let mut table = Table::new(TableConfig::default());
//! table.reset().unwrap();
//! let outcome = table.advance(Action::Call).unwrap();
//! assert_eq!(table.phase(), Phase::Flop);
//! assert!(outcome.community.flop.is_some());
//! ```

/// Table state machine, entities, and constants.
pub mod game;
pub use game::{
    constants::{self, DEFAULT_BIG_BLIND, DEFAULT_BUY_IN, DEFAULT_NUM_SEATS, DEFAULT_SMALL_BLIND},
    entities::{self, Action, Blinds, Card, Chips, Deck, Seat, SeatIndex, Suit},
    state_machine::{CommunityCards, Phase, StepOutcome, Table, TableConfig, TableError},
};
