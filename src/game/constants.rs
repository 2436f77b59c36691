//! Table-level defaults and card-count constants.

use super::entities::Chips;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Hole cards dealt to each active seat.
pub const NUM_HOLE_CARDS: usize = 2;

/// Community cards dealt on the flop.
pub const FLOP_SIZE: usize = 3;

/// Total community cards dealt across one hand.
pub const BOARD_SIZE: usize = 5;

pub const DEFAULT_NUM_SEATS: usize = 5;
pub const DEFAULT_BUY_IN: Chips = 1000;
pub const DEFAULT_SMALL_BLIND: Chips = 10;
pub const DEFAULT_BIG_BLIND: Chips = 2 * DEFAULT_SMALL_BLIND;
