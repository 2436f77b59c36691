//! Hand state machine: dealer/blind rotation, card dealing, and phase
//! progression from preflop through showdown.
//!
//! One external driver runs the loop: `reset` starts a hand (rotates the
//! button, deals hole cards, posts blinds) and repeated `advance` calls
//! walk the community-dealing sequence until showdown. Betting
//! resolution, pots, and hand ranking are external collaborators.

use log::debug;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

use super::constants::{BOARD_SIZE, FLOP_SIZE, NUM_HOLE_CARDS};
use super::entities::{
    Action, Blinds, Card, Chips, Deck, Seat, SeatIndex, SeatRegistry,
};

/// Errors that can occur while driving a table.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum TableError {
    #[error("seat {0} out of range")]
    InvalidSeat(SeatIndex),
    #[error("action index {0} is not a recognized action")]
    InvalidAction(usize),
    #[error("requested {requested} cards with {remaining} remaining")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("no eligible seat within one full circuit")]
    NoEligibleSeat,
}

impl TryFrom<usize> for Action {
    type Error = TableError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Fold),
            1 => Ok(Self::Call),
            2 => Ok(Self::Raise),
            other => Err(TableError::InvalidAction(other)),
        }
    }
}

/// The hand's position in the public-card-revealing sequence.
///
/// `River` is never occupied at rest: the turn transitions directly to
/// showdown when the river card is dealt. It remains a phase value
/// because the community slots are keyed by it.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Phase {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Preflop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
        };
        write!(f, "{repr}")
    }
}

/// Community cards shared amongst all seats, one slot per dealing
/// street. Slots are append-only within a hand and cleared at hand
/// start.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CommunityCards {
    pub flop: Option<[Card; 3]>,
    pub turn: Option<Card>,
    pub river: Option<Card>,
}

impl CommunityCards {
    /// Total community cards dealt so far this hand.
    #[must_use]
    pub fn num_dealt(&self) -> usize {
        self.flop.map_or(0, |flop| flop.len())
            + usize::from(self.turn.is_some())
            + usize::from(self.river.is_some())
    }

    /// All dealt community cards in dealing order.
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(BOARD_SIZE);
        if let Some(flop) = self.flop {
            cards.extend(flop);
        }
        cards.extend(self.turn);
        cards.extend(self.river);
        cards
    }
}

impl fmt::Display for CommunityCards {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.flop {
            Some([first, second, third]) => write!(f, "{first} {second} {third}")?,
            None => write!(f, "_ _ _")?,
        }
        match self.turn {
            Some(card) => write!(f, " {card}")?,
            None => write!(f, " _")?,
        }
        match self.river {
            Some(card) => write!(f, " {card}")?,
            None => write!(f, " _")?,
        }
        Ok(())
    }
}

/// Table configuration settings.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct TableConfig {
    pub num_seats: usize,
    pub buy_in: Chips,
    pub blinds: Blinds,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(
            super::constants::DEFAULT_NUM_SEATS,
            super::constants::DEFAULT_BUY_IN,
            Blinds::default(),
        )
    }
}

impl TableConfig {
    #[must_use]
    pub const fn new(num_seats: usize, buy_in: Chips, blinds: Blinds) -> Self {
        Self {
            num_seats,
            buy_in,
            blinds,
        }
    }
}

/// Result of one `advance` call. The reward/done/info channel exists to
/// satisfy the external step/reset control-loop shape and carries no
/// poker semantics here (always 0.0 / false / empty).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepOutcome {
    pub community: CommunityCards,
    pub reward: f64,
    pub done: bool,
    pub info: Map<String, Value>,
}

/// One table instance: a fixed ring of seats, an exclusively owned
/// deck, and the state of the hand in progress. Seats and stacks
/// persist across hands; cards and phase do not.
#[derive(Debug)]
pub struct Table {
    seats: SeatRegistry,
    /// Deck of cards. Instantiated once and reshuffled each hand.
    deck: Deck,
    blinds: Blinds,
    phase: Phase,
    community: CommunityCards,
    dealer_id: SeatIndex,
    /// Total forced bets posted this hand. May be less than the nominal
    /// blind sum when a blind seat went all-in.
    stake: Chips,
}

impl Default for Table {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}

impl Table {
    #[must_use]
    pub fn new(config: TableConfig) -> Self {
        let seats = SeatRegistry::new(config.num_seats, config.buy_in);
        let mut deck = Deck::default();
        deck.reset();
        // Seed the button at a random active seat; the first reset
        // rotates onward from here.
        let dealer_id = seats
            .active_seat_ids()
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(0);
        Self {
            seats,
            deck,
            blinds: config.blinds,
            phase: Phase::Preflop,
            community: CommunityCards::default(),
            dealer_id,
            stake: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn community(&self) -> CommunityCards {
        self.community
    }

    #[must_use]
    pub fn dealer_id(&self) -> SeatIndex {
        self.dealer_id
    }

    #[must_use]
    pub fn stake(&self) -> Chips {
        self.stake
    }

    #[must_use]
    pub fn blinds(&self) -> Blinds {
        self.blinds
    }

    #[must_use]
    pub fn num_seats(&self) -> usize {
        self.seats.len()
    }

    /// Ids of all active seats, ascending.
    #[must_use]
    pub fn active_seat_ids(&self) -> Vec<SeatIndex> {
        self.seats.active_seat_ids()
    }

    pub fn seat(&self, seat_id: SeatIndex) -> Result<&Seat, TableError> {
        self.seats
            .get(seat_id)
            .ok_or(TableError::InvalidSeat(seat_id))
    }

    pub fn seat_mut(&mut self, seat_id: SeatIndex) -> Result<&mut Seat, TableError> {
        self.seats
            .get_mut(seat_id)
            .ok_or(TableError::InvalidSeat(seat_id))
    }

    /// Find the next active seat strictly after `from`, wrapping around
    /// the ring. The scan is bounded by the seat count, so a lone
    /// active seat re-selects itself and a table with no active seats
    /// reports that no seat is eligible instead of looping forever.
    fn next_active_seat(&self, from: SeatIndex) -> Result<SeatIndex, TableError> {
        let num_seats = self.seats.len();
        for step in 1..=num_seats {
            let seat_id = (from + step) % num_seats;
            let seat = self
                .seats
                .get(seat_id)
                .ok_or(TableError::InvalidSeat(seat_id))?;
            if seat.is_active {
                return Ok(seat_id);
            }
        }
        Err(TableError::NoEligibleSeat)
    }

    fn draw(&mut self, n: usize) -> Result<Vec<Card>, TableError> {
        let remaining = self.deck.remaining();
        self.deck.draw(n).ok_or(TableError::DeckExhausted {
            requested: n,
            remaining,
        })
    }

    /// Post a forced bet for a blind seat. A stack that can't cover the
    /// nominal amount goes in whole and the seat is marked all-in; the
    /// non-all-in path posts the nominal amount without touching the
    /// stack (stack debiting belongs to the betting collaborator).
    fn post_blind(&mut self, seat_id: SeatIndex, amount: Chips) -> Result<(), TableError> {
        let seat = self.seat_mut(seat_id)?;
        if seat.stack < amount {
            let posted = seat.stack;
            seat.is_all_in = true;
            seat.stack = 0;
            self.stake += posted;
        } else {
            self.stake += amount;
        }
        Ok(())
    }

    /// Start a new hand: rotate the button, assign blinds, deal hole
    /// cards, reshuffle the deck, and post the forced bets. Returns the
    /// cleared community-card state.
    pub fn reset(&mut self) -> Result<CommunityCards, TableError> {
        self.community = CommunityCards::default();
        self.phase = Phase::Preflop;

        // Pick the next button before wiping flags, then assign all
        // three roles onto consecutive active seats.
        let dealer_id = self.next_active_seat(self.dealer_id)?;
        self.seats.reset_all_for_new_hand();
        self.seat_mut(dealer_id)?.is_dealer = true;
        self.dealer_id = dealer_id;

        let small_blind_id = self.next_active_seat(dealer_id)?;
        self.seat_mut(small_blind_id)?.is_small_blind = true;
        let big_blind_id = self.next_active_seat(small_blind_id)?;
        self.seat_mut(big_blind_id)?.is_big_blind = true;

        // Hole cards come from whatever the deck held after the previous
        // hand's community draws; the deck is only rebuilt afterwards.
        // Historical contract, preserved as observed (see DESIGN.md).
        for seat_id in self.seats.active_seat_ids() {
            let cards = self.draw(NUM_HOLE_CARDS)?;
            self.seat_mut(seat_id)?.cards = cards;
        }
        self.deck.reset();

        self.stake = 0;
        self.post_blind(small_blind_id, self.blinds.small)?;
        self.post_blind(big_blind_id, self.blinds.big)?;

        self.seats.activate_all();

        debug!(
            "new hand: dealer={dealer_id} sb={small_blind_id} bb={big_blind_id} stake={}",
            self.stake
        );
        Ok(self.community)
    }

    /// Move the hand forward by one community-dealing step. The action
    /// is membership-checked by its type (raw indices go through
    /// `Action::try_from`) but is not otherwise consumed: betting
    /// resolution is not this table's job.
    pub fn advance(&mut self, action: Action) -> Result<StepOutcome, TableError> {
        match self.phase {
            Phase::Preflop => {
                let cards = self.draw(FLOP_SIZE)?;
                self.community.flop = Some([cards[0], cards[1], cards[2]]);
                self.phase = Phase::Flop;
            }
            Phase::Flop => {
                let cards = self.draw(1)?;
                self.community.turn = Some(cards[0]);
                self.phase = Phase::Turn;
            }
            Phase::Turn => {
                // River and showdown collapse into a single transition;
                // there is no separate river tick.
                let cards = self.draw(1)?;
                self.community.river = Some(cards[0]);
                self.phase = Phase::Showdown;
            }
            // Terminal: repeated calls return the unchanged state.
            Phase::River | Phase::Showdown => {}
        }

        debug!("advance ({action}): phase={}", self.phase);
        Ok(StepOutcome {
            community: self.community,
            reward: 0.0,
            done: false,
            info: Map::new(),
        })
    }
}
