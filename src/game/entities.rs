use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
    // Wild is used to initialize a deck of cards.
    Wild,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
            Self::Wild => "w",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values.
pub type Value = u8;

/// A card is a tuple of a uInt8 value (ace=1u8 ... king=13u8)
/// and a suit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            1 | 14 => "A",
            11 => "J",
            12 => "Q",
            13 => "K",
            v => &v.to_string(),
        };
        let repr = format!("{value}/{}", self.1);
        write!(f, "{repr:>4}")
    }
}

/// A 52-card deck dealt front-to-back through a cursor. The table owns
/// one deck for its lifetime and reshuffles it between hands.
#[derive(Debug)]
pub struct Deck {
    cards: [Card; 52],
    deck_idx: usize,
}

impl Deck {
    /// Number of cards left to draw before the deck is exhausted.
    #[must_use]
    pub fn remaining(&self) -> usize {
        constants::DECK_SIZE - self.deck_idx
    }

    /// Remove and return `n` cards without replacement, or `None` if
    /// fewer than `n` remain.
    pub fn draw(&mut self, n: usize) -> Option<Vec<Card>> {
        if self.remaining() < n {
            return None;
        }
        let drawn = self.cards[self.deck_idx..self.deck_idx + n].to_vec();
        self.deck_idx += n;
        Some(drawn)
    }

    /// Restore the deck to a full, freshly shuffled 52-card state.
    pub fn reset(&mut self) {
        self.cards.shuffle(&mut rand::rng());
        self.deck_idx = 0;
    }
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards: [Card; 52] = [Card(0, Suit::Wild); 52];
        for (i, value) in (1u8..=13u8).enumerate() {
            for (j, suit) in [Suit::Club, Suit::Spade, Suit::Diamond, Suit::Heart]
                .into_iter()
                .enumerate()
            {
                cards[4 * i + j] = Card(value, suit);
            }
        }
        Self { cards, deck_idx: 0 }
    }
}

/// Type alias for whole chips. All blinds and seat stacks are counted
/// in whole chips (there's no point arguing over fractions).
pub type Chips = u32;

/// Type alias for seat positions at the table.
pub type SeatIndex = usize;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Blinds {
    pub small: Chips,
    pub big: Chips,
}

impl Default for Blinds {
    fn default() -> Self {
        Self {
            small: constants::DEFAULT_SMALL_BLIND,
            big: constants::DEFAULT_BIG_BLIND,
        }
    }
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = format!("${}/{}", self.small, self.big);
        write!(f, "{repr}")
    }
}

/// The recognized player actions. The table does not resolve bets;
/// it only checks that a submitted action is a member of this set.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Action {
    Fold,
    Call,
    Raise,
}

// Can't really convert a usize into an Action safely, so the fallible
// direction lives in the state machine next to the error type. This
// direction is always fine.
#[allow(clippy::from_over_into)]
impl Into<usize> for Action {
    fn into(self) -> usize {
        match self {
            Self::Fold => 0,
            Self::Call => 1,
            Self::Raise => 2,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Fold => "fold",
            Self::Call => "call",
            Self::Raise => "raise",
        };
        write!(f, "{repr}")
    }
}

/// One table position. Seats are stable for the table's lifetime;
/// stacks carry over between hands, cards and flags do not.
#[derive(Clone, Debug)]
pub struct Seat {
    pub seat_id: SeatIndex,
    pub stack: Chips,
    /// Hole cards. Empty before the deal, exactly 2 after.
    pub cards: Vec<Card>,
    pub is_active: bool,
    pub is_all_in: bool,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
}

impl Seat {
    #[must_use]
    pub fn new(seat_id: SeatIndex, stack: Chips) -> Self {
        Self {
            seat_id,
            stack,
            cards: Vec::with_capacity(constants::NUM_HOLE_CARDS),
            is_active: true,
            is_all_in: false,
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
        }
    }

    /// Clear cards and the all-in/dealer/blind flags for the upcoming
    /// hand. Stack and activity are preserved; rotation re-assigns the
    /// role flags afterwards.
    pub fn reset_for_new_hand(&mut self) {
        self.cards.clear();
        self.is_all_in = false;
        self.is_dealer = false;
        self.is_small_blind = false;
        self.is_big_blind = false;
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Seat {} has {} chips", self.seat_id, self.stack)
    }
}

/// Fixed ring of seats. All operations are total over valid seat ids;
/// an out-of-range id yields `None`, which the table surfaces as an
/// invalid-seat error.
#[derive(Clone, Debug)]
pub struct SeatRegistry {
    seats: Vec<Seat>,
}

impl SeatRegistry {
    #[must_use]
    pub fn new(num_seats: usize, buy_in: Chips) -> Self {
        let seats = (0..num_seats)
            .map(|seat_id| Seat::new(seat_id, buy_in))
            .collect();
        Self { seats }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    #[must_use]
    pub fn get(&self, seat_id: SeatIndex) -> Option<&Seat> {
        self.seats.get(seat_id)
    }

    pub fn get_mut(&mut self, seat_id: SeatIndex) -> Option<&mut Seat> {
        self.seats.get_mut(seat_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter()
    }

    /// Ids of all active seats, ascending.
    #[must_use]
    pub fn active_seat_ids(&self) -> Vec<SeatIndex> {
        self.seats
            .iter()
            .filter(|seat| seat.is_active)
            .map(|seat| seat.seat_id)
            .collect()
    }

    /// Clear every seat's cards and role flags at the hand-start
    /// boundary, preserving stacks and activity.
    pub fn reset_all_for_new_hand(&mut self) {
        for seat in &mut self.seats {
            seat.reset_for_new_hand();
        }
    }

    /// Mark every seat active again, resetting eliminated/folded status
    /// from the previous hand.
    pub fn activate_all(&mut self) {
        for seat in &mut self.seats {
            seat.is_active = true;
        }
    }
}
