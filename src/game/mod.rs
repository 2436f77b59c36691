//! Hold'em table core - entities and the hand state machine.
//!
//! This module provides the pieces needed to run one hand at a time:
//! - Cards, a shuffled deck, and per-seat bookkeeping
//! - Dealer/blind rotation over a fixed ring of seats
//! - Phase progression with community-card dealing

pub mod constants;
pub mod entities;
pub mod state_machine;

pub use state_machine::{CommunityCards, Phase, StepOutcome, Table, TableConfig, TableError};
