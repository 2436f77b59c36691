//! Property-based tests for role rotation, blind posting, and dealing
//! using proptest.
//!
//! These verify the hand-setup invariants across a wide range of table
//! shapes rather than the single default configuration.

use holdem_table::{Action, Blinds, Phase, SeatIndex, Table, TableConfig};
use proptest::prelude::*;
use std::collections::BTreeSet;

// Seat counts are capped so two hole cards per seat always fit in the
// 47 cards left after a previous hand's community draws.
fn config_strategy() -> impl Strategy<Value = TableConfig> {
    (3usize..=10, 1u32..=2000, 1u32..=50).prop_map(|(num_seats, buy_in, small)| {
        TableConfig::new(
            num_seats,
            buy_in,
            Blinds {
                small,
                big: small * 2,
            },
        )
    })
}

fn role_holders(table: &Table) -> (Vec<SeatIndex>, Vec<SeatIndex>, Vec<SeatIndex>) {
    let ids = 0..table.num_seats();
    let dealers = ids
        .clone()
        .filter(|&id| table.seat(id).unwrap().is_dealer)
        .collect();
    let small_blinds = ids
        .clone()
        .filter(|&id| table.seat(id).unwrap().is_small_blind)
        .collect();
    let big_blinds = ids
        .filter(|&id| table.seat(id).unwrap().is_big_blind)
        .collect();
    (dealers, small_blinds, big_blinds)
}

fn ring_successor(ids: &[SeatIndex], from: SeatIndex) -> SeatIndex {
    ids.iter()
        .copied()
        .find(|&id| id > from)
        .unwrap_or(ids[0])
}

proptest! {
    #[test]
    fn roles_land_on_three_distinct_consecutive_seats(config in config_strategy()) {
        let mut table = Table::new(config);
        for _ in 0..3 {
            table.reset().unwrap();

            let (dealers, small_blinds, big_blinds) = role_holders(&table);
            prop_assert_eq!(dealers.len(), 1);
            prop_assert_eq!(small_blinds.len(), 1);
            prop_assert_eq!(big_blinds.len(), 1);

            let (dealer, sb, bb) = (dealers[0], small_blinds[0], big_blinds[0]);
            prop_assert_ne!(dealer, sb);
            prop_assert_ne!(sb, bb);
            prop_assert_ne!(dealer, bb);

            let ids = table.active_seat_ids();
            prop_assert_eq!(sb, ring_successor(&ids, dealer));
            prop_assert_eq!(bb, ring_successor(&ids, sb));

            // Walk to showdown so the next hand's hole cards come from
            // a partially used deck, as in real back-to-back hands.
            for _ in 0..3 {
                table.advance(Action::Call).unwrap();
            }
        }
    }

    #[test]
    fn stake_equals_capped_blind_contributions(
        config in config_strategy(),
        sb_stack in 0u32..=100,
        bb_stack in 0u32..=100,
    ) {
        let mut table = Table::new(config);
        table.reset().unwrap();

        // Pin the stacks of next hand's blind seats before the rotation
        // reaches them.
        let ids = table.active_seat_ids();
        let next_dealer = ring_successor(&ids, table.dealer_id());
        let next_sb = ring_successor(&ids, next_dealer);
        let next_bb = ring_successor(&ids, next_sb);
        table.seat_mut(next_sb).unwrap().stack = sb_stack;
        table.seat_mut(next_bb).unwrap().stack = bb_stack;

        table.reset().unwrap();

        let blinds = table.blinds();
        let expected = sb_stack.min(blinds.small) + bb_stack.min(blinds.big);
        prop_assert_eq!(table.stake(), expected);

        // A blind seat is all-in iff its contribution was stack-capped.
        prop_assert_eq!(table.seat(next_sb).unwrap().is_all_in, sb_stack < blinds.small);
        prop_assert_eq!(table.seat(next_bb).unwrap().is_all_in, bb_stack < blinds.big);
    }

    // Hole cards share one deck segment and community cards another
    // (the deck is reshuffled between the deal and the streets), so
    // uniqueness holds within each set but not across them.
    #[test]
    fn dealt_cards_are_unique_within_each_set(config in config_strategy()) {
        let mut table = Table::new(config);
        table.reset().unwrap();
        for _ in 0..3 {
            table.advance(Action::Call).unwrap();
        }

        let mut hole_cards = Vec::new();
        for id in table.active_seat_ids() {
            let cards = &table.seat(id).unwrap().cards;
            prop_assert_eq!(cards.len(), 2);
            hole_cards.extend(cards.iter().copied());
        }
        let unique_hole: BTreeSet<_> = hole_cards.iter().collect();
        prop_assert_eq!(unique_hole.len(), hole_cards.len());

        let community = table.community().cards();
        let unique_community: BTreeSet<_> = community.iter().collect();
        prop_assert_eq!(unique_community.len(), community.len());
        prop_assert_eq!(table.community().num_dealt(), 5);
    }

    #[test]
    fn phase_walk_is_fixed(config in config_strategy()) {
        let mut table = Table::new(config);
        table.reset().unwrap();
        prop_assert_eq!(table.phase(), Phase::Preflop);

        let expected = [Phase::Flop, Phase::Turn, Phase::Showdown];
        for phase in expected {
            table.advance(Action::Call).unwrap();
            prop_assert_eq!(table.phase(), phase);
        }

        // Terminal no-op.
        table.advance(Action::Call).unwrap();
        prop_assert_eq!(table.phase(), Phase::Showdown);
    }
}
