//! Money conservation tests for bet ledgers and full sessions.
//!
//! A ledger's net position (profit/loss plus capital on the table plus
//! winnings riding) must be invariant under press and take-down and grow by
//! exactly the win amount on a win. At the session level every player's
//! rail must equal buy-in plus the sum of settled turn results.

use proptest::prelude::*;
use quick_craps::bets::{BetLedger, BetState};
use quick_craps::game::Dollars;
use quick_craps::session::{Session, SessionConfig};

#[derive(Clone, Debug)]
enum LedgerOp {
    Won(Dollars),
    Press(Dollars),
    TakeDown(Dollars),
    SetOff,
    SetOn,
}

fn ledger_op_strategy() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        (1i64..500).prop_map(LedgerOp::Won),
        (0i64..500).prop_map(LedgerOp::Press),
        (0i64..500).prop_map(LedgerOp::TakeDown),
        Just(LedgerOp::SetOff),
        Just(LedgerOp::SetOn),
    ]
}

proptest! {
    /// Apply an arbitrary op sequence, tracking how much each accepted win
    /// should have grown the net position. Rejected ops must leave the
    /// ledger untouched.
    #[test]
    fn net_position_tracks_wins_exactly(
        start in 1i64..1000,
        ops in prop::collection::vec(ledger_op_strategy(), 0..40),
    ) {
        let mut ledger = BetLedger::new(start);
        let mut expected = 0i64;

        for op in ops {
            if !ledger.is_active() {
                break;
            }
            let before = ledger.net_position();
            let result = match op {
                LedgerOp::Won(amount) => {
                    let r = ledger.won(amount, false);
                    if r.is_ok() {
                        expected += amount;
                    }
                    r
                }
                LedgerOp::Press(amount) => ledger.press(amount),
                LedgerOp::TakeDown(amount) => ledger.take_down(amount),
                LedgerOp::SetOff => ledger.set_off(),
                LedgerOp::SetOn => ledger.set_on(),
            };
            if result.is_err() {
                prop_assert_eq!(ledger.net_position(), before);
            }
            prop_assert_eq!(ledger.net_position(), expected);
        }
    }

    /// Taking a bet all the way down realizes exactly its net position, and
    /// capital never goes negative along the way.
    #[test]
    fn take_down_all_realizes_net_position(
        start in 1i64..1000,
        wins in prop::collection::vec(1i64..300, 0..10),
    ) {
        let mut ledger = BetLedger::new(start);
        for win in &wins {
            ledger.won(*win, false).unwrap();
        }
        let total_won: i64 = wins.iter().sum();
        prop_assert_eq!(ledger.net_position(), total_won);

        ledger.take_down_all().unwrap();
        prop_assert_eq!(ledger.state(), BetState::Down);
        prop_assert_eq!(ledger.current_amount(), 0);
        prop_assert_eq!(ledger.winnings(), 0);
        prop_assert_eq!(ledger.realized(), total_won);
    }
}

#[test]
fn test_session_rails_balance_against_turn_results() {
    let mut session = Session::new(SessionConfig {
        num_players: 4,
        seed: Some(0x5EED),
        ..SessionConfig::default()
    });
    session.run().unwrap();

    for player in session.players() {
        let net: i64 = player.turns().iter().map(|turn| turn.net_result()).sum();
        assert_eq!(
            player.rail(),
            player.buyin() + net,
            "{}: rail must equal buy-in plus settled results",
            player.name()
        );
    }
}

#[test]
fn test_every_turn_ends_with_no_money_on_the_table() {
    let mut session = Session::new(SessionConfig {
        num_players: 2,
        hours_of_play: 1,
        seed: Some(99),
        ..SessionConfig::default()
    });
    session.run().unwrap();

    for player in session.players() {
        for turn in player.turns() {
            for (kind, ledger) in turn.bets().ledgers() {
                assert!(
                    !ledger.is_active(),
                    "{kind} still active after turn {}",
                    turn.turn_number()
                );
            }
            let book_net: i64 = turn
                .bets()
                .ledgers()
                .map(|(_, ledger)| ledger.realized())
                .sum();
            assert_eq!(book_net, turn.net_result());
        }
    }
}
