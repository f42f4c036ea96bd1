//! End-to-end turn scenarios driven by scripted dice, asserting exact
//! outcomes and exact dollar settlement.

use quick_craps::bets::{BetBook, BetCatalog, BetKind, BetResult, BetState, TableLimits};
use quick_craps::dice::{Dice, ScriptedRoller};
use quick_craps::game::{Outcome, PlayerTurn, Point, Roll, TableState};
use quick_craps::game::state_machine::RoundEngine;
use quick_craps::strategy::{BettingPolicy, PassLinePlacePolicy, no_press};

fn catalog() -> BetCatalog {
    BetCatalog::standard(TableLimits {
        bet_unit: 25,
        table_limit: 5000,
    })
}

fn scripted(faces: &[(u8, u8)]) -> Dice {
    Dice::with_roller(Box::new(ScriptedRoller::from_faces(faces)))
}

fn outcomes(turn: &PlayerTurn) -> Vec<Outcome> {
    turn.rolls().iter().filter_map(Roll::outcome).collect()
}

/// Places one hardway six on the first call and then leaves the book alone.
struct OneHardwayPolicy {
    placed: bool,
}

impl BettingPolicy for OneHardwayPolicy {
    fn place_bets(
        &mut self,
        _table: &TableState,
        book: &mut BetBook,
        catalog: &BetCatalog,
    ) -> BetResult<()> {
        if !self.placed {
            book.ensure(catalog, BetKind::Hardway(Point::Six), 25, no_press)?;
            self.placed = true;
        }
        Ok(())
    }
}

#[test]
fn test_hard_six_pays_nine_to_one_and_comes_down() {
    let catalog = catalog();
    let mut dice = scripted(&[
        (2, 3), // 5: point established
        (3, 3), // hard 6: place winner, hardway hits
        (2, 4), // easy 6: place winner, won hardway is already settled
        (3, 4), // 7: seven out
    ]);
    let mut turn = PlayerTurn::new(1, 1000);
    let mut policy = OneHardwayPolicy { placed: false };
    RoundEngine::new(&mut dice, &mut turn, &catalog, &mut policy)
        .play()
        .unwrap();

    assert_eq!(
        outcomes(&turn),
        [
            Outcome::PointEstablished,
            Outcome::PlaceWinner,
            Outcome::PlaceWinner,
            Outcome::SevenOut,
        ]
    );

    let (kind, ledger) = turn.bets().ledgers().next().unwrap();
    assert_eq!(kind, BetKind::Hardway(Point::Six));
    assert_eq!(ledger.state(), BetState::Won);
    assert_eq!(ledger.winnings(), 225);
    // stake returned plus 9:1 winnings
    assert_eq!(turn.net_result(), 225);
}

#[test]
fn test_easy_six_loses_the_hardway() {
    let catalog = catalog();
    let mut dice = scripted(&[
        (2, 3), // 5: point established
        (2, 4), // easy 6 takes the hardway down
        (3, 4), // 7: seven out
    ]);
    let mut turn = PlayerTurn::new(1, 1000);
    let mut policy = OneHardwayPolicy { placed: false };
    RoundEngine::new(&mut dice, &mut turn, &catalog, &mut policy)
        .play()
        .unwrap();

    let (_, ledger) = turn.bets().ledgers().next().unwrap();
    assert_eq!(ledger.state(), BetState::Lost);
    assert_eq!(turn.net_result(), -25);
}

/// A full turn of the house-standard policy with every settlement amount
/// checked by hand:
///
/// 1. hard 6 establishes the point; the $25 line converts to pass-6 with
///    $125 odds, and $25/$30/$25 go on 5, 8, 9
/// 2. 8 hits for $35 riding on the place bet
/// 3. the point hits: pass-6 pays $25 even, the odds pay $150 at 6:5
/// 4. comeout: point bets come down (+$175 collected), places go off, a
///    fresh line bet wins even on the 7 with $25 riding
/// 5. comeout 2 craps out the line bet, riding winnings and all
/// 6. 4 establishes a new point
/// 7. seven out: pass-4, $75 odds, and all four place bets lose
#[test]
fn test_pass_line_place_turn_settles_exactly() {
    let catalog = catalog();
    let mut dice = scripted(&[
        (3, 3),
        (4, 4),
        (3, 3),
        (4, 3),
        (1, 1),
        (2, 2),
        (3, 4),
    ]);
    let mut turn = PlayerTurn::new(1, 1000);
    let mut policy = PassLinePlacePolicy::new(25, no_press);
    RoundEngine::new(&mut dice, &mut turn, &catalog, &mut policy)
        .play()
        .unwrap();

    assert_eq!(
        outcomes(&turn),
        [
            Outcome::PointEstablished,
            Outcome::PlaceWinner,
            Outcome::PointWinner,
            Outcome::FrontLineWinner,
            Outcome::Craps,
            Outcome::PointEstablished,
            Outcome::SevenOut,
        ]
    );

    // +25 pass-6, +150 odds, -25 crapped line with its winnings,
    // -25 pass-4, -75 odds, -25 -30 -30 -25 places (8 loses its $35 riding)
    assert_eq!(turn.net_result(), -60);

    // won point bets were collected in full during the comeout
    let pass_six: i64 = turn
        .bets()
        .ledgers()
        .filter(|(kind, _)| matches!(kind, BetKind::PassPoint(Point::Six)))
        .map(|(_, ledger)| ledger.realized())
        .sum();
    assert_eq!(pass_six, 25);
    let odds_six: i64 = turn
        .bets()
        .ledgers()
        .filter(|(kind, _)| matches!(kind, BetKind::PassOdds(Point::Six)))
        .map(|(_, ledger)| ledger.realized())
        .sum();
    assert_eq!(odds_six, 150);

    // three line bets this turn: converted, crapped out, converted again
    let line_count = turn
        .bets()
        .ledgers()
        .filter(|(kind, _)| matches!(kind, BetKind::PassLine))
        .count();
    assert_eq!(line_count, 3);

    assert_eq!(turn.stats().longest_point_run(), 2);
    assert_eq!(turn.stats().outcome_count(Outcome::PlaceWinner), 1);
}

#[test]
fn test_exhausted_script_sevens_the_turn_out() {
    let catalog = catalog();
    // script covers only the comeout; the fallback seven ends the turn
    let mut dice = scripted(&[(5, 5)]);
    let mut turn = PlayerTurn::new(1, 1000);
    let mut policy = PassLinePlacePolicy::new(25, no_press);
    RoundEngine::new(&mut dice, &mut turn, &catalog, &mut policy)
        .play()
        .unwrap();

    assert_eq!(
        outcomes(&turn),
        [Outcome::PointEstablished, Outcome::SevenOut]
    );
}
