//! The bet catalog: every bet kind the table offers, its win/lose
//! predicates, payout rule, and validation against the table limits.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::errors::{BetError, BetResult};
use super::odds::{PayoutOdds, PayoutRule};
use crate::game::entities::{Dollars, Point, Roll};

/// Every bet kind the table offers.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BetKind {
    PassLine,
    PassPoint(Point),
    PassOdds(Point),
    Place(Point),
    Hardway(Point),
    Field,
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassLine => write!(f, "pass_line"),
            Self::PassPoint(p) => write!(f, "pass_{p}"),
            Self::PassOdds(p) => write!(f, "pass_odds_{p}"),
            Self::Place(p) => write!(f, "place_{p}"),
            Self::Hardway(p) => write!(f, "hard_{p}"),
            Self::Field => write!(f, "field"),
        }
    }
}

/// Set of roll sums, stored as a bitmask over 2..=12.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SumSet(u16);

impl SumSet {
    #[must_use]
    pub const fn of(sums: &[u8]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < sums.len() {
            bits |= 1 << sums[i];
            i += 1;
        }
        Self(bits)
    }

    #[must_use]
    pub const fn contains(self, sum: u8) -> bool {
        sum < 16 && self.0 & (1 << sum) != 0
    }
}

/// Win/lose predicate over a classified roll. An enumerable value record,
/// not an arbitrary closure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RollPredicate {
    /// The roll sum is a member of the set.
    SumIn(SumSet),
    /// The number rolled the hard way (equal faces).
    Hard(u8),
    /// A seven, or the number rolled the easy way.
    SevenOrEasy(u8),
}

impl RollPredicate {
    #[must_use]
    pub fn matches(&self, roll: &Roll) -> bool {
        match self {
            Self::SumIn(set) => set.contains(roll.sum()),
            Self::Hard(number) => roll.hard_number(*number),
            Self::SevenOrEasy(number) => {
                roll.sum() == 7 || (roll.sum() == *number && !roll.is_hard())
            }
        }
    }
}

/// Static definition of one bet kind. Immutable once the catalog is built.
#[derive(Clone, Copy, Debug)]
pub struct BetDefinition {
    pub kind: BetKind,
    wins_on: RollPredicate,
    loses_on: RollPredicate,
    payout: PayoutRule,
    /// Largest multiple of the line bet this odds bet may reach.
    pub max_odds: Option<Dollars>,
    /// Proposition bets pay out and terminate instead of staying up.
    pub proposition: bool,
}

impl BetDefinition {
    #[must_use]
    pub fn wins_on(&self, roll: &Roll) -> bool {
        self.wins_on.matches(roll)
    }

    #[must_use]
    pub fn loses_on(&self, roll: &Roll) -> bool {
        self.loses_on.matches(roll)
    }

    /// `-amount` on a loss, the net win on a win, zero otherwise.
    #[must_use]
    pub fn evaluate(&self, roll: &Roll, amount: Dollars) -> Dollars {
        if self.loses_on(roll) {
            -amount
        } else if self.wins_on(roll) {
            self.payout.payout(roll.sum(), amount)
        } else {
            0
        }
    }

    /// Round a requested amount to one this bet's pricing accepts.
    #[must_use]
    pub const fn appropriate_amount(&self, amount: Dollars) -> Dollars {
        self.payout.appropriate_amount(amount)
    }
}

/// Table betting range.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct TableLimits {
    pub bet_unit: Dollars,
    pub table_limit: Dollars,
}

const FIELD_OVERRIDES: &[(u8, PayoutOdds)] = &[(2, PayoutOdds::DOUBLE), (12, PayoutOdds::TRIPLE)];

/// Immutable registry of bet definitions, built once at startup and shared
/// by reference into every engine instance.
#[derive(Clone, Debug)]
pub struct BetCatalog {
    defs: BTreeMap<BetKind, BetDefinition>,
    limits: TableLimits,
}

impl BetCatalog {
    /// The canonical craps catalog: pass line, pass point and odds, place
    /// bets, hardways, and the field.
    #[must_use]
    pub fn standard(limits: TableLimits) -> Self {
        let mut defs = BTreeMap::new();
        let mut insert = |def: BetDefinition| {
            defs.insert(def.kind, def);
        };

        insert(BetDefinition {
            kind: BetKind::PassLine,
            wins_on: RollPredicate::SumIn(SumSet::of(&[7, 11])),
            loses_on: RollPredicate::SumIn(SumSet::of(&[2, 3, 12])),
            payout: PayoutRule::Fixed(PayoutOdds::EVEN),
            max_odds: None,
            proposition: false,
        });

        for point in Point::ALL {
            let value = point.value();
            let on_point = RollPredicate::SumIn(SumSet::of(&[value]));
            let seven_out = RollPredicate::SumIn(SumSet::of(&[7]));

            insert(BetDefinition {
                kind: BetKind::PassPoint(point),
                wins_on: on_point,
                loses_on: seven_out,
                payout: PayoutRule::Fixed(PayoutOdds::EVEN),
                max_odds: None,
                proposition: false,
            });

            let (true_odds, max_odds) = match point {
                Point::Four | Point::Ten => (PayoutOdds::TWO_TO_ONE, 3),
                Point::Five | Point::Nine => (PayoutOdds::THREE_TO_TWO, 4),
                Point::Six | Point::Eight => (PayoutOdds::SIX_TO_FIVE, 5),
            };
            insert(BetDefinition {
                kind: BetKind::PassOdds(point),
                wins_on: on_point,
                loses_on: seven_out,
                payout: PayoutRule::Fixed(true_odds),
                max_odds: Some(max_odds),
                proposition: false,
            });

            let place_odds = match point {
                Point::Four | Point::Ten => PayoutOdds::TWO_TO_ONE_VIG_5,
                Point::Five | Point::Nine => PayoutOdds::SEVEN_TO_FIVE,
                Point::Six | Point::Eight => PayoutOdds::SEVEN_TO_SIX,
            };
            insert(BetDefinition {
                kind: BetKind::Place(point),
                wins_on: on_point,
                loses_on: seven_out,
                payout: PayoutRule::Fixed(place_odds),
                max_odds: None,
                proposition: false,
            });

            let hardway_odds = match point {
                Point::Four | Point::Ten => Some(PayoutOdds::SEVEN_TO_ONE),
                Point::Six | Point::Eight => Some(PayoutOdds::NINE_TO_ONE),
                Point::Five | Point::Nine => None,
            };
            if let Some(odds) = hardway_odds {
                insert(BetDefinition {
                    kind: BetKind::Hardway(point),
                    wins_on: RollPredicate::Hard(value),
                    loses_on: RollPredicate::SevenOrEasy(value),
                    payout: PayoutRule::Fixed(odds),
                    max_odds: None,
                    proposition: true,
                });
            }
        }

        insert(BetDefinition {
            kind: BetKind::Field,
            wins_on: RollPredicate::SumIn(SumSet::of(&[2, 3, 4, 9, 10, 11, 12])),
            loses_on: RollPredicate::SumIn(SumSet::of(&[5, 6, 7, 8])),
            payout: PayoutRule::BySum {
                overrides: FIELD_OVERRIDES,
                default: PayoutOdds::EVEN,
            },
            max_odds: None,
            proposition: true,
        });

        Self { defs, limits }
    }

    #[must_use]
    pub fn definition(&self, kind: BetKind) -> Option<&BetDefinition> {
        self.defs.get(&kind)
    }

    #[must_use]
    pub const fn limits(&self) -> TableLimits {
        self.limits
    }

    pub fn kinds(&self) -> impl Iterator<Item = BetKind> + '_ {
        self.defs.keys().copied()
    }

    /// Round a requested amount to the bet's pricing, then check it against
    /// the table range. Returns the accepted amount.
    pub fn validate(&self, kind: BetKind, amount: Dollars) -> BetResult<Dollars> {
        let def = self
            .definition(kind)
            .ok_or(BetError::UnknownBet { kind })?;
        let amount = def.appropriate_amount(amount);
        if amount < self.limits.bet_unit || amount > self.limits.table_limit {
            return Err(BetError::InvalidBetAmount {
                kind,
                amount,
                min: self.limits.bet_unit,
                max: self.limits.table_limit,
            });
        }
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> BetCatalog {
        BetCatalog::standard(TableLimits {
            bet_unit: 10,
            table_limit: 5000,
        })
    }

    fn roll(sum: u8, hard: bool) -> Roll {
        Roll::new(sum, hard)
    }

    // === Predicate Tests ===

    #[test]
    fn test_pass_line_partition_over_all_sums() {
        let catalog = catalog();
        let def = catalog.definition(BetKind::PassLine).unwrap();
        for sum in 2..=12u8 {
            let r = roll(sum, false);
            let resolved = def.wins_on(&r) || def.loses_on(&r);
            match sum {
                7 | 11 => assert!(def.wins_on(&r), "{sum} should win"),
                2 | 3 | 12 => assert!(def.loses_on(&r), "{sum} should lose"),
                _ => assert!(!resolved, "{sum} should neither win nor lose"),
            }
        }
    }

    #[test]
    fn test_hardway_six_wins_only_on_hard_six() {
        let catalog = catalog();
        let def = catalog.definition(BetKind::Hardway(Point::Six)).unwrap();
        assert!(def.wins_on(&roll(6, true)));
        assert!(def.loses_on(&roll(6, false)));
        assert!(def.loses_on(&roll(7, false)));
        assert!(!def.wins_on(&roll(8, true)));
        assert!(!def.loses_on(&roll(8, true)));
    }

    // === Evaluation Tests ===

    #[test]
    fn test_field_payouts() {
        let catalog = catalog();
        let def = catalog.definition(BetKind::Field).unwrap();
        assert_eq!(def.evaluate(&roll(2, true), 25), 50);
        assert_eq!(def.evaluate(&roll(12, true), 25), 75);
        assert_eq!(def.evaluate(&roll(7, false), 25), -25);
        assert_eq!(def.evaluate(&roll(11, false), 25), 25);
        assert_eq!(def.evaluate(&roll(5, false), 25), -25);
    }

    #[test]
    fn test_pass_odds_six_pays_true_odds() {
        let catalog = catalog();
        let def = catalog.definition(BetKind::PassOdds(Point::Six)).unwrap();
        assert_eq!(def.evaluate(&roll(6, false), 100), 120);
        assert_eq!(def.evaluate(&roll(7, false), 100), -100);
        assert_eq!(def.evaluate(&roll(9, false), 100), 0);
        assert_eq!(def.max_odds, Some(5));
    }

    #[test]
    fn test_place_four_pays_double_less_vig() {
        let catalog = catalog();
        let def = catalog.definition(BetKind::Place(Point::Four)).unwrap();
        assert_eq!(def.evaluate(&roll(4, false), 25), 48);
    }

    #[test]
    fn test_max_odds_by_point() {
        let catalog = catalog();
        for (point, expected) in Point::ALL.into_iter().zip([3, 4, 5, 5, 4, 3]) {
            let def = catalog.definition(BetKind::PassOdds(point)).unwrap();
            assert_eq!(def.max_odds, Some(expected), "point {point}");
        }
    }

    // === Validation Tests ===

    #[test]
    fn test_place_six_rounds_up_before_acceptance() {
        let catalog = catalog();
        assert_eq!(catalog.validate(BetKind::Place(Point::Six), 20).unwrap(), 24);
        assert_eq!(catalog.validate(BetKind::Place(Point::Six), 24).unwrap(), 24);
    }

    #[test]
    fn test_field_accepts_any_amount_in_range() {
        let catalog = catalog();
        assert_eq!(catalog.validate(BetKind::Field, 23).unwrap(), 23);
    }

    #[test]
    fn test_amount_outside_range_rejected() {
        let catalog = catalog();
        assert!(matches!(
            catalog.validate(BetKind::PassLine, 5),
            Err(BetError::InvalidBetAmount { .. })
        ));
        assert!(matches!(
            catalog.validate(BetKind::PassLine, 5001),
            Err(BetError::InvalidBetAmount { .. })
        ));
    }

    #[test]
    fn test_no_hardway_on_five_or_nine() {
        let catalog = catalog();
        assert!(catalog.definition(BetKind::Hardway(Point::Five)).is_none());
        assert!(matches!(
            catalog.validate(BetKind::Hardway(Point::Nine), 25),
            Err(BetError::UnknownBet { .. })
        ));
    }
}
