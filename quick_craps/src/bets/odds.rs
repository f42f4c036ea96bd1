//! Payout arithmetic: pays/for-every triples, vig, and bet rounding.

use crate::game::entities::Dollars;

/// A payout priced as `pays` for every `for_every` dollars staked, with an
/// optional vig taken as an integer percentage of the gross win.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PayoutOdds {
    pays: Dollars,
    for_every: Dollars,
    vig_percent: Dollars,
}

impl PayoutOdds {
    pub const EVEN: Self = Self::new(1, 1);
    pub const DOUBLE: Self = Self::new(2, 1);
    pub const TRIPLE: Self = Self::new(3, 1);
    pub const TWO_TO_ONE: Self = Self::DOUBLE;
    pub const TWO_TO_ONE_VIG_5: Self = Self::with_vig(2, 1, 5);
    pub const THREE_TO_TWO: Self = Self::new(3, 2);
    pub const SIX_TO_FIVE: Self = Self::new(6, 5);
    pub const SEVEN_TO_SIX: Self = Self::new(7, 6);
    pub const SEVEN_TO_FIVE: Self = Self::new(7, 5);
    pub const SEVEN_TO_ONE: Self = Self::new(7, 1);
    pub const NINE_TO_ONE: Self = Self::new(9, 1);

    #[must_use]
    pub const fn new(pays: Dollars, for_every: Dollars) -> Self {
        Self::with_vig(pays, for_every, 0)
    }

    #[must_use]
    pub const fn with_vig(pays: Dollars, for_every: Dollars, vig_percent: Dollars) -> Self {
        Self {
            pays,
            for_every,
            vig_percent,
        }
    }

    #[must_use]
    pub const fn for_every(&self) -> Dollars {
        self.for_every
    }

    /// Gross win minus vig. The vig applies to the computed win, never to
    /// the stake.
    #[must_use]
    pub const fn payout(&self, amount: Dollars) -> Dollars {
        let win = (amount / self.for_every) * self.pays;
        let vig = if self.vig_percent > 0 {
            win * self.vig_percent / 100
        } else {
            0
        };
        win - vig
    }

    /// Round a requested amount up to the next multiple of `for_every`.
    /// Bets priced "for 1" pass through unchanged.
    #[must_use]
    pub const fn round_up(&self, amount: Dollars) -> Dollars {
        if amount % self.for_every == 0 {
            amount
        } else {
            (amount / self.for_every + 1) * self.for_every
        }
    }
}

/// Payout selection: one fixed triple, or a sum-keyed table with a default
/// (the field pays even money except on 2 and 12).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PayoutRule {
    Fixed(PayoutOdds),
    BySum {
        overrides: &'static [(u8, PayoutOdds)],
        default: PayoutOdds,
    },
}

impl PayoutRule {
    #[must_use]
    pub fn odds_for(&self, sum: u8) -> PayoutOdds {
        match self {
            Self::Fixed(odds) => *odds,
            Self::BySum { overrides, default } => overrides
                .iter()
                .find(|(s, _)| *s == sum)
                .map_or(*default, |(_, odds)| *odds),
        }
    }

    #[must_use]
    pub fn payout(&self, sum: u8, amount: Dollars) -> Dollars {
        self.odds_for(sum).payout(amount)
    }

    /// Sum-keyed rules are priced "for 1" and accept any amount; fixed
    /// rules round up to the pricing multiple.
    #[must_use]
    pub const fn appropriate_amount(&self, amount: Dollars) -> Dollars {
        match self {
            Self::Fixed(odds) => odds.round_up(amount),
            Self::BySum { .. } => amount,
        }
    }
}
