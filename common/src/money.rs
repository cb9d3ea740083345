//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a zero [`Money`] amount in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Adds the provided [`Money`] to this one.
    ///
    /// [`None`] is returned on [`Currency`] mismatch or overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        if self.currency != rhs.currency {
            return None;
        }
        Some(Self {
            amount: self.amount.checked_add(rhs.amount)?,
            currency: self.currency,
        })
    }

    /// Subtracts the provided [`Money`] from this one.
    ///
    /// [`None`] is returned on [`Currency`] mismatch or overflow.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        if self.currency != rhs.currency {
            return None;
        }
        Some(Self {
            amount: self.amount.checked_sub(rhs.amount)?,
            currency: self.currency,
        })
    }

    /// Indicates whether this [`Money`] amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        let code = currency.code();
        match amount.is_integer().then(|| amount.to_i128()).flatten() {
            Some(int) => write!(f, "{int}{code}"),
            None => write!(f, "{}{code}", amount.normalize()),
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency = Currency::from_code(currency).ok_or("invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "Pound Sterling."]
        Gbp = 3,
    }
}

impl Currency {
    /// Returns the three-letter ISO 4217 code of this [`Currency`].
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    /// Parses a three-letter ISO 4217 code (case-insensitive).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        [Self::Usd, Self::Eur, Self::Gbp]
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn usd(s: &str) -> Money {
        Money {
            amount: decimal(s),
            currency: Currency::Usd,
        }
    }

    #[test]
    fn from_str() {
        assert_eq!(Money::from_str("123.45USD").unwrap(), usd("123.45"));
        assert_eq!(
            Money::from_str("99GBP").unwrap(),
            Money {
                amount: decimal("99"),
                currency: Currency::Gbp,
            },
        );
        assert_eq!(Money::from_str("10.5eur").unwrap().currency, Currency::Eur);

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Us").is_err());
        assert!(Money::from_str("123.45Usdollar").is_err());
        assert!(Money::from_str("abcUSD").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(usd("123.45").to_string(), "123.45USD");
        assert_eq!(usd("123.00").to_string(), "123USD");
        assert_eq!(usd("123.50").to_string(), "123.5USD");
        assert_eq!(usd("-20").to_string(), "-20USD");
    }

    #[test]
    fn arithmetic_requires_same_currency() {
        assert_eq!(usd("10").checked_add(usd("2.5")), Some(usd("12.5")));
        assert_eq!(usd("10").checked_sub(usd("12")), Some(usd("-2")));
        assert!(usd("10").checked_sub(usd("12")).unwrap().is_negative());
        assert!(!Money::zero(Currency::Usd).is_negative());

        let eur = Money::zero(Currency::Eur);
        assert_eq!(usd("10").checked_add(eur), None);
        assert_eq!(usd("10").checked_sub(eur), None);
    }
}
