use crate::error::RepaymentError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Denominator of a basis-point rate: 10_000 bps = 100%.
pub const BASIS_POINTS_DIVISOR: u16 = 10_000;

/// Rate used when none is configured (25%).
pub const DEFAULT_REPAYMENT_RATE_BPS: u16 = 2_500;

/// A revenue figure in the smallest currency unit.
///
/// Always a whole, non-negative number of units that fits in a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct RevenueAmount(u64);

impl RevenueAmount {
    pub fn new(units: u64) -> Self {
        Self(units)
    }

    pub fn units(&self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for RevenueAmount {
    type Error = RepaymentError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value).map(Self).map_err(|_| {
            RepaymentError::InvalidArgument(format!(
                "revenue amount must be non-negative, got {value}"
            ))
        })
    }
}

impl TryFrom<Decimal> for RevenueAmount {
    type Error = RepaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(RepaymentError::InvalidArgument(format!(
                "revenue amount must be non-negative, got {value}"
            )));
        }
        let units = whole_units(value, "revenue amount")?;
        units.to_u64().map(Self).ok_or_else(|| {
            RepaymentError::InvalidArgument(format!(
                "revenue amount {value} exceeds the 64-bit ledger range"
            ))
        })
    }
}

impl fmt::Display for RevenueAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A repayment rate in basis points, within `[0, 10000]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct BasisPoints(u16);

impl BasisPoints {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(BASIS_POINTS_DIVISOR);

    pub fn new(bps: u16) -> Result<Self, RepaymentError> {
        if bps <= BASIS_POINTS_DIVISOR {
            Ok(Self(bps))
        } else {
            Err(RepaymentError::InvalidArgument(format!(
                "repayment rate must be within [0, {BASIS_POINTS_DIVISOR}] bps, got {bps}"
            )))
        }
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl Default for BasisPoints {
    fn default() -> Self {
        Self(DEFAULT_REPAYMENT_RATE_BPS)
    }
}

impl TryFrom<u16> for BasisPoints {
    type Error = RepaymentError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for BasisPoints {
    type Error = RepaymentError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .map_err(|_| {
                RepaymentError::InvalidArgument(format!(
                    "repayment rate must be within [0, {BASIS_POINTS_DIVISOR}] bps, got {value}"
                ))
            })
            .and_then(Self::new)
    }
}

impl TryFrom<Decimal> for BasisPoints {
    type Error = RepaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        let bps = whole_units(value, "repayment rate")?;
        bps.to_i64()
            .ok_or_else(|| {
                RepaymentError::InvalidArgument(format!(
                    "repayment rate must be within [0, {BASIS_POINTS_DIVISOR}] bps, got {value}"
                ))
            })
            .and_then(Self::try_from)
    }
}

impl From<BasisPoints> for u16 {
    fn from(bps: BasisPoints) -> Self {
        bps.0
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0)
    }
}

/// A revenue event together with the rate applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePayment {
    pub revenue: RevenueAmount,
    pub rate: BasisPoints,
}

impl RevenuePayment {
    pub fn new(revenue: RevenueAmount, rate: BasisPoints) -> Self {
        Self { revenue, rate }
    }

    /// Validates raw decimal inputs, rejecting negative, fractional and
    /// out-of-range values.
    pub fn try_from_raw(revenue: Decimal, rate: Decimal) -> Result<Self, RepaymentError> {
        Ok(Self {
            revenue: revenue.try_into()?,
            rate: rate.try_into()?,
        })
    }
}

fn whole_units(value: Decimal, field: &str) -> Result<Decimal, RepaymentError> {
    if value.fract().is_zero() {
        Ok(value.trunc())
    } else {
        Err(RepaymentError::InvalidArgument(format!(
            "{field} must be a whole number of units, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_basis_points_bounds() {
        assert!(BasisPoints::new(0).is_ok());
        assert!(BasisPoints::new(10_000).is_ok());
        assert!(matches!(
            BasisPoints::new(10_001),
            Err(RepaymentError::InvalidArgument(_))
        ));
        assert!(matches!(
            BasisPoints::try_from(-1i64),
            Err(RepaymentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_default_rate_is_quarter() {
        assert_eq!(BasisPoints::default().value(), 2_500);
    }

    #[test]
    fn test_revenue_rejects_negative() {
        assert!(matches!(
            RevenueAmount::try_from(-1i64),
            Err(RepaymentError::InvalidArgument(_))
        ));
        assert!(matches!(
            RevenueAmount::try_from(dec!(-1)),
            Err(RepaymentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_fractional_inputs_rejected() {
        assert!(matches!(
            RevenueAmount::try_from(dec!(100.5)),
            Err(RepaymentError::InvalidArgument(_))
        ));
        assert!(matches!(
            BasisPoints::try_from(dec!(2500.5)),
            Err(RepaymentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_trailing_zero_scale_is_whole() {
        assert_eq!(
            RevenueAmount::try_from(dec!(200000.00)).unwrap(),
            RevenueAmount::new(200_000)
        );
        assert_eq!(BasisPoints::try_from(dec!(2500.0)).unwrap().value(), 2_500);
    }

    #[test]
    fn test_revenue_beyond_u64_rejected() {
        let too_big = Decimal::from(u64::MAX) + dec!(1);
        assert!(matches!(
            RevenueAmount::try_from(too_big),
            Err(RepaymentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_revenue_payment_from_raw() {
        let payment = RevenuePayment::try_from_raw(dec!(200000), dec!(2500)).unwrap();
        assert_eq!(payment.revenue.units(), 200_000);
        assert_eq!(payment.rate.value(), 2_500);

        assert!(RevenuePayment::try_from_raw(dec!(100), dec!(10001)).is_err());
    }

    #[test]
    fn test_basis_points_deserialization_validates() {
        let ok: BasisPoints = serde_json::from_str("2500").unwrap();
        assert_eq!(ok.value(), 2_500);
        assert!(serde_json::from_str::<BasisPoints>("10001").is_err());
    }
}
