//! Revenue-based repayment arithmetic.
//!
//! Everything here is integer-only: the share owed is
//! `floor(revenue * rate_bps / 10_000)`, computed through a 128-bit
//! intermediate so that any `u64` revenue is accepted without overflow.

use super::instruction::{LoanReference, RepaymentInstruction};
use super::payment::{BASIS_POINTS_DIVISOR, BasisPoints, RevenueAmount, RevenuePayment};
use crate::error::Result;
use rust_decimal::Decimal;

/// Computes the amount owed on `revenue` at `rate`.
///
/// Fractional remainders are truncated, so `compute_repayment(7, 25%) == 1`.
pub fn compute_repayment(revenue: RevenueAmount, rate: BasisPoints) -> u64 {
    let owed = u128::from(revenue.units()) * u128::from(rate.value())
        / u128::from(BASIS_POINTS_DIVISOR);
    // rate <= 10_000 keeps owed <= revenue
    owed as u64
}

/// Same as [`compute_repayment`] but validates untyped inputs first.
///
/// # Errors
///
/// [`RepaymentError::InvalidArgument`](crate::error::RepaymentError::InvalidArgument) if `revenue` is negative, fractional or
/// beyond `u64`, or `rate_bps` is fractional or outside `[0, 10000]`.
pub fn compute_repayment_raw(revenue: Decimal, rate_bps: Decimal) -> Result<u64> {
    let payment = RevenuePayment::try_from_raw(revenue, rate_bps)?;
    Ok(compute_repayment(payment.revenue, payment.rate))
}

/// Packages the remittance for `loan_reference` without submitting it.
///
/// # Errors
///
/// [`RepaymentError::InvalidArgument`](crate::error::RepaymentError::InvalidArgument) if `loan_reference` is blank.
pub fn build_repayment_instruction(
    loan_reference: &str,
    revenue: RevenueAmount,
    rate: BasisPoints,
) -> Result<RepaymentInstruction> {
    let source_loan_reference = LoanReference::new(loan_reference)?;
    let instruction =
        RepaymentInstruction::new(source_loan_reference, RevenuePayment::new(revenue, rate));

    tracing::debug!(
        loan = %instruction.source_loan_reference(),
        revenue = revenue.units(),
        rate_bps = rate.value(),
        amount_to_remit = instruction.amount_to_remit(),
        "repayment instruction built"
    );

    Ok(instruction)
}

/// Untyped variant of [`build_repayment_instruction`].
pub fn build_repayment_instruction_raw(
    loan_reference: &str,
    revenue: Decimal,
    rate_bps: Decimal,
) -> Result<RepaymentInstruction> {
    let payment = RevenuePayment::try_from_raw(revenue, rate_bps)?;
    build_repayment_instruction(loan_reference, payment.revenue, payment.rate)
}
