use super::calculator::compute_repayment;
use super::payment::RevenuePayment;
use crate::error::RepaymentError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle identifying the loan a repayment is credited to.
///
/// Never interpreted here; resolving it to a ledger address is the job of the
/// ledger adapter. Guaranteed non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoanReference(String);

impl LoanReference {
    pub fn new(reference: impl Into<String>) -> Result<Self, RepaymentError> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            Err(RepaymentError::InvalidArgument(
                "loan reference must not be empty".to_string(),
            ))
        } else {
            Ok(Self(reference))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LoanReference {
    type Error = RepaymentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LoanReference> for String {
    fn from(reference: LoanReference) -> Self {
        reference.0
    }
}

impl fmt::Display for LoanReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The remittance to hand to the ledger for one revenue event.
///
/// Only [`build_repayment_instruction`](super::calculator::build_repayment_instruction)
/// creates one, so `amount_to_remit` always equals the repayment owed on
/// `payment` and never exceeds `payment.revenue`. Decoding re-checks the amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInstruction")]
pub struct RepaymentInstruction {
    source_loan_reference: LoanReference,
    amount_to_remit: u64,
    payment: RevenuePayment,
}

impl RepaymentInstruction {
    pub(super) fn new(source_loan_reference: LoanReference, payment: RevenuePayment) -> Self {
        Self {
            source_loan_reference,
            amount_to_remit: compute_repayment(payment.revenue, payment.rate),
            payment,
        }
    }

    pub fn source_loan_reference(&self) -> &LoanReference {
        &self.source_loan_reference
    }

    pub fn amount_to_remit(&self) -> u64 {
        self.amount_to_remit
    }

    /// The revenue event the amount was derived from.
    pub fn payment(&self) -> RevenuePayment {
        self.payment
    }

    /// Whether there is anything to remit.
    pub fn is_empty(&self) -> bool {
        self.amount_to_remit == 0
    }
}

/// Wire shape of a [`RepaymentInstruction`] before its amount is verified.
#[derive(Deserialize)]
struct RawInstruction {
    source_loan_reference: LoanReference,
    amount_to_remit: u64,
    payment: RevenuePayment,
}

impl TryFrom<RawInstruction> for RepaymentInstruction {
    type Error = RepaymentError;

    fn try_from(raw: RawInstruction) -> Result<Self, Self::Error> {
        let instruction = Self::new(raw.source_loan_reference, raw.payment);
        if instruction.amount_to_remit != raw.amount_to_remit {
            return Err(RepaymentError::InvalidArgument(format!(
                "amount to remit {} does not match {} owed on revenue {} at {}",
                raw.amount_to_remit,
                instruction.amount_to_remit,
                raw.payment.revenue,
                raw.payment.rate
            )));
        }
        Ok(instruction)
    }
}
