use crate::domain::calculator::build_repayment_instruction;
use crate::domain::compliance::RemittanceValidator;
use crate::domain::instruction::{LoanReference, RepaymentInstruction};
use crate::domain::payment::{BasisPoints, RevenueAmount};
use crate::domain::ports::{LedgerClientBox, SigningCredential, TransactionId};
use crate::error::{RepaymentError, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Outcome of a processed revenue event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemittanceReceipt {
    pub instruction: RepaymentInstruction,
    /// `None` when there was nothing to remit and the ledger was not called.
    pub transaction: Option<TransactionId>,
}

/// Turns revenue events into ledger submissions.
///
/// `RepaymentService` owns the ledger port, the configured repayment rate and
/// the compliance rules checked before submission. It allows at most one in-flight submission per loan; a concurrent request
/// for a loan that is already being repaid fails with
/// [`RepaymentError::RepaymentInFlight`] instead of queueing.
pub struct RepaymentService {
    ledger: LedgerClientBox,
    rate: BasisPoints,
    validator: RemittanceValidator,
    in_flight: Arc<Mutex<HashSet<LoanReference>>>,
}

impl RepaymentService {
    /// Creates a new `RepaymentService`.
    ///
    /// # Arguments
    ///
    /// * `ledger` - The client used to submit instructions.
    /// * `rate` - Share of each revenue event owed to the lender.
    pub fn new(ledger: LedgerClientBox, rate: BasisPoints) -> Self {
        Self {
            ledger,
            rate,
            validator: RemittanceValidator::new(),
            in_flight: Arc::default(),
        }
    }

    /// Checks every instruction against `validator` before submitting it.
    pub fn with_validator(mut self, validator: RemittanceValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn rate(&self) -> BasisPoints {
        self.rate
    }

    /// Computes the repayment owed on `revenue` and submits it for `loan`.
    ///
    /// Submission errors are returned as-is and never retried.
    pub async fn process_revenue_payment(
        &self,
        loan: &str,
        revenue: RevenueAmount,
        credential: &SigningCredential,
    ) -> Result<RemittanceReceipt> {
        let instruction = build_repayment_instruction(loan, revenue, self.rate)?;
        self.validator.validate(&instruction)?;

        if instruction.is_empty() {
            tracing::debug!(loan = %instruction.source_loan_reference(), "nothing to remit");
            return Ok(RemittanceReceipt {
                instruction,
                transaction: None,
            });
        }

        let _guard = InFlightGuard::acquire(&self.in_flight, instruction.source_loan_reference())?;

        match self.ledger.submit(&instruction, credential).await {
            Ok(transaction) => {
                tracing::info!(
                    loan = %instruction.source_loan_reference(),
                    amount = instruction.amount_to_remit(),
                    tx = %transaction,
                    "repayment submitted"
                );
                Ok(RemittanceReceipt {
                    instruction,
                    transaction: Some(transaction),
                })
            }
            Err(e) => {
                tracing::warn!(
                    loan = %instruction.source_loan_reference(),
                    error = %e,
                    "repayment submission failed"
                );
                Err(e.into())
            }
        }
    }
}

/// Marks a loan as in flight until dropped.
struct InFlightGuard {
    loans: Arc<Mutex<HashSet<LoanReference>>>,
    loan: LoanReference,
}

impl InFlightGuard {
    fn acquire(loans: &Arc<Mutex<HashSet<LoanReference>>>, loan: &LoanReference) -> Result<Self> {
        if !lock(loans).insert(loan.clone()) {
            return Err(RepaymentError::RepaymentInFlight(loan.clone()));
        }
        Ok(Self {
            loans: Arc::clone(loans),
            loan: loan.clone(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.loans).remove(&self.loan);
    }
}

// The set is only touched in short non-panicking sections, so a poisoned lock
// still holds consistent data.
fn lock(loans: &Mutex<HashSet<LoanReference>>) -> MutexGuard<'_, HashSet<LoanReference>> {
    loans.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
