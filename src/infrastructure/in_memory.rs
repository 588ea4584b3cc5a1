use crate::domain::instruction::{LoanReference, RepaymentInstruction};
use crate::domain::ports::{LedgerClient, SigningCredential, SubmissionError, TransactionId};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An instruction accepted by [`InMemoryLedger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub transaction: TransactionId,
    pub instruction: RepaymentInstruction,
    pub signed_by: SigningCredential,
}

/// A thread-safe in-process ledger.
///
/// Records every accepted instruction and hands out sequential transaction ids
/// (`tx-000001`, `tx-000002`, ...). Clones share the same journal, so a test can
/// keep one handle while the service owns another. Used for tests and dry runs.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    journal: Arc<RwLock<Vec<LedgerEntry>>>,
    authority: Option<SigningCredential>,
    rejected_loans: HashSet<LoanReference>,
}

impl InMemoryLedger {
    /// Creates an empty ledger that accepts any credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept submissions signed by `authority`.
    pub fn with_authority(mut self, authority: SigningCredential) -> Self {
        self.authority = Some(authority);
        self
    }

    /// Reject every submission for `loan`.
    pub fn reject_loan(mut self, loan: LoanReference) -> Self {
        self.rejected_loans.insert(loan);
        self
    }

    /// Snapshot of the accepted submissions, oldest first.
    pub async fn submissions(&self) -> Vec<LedgerEntry> {
        self.journal.read().await.clone()
    }

    /// Sum of everything remitted for `loan`.
    pub async fn total_remitted(&self, loan: &LoanReference) -> u64 {
        self.journal
            .read()
            .await
            .iter()
            .filter(|entry| entry.instruction.source_loan_reference() == loan)
            .map(|entry| entry.instruction.amount_to_remit())
            .sum()
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn submit(
        &self,
        instruction: &RepaymentInstruction,
        credential: &SigningCredential,
    ) -> Result<TransactionId, SubmissionError> {
        if self
            .authority
            .as_ref()
            .is_some_and(|authority| authority != credential)
        {
            return Err(SubmissionError::InsufficientAuthority);
        }
        if self
            .rejected_loans
            .contains(instruction.source_loan_reference())
        {
            return Err(SubmissionError::Rejected(format!(
                "loan {} does not accept repayments",
                instruction.source_loan_reference()
            )));
        }

        let mut journal = self.journal.write().await;
        let transaction = TransactionId(format!("tx-{:06}", journal.len() + 1));
        journal.push(LedgerEntry {
            transaction: transaction.clone(),
            instruction: instruction.clone(),
            signed_by: credential.clone(),
        });
        Ok(transaction)
    }
}
