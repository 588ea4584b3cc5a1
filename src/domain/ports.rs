use super::instruction::RepaymentInstruction;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failures reported by a ledger when submitting an instruction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("instruction rejected: {0}")]
    Rejected(String),
    #[error("insufficient authority to sign the repayment")]
    InsufficientAuthority,
}

/// Identifier the ledger assigns to an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of the authority that signs the submission.
///
/// Key material stays with the ledger adapter; only the handle travels here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SigningCredential(pub String);

impl fmt::Display for SigningCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The external ledger program that records repayments.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn submit(
        &self,
        instruction: &RepaymentInstruction,
        credential: &SigningCredential,
    ) -> Result<TransactionId, SubmissionError>;
}

pub type LedgerClientBox = Box<dyn LedgerClient>;
