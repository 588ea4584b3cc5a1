use crate::domain::instruction::LoanReference;
use crate::domain::ports::SubmissionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepaymentError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),
    #[error("Compliance rule {rule} refused the repayment: {reason}")]
    ComplianceViolation { rule: String, reason: String },
    #[error("Repayment already in flight for loan {0}")]
    RepaymentInFlight(LoanReference),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RepaymentError>;
