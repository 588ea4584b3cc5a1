//! Domain layer: value objects, the repayment calculator, and the port to the
//! external ledger.

pub mod calculator;
pub mod compliance;
pub mod instruction;
pub mod payment;
pub mod ports;
