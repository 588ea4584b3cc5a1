//! Application layer orchestrating repayments.
//!
//! This module defines the `RepaymentService`, which turns a revenue event into
//! a repayment instruction and hands it to the injected ledger client.

pub mod service;
