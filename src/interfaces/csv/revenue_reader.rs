use crate::error::{RepaymentError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::str::FromStr;

/// One row of the revenue input: revenue booked against a loan.
///
/// Fields are kept raw so that negative or fractional revenue reaches the
/// calculator and is rejected there instead of failing the parse. The loan
/// reference is taken verbatim, surrounding whitespace included.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct RevenueEvent {
    pub loan: String,
    #[serde(deserialize_with = "deserialize_trimmed_decimal")]
    pub revenue: Decimal,
}

fn deserialize_trimmed_decimal<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Decimal::from_str(raw.trim()).map_err(serde::de::Error::custom)
}

/// Reads revenue events from a CSV source.
///
/// Expects the headers `loan, revenue`. Headers and the revenue field are
/// trimmed; record lengths are flexible.
pub struct RevenueReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RevenueReader<R> {
    /// Creates a new `RevenueReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes events.
    pub fn events(self) -> impl Iterator<Item = Result<RevenueEvent>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(RepaymentError::from))
    }
}
