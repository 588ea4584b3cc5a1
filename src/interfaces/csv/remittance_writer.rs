use crate::application::service::RemittanceReceipt;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Flat, output-friendly view of a [`RemittanceReceipt`].
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct RemittanceRecord {
    pub loan: String,
    pub revenue: u64,
    pub rate_bps: u16,
    pub amount: u64,
    pub transaction: Option<String>,
}

impl From<&RemittanceReceipt> for RemittanceRecord {
    fn from(receipt: &RemittanceReceipt) -> Self {
        let instruction = &receipt.instruction;
        Self {
            loan: instruction.source_loan_reference().to_string(),
            revenue: instruction.payment().revenue.units(),
            rate_bps: instruction.payment().rate.value(),
            amount: instruction.amount_to_remit(),
            transaction: receipt.transaction.as_ref().map(ToString::to_string),
        }
    }
}

/// Writes remittance records as CSV with a header row.
pub struct RemittanceWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> RemittanceWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_receipts<'a>(
        &mut self,
        receipts: impl IntoIterator<Item = &'a RemittanceReceipt>,
    ) -> Result<()> {
        for receipt in receipts {
            self.writer.serialize(RemittanceRecord::from(receipt))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
