use std::io::Error;
use std::path::Path;

/// Writes a revenue CSV with the given `(loan, revenue)` rows.
pub fn write_revenue_csv(path: &Path, rows: &[(&str, &str)]) -> Result<(), Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["loan", "revenue"])?;
    for (loan, revenue) in rows {
        wtr.write_record([loan, revenue])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `rows` revenue events spread over `loans` loans, each of revenue 1000.
pub fn generate_revenue_csv(path: &Path, rows: usize, loans: usize) -> Result<(), Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["loan", "revenue"])?;
    for i in 0..rows {
        wtr.write_record([format!("loan-{}", i % loans), "1000".to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}
