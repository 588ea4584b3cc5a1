pub mod remittance_writer;
pub mod revenue_reader;
