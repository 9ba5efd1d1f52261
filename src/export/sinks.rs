use crate::errors::ConsoleError;
use crate::record::Row;
use std::io::Write;

/// Formatting/IO behind the local export pipeline.
pub trait RowSink {
    fn write_row(&mut self, row: &Row) -> Result<(), ConsoleError>;
    fn finish(&mut self) -> Result<(), ConsoleError>;
}

/// CSV with a header row taken from the dataset's column order.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    columns: &'static [&'static str],
}

impl<W: Write> CsvSink<W> {
    /// # Errors
    /// Returns an error if the header row cannot be written.
    pub fn new(writer: W, columns: &'static [&'static str]) -> Result<Self, ConsoleError> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(columns)?;
        Ok(Self { writer, columns })
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_row(&mut self, row: &Row) -> Result<(), ConsoleError> {
        let record: Vec<String> = self.columns.iter().map(|c| row.render(c)).collect();
        self.writer.write_record(&record)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ConsoleError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// One JSON object per line.
pub struct NdjsonSink<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonSink<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> RowSink for NdjsonSink<W> {
    fn write_row(&mut self, row: &Row) -> Result<(), ConsoleError> {
        serde_json::to_writer(&mut self.writer, row)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ConsoleError> {
        self.writer.flush()?;
        Ok(())
    }
}
