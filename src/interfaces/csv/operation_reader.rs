use crate::domain::operation::Operation;
use crate::error::{HotelError, Result};
use std::io::Read;

/// Reads hotel operations from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<Operation>`.
/// Whitespace is trimmed and rows may omit trailing columns they do not use.
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OperationReader<R> {
    /// Creates a new `OperationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes operations.
    pub fn operations(self) -> impl Iterator<Item = Result<Operation>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(HotelError::from))
    }
}
