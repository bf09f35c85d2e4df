//! Row source: whole-file read followed by lazy CSV tokenization.

use csv::{ByteRecord, ByteRecordsIntoIter, ReaderBuilder, StringRecord};
use log::debug;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Read the whole file at `path` into memory.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let file_error = |source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(file_error)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data).map_err(file_error)?;

    debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Yields raw rows from an in-memory Stages log, one at a time.
///
/// Rows may have any number of fields; there is no header row. Bytes that aren't valid
/// UTF-8 are replaced with U+FFFD rather than failing the row.
pub struct RowSource {
    records: ByteRecordsIntoIter<Cursor<Vec<u8>>>,
}

impl RowSource {
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(Cursor::new(data));

        Self {
            records: reader.into_byte_records(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_bytes(read_file(path)?))
    }
}

impl Iterator for RowSource {
    type Item = Result<StringRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records
            .next()
            .map(|record| Ok(decode_lossy(&record?)))
    }
}

fn decode_lossy(record: &ByteRecord) -> StringRecord {
    if let Ok(record) = StringRecord::from_byte_record(record.clone()) {
        return record;
    }

    debug!(
        "Replacing invalid UTF-8 in row at line {}",
        record.position().map_or(0, |pos| pos.line())
    );
    record.iter().map(String::from_utf8_lossy).collect()
}
