//! CSV item source and submission writer.
//!
//! The input format is one header row followed by
//! `PresentId,Dimension1,Dimension2,Dimension3` records; the output is
//! one header row followed by `PresentId,x1,y1,z1,...,x8,y8,z8` records,
//! one per placed box, streamed layer by layer.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use layerpack_core::{Error, Item, Result};

use crate::layer::Layer;
use crate::sink::PlacementSink;

/// Streaming reader for the item CSV.
///
/// Yields items one at a time in file order; iteration stops at end of
/// file or at the first malformed record.
pub struct CsvItemSource<R: Read> {
    reader: csv::Reader<R>,
}

impl CsvItemSource<File> {
    /// Opens an item CSV on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> CsvItemSource<R> {
    /// Wraps any reader producing the item CSV format.
    pub fn new(inner: R) -> Self {
        Self {
            reader: csv::ReaderBuilder::new().has_headers(true).from_reader(inner),
        }
    }

    fn parse_record(record: &csv::StringRecord) -> Result<Item> {
        if record.len() != 4 {
            return Err(Error::Csv(format!(
                "expected 4 fields per item record, got {}",
                record.len()
            )));
        }
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();
        let id: u64 = field(0)
            .parse()
            .map_err(|_| Error::Csv(format!("bad item id {:?}", field(0))))?;
        let mut dims = [0u32; 3];
        for (slot, idx) in dims.iter_mut().zip(1..4) {
            *slot = field(idx)
                .parse()
                .map_err(|_| Error::Csv(format!("bad dimension {:?} for item {}", field(idx), id)))?;
        }
        Item::new(id, dims[0], dims[1], dims[2])
    }
}

impl<R: Read> Iterator for CsvItemSource<R> {
    type Item = Result<Item>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.records().next()? {
            Ok(record) => Some(Self::parse_record(&record)),
            Err(e) => Some(Err(Error::Csv(e.to_string()))),
        }
    }
}

/// Sink that writes the submission CSV, inverting z against the
/// run-wide `max_z` supplied at construction (normally obtained from a
/// preceding measuring pass).
pub struct SubmissionWriter<W: Write> {
    writer: csv::Writer<W>,
    max_z: u32,
}

impl<W: Write> SubmissionWriter<W> {
    /// Creates the writer and emits the header row.
    pub fn new(inner: W, max_z: u32) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(inner);

        let mut header = vec!["PresentId".to_string()];
        for i in 1..=8 {
            header.push(format!("x{}", i));
            header.push(format!("y{}", i));
            header.push(format!("z{}", i));
        }
        writer
            .write_record(&header)
            .map_err(|e| Error::Csv(e.to_string()))?;

        Ok(Self { writer, max_z })
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| Error::Csv(e.to_string()))
    }
}

impl<W: Write> PlacementSink for SubmissionWriter<W> {
    fn emit_layer(&mut self, layer: &Layer) -> Result<()> {
        for record in layer.records(self.max_z) {
            let mut row = Vec::with_capacity(25);
            row.push(record.id.to_string());
            for vertex in &record.vertices {
                row.push(vertex[0].to_string());
                row.push(vertex[1].to_string());
                row.push(vertex[2].to_string());
            }
            self.writer
                .write_record(&row)
                .map_err(|e| Error::Csv(e.to_string()))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
