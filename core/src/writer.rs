//! Batched columnar file output.
//!
//! One `BatchWriter` per logical table. Records stream in; every
//! `batch_size` rows a compressed CSV file is closed out and a new one
//! started. Each batch is self-contained (own header row) so the
//! consumer may load files in any order. Files are written to a
//! `.tmp` path and renamed only after the codec stream is finished, so
//! a killed run never leaves a half-written file under the final name.

use crate::config::Compression;
use crate::error::{GenError, GenResult};
use crate::report::TableReport;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

enum Sink {
    Gzip(flate2::write::GzEncoder<File>),
    Snappy(snap::write::FrameEncoder<File>),
    Lz4(lz4_flex::frame::FrameEncoder<File>),
}

impl Sink {
    fn open(file: File, codec: Compression) -> Self {
        match codec {
            Compression::Gzip => {
                Sink::Gzip(flate2::write::GzEncoder::new(file, flate2::Compression::default()))
            }
            Compression::Snappy => Sink::Snappy(snap::write::FrameEncoder::new(file)),
            Compression::Lz4 => Sink::Lz4(lz4_flex::frame::FrameEncoder::new(file)),
        }
    }

    /// Finish the codec stream. Must be called before rename; dropping
    /// an encoder swallows errors.
    fn finish(self) -> io::Result<()> {
        match self {
            Sink::Gzip(enc) => {
                enc.finish()?;
            }
            Sink::Snappy(enc) => {
                enc.into_inner()
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("{}", e.error())))?;
            }
            Sink::Lz4(enc) => {
                enc.finish()
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            }
        }
        Ok(())
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Gzip(enc) => enc.write(buf),
            Sink::Snappy(enc) => enc.write(buf),
            Sink::Lz4(enc) => enc.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Gzip(enc) => enc.flush(),
            Sink::Snappy(enc) => enc.flush(),
            Sink::Lz4(enc) => enc.flush(),
        }
    }
}

struct OpenBatch {
    writer: csv::Writer<Sink>,
    tmp_path: PathBuf,
    final_path: PathBuf,
}

pub struct BatchWriter {
    dir: PathBuf,
    table: String,
    headers: Vec<&'static str>,
    codec: Compression,
    batch_size: usize,
    batch_index: u32,
    rows_in_batch: usize,
    total_rows: u64,
    current: Option<OpenBatch>,
}

impl BatchWriter {
    pub fn new(
        dir: impl Into<PathBuf>,
        table: &str,
        headers: &[&'static str],
        codec: Compression,
        batch_size: usize,
    ) -> Self {
        assert!(batch_size > 0, "batch size must be positive");
        Self {
            dir: dir.into(),
            table: table.to_string(),
            headers: headers.to_vec(),
            codec,
            batch_size,
            batch_index: 0,
            rows_in_batch: 0,
            total_rows: 0,
            current: None,
        }
    }

    fn io_err(&self, source: io::Error) -> GenError {
        GenError::TableIo {
            table: self.table.clone(),
            batch: self.batch_index,
            source,
        }
    }

    fn open_batch(&mut self) -> GenResult<()> {
        let file_name = format!(
            "{}_{:05}.csv.{}",
            self.table,
            self.batch_index,
            self.codec.extension()
        );
        let final_path = self.dir.join(&file_name);
        let tmp_path = self.dir.join(format!("{file_name}.tmp"));

        let file = File::create(&tmp_path).map_err(|e| self.io_err(e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Sink::open(file, self.codec));
        writer.write_record(&self.headers)?;

        self.current = Some(OpenBatch {
            writer,
            tmp_path,
            final_path,
        });
        self.rows_in_batch = 0;
        Ok(())
    }

    fn close_batch(&mut self) -> GenResult<()> {
        let Some(batch) = self.current.take() else {
            return Ok(());
        };
        let OpenBatch {
            writer,
            tmp_path,
            final_path,
        } = batch;

        let sink = writer.into_inner().map_err(|e| {
            self.io_err(io::Error::new(io::ErrorKind::Other, e.to_string()))
        })?;
        sink.finish().map_err(|e| self.io_err(e))?;
        fs::rename(&tmp_path, &final_path).map_err(|e| self.io_err(e))?;

        log::debug!(
            "table={} batch={} rows={} -> {}",
            self.table,
            self.batch_index,
            self.rows_in_batch,
            final_path.display()
        );
        self.batch_index += 1;
        self.rows_in_batch = 0;
        Ok(())
    }

    pub fn write<T: Serialize>(&mut self, record: &T) -> GenResult<()> {
        if self.current.is_none() {
            self.open_batch()?;
        }
        self.current
            .as_mut()
            .expect("batch open")
            .writer
            .serialize(record)?;
        self.rows_in_batch += 1;
        self.total_rows += 1;
        if self.rows_in_batch >= self.batch_size {
            self.close_batch()?;
        }
        Ok(())
    }

    /// Flush the trailing partial batch and return the table totals.
    /// A table that saw zero rows still emits one header-only batch so
    /// the output layout is well-formed.
    pub fn finish(mut self) -> GenResult<TableReport> {
        if self.current.is_none() && self.batch_index == 0 {
            self.open_batch()?;
        }
        self.close_batch()?;
        Ok(TableReport {
            table: self.table.clone(),
            rows: self.total_rows,
            batches: self.batch_index,
        })
    }

    pub fn rows_written(&self) -> u64 {
        self.total_rows
    }
}

impl Drop for BatchWriter {
    fn drop(&mut self) {
        // Abandoned mid-batch (error or panic path): discard the temp
        // file so no corrupt partial output survives under any name.
        if let Some(batch) = self.current.take() {
            let tmp = batch.tmp_path.clone();
            drop(batch);
            let _ = fs::remove_file(tmp);
        }
    }
}
