use rayon::prelude::*;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::external_sort::constants::*;
use crate::external_sort::error::SortError;
use crate::external_sort::record::LineRecord;
use crate::storage::Storage;

/// Phase one of the external sort: reads the input line-by-line, accumulates
/// parsed records into a capacity-bounded buffer, sorts each full buffer in
/// memory and spills it to its own chunk file in the temp directory.
///
/// Peak memory is O(chunk capacity) regardless of input size; the buffer is
/// the only variable-size in-memory structure in the engine.
pub struct ChunkProducer {
    max_lines_per_chunk: usize,
    io_buffer_size: usize,
    temp_directory: PathBuf,
}

impl ChunkProducer {
    pub fn new(max_lines_per_chunk: usize, io_buffer_size: usize, temp_directory: PathBuf) -> Self {
        Self {
            max_lines_per_chunk,
            io_buffer_size,
            temp_directory,
        }
    }

    /// Splits `input` into sorted chunk files and returns their paths in
    /// creation order. An input with zero lines yields an empty list.
    ///
    /// A malformed line aborts immediately; chunks already spilled by then
    /// are deleted best-effort before the error surfaces.
    pub async fn split_into_chunks(
        &self,
        storage: &dyn Storage,
        input: &Path,
    ) -> Result<Vec<PathBuf>, SortError> {
        let mut chunk_files = Vec::new();
        match self.read_and_spill(storage, input, &mut chunk_files) {
            Ok(()) => Ok(chunk_files),
            Err(e) => {
                cleanup_chunks(storage, &chunk_files);
                Err(e)
            }
        }
    }

    fn read_and_spill(
        &self,
        storage: &dyn Storage,
        input: &Path,
        chunk_files: &mut Vec<PathBuf>,
    ) -> Result<(), SortError> {
        let mut reader = BufReader::with_capacity(self.io_buffer_size, storage.open_read(input)?);
        let mut buffer: Vec<LineRecord> = Vec::new();

        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break; // EOF
            }

            let record = LineRecord::parse(line.trim_end_matches(['\r', '\n']))?;
            buffer.push(record);

            if buffer.len() >= self.max_lines_per_chunk {
                let path =
                    self.sort_and_spill(storage, chunk_files.len(), std::mem::take(&mut buffer))?;
                chunk_files.push(path);
            }
        }

        if !buffer.is_empty() {
            let path = self.sort_and_spill(storage, chunk_files.len(), buffer)?;
            chunk_files.push(path);
        }

        Ok(())
    }

    fn sort_and_spill(
        &self,
        storage: &dyn Storage,
        chunk_id: usize,
        mut records: Vec<LineRecord>,
    ) -> Result<PathBuf, SortError> {
        records.par_sort();

        let chunk_file = self.temp_directory.join(format!(
            "{}{}{}",
            CHUNK_FILE_PREFIX, chunk_id, CHUNK_FILE_EXTENSION
        ));

        let mut writer =
            BufWriter::with_capacity(self.io_buffer_size, storage.create_write(&chunk_file)?);
        for record in &records {
            writeln!(writer, "{}", record)?;
        }
        writer.flush()?;

        debug!(
            chunk = chunk_id,
            records = records.len(),
            path = %chunk_file.display(),
            "spilled sorted chunk"
        );

        Ok(chunk_file)
    }
}

/// Best-effort deletion of chunk files. Failures are logged and swallowed;
/// they affect temporary storage usage, never sort correctness.
pub fn cleanup_chunks(storage: &dyn Storage, chunk_files: &[PathBuf]) {
    for path in chunk_files {
        if let Err(e) = storage.delete(path) {
            warn!(path = %path.display(), error = %e, "failed to delete chunk file");
        }
    }
}
