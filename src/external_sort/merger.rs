use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::external_sort::constants::*;
use crate::external_sort::error::SortError;
use crate::external_sort::record::LineRecord;
use crate::storage::Storage;

/// Phase two of the external sort: merges K individually sorted chunk files
/// into one globally sorted output stream.
///
/// A min-heap holds at most one cursor per still-open source; each of the R
/// emitted records costs one extraction and at most one insertion, so the
/// merge runs in O(R log K) comparisons with O(K) memory.
pub struct ChunkMerger {
    io_buffer_size: usize,
}

/// The unconsumed head record of one chunk file. Ordering is by record
/// first; ties between equal records break by `chunk_id` ascending so the
/// merge order is deterministic.
#[derive(Debug, PartialEq, Eq)]
struct MergeEntry {
    record: LineRecord,
    chunk_id: usize,
}

impl Ord for MergeEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.record
            .cmp(&other.record)
            .then_with(|| self.chunk_id.cmp(&other.chunk_id))
    }
}

impl PartialOrd for MergeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

type ChunkReader = BufReader<Box<dyn Read + Send>>;

impl ChunkMerger {
    pub fn new(io_buffer_size: usize) -> Self {
        Self { io_buffer_size }
    }

    /// Merges `chunk_files` into `output` and returns the number of records
    /// written. Every source is read to exhaustion; the heap draining to
    /// empty is exactly the condition that all sources are exhausted.
    ///
    /// Deleting the chunk files afterward is the coordinator's job.
    pub async fn merge_chunks(
        &self,
        storage: &dyn Storage,
        chunk_files: &[PathBuf],
        output: &Path,
    ) -> Result<u64, SortError> {
        let mut readers: Vec<ChunkReader> = Vec::with_capacity(chunk_files.len());
        for path in chunk_files {
            readers.push(BufReader::with_capacity(
                self.io_buffer_size,
                storage.open_read(path)?,
            ));
        }

        let mut writer = BufWriter::with_capacity(
            OUTPUT_BUFFER_SIZE_KB * BYTES_PER_KB,
            storage.create_write(output)?,
        );

        let mut heap = BinaryHeap::with_capacity(chunk_files.len());
        for (chunk_id, reader) in readers.iter_mut().enumerate() {
            if let Some(record) = read_next_record(reader)? {
                heap.push(Reverse(MergeEntry { record, chunk_id }));
            }
        }

        let mut records_written: u64 = 0;
        while let Some(Reverse(entry)) = heap.pop() {
            writeln!(writer, "{}", entry.record)?;
            records_written += 1;

            if let Some(record) = read_next_record(&mut readers[entry.chunk_id])? {
                heap.push(Reverse(MergeEntry {
                    record,
                    chunk_id: entry.chunk_id,
                }));
            }
        }

        writer.flush()?;

        debug!(
            sources = chunk_files.len(),
            records = records_written,
            "k-way merge complete"
        );

        Ok(records_written)
    }
}

fn read_next_record(reader: &mut ChunkReader) -> Result<Option<LineRecord>, SortError> {
    let mut line = String::new();
    match reader.read_line(&mut line)? {
        0 => Ok(None), // EOF
        _ => LineRecord::parse(line.trim_end_matches(['\r', '\n'])).map(Some),
    }
}
