use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::external_sort::chunk::{cleanup_chunks, ChunkProducer};
use crate::external_sort::merger::ChunkMerger;
use crate::external_sort::{ExternalSortConfig, ExternalSortStats, SortError};
use crate::storage::Storage;

/// Result of a sort run.
#[derive(Debug)]
pub enum SortOutcome {
    Completed(ExternalSortStats),
    /// The input path does not exist. An expected operational condition
    /// reported as a no-op outcome, not an error.
    MissingInput,
}

/// Coordinates the two sequential phases: chunking fully completes before
/// merging begins, and no sort state is shared between logical tasks.
///
/// Output is written in place, append-only. A failure mid-merge can leave a
/// partially written output file; it is never corrupted by seeking or
/// rewriting.
pub struct ExternalSortProcessor {
    config: ExternalSortConfig,
    storage: Arc<dyn Storage>,
    producer: ChunkProducer,
    merger: ChunkMerger,
}

impl ExternalSortProcessor {
    /// Expects a validated config; see [`ExternalSortConfig::validate`].
    pub fn new(config: ExternalSortConfig, storage: Arc<dyn Storage>) -> Self {
        let producer = ChunkProducer::new(
            config.max_lines_per_chunk,
            config.io_buffer_size_bytes(),
            config.temp_directory.clone(),
        );
        let merger = ChunkMerger::new(config.io_buffer_size_bytes());

        Self {
            config,
            storage,
            producer,
            merger,
        }
    }

    /// Sorts `input` into `output`.
    ///
    /// If chunking produces zero chunk files the input had no lines; the
    /// input is then copied to the output byte-for-byte (preserving, for
    /// example, the absence of a trailing newline) instead of opening a
    /// merge with no sources. Otherwise the chunks are merged and deleted
    /// best-effort afterward.
    pub async fn sort(&self, input: &Path, output: &Path) -> Result<SortOutcome, SortError> {
        if !self.storage.exists(input) {
            info!(input = %input.display(), "input file does not exist, nothing to sort");
            return Ok(SortOutcome::MissingInput);
        }

        let start = Instant::now();
        info!(
            input = %input.display(),
            output = %output.display(),
            max_lines_per_chunk = self.config.max_lines_per_chunk,
            "starting external sort"
        );

        let chunk_files = self
            .producer
            .split_into_chunks(self.storage.as_ref(), input)
            .await?;
        let sort_time_ms = start.elapsed().as_millis() as u64;

        if chunk_files.is_empty() {
            self.storage.copy(input, output)?;
            info!("input was empty, copied verbatim to output");
            return Ok(SortOutcome::Completed(ExternalSortStats {
                total_records: 0,
                chunks_created: 0,
                sort_time_ms,
                merge_time_ms: 0,
                processing_time_ms: start.elapsed().as_millis() as u64,
            }));
        }

        info!(chunks = chunk_files.len(), "chunk phase complete, merging");

        let merge_start = Instant::now();
        let merge_result = self
            .merger
            .merge_chunks(self.storage.as_ref(), &chunk_files, output)
            .await;

        // Chunks are transient either way; a failed merge still cleans up.
        cleanup_chunks(self.storage.as_ref(), &chunk_files);

        let total_records = merge_result?;

        let stats = ExternalSortStats {
            total_records,
            chunks_created: chunk_files.len(),
            sort_time_ms,
            merge_time_ms: merge_start.elapsed().as_millis() as u64,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            records = stats.total_records,
            chunks = stats.chunks_created,
            elapsed_ms = stats.processing_time_ms,
            "external sort complete"
        );

        Ok(SortOutcome::Completed(stats))
    }
}
