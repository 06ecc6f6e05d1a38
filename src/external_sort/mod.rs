pub mod chunk;
pub mod config;
pub mod constants;
pub mod error;
pub mod merger;
pub mod processor;
pub mod record;


pub use config::ExternalSortConfig;
pub use error::SortError;
pub use processor::{ExternalSortProcessor, SortOutcome};
pub use record::LineRecord;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::storage::OsStorage;

#[derive(Debug, Clone, Default)]
pub struct ExternalSortStats {
    pub total_records: u64,
    pub chunks_created: usize,
    pub sort_time_ms: u64,
    pub merge_time_ms: u64,
    pub processing_time_ms: u64,
}

/// Sorts `input` into `output` on the real file system.
pub async fn sort_file(
    input: &Path,
    output: &Path,
    config: ExternalSortConfig,
) -> Result<SortOutcome> {
    config.validate()?;
    let processor = ExternalSortProcessor::new(config, Arc::new(OsStorage));
    Ok(processor.sort(input, output).await?)
}
