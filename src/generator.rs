use anyhow::Result;
use rand::Rng;
use rayon::prelude::*;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::external_sort::constants::*;
use crate::storage::Storage;

/// Keys drawn by the generator; roughly [`GENERATOR_DUPLICATES_PER_KEY`]
/// consecutive lines share one key, so sorted output exercises the numeric
/// tie-break heavily.
const SAMPLE_KEYS: &[&str] = &[
    "Apple",
    "Banana is yellow",
    "Cherry is the best",
    "Date",
    "Elderberry",
    "Fig",
    "Grape",
    "Honeydew",
    "Something something something",
    "Watermelon",
];

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub size_mb: f64,
    pub io_buffer_size_kb: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size_mb: GENERATOR_DEFAULT_SIZE_MB,
            io_buffer_size_kb: DEFAULT_IO_BUFFER_SIZE_KB,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeneratorReport {
    pub lines_written: u64,
    pub bytes_written: u64,
}

/// Writes a synthetic `"<sequence>. <key>"` input file of roughly
/// `size_mb` megabytes.
///
/// Lines are produced by parallel workers with no ordering guarantee (the
/// sort imposes order downstream). The writer checks the running size every
/// [`GENERATOR_SIZE_CHECK_INTERVAL_LINES`] lines and stops once the target
/// is exceeded, so the actual line count may fall short of the estimate.
pub fn generate_file(
    storage: &dyn Storage,
    output: &Path,
    config: &GeneratorConfig,
) -> Result<GeneratorReport> {
    let target_bytes = (config.size_mb * BYTES_PER_MB as f64) as u64;
    let estimated_lines = (target_bytes / GENERATOR_AVG_LINE_BYTES).max(1);

    let lines: Vec<String> = (0..estimated_lines)
        .into_par_iter()
        .map(|i| {
            let sequence = rand::thread_rng().gen_range(1..=GENERATOR_MAX_SEQUENCE);
            let key = SAMPLE_KEYS[(i as usize / GENERATOR_DUPLICATES_PER_KEY) % SAMPLE_KEYS.len()];
            format!("{}. {}", sequence, key)
        })
        .collect();

    let mut writer = BufWriter::with_capacity(
        config.io_buffer_size_kb * BYTES_PER_KB,
        storage.create_write(output)?,
    );

    let mut report = GeneratorReport::default();
    for line in &lines {
        writeln!(writer, "{}", line)?;
        report.lines_written += 1;
        report.bytes_written += line.len() as u64 + 1;

        if report.lines_written % GENERATOR_SIZE_CHECK_INTERVAL_LINES == 0
            && report.bytes_written > target_bytes
        {
            break;
        }
    }
    writer.flush()?;

    info!(
        path = %output.display(),
        lines = report.lines_written,
        size_mb = report.bytes_written as f64 / BYTES_PER_MB as f64,
        "generated test file"
    );

    Ok(report)
}
