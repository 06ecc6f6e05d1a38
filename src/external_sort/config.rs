use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::external_sort::constants::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalSortConfig {
    /// Chunk capacity in records. Larger chunks mean fewer spill files and a
    /// smaller merge fan-out, at the cost of peak memory.
    pub max_lines_per_chunk: usize,
    pub io_buffer_size_kb: usize,
    pub temp_directory: PathBuf,
}

impl Default for ExternalSortConfig {
    fn default() -> Self {
        Self {
            max_lines_per_chunk: DEFAULT_MAX_LINES_PER_CHUNK,
            io_buffer_size_kb: DEFAULT_IO_BUFFER_SIZE_KB,
            temp_directory: std::env::temp_dir().join(TEMP_DIR_NAME),
        }
    }
}

impl ExternalSortConfig {
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_lines_per_chunk < MIN_LINES_PER_CHUNK
            || self.max_lines_per_chunk > MAX_LINES_PER_CHUNK
        {
            return Err(anyhow::anyhow!(
                "Chunk capacity must be between {} and {} lines",
                MIN_LINES_PER_CHUNK,
                MAX_LINES_PER_CHUNK
            ));
        }

        if self.io_buffer_size_kb < MIN_IO_BUFFER_SIZE_KB
            || self.io_buffer_size_kb > MAX_IO_BUFFER_SIZE_KB
        {
            return Err(anyhow::anyhow!(
                "I/O buffer size must be between {} and {} KB",
                MIN_IO_BUFFER_SIZE_KB,
                MAX_IO_BUFFER_SIZE_KB
            ));
        }

        Ok(())
    }

    pub fn io_buffer_size_bytes(&self) -> usize {
        self.io_buffer_size_kb * BYTES_PER_KB
    }
}
