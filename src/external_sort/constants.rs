pub const DEFAULT_MAX_LINES_PER_CHUNK: usize = 1_000_000;
pub const DEFAULT_IO_BUFFER_SIZE_KB: usize = 64;

pub const MIN_LINES_PER_CHUNK: usize = 1;
pub const MAX_LINES_PER_CHUNK: usize = 100_000_000;
pub const MIN_IO_BUFFER_SIZE_KB: usize = 4;
pub const MAX_IO_BUFFER_SIZE_KB: usize = 16_384;

pub const BYTES_PER_KB: usize = 1024;
pub const BYTES_PER_MB: usize = 1024 * 1024;

pub const CHUNK_FILE_PREFIX: &str = "chunk_";
pub const CHUNK_FILE_EXTENSION: &str = ".txt";
pub const TEMP_DIR_NAME: &str = "linesift_temp";

pub const OUTPUT_BUFFER_SIZE_KB: usize = 512;

pub const GENERATOR_DEFAULT_SIZE_MB: f64 = 50.0;
pub const GENERATOR_AVG_LINE_BYTES: u64 = 20;
pub const GENERATOR_SIZE_CHECK_INTERVAL_LINES: u64 = 10_000;
pub const GENERATOR_MAX_SEQUENCE: i64 = 1_000_000;
pub const GENERATOR_DUPLICATES_PER_KEY: usize = 1000;
