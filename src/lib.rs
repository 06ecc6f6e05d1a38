// External sort engine - the main implementation
pub mod external_sort;

// File capability the engine runs against
pub mod storage;

// Synthetic test-data generator
pub mod generator;

// Logging and formatting helpers
pub mod utils;

// Re-export main types for convenience
pub use external_sort::{
    ExternalSortConfig, ExternalSortProcessor, ExternalSortStats, LineRecord, SortError,
    SortOutcome,
};
pub use storage::{MemoryStorage, OsStorage, Storage};
