use std::io;
use thiserror::Error;

/// Failures that abort a sort run.
///
/// Parse and I/O failures on the main read/sort/write path propagate to the
/// caller; there is no partial-result mode. Failures while deleting chunk
/// files after a successful merge are logged and swallowed instead of being
/// surfaced through this type.
#[derive(Debug, Error)]
pub enum SortError {
    /// The input line does not match the `"<sequence>. <key>"` record format.
    #[error("malformed record line: {line:?}")]
    MalformedRecord { line: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}
