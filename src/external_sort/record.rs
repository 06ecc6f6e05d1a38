use std::cmp::Ordering;
use std::fmt;

use crate::external_sort::error::SortError;

/// One parsed input line: a numeric prefix and a string payload.
///
/// Records order by `key` first (byte-wise, non-locale-aware), then by
/// `sequence` ascending as a tie-break. The same ordering drives both the
/// in-memory chunk sort and the merge heap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub sequence: i64,
    pub key: String,
}

impl LineRecord {
    pub fn new(sequence: i64, key: impl Into<String>) -> Self {
        Self {
            sequence,
            key: key.into(),
        }
    }

    /// Parses a `"<sequence>. <key>"` line.
    ///
    /// The first `.` must exist, must not be the last character, and must be
    /// immediately followed by a space. The prefix (trimmed) must parse as an
    /// integer; everything after the `". "` (trimmed) becomes the key. An
    /// empty key is valid. Any violation fails with
    /// [`SortError::MalformedRecord`] carrying the offending line.
    pub fn parse(line: &str) -> Result<Self, SortError> {
        let malformed = || SortError::MalformedRecord {
            line: line.to_string(),
        };

        let dot = line.find('.').ok_or_else(malformed)?;
        let rest = &line[dot + 1..];
        if !rest.starts_with(' ') {
            return Err(malformed());
        }

        let sequence: i64 = line[..dot].trim().parse().map_err(|_| malformed())?;
        let key = rest[1..].trim().to_string();

        Ok(Self { sequence, key })
    }
}

/// Exact inverse of [`LineRecord::parse`]; the round trip
/// parse -> serialize -> parse is lossless for valid input.
impl fmt::Display for LineRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.sequence, self.key)
    }
}

impl Ord for LineRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .as_bytes()
            .cmp(other.key.as_bytes())
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for LineRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
