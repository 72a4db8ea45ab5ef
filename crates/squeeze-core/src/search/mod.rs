//! Size-targeted quality search.
//!
//! A search walks an ordered schedule of quality levels, encoding once per
//! level, and stops at the first encoding that fits under the size limit.
//! If no level fits, the last attempt (normally the smallest) is kept and
//! flagged as [`SearchStatus::TargetNotMet`].
//!
//! The walk is strictly linear. Encoder size curves are only roughly
//! monotonic, so levels are never skipped or revisited.

mod bounds;
mod schedule;

pub use bounds::{KIB, SizeBounds, format_kb};
pub use schedule::QualitySchedule;

use std::fmt::Debug;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SqueezeError};

/// Output of one encode call.
#[derive(Debug, Clone)]
pub struct Encoded<T> {
    /// Encoded payload (bytes, a scratch path, ...).
    pub output: T,
    /// Size of the payload in bytes.
    pub size: u64,
}

impl Encoded<Vec<u8>> {
    /// Wrap an in-memory encoding, measuring its length.
    pub fn bytes(output: Vec<u8>) -> Self {
        let size = output.len() as u64;
        Self { output, size }
    }
}

/// One level tried during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attempt<L> {
    pub level: L,
    pub size: u64,
}

/// How the chosen attempt relates to the size bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// At or under the maximum (and not below the minimum, if any).
    TargetMet,
    /// At or under the maximum but smaller than the advisory minimum.
    BelowMinimum,
    /// No level fit; the last attempt was kept.
    TargetNotMet,
}

impl SearchStatus {
    /// Whether the size limit was satisfied.
    pub fn is_met(&self) -> bool {
        !matches!(self, SearchStatus::TargetNotMet)
    }
}

/// Result of a search, including the chosen payload.
#[derive(Debug, Clone)]
pub struct SearchOutcome<L, T> {
    pub level: L,
    pub size: u64,
    pub output: T,
    pub status: SearchStatus,
    /// Every attempt in the order it was made.
    pub attempts: Vec<Attempt<L>>,
}

impl<L, T> SearchOutcome<L, T> {
    /// Separate the payload from the report, recording where it was written.
    pub fn into_report(self, path: PathBuf) -> (T, SearchReport<L>) {
        let report = SearchReport {
            path,
            level: self.level,
            size: self.size,
            status: self.status,
            attempts: self.attempts,
        };
        (self.output, report)
    }
}

/// Result of a job once its output has been written.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport<L> {
    /// Where the chosen output was written.
    pub path: PathBuf,
    pub level: L,
    pub size: u64,
    pub status: SearchStatus,
    pub attempts: Vec<Attempt<L>>,
}

/// Run a linear quality search.
///
/// `encode` is called once per level, in schedule order, until an encoding
/// fits `bounds`. Errors returned by `encode` abort the search unchanged.
///
/// # Errors
///
/// Returns [`SqueezeError::InvalidConfiguration`] for an empty schedule or a
/// schedule that repeats a level. Nothing is encoded in that case.
pub fn search<L, T, F>(schedule: &[L], bounds: SizeBounds, mut encode: F) -> Result<SearchOutcome<L, T>>
where
    L: Copy + PartialEq + Debug,
    F: FnMut(L) -> Result<Encoded<T>>,
{
    if schedule.is_empty() {
        return Err(SqueezeError::config("schedule is empty"));
    }
    for (i, level) in schedule.iter().enumerate() {
        if schedule[..i].contains(level) {
            return Err(SqueezeError::config(format!(
                "schedule repeats level {level:?}"
            )));
        }
    }

    let mut attempts = Vec::with_capacity(schedule.len());
    let mut last = None;

    for &level in schedule {
        let encoded = encode(level)?;
        debug!(
            "Tried {:?}: {} (limit {})",
            level,
            format_kb(encoded.size),
            format_kb(bounds.max_bytes())
        );
        attempts.push(Attempt { level, size: encoded.size });

        if bounds.fits(encoded.size) {
            let status = if bounds.below_minimum(encoded.size) {
                SearchStatus::BelowMinimum
            } else {
                SearchStatus::TargetMet
            };
            return Ok(SearchOutcome {
                level,
                size: encoded.size,
                output: encoded.output,
                status,
                attempts,
            });
        }

        last = Some((level, encoded));
    }

    // The schedule is non-empty, so at least one attempt was recorded.
    let (level, encoded) = last.ok_or_else(|| SqueezeError::config("schedule is empty"))?;
    debug!("No level fit; keeping {:?} at {}", level, format_kb(encoded.size));

    Ok(SearchOutcome {
        level,
        size: encoded.size,
        output: encoded.output,
        status: SearchStatus::TargetNotMet,
        attempts,
    })
}
