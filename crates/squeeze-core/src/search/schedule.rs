//! JPEG quality schedules.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SqueezeError};

/// A strictly decreasing list of JPEG qualities in `1..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct QualitySchedule(Vec<u8>);

impl QualitySchedule {
    /// Build a schedule from explicit levels.
    pub fn new(levels: Vec<u8>) -> Result<Self> {
        if levels.is_empty() {
            return Err(SqueezeError::config("quality schedule is empty"));
        }
        if let Some(bad) = levels.iter().find(|q| !(1..=100).contains(*q)) {
            return Err(SqueezeError::config(format!(
                "quality {bad} is outside 1..=100"
            )));
        }
        if levels.windows(2).any(|w| w[1] >= w[0]) {
            return Err(SqueezeError::config(
                "quality schedule must be strictly decreasing",
            ));
        }
        Ok(Self(levels))
    }

    /// `start, start - step, ...` down to and including `floor`.
    pub fn stepped(start: u8, step: u8, floor: u8) -> Result<Self> {
        if step == 0 {
            return Err(SqueezeError::config("quality step must be positive"));
        }
        if floor > start {
            return Err(SqueezeError::config(format!(
                "quality floor {floor} is above start {start}"
            )));
        }
        let levels = (floor..=start).rev().step_by(step as usize).collect();
        Self::new(levels)
    }

    /// Built-in schedules; callers guarantee `0 < step` and `1 <= floor <= start <= 100`.
    pub(crate) fn builtin(start: u8, step: u8, floor: u8) -> Self {
        debug_assert!(step > 0 && (1..=start).contains(&floor) && start <= 100);
        Self((floor..=start).rev().step_by(step as usize).collect())
    }

    pub fn levels(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<u8>> for QualitySchedule {
    type Error = SqueezeError;

    fn try_from(levels: Vec<u8>) -> Result<Self> {
        Self::new(levels)
    }
}

impl From<QualitySchedule> for Vec<u8> {
    fn from(schedule: QualitySchedule) -> Self {
        schedule.0
    }
}
