use rustc_hash::FxHashSet;

use crate::{
    core::state::{Pid, Ticks},
    error::{Result, SimError},
};

/// A process as supplied by the caller, before validation. Times are signed
/// so that negative input can be reported rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSpec {
    pub pid: Pid,
    pub arrival_time: i64,
    pub burst_time: i64,
}

impl ProcessSpec {
    pub fn new(pid: Pid, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
        }
    }

    /// Validated `(arrival, burst)` in ticks.
    pub fn ticks(&self) -> Result<(Ticks, Ticks)> {
        if self.burst_time <= 0 {
            return Err(SimError::invalid_spec(
                self.pid,
                format!("burst time must be positive, got {}", self.burst_time),
            ));
        }
        let arrival = Ticks::try_from(self.arrival_time).map_err(|_| {
            SimError::invalid_spec(
                self.pid,
                format!("arrival time must not be negative, got {}", self.arrival_time),
            )
        })?;
        Ok((arrival, self.burst_time as Ticks))
    }
}

impl From<(Pid, i64, i64)> for ProcessSpec {
    fn from((pid, arrival_time, burst_time): (Pid, i64, i64)) -> Self {
        Self::new(pid, arrival_time, burst_time)
    }
}

pub fn validate_specs(specs: &[ProcessSpec]) -> Result<()> {
    if specs.is_empty() {
        return Err(SimError::EmptyWorkload);
    }

    let mut seen = FxHashSet::default();
    let mut latest_arrival: Ticks = 0;
    let mut total_burst: Ticks = 0;
    for spec in specs {
        let (arrival, burst) = spec.ticks()?;
        if !seen.insert(spec.pid) {
            return Err(SimError::invalid_spec(spec.pid, "duplicate pid"));
        }
        latest_arrival = latest_arrival.max(arrival);
        total_burst = total_burst
            .checked_add(burst)
            .ok_or(SimError::HorizonOverflow)?;
    }

    // The clock never passes the latest arrival plus every burst
    latest_arrival
        .checked_add(total_burst)
        .ok_or(SimError::HorizonOverflow)?;
    Ok(())
}
