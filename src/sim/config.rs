use crate::error::{Result, SimError};

/// Order in which `new` processes are offered pending slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdmissionOrder {
    /// Stable sort by arrival time before the run starts.
    #[default]
    ByArrival,
    /// Exactly the order the processes were supplied in.
    AsGiven,
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Maximum number of processes holding a pending slot at once.
    pub core_capacity: usize,
    pub admission: AdmissionOrder,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            core_capacity: 2,
            admission: AdmissionOrder::default(),
        }
    }
}

impl SimConfig {
    pub fn new(core_capacity: usize) -> Self {
        Self {
            core_capacity,
            ..Self::default()
        }
    }

    pub fn with_admission(mut self, admission: AdmissionOrder) -> Self {
        self.admission = admission;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.core_capacity < 1 {
            return Err(SimError::InvalidCapacity(self.core_capacity));
        }
        Ok(())
    }
}
