pub mod core;
pub mod error;
pub mod report;
pub mod scheduler;
pub mod sim;

pub use crate::core::{ProcessRecord, ProcessState, SchedEvent};
pub use error::{Result, SimError};
pub use scheduler::Scheduler;
pub use sim::{ProcessSpec, Schedule, Sim, SimConfig, run};
