pub mod config;
pub mod driver;
pub mod input;
pub mod job;
pub mod workload;

pub use config::{AdmissionOrder, SimConfig};
pub use driver::{Schedule, Sim, run};
pub use input::{load_specs, parse_specs};
pub use job::{ProcessSpec, validate_specs};
pub use workload::{BernoulliWorkload, demo_specs};
