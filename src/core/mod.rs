pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::SchedEvent;
pub use observer::Observer;
pub use state::{Pid, ProcIdx, ProcessRecord, ProcessState, SimCtx, StateTimes, Ticks};
