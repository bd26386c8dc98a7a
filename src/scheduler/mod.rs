pub mod fifo;
pub mod sjf;

use crate::core::state::{ProcIdx, SimCtx};
pub use fifo::FifoScheduler;
pub use sjf::SjfScheduler;

/// Ready-queue policy. The engine hands over each process as it becomes
/// ready and asks for the next one to run whenever the CPU is free.
pub trait Scheduler {
    fn init(ctx: &SimCtx) -> Self;

    fn name(&self) -> &'static str;

    fn enqueue(&mut self, ctx: &SimCtx, proc: ProcIdx);

    fn pick_next(&mut self, ctx: &SimCtx) -> Option<ProcIdx>;

    fn queued(&self) -> usize;
}
