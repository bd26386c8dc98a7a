use std::collections::VecDeque;

use super::{ProcIdx, Scheduler, SimCtx};

/// First come, first served by ready-queue join order.
pub struct FifoScheduler {
    ready: VecDeque<ProcIdx>,
}

impl Scheduler for FifoScheduler {
    fn init(ctx: &SimCtx) -> Self {
        Self {
            ready: VecDeque::with_capacity(ctx.core_capacity),
        }
    }

    fn name(&self) -> &'static str {
        "fifo"
    }

    fn enqueue(&mut self, _ctx: &SimCtx, proc: ProcIdx) {
        self.ready.push_back(proc);
    }

    fn pick_next(&mut self, _ctx: &SimCtx) -> Option<ProcIdx> {
        self.ready.pop_front()
    }

    fn queued(&self) -> usize {
        self.ready.len()
    }
}
