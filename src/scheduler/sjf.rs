use keyed_priority_queue::KeyedPriorityQueue;
use std::cmp::Ordering;

use super::{ProcIdx, Scheduler, SimCtx};
use crate::core::Ticks;

/// Shortest burst first. Equal bursts run in the order they became ready.
pub struct SjfScheduler {
    ready: KeyedPriorityQueue<ProcIdx, BurstKey>,
    next_seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BurstKey {
    burst: Ticks,
    seq: u64,
}

// KeyedPriorityQueue is a max-heap, so the smallest (burst, seq) must compare greatest
impl PartialOrd for BurstKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BurstKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.burst, other.seq).cmp(&(self.burst, self.seq))
    }
}

impl Scheduler for SjfScheduler {
    fn init(_ctx: &SimCtx) -> Self {
        Self {
            ready: KeyedPriorityQueue::new(),
            next_seq: 0,
        }
    }

    fn name(&self) -> &'static str {
        "sjf"
    }

    fn enqueue(&mut self, ctx: &SimCtx, proc: ProcIdx) {
        let key = BurstKey {
            burst: ctx.proc(proc).burst_time,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let replaced = self.ready.push(proc, key);
        debug_assert!(replaced.is_none(), "Process index {proc} enqueued twice");
    }

    fn pick_next(&mut self, _ctx: &SimCtx) -> Option<ProcIdx> {
        self.ready.pop().map(|(proc, _)| proc)
    }

    fn queued(&self) -> usize {
        self.ready.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with(bursts: &[Ticks]) -> SimCtx {
        let mut ctx = SimCtx::new(1);
        for (i, &burst) in bursts.iter().enumerate() {
            ctx.create_process(i as u64 + 1, 0, burst);
        }
        ctx
    }

    #[test]
    fn picks_shortest_burst_first() {
        let ctx = ctx_with(&[6, 2, 4]);
        let mut sched = SjfScheduler::init(&ctx);
        for idx in 0..3 {
            sched.enqueue(&ctx, idx);
        }

        let order: Vec<_> = std::iter::from_fn(|| sched.pick_next(&ctx)).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn equal_bursts_keep_ready_order() {
        let ctx = ctx_with(&[3, 3, 1, 3]);
        let mut sched = SjfScheduler::init(&ctx);
        for idx in [3, 0, 2, 1] {
            sched.enqueue(&ctx, idx);
        }

        let order: Vec<_> = std::iter::from_fn(|| sched.pick_next(&ctx)).collect();
        assert_eq!(order, vec![2, 3, 0, 1]);
        assert_eq!(sched.queued(), 0);
    }
}
