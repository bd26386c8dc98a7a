use super::state::{ProcessState, SimCtx, Ticks};

/// Checks engine invariants between phases and keeps a few run counters.
#[derive(Debug, Default)]
pub struct Observer {
    idle_ticks: Ticks,
    peak_pending: usize,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    // Called right after admission, when the pending set is at its fullest
    pub fn observe_admission(&mut self, ctx: &SimCtx) {
        debug_assert!(
            ctx.pending.len() <= ctx.core_capacity,
            "{} processes pending with core capacity {}",
            ctx.pending.len(),
            ctx.core_capacity
        );
        self.peak_pending = self.peak_pending.max(ctx.pending.len());
    }

    pub fn record_idle(&mut self) {
        self.idle_ticks += 1;
    }

    // `queued` is the scheduler's ready-queue length
    pub fn observe(&self, ctx: &SimCtx, queued: usize) {
        debug_assert_eq!(
            queued,
            ctx.count_in(ProcessState::Ready),
            "Ready queue out of sync with Ready processes"
        );

        for &idx in &ctx.new_queue {
            debug_assert_eq!(
                ctx.proc(idx).status,
                ProcessState::New,
                "Process {} in new queue must be New",
                ctx.proc(idx).pid
            );
        }

        for &idx in &ctx.pending {
            let proc = ctx.proc(idx);
            debug_assert_eq!(
                proc.status,
                ProcessState::Pending,
                "Process {} in pending set must be Pending",
                proc.pid
            );
            debug_assert!(
                proc.arrival_time > proc.last_state_change,
                "Arrived process {} left pending",
                proc.pid
            );
        }

        for proc in &ctx.procs {
            debug_assert_ne!(
                proc.status,
                ProcessState::Processing,
                "Process {} still processing between steps",
                proc.pid
            );
            debug_assert!(
                proc.last_state_change <= ctx.now,
                "Process {} flushed past the clock",
                proc.pid
            );
            debug_assert_eq!(
                proc.time_in_state.total(),
                proc.last_state_change - proc.creation_time,
                "Process {} state times out of sync",
                proc.pid
            );
            if proc.is_done() {
                debug_assert_eq!(
                    proc.completion_time,
                    proc.last_state_change,
                    "Done process {} accrued time after completion",
                    proc.pid
                );
            }
        }
    }

    pub fn idle_ticks(&self) -> Ticks {
        self.idle_ticks
    }

    pub fn peak_pending(&self) -> usize {
        self.peak_pending
    }
}
