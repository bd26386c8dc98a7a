use super::{
    event::SchedEvent,
    observer::Observer,
    state::{ProcessState, SimCtx, Ticks},
};
use crate::scheduler::Scheduler;

pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(core_capacity: usize) -> Self {
        let ctx = SimCtx::new(core_capacity);
        let scheduler = S::init(&ctx);
        Self {
            ctx,
            scheduler,
            observer: Observer::new(),
        }
    }

    /// Run one pass of the scheduling loop. A pass either burns a single idle
    /// tick or runs one process to completion.
    pub fn step(&mut self) -> Vec<SchedEvent> {
        let mut events = Vec::new();

        // 1. new -> pending, bounded by core capacity
        self.ctx.admit(&mut events);
        self.observer.observe_admission(&self.ctx);

        // 2. pending -> ready once arrived
        for idx in self.ctx.release_arrived(&mut events) {
            self.scheduler.enqueue(&self.ctx, idx);
        }

        // 3. bring waiting processes up to the current tick
        self.ctx.flush_waiting();

        // 4. selection
        let Some(idx) = self.scheduler.pick_next(&self.ctx) else {
            let from = self.ctx.now;
            tracing::trace!(at = from, "cpu idle");
            self.ctx.advance_time(1);
            events.push(SchedEvent::CpuIdle {
                from,
                until: self.ctx.now,
            });
            self.observer.record_idle();
            self.observer.observe(&self.ctx, self.scheduler.queued());
            log_transitions(&events);
            return events;
        };

        // 5. run the whole burst; nothing else is picked meanwhile
        events.push(self.ctx.transition(idx, ProcessState::Processing));
        let burst = self.ctx.proc(idx).burst_time;
        self.ctx.advance_time(burst);
        events.push(self.ctx.complete(idx));

        let proc = self.ctx.proc(idx);
        tracing::info!(
            pid = proc.pid,
            at = proc.completion_time,
            waiting = proc.waiting_time,
            policy = self.scheduler.name(),
            "process completed"
        );
        events.push(SchedEvent::Completed {
            pid: proc.pid,
            at: proc.completion_time,
        });

        self.observer.observe(&self.ctx, self.scheduler.queued());
        log_transitions(&events);
        events
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn all_done(&self) -> bool {
        self.ctx.all_done()
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}

fn log_transitions(events: &[SchedEvent]) {
    for event in events {
        if let SchedEvent::StateChange { pid, from, to, at } = *event {
            tracing::debug!(pid, %from, %to, at, "state change");
        }
    }
}
