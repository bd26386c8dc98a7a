use crate::core::{Pid, ProcessState, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedEvent {
    StateChange {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
        at: Ticks,
    },
    // Emitted once per process, after its Processing -> Done change
    Completed {
        pid: Pid,
        at: Ticks,
    },
    // Ready queue empty for every tick in from..until
    CpuIdle {
        from: Ticks,
        until: Ticks,
    },
}

impl SchedEvent {
    pub fn at(&self) -> Ticks {
        match *self {
            SchedEvent::StateChange { at, .. } | SchedEvent::Completed { at, .. } => at,
            SchedEvent::CpuIdle { from, .. } => from,
        }
    }

    /// Fold `next` into `self` when both are back-to-back idle spans.
    pub fn absorb_idle(&mut self, next: &SchedEvent) -> bool {
        match (self, next) {
            (
                SchedEvent::CpuIdle { until, .. },
                &SchedEvent::CpuIdle {
                    from,
                    until: next_until,
                },
            ) if *until == from => {
                *until = next_until;
                true
            }
            _ => false,
        }
    }
}
