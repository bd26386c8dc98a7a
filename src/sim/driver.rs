use average::{Estimate, Mean};

use super::{
    config::{AdmissionOrder, SimConfig},
    job::{ProcessSpec, validate_specs},
};
use crate::{
    core::{
        driver::SchedCore,
        event::SchedEvent,
        state::{Pid, ProcessRecord, SimCtx, Ticks},
    },
    error::Result,
    scheduler::{Scheduler, SjfScheduler},
};

pub struct Sim<S: Scheduler = SjfScheduler> {
    pub core: SchedCore<S>,
    trace: Vec<SchedEvent>,
}

impl<S: Scheduler> Sim<S> {
    /// Validate the workload and build the initial `new` set. Nothing runs
    /// until [`Sim::step`] or one of the `run` methods is called.
    pub fn new(mut specs: Vec<ProcessSpec>, config: &SimConfig) -> Result<Self> {
        config.validate()?;
        validate_specs(&specs)?;

        if config.admission == AdmissionOrder::ByArrival {
            specs.sort_by_key(|spec| spec.arrival_time);
        }

        let mut core = SchedCore::<S>::new(config.core_capacity);
        for spec in &specs {
            let (arrival, burst) = spec.ticks()?;
            core.ctx.create_process(spec.pid, arrival, burst);
        }

        tracing::debug!(
            processes = specs.len(),
            core_capacity = config.core_capacity,
            policy = core.scheduler.name(),
            "simulation created"
        );

        Ok(Self {
            core,
            trace: Vec::new(),
        })
    }

    /// Advance one pass. The returned events are per pass; the kept trace
    /// merges consecutive idle ticks into a single span.
    pub fn step(&mut self) -> Vec<SchedEvent> {
        let events = self.core.step();
        for event in &events {
            let merged = self
                .trace
                .last_mut()
                .is_some_and(|last| last.absorb_idle(event));
            if !merged {
                self.trace.push(*event);
            }
        }
        events
    }

    pub fn all_completed(&self) -> bool {
        self.core.all_done()
    }

    pub fn now(&self) -> Ticks {
        self.core.now()
    }

    pub fn processes(&self) -> &[ProcessRecord] {
        &self.core.ctx.procs
    }

    pub fn run(self) -> Schedule {
        self.run_with(|_, _| {})
    }

    /// Run to completion, handing every event and the context as it stood
    /// after the event's step to `on_event`.
    pub fn run_with<F>(mut self, mut on_event: F) -> Schedule
    where
        F: FnMut(&SchedEvent, &SimCtx),
    {
        while !self.all_completed() {
            for event in self.step() {
                on_event(&event, &self.core.ctx);
            }
        }
        self.into_schedule()
    }

    fn into_schedule(self) -> Schedule {
        let ctx = &self.core.ctx;
        let completed = ctx
            .completed()
            .iter()
            .map(|&idx| ctx.proc(idx).clone())
            .collect();
        let observer = self.core.observer();

        Schedule {
            completed,
            processes: ctx.procs.clone(),
            makespan: ctx.now,
            idle_ticks: observer.idle_ticks(),
            peak_pending: observer.peak_pending(),
            core_capacity: ctx.core_capacity,
            events: self.trace,
        }
    }
}

/// Outcome of a finished simulation.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Records in the order they completed.
    pub completed: Vec<ProcessRecord>,
    /// Records in admission order.
    pub processes: Vec<ProcessRecord>,
    pub events: Vec<SchedEvent>,
    pub makespan: Ticks,
    pub idle_ticks: Ticks,
    pub peak_pending: usize,
    pub core_capacity: usize,
}

impl Schedule {
    pub fn completion_order(&self) -> Vec<Pid> {
        self.completed.iter().map(|p| p.pid).collect()
    }

    pub fn process(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    pub fn avg_waiting_time(&self) -> f64 {
        mean(self.completed.iter().map(|p| p.waiting_time))
    }

    pub fn avg_turnaround_time(&self) -> f64 {
        mean(self.completed.iter().map(|p| p.turnaround_time))
    }
}

fn mean(values: impl Iterator<Item = Ticks>) -> f64 {
    values.map(|v| v as f64).collect::<Mean>().estimate()
}

/// Run the SJF engine over `specs` with the default admission order.
pub fn run(specs: Vec<ProcessSpec>, core_capacity: usize) -> Result<Schedule> {
    let sim = Sim::<SjfScheduler>::new(specs, &SimConfig::new(core_capacity))?;
    Ok(sim.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::SimError, scheduler::FifoScheduler, sim::workload::demo_specs};

    #[test]
    fn demo_workload_follows_shortest_burst() {
        let schedule = run(demo_specs(), 2).unwrap();

        assert_eq!(schedule.completion_order(), vec![1, 3, 4, 2]);
        assert_eq!(schedule.makespan, 15);
        assert_eq!(schedule.idle_ticks, 0);
        assert_eq!(schedule.peak_pending, 2);
        assert!((schedule.avg_waiting_time() - 3.25).abs() < 1e-9);
        assert!((schedule.avg_turnaround_time() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn zero_capacity_fails_before_running() {
        let err = Sim::<SjfScheduler>::new(demo_specs(), &SimConfig::new(0))
            .err()
            .unwrap();
        assert!(matches!(err, SimError::InvalidCapacity(0)));
    }

    #[test]
    fn admission_as_given_keeps_input_order() {
        let specs = vec![ProcessSpec::new(1, 5, 1), ProcessSpec::new(2, 0, 1)];
        let config = SimConfig::new(1).with_admission(AdmissionOrder::AsGiven);
        let schedule = Sim::<SjfScheduler>::new(specs.clone(), &config)
            .unwrap()
            .run();

        // pid 2 waits behind pid 1 for the single pending slot
        assert_eq!(schedule.completion_order(), vec![1, 2]);
        assert_eq!(schedule.process(2).map(|p| p.completion_time), Some(7));

        let schedule = Sim::<SjfScheduler>::new(specs, &SimConfig::new(1))
            .unwrap()
            .run();
        assert_eq!(schedule.completion_order(), vec![2, 1]);
        assert_eq!(schedule.process(1).map(|p| p.completion_time), Some(6));
    }

    #[test]
    fn run_with_reports_each_completion() {
        let sim = Sim::<FifoScheduler>::new(demo_specs(), &SimConfig::default()).unwrap();
        let mut seen = Vec::new();
        let schedule = sim.run_with(|event, ctx| {
            if let SchedEvent::Completed { pid, at } = *event {
                let done = ctx.by_pid(pid).unwrap();
                assert!(done.is_done());
                seen.push((pid, at));
            }
        });

        assert_eq!(seen, vec![(1, 6), (2, 10), (3, 12), (4, 15)]);
        let completions = schedule
            .events
            .iter()
            .filter(|e| matches!(e, SchedEvent::Completed { .. }))
            .count();
        assert_eq!(completions, 4);
    }

    #[test]
    fn idle_ticks_fold_into_one_trace_event() {
        let mut sim =
            Sim::<SjfScheduler>::new(vec![ProcessSpec::new(1, 4, 1)], &SimConfig::new(1)).unwrap();

        for _ in 0..4 {
            let events = sim.step();
            assert!(matches!(events.last(), Some(SchedEvent::CpuIdle { .. })));
        }
        let schedule = sim.run();

        let idle: Vec<_> = schedule
            .events
            .iter()
            .filter(|e| matches!(e, SchedEvent::CpuIdle { .. }))
            .collect();
        assert_eq!(idle, vec![&SchedEvent::CpuIdle { from: 0, until: 4 }]);
        assert_eq!(schedule.idle_ticks, 4);
    }
}
