use rustc_hash::FxHashMap;
use std::{collections::VecDeque, fmt, ops::Index};

use super::event::SchedEvent;

pub type Ticks = u64;
pub type Pid = u64;
// Index into the process arena
pub type ProcIdx = usize;

/// Lifecycle of a process. Every process walks the variants in declaration
/// order and never skips or reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProcessState {
    New,
    Pending,
    Ready,
    Processing,
    Done,
}

impl ProcessState {
    pub const ALL: [ProcessState; 5] = [
        ProcessState::New,
        ProcessState::Pending,
        ProcessState::Ready,
        ProcessState::Processing,
        ProcessState::Done,
    ];

    pub fn successor(self) -> Option<Self> {
        match self {
            Self::New => Some(Self::Pending),
            Self::Pending => Some(Self::Ready),
            Self::Ready => Some(Self::Processing),
            Self::Processing => Some(Self::Done),
            Self::Done => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Processing => "processing",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Ticks accumulated in each [`ProcessState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateTimes([Ticks; 5]);

impl StateTimes {
    pub fn get(&self, state: ProcessState) -> Ticks {
        self.0[state as usize]
    }

    fn add(&mut self, state: ProcessState, delta: Ticks) {
        self.0[state as usize] += delta;
    }

    pub fn total(&self) -> Ticks {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProcessState, Ticks)> + '_ {
        ProcessState::ALL.iter().map(|&state| (state, self.get(state)))
    }
}

impl Index<ProcessState> for StateTimes {
    type Output = Ticks;

    fn index(&self, state: ProcessState) -> &Ticks {
        &self.0[state as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    /// Reserved for a preemptive policy; the engine never decrements it.
    pub remaining_time: Ticks,
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
    pub status: ProcessState,
    pub time_in_state: StateTimes,
    pub last_state_change: Ticks,
    pub creation_time: Ticks,
}

impl ProcessRecord {
    pub fn new(pid: Pid, arrival_time: Ticks, burst_time: Ticks, creation_time: Ticks) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            completion_time: 0,
            turnaround_time: 0,
            waiting_time: 0,
            status: ProcessState::New,
            time_in_state: StateTimes::default(),
            last_state_change: creation_time,
            creation_time,
        }
    }

    /// Credit the ticks since the last flush to the current state.
    pub fn update_state_time(&mut self, current_time: Ticks) {
        debug_assert!(
            current_time >= self.last_state_change,
            "Process {} flushed at {current_time}, before its last change at {}",
            self.pid,
            self.last_state_change
        );
        let spent = current_time.saturating_sub(self.last_state_change);
        self.time_in_state.add(self.status, spent);
        self.last_state_change = current_time;
    }

    pub fn change_status(&mut self, new_status: ProcessState, current_time: Ticks) {
        self.update_state_time(current_time);
        self.status = new_status;
    }

    /// Record completion at `current_time` and move to `Done`.
    pub fn finish(&mut self, current_time: Ticks) {
        debug_assert_eq!(
            self.status,
            ProcessState::Processing,
            "Process {} must be processing before it finishes",
            self.pid
        );
        self.completion_time = current_time;
        self.turnaround_time = self.completion_time - self.arrival_time;
        self.waiting_time = self.turnaround_time - self.burst_time;
        self.change_status(ProcessState::Done, current_time);
    }

    pub fn is_done(&self) -> bool {
        self.status == ProcessState::Done
    }

    pub fn time_in_current_state(&self) -> Ticks {
        self.time_in_state.get(self.status)
    }
}

/// Arena of process records plus the per-state bookkeeping the engine needs.
#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub core_capacity: usize,
    pub procs: Vec<ProcessRecord>,
    // Admission order; front is admitted first
    pub new_queue: VecDeque<ProcIdx>,
    pub pending: Vec<ProcIdx>,
    pid_to_idx: FxHashMap<Pid, ProcIdx>,
    completed: Vec<ProcIdx>,
}

impl SimCtx {
    pub fn new(core_capacity: usize) -> Self {
        debug_assert!(core_capacity > 0, "Core capacity must be positive");
        Self {
            now: 0,
            core_capacity,
            procs: Vec::new(),
            new_queue: VecDeque::new(),
            pending: Vec::with_capacity(core_capacity),
            pid_to_idx: FxHashMap::default(),
            completed: Vec::new(),
        }
    }

    pub fn create_process(&mut self, pid: Pid, arrival_time: Ticks, burst_time: Ticks) -> ProcIdx {
        let idx = self.procs.len();
        let previous = self.pid_to_idx.insert(pid, idx);
        debug_assert!(previous.is_none(), "Duplicate pid {pid}");

        self.procs
            .push(ProcessRecord::new(pid, arrival_time, burst_time, self.now));
        self.new_queue.push_back(idx);
        idx
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        debug_assert!(
            self.now.checked_add(delta).is_some(),
            "Clock overflow at {} + {delta}",
            self.now
        );
        self.now = self.now.saturating_add(delta);
    }

    /// Move `idx` to the next lifecycle state at the current tick.
    pub fn transition(&mut self, idx: ProcIdx, to: ProcessState) -> SchedEvent {
        let now = self.now;
        let proc = &mut self.procs[idx];
        let from = proc.status;
        debug_assert_eq!(
            from.successor(),
            Some(to),
            "Illegal transition {from} -> {to} for process {}",
            proc.pid
        );
        proc.change_status(to, now);
        SchedEvent::StateChange {
            pid: proc.pid,
            from,
            to,
            at: now,
        }
    }

    /// Fill free pending slots from the front of the new queue.
    pub fn admit(&mut self, events: &mut Vec<SchedEvent>) {
        while self.pending.len() < self.core_capacity {
            let Some(idx) = self.new_queue.pop_front() else {
                break;
            };
            events.push(self.transition(idx, ProcessState::Pending));
            self.pending.push(idx);
        }
    }

    /// Promote every pending process that has arrived. Returns the promoted
    /// processes in pending order.
    pub fn release_arrived(&mut self, events: &mut Vec<SchedEvent>) -> Vec<ProcIdx> {
        let now = self.now;
        let mut released = Vec::new();
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for idx in std::mem::take(&mut self.pending) {
            if self.procs[idx].arrival_time <= now {
                events.push(self.transition(idx, ProcessState::Ready));
                released.push(idx);
            } else {
                self.procs[idx].update_state_time(now);
                still_pending.push(idx);
            }
        }

        self.pending = still_pending;
        released
    }

    // Processes that wait without transitioning still need their time flushed
    pub fn flush_waiting(&mut self) {
        let now = self.now;
        for proc in &mut self.procs {
            if matches!(proc.status, ProcessState::New | ProcessState::Ready) {
                proc.update_state_time(now);
            }
        }
    }

    pub fn complete(&mut self, idx: ProcIdx) -> SchedEvent {
        let now = self.now;
        let proc = &mut self.procs[idx];
        proc.finish(now);
        self.completed.push(idx);
        SchedEvent::StateChange {
            pid: proc.pid,
            from: ProcessState::Processing,
            to: ProcessState::Done,
            at: now,
        }
    }

    pub fn proc(&self, idx: ProcIdx) -> &ProcessRecord {
        &self.procs[idx]
    }

    pub fn idx_of(&self, pid: Pid) -> Option<ProcIdx> {
        self.pid_to_idx.get(&pid).copied()
    }

    pub fn by_pid(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.idx_of(pid).map(|idx| &self.procs[idx])
    }

    pub fn completed(&self) -> &[ProcIdx] {
        &self.completed
    }

    pub fn all_done(&self) -> bool {
        self.completed.len() == self.procs.len()
    }

    pub fn count_in(&self, state: ProcessState) -> usize {
        self.procs.iter().filter(|p| p.status == state).count()
    }
}
