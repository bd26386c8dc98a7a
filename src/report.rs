//! Plain-text tables for a simulation's progress and results.

use std::io::{self, Write};

use crate::{
    core::state::{ProcessRecord, ProcessState},
    sim::Schedule,
};

pub fn write_status<W: Write>(out: &mut W, procs: &[ProcessRecord]) -> io::Result<()> {
    writeln!(out, "Current Process Status:")?;
    writeln!(out, "{:<6}{:<12}{}", "PID", "Status", "Time in Current State")?;
    writeln!(out, "{}", "-".repeat(45))?;
    for proc in procs {
        writeln!(
            out,
            "{:<6}{:<12}{}",
            proc.pid,
            proc.status,
            proc.time_in_current_state()
        )?;
    }
    Ok(())
}

pub fn write_results<W: Write>(out: &mut W, schedule: &Schedule) -> io::Result<()> {
    writeln!(out, "Final Process Scheduling Results:")?;
    writeln!(
        out,
        "{:<6}{:<9}{:<7}{:<12}{:<12}{:<9}{}",
        "PID", "Arrival", "Burst", "Completion", "Turnaround", "Waiting", "Status"
    )?;
    writeln!(out, "{}", "-".repeat(75))?;
    for proc in &schedule.completed {
        writeln!(
            out,
            "{:<6}{:<9}{:<7}{:<12}{:<12}{:<9}{}",
            proc.pid,
            proc.arrival_time,
            proc.burst_time,
            proc.completion_time,
            proc.turnaround_time,
            proc.waiting_time,
            proc.status
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Average Waiting Time: {:.2}", schedule.avg_waiting_time())?;
    writeln!(
        out,
        "Average Turnaround Time: {:.2}",
        schedule.avg_turnaround_time()
    )?;
    writeln!(
        out,
        "Makespan: {} ticks ({} idle), peak pending {}/{}",
        schedule.makespan, schedule.idle_ticks, schedule.peak_pending, schedule.core_capacity
    )?;
    Ok(())
}

pub fn write_state_breakdown<W: Write>(out: &mut W, procs: &[ProcessRecord]) -> io::Result<()> {
    writeln!(out, "Time Spent in Each State:")?;
    write!(out, "{:<6}", "PID")?;
    for state in ProcessState::ALL {
        write!(out, "{:<12}", capitalize(state.as_str()))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(66))?;

    for proc in procs {
        write!(out, "{:<6}", proc.pid)?;
        for (_, ticks) in proc.time_in_state.iter() {
            write!(out, "{ticks:<12}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{demo_specs, run};

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn status_lists_every_process() {
        let schedule = run(demo_specs(), 2).unwrap();
        let text = render(|out| write_status(out, &schedule.processes));

        let rows: Vec<_> = text.lines().skip(3).collect();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.contains("done")));
        assert!(rows[1].starts_with("2     done        0"));
    }

    #[test]
    fn results_include_averages() {
        let schedule = run(demo_specs(), 2).unwrap();
        let text = render(|out| write_results(out, &schedule));

        assert!(text.contains("Average Waiting Time: 3.25"));
        assert!(text.contains("Average Turnaround Time: 7.00"));
        assert!(text.contains("Makespan: 15 ticks (0 idle), peak pending 2/2"));
        let first_row = text.lines().nth(3).unwrap();
        assert!(first_row.starts_with("1     0        6      6           6           0"));
    }

    #[test]
    fn breakdown_columns_follow_state_order() {
        let schedule = run(demo_specs(), 2).unwrap();
        let text = render(|out| write_state_breakdown(out, &schedule.processes));

        let header = text.lines().nth(1).unwrap();
        assert!(header.starts_with("PID   New         Pending     Ready       Processing  Done"));
        // pid 2: pending 0..6, ready 6..11, processing 11..15
        let row = text.lines().find(|l| l.starts_with("2 ")).unwrap();
        let cells: Vec<_> = row.split_whitespace().collect();
        assert_eq!(cells, ["2", "0", "6", "5", "4", "0"]);
    }

    #[test]
    fn capitalize_handles_empty() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("ready"), "Ready");
    }
}
