use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use sjf_model::{
    ProcessSpec, Result, SchedEvent, Scheduler, Sim, SimConfig,
    report::{write_results, write_state_breakdown, write_status},
    scheduler::{FifoScheduler, SjfScheduler},
    sim::{AdmissionOrder, BernoulliWorkload, demo_specs, load_specs},
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    Sjf,
    Fifo,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Admission {
    Arrival,
    Given,
}

/// Simulate shortest-job-first scheduling with bounded core admission.
#[derive(Debug, Parser)]
#[command(name = "sjf-model", version)]
struct Args {
    /// Process file with one `pid arrival burst` line per process
    #[arg(long, conflicts_with = "random")]
    input: Option<PathBuf>,

    /// Generate a random workload over this many ticks
    #[arg(long, value_name = "TICKS")]
    random: Option<u64>,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Processes allowed to hold a pending slot at once
    #[arg(short, long, default_value_t = 2)]
    capacity: usize,

    #[arg(short, long, value_enum, default_value_t = Policy::Sjf)]
    policy: Policy,

    #[arg(long, value_enum, default_value_t = Admission::Arrival)]
    admission: Admission,

    /// Skip the status snapshot printed after each completion
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let specs = match (&args.input, args.random) {
        (Some(path), _) => load_specs(path)?,
        (None, Some(ticks)) => BernoulliWorkload {
            ticks,
            seed: args.seed,
            ..Default::default()
        }
        .generate(),
        (None, None) => demo_specs(),
    };

    let admission = match args.admission {
        Admission::Arrival => AdmissionOrder::ByArrival,
        Admission::Given => AdmissionOrder::AsGiven,
    };
    let config = SimConfig::new(args.capacity).with_admission(admission);

    match args.policy {
        Policy::Sjf => simulate::<SjfScheduler>(specs, &config, args.quiet),
        Policy::Fifo => simulate::<FifoScheduler>(specs, &config, args.quiet),
    }
}

fn simulate<S: Scheduler>(
    specs: Vec<ProcessSpec>,
    config: &SimConfig,
    quiet: bool,
) -> Result<()> {
    let sim = Sim::<S>::new(specs, config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Initial Process Status:")?;
    write_status(&mut out, sim.processes())?;

    let mut progress: io::Result<()> = Ok(());
    let schedule = sim.run_with(|event, ctx| {
        if quiet || progress.is_err() {
            return;
        }
        if let SchedEvent::Completed { pid, at } = *event {
            progress = writeln!(out, "\nTime {at}: process {pid} completed")
                .and_then(|()| write_status(&mut out, &ctx.procs));
        }
    });
    progress?;

    writeln!(out)?;
    write_results(&mut out, &schedule)?;
    writeln!(out)?;
    write_state_breakdown(&mut out, &schedule.completed)?;
    Ok(())
}
