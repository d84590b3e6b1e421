use anyhow::Context;
use coro_profparser::parse;
use coro_profparser::statistics::reporting::PhaseReport;
use coro_profparser::statistics::series::StepSeries;
use coro_profparser::timing_profile::summary::ProfileSummary;
use coro_profparser::timing_profile::types::TaskProfile;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Clone, Debug, Eq, PartialEq, StructOpt)]
pub enum Command {
    Show {
        #[structopt(flatten)]
        show: ShowCommand,
    },
}

#[derive(Clone, Debug, Eq, PartialEq, StructOpt)]
pub struct ShowCommand {
    /// Input profile dump to show some information about
    #[structopt(name = "input", long = "input", short = "i")]
    input: PathBuf,
    /// Details for matching task only
    #[structopt(long = "task")]
    task: Option<String>,
    /// Show per-bucket counts for shown tasks
    #[structopt(long = "counts")]
    show_counts: bool,
    /// Show the survival and density step series points for shown tasks
    #[structopt(long = "series")]
    show_series: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, StructOpt)]
pub struct Opts {
    #[structopt(subcommand)]
    cmd: Command,
}

fn print_series(label: &str, series: &StepSeries) {
    let points = series
        .points()
        .iter()
        .map(|(x, y)| format!("({:.3e}, {:.4})", x, y))
        .collect::<Vec<String>>()
        .join(", ");
    println!("      {}: [{}]", label, points);
}

impl ShowCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let profile = parse(&self.input)
            .with_context(|| format!("failed to load profile dump {}", self.input.display()))?;
        let mut summary = ProfileSummary::new();
        for sample in profile.samples() {
            summary.add_sample(sample);
        }
        println!(
            "{} tasks profiled ({} samples, {} events)",
            summary.num_tasks(),
            summary.num_samples(),
            summary.total_events()
        );

        let shown: Vec<&TaskProfile> = match self.task.as_deref() {
            Some(name) => profile.get_task(name).into_iter().collect(),
            None => profile.tasks().collect(),
        };
        for task in shown {
            println!("  {}:", task.name());
            for sample in task.samples() {
                let report = PhaseReport::from_sample(sample)?;
                println!(
                    "    {}: {:.3} events/s over {:.1}s ({} events in {} buckets)",
                    report.phase,
                    report.rate_per_second,
                    sample.elapsed_secs(),
                    report.total_count,
                    sample.bucket_count()
                );
                if self.show_counts {
                    let counts = sample
                        .counts()
                        .iter()
                        .map(|x| x.to_string())
                        .collect::<Vec<String>>()
                        .join(",");
                    println!("      Counts: [{}]", counts);
                }
                if self.show_series {
                    print_series("Survival", &report.survival);
                    print_series("Density", &report.density);
                }
            }
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let opts = Opts::from_args();
    match opts.cmd {
        Command::Show { show } => show.run(),
    }
}
