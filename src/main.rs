use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use slider::simulate::{self, Script, ScriptedSwipe};
use slider::Timings;

#[cfg(feature = "viewer")]
mod viewer;

#[derive(Parser)]
#[command(name = "slider", version, about = "Auto-advancing slider with swipe detection")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay clicks and swipes on a simulated clock and print what happened
    Simulate(SimulateArgs),
    /// Show a directory of images as a slider
    #[cfg(feature = "viewer")]
    View(ViewArgs),
}

#[derive(Args)]
struct TimingArgs {
    /// Time between automatic advances
    #[arg(long, default_value_t = 5000)]
    period_ms: u64,
    /// Pause after a navigation click
    #[arg(long, default_value_t = 15000)]
    cooldown_ms: u64,
}

impl TimingArgs {
    fn timings(&self) -> Timings {
        Timings {
            rotation_period: Duration::from_millis(self.period_ms),
            pause_delay: Duration::from_millis(self.cooldown_ms),
        }
    }
}

#[derive(Args)]
struct SimulateArgs {
    #[arg(long, default_value_t = 5)]
    slides: usize,
    /// Simulated run length
    #[arg(long, default_value_t = 30000)]
    duration_ms: u64,
    /// Navigation click at this time (repeatable)
    #[arg(long = "click-at", value_name = "MS")]
    clicks: Vec<u64>,
    /// Swipe on the container (repeatable)
    #[arg(long = "swipe", value_name = "AT_MS:FROM_X:TO_X")]
    swipes: Vec<ScriptedSwipe>,
    #[command(flatten)]
    timing: TimingArgs,
}

#[cfg(feature = "viewer")]
#[derive(Args)]
struct ViewArgs {
    image_directory: std::path::PathBuf,
    /// Show images in random order
    #[arg(long)]
    shuffle: bool,
    #[command(flatten)]
    timing: TimingArgs,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Simulate(args) => run_simulation(args),
        #[cfg(feature = "viewer")]
        Command::View(args) => {
            viewer::run(&args.image_directory, args.shuffle, args.timing.timings())
        }
    }
}

fn run_simulation(args: SimulateArgs) -> Result<()> {
    let script = Script {
        slides: args.slides,
        duration: Duration::from_millis(args.duration_ms),
        clicks: args.clicks.iter().map(|ms| Duration::from_millis(*ms)).collect(),
        swipes: args.swipes,
        timings: args.timing.timings(),
    };
    let report = simulate::run(&script).context("Failed to mount slider")?;

    for event in report.events.iter() {
        println!("{}", event);
    }
    println!("{} advance(s) in {:?}", report.advances().len(), script.duration);
    Ok(())
}
