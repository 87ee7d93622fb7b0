use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cogex_core::StandardPhase;
use cogex_experiment::{ExperimentConfig, ExperimentStateMachine, Observer, SessionOutcome};
use cogex_timing::{HighPrecisionTimer, Timer, VirtualTimer};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod logging;
mod observer;

use observer::{SimulatedObserver, TerminalObserver};

#[derive(Parser)]
#[command(
    name = "cogex-jnd",
    about = "Measure an orientation JND with an adaptive up/down staircase"
)]
struct Cli {
    /// JSON experiment config; defaults are used for missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where the per-trial results are written
    #[arg(short, long, default_value = "jnd_results.json")]
    output: PathBuf,

    /// Answer with a simulated observer instead of reading the terminal
    #[arg(long, default_value_t = false)]
    simulate: bool,

    /// Simulated observer's 75%-correct point, in degrees
    #[arg(long, default_value_t = 12.0)]
    threshold: f64,

    /// Simulated observer's psychometric slope, in degrees
    #[arg(long, default_value_t = 3.0)]
    slope: f64,

    /// Seed for target-side selection and the simulated observer
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn seeded_rng(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
        None => StdRng::from_os_rng(),
    }
}

fn run_session<T, O>(
    config: ExperimentConfig,
    timer: T,
    rng: StdRng,
    observer: &mut O,
) -> Result<SessionOutcome>
where
    T: Timer<Timestamp = u64>,
    O: Observer,
{
    let mut experiment = ExperimentStateMachine::<StandardPhase, T, StdRng>::new(config, timer, rng)
        .context("invalid experiment configuration")?;
    Ok(experiment.run(observer)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => ExperimentConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ExperimentConfig::default(),
    };
    config.validate().context("invalid experiment configuration")?;

    println!("=== JND STAIRCASE ===");
    println!(
        "start {:.1}°, steps {:?}, {}-up/{}-down, stop after {} reversals or {} trials",
        config.staircase.start_value,
        config.staircase.step_sizes,
        config.staircase.up_count,
        config.staircase.down_count,
        config.staircase.max_reversals,
        config.staircase.max_trials,
    );

    tracing::info!(simulate = cli.simulate, seed = ?cli.seed, "session starting");
    let rng = seeded_rng(cli.seed, 0);
    let outcome = if cli.simulate {
        let mut observer = SimulatedObserver::new(seeded_rng(cli.seed, 1), cli.threshold, cli.slope);
        run_session(config, VirtualTimer::new(), rng, &mut observer)?
    } else {
        let stdin = std::io::stdin();
        let mut observer =
            TerminalObserver::new(stdin.lock(), std::io::stdout(), config.reference_angle);
        observer.show_instructions()?;
        run_session(config, HighPrecisionTimer::new(), rng, &mut observer)?
    };

    println!("\nreversals: {:?}", outcome.reversal_values);
    println!("{}", outcome.summary());
    if cli.simulate {
        println!("simulated observer 75% point: {:.3}", cli.threshold);
    }

    outcome
        .save(&cli.output)
        .with_context(|| format!("writing results to {}", cli.output.display()))?;
    println!("Results saved to {}", cli.output.display());

    Ok(())
}
