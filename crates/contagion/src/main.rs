use std::{error::Error, io, path::PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use contagion::{
    Knob, Scenario, Sweep,
    config::{GridSettings, ScenarioFile, SolverSettings},
    inclusive_range,
};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};

// ISO 8601 timestamp and color coded level tag
const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

#[derive(Parser)]
#[command(name = "contagion")]
#[command(about = "Integrate SIR-family epidemic models and explore their parameters")]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Set the log level explicitly, overriding -v
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate one scenario and write `time,infected,recovered,susceptible` as CSV
    Run {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Show the curves in a window instead of writing CSV
        #[cfg(feature = "plot")]
        #[arg(long)]
        plot: bool,
    },
    /// Vary one parameter and write `value,r0,peak_time,peak_infected` as CSV
    Sweep {
        #[command(flatten)]
        scenario: ScenarioArgs,

        #[command(flatten)]
        range: RangeArgs,
    },
    /// Animate the infected curve while one parameter sweeps up and back down
    #[cfg(feature = "plot")]
    Animate {
        #[command(flatten)]
        scenario: ScenarioArgs,

        #[command(flatten)]
        range: RangeArgs,
    },
}

/// Scenario source and per-parameter overrides.
#[derive(Args)]
struct ScenarioArgs {
    /// TOML scenario file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model variant (inferred from the parameters by default)
    #[arg(long)]
    variant: Option<VariantArg>,

    /// Population size N
    #[arg(short = 'n', long)]
    population: Option<f64>,

    /// Probability that a contact transmits the infection
    #[arg(short = 'p', long)]
    transmissibility: Option<f64>,

    /// Mean contacts per individual per day
    #[arg(long)]
    contact_rate: Option<f64>,

    /// Mean infectious period, in days
    #[arg(short = 'd', long)]
    infection_duration: Option<f64>,

    /// Mean immune period, in days
    #[arg(short = 'w', long)]
    waning_time: Option<f64>,

    /// Relative amplitude of the annual contact-rate cycle
    #[arg(long)]
    seasonality_strength: Option<f64>,

    /// Day on which the contact rate peaks
    #[arg(long)]
    seasonality_shift: Option<f64>,

    /// Number of daily samples, starting at day zero
    #[arg(long)]
    days: Option<u32>,

    /// Integration method
    #[arg(long)]
    method: Option<MethodArg>,
}

/// The swept parameter and its values.
#[derive(Args)]
struct RangeArgs {
    /// Parameter to vary
    #[arg(short, long, default_value = "infection-duration")]
    knob: KnobArg,

    /// First value
    #[arg(long, default_value_t = 1.0)]
    from: f64,

    /// Last value, inclusive
    #[arg(long, default_value_t = 90.0)]
    to: f64,

    /// Increment between values
    #[arg(long, default_value_t = 1.0)]
    step: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    Basic,
    Waning,
    WaningSeasonal,
}

impl From<VariantArg> for contagion::Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Basic => Self::Basic,
            VariantArg::Waning => Self::Waning,
            VariantArg::WaningSeasonal => Self::WaningSeasonal,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Dopri5,
    Rk4,
}

#[derive(Clone, Copy, ValueEnum)]
enum KnobArg {
    Population,
    Transmissibility,
    ContactRate,
    InfectionDuration,
    WaningTime,
    SeasonalityStrength,
    SeasonalityShift,
}

impl From<KnobArg> for Knob {
    fn from(arg: KnobArg) -> Self {
        match arg {
            KnobArg::Population => Self::Population,
            KnobArg::Transmissibility => Self::Transmissibility,
            KnobArg::ContactRate => Self::ContactRate,
            KnobArg::InfectionDuration => Self::InfectionDuration,
            KnobArg::WaningTime => Self::WaningTime,
            KnobArg::SeasonalityStrength => Self::SeasonalityStrength,
            KnobArg::SeasonalityShift => Self::SeasonalityShift,
        }
    }
}

impl ScenarioArgs {
    /// Loads the scenario file, if any, and applies the flag overrides.
    fn build(&self) -> Result<Scenario, Box<dyn Error>> {
        let mut file = match &self.config {
            Some(path) => ScenarioFile::from_path(path)?,
            None => ScenarioFile::default(),
        };

        let overrides = [
            (Knob::Population, self.population),
            (Knob::Transmissibility, self.transmissibility),
            (Knob::ContactRate, self.contact_rate),
            (Knob::InfectionDuration, self.infection_duration),
            (Knob::WaningTime, self.waning_time),
            (Knob::SeasonalityStrength, self.seasonality_strength),
            (Knob::SeasonalityShift, self.seasonality_shift),
        ];
        for (knob, value) in overrides {
            if let Some(value) = value {
                file.parameters = file.parameters.with_knob(knob, value)?;
            }
        }

        if let Some(variant) = self.variant {
            file.variant = Some(variant.into());
        }
        if let Some(days) = self.days {
            file.grid = GridSettings::Days(days);
        }
        match self.method {
            Some(MethodArg::Dopri5) if !matches!(file.solver, SolverSettings::Dopri5 { .. }) => {
                file.solver = SolverSettings::default();
            }
            Some(MethodArg::Rk4) if !matches!(file.solver, SolverSettings::Rk4 { .. }) => {
                file.solver = SolverSettings::Rk4 {
                    max_step: None,
                    max_steps: None,
                };
            }
            _ => {}
        }

        Ok(file.to_scenario()?)
    }
}

impl RangeArgs {
    fn sweep(&self, base: Scenario) -> Result<Sweep, Box<dyn Error>> {
        let values = inclusive_range(self.from, self.to, self.step);
        if values.is_empty() {
            return Err(format!(
                "empty range: from {} to {} by {}",
                self.from, self.to, self.step
            )
            .into());
        }

        Ok(Sweep::new(base, self.knob.into(), values))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = cli.log_level.unwrap_or(match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    });
    init_logging(level)?;

    match cli.command {
        #[cfg(feature = "plot")]
        Commands::Run {
            scenario,
            plot: true,
        } => {
            let outcome = scenario.build()?.run()?;
            contagion::plot::show(&outcome, "Contagion")?;
            Ok(())
        }
        Commands::Run { scenario, .. } => run(&scenario.build()?),
        Commands::Sweep { scenario, range } => sweep(&range.sweep(scenario.build()?)?),
        #[cfg(feature = "plot")]
        Commands::Animate { scenario, range } => {
            let sweep = range.sweep(scenario.build()?)?.ping_pong();
            contagion::plot::animate(sweep, "Contagion")?;
            Ok(())
        }
    }
}

fn run(scenario: &Scenario) -> Result<(), Box<dyn Error>> {
    let outcome = scenario.run()?;
    log::info!(
        "{} model, R0 = {:.2}, {} derivative evaluations",
        outcome.variant().name(),
        outcome.parameters().basic_reproduction_number(),
        outcome.stats().evaluations,
    );

    let mut writer = csv::Writer::from_writer(io::stdout().lock());
    writer.write_record(["time", "infected", "recovered", "susceptible"])?;
    for (t, c) in outcome.rows() {
        writer.serialize((t, c.infected, c.recovered, c.susceptible))?;
    }
    writer.flush()?;

    Ok(())
}

fn sweep(sweep: &Sweep) -> Result<(), Box<dyn Error>> {
    log::info!(
        "sweeping {} over {} values",
        sweep.knob().label(),
        sweep.len()
    );

    let mut writer = csv::Writer::from_writer(io::stdout().lock());
    writer.write_record(["value", "r0", "peak_time", "peak_infected"])?;
    for frame in sweep.frames() {
        let frame = frame?;
        let (peak_time, peak_infected) = frame
            .peak
            .map_or((f64::NAN, f64::NAN), |peak| (peak.time, peak.value));
        writer.serialize((frame.value, frame.r0, peak_time, peak_infected))?;
    }
    writer.flush()?;

    Ok(())
}

/// Installs a console logger on stderr, keeping stdout for CSV output.
fn init_logging(level: LevelFilter) -> Result<(), Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;

    log4rs::init_config(config)?;
    Ok(())
}
