//! Sample stars of a configured population along one sight line and write CSV

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use synthpop::shared_args::SightLineArgs;
use synthpop::{Age, Population, PopulationConfig, PopulationDensity, StarSample};

#[derive(Parser, Debug)]
#[command(author, version, about = "Sample a synthetic population along a sight line")]
struct Args {
    /// Population configuration (JSON)
    #[arg(long)]
    config: PathBuf,

    #[command(flatten)]
    sight_line: SightLineArgs,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output CSV, stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = PopulationConfig::load(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    let mut population = Population::from_config(&config)?;

    log::info!(
        "Population '{}': mean age {:.2} Gyr, density unit {:?}",
        population.name(),
        population.age().average_age(),
        population.density().density_unit()
    );

    let (l_deg, b_deg) = args.sight_line.sight_line;
    let distances = args.sight_line.distances.to_vec();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let stars = population.sample_sight_line(l_deg, b_deg, &distances, &mut rng)?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    writeln!(out, "{}", StarSample::CSV_HEADER)?;
    for star in &stars {
        writeln!(out, "{}", star.to_csv_row())?;
    }
    out.flush()?;

    if let Some(path) = &args.output {
        log::info!("Wrote {} stars to {}", stars.len(), path.display());
    }
    Ok(())
}
