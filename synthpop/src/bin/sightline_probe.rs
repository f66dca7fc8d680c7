//! Print the extinction profile resolved along one galactic sight line

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use extinction::{ExtinctionMapConfig, SightLineTableConfig};
use synthpop::shared_args::SightLineArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Probe an extinction map along a sight line")]
struct Args {
    /// Backing sight-line table (comma separated, one sight line per row)
    #[arg(long)]
    table: PathBuf,

    /// Separate (l, b) coordinate file, defaults to the table's first columns
    #[arg(long)]
    coords: Option<PathBuf>,

    /// Longitude grid spacing in degrees, inferred from the grid when omitted
    #[arg(long)]
    l_stepsize: Option<f64>,

    #[command(flatten)]
    sight_line: SightLineArgs,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = ExtinctionMapConfig::Surot(SightLineTableConfig {
        table_path: args.table.clone(),
        coords_path: args.coords.clone(),
        l_stepsize: args.l_stepsize,
    });
    let mut map = config
        .build()
        .with_context(|| format!("Failed to open {}", args.table.display()))?;

    let (l_deg, b_deg) = args.sight_line.sight_line;
    let distances = args.sight_line.distances.to_vec();
    let values = map.extinction_along(l_deg, b_deg, &distances)?;

    if let Some(profile) = map.active_profile() {
        println!(
            "# {} ({}, {:.3} um): requested ({l_deg}, {b_deg}), line {} at ({}, {}), {} bins",
            map.properties().name,
            map.properties().quantity_tag,
            map.properties().ref_wavelength_um,
            profile.line(),
            profile.l_deg,
            profile.b_deg,
            profile.number_of_bins()
        );
    }

    println!("distance_kpc,{0},{0}_err", map.properties().quantity_tag);
    for (distance, (value, err)) in distances.iter().zip(values) {
        println!("{distance:.4},{value:.4},{err:.4}");
    }

    Ok(())
}
