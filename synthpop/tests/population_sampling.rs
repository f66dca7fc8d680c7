//! Sampling a configured population with an on-disk extinction map

use std::sync::Arc;

use approx::assert_relative_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use synthpop::{ModelError, Population, PopulationConfig};
use test_helpers::write_fixture;

const TABLE: &str = "\
0.0,0.0,1.2,0.9,3,2,0.1,0.3,0.02,6,0.1,1.1,0.05,10,0.2,2.4,0.1
10.0,0.0,1.0,0.8,2,4,0.1,0.2,0.01,9,0.2,0.7,0.04
";

const CONFIG: &str = r#"{
    "name": "bulge",
    "age": {"name": "gaussian", "mean": 9.0, "std": 1.0},
    "population_density": {"name": "bulge_besancon"},
    "kinematics": {"name": "velocity_gradient", "sigma_u": 113, "sigma_v": 115, "sigma_w": 100},
    "extinction": {"name": "Surot", "table_path": "surot_table.csv"}
}"#;

fn load_population(dir: &str) -> PopulationConfig {
    write_fixture(format!("{dir}/surot_table.csv"), TABLE);
    let path = write_fixture(format!("{dir}/population.json"), CONFIG);
    PopulationConfig::load(&path).unwrap()
}

#[test]
fn test_extinction_follows_bins() {
    let config = load_population("population/bins");
    let mut population = Population::from_config(&config).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let stars = population
        .sample_sight_line(0.4, -0.3, &[1.0, 3.0, 7.0, 12.0], &mut rng)
        .unwrap();

    let extinction: Vec<(f64, f64)> = stars
        .iter()
        .map(|s| (s.extinction, s.extinction_err))
        .collect();
    assert_eq!(
        extinction,
        vec![(0.0, 0.0), (0.3, 0.02), (1.1, 0.05), (2.4, 0.1)]
    );

    let map = population.extinction_map().unwrap();
    assert_eq!(map.active_profile().unwrap().line(), 1);
    assert_eq!(map.properties().quantity_tag, "A_Ks");
}

#[test]
fn test_same_seed_same_stars() {
    let config = load_population("population/seeded");
    let distances: Vec<f64> = (1..=20).map(|i| i as f64 * 0.5).collect();

    let sample = |seed: u64| {
        let mut population = Population::from_config(&config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        population
            .sample_sight_line(10.0, 0.0, &distances, &mut rng)
            .unwrap()
    };

    let first = sample(17);
    assert_eq!(first, sample(17));
    assert_ne!(first, sample(18));

    for (star, &distance) in first.iter().zip(&distances) {
        assert_relative_eq!(star.distance_kpc, distance);
        assert!(star.age_gyr > 1e-4 && star.age_gyr < 19.9526231497);
        assert!(star.density > 0.0);
    }
}

#[test]
fn test_workers_share_extinction_source() {
    let config = load_population("population/workers");
    let source = config.extinction.as_ref().unwrap().open_source().unwrap();

    let handles: Vec<_> = [(0.0, 7.0), (10.0, 7.0)]
        .into_iter()
        .enumerate()
        .map(|(seed, (l_deg, distance))| {
            let mut population =
                Population::from_config_with_source(&config, Some(Arc::clone(&source))).unwrap();
            std::thread::spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
                let stars = population
                    .sample_sight_line(l_deg, 0.0, &[distance], &mut rng)
                    .unwrap();
                (stars[0].extinction, stars[0].extinction_err)
            })
        })
        .collect();

    let results: Vec<(f64, f64)> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![(1.1, 0.05), (0.2, 0.01)]);
}

#[test]
fn test_missing_table_reported() {
    let path = write_fixture(
        "population/missing/population.json",
        &CONFIG.replace("surot_table.csv", "absent.csv"),
    );
    let config = PopulationConfig::load(&path).unwrap();

    assert!(matches!(
        Population::from_config(&config),
        Err(ModelError::Extinction(_))
    ));
}
