//! Randomized stress comparison against a hash-map reference model.
//!
//! Scaled-down adaptation of the original stress scenarios: many random
//! increments over wide, narrow, and all-negative coordinate ranges, then
//! every touched cell is checked against an independently maintained
//! reference.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use heatmap_engine::HeatmapEngine;
use heatmap_types::{Coordinate, SpatialResolution};

const COUNTERS: [&str; 3] = ["deaths", "gold_obtained", "xp_gained"];

/// Drive random increments through the engine and a reference model, then
/// compare every touched cell and each counter's full extent.
///
/// Resolutions passed here must reconstruct cell corners exactly in f64
/// (integers, or fractions with power-of-two denominators).
fn compare_against_model(
    resolution: SpatialResolution,
    seed: u64,
    rounds: usize,
    x_range: (f64, f64),
    y_range: (f64, f64),
) {
    let mut engine = HeatmapEngine::new(resolution);
    let mut model: HashMap<(usize, i64, i64), u64> = HashMap::new();
    let mut rng = SmallRng::seed_from_u64(seed);

    for _ in 0..rounds {
        let position = Coordinate::new(
            rng.random_range(x_range.0..=x_range.1),
            rng.random_range(y_range.0..=y_range.1),
        );
        let which = rng.random_range(0..COUNTERS.len());
        let amount = rng.random_range(1..=9_i64);

        assert_eq!(
            engine.increment_by(position, COUNTERS[which], amount),
            Ok(())
        );

        let cell = engine.adjust(position);
        let slot = model.entry((which, cell.cx, cell.cy)).or_insert(0);
        *slot += amount as u64;
    }

    for ((which, cx, cy), expected) in &model {
        let corner = Coordinate::new(
            *cx as f64 * resolution.width,
            *cy as f64 * resolution.height,
        );
        assert_eq!(
            u64::from(engine.get(corner, COUNTERS[*which])),
            *expected,
            "cell ({cx}, {cy}) of {} diverged",
            COUNTERS[*which]
        );
    }

    for (which, counter) in COUNTERS.iter().enumerate() {
        let expected_total: u64 = model
            .iter()
            .filter(|((entry, _, _), _)| *entry == which)
            .map(|(_, value)| *value)
            .sum();
        if expected_total == 0 {
            continue;
        }
        let extent = match engine.get_all(counter) {
            Ok(extent) => extent,
            Err(failure) => panic!("full extent of {counter} failed: {failure}"),
        };
        assert_eq!(extent.total(), expected_total, "{counter} total diverged");
    }

    // A far-away cell no round could reach stays zero for every counter.
    for counter in COUNTERS {
        assert_eq!(engine.get(Coordinate::new(1.0e9, 1.0e9), counter), 0);
    }
}

#[test]
fn wide_coordinate_range() {
    compare_against_model(
        SpatialResolution::uniform(5.0),
        42,
        20_000,
        (-5000.0, 5000.0),
        (-5000.0, 5000.0),
    );
}

#[test]
fn narrow_coordinate_range_piles_up() {
    compare_against_model(
        SpatialResolution::uniform(2.0),
        7,
        10_000,
        (-10.0, 10.0),
        (-5.0, 5.0),
    );
}

#[test]
fn all_negative_coordinates() {
    compare_against_model(
        SpatialResolution::uniform(5.0),
        1234,
        10_000,
        (-5000.0, -1.0),
        (-5000.0, -1.0),
    );
}

#[test]
fn fractional_resolution() {
    compare_against_model(
        SpatialResolution::new(0.25, 0.5),
        99,
        5_000,
        (-40.0, 40.0),
        (-40.0, 40.0),
    );
}
