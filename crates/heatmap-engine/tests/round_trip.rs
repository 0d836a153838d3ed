//! Snapshot round-trip behavior across whole engines.

use heatmap_engine::HeatmapEngine;
use heatmap_types::{Coordinate, SpatialResolution};

const DEATHS: &str = "deaths";
const KILLS: &str = "kills";
const SKILLS: &str = "skills_used";

fn at(x: f64, y: f64) -> Coordinate {
    Coordinate::new(x, y)
}

fn populated_engine() -> HeatmapEngine {
    let mut engine = HeatmapEngine::new(SpatialResolution::new(2.0, 2.0));
    for position in [
        at(-1.0, -1.0),
        at(0.0, 0.0),
        at(1.0, 1.0),
        at(2.0, 2.0),
        at(-63.5, 119.0),
    ] {
        assert_eq!(engine.increment(position, DEATHS), Ok(()));
    }
    assert_eq!(engine.increment_by(at(7.0, -7.0), SKILLS, 41), Ok(()));
    assert_eq!(engine.increment_by(at(-7.0, 7.0), SKILLS, 2), Ok(()));
    engine
}

#[test]
fn round_trip_into_engine_of_different_resolution() {
    let source = populated_engine();
    let buffer = match source.serialize() {
        Ok(buffer) => buffer,
        Err(failure) => panic!("serialize failed: {failure}"),
    };

    let mut target = HeatmapEngine::new(SpatialResolution::uniform(9.0));
    assert_eq!(target.deserialize(&buffer), Ok(()));

    // The stored resolution wins over the target's initial one.
    assert_eq!(target.resolution(), SpatialResolution::new(2.0, 2.0));

    let names: Vec<&str> = source.counter_names().collect();
    assert_eq!(target.counter_names().collect::<Vec<&str>>(), names);
    for name in names {
        assert_eq!(target.get_all(name), source.get_all(name));
    }

    for position in [at(-1.0, -1.0), at(0.0, 0.0), at(2.0, 2.0), at(500.0, 500.0)] {
        assert_eq!(target.get(position, DEATHS), source.get(position, DEATHS));
        assert_eq!(target.get(position, SKILLS), source.get(position, SKILLS));
    }
}

#[test]
fn restore_replaces_existing_data_wholesale() {
    let source = populated_engine();
    let buffer = match source.serialize() {
        Ok(buffer) => buffer,
        Err(failure) => panic!("serialize failed: {failure}"),
    };

    let mut target = HeatmapEngine::new(SpatialResolution::uniform(1.0));
    assert_eq!(target.increment_by(at(12.0, 12.0), KILLS, 30), Ok(()));
    assert_eq!(target.deserialize(&buffer), Ok(()));

    // Pre-restore data is gone without a trace.
    assert!(!target.has_counter(KILLS));
    assert_eq!(target.get(at(12.0, 12.0), KILLS), 0);
    assert_eq!(target.get(at(0.0, 0.0), DEATHS), 2);
}

#[test]
fn failed_restore_clears_counters_but_keeps_resolution() {
    let mut engine = populated_engine();
    assert!(engine.deserialize(&[0x01, 0x02, 0x03]).is_err());

    assert!(!engine.has_counter(DEATHS));
    assert_eq!(engine.get(at(0.0, 0.0), DEATHS), 0);
    assert_eq!(engine.resolution(), SpatialResolution::new(2.0, 2.0));
}

#[test]
fn empty_engine_round_trips() {
    let source = HeatmapEngine::new(SpatialResolution::new(0.5, 4.0));
    let buffer = match source.serialize() {
        Ok(buffer) => buffer,
        Err(failure) => panic!("serialize failed: {failure}"),
    };

    let mut target = HeatmapEngine::default();
    assert_eq!(target.deserialize(&buffer), Ok(()));
    assert_eq!(target.resolution(), SpatialResolution::new(0.5, 4.0));
    assert_eq!(target.counter_names().count(), 0);
}
