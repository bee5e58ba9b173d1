//! Shared fixtures for integration tests.

use std::path::PathBuf;

use bhroute_lib::{parse_coordinates, Hop, HopCatalog, System};

/// Path to the fixtures directory checked in at the workspace root.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load the checked-in hop fixture.
#[allow(dead_code)]
pub fn fixture_catalog() -> HopCatalog {
    HopCatalog::from_path(&fixtures_dir().join("hops.csv")).expect("load fixture hops.csv")
}

pub fn system(name: &str, coords: &str) -> System {
    System::new("Fixture", name, parse_coordinates(coords).expect("valid coordinates"))
}

#[allow(dead_code)]
pub fn hop(blackhole: (&str, &str), exit: (&str, &str)) -> Hop {
    Hop::new(system(blackhole.0, blackhole.1), system(exit.0, exit.1))
}
