mod common;

use std::fs;

use bhroute_lib::{
    find_routes, hop_stats, validate, Error, HopCatalog, Optimization, Platform,
};
use tempfile::TempDir;

use common::{fixture_catalog, fixtures_dir};

#[test]
fn fixture_loads_every_row() {
    let catalog = fixture_catalog();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.source(), Some(fixtures_dir().join("hops.csv").as_path()));

    let first = &catalog.hops()[0];
    assert_eq!(first.platform, Some(Platform::Ps4));
    assert_eq!(first.galaxy.as_deref(), Some("01 Euclid"));
    assert_eq!(first.blackhole.label(), "[Beykova Nebula] Ekielis XI");
    assert_eq!(first.exit.coords.to_string(), "0BAF:0080:0F5A:0004");
}

#[test]
fn outward_hops_are_not_usable() {
    let catalog = fixture_catalog();
    let valid = catalog.valid_hops();
    assert_eq!(valid.len(), 3);
    assert!(valid.iter().all(|hop| hop.blackhole.name != "Wyrm Hollow"));
}

#[test]
fn fixture_is_consistent() {
    let report = validate(fixture_catalog().hops());
    assert!(report.is_clean(), "{:?}", report.issues);
    assert_eq!(report.valid_hops, 3);
    assert!(report.into_result().is_ok());
}

#[test]
fn platform_filter_narrows_catalog() {
    let catalog = fixture_catalog();
    let ps4 = catalog.filter(Some(Platform::Ps4), Some("01 Euclid"));
    assert_eq!(ps4.len(), 2);
    assert!(catalog.filter(Some(Platform::Xbox), Some("01 Euclid")).is_empty());
}

#[test]
fn routes_through_fixture_hops() {
    let catalog = fixture_catalog();
    let hops = catalog.valid_hops();
    let origin = catalog.resolve_system("0100:007F:0100:0001").expect("coordinates");
    let destination = catalog.resolve_system("0601:007F:0600:0004").expect("coordinates");
    let model = Optimization::Time.cost_model();

    let routes = find_routes(&origin, &[destination], &hops, 2000.0, &model).expect("routes");
    assert_eq!(routes[0].score(), 5);
    assert_eq!(
        routes[0].labels()[1..3],
        ["[Ogisen Fringe] Hermits Gate", "[Loquoy Expanse] Far Landing"]
    );
}

#[test]
fn unknown_names_suggest_neighbours() {
    let catalog = fixture_catalog();
    let err = catalog.find_system("Hermit Gate").expect_err("misspelled");
    let message = err.to_string();
    assert!(message.contains("Did you mean 'Hermits Gate'?"), "{message}");
}

#[test]
fn stats_cover_inner_inward_hops() {
    let stats = hop_stats(fixture_catalog().hops());
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].region, "Ibelek Cluster");
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = HopCatalog::from_path(&dir.path().join("absent.csv")).expect_err("missing");
    assert!(matches!(err, Error::HopDataNotFound { .. }));
}

#[test]
fn duplicate_rows_fail_validation() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("hops.csv");
    let mut contents = fs::read_to_string(fixtures_dir().join("hops.csv")).expect("read fixture");
    let duplicate = contents.lines().nth(2).expect("row").to_string();
    contents.push_str(&duplicate);
    contents.push('\n');
    fs::write(&path, contents).expect("write copy");

    let catalog = HopCatalog::from_path(&path).expect("loads");
    let err = validate(catalog.hops()).into_result().expect_err("duplicate");
    assert!(err.to_string().contains("duplicate black hole: Hermits Gate@[1,4]"), "{err}");
}
