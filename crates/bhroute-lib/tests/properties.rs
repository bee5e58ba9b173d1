use bhroute_lib::{
    edge_weight, expected_jumps, find_route, find_routes, is_valid_hop, parse_coordinates,
    Coordinates, Hop, Optimization, System,
};
use proptest::prelude::*;

fn coordinates() -> impl Strategy<Value = Coordinates> {
    (0u16..=0xFFF, 0u16..=0xFF, 0u16..=0xFFF, 0u16..=0x2FF)
        .prop_map(|(x, y, z, s)| Coordinates::new(x, y, z, s).expect("in range"))
}

/// A small patch of neighbouring regions, where equal-cost routes are common.
fn crowded_coordinates() -> impl Strategy<Value = Coordinates> {
    (0x100u16..=0x110, 0x7Eu16..=0x80, 0x100u16..=0x110, 0u16..=0x0F)
        .prop_map(|(x, y, z, s)| Coordinates::new(x, y, z, s).expect("in range"))
}

fn hops_from(pairs: Vec<(Coordinates, Coordinates)>) -> Vec<Hop> {
    pairs
        .into_iter()
        .map(|(bh, exit)| Hop::new(system(bh), system(exit)))
        .collect()
}

fn assert_directions_agree(
    origin: &System,
    destination: &System,
    hops: &[Hop],
) -> Result<(), TestCaseError> {
    for optimization in [Optimization::Fuel, Optimization::Time] {
        let model = optimization.cost_model();
        let forward = find_routes(origin, std::slice::from_ref(destination), hops, 2000.0, &model)
            .expect("forward route");
        let backward = find_route(std::slice::from_ref(origin), destination, hops, 2000.0, &model)
            .expect("backward route");
        prop_assert_eq!(forward[0].score(), backward[0].score(), "{}", optimization);
        prop_assert_eq!(forward[0].labels(), backward[0].labels(), "{}", optimization);
    }
    Ok(())
}

fn system(coords: Coordinates) -> System {
    System::new("Prop", coords.to_string(), coords)
}

proptest! {
    #[test]
    fn display_parses_back(c in coordinates()) {
        prop_assert_eq!(parse_coordinates(&c.to_string()).unwrap(), c);
    }

    #[test]
    fn distance_is_symmetric(a in coordinates(), b in coordinates()) {
        prop_assert_eq!(a.distance_to(&b), b.distance_to(&a));
        prop_assert_eq!(expected_jumps(2000.0, &a, &b), expected_jumps(2000.0, &b, &a));
    }

    #[test]
    fn edge_weight_is_never_negative(a in coordinates(), b in coordinates()) {
        for optimization in [Optimization::Fuel, Optimization::Time] {
            prop_assert!(edge_weight(&optimization.cost_model(), 2000.0, &a, &b) >= 0.0);
        }
    }

    #[test]
    fn forward_and_backward_agree(
        origin in coordinates(),
        destination in coordinates(),
        hops in prop::collection::vec((coordinates(), coordinates()), 0..6),
    ) {
        let hops = hops_from(hops);
        assert_directions_agree(&system(origin), &system(destination), &hops)?;
    }

    #[test]
    fn forward_and_backward_agree_in_crowded_regions(
        origin in crowded_coordinates(),
        destination in crowded_coordinates(),
        hops in prop::collection::vec((crowded_coordinates(), crowded_coordinates()), 0..8),
    ) {
        let hops = hops_from(hops);
        assert_directions_agree(&system(origin), &system(destination), &hops)?;

        let valid: Vec<Hop> = hops.into_iter().filter(is_valid_hop).collect();
        assert_directions_agree(&system(origin), &system(destination), &valid)?;
    }
}
