mod common;

use bhroute_lib::{
    find_route, find_route_with, find_routes, find_routes_with, NodeRole, Optimization,
    SearchTuning,
};

use common::{hop, system};

const RANGE: f64 = 2000.0;

fn scenario() -> (bhroute_lib::System, bhroute_lib::System, Vec<bhroute_lib::Hop>) {
    let origin = system("Origin", "0100:007F:0100:0001");
    let destination = system("Destination", "0601:007F:0600:0004");
    let hops = vec![
        hop(("Gate", "0101:007F:0100:0002"), ("Landing", "0600:007F:0600:0003")),
        // Points the other way: from beside the destination back toward the origin.
        hop(("Backwater", "0600:007F:0601:0005"), ("Drift", "0102:007F:0100:0006")),
    ];
    (origin, destination, hops)
}

#[test]
fn black_hole_beats_direct_flight() {
    let (origin, destination, hops) = scenario();
    let model = Optimization::Time.cost_model();

    let routes = find_routes(&origin, &[destination], &hops, RANGE, &model).expect("routes");
    assert_eq!(routes.len(), 1);
    let route = &routes[0];

    assert_eq!(route.score(), 5);
    assert_eq!(
        route.labels(),
        vec![
            "[Fixture] Origin",
            "[Fixture] Gate",
            "[Fixture] Landing",
            "[Fixture] Destination",
        ]
    );
    let roles: Vec<NodeRole> = route.steps().iter().map(|step| step.role).collect();
    assert_eq!(
        roles,
        vec![NodeRole::Origin, NodeRole::BlackHole, NodeRole::Exit, NodeRole::Destination]
    );
}

#[test]
fn direct_flight_without_hops() {
    let (origin, destination, _) = scenario();
    let model = Optimization::Time.cost_model();

    // 1,810.9 units is 724,362 ly: 363 jumps plus the waypoint overhead.
    let routes = find_routes(&origin, &[destination], &[], RANGE, &model).expect("routes");
    assert_eq!(routes[0].score(), 367);
    assert_eq!(routes[0].hop_count(), 1);
}

#[test]
fn hops_are_one_way() {
    let (origin, destination, hops) = scenario();
    let model = Optimization::Time.cost_model();

    let forward = find_routes(&origin, &[destination.clone()], &hops, RANGE, &model).expect("routes");
    let reverse =
        find_routes(&destination, &[origin], &hops[..1], RANGE, &model).expect("routes");

    assert_eq!(forward[0].score(), 5);
    assert_eq!(reverse[0].score(), 367);
    assert_eq!(reverse[0].labels(), vec!["[Fixture] Destination", "[Fixture] Origin"]);
}

#[test]
fn fuel_profile_treats_black_holes_as_free() {
    let (origin, destination, hops) = scenario();
    let model = Optimization::Fuel.cost_model();

    let routes = find_routes(&origin, &[destination], &hops, RANGE, &model).expect("routes");
    assert_eq!(routes[0].score(), 2);
}

#[test]
fn forward_and_backward_agree() {
    let (origin, destination, hops) = scenario();

    for optimization in [Optimization::Fuel, Optimization::Time] {
        let model = optimization.cost_model();
        for (from, to) in [(&origin, &destination), (&destination, &origin)] {
            let forward =
                find_routes(from, std::slice::from_ref(to), &hops, RANGE, &model).expect("forward");
            let backward =
                find_route(std::slice::from_ref(from), to, &hops, RANGE, &model).expect("backward");

            assert_eq!(forward[0].score(), backward[0].score(), "{optimization}");
            assert_eq!(forward[0].labels(), backward[0].labels(), "{optimization}");
        }
    }
}

#[test]
fn same_system_costs_nothing() {
    let (origin, _, hops) = scenario();
    let model = Optimization::Time.cost_model();

    let routes = find_routes(&origin, &[origin.clone()], &hops, RANGE, &model).expect("routes");
    assert_eq!(routes[0].score(), 0);
    assert_eq!(routes[0].steps().len(), 1);
    assert_eq!(routes[0].start().role, NodeRole::Origin);

    let routes = find_route(&[origin.clone()], &origin, &hops, RANGE, &model).expect("routes");
    assert_eq!(routes[0].score(), 0);
}

#[test]
fn many_destinations_keep_input_order() {
    let (origin, destination, hops) = scenario();
    let near_landing = system("Near Landing", "0600:007F:0600:0009");
    let model = Optimization::Time.cost_model();

    let destinations = [destination, origin.clone(), near_landing];
    let routes = find_routes(&origin, &destinations, &hops, RANGE, &model).expect("routes");

    let scores: Vec<u64> = routes.iter().map(|route| route.score()).collect();
    assert_eq!(scores, vec![5, 0, 4]);
    for (route, wanted) in routes.iter().zip(&destinations) {
        assert!(route.destination().system.is_same_star(wanted));
    }
}

#[test]
fn many_origins_keep_input_order() {
    let (origin, destination, hops) = scenario();
    let beside_gate = system("Beside Gate", "0101:007F:0100:0009");
    let model = Optimization::Time.cost_model();

    let origins = [beside_gate, origin];
    let routes = find_route(&origins, &destination, &hops, RANGE, &model).expect("routes");

    let scores: Vec<u64> = routes.iter().map(|route| route.score()).collect();
    assert_eq!(scores, vec![4, 5]);
    assert_eq!(routes[0].labels()[0], "[Fixture] Beside Gate");
    assert_eq!(routes[1].destination().role, NodeRole::Destination);
}

#[test]
fn starving_the_spatial_search_still_finds_a_route() {
    let (origin, destination, hops) = scenario();
    let model = Optimization::Time.cost_model();
    let tuning = SearchTuning {
        initial_window: 1,
        max_attempts: 1,
        min_candidates: 1,
        max_candidates: 1,
        ..SearchTuning::default()
    };

    let forward =
        find_routes_with(&origin, &[destination.clone()], &hops, RANGE, &model, &tuning).expect("routes");
    let backward =
        find_route_with(&[origin], &destination, &hops, RANGE, &model, &tuning).expect("routes");
    assert_eq!(forward[0].score(), 5);
    assert_eq!(forward, backward);
}
