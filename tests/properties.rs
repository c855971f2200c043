//! Property tests over random point sets.

use proptest::prelude::*;
use tsp_anneal::anneal::{
    AnnealConfig, Annealer, CandidateSelector, NeighborSelector, Selector, SizeNeighborSelector,
    SizeScaleSelector, UniformSelector,
};
use tsp_anneal::geometry::Point;
use tsp_anneal::random::create_rng;
use tsp_anneal::tour::Tour;

fn points_strategy() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((0.0f64..10.0, 0.0f64..10.0), 6..40)
        .prop_map(|coords| coords.into_iter().map(Point::from).collect())
}

fn sorted(points: &[Point]) -> Vec<(f64, f64)> {
    let mut v: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    v.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    v
}

/// Half the shortest edge, so every position with a non-degenerate edge
/// lands in the pool.
fn small_scale(tour: &Tour) -> f64 {
    (0..tour.len())
        .map(|i| tour.edge_length(i))
        .filter(|&d| d > 0.0)
        .fold(f64::INFINITY, f64::min)
        * 0.5
}

fn selector_for(kind: usize, tour: &Tour) -> Selector {
    match kind {
        0 => UniformSelector::new().into(),
        1 => SizeScaleSelector::new(tour, small_scale(tour), 1.0)
            .unwrap()
            .into(),
        2 => NeighborSelector::new(tour, 4.0, 0.999).unwrap().into(),
        _ => SizeNeighborSelector::new(tour, small_scale(tour), 1.0, 4.0, 0.999)
            .unwrap()
            .into(),
    }
}

fn config(steps: usize) -> AnnealConfig {
    AnnealConfig::default()
        .with_total_steps(steps)
        .with_temperature(0.5)
        .with_temp_cool(0.999)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_annealing_preserves_points_and_tracks_energy(
        points in points_strategy(),
        kind in 0usize..4,
        seed in any::<u64>(),
    ) {
        let tour = Tour::new(points.clone()).unwrap();
        let initial = tour.energy();
        let selector = selector_for(kind, &tour);
        let mut annealer = Annealer::new(tour, selector, &config(300), create_rng(seed)).unwrap();

        let mut accepted_sum = 0.0;
        while let Some(outcome) = annealer.step_outcome() {
            if outcome.accepted {
                accepted_sum += outcome.delta;
            }
        }

        prop_assert_eq!(sorted(annealer.tour().points()), sorted(&points));
        let energy = annealer.current_energy();
        prop_assert!(
            (energy - (initial + accepted_sum)).abs() < 1e-8 * initial.max(1.0),
            "energy {} vs tracked {}", energy, initial + accepted_sum
        );
        prop_assert!(annealer.is_exhausted());
    }

    #[test]
    fn test_neighbor_mapping_follows_tour(
        points in points_strategy(),
        seed in any::<u64>(),
    ) {
        let tour = Tour::new(points.clone()).unwrap();
        let selector = NeighborSelector::new(&tour, 5.0, 0.998).unwrap();
        let mut annealer = Annealer::new(tour, selector, &config(200), create_rng(seed)).unwrap();
        annealer.by_ref().count();

        let mapping = annealer.selector().mapping();
        prop_assert!(mapping.is_consistent());
        for position in 0..annealer.tour().len() {
            prop_assert_eq!(annealer.tour().point(position), points[mapping.to_original(position)]);
        }
    }

    #[test]
    fn test_size_neighbor_mapping_follows_tour(
        points in points_strategy(),
        seed in any::<u64>(),
    ) {
        let tour = Tour::new(points.clone()).unwrap();
        let scale = small_scale(&tour);
        let selector = SizeNeighborSelector::new(&tour, scale, 1.0, 3.0, 1.0).unwrap();
        let mut annealer = Annealer::new(tour, selector, &config(200), create_rng(seed)).unwrap();
        annealer.by_ref().count();

        let selector = annealer.selector();
        prop_assert!(selector.mapping().is_consistent());
        for position in 0..annealer.tour().len() {
            prop_assert_eq!(
                annealer.tour().point(position),
                points[selector.mapping().to_original(position)]
            );
        }
        let n = annealer.tour().len();
        prop_assert!(selector.pool().iter().all(|&p| p < n));
        prop_assert!(selector.params().pool_size.is_some());
    }

    #[test]
    fn test_reversal_delta_matches_energy_change(
        points in points_strategy(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let mut tour = Tour::new(points).unwrap();
        let n = tour.len();
        let (begin, end) = {
            let (x, y) = (a.index(n), b.index(n));
            (x.min(y), x.max(y))
        };
        prop_assume!(begin != end && !(begin == 0 && end == n - 1));

        let before = tour.energy();
        let delta = tour.reversal_delta(begin, end);
        tour.reverse(begin, end);
        prop_assert!((tour.energy() - (before + delta)).abs() < 1e-9 * before.max(1.0));

        tour.reverse(begin, end);
        prop_assert!((tour.energy() - before).abs() < 1e-9 * before.max(1.0));
    }
}
