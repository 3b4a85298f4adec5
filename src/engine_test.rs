use super::*;

fn triangle() -> Vec<Pt> {
    DEFAULT_VERTICES.to_vec()
}

/// Signed distance test against a counter-clockwise triangle.
fn inside_triangle(p: Pt, tri: &[Pt], tolerance: f64) -> bool {
    (0..3).all(|i| {
        let a = tri[i];
        let b = tri[(i + 1) % 3];
        let (ex, ey) = (b.x - a.x, b.y - a.y);
        let cross = ex * (p.y - a.y) - ey * (p.x - a.x);
        cross / ex.hypot(ey) >= -tolerance
    })
}

#[test]
fn new_engine_starts_paused_at_speed_one_with_empty_trace() {
    let game = ChaosGame::seeded(triangle(), 7).unwrap();
    assert!(game.trace().is_empty());
    assert!(!game.is_running());
    assert_eq!(game.speed(), MIN_SPEED);
    assert_eq!(game.vertices(), &DEFAULT_VERTICES[..]);

    let p = game.position();
    assert!((0.0..1.0).contains(&p.x));
    assert!((0.0..1.0).contains(&p.y));
}

#[test]
fn empty_vertex_set_is_rejected() {
    let err = ChaosGame::seeded(Vec::new(), 1).err();
    assert_eq!(err, Some(ChaosError::EmptyVertexSet));
}

#[test]
fn non_finite_vertex_is_rejected_with_its_index() {
    let vertices = vec![Pt::new(0.0, 0.0), Pt::new(1.0, f64::NAN)];
    let err = ChaosGame::seeded(vertices, 1).err();
    assert_eq!(err, Some(ChaosError::NonFiniteVertex { index: 1 }));
}

#[test]
fn non_finite_start_is_rejected() {
    let rng = StdRng::seed_from_u64(1);
    let err = ChaosGame::with_start(triangle(), rng, Pt::new(f64::INFINITY, 0.0)).err();
    assert_eq!(err, Some(ChaosError::NonFiniteStart));
}

#[test]
fn forced_step_toward_right_corner_lands_on_midpoint() {
    let rng = StdRng::seed_from_u64(42);
    let mut game = ChaosGame::with_start(triangle(), rng, Pt::new(0.5, 0.5)).unwrap();

    let outcome = game.step_toward(1).unwrap();

    assert_eq!(outcome.from, Pt::new(0.5, 0.5));
    assert_eq!(outcome.vertex, Pt::new(1.0, 0.0));
    assert_eq!(outcome.vertex_index, 1);
    assert_eq!(outcome.to, Pt::new(0.75, 0.25));
    assert_eq!(game.position(), Pt::new(0.75, 0.25));
    assert_eq!(game.trace(), &[Pt::new(0.75, 0.25)]);
}

#[test]
fn step_toward_unknown_vertex_leaves_state_untouched() {
    let mut game = ChaosGame::seeded(triangle(), 3).unwrap();
    let before = game.position();

    let err = game.step_toward(3).unwrap_err();

    assert_eq!(err, ChaosError::VertexOutOfRange { index: 3, len: 3 });
    assert!(game.trace().is_empty());
    assert_eq!(game.position(), before);
}

#[test]
fn trace_length_matches_step_count_and_tracks_position() {
    let mut game = ChaosGame::seeded(triangle(), 11).unwrap();
    for n in 1..=250 {
        let outcome = game.step();
        assert_eq!(game.trace().len(), n);
        assert_eq!(game.trace().last(), Some(&game.position()));
        assert_eq!(outcome.to, game.position());
        assert_eq!(outcome.vertex, game.vertices()[outcome.vertex_index]);
    }
}

#[test]
fn trace_length_matches_step_count_after_reset() {
    let mut game = ChaosGame::seeded(triangle(), 12).unwrap();
    for _ in 0..40 {
        game.step();
    }
    game.reset();
    for n in 1..=100 {
        game.step();
        assert_eq!(game.trace().len(), n);
        assert_eq!(game.trace().last(), Some(&game.position()));
    }
}

#[test]
fn each_step_reports_previous_position_as_origin() {
    let mut game = ChaosGame::seeded(triangle(), 5).unwrap();
    let mut previous = game.position();
    for _ in 0..50 {
        let outcome = game.step();
        assert_eq!(outcome.from, previous);
        assert_eq!(outcome.to, previous.midpoint(outcome.vertex));
        previous = outcome.to;
    }
}

#[test]
fn trace_stays_inside_triangle_when_starting_inside() {
    let tri = triangle();
    let rng = StdRng::seed_from_u64(2024);
    let mut game = ChaosGame::with_start(tri.clone(), rng, Pt::new(0.5, 0.3)).unwrap();
    for _ in 0..2000 {
        game.step();
    }
    assert!(game.trace().iter().all(|&p| inside_triangle(p, &tri, 1e-12)));
}

#[test]
fn trace_converges_into_triangle_from_any_start() {
    let tri = triangle();
    for seed in 0..20 {
        let mut game = ChaosGame::seeded(tri.clone(), seed).unwrap();
        for _ in 0..200 {
            game.step();
        }
        // distance to the hull halves every step
        assert!(game.trace()[20..].iter().all(|&p| inside_triangle(p, &tri, 1e-5)));
    }
}

#[test]
fn square_vertex_set_keeps_trace_in_unit_square() {
    let square = vec![
        Pt::new(0.0, 0.0),
        Pt::new(1.0, 0.0),
        Pt::new(1.0, 1.0),
        Pt::new(0.0, 1.0),
    ];
    let mut game = ChaosGame::seeded(square, 9).unwrap();
    for _ in 0..1000 {
        game.step();
    }
    let seen: std::collections::HashSet<usize> =
        (0..200).map(|_| game.step().vertex_index).collect();
    assert_eq!(seen.len(), 4);
    assert!(game
        .trace()
        .iter()
        .all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)));
}

#[test]
fn single_vertex_pulls_point_onto_it() {
    let mut game = ChaosGame::seeded(vec![Pt::new(0.25, 0.75)], 1).unwrap();
    for _ in 0..60 {
        let outcome = game.step();
        assert_eq!(outcome.vertex_index, 0);
    }
    let p = game.position();
    assert!((p.x - 0.25).abs() < 1e-12);
    assert!((p.y - 0.75).abs() < 1e-12);
}

#[test]
fn same_seed_gives_bit_identical_traces() {
    let mut a = ChaosGame::seeded(triangle(), 1234).unwrap();
    let mut b = ChaosGame::seeded(triangle(), 1234).unwrap();
    for _ in 0..500 {
        a.step();
        b.step();
    }
    let bits = |g: &ChaosGame| -> Vec<(u64, u64)> {
        g.trace().iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect()
    };
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn speed_doubles_up_to_max_and_halves_down_to_min() {
    let mut game = ChaosGame::seeded(triangle(), 0).unwrap();

    let ups: Vec<u32> = (0..10).map(|_| game.set_speed(SpeedChange::Increase)).collect();
    assert_eq!(ups, vec![2, 4, 8, 16, 32, 64, 64, 64, 64, 64]);

    let downs: Vec<u32> = (0..10).map(|_| game.set_speed(SpeedChange::Decrease)).collect();
    assert_eq!(downs, vec![32, 16, 8, 4, 2, 1, 1, 1, 1, 1]);
    assert_eq!(game.speed(), MIN_SPEED);
}

#[test]
fn initial_speed_is_clamped() {
    assert_eq!(ChaosGame::seeded(triangle(), 0).unwrap().with_speed(0).speed(), MIN_SPEED);
    assert_eq!(ChaosGame::seeded(triangle(), 0).unwrap().with_speed(1000).speed(), MAX_SPEED);
    assert_eq!(ChaosGame::seeded(triangle(), 0).unwrap().with_speed(17).speed(), 17);
}

#[test]
fn odd_initial_speed_keeps_doubling_up_to_max() {
    let mut game = ChaosGame::seeded(triangle(), 0).unwrap().with_speed(3);
    let ups: Vec<u32> = (0..6).map(|_| game.set_speed(SpeedChange::Increase)).collect();
    assert_eq!(ups, vec![6, 12, 24, 48, 64, 64]);
}

#[test]
fn tick_at_max_initial_speed_adds_max_points() {
    let mut game = ChaosGame::seeded(triangle(), 0).unwrap().with_speed(1000);
    game.toggle_running();
    game.tick();
    assert_eq!(game.trace().len(), MAX_SPEED as usize);
}

#[test]
fn toggle_running_flips_flag() {
    let mut game = ChaosGame::seeded(triangle(), 0).unwrap();
    assert!(game.toggle_running());
    assert!(game.is_running());
    assert!(!game.toggle_running());
    assert!(!game.is_running());
}

#[test]
fn tick_does_nothing_while_paused() {
    let mut game = ChaosGame::seeded(triangle(), 0).unwrap();
    let before = game.position();
    assert_eq!(game.tick(), None);
    assert!(game.trace().is_empty());
    assert_eq!(game.position(), before);
}

#[test]
fn tick_runs_speed_steps_and_returns_the_last() {
    let mut game = ChaosGame::seeded(triangle(), 0).unwrap();
    game.set_speed(SpeedChange::Increase);
    game.set_speed(SpeedChange::Increase);
    game.toggle_running();

    let last = game.tick().unwrap();
    assert_eq!(game.trace().len(), 4);
    assert_eq!(last.to, game.position());

    game.tick();
    assert_eq!(game.trace().len(), 8);
}

#[test]
fn reset_clears_trace_pauses_and_moves_point() {
    let mut game = ChaosGame::seeded(triangle(), 77).unwrap();
    game.toggle_running();
    game.set_speed(SpeedChange::Increase);
    for _ in 0..5 {
        game.tick();
    }
    let before = game.position();

    game.reset();

    assert!(game.trace().is_empty());
    assert!(!game.is_running());
    assert_ne!(game.position(), before);
    let p = game.position();
    assert!((0.0..1.0).contains(&p.x));
    assert!((0.0..1.0).contains(&p.y));
}

#[test]
fn reset_keeps_speed_and_vertices() {
    let mut game = ChaosGame::seeded(triangle(), 8).unwrap();
    game.set_speed(SpeedChange::Increase);
    game.reset();
    assert_eq!(game.speed(), 2);
    assert_eq!(game.vertices(), &DEFAULT_VERTICES[..]);
}
