// rust/engine/tests/search_contracts.rs
#![forbid(unsafe_code)]

/**
 * Move search contract and regression tests.
 *
 * Purpose:
 * - Pin the observable behavior of the best-move search, the easy sampler and
 *   the difficulty wrapper.
 *
 * What is tested:
 * - Tie-break: equal scores keep the first candidate (lowest rotation, then
 *   lowest offset).
 * - Fixture boards with a single clearly best placement.
 * - Sentinel `(0, 0)` on a board where nothing lands.
 * - Purity: inputs are untouched; grids are read as occupancy only.
 * - Easy/medium randomness through scripted and seeded random sources.
 * - Caller-side rejection of unvalidated easy moves on a live session.
 */
use duel_engine::{
    best_placement, choose_for_difficulty, compute_grid_features, empty_grid, evaluate,
    find_best_move, find_easy_move, is_valid_position, landing_row, occupancy, place, Difficulty,
    DifficultyPolicy, EasyPolicy, Grid, HeuristicPolicy, Kind, Move, Piece, Policy, RandomSource,
    ScriptedSource, Seat, SeededSource, Session, SessionConfig, SessionError, H, W,
};

fn fill_row_except(g: &mut Grid, r: usize, gaps: &[usize]) {
    for c in 0..W {
        g[r][c] = if gaps.contains(&c) { 0 } else { 1 };
    }
}

fn fixture_grid() -> Grid {
    let mut g = empty_grid();
    fill_row_except(&mut g, H - 1, &[3]);
    fill_row_except(&mut g, H - 2, &[6]);
    for c in [0usize, 2, 7, 9] {
        g[H - 3][c] = 3;
    }
    g
}

fn blocked_grid() -> Grid {
    [[1u8; W]; H]
}

// ---------------------------------------------------------------------------
// Best move
// ---------------------------------------------------------------------------

#[test]
fn o_piece_on_empty_board_lands_flush_at_lowest_tied_offset() {
    let g = empty_grid();
    let o = Kind::O.shape();

    let p = best_placement(&o, &g).expect("empty board always has a placement");
    assert_eq!(p.mv, Move::new(0, 0));
    assert_eq!(p.landing_row, 18);
    assert_eq!(p.cleared_lines, 0);

    // The mirrored placement scores the same; the first one seen wins.
    let mirrored = place(&g, &o, 8, 18, 1);
    assert_eq!(evaluate(&compute_grid_features(&mirrored), 0), p.score);

    assert_eq!(find_best_move(&o, &g), Move::new(0, 0));
}

#[test]
fn evaluate_weighs_features_and_lines() {
    let flat = compute_grid_features(&empty_grid());
    assert_eq!(evaluate(&flat, 0), 0.0);
    assert_eq!(evaluate(&flat, 1), 0.760666);

    let mut g = empty_grid();
    g[H - 1][0] = 1;
    let f = compute_grid_features(&g);
    // one cell: aggregate height 1, bumpiness 1, height diff 1; no holes or wells
    let expected = -0.510066 - 0.184483 - 0.2;
    assert!((evaluate(&f, 0) - expected).abs() < 1e-12);
}

#[test]
fn i_piece_on_empty_board_prefers_flat_over_upright() {
    let g = empty_grid();
    assert_eq!(find_best_move(&Kind::I.shape(), &g), Move::new(0, 0));
}

#[test]
fn search_takes_the_line_clear() {
    let mut g = empty_grid();
    fill_row_except(&mut g, H - 1, &[6, 7, 8, 9]);

    let p = best_placement(&Kind::I.shape(), &g).expect("placement exists");
    assert_eq!(p.mv, Move::new(6, 0));
    assert_eq!(p.cleared_lines, 1);
    assert_eq!(p.landing_row, 19);
    assert!((p.score - 0.760666).abs() < 1e-12);
}

#[test]
fn search_fills_the_vertical_slot() {
    let mut g = empty_grid();
    for r in (H - 4)..H {
        fill_row_except(&mut g, r, &[4]);
    }

    let p = best_placement(&Kind::I.shape(), &g).expect("placement exists");
    assert_eq!(p.mv.rotations, 1);
    assert_eq!(p.mv.offset, 4);
    assert_eq!(p.cleared_lines, 4);
}

#[test]
fn chosen_move_is_a_legal_landing() {
    let g = fixture_grid();
    for &k in Kind::standard() {
        let shape = k.shape();
        let p = best_placement(&shape, &g).expect("fixture leaves room");
        let turned = shape.rotated(p.mv.rotations);
        assert_eq!(landing_row(&g, &turned, p.mv.offset), Some(p.landing_row));
        assert!(is_valid_position(&g, &turned, p.mv.offset, p.landing_row));
    }
}

#[test]
fn blocked_board_returns_sentinel() {
    let g = blocked_grid();
    for &k in Kind::standard() {
        assert!(best_placement(&k.shape(), &g).is_none());
        assert_eq!(find_best_move(&k.shape(), &g), Move::default());
    }
}

#[test]
fn search_is_deterministic_and_does_not_mutate_inputs() {
    let g = fixture_grid();
    let shape = Kind::L.shape();
    let g_before = g;
    let s_before = shape;

    let mut p = HeuristicPolicy::new();
    let a1 = p.choose_move(&shape, &g);
    let a2 = p.choose_move(&shape, &g);

    assert_eq!(a1, a2);
    assert_eq!(g, g_before);
    assert_eq!(shape, s_before);
}

#[test]
fn cell_codes_are_read_as_plain_occupancy() {
    let g = fixture_grid();
    let mut colored = g;
    for row in colored.iter_mut() {
        for v in row.iter_mut() {
            if *v != 0 {
                *v = 7;
            }
        }
    }
    assert_eq!(occupancy(&colored), occupancy(&g));

    for &k in Kind::standard() {
        assert_eq!(
            best_placement(&k.shape(), &colored),
            best_placement(&k.shape(), &g)
        );
    }
}

// ---------------------------------------------------------------------------
// Easy move
// ---------------------------------------------------------------------------

#[test]
fn easy_move_always_returns_within_sampled_range() {
    let g = fixture_grid();
    let shape = Kind::T.shape();
    let mut rng = SeededSource::new(2024);

    for _ in 0..100 {
        let mv = find_easy_move(&shape, &g, &mut rng);
        assert!(mv.rotations < 4);
        assert!((0..7).contains(&mv.offset));
    }
}

#[test]
fn easy_move_picks_highest_random_score() {
    // 4 rotations x 3 samples, each sample reads (offset draw, score draw).
    let mut values = Vec::with_capacity(24);
    for i in 0..12 {
        if i == 7 {
            values.extend([0.5, 0.9]);
        } else {
            values.extend([0.0, 0.1]);
        }
    }
    let mut rng = ScriptedSource::new(values);

    let mv = find_easy_move(&Kind::J.shape(), &empty_grid(), &mut rng);
    assert_eq!(mv, Move::new(3, 2));
    assert_eq!(rng.consumed(), 24);
}

#[test]
fn easy_move_ties_keep_first_sample() {
    let mut rng = ScriptedSource::new(vec![0.99, 0.5]);
    let mv = find_easy_move(&Kind::S.shape(), &empty_grid(), &mut rng);
    assert_eq!(mv, Move::new(6, 0));
}

#[test]
fn easy_policy_is_seed_deterministic() {
    let g = fixture_grid();
    let shape = Kind::Z.shape();
    let mut p1 = EasyPolicy::new(SeededSource::new(42));
    let mut p2 = EasyPolicy::new(SeededSource::new(42));
    for _ in 0..12 {
        assert_eq!(p1.choose_move(&shape, &g), p2.choose_move(&shape, &g));
    }
}

#[test]
fn unvalidated_easy_moves_are_rejected_before_touching_live_board() {
    let mut session = Session::new(SessionConfig { seed: 7 });
    {
        let ai = session.player_mut(Seat::Ai);
        ai.active = Piece::spawn(Kind::I);
        // Block the top-right corner so some spawn-row offsets collide.
        for r in 0..4 {
            for c in 5..W {
                ai.grid[r][c] = 1;
            }
        }
    }

    let mut rng = SeededSource::new(99);
    let mut rejected = 0usize;
    for _ in 0..100 {
        let (shape, grid) = session.ai_snapshot();
        let mv = find_easy_move(&shape, &grid, &mut rng);

        let mut trial = session.clone();
        match trial.apply_move(Seat::Ai, mv) {
            Ok(_) => {}
            Err(SessionError::IllegalPlacement { offset, rotations }) => {
                assert_eq!((offset, rotations), (mv.offset, mv.rotations));
                assert_eq!(trial.player(Seat::Ai).grid, grid);
                assert_eq!(trial.player(Seat::Ai).pieces_locked, 0);
                rejected += 1;
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert!(rejected > 0);
    assert!(rejected < 100);

    let mut live = session.clone();
    let off_board = Move::new(-3, 0);
    assert_eq!(
        live.apply_move(Seat::Ai, off_board),
        Err(SessionError::IllegalPlacement {
            offset: -3,
            rotations: 0
        })
    );
    assert_eq!(live.player(Seat::Ai).grid, session.player(Seat::Ai).grid);
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

#[test]
fn hard_is_plain_best_move_and_consumes_no_randomness() {
    let g = fixture_grid();
    let shape = Kind::T.shape();
    let mut rng = ScriptedSource::new(vec![0.0]);
    let mv = choose_for_difficulty(Difficulty::Hard, &shape, &g, &mut rng);
    assert_eq!(mv, find_best_move(&shape, &g));
    assert_eq!(rng.consumed(), 0);
}

#[test]
fn medium_perturbs_offset_only_below_threshold() {
    let g = empty_grid();
    let o = Kind::O.shape();

    let mut calm = ScriptedSource::new(vec![0.5]);
    assert_eq!(
        choose_for_difficulty(Difficulty::Medium, &o, &g, &mut calm),
        Move::new(0, 0)
    );
    assert_eq!(calm.consumed(), 1);

    let mut left = ScriptedSource::new(vec![0.1, 0.0]);
    assert_eq!(
        choose_for_difficulty(Difficulty::Medium, &o, &g, &mut left),
        Move::new(-1, 0)
    );

    let mut stay = ScriptedSource::new(vec![0.29, 0.5]);
    assert_eq!(
        choose_for_difficulty(Difficulty::Medium, &o, &g, &mut stay),
        Move::new(0, 0)
    );
    assert_eq!(stay.consumed(), 2);

    let mut right = ScriptedSource::new(vec![0.0, 0.99]);
    assert_eq!(
        choose_for_difficulty(Difficulty::Medium, &o, &g, &mut right),
        Move::new(1, 0)
    );
}

#[test]
fn easy_difficulty_routes_to_sampler() {
    let mut rng = ScriptedSource::new(vec![0.99, 0.5]);
    let mv = choose_for_difficulty(Difficulty::Easy, &Kind::T.shape(), &fixture_grid(), &mut rng);
    assert_eq!(mv, Move::new(6, 0));
    assert_eq!(rng.consumed(), 24);
}

#[test]
fn difficulty_policy_uses_injected_source() {
    let mut script = ScriptedSource::new(vec![0.1, 0.99]);
    let shape = Kind::O.shape();
    let g = empty_grid();
    {
        let mut p = DifficultyPolicy::new(Difficulty::Medium, &mut script);
        assert_eq!(p.choose_move(&shape, &g), Move::new(1, 0));
        p.set_difficulty(Difficulty::Hard);
        assert_eq!(p.difficulty(), Difficulty::Hard);
        assert_eq!(p.choose_move(&shape, &g), Move::new(0, 0));
    }
    assert_eq!(script.consumed(), 2);
}

#[test]
fn difficulty_parses_and_paces() {
    assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
    assert_eq!(" Medium ".parse::<Difficulty>(), Ok(Difficulty::Medium));
    assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
    assert!("insane".parse::<Difficulty>().is_err());

    for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        assert_eq!(d.to_string().parse::<Difficulty>(), Ok(d));
    }
    assert_eq!(Difficulty::default(), Difficulty::Medium);
    assert!(Difficulty::Easy.move_delay() > Difficulty::Medium.move_delay());
    assert!(Difficulty::Medium.move_delay() > Difficulty::Hard.move_delay());
}

#[test]
fn scripted_source_below_matches_floor_semantics() {
    let mut rng = ScriptedSource::new(vec![0.0, 0.34, 0.67, 0.999]);
    let got: Vec<i32> = (0..4).map(|_| rng.below(3)).collect();
    assert_eq!(got, vec![0, 1, 2, 2]);
}
