use std::{cell::Cell, rc::Rc};

use cube3::{
    Action, Color, Cube3, CubeState, Face, Facelet, IllegalStateError, SolveError, SolverConfig,
    Stage, apply_sequence, check_legality, parse_sequence,
};
use itertools::Itertools;
use log::info;

const SAMPLES: [(&str, usize); 5] = [
    (
        "rbwyywogr yryorygyg bgbogoybw orwwowgyb grbrbbrgy rboowwwgo",
        153,
    ),
    (
        "wbwrwrygr goyygywwg bbrbrbywy bobwbybrg owrgoowro googygryo",
        143,
    ),
    (
        "ywygrwrww wbogwbwbg ggrrgbwgo gobyyryog robybryrb oorwoyoyb",
        140,
    ),
    (
        "ygrrywyoo bwwgbwyrg bgbrrywbr wyrogrboo gbogoowyg oyrbwwgby",
        132,
    ),
    (
        "oyryowboy obgrworyo ogbwbwwrr wrwbyyboy bbyggbggw gogrrwrgy",
        101,
    ),
];

const SOLVED: &str = "wwwwwwwww bbbbbbbbb ooooooooo ggggggggg rrrrrrrrr yyyyyyyyy";

fn parse(state: &str) -> CubeState {
    state.parse().unwrap()
}

#[test_log::test]
fn test_samples() {
    for (state, expected) in SAMPLES {
        let state = parse(state);
        assert_eq!(check_legality(&state), Ok(()));

        let mut cube = Cube3::new(state);
        cube.solve().unwrap();
        assert!(cube.state().is_solved());
        assert_eq!(cube.moves_performed().len(), expected);

        let replayed = apply_sequence(&state, cube.moves_performed().iter().copied());
        assert_eq!(replayed, cube.state());
        info!("{}", cube.moves_performed().iter().join(" "));
    }
}

#[test_log::test]
fn test_first_moves() {
    let mut cube = Cube3::new(parse(SAMPLES[0].0));
    cube.solve().unwrap();
    assert_eq!(
        cube.moves_performed()[..12],
        parse_sequence("TCW TF TF U U U' B U B U' F' U").unwrap()
    );
}

#[test_log::test]
fn test_already_solved() {
    let mut cube = Cube3::new(parse(SOLVED));
    cube.solve().unwrap();
    assert!(cube.moves_performed().is_empty());

    // Held differently but still solved.
    let mut cube = Cube3::new(CubeState::solved().apply(Action::TiltForward));
    cube.solve().unwrap();
    assert!(cube.moves_performed().is_empty());
}

#[test_log::test]
fn test_solve_is_deterministic() {
    for (state, _) in SAMPLES {
        let mut first = Cube3::new(parse(state));
        let mut second = Cube3::new(parse(state));
        first.solve().unwrap();
        second.solve().unwrap();
        assert_eq!(first.moves_performed(), second.moves_performed());
    }
}

#[test_log::test]
fn test_solving_twice() {
    let mut cube = Cube3::new(parse(SAMPLES[1].0));
    cube.solve().unwrap();
    cube.solve().unwrap();
    assert!(cube.moves_performed().is_empty());
}

#[test_log::test]
fn test_parallel_search_agrees() {
    let config = SolverConfig {
        parallel_search: true,
        ..SolverConfig::default()
    };
    for (state, expected) in SAMPLES.into_iter().take(2) {
        let mut cube = Cube3::with_config(parse(state), config);
        cube.solve().unwrap();
        assert!(cube.state().is_solved());
        assert_eq!(cube.moves_performed().len(), expected);
    }
}

#[test_log::test]
fn test_random_scrambles() {
    let mut rng = fastrand::Rng::with_seed(0x0c0b_e3);
    for _ in 0..20 {
        let scramble = (0..25)
            .map(|_| Action::ALL[rng.usize(..Action::ALL.len())])
            .collect_vec();
        let state = apply_sequence(&CubeState::solved(), scramble.iter().copied());

        let mut cube = Cube3::new(state);
        cube.solve()
            .unwrap_or_else(|e| panic!("{e} after {}", scramble.iter().join(" ")));
        assert!(cube.state().is_solved());
    }
}

#[test_log::test]
fn test_observer_sees_the_solution() {
    let count = Rc::new(Cell::new(0));
    let mut cube = Cube3::new(parse(SAMPLES[4].0));
    let seen = Rc::clone(&count);
    cube.set_observer(Box::new(move |_: Action, _: &CubeState| {
        seen.set(seen.get() + 1);
    }));
    cube.solve().unwrap();
    assert_eq!(count.get(), cube.moves_performed().len());
}

fn illegal(state: CubeState) -> IllegalStateError {
    match Cube3::new(state).solve() {
        Err(SolveError::IllegalState(e)) => e,
        other => panic!("expected an illegal state, got {other:?}"),
    }
}

#[test_log::test]
fn test_flipped_edge() {
    let mut state = apply_sequence(&CubeState::solved(), [Action::R, Action::U]);
    let (a, b) = (Facelet::new(Face::Top, 2, 1), Facelet::new(Face::Front, 0, 1));
    (state[a], state[b]) = (state[b], state[a]);
    assert_eq!(illegal(state), IllegalStateError::EdgeFlip);

    // Without the check the solver gets stuck instead.
    let config = SolverConfig {
        check_legality: false,
        ..SolverConfig::default()
    };
    let result = Cube3::with_config(state, config).solve();
    assert!(result.is_err());
    assert!(!matches!(result, Err(SolveError::IllegalState(_))));
}

#[test_log::test]
fn test_twisted_corner() {
    let mut state = CubeState::solved();
    let corner = [
        Facelet::new(Face::Top, 2, 2),
        Facelet::new(Face::Front, 0, 2),
        Facelet::new(Face::Right, 0, 0),
    ];
    let colors = corner.map(|facelet| state[facelet]);
    for (i, facelet) in corner.into_iter().enumerate() {
        state[facelet] = colors[(i + 1) % 3];
    }
    assert_eq!(illegal(state), IllegalStateError::CornerTwist);
}

#[test_log::test]
fn test_swapped_edges() {
    let mut state = CubeState::solved();
    state[Facelet::new(Face::Front, 0, 1)] = Color::Orange;
    state[Facelet::new(Face::Right, 0, 1)] = Color::Blue;
    assert_eq!(illegal(state), IllegalStateError::PermutationParity);
}

#[test_log::test]
fn test_mirrored_colors() {
    let mut state = parse(SAMPLES[2].0);
    for facelet in Facelet::all() {
        state[facelet] = match state[facelet] {
            Color::Orange => Color::Red,
            Color::Red => Color::Orange,
            color => color,
        };
    }
    assert_eq!(illegal(state), IllegalStateError::CenterScheme);
}

#[test_log::test]
fn test_wrong_color_count() {
    let mut state = CubeState::solved();
    state[Facelet::new(Face::Bottom, 0, 0)] = Color::White;
    assert_eq!(
        illegal(state),
        IllegalStateError::ColorCount {
            color: Color::White,
            count: 10
        }
    );
}

#[test_log::test]
fn test_loop_limit() {
    let config = SolverConfig {
        max_loop_iterations: 0,
        ..SolverConfig::default()
    };

    let mut cube = Cube3::with_config(parse(SAMPLES[0].0), config);
    assert!(matches!(
        cube.solve(),
        Err(SolveError::LoopLimit {
            stage: Stage::FirstLayerCorners
        })
    ));
    // The moves taken before giving up are kept.
    assert!(!cube.moves_performed().is_empty());

    let mut cube = Cube3::with_config(parse(SAMPLES[1].0), config);
    assert!(matches!(
        cube.solve(),
        Err(SolveError::LoopLimit {
            stage: Stage::LastLayerCross
        })
    ));
}
