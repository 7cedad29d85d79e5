use cube3::{Action, CubeState, apply_sequence, parse_sequence};

fn reachable_states() -> Vec<CubeState> {
    ["", "R", "F U' L2", "TCW B D R' TF U2", "L D B' R2 F U' TB D2"]
        .into_iter()
        .map(|moves| apply_sequence(&CubeState::solved(), parse_sequence(moves).unwrap()))
        .collect()
}

#[test_log::test]
fn test_inverse_undoes_every_action() {
    for state in reachable_states() {
        for action in Action::ALL {
            assert_eq!(
                state.apply(action).apply(action.inverse()),
                state,
                "{action} then {}",
                action.inverse()
            );
        }
    }
}

#[test_log::test]
fn test_four_quarter_turns_are_identity() {
    for state in reachable_states() {
        for action in Action::ALL {
            assert_eq!(apply_sequence(&state, [action; 4]), state, "{action}");
        }
    }
}

#[test_log::test]
fn test_actions_permute_stickers() {
    for state in reachable_states() {
        for action in Action::ALL {
            assert_eq!(state.apply(action).color_counts(), [9; 6]);
        }
    }
}

#[test_log::test]
fn test_layer_turns_keep_centers() {
    let state = reachable_states()[4];
    for action in Action::LAYER_TURNS {
        let turned = state.apply(action);
        for face in cube3::Face::ALL {
            assert_eq!(turned.center(face), state.center(face));
        }
    }
}

#[test_log::test]
fn test_sequence_inverse() {
    let moves = parse_sequence("R U R' U' F2 TCW D").unwrap();
    let undo = moves.iter().rev().map(|action| action.inverse());
    let scrambled = apply_sequence(&CubeState::solved(), moves.iter().copied());
    assert!(!scrambled.is_solved());
    assert!(apply_sequence(&scrambled, undo).is_solved());
}
