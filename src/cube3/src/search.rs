//! Bounded depth-first lookahead over move sequences.
//!
//! The search is exhaustive and unpruned: it tries every action in
//! [`Action::ALL`] order at every level and returns the first sequence that
//! satisfies the goal, which is not necessarily the shortest one within the
//! depth bound.

use std::{
    panic,
    thread::{self, ScopedJoinHandle},
};

use log::trace;

use crate::{
    moves::Action,
    state::{CubeState, Pattern},
};

fn candidates(whole_cube_turns: bool) -> &'static [Action] {
    if whole_cube_turns {
        &Action::ALL
    } else {
        &Action::LAYER_TURNS
    }
}

/// Depth-first search below `state`. On success `path` holds the moves taken.
fn descend(
    state: &CubeState,
    goal: &Pattern,
    depth: usize,
    actions: &[Action],
    path: &mut Vec<Action>,
) -> bool {
    if state.matches(goal) {
        return true;
    }
    if depth == 0 {
        return false;
    }
    for &action in actions {
        path.push(action);
        if descend(&state.apply(action), goal, depth - 1, actions, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// Finds the first sequence of at most `max_depth` actions that takes `state`
/// to a state matching `goal`. Whole-cube turns are only tried when
/// `whole_cube_turns` is set.
#[must_use]
pub fn search(
    state: &CubeState,
    goal: &Pattern,
    max_depth: usize,
    whole_cube_turns: bool,
) -> Option<Vec<Action>> {
    trace!("Searching to depth {max_depth}");
    let mut path = Vec::with_capacity(max_depth);
    descend(state, goal, max_depth, candidates(whole_cube_turns), &mut path).then_some(path)
}

/// Same result as [`search`], with each first move explored on its own
/// thread.
#[must_use]
pub fn search_parallel(
    state: &CubeState,
    goal: &Pattern,
    max_depth: usize,
    whole_cube_turns: bool,
) -> Option<Vec<Action>> {
    if state.matches(goal) {
        return Some(Vec::new());
    }
    if max_depth == 0 {
        return None;
    }
    trace!("Searching to depth {max_depth} in parallel");
    let actions = candidates(whole_cube_turns);

    thread::scope(|s| {
        let branches = actions
            .iter()
            .map(|&action| {
                s.spawn(move || {
                    let mut path = Vec::with_capacity(max_depth);
                    path.push(action);
                    descend(&state.apply(action), goal, max_depth - 1, actions, &mut path)
                        .then_some(path)
                })
            })
            .collect::<Vec<_>>();

        first_found(branches)
    })
}

/// Joins `branches` in spawn order, which keeps the enumeration-order result.
/// A panic in any branch joined is resumed on the caller.
fn first_found<T>(branches: Vec<ScopedJoinHandle<'_, Option<T>>>) -> Option<T> {
    branches
        .into_iter()
        .find_map(|branch| branch.join().unwrap_or_else(|e| panic::resume_unwind(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::{Face, Facelet},
        moves::{apply_sequence, parse_sequence},
        state::Color,
    };

    #[test]
    fn already_matching() {
        let solved = CubeState::solved();
        assert_eq!(search(&solved, &Pattern::dont_care(), 0, false), Some(vec![]));
        assert_eq!(
            search_parallel(&solved, &Pattern::dont_care(), 3, true),
            Some(vec![])
        );
    }

    #[test]
    fn undoes_a_single_move() {
        let state = CubeState::solved().apply(Action::R);
        let goal = Pattern::centers(crate::state::STANDARD_SCHEME)
            .with(Facelet::new(Face::Front, 0, 2), Color::Blue)
            .with(Facelet::new(Face::Top, 0, 2), Color::White);
        assert_eq!(search(&state, &goal, 0, false), None);
        assert_eq!(search(&state, &goal, 1, false), Some(vec![Action::RPrime]));
    }

    #[test]
    fn first_in_enumeration_order() {
        // U' is the first layer turn that brings blue back to FRONT(0,0).
        let state = CubeState::solved().apply(Action::U);
        let goal = Pattern::dont_care().with(Facelet::new(Face::Front, 0, 0), Color::Blue);
        assert_eq!(search(&state, &goal, 1, false), Some(vec![Action::UPrime]));
        // Whole-cube turns come first when allowed.
        assert_eq!(
            search(&state, &goal, 1, true),
            Some(vec![Action::TurnCounterClockwise])
        );
    }

    #[test]
    fn parallel_agrees_with_sequential() {
        let scrambled = apply_sequence(&CubeState::solved(), parse_sequence("F R U'").unwrap());
        let goal = Pattern::centers(crate::state::STANDARD_SCHEME)
            .with(Facelet::new(Face::Top, 2, 1), Color::White)
            .with(Facelet::new(Face::Front, 0, 1), Color::Blue);
        for depth in 0..=3 {
            assert_eq!(
                search(&scrambled, &goal, depth, false),
                search_parallel(&scrambled, &goal, depth, false),
                "depth {depth}"
            );
        }
    }

    #[test]
    fn joins_in_spawn_order() {
        let found = thread::scope(|s| {
            let branches = [None, Some(1), Some(2)]
                .into_iter()
                .map(|result| s.spawn(move || result))
                .collect();
            first_found(branches)
        });
        assert_eq!(found, Some(1));
    }

    #[test]
    #[should_panic(expected = "branch failed")]
    fn branch_panics_reach_the_caller() {
        thread::scope(|s| {
            let branches = vec![
                s.spawn(|| -> Option<u8> { panic!("branch failed") }),
                s.spawn(|| Some(2)),
            ];
            first_found(branches)
        });
    }
}
