use std::fmt;

use log::{debug, trace};

use crate::{
    config::SolverConfig,
    moves::Action,
    search::{search, search_parallel},
    solver::{self, SolveError},
    state::{CubeState, Pattern},
};

/// Receives every action committed to a [`Cube3`], together with the state
/// it produced.
pub trait ActionObserver {
    fn action_performed(&mut self, action: Action, state: &CubeState);
}

impl<F: FnMut(Action, &CubeState)> ActionObserver for F {
    fn action_performed(&mut self, action: Action, state: &CubeState) {
        self(action, state);
    }
}

/// A physical cube: its current state, the moves performed on it, and an
/// optional observer that sees each move as it happens.
pub struct Cube3 {
    state: CubeState,
    moves: Vec<Action>,
    observer: Option<Box<dyn ActionObserver>>,
    config: SolverConfig,
}

impl Cube3 {
    #[must_use]
    pub fn new(state: CubeState) -> Self {
        Self::with_config(state, SolverConfig::default())
    }

    #[must_use]
    pub fn with_config(state: CubeState, config: SolverConfig) -> Self {
        Self {
            state,
            moves: Vec::new(),
            observer: None,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> CubeState {
        self.state
    }

    pub fn set_state(&mut self, state: CubeState) {
        self.state = state;
    }

    /// Every action performed since the last solve started.
    #[must_use]
    pub fn moves_performed(&self) -> &[Action] {
        &self.moves
    }

    pub fn set_observer(&mut self, observer: Box<dyn ActionObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub(crate) fn clear_moves(&mut self) {
        self.moves.clear();
    }

    /// Applies `action`, records it, and notifies the observer.
    pub fn perform_action(&mut self, action: Action) {
        trace!("{action}");
        self.state = self.state.apply(action);
        self.moves.push(action);
        if let Some(observer) = &mut self.observer {
            observer.action_performed(action, &self.state);
        }
    }

    pub fn perform_sequence(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.perform_action(action);
        }
    }

    /// Brings the cube to `goal` with the first sequence found by a lookahead
    /// of `min_depth` moves, then one deeper, and so on up to `max_depth`.
    /// Returns whether the goal holds afterwards; on failure nothing is
    /// performed.
    pub fn increment_lookahead(
        &mut self,
        min_depth: usize,
        max_depth: usize,
        goal: &Pattern,
        whole_cube_turns: bool,
    ) -> bool {
        if self.state.matches(goal) {
            return true;
        }
        for depth in min_depth..=max_depth {
            let found = if self.config.parallel_search {
                search_parallel(&self.state, goal, depth, whole_cube_turns)
            } else {
                search(&self.state, goal, depth, whole_cube_turns)
            };
            if let Some(actions) = found {
                debug!("Lookahead found {} moves at depth {depth}", actions.len());
                self.perform_sequence(actions);
                return true;
            }
        }
        false
    }

    /// Solves the cube layer by layer. The moves taken are available from
    /// [`Cube3::moves_performed`] afterwards, even when solving fails.
    ///
    /// # Errors
    ///
    /// Fails on a state that cannot be reached from the solved cube, or if a
    /// stage cannot make progress.
    pub fn solve(&mut self) -> Result<(), SolveError> {
        solver::solve(self)
    }
}

impl Default for Cube3 {
    fn default() -> Self {
        Self::new(CubeState::solved())
    }
}

impl fmt::Debug for Cube3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cube3")
            .field("state", &self.state.to_string())
            .field("moves", &self.moves)
            .field("observed", &self.observer.is_some())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::geometry::{Face, Facelet};
    use crate::state::Color;

    #[test]
    fn observer_sees_every_move() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut cube = Cube3::default();
        let log = Rc::clone(&seen);
        cube.set_observer(Box::new(move |action: Action, state: &CubeState| {
            log.borrow_mut().push((action, *state));
        }));

        cube.perform_sequence([Action::R, Action::U]);
        cube.clear_observer();
        cube.perform_action(Action::F);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, Action::R);
        assert_eq!(seen[0].1, CubeState::solved().apply(Action::R));
        assert_eq!(seen[1].1.apply(Action::F), cube.state());
        assert_eq!(cube.moves_performed(), [Action::R, Action::U, Action::F]);
    }

    #[test]
    fn lookahead_commits_moves() {
        let mut cube = Cube3::new(CubeState::solved().apply(Action::DPrime));
        let goal = Pattern::dont_care().with(Facelet::new(Face::Front, 2, 1), Color::Blue);

        assert!(!cube.increment_lookahead(0, 0, &goal, false));
        assert!(cube.moves_performed().is_empty());

        assert!(cube.increment_lookahead(1, 2, &goal, false));
        assert_eq!(cube.moves_performed(), [Action::D]);
        assert!(cube.state().matches(&goal));

        // Already satisfied, so nothing more is performed.
        assert!(cube.increment_lookahead(1, 2, &goal, false));
        assert_eq!(cube.moves_performed().len(), 1);
    }
}
