mod estimator;
mod successor;

pub use estimator::estimate;
pub use successor::successors;

use crate::algorithm::{a_star_search, SearchOutcome, SearchSpace};
use crate::common::{BridgeError, Mode, Move, Side, WorldState};
use crate::stat::Stats;

use anyhow::Result;
use std::time::Instant;
use tracing::{debug, info};

pub type Solution = SearchOutcome<Move, WorldState>;

/// One run of the puzzle: where everybody starts, where they must end up,
/// and the rules for this run.
#[derive(Debug, Clone)]
pub struct BridgeProblem {
    initial: WorldState,
    goal: WorldState,
    mode: Mode,
    max_group_size: usize,
    start_side: Side,
}

impl BridgeProblem {
    pub fn new(initial: WorldState, goal: WorldState, mode: Mode, max_group_size: usize) -> Self {
        let start_side = initial.light();
        BridgeProblem {
            initial,
            goal,
            mode,
            max_group_size,
            start_side,
        }
    }

    pub fn initial(&self) -> &WorldState {
        &self.initial
    }

    pub fn goal(&self) -> &WorldState {
        &self.goal
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn max_group_size(&self) -> usize {
        self.max_group_size
    }

    pub fn heuristic(&self, state: &WorldState) -> Result<usize, BridgeError> {
        estimate(state, self.mode, self.start_side)
    }

    /// `f(n) = g(n) + h(n)`.
    pub fn evaluation(&self, g_cost: usize, state: &WorldState) -> Result<usize, BridgeError> {
        Ok(g_cost + self.heuristic(state)?)
    }
}

impl SearchSpace for BridgeProblem {
    type State = WorldState;
    type Action = Move;

    fn initial_state(&self) -> &WorldState {
        &self.initial
    }

    fn is_goal(&self, state: &WorldState) -> bool {
        *state == self.goal
    }

    fn expand(&self, state: &WorldState) -> Result<Vec<(Move, WorldState)>> {
        Ok(successors(state, self.max_group_size)?)
    }

    fn estimate(&self, state: &WorldState) -> Result<usize> {
        Ok(self.heuristic(state)?)
    }

    fn cost_of(&self, action: &Move) -> usize {
        action.cost()
    }
}

pub struct BridgeSolver {
    problem: BridgeProblem,
    stats: Stats,
}

impl BridgeSolver {
    pub fn new(problem: BridgeProblem) -> Self {
        BridgeSolver {
            problem,
            stats: Stats::default(),
        }
    }

    pub fn problem(&self) -> &BridgeProblem {
        &self.problem
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn solve(&mut self, max_expansions: Option<usize>) -> Result<Option<Solution>> {
        let total_solve_start_time = Instant::now();
        debug!(
            "solve with group size {} in {:?} mode",
            self.problem.max_group_size, self.problem.mode
        );

        let solution = a_star_search(&self.problem, max_expansions, &mut self.stats)?;

        self.stats.time_us = total_solve_start_time.elapsed().as_micros() as usize;
        match &solution {
            Some(solution) => {
                self.stats.cost = solution.cost;
                self.stats.print();
            }
            None => info!(
                "no solution after expanding {} nodes",
                self.stats.expanded_nodes
            ),
        }

        Ok(solution)
    }
}
