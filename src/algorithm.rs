mod astar;

pub use astar::a_star_search;

use anyhow::Result;
use std::fmt::Debug;
use std::hash::Hash;

/// What a best-first search needs to know about a problem, and nothing more.
pub trait SearchSpace {
    type State: Clone + Eq + Hash + Debug;
    type Action: Clone + Debug;

    fn initial_state(&self) -> &Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Every (action, next state) pair reachable in one step.
    fn expand(&self, state: &Self::State) -> Result<Vec<(Self::Action, Self::State)>>;

    /// Estimated remaining cost from `state`.
    fn estimate(&self, state: &Self::State) -> Result<usize>;

    fn cost_of(&self, action: &Self::Action) -> usize;
}

#[derive(Debug, Clone)]
pub struct SearchOutcome<A, S> {
    /// Steps from the start (excluded) to the goal (included).
    pub steps: Vec<(A, S)>,
    pub cost: usize,
    pub expanded_nodes: usize,
}

#[derive(Debug, Clone)]
struct SearchNode<S, A> {
    state: S,
    parent: Option<(usize, A)>,
    g_cost: usize,
    h_cost: usize,
}

fn construct_path<S: Clone, A: Clone>(
    nodes: &[SearchNode<S, A>],
    mut current: usize,
) -> Vec<(A, S)> {
    let mut steps = Vec::new();
    while let Some((parent, action)) = &nodes[current].parent {
        steps.push((action.clone(), nodes[current].state.clone()));
        current = *parent;
    }
    steps.reverse();
    steps
}
