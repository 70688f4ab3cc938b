use super::{construct_path, SearchNode, SearchOutcome, SearchSpace};
use crate::stat::Stats;

use anyhow::Result;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, instrument, trace, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenNode {
    f_cost: usize,
    g_cost: usize,
    index: usize,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .cmp(&other.f_cost)
            // Higher g cost has higher priority
            .then_with(|| other.g_cost.cmp(&self.g_cost))
            // Earlier discovered node first, keeps expansion order deterministic
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-first search on `f = g + h`.
///
/// The goal test runs when a node leaves the open list. States already
/// expanded are never reopened; a cheaper path to a state still waiting in
/// the open list replaces the old entry. Returns `Ok(None)` when the open list
/// runs dry or `max_expansions` nodes have been expanded without reaching the
/// goal.
#[instrument(skip_all, name = "a_star", fields(max_expansions = ?max_expansions), level = "debug")]
pub fn a_star_search<P: SearchSpace>(
    space: &P,
    max_expansions: Option<usize>,
    stats: &mut Stats,
) -> Result<Option<SearchOutcome<P::Action, P::State>>> {
    let mut nodes: Vec<SearchNode<P::State, P::Action>> = Vec::new();
    let mut open_list = BTreeSet::new();
    let mut open_index: HashMap<P::State, usize> = HashMap::new();
    let mut closed_list: HashSet<P::State> = HashSet::new();

    let start = space.initial_state().clone();
    let start_h_cost = space.estimate(&start)?;
    nodes.push(SearchNode {
        state: start.clone(),
        parent: None,
        g_cost: 0,
        h_cost: start_h_cost,
    });
    open_list.insert(OpenNode {
        f_cost: start_h_cost,
        g_cost: 0,
        index: 0,
    });
    open_index.insert(start, 0);
    stats.generated_nodes += 1;

    let mut expanded = 0;
    while let Some(current) = open_list.pop_first() {
        let state = nodes[current.index].state.clone();
        open_index.remove(&state);

        if space.is_goal(&state) {
            expanded += 1;
            stats.expanded_nodes += 1;
            debug!("reach goal with cost {}, expanded {expanded} nodes", current.g_cost);
            return Ok(Some(SearchOutcome {
                steps: construct_path(&nodes, current.index),
                cost: current.g_cost,
                expanded_nodes: expanded,
            }));
        }

        if max_expansions.is_some_and(|limit| expanded >= limit) {
            warn!("expansion limit reached after {expanded} nodes, giving up");
            return Ok(None);
        }

        expanded += 1;
        stats.expanded_nodes += 1;
        trace!("expand node: {state:?} f {} g {}", current.f_cost, current.g_cost);
        closed_list.insert(state.clone());

        for (action, next) in space.expand(&state)? {
            if closed_list.contains(&next) {
                continue;
            }

            let tentative_g_cost = current.g_cost + space.cost_of(&action);

            if let Some(&old) = open_index.get(&next) {
                let old_g_cost = nodes[old].g_cost;
                if tentative_g_cost >= old_g_cost {
                    continue;
                }
                // We should find such node already in open list.
                let removed = open_list.remove(&OpenNode {
                    f_cost: old_g_cost + nodes[old].h_cost,
                    g_cost: old_g_cost,
                    index: old,
                });
                debug_assert!(removed);
            }

            let h_cost = space.estimate(&next)?;
            let index = nodes.len();
            nodes.push(SearchNode {
                state: next.clone(),
                parent: Some((current.index, action)),
                g_cost: tentative_g_cost,
                h_cost,
            });
            open_list.insert(OpenNode {
                f_cost: tentative_g_cost + h_cost,
                g_cost: tentative_g_cost,
                index,
            });
            open_index.insert(next, index);
            stats.generated_nodes += 1;
        }
    }

    debug!("cannot find solution, expanded {expanded} nodes");
    Ok(None)
}
