use crate::common::{Agent, BridgeError, Move, WorldState};

use itertools::Itertools;
use std::sync::Arc;
use tracing::trace;

/// Every crossing available from `state` with at most `max_group_size`
/// walkers, paired with the state it leads to.
///
/// Groups are enumerated by size, then in cost order within a size. When two
/// groups lead to the same state only the later one is kept, at the later
/// position.
pub fn successors(
    state: &WorldState,
    max_group_size: usize,
) -> Result<Vec<(Move, WorldState)>, BridgeError> {
    let people: Vec<Arc<Agent>> = state.light_side_agents().iter().cloned().collect();
    let to = state.light().opposite();

    let mut successors: Vec<(Move, WorldState)> = Vec::new();
    for size in 1..=max_group_size.min(people.len()) {
        for group in people.iter().cloned().combinations(size) {
            let action = Move::new(group, to)?;
            let next = state.transition(&action)?;

            let before = successors.len();
            successors.retain(|(_, known)| *known != next);
            if successors.len() != before {
                trace!("drop duplicate successor reached again by {action}");
            }
            successors.push((action, next));
        }
    }

    Ok(successors)
}
