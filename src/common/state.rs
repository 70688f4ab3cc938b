use super::{Agent, BridgeError, Group, Move, Side};

use std::fmt;
use std::sync::Arc;

/// Where every agent stands and which bank holds the light.
///
/// Both banks are ordered sets, so equality and hashing only look at which
/// agents are on which bank, never at the order they were inserted in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorldState {
    side_a: Group,
    side_b: Group,
    light: Side,
}

impl WorldState {
    pub fn new<A, B>(side_a: A, side_b: B, light: Side) -> Result<Self, BridgeError>
    where
        A: IntoIterator<Item = Arc<Agent>>,
        B: IntoIterator<Item = Arc<Agent>>,
    {
        let side_a: Group = side_a.into_iter().collect();
        let side_b: Group = side_b.into_iter().collect();

        if let Some(agent) = side_a.intersection(&side_b).next() {
            return Err(BridgeError::OverlappingSides {
                agent: agent.to_string(),
            });
        }

        Ok(WorldState {
            side_a,
            side_b,
            light,
        })
    }

    pub fn light(&self) -> Side {
        self.light
    }

    pub fn side(&self, side: Side) -> &Group {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    /// Agents allowed to cross next.
    pub fn light_side_agents(&self) -> &Group {
        self.side(self.light)
    }

    pub fn num_agents(&self) -> usize {
        self.side_a.len() + self.side_b.len()
    }

    pub fn agents(&self) -> impl Iterator<Item = &Arc<Agent>> {
        self.side_a.iter().chain(self.side_b.iter())
    }

    /// Canonical key: sorted roster ids per bank plus the light side.
    pub fn identity_key(&self) -> (Vec<usize>, Vec<usize>, Side) {
        let ids = |group: &Group| {
            let mut ids: Vec<usize> = group.iter().map(|agent| agent.id).collect();
            ids.sort_unstable();
            ids
        };
        (ids(&self.side_a), ids(&self.side_b), self.light)
    }

    pub fn transition(&self, action: &Move) -> Result<WorldState, BridgeError> {
        if action.movers().is_empty() {
            return Err(BridgeError::InvalidMove {
                reason: "no agent is crossing".to_string(),
            });
        }
        if action.to() != self.light.opposite() {
            return Err(BridgeError::InvalidMove {
                reason: format!(
                    "light is on side {} and cannot move to side {}",
                    self.light,
                    action.to()
                ),
            });
        }

        let from = self.light_side_agents();
        if let Some(stranger) = action.movers().iter().find(|agent| !from.contains(*agent)) {
            return Err(BridgeError::InvalidMove {
                reason: format!("{stranger} is not on side {}", self.light),
            });
        }

        let mut side_a = self.side_a.clone();
        let mut side_b = self.side_b.clone();
        let (src, dest) = match self.light {
            Side::A => (&mut side_a, &mut side_b),
            Side::B => (&mut side_b, &mut side_a),
        };
        for agent in action.movers() {
            src.remove(agent);
            dest.insert(Arc::clone(agent));
        }

        Ok(WorldState {
            side_a,
            side_b,
            light: action.to(),
        })
    }

    /// Bank A, the bridge annotated with its capacity, then bank B.
    pub fn render(&self, capacity: usize) -> String {
        self.render_with_bridge(&format!("|======({capacity})======|"))
    }

    fn render_with_bridge(&self, bridge: &str) -> String {
        let mut result = String::new();
        if self.light == Side::A {
            result.push_str("<Torch> ");
        }
        for agent in &self.side_a {
            result.push_str(&format!("{agent} "));
        }
        result.push_str(bridge);
        if self.light == Side::B {
            result.push_str(" <Torch> ");
        }
        for agent in &self.side_b {
            result.push_str(&format!("{agent} "));
        }
        result
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_with_bridge("|============|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn roster() -> Vec<Arc<Agent>> {
        vec![
            Arc::new(Agent::new(0, "Adam", 1)),
            Arc::new(Agent::new(1, "Ben", 2)),
            Arc::new(Agent::new(2, "Claire", 5)),
            Arc::new(Agent::new(3, "Doris", 8)),
        ]
    }

    fn hash_of(state: &WorldState) -> u64 {
        let mut hasher = DefaultHasher::new();
        state.hash(&mut hasher);
        hasher.finish()
    }

    fn pick(agents: &[Arc<Agent>], ids: &[usize]) -> Vec<Arc<Agent>> {
        ids.iter().map(|&id| Arc::clone(&agents[id])).collect()
    }

    #[test]
    fn test_equal_regardless_of_insertion_order() {
        let agents = roster();
        let forward = WorldState::new(pick(&agents, &[0, 1, 2]), pick(&agents, &[3]), Side::A)
            .unwrap();
        let backward = WorldState::new(pick(&agents, &[2, 0, 1]), pick(&agents, &[3]), Side::A)
            .unwrap();

        assert_eq!(forward, backward);
        assert_eq!(backward, forward);
        assert_eq!(hash_of(&forward), hash_of(&backward));
        assert_eq!(forward.identity_key(), backward.identity_key());
    }

    #[test]
    fn test_light_side_distinguishes_states() {
        let agents = roster();
        let on_a = WorldState::new(agents.clone(), Vec::<Arc<Agent>>::new(), Side::A).unwrap();
        let on_b = WorldState::new(agents.clone(), Vec::<Arc<Agent>>::new(), Side::B).unwrap();
        assert_ne!(on_a, on_b);
        assert_ne!(on_a.identity_key(), on_b.identity_key());
    }

    #[test]
    fn test_swapped_sides_differ() {
        let agents = roster();
        let start = WorldState::new(agents.clone(), Vec::<Arc<Agent>>::new(), Side::A).unwrap();
        let end = WorldState::new(Vec::<Arc<Agent>>::new(), agents.clone(), Side::A).unwrap();
        assert_ne!(start, end);
    }

    #[test]
    fn test_overlapping_sides_rejected() {
        let agents = roster();
        let result = WorldState::new(pick(&agents, &[0, 1]), pick(&agents, &[1, 2, 3]), Side::A);
        assert!(matches!(result, Err(BridgeError::OverlappingSides { .. })));
    }

    #[test]
    fn test_transition_moves_agents_and_light() {
        let agents = roster();
        let start = WorldState::new(agents.clone(), Vec::<Arc<Agent>>::new(), Side::A).unwrap();
        let action = Move::new(pick(&agents, &[0, 1]), Side::B).unwrap();

        let next = start.transition(&action).unwrap();
        assert_eq!(next.light(), Side::B);
        assert_eq!(next.side(Side::A).len(), 2);
        assert_eq!(next.side(Side::B).len(), 2);
        assert!(next.side(Side::B).contains(&agents[0]));
        assert!(next.side(Side::B).contains(&agents[1]));
        assert_eq!(next.num_agents(), 4);

        // Transitions never touch the source state.
        assert_eq!(start.side(Side::A).len(), 4);
        assert_eq!(start.light(), Side::A);

        // Same move, same result.
        assert_eq!(start.transition(&action).unwrap(), next);
    }

    #[test]
    fn test_transition_rejects_agent_off_light_side() {
        let agents = roster();
        let state = WorldState::new(pick(&agents, &[0, 1]), pick(&agents, &[2, 3]), Side::A)
            .unwrap();
        let action = Move::new(pick(&agents, &[0, 3]), Side::B).unwrap();
        assert!(matches!(
            state.transition(&action),
            Err(BridgeError::InvalidMove { .. })
        ));
    }

    #[test]
    fn test_transition_rejects_wrong_direction() {
        let agents = roster();
        let state = WorldState::new(agents.clone(), Vec::<Arc<Agent>>::new(), Side::A).unwrap();
        let action = Move::new(pick(&agents, &[0]), Side::A).unwrap();
        assert!(matches!(
            state.transition(&action),
            Err(BridgeError::InvalidMove { .. })
        ));
    }

    #[test]
    fn test_render() {
        let agents = roster();
        let start = WorldState::new(pick(&agents, &[0, 1]), pick(&agents, &[2, 3]), Side::A)
            .unwrap();
        assert_eq!(
            start.render(2),
            "<Torch> Adam(1) Ben(2) |======(2)======|Claire(5) Doris(8) "
        );

        let returning = WorldState::new(pick(&agents, &[0, 1]), pick(&agents, &[2, 3]), Side::B)
            .unwrap();
        assert_eq!(
            returning.render(3),
            "Adam(1) Ben(2) |======(3)======| <Torch> Claire(5) Doris(8) "
        );
        assert_eq!(
            returning.to_string(),
            "Adam(1) Ben(2) |============| <Torch> Claire(5) Doris(8) "
        );
    }

    #[test]
    fn test_render_sorts_by_cost() {
        let agents = roster();
        let state =
            WorldState::new(pick(&agents, &[3, 0, 2, 1]), Vec::<Arc<Agent>>::new(), Side::A)
                .unwrap();
        assert_eq!(
            state.render(2),
            "<Torch> Adam(1) Ben(2) Claire(5) Doris(8) |======(2)======|"
        );
    }
}
