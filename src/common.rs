mod crossing;
mod state;

pub use crossing::Move;
pub use state::WorldState;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Agents kept in crossing-cost order. Agents are shared between states, so
/// copying a group never copies names.
pub type Group = BTreeSet<Arc<Agent>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    #[serde(alias = "a", alias = "west", alias = "WEST")]
    A,
    #[serde(alias = "b", alias = "east", alias = "EAST")]
    B,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Operating mode of a run. Basic mode also switches the estimator to the
/// slowest-agent rule while the light is away from the starting bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Basic,
    Advanced,
}

/// A single walker. `id` is the roster position and keeps agents with the
/// same name and cost distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Agent {
    pub id: usize,
    pub name: String,
    pub cost: usize,
}

impl Agent {
    pub fn new(id: usize, name: impl Into<String>, cost: usize) -> Self {
        Agent {
            id,
            name: name.into(),
            cost,
        }
    }
}

impl Ord for Agent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for Agent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.cost)
    }
}

/// Contract violations raised by the bridge domain. None of them is
/// recoverable: they mean a caller built a move or state it should not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    InvalidMove { reason: String },
    EmptyGroup { side: Side },
    OverlappingSides { agent: String },
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMove { reason } => write!(f, "invalid move: {reason}"),
            Self::EmptyGroup { side } => {
                write!(f, "cannot estimate: side {side} holds the light but no agents")
            }
            Self::OverlappingSides { agent } => {
                write!(f, "agent {agent} is placed on both sides")
            }
        }
    }
}

impl std::error::Error for BridgeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::A.opposite(), Side::B);
        assert_eq!(Side::B.opposite(), Side::A);
        assert_eq!(Side::A.opposite().opposite(), Side::A);
    }

    #[test]
    fn test_agent_order_by_cost_then_id() {
        let slow = Agent::new(0, "Doris", 8);
        let fast = Agent::new(1, "Adam", 1);
        let twin = Agent::new(2, "Adam", 1);
        let mut agents = vec![slow.clone(), twin.clone(), fast.clone()];
        agents.sort();
        assert_eq!(agents, vec![fast.clone(), twin.clone(), slow]);

        // Same name and cost, different roster slot.
        assert_ne!(fast, twin);
    }

    #[test]
    fn test_agent_display() {
        assert_eq!(Agent::new(0, "Claire", 5).to_string(), "Claire(5)");
    }

    #[test]
    fn test_side_from_yaml_aliases() {
        let side: Side = serde_yaml::from_str("west").unwrap();
        assert_eq!(side, Side::A);
        let side: Side = serde_yaml::from_str("b").unwrap();
        assert_eq!(side, Side::B);
    }
}
