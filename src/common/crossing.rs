use super::{Agent, BridgeError, Group, Side};

use std::fmt;
use std::sync::Arc;

/// One trip over the bridge: a group walks with the light to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    movers: Group,
    to: Side,
}

impl Move {
    pub fn new<I>(movers: I, to: Side) -> Result<Self, BridgeError>
    where
        I: IntoIterator<Item = Arc<Agent>>,
    {
        let movers: Group = movers.into_iter().collect();
        if movers.is_empty() {
            return Err(BridgeError::InvalidMove {
                reason: "a crossing needs at least one agent".to_string(),
            });
        }
        Ok(Move { movers, to })
    }

    pub fn movers(&self) -> &Group {
        &self.movers
    }

    pub fn to(&self) -> Side {
        self.to
    }

    pub fn origin(&self) -> Side {
        self.to.opposite()
    }

    /// The group walks at the pace of its slowest member.
    pub fn cost(&self) -> usize {
        // Movers are cost ordered, so the slowest is last.
        self.movers.last().map_or(0, |agent| agent.cost)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move <torch>, ")?;
        for agent in &self.movers {
            write!(f, "{} ", agent.name)?;
        }
        write!(f, "{} to {} (cost:{})", self.origin(), self.to, self.cost())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(id: usize, name: &str, cost: usize) -> Arc<Agent> {
        Arc::new(Agent::new(id, name, cost))
    }

    #[test]
    fn test_cost_is_slowest_mover() {
        let action = Move::new(
            vec![agent(3, "Doris", 8), agent(0, "Adam", 1), agent(2, "Claire", 5)],
            Side::B,
        )
        .unwrap();
        let slowest = action.movers().iter().map(|a| a.cost).max().unwrap();
        assert_eq!(action.cost(), slowest);
        assert_eq!(action.cost(), 8);
    }

    #[test]
    fn test_single_mover_cost() {
        let action = Move::new(vec![agent(1, "Ben", 2)], Side::A).unwrap();
        assert_eq!(action.cost(), 2);
        assert_eq!(action.origin(), Side::B);
    }

    #[test]
    fn test_empty_move_rejected() {
        let result = Move::new(Vec::<Arc<Agent>>::new(), Side::B);
        assert!(matches!(result, Err(BridgeError::InvalidMove { .. })));
    }

    #[test]
    fn test_equal_movers_in_any_order() {
        let adam = agent(0, "Adam", 1);
        let ben = agent(1, "Ben", 2);
        let forward = Move::new(vec![Arc::clone(&adam), Arc::clone(&ben)], Side::B).unwrap();
        let backward = Move::new(vec![ben, adam], Side::B).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_display() {
        let action = Move::new(vec![agent(1, "Ben", 2), agent(0, "Adam", 1)], Side::B).unwrap();
        assert_eq!(action.to_string(), "Move <torch>, Adam Ben A to B (cost:2)");
    }
}
