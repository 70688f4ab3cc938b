use anyhow::{bail, Context, Result};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::sync::Arc;
use tracing::info;

use crate::common::{Agent, Mode, Side, WorldState};
use crate::solver::BridgeProblem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub cost: usize,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, cost: usize) -> Self {
        AgentSpec {
            name: name.into(),
            cost,
        }
    }
}

fn default_light() -> Side {
    Side::A
}

/// Who stands where before the first crossing, and the rules of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub mode: Mode,
    pub capacity: usize,
    #[serde(default = "default_light")]
    pub light: Side,
    #[serde(default)]
    pub side_a: Vec<AgentSpec>,
    #[serde(default)]
    pub side_b: Vec<AgentSpec>,
}

impl Scenario {
    /// Four walkers on bank A, two at a time.
    pub fn basic() -> Self {
        Scenario {
            mode: Mode::Basic,
            capacity: 2,
            light: Side::A,
            side_a: vec![
                AgentSpec::new("Adam", 1),
                AgentSpec::new("Ben", 2),
                AgentSpec::new("Claire", 5),
                AgentSpec::new("Doris", 8),
            ],
            side_b: Vec::new(),
        }
    }

    /// The basic walkers plus two on bank B heading the other way, three at a
    /// time.
    pub fn advanced() -> Self {
        Scenario {
            mode: Mode::Advanced,
            capacity: 3,
            side_b: vec![AgentSpec::new("Edward", 9), AgentSpec::new("Fiona", 10)],
            ..Scenario::basic()
        }
    }

    pub fn random<R: Rng + ?Sized>(
        num_agents: usize,
        max_cost: usize,
        capacity: usize,
        rng: &mut R,
    ) -> Self {
        let side_a = (0..num_agents)
            .map(|id| AgentSpec::new(format!("Agent{id}"), rng.gen_range(1..=max_cost)))
            .collect();
        let scenario = Scenario {
            mode: Mode::Basic,
            capacity,
            light: Side::A,
            side_a,
            side_b: Vec::new(),
        };
        info!("Generate scen: {scenario:?}");
        scenario
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let scenario: Scenario = serde_yaml::from_str(yaml)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("cannot open scenario {path}"))?;
        let reader = BufReader::new(file);
        let scenario: Scenario = serde_yaml::from_reader(reader)
            .with_context(|| format!("cannot parse scenario {path}"))?;
        scenario
            .validate()
            .with_context(|| format!("invalid scenario {path}"))?;
        Ok(scenario)
    }

    pub fn write_to_yaml(&self, path: &str) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = io::BufWriter::new(file);
        let yaml_data = serde_yaml::to_string(self)?;
        writer.write_all(yaml_data.as_bytes())?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.side_a.is_empty() && self.side_b.is_empty() {
            bail!("Scenario needs at least one agent");
        }
        if self.capacity == 0 {
            bail!("Bridge capacity must be at least 1");
        }
        if let Some(agent) = self
            .side_a
            .iter()
            .chain(self.side_b.iter())
            .find(|agent| agent.cost == 0)
        {
            bail!("Agent {} must have a positive crossing cost", agent.name);
        }
        let light_side = match self.light {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        };
        if light_side.is_empty() {
            bail!("The light starts on side {} but nobody is there", self.light);
        }
        Ok(())
    }

    pub fn num_agents(&self) -> usize {
        self.side_a.len() + self.side_b.len()
    }

    /// Agents of each bank, numbered bank A first in insertion order.
    pub fn roster(&self) -> (Vec<Arc<Agent>>, Vec<Arc<Agent>>) {
        let build = |specs: &[AgentSpec], offset: usize| -> Vec<Arc<Agent>> {
            specs
                .iter()
                .enumerate()
                .map(|(i, spec)| Arc::new(Agent::new(offset + i, spec.name.clone(), spec.cost)))
                .collect()
        };
        (
            build(&self.side_a, 0),
            build(&self.side_b, self.side_a.len()),
        )
    }

    pub fn initial_state(&self) -> Result<WorldState> {
        let (side_a, side_b) = self.roster();
        Ok(WorldState::new(side_a, side_b, self.light)?)
    }

    /// Everybody on the bank they did not start on, light on the far side.
    pub fn goal_state(&self) -> Result<WorldState> {
        let (side_a, side_b) = self.roster();
        Ok(WorldState::new(side_b, side_a, self.light.opposite())?)
    }

    pub fn problem(&self, max_group_size: usize) -> Result<BridgeProblem> {
        Ok(BridgeProblem::new(
            self.initial_state()?,
            self.goal_state()?,
            self.mode,
            max_group_size,
        ))
    }
}
