use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::scenario::Scenario;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Basic,
    Advanced,
    Random,
}

#[derive(Parser, Debug)]
#[command(
    name = "Rust Bridge",
    about = "Optimal bridge and torch crossing plans found with A*.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, value_enum, help = "Built-in scenario to solve")]
    pub preset: Option<Preset>,

    #[arg(long, help = "Path to a YAML scenario file, takes precedence over the preset")]
    pub scenario_path: Option<String>,

    #[arg(long, help = "Largest group allowed on the bridge, defaults to the scenario capacity")]
    pub max_group_size: Option<usize>,

    #[arg(long, help = "Stop searching after this many node expansions")]
    pub max_expansions: Option<usize>,

    #[arg(long, help = "Number of agents for the random preset")]
    pub num_agents: Option<usize>,

    #[arg(long, help = "Largest crossing cost for the random preset")]
    pub max_cost: Option<usize>,

    #[arg(long, help = "Seed for the random number generator")]
    pub seed: Option<u64>,

    #[arg(long, help = "Write a JSON report of the solution to this path")]
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preset: Preset,
    pub scenario_path: Option<String>,
    pub max_group_size: Option<usize>,
    pub max_expansions: Option<usize>,
    pub num_agents: usize,
    pub max_cost: usize,
    pub seed: u64,
    pub output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            preset: Preset::Basic,
            scenario_path: None,
            max_group_size: None,
            max_expansions: None,
            num_agents: 5,
            max_cost: 10,
            seed: 0,
            output_path: None,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> Result<Self> {
        if let Some(preset) = cli.preset {
            self.preset = preset;
        }
        if let Some(path) = &cli.scenario_path {
            self.scenario_path = Some(path.clone());
        }
        if let Some(max_group_size) = cli.max_group_size {
            self.max_group_size = Some(max_group_size);
        }
        if let Some(max_expansions) = cli.max_expansions {
            self.max_expansions = Some(max_expansions);
        }
        if let Some(num_agents) = cli.num_agents {
            self.num_agents = num_agents;
        }
        if let Some(max_cost) = cli.max_cost {
            self.max_cost = max_cost;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(path) = &cli.output_path {
            self.output_path = Some(path.clone());
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_group_size == Some(0) {
            return Err(anyhow!("Max group size must be at least 1, got 0"));
        }

        if self.preset == Preset::Random && self.scenario_path.is_none() {
            if self.num_agents == 0 {
                return Err(anyhow!("Random preset needs at least one agent"));
            }
            if self.max_cost == 0 {
                return Err(anyhow!("Random preset needs a max cost of at least 1"));
            }
        }
        Ok(())
    }

    pub fn load_scenario(&self) -> Result<Scenario> {
        if let Some(path) = &self.scenario_path {
            return Scenario::load_from_file(path)
                .with_context(|| format!("error with scenario file: {path}"));
        }

        let scenario = match self.preset {
            Preset::Basic => Scenario::basic(),
            Preset::Advanced => Scenario::advanced(),
            Preset::Random => {
                let mut rng = StdRng::seed_from_u64(self.seed);
                Scenario::random(
                    self.num_agents,
                    self.max_cost,
                    self.max_group_size.unwrap_or(2),
                    &mut rng,
                )
            }
        };
        info!("Use {:?} preset", self.preset);
        Ok(scenario)
    }

    /// The explicit override if there is one, the bridge capacity otherwise.
    pub fn group_size(&self, scenario: &Scenario) -> usize {
        self.max_group_size.unwrap_or(scenario.capacity)
    }
}
