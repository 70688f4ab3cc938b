use anyhow::Result;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

use crate::common::Side;
use crate::solver::Solution;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub cost: usize,
    pub time_us: usize,
    pub expanded_nodes: usize,
    pub generated_nodes: usize,
}

impl Stats {
    pub fn print(&self) {
        info!(
            "Cost {:?} Time(microseconds) {:?} Expanded nodes number: {:?} Generated nodes number {:?}",
            self.cost, self.time_us, self.expanded_nodes, self.generated_nodes
        );
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub movers: Vec<String>,
    pub from: Side,
    pub to: Side,
    pub cost: usize,
    pub state: String,
}

/// Machine readable summary of a run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub solved: bool,
    pub cost: Option<usize>,
    pub steps: Vec<StepReport>,
    pub stats: Stats,
}

impl Report {
    pub fn new(solution: Option<&Solution>, stats: &Stats, capacity: usize) -> Self {
        let steps = solution
            .map(|solution| {
                solution
                    .steps
                    .iter()
                    .map(|(action, state)| StepReport {
                        movers: action.movers().iter().map(|a| a.name.clone()).collect(),
                        from: action.origin(),
                        to: action.to(),
                        cost: action.cost(),
                        state: state.render(capacity),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Report {
            solved: solution.is_some(),
            cost: solution.map(|solution| solution.cost),
            steps,
            stats: stats.clone(),
        }
    }

    pub fn write_to_json(&self, path: &str) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
