use bridge_rust::config::{Cli, Config};
use bridge_rust::solver::BridgeSolver;
use bridge_rust::stat::Report;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("cannot read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;

    let scenario = config.load_scenario()?;
    let group_size = config.group_size(&scenario);
    let problem = scenario.problem(group_size)?;
    let capacity = scenario.capacity;

    println!("\nInit: {}", problem.initial().render(capacity));
    println!("Goal: {}\n", problem.goal().render(capacity));

    let mut solver = BridgeSolver::new(problem);
    let solution = solver.solve(config.max_expansions)?;

    match &solution {
        None => println!("No solution."),
        Some(solution) => {
            println!(
                "Nodes Explored: {}\nSolution Cost: {}\n\nSolution:",
                solution.expanded_nodes, solution.cost
            );
            println!("{}", solver.problem().initial().render(capacity));
            for (action, state) in &solution.steps {
                println!("{action}");
                println!("{}", state.render(capacity));
            }
        }
    }

    if let Some(output_path) = &config.output_path {
        Report::new(solution.as_ref(), solver.stats(), capacity)
            .write_to_json(output_path)
            .with_context(|| format!("cannot write report: {output_path}"))?;
        info!("Report written to {output_path}");
    }

    Ok(())
}
