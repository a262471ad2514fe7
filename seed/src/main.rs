use anyhow::Context;
use clap::Parser;

use propostas_seed::{all_agents, run_seed, AgentStore, HttpAgentStore, MemoryAgentStore, SeedConfig};

#[derive(Parser)]
#[command(name = "propostas-seed", about = "Load the sector AI agents into the proposals backend", version)]
struct Cli {
    /// Base URL of the backend API
    #[arg(long, env = "SEED_API_URL")]
    api_url: Option<String>,

    /// Service key sent as bearer token
    #[arg(long, env = "SEED_SERVICE_KEY", hide_env_values = true)]
    service_key: Option<String>,

    /// Build the agents and store them in memory only
    #[arg(long)]
    dry_run: bool,

    /// Seed only these agent ids (repeatable)
    #[arg(long = "only")]
    only: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut agents = all_agents();
    if !cli.only.is_empty() {
        agents.retain(|a| cli.only.contains(&a.id));
        anyhow::ensure!(!agents.is_empty(), "no agent matches --only {:?}", cli.only);
    }

    let store: Box<dyn AgentStore> = if cli.dry_run {
        tracing::info!("dry run: agents are kept in memory");
        Box::new(MemoryAgentStore::new())
    } else {
        let config = SeedConfig::resolve(cli.api_url, cli.service_key)
            .context("set the variables or pass --dry-run")?;
        tracing::info!(api = %config.api_url, "seeding {} agents", agents.len());
        Box::new(HttpAgentStore::new(&config.api_url, &config.service_key))
    };

    let summary = run_seed(store.as_ref(), &agents).await;
    println!("{summary}");
    anyhow::ensure!(summary.is_success(), "{} agent(s) failed", summary.failed.len());
    Ok(())
}
