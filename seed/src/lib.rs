//! Propostas Seed
//!
//! Upserts the sector AI agents into the proposals backend and reports
//! which ones made it.

pub mod agents;
pub mod error;
pub mod store;

use std::fmt;

use chrono::{DateTime, Utc};

pub use agents::{all_agents, Agent};
pub use error::SeedError;
pub use store::{AgentStore, HttpAgentStore, MemoryAgentStore};

/// Connection settings, all required unless running dry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    pub api_url: String,
    pub service_key: String,
}

impl SeedConfig {
    /// Every missing variable is reported at once
    pub fn resolve(api_url: Option<String>, service_key: Option<String>) -> Result<Self, SeedError> {
        let api_url = api_url.filter(|v| !v.trim().is_empty());
        let service_key = service_key.filter(|v| !v.trim().is_empty());
        match (api_url, service_key) {
            (Some(api_url), Some(service_key)) => Ok(Self { api_url, service_key }),
            (api_url, service_key) => {
                let mut missing = Vec::new();
                if api_url.is_none() {
                    missing.push("SEED_API_URL");
                }
                if service_key.is_none() {
                    missing.push("SEED_SERVICE_KEY");
                }
                Err(SeedError::MissingConfig(missing))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub started_at: DateTime<Utc>,
    pub inserted: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl SeedSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Seed started {}", self.started_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "  inserted: {}", self.inserted.len())?;
        for id in &self.inserted {
            writeln!(f, "    + {}", id)?;
        }
        write!(f, "  failed:   {}", self.failed.len())?;
        for (id, reason) in &self.failed {
            write!(f, "\n    - {}: {}", id, reason)?;
        }
        Ok(())
    }
}

/// Upsert every agent, one after the other. A failure does not stop the run.
pub async fn run_seed(store: &dyn AgentStore, agents: &[Agent]) -> SeedSummary {
    let mut summary = SeedSummary {
        started_at: Utc::now(),
        inserted: Vec::new(),
        failed: Vec::new(),
    };
    for agent in agents {
        match store.upsert_agent(agent).await {
            Ok(()) => {
                tracing::info!(agent = %agent.id, "agent upserted");
                summary.inserted.push(agent.id.clone());
            }
            Err(err) => {
                tracing::error!(agent = %agent.id, error = %err, "agent upsert failed");
                summary.failed.push((agent.id.clone(), err.to_string()));
            }
        }
    }
    summary
}
