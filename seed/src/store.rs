//! Destinations for seeded agents.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Deserialize;

use crate::agents::Agent;
use crate::error::{Result, SeedError};

#[async_trait]
pub trait AgentStore: Send + Sync {
    /// Create or replace one agent by id
    async fn upsert_agent(&self, agent: &Agent) -> Result<()>;
}

/// Backend REST API: `PUT {api}/api/agents/{id}` with a bearer service key
pub struct HttpAgentStore {
    client: reqwest::Client,
    api_url: String,
    service_key: String,
}

#[derive(Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl HttpAgentStore {
    pub fn new(api_url: &str, service_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    pub fn agent_url(&self, id: &str) -> String {
        format!("{}/api/agents/{}", self.api_url, id)
    }
}

#[async_trait]
impl AgentStore for HttpAgentStore {
    async fn upsert_agent(&self, agent: &Agent) -> Result<()> {
        let http = |source: reqwest::Error| SeedError::Http { id: agent.id.clone(), source };
        let resp = self
            .client
            .put(self.agent_url(&agent.id))
            .bearer_auth(&self.service_key)
            .json(agent)
            .send()
            .await
            .map_err(http)?;

        let status = resp.status();
        let body = resp.text().await.map_err(http)?;
        if !status.is_success() {
            return Err(SeedError::Status { id: agent.id.clone(), status: status.as_u16(), body });
        }
        // Some deployments answer 204 with no body
        match serde_json::from_str::<Envelope>(&body) {
            Ok(Envelope { success: false, error }) => Err(SeedError::Rejected {
                id: agent.id.clone(),
                message: error.unwrap_or_else(|| "sem detalhes".to_string()),
            }),
            _ => Ok(()),
        }
    }
}

/// In-process store, used for `--dry-run`
#[derive(Default)]
pub struct MemoryAgentStore {
    agents: Mutex<BTreeMap<String, Agent>>,
    reject: HashSet<String>,
}

impl MemoryAgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that refuses the given ids
    pub fn rejecting<I: IntoIterator<Item = S>, S: Into<String>>(ids: I) -> Self {
        Self {
            agents: Mutex::default(),
            reject: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn ids(&self) -> Vec<String> {
        self.agents
            .lock()
            .map(|agents| agents.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, id: &str) -> Option<Agent> {
        self.agents.lock().ok().and_then(|agents| agents.get(id).cloned())
    }
}

#[async_trait]
impl AgentStore for MemoryAgentStore {
    async fn upsert_agent(&self, agent: &Agent) -> Result<()> {
        if self.reject.contains(&agent.id) {
            return Err(SeedError::Rejected {
                id: agent.id.clone(),
                message: "recusado".to_string(),
            });
        }
        if let Ok(mut agents) = self.agents.lock() {
            agents.insert(agent.id.clone(), agent.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_url_trims_trailing_slash() {
        let store = HttpAgentStore::new("https://api.exemplo.com/", "k");
        assert_eq!(store.agent_url("events"), "https://api.exemplo.com/api/agents/events");
    }

    #[tokio::test]
    async fn test_memory_store_replaces_by_id() {
        let store = MemoryAgentStore::new();
        let mut agent = crate::agents::all_agents().remove(0);
        store.upsert_agent(&agent).await.unwrap();
        agent.name = "Outro nome".into();
        store.upsert_agent(&agent).await.unwrap();
        assert_eq!(store.ids(), vec![agent.id.clone()]);
        assert_eq!(store.get(&agent.id).unwrap().name, "Outro nome");
    }
}
