// src/api/state.rs
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::exec::Executor;
use crate::suggest::{LlmProvider, OllamaClient};
use crate::workspace::Workspace;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub executor: Arc<Executor>,
    pub workspace: Arc<Workspace>,
    pub llm: Arc<dyn LlmProvider>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let workspace = Workspace::new(&config.workspace_dir)?;
        let executor = Executor::new(
            config.python_bin.clone(),
            config.limits.run_limits(),
            config.limits.max_concurrent_runs,
        );
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        let llm = OllamaClient::new(client, config.ollama.clone());
        Ok(Self {
            config: Arc::new(config),
            executor: Arc::new(executor),
            workspace: Arc::new(workspace),
            llm: Arc::new(llm),
        })
    }
}
