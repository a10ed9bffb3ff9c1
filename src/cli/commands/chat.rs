use anyhow::Result;
use std::sync::Arc;

use crate::chat::{Conversation, TutorRepl};
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::tutor::{GeminiProvider, SessionManager};

pub struct ChatOptions {
    pub language: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
}

pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let config = load_resolved_config(options)?;

    if config.api_key.is_none() {
        crate::debug!("no API key found in ${} or the config file", config.api_key_env);
    }

    let provider = Arc::new(GeminiProvider::new(config.endpoint));
    let manager = SessionManager::new(provider, config.api_key, config.api_key_env, config.model);

    let mut repl = TutorRepl::new(Conversation::new(manager));
    repl.run(&config.language).await
}

fn load_resolved_config(options: ChatOptions) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load()?;
    crate::debug!("config file: {}", manager.config_path().display());

    let resolve_options = ResolveOptions {
        language: options.language,
        model: options.model,
        endpoint: options.endpoint,
    };
    Ok(resolve_config(&resolve_options, &file_config)?)
}
