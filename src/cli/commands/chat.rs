use anyhow::Result;

use crate::chat::ChatSession;
use crate::config::ConfigManager;
use crate::store::Store;
use crate::translation::Provider;
use crate::translator::Overrides;

pub struct ChatOptions {
    pub provider: Option<Provider>,
    pub model: Option<String>,
}

pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let config = ConfigManager::new().load_or_default();
    let store = Store::open_default()?;
    let overrides = Overrides {
        provider: options.provider,
        model: options.model,
        prompt: None,
    };

    let mut session = ChatSession::new(store, config.gateway(), config.endpoints, overrides);
    session.run().await
}
