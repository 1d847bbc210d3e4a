use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::models::{Channel, Message, ProviderKind};

/// What a provider hands back on a successful send.
#[derive(Debug, Clone, Default)]
pub struct ProviderReceipt {
    pub provider_message_id: Option<String>,
}

/// Channel-specific integration with an external send service.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    fn provider(&self) -> ProviderKind;

    fn channel(&self) -> Channel {
        self.provider().channel()
    }

    async fn send(&self, message: &Message) -> anyhow::Result<ProviderReceipt>;
}

/// Registry of provider adapters, resolved by channel + provider name.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    clients: HashMap<ProviderKind, Arc<dyn ProviderClient>>,
    defaults: HashMap<Channel, ProviderKind>,
}

impl ProviderRegistry {
    pub fn new(clients: Vec<Arc<dyn ProviderClient>>) -> Self {
        let mut map = HashMap::new();
        for client in clients {
            map.insert(client.provider(), client);
        }
        Self {
            clients: map,
            defaults: HashMap::new(),
        }
    }

    /// Sets which provider a channel uses when the caller names none.
    pub fn with_default(mut self, channel: Channel, provider: ProviderKind) -> Self {
        self.defaults.insert(channel, provider);
        self
    }

    pub fn get(&self, provider: ProviderKind) -> Option<Arc<dyn ProviderClient>> {
        self.clients.get(&provider).cloned()
    }

    /// Picks the provider for a send: an explicit override wins if it serves
    /// the channel, otherwise the channel's configured default.
    pub fn resolve(
        &self,
        channel: Channel,
        provider: Option<ProviderKind>,
    ) -> Option<ProviderKind> {
        match provider {
            Some(kind) if kind.channel() == channel => Some(kind),
            Some(_) => None,
            None => self.defaults.get(&channel).copied(),
        }
    }
}
