use std::sync::Arc;

use async_trait::async_trait;

use crate::application::services::provider::{ProviderClient, ProviderReceipt};
use crate::domain::models::{Message, ProviderKind};

/// In-app buyer-portal channel. Delivery is the persisted record itself; the
/// portal frontend reads messages straight from the thread, so there is no
/// external call to make.
pub struct PortalProvider;

impl PortalProvider {
    pub fn new() -> Arc<dyn ProviderClient> {
        Arc::new(Self) as Arc<dyn ProviderClient>
    }
}

#[async_trait]
impl ProviderClient for PortalProvider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Portal
    }

    async fn send(&self, message: &Message) -> anyhow::Result<ProviderReceipt> {
        tracing::debug!(message_id = %message.id, thread_id = %message.thread_id, "portal message published");
        Ok(ProviderReceipt {
            provider_message_id: Some(message.id.to_string()),
        })
    }
}
