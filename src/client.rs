//! Top-level API client

use crate::config;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, Transport};
use crate::resources::{AccountService, AchTransferService, InboundAchTransferService};
use std::sync::Arc;

/// Entry point to every resource service
///
/// Cloning is cheap; all clones share one transport (and so one rate limiter).
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client backed by [`HttpClient`]
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let http = HttpClient::with_config(config)?;
        Ok(Self::with_transport(Arc::new(http)))
    }

    /// Create a client from `BAAS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(config::from_env()?)
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(Arc::clone(&self.transport))
    }

    pub fn ach_transfers(&self) -> AchTransferService {
        AchTransferService::new(Arc::clone(&self.transport))
    }

    pub fn inbound_ach_transfers(&self) -> InboundAchTransferService {
        InboundAchTransferService::new(Arc::clone(&self.transport))
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}
