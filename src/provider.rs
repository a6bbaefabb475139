//! Provider-level configuration: one auth token and the per-service
//! endpoints, with environment variable fallbacks for everything.

use thiserror::Error;

use crate::api::blockstorage::BlockStorageApi;
use crate::api::compute::ComputeApi;
use crate::api::network::NetworkApi;
use crate::api::{ApiError, ServiceClient};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{setting} is required (set it in the provider config or via {env})")]
    MissingSetting {
        setting: &'static str,
        env: &'static str,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub auth_token: Option<String>,
    pub compute_endpoint: Option<String>,
    pub network_endpoint: Option<String>,
    pub blockstorage_endpoint: Option<String>,
    pub region: Option<String>,
    pub insecure: bool,
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill unset fields from the `OS_*` environment variables.
    pub fn with_env_fallbacks(mut self) -> Self {
        self.auth_token = self
            .auth_token
            .or_else(|| std::env::var("OS_AUTH_TOKEN").ok());
        self.compute_endpoint = self
            .compute_endpoint
            .or_else(|| std::env::var("OS_COMPUTE_URL").ok());
        self.network_endpoint = self
            .network_endpoint
            .or_else(|| std::env::var("OS_NETWORK_URL").ok());
        self.blockstorage_endpoint = self
            .blockstorage_endpoint
            .or_else(|| std::env::var("OS_BLOCKSTORAGE_URL").ok());
        self.region = self.region.or_else(|| std::env::var("OS_REGION_NAME").ok());
        self
    }

    /// Validate the settings and build the per-service API handles.
    pub fn connect(&self) -> Result<Clients, ProviderError> {
        let token = self
            .auth_token
            .as_deref()
            .ok_or(ProviderError::MissingSetting {
                setting: "auth_token",
                env: "OS_AUTH_TOKEN",
            })?;
        let compute = self
            .compute_endpoint
            .as_deref()
            .ok_or(ProviderError::MissingSetting {
                setting: "compute_endpoint",
                env: "OS_COMPUTE_URL",
            })?;
        let network = self
            .network_endpoint
            .as_deref()
            .ok_or(ProviderError::MissingSetting {
                setting: "network_endpoint",
                env: "OS_NETWORK_URL",
            })?;
        let blockstorage =
            self.blockstorage_endpoint
                .as_deref()
                .ok_or(ProviderError::MissingSetting {
                    setting: "blockstorage_endpoint",
                    env: "OS_BLOCKSTORAGE_URL",
                })?;

        tracing::debug!(
            compute,
            network,
            blockstorage,
            region = self.region.as_deref().unwrap_or("default"),
            "configuring service clients"
        );

        Ok(Clients {
            compute: ComputeApi::new(ServiceClient::new(compute, token, self.insecure)?),
            network: NetworkApi::new(ServiceClient::new(network, token, self.insecure)?),
            blockstorage: BlockStorageApi::new(ServiceClient::new(
                blockstorage,
                token,
                self.insecure,
            )?),
        })
    }
}

/// The per-service API handles a configured provider hands to resources.
pub struct Clients {
    pub compute: ComputeApi,
    pub network: NetworkApi,
    pub blockstorage: BlockStorageApi,
}
