//! Networking service API: networks, ports and floating IPs.

use serde::{Deserialize, Serialize};

use super::client::{ApiQueryParams, ServiceClient};
use super::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct Network {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Port {
    pub id: String,
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub network_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FloatingIp {
    pub id: String,
    pub floating_ip_address: String,
    #[serde(default)]
    pub port_id: Option<String>,
}

#[derive(Deserialize)]
struct NetworksWrapper {
    networks: Vec<Network>,
}

#[derive(Deserialize)]
struct PortsWrapper {
    ports: Vec<Port>,
}

#[derive(Deserialize)]
struct FloatingIpsWrapper {
    floatingips: Vec<FloatingIp>,
}

#[derive(Deserialize)]
struct FloatingIpWrapper {
    floatingip: FloatingIp,
}

#[derive(Serialize)]
struct FloatingIpUpdateBody<'a> {
    floatingip: FloatingIpUpdate<'a>,
}

#[derive(Serialize)]
struct FloatingIpUpdate<'a> {
    port_id: &'a str,
}

#[derive(Clone)]
pub struct NetworkApi {
    client: ServiceClient,
}

impl NetworkApi {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// GET /v2.0/networks
    pub async fn list_networks(&self) -> Result<Vec<Network>, ApiError> {
        let response: NetworksWrapper = self.client.get("/v2.0/networks").await?;
        Ok(response.networks)
    }

    /// GET /v2.0/ports filtered by owning device and network.
    pub async fn list_ports(
        &self,
        device_id: &str,
        network_id: &str,
    ) -> Result<Vec<Port>, ApiError> {
        let query = ApiQueryParams::new()
            .add("device_id", device_id)
            .add("network_id", network_id)
            .to_query_string();
        let response: PortsWrapper = self.client.get(&format!("/v2.0/ports{}", query)).await?;
        Ok(response.ports)
    }

    /// GET /v2.0/floatingips
    pub async fn list_floating_ips(&self) -> Result<Vec<FloatingIp>, ApiError> {
        let response: FloatingIpsWrapper = self.client.get("/v2.0/floatingips").await?;
        Ok(response.floatingips)
    }

    /// PUT /v2.0/floatingips/{id}, pointing the floating IP at a port.
    pub async fn assign_floating_ip_port(
        &self,
        id: &str,
        port_id: &str,
    ) -> Result<FloatingIp, ApiError> {
        let response: FloatingIpWrapper = self
            .client
            .put(
                &format!("/v2.0/floatingips/{}", id),
                &FloatingIpUpdateBody {
                    floatingip: FloatingIpUpdate { port_id },
                },
            )
            .await?;
        Ok(response.floatingip)
    }
}
