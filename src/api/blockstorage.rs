//! Block storage service API. Only the volume status lookup is needed;
//! attach and detach go through the compute service.

use serde::Deserialize;

use super::client::ServiceClient;
use super::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    pub id: String,
    pub status: String,
}

#[derive(Deserialize)]
struct VolumeWrapper {
    volume: Volume,
}

#[derive(Clone)]
pub struct BlockStorageApi {
    client: ServiceClient,
}

impl BlockStorageApi {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// GET /volumes/{id}
    pub async fn get_volume(&self, id: &str) -> Result<Volume, ApiError> {
        let response: VolumeWrapper = self.client.get(&format!("/volumes/{}", id)).await?;
        Ok(response.volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::create_test_client;
    use mockito::Server as MockServer;

    #[tokio::test]
    async fn get_volume_parses_the_status() {
        let mut server = MockServer::new_async().await;
        let _mock = server
            .mock("GET", "/volumes/vol-1")
            .with_body(r#"{"volume":{"id":"vol-1","status":"in-use"}}"#)
            .create_async()
            .await;

        let api = BlockStorageApi::new(create_test_client(&server.url()));
        let volume = api.get_volume("vol-1").await.unwrap();

        assert_eq!(volume.status, "in-use");
    }

    #[tokio::test]
    async fn get_volume_surfaces_not_found() {
        let mut server = MockServer::new_async().await;
        let _mock = server
            .mock("GET", "/volumes/gone")
            .with_status(404)
            .with_body(r#"{"itemNotFound":{"code":404}}"#)
            .create_async()
            .await;

        let api = BlockStorageApi::new(create_test_client(&server.url()));
        let err = api.get_volume("gone").await.unwrap_err();

        assert!(err.is_not_found());
    }
}
