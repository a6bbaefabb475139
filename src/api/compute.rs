//! Compute service API: servers and their actions, flavors, images and
//! volume attachments.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::client::{ApiQueryParams, ServiceClient};
use super::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(rename = "accessIPv4", default)]
    pub access_ipv4: String,
    #[serde(rename = "accessIPv6", default)]
    pub access_ipv6: String,
    /// Addresses keyed by network name.
    #[serde(default)]
    pub addresses: HashMap<String, Vec<Address>>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub flavor: ResourceLink,
    pub image: ResourceLink,
    #[serde(default)]
    pub security_groups: Vec<NamedRef>,
    #[serde(default)]
    pub key_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Address {
    pub addr: String,
    pub version: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceLink {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

/// The create response carries only a partial server document; the full
/// one is fetched separately once the build settles.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedServer {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Flavor {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolumeAttachment {
    pub id: String,
    #[serde(rename = "volumeId")]
    pub volume_id: String,
    #[serde(default)]
    pub device: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateServerRequest {
    pub name: String,
    #[serde(rename = "imageRef")]
    pub image_ref: String,
    #[serde(rename = "flavorRef")]
    pub flavor_ref: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<NamedRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<NetworkAttachment>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_drive: Option<bool>,
    #[serde(rename = "adminPass", skip_serializing_if = "Option::is_none")]
    pub admin_pass: Option<String>,
    /// Base64-encoded cloud-init payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    #[serde(
        rename = "block_device_mapping_v2",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub block_devices: Vec<BlockDeviceMapping>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkAttachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_ip: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockDeviceMapping {
    pub uuid: String,
    pub source_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_index: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateServerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "accessIPv4", skip_serializing_if = "Option::is_none")]
    pub access_ipv4: Option<String>,
    #[serde(rename = "accessIPv6", skip_serializing_if = "Option::is_none")]
    pub access_ipv6: Option<String>,
}

impl UpdateServerRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.access_ipv4.is_none() && self.access_ipv6.is_none()
    }
}

#[derive(Serialize)]
struct ServerBody<'a, T> {
    server: &'a T,
}

#[derive(Deserialize)]
struct ServerWrapper<T> {
    server: T,
}

#[derive(Deserialize)]
struct FlavorsWrapper {
    flavors: Vec<Flavor>,
}

#[derive(Deserialize)]
struct FlavorWrapper {
    flavor: Flavor,
}

#[derive(Deserialize)]
struct ImagesWrapper {
    images: Vec<Image>,
}

#[derive(Deserialize)]
struct ImageWrapper {
    image: Image,
}

#[derive(Deserialize)]
struct AttachmentsWrapper {
    #[serde(rename = "volumeAttachments")]
    volume_attachments: Vec<VolumeAttachment>,
}

#[derive(Serialize, Deserialize)]
struct AttachmentWrapper<T> {
    #[serde(rename = "volumeAttachment")]
    volume_attachment: T,
}

#[derive(Serialize)]
struct AttachVolumeRequest<'a> {
    #[serde(rename = "volumeId")]
    volume_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<&'a str>,
}

#[derive(Serialize)]
struct MetadataBody<'a> {
    metadata: &'a HashMap<String, String>,
}

#[derive(Deserialize)]
struct MetadataWrapper {
    metadata: HashMap<String, String>,
}

#[derive(Serialize)]
struct ResizeBody<'a> {
    resize: ResizeAction<'a>,
}

#[derive(Serialize)]
struct ResizeAction<'a> {
    #[serde(rename = "flavorRef")]
    flavor_ref: &'a str,
}

#[derive(Serialize)]
struct ConfirmResizeBody {
    #[serde(rename = "confirmResize")]
    confirm_resize: Option<()>,
}

#[derive(Serialize)]
struct ChangePasswordBody<'a> {
    #[serde(rename = "changePassword")]
    change_password: ChangePasswordAction<'a>,
}

#[derive(Serialize)]
struct ChangePasswordAction<'a> {
    #[serde(rename = "adminPass")]
    admin_pass: &'a str,
}

#[derive(Serialize)]
struct AddSecurityGroupBody<'a> {
    #[serde(rename = "addSecurityGroup")]
    add_security_group: NamedRefBorrowed<'a>,
}

#[derive(Serialize)]
struct RemoveSecurityGroupBody<'a> {
    #[serde(rename = "removeSecurityGroup")]
    remove_security_group: NamedRefBorrowed<'a>,
}

#[derive(Serialize)]
struct NamedRefBorrowed<'a> {
    name: &'a str,
}

#[derive(Clone)]
pub struct ComputeApi {
    client: ServiceClient,
}

impl ComputeApi {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// POST /servers
    pub async fn create_server(
        &self,
        request: &CreateServerRequest,
    ) -> Result<CreatedServer, ApiError> {
        let response: ServerWrapper<CreatedServer> = self
            .client
            .post("/servers", &ServerBody { server: request })
            .await?;
        Ok(response.server)
    }

    /// GET /servers/{id}
    pub async fn get_server(&self, id: &str) -> Result<Server, ApiError> {
        let response: ServerWrapper<Server> =
            self.client.get(&format!("/servers/{}", id)).await?;
        Ok(response.server)
    }

    /// PUT /servers/{id}
    pub async fn update_server(
        &self,
        id: &str,
        request: &UpdateServerRequest,
    ) -> Result<Server, ApiError> {
        let response: ServerWrapper<Server> = self
            .client
            .put(&format!("/servers/{}", id), &ServerBody { server: request })
            .await?;
        Ok(response.server)
    }

    /// DELETE /servers/{id}
    pub async fn delete_server(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/servers/{}", id)).await
    }

    /// PUT /servers/{id}/metadata, replacing the whole map.
    pub async fn replace_metadata(
        &self,
        id: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<HashMap<String, String>, ApiError> {
        let response: MetadataWrapper = self
            .client
            .put(&format!("/servers/{}/metadata", id), &MetadataBody { metadata })
            .await?;
        Ok(response.metadata)
    }

    pub async fn resize(&self, id: &str, flavor_ref: &str) -> Result<(), ApiError> {
        self.client
            .post_empty(
                &format!("/servers/{}/action", id),
                &ResizeBody {
                    resize: ResizeAction { flavor_ref },
                },
            )
            .await
    }

    pub async fn confirm_resize(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .post_empty(
                &format!("/servers/{}/action", id),
                &ConfirmResizeBody {
                    confirm_resize: None,
                },
            )
            .await
    }

    pub async fn change_password(&self, id: &str, admin_pass: &str) -> Result<(), ApiError> {
        self.client
            .post_empty(
                &format!("/servers/{}/action", id),
                &ChangePasswordBody {
                    change_password: ChangePasswordAction { admin_pass },
                },
            )
            .await
    }

    pub async fn add_security_group(&self, id: &str, name: &str) -> Result<(), ApiError> {
        self.client
            .post_empty(
                &format!("/servers/{}/action", id),
                &AddSecurityGroupBody {
                    add_security_group: NamedRefBorrowed { name },
                },
            )
            .await
    }

    pub async fn remove_security_group(&self, id: &str, name: &str) -> Result<(), ApiError> {
        self.client
            .post_empty(
                &format!("/servers/{}/action", id),
                &RemoveSecurityGroupBody {
                    remove_security_group: NamedRefBorrowed { name },
                },
            )
            .await
    }

    /// GET /flavors/detail
    pub async fn list_flavors(&self) -> Result<Vec<Flavor>, ApiError> {
        let response: FlavorsWrapper = self.client.get("/flavors/detail").await?;
        Ok(response.flavors)
    }

    /// GET /flavors/{id}
    pub async fn get_flavor(&self, id: &str) -> Result<Flavor, ApiError> {
        let response: FlavorWrapper = self.client.get(&format!("/flavors/{}", id)).await?;
        Ok(response.flavor)
    }

    /// GET /images/detail, optionally filtered by exact name.
    pub async fn list_images(&self, name: Option<&str>) -> Result<Vec<Image>, ApiError> {
        let query = ApiQueryParams::new()
            .add_optional("name", name)
            .to_query_string();
        let response: ImagesWrapper = self
            .client
            .get(&format!("/images/detail{}", query))
            .await?;
        Ok(response.images)
    }

    /// GET /images/{id}
    pub async fn get_image(&self, id: &str) -> Result<Image, ApiError> {
        let response: ImageWrapper = self.client.get(&format!("/images/{}", id)).await?;
        Ok(response.image)
    }

    /// GET /servers/{id}/os-volume_attachments
    pub async fn list_volume_attachments(
        &self,
        server_id: &str,
    ) -> Result<Vec<VolumeAttachment>, ApiError> {
        let response: AttachmentsWrapper = self
            .client
            .get(&format!("/servers/{}/os-volume_attachments", server_id))
            .await?;
        Ok(response.volume_attachments)
    }

    /// POST /servers/{id}/os-volume_attachments
    pub async fn attach_volume(
        &self,
        server_id: &str,
        volume_id: &str,
        device: Option<&str>,
    ) -> Result<VolumeAttachment, ApiError> {
        let response: AttachmentWrapper<VolumeAttachment> = self
            .client
            .post(
                &format!("/servers/{}/os-volume_attachments", server_id),
                &AttachmentWrapper {
                    volume_attachment: AttachVolumeRequest { volume_id, device },
                },
            )
            .await?;
        Ok(response.volume_attachment)
    }

    /// DELETE /servers/{id}/os-volume_attachments/{attachment_id}
    pub async fn detach_volume(
        &self,
        server_id: &str,
        attachment_id: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete(&format!(
                "/servers/{}/os-volume_attachments/{}",
                server_id, attachment_id
            ))
            .await
    }
}

#[cfg(test)]
#[path = "./compute_test.rs"]
mod compute_test;
