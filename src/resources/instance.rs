//! Compute instance lifecycle handler: boots servers, reconciles the
//! mutable pieces in place and tears them down, polling the service
//! through every asynchronous transition.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::api::blockstorage::BlockStorageApi;
use crate::api::compute::{
    BlockDeviceMapping, ComputeApi, CreateServerRequest, NamedRef, NetworkAttachment, Server,
    UpdateServerRequest, VolumeAttachment,
};
use crate::api::network::NetworkApi;
use crate::api::ApiError;
use crate::resources::{Resource, ResourceError};
use crate::wait::StateChangeConf;

const STATUS_BUILD: &str = "BUILD";
const STATUS_ACTIVE: &str = "ACTIVE";
const STATUS_RESIZE: &str = "RESIZE";
const STATUS_VERIFY_RESIZE: &str = "VERIFY_RESIZE";
/// Synthetic status substituted when the server is gone; never reported
/// by the service itself.
const STATUS_DELETED: &str = "DELETED";

const VOLUME_ATTACHING: &str = "attaching";
const VOLUME_DETACHING: &str = "detaching";
const VOLUME_AVAILABLE: &str = "available";
const VOLUME_IN_USE: &str = "in-use";

/// Boot image reference. Exactly one of id or name, by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Id(String),
    Name(String),
}

/// Flavor reference. Exactly one of id or name, by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlavorRef {
    Id(String),
    Name(String),
}

/// Cloud-init payload. The raw bytes go out once, at boot; only the
/// content hash is surfaced afterwards for drift comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    raw: Vec<u8>,
    hash: String,
}

impl UserData {
    pub fn new(raw: impl Into<Vec<u8>>) -> Self {
        let raw = raw.into();
        let hash = format!("{:x}", Sha256::digest(&raw));
        Self { raw, hash }
    }

    pub fn content_hash(&self) -> &str {
        &self.hash
    }

    fn encoded(&self) -> String {
        BASE64.encode(&self.raw)
    }
}

/// One desired network attachment; any combination of the three fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSpec {
    pub network_id: Option<String>,
    pub port_id: Option<String>,
    pub fixed_ip: Option<String>,
}

/// Boot-from-volume block device declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDevice {
    pub uuid: String,
    pub source_type: String,
    pub destination_type: Option<String>,
    pub volume_size: Option<u64>,
    pub boot_index: Option<i64>,
}

/// Desired volume attachment. Set identity is the (volume, device) pair:
/// moving a volume to a different device path is a detach plus attach.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VolumeAttachmentSpec {
    pub volume_id: String,
    pub device: Option<String>,
}

/// Operator-declared desired state for one instance.
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    pub region: Option<String>,
    pub name: String,
    pub image: ImageRef,
    pub flavor: FlavorRef,
    pub floating_ip: Option<String>,
    pub user_data: Option<UserData>,
    pub security_groups: Vec<String>,
    pub availability_zone: Option<String>,
    pub networks: Vec<NetworkSpec>,
    pub metadata: HashMap<String, String>,
    pub config_drive: bool,
    pub admin_pass: Option<String>,
    pub access_ip_v4: Option<String>,
    pub access_ip_v6: Option<String>,
    pub key_pair: Option<String>,
    pub block_devices: Vec<BlockDevice>,
    pub volumes: Vec<VolumeAttachmentSpec>,
}

impl InstanceConfig {
    pub fn new(name: impl Into<String>, image: ImageRef, flavor: FlavorRef) -> Self {
        Self {
            region: None,
            name: name.into(),
            image,
            flavor,
            floating_ip: None,
            user_data: None,
            security_groups: Vec::new(),
            availability_zone: None,
            networks: Vec::new(),
            metadata: HashMap::new(),
            config_drive: false,
            admin_pass: None,
            access_ip_v4: None,
            access_ip_v6: None,
            key_pair: None,
            block_devices: Vec::new(),
            volumes: Vec::new(),
        }
    }
}

/// Connection hint handed to downstream provisioning tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionHint {
    pub protocol: String,
    pub host: String,
}

/// Snapshot of remote reality, rebuilt fully on every read.
#[derive(Debug, Clone)]
pub struct InstanceState {
    pub id: String,
    pub name: String,
    pub access_ip_v4: Option<String>,
    pub access_ip_v6: Option<String>,
    pub metadata: HashMap<String, String>,
    pub security_groups: Vec<String>,
    pub flavor_id: String,
    pub flavor_name: String,
    pub image_id: String,
    pub image_name: String,
    pub volumes: Vec<VolumeAttachment>,
    pub connection: Option<ConnectionHint>,
}

/// Fields the host's diff can report as changed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceField {
    Name,
    AccessIpV4,
    AccessIpV6,
    Metadata,
    SecurityGroups,
    AdminPass,
    FloatingIp,
    Volumes,
    Flavor,
}

#[derive(Debug, Clone, Default)]
pub struct ChangedFields(HashSet<InstanceField>);

impl ChangedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: InstanceField) -> Self {
        self.0.insert(field);
        self
    }

    pub fn has(&self, field: InstanceField) -> bool {
        self.0.contains(&field)
    }
}

impl FromIterator<InstanceField> for ChangedFields {
    fn from_iter<I: IntoIterator<Item = InstanceField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Poll timing for the asynchronous server-side transitions.
#[derive(Debug, Clone)]
pub struct Timeouts {
    pub create: Duration,
    pub delete: Duration,
    pub resize: Duration,
    pub volume: Duration,
    pub delay: Duration,
    pub min_interval: Duration,
    pub volume_delay: Duration,
    pub volume_min_interval: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create: Duration::from_secs(600),
            delete: Duration::from_secs(600),
            resize: Duration::from_secs(180),
            volume: Duration::from_secs(1800),
            delay: Duration::from_secs(10),
            min_interval: Duration::from_secs(3),
            volume_delay: Duration::from_secs(5),
            volume_min_interval: Duration::from_secs(2),
        }
    }
}

/// Outcome of a best-effort floating IP assignment. Failures land here
/// instead of in the operation result; callers log them and move on.
#[derive(Debug)]
pub enum FloatingIpOutcome {
    Assigned(String),
    /// No floating IP was requested.
    Skipped,
    /// Assignment failed; the instance operation proceeds regardless.
    Ignored(ResourceError),
}

pub struct ComputeInstanceResource {
    compute: ComputeApi,
    network: NetworkApi,
    blockstorage: BlockStorageApi,
    timeouts: Timeouts,
}

impl ComputeInstanceResource {
    pub fn new(compute: ComputeApi, network: NetworkApi, blockstorage: BlockStorageApi) -> Self {
        Self {
            compute,
            network,
            blockstorage,
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    async fn resolve_image_id(&self, image: &ImageRef) -> Result<String, ResourceError> {
        match image {
            ImageRef::Id(id) => Ok(id.clone()),
            ImageRef::Name(name) => {
                let images = self.compute.list_images(Some(name)).await?;
                let mut matches: Vec<_> =
                    images.into_iter().filter(|i| i.name == *name).collect();
                match matches.len() {
                    1 => Ok(matches.remove(0).id),
                    0 => Err(ResourceError::LookupNotFound {
                        kind: "image",
                        name: name.clone(),
                    }),
                    count => Err(ResourceError::AmbiguousLookup {
                        kind: "image",
                        name: name.clone(),
                        count,
                    }),
                }
            }
        }
    }

    async fn resolve_flavor_id(&self, flavor: &FlavorRef) -> Result<String, ResourceError> {
        match flavor {
            FlavorRef::Id(id) => Ok(id.clone()),
            FlavorRef::Name(name) => {
                let flavors = self.compute.list_flavors().await?;
                let mut matches: Vec<_> =
                    flavors.into_iter().filter(|f| f.name == *name).collect();
                match matches.len() {
                    1 => Ok(matches.remove(0).id),
                    0 => Err(ResourceError::LookupNotFound {
                        kind: "flavor",
                        name: name.clone(),
                    }),
                    count => Err(ResourceError::AmbiguousLookup {
                        kind: "flavor",
                        name: name.clone(),
                        count,
                    }),
                }
            }
        }
    }

    /// Status refresh for the instance poll loops. Not-found becomes the
    /// synthetic DELETED status so delete can wait for it.
    async fn instance_refresh(&self, id: &str) -> Result<(Option<Server>, String), ApiError> {
        match self.compute.get_server(id).await {
            Ok(server) => {
                let status = server.status.clone();
                Ok((Some(server), status))
            }
            Err(err) if err.is_not_found() => Ok((None, STATUS_DELETED.to_string())),
            Err(err) => Err(err),
        }
    }

    async fn wait_for_instance(
        &self,
        id: &str,
        pending: &[&str],
        target: &str,
        timeout: Duration,
    ) -> Result<(), ResourceError> {
        let conf = StateChangeConf::new(
            pending,
            target,
            timeout,
            self.timeouts.delay,
            self.timeouts.min_interval,
        );
        conf.wait_for(|| self.instance_refresh(id))
            .await
            .map(|_| ())
            .map_err(|source| ResourceError::Convergence {
                what: format!("instance {} to become {}", id, target),
                source,
            })
    }

    async fn volume_refresh(
        &self,
        volume_id: &str,
    ) -> Result<(Option<()>, String), ApiError> {
        let volume = self.blockstorage.get_volume(volume_id).await?;
        Ok((Some(()), volume.status))
    }

    async fn wait_for_volume(
        &self,
        volume_id: &str,
        pending: &[&str],
        target: &str,
    ) -> Result<(), ResourceError> {
        let conf = StateChangeConf::new(
            pending,
            target,
            self.timeouts.volume,
            self.timeouts.volume_delay,
            self.timeouts.volume_min_interval,
        );
        conf.wait_for(|| self.volume_refresh(volume_id))
            .await
            .map(|_| ())
            .map_err(|source| ResourceError::Convergence {
                what: format!("volume {} to become {}", volume_id, target),
                source,
            })
    }

    async fn attach_volume(
        &self,
        server_id: &str,
        spec: &VolumeAttachmentSpec,
    ) -> Result<(), ResourceError> {
        self.compute
            .attach_volume(server_id, &spec.volume_id, spec.device.as_deref())
            .await?;
        self.wait_for_volume(
            &spec.volume_id,
            &[VOLUME_ATTACHING, VOLUME_AVAILABLE],
            VOLUME_IN_USE,
        )
        .await?;
        tracing::info!(volume = %spec.volume_id, server = %server_id, "attached volume");
        Ok(())
    }

    async fn detach_volume(
        &self,
        server_id: &str,
        attachment: &VolumeAttachment,
    ) -> Result<(), ResourceError> {
        self.compute.detach_volume(server_id, &attachment.id).await?;
        self.wait_for_volume(
            &attachment.volume_id,
            &[VOLUME_DETACHING, VOLUME_IN_USE],
            VOLUME_AVAILABLE,
        )
        .await?;
        tracing::info!(volume = %attachment.volume_id, server = %server_id, "detached volume");
        Ok(())
    }

    /// Best-effort floating IP assignment. Per the resource contract the
    /// instance operation proceeds whether or not this succeeds, so the
    /// failure is reported as a value rather than an error.
    async fn assign_floating_ip(
        &self,
        floating_ip: Option<&str>,
        server_id: &str,
    ) -> FloatingIpOutcome {
        let address = match floating_ip.filter(|ip| !ip.is_empty()) {
            Some(address) => address,
            None => return FloatingIpOutcome::Skipped,
        };
        match self.try_assign_floating_ip(address, server_id).await {
            Ok(()) => {
                tracing::info!(address, server = %server_id, "assigned floating IP");
                FloatingIpOutcome::Assigned(address.to_string())
            }
            Err(err) => FloatingIpOutcome::Ignored(err),
        }
    }

    async fn try_assign_floating_ip(
        &self,
        address: &str,
        server_id: &str,
    ) -> Result<(), ResourceError> {
        let ips = self.network.list_floating_ips().await?;
        let ip = ips
            .into_iter()
            .find(|ip| ip.floating_ip_address == address)
            .ok_or_else(|| ResourceError::LookupNotFound {
                kind: "floating IP",
                name: address.to_string(),
            })?;

        let networks = self.network.list_networks().await?;
        let network_id = networks
            .into_iter()
            .next()
            .map(|n| n.id)
            .ok_or_else(|| ResourceError::LookupNotFound {
                kind: "network for instance",
                name: server_id.to_string(),
            })?;

        let ports = self.network.list_ports(server_id, &network_id).await?;
        let port_id = ports
            .into_iter()
            .next()
            .map(|p| p.id)
            .ok_or_else(|| ResourceError::LookupNotFound {
                kind: "port for instance",
                name: server_id.to_string(),
            })?;

        self.network.assign_floating_ip_port(&ip.id, &port_id).await?;
        Ok(())
    }

    fn build_create_request(
        &self,
        config: &InstanceConfig,
        image_ref: String,
        flavor_ref: String,
    ) -> CreateServerRequest {
        CreateServerRequest {
            name: config.name.clone(),
            image_ref,
            flavor_ref,
            security_groups: config
                .security_groups
                .iter()
                .map(|name| NamedRef { name: name.clone() })
                .collect(),
            availability_zone: config.availability_zone.clone(),
            networks: config
                .networks
                .iter()
                .map(|spec| NetworkAttachment {
                    uuid: spec.network_id.clone(),
                    port: spec.port_id.clone(),
                    fixed_ip: spec.fixed_ip.clone(),
                })
                .collect(),
            metadata: config.metadata.clone(),
            config_drive: config.config_drive.then_some(true),
            admin_pass: config.admin_pass.clone(),
            user_data: config.user_data.as_ref().map(UserData::encoded),
            key_name: config.key_pair.clone(),
            block_devices: config
                .block_devices
                .iter()
                .map(|device| BlockDeviceMapping {
                    uuid: device.uuid.clone(),
                    source_type: device.source_type.clone(),
                    destination_type: device.destination_type.clone(),
                    volume_size: device.volume_size,
                    boot_index: device.boot_index,
                })
                .collect(),
        }
    }

    /// Everything after the server document exists: wait for the build,
    /// then the optional extras, then read back.
    async fn finish_create(
        &self,
        id: &str,
        config: &InstanceConfig,
    ) -> Result<InstanceState, ResourceError> {
        self.wait_for_instance(id, &[STATUS_BUILD], STATUS_ACTIVE, self.timeouts.create)
            .await?;

        if let FloatingIpOutcome::Ignored(err) =
            self.assign_floating_ip(config.floating_ip.as_deref(), id).await
        {
            tracing::warn!(server = %id, error = %err, "floating IP assignment failed, continuing");
        }

        for spec in &config.volumes {
            self.attach_volume(id, spec).await?;
        }

        match self.read(id).await? {
            Some(state) => Ok(state),
            None => Err(ResourceError::Vanished(id.to_string())),
        }
    }
}

#[async_trait]
impl Resource for ComputeInstanceResource {
    type Config = InstanceConfig;
    type State = InstanceState;
    type Changes = ChangedFields;

    fn type_name(&self) -> &str {
        "openstack_compute_instance"
    }

    async fn create(&self, config: &InstanceConfig) -> Result<InstanceState, ResourceError> {
        let image_ref = self.resolve_image_id(&config.image).await?;
        let flavor_ref = self.resolve_flavor_id(&config.flavor).await?;

        let request = self.build_create_request(config, image_ref, flavor_ref);
        tracing::debug!(name = %config.name, "creating instance");
        let created = self.compute.create_server(&request).await?;
        tracing::info!(id = %created.id, "instance created, waiting for it to become active");

        // the server exists from here on; keep its handle on any failure
        // so the next reconciliation can pick it up
        match self.finish_create(&created.id, config).await {
            Ok(state) => Ok(state),
            Err(source) => Err(ResourceError::Incomplete {
                id: created.id,
                source: Box::new(source),
            }),
        }
    }

    async fn read(&self, id: &str) -> Result<Option<InstanceState>, ResourceError> {
        let server = match self.compute.get_server(id).await {
            Ok(server) => server,
            Err(err) if err.is_not_found() => {
                tracing::debug!(id, "instance no longer exists");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let (access_ip_v4, access_ip_v6) = derive_access_addresses(&server);

        let flavor = self.compute.get_flavor(&server.flavor.id).await?;
        let image = self.compute.get_image(&server.image.id).await?;
        let volumes = self.compute.list_volume_attachments(id).await?;

        let connection = access_ip_v4
            .clone()
            .or_else(|| access_ip_v6.clone())
            .map(|host| ConnectionHint {
                protocol: "ssh".to_string(),
                host,
            });

        Ok(Some(InstanceState {
            id: server.id,
            name: server.name,
            access_ip_v4,
            access_ip_v6,
            metadata: server.metadata,
            security_groups: server
                .security_groups
                .iter()
                .map(|g| g.name.clone())
                .collect(),
            flavor_id: server.flavor.id,
            flavor_name: flavor.name,
            image_id: server.image.id,
            image_name: image.name,
            volumes,
            connection,
        }))
    }

    async fn update(
        &self,
        id: &str,
        prior: &InstanceState,
        desired: &InstanceConfig,
        changed: &ChangedFields,
    ) -> Result<InstanceState, ResourceError> {
        let mut server_update = UpdateServerRequest::default();
        if changed.has(InstanceField::Name) {
            server_update.name = Some(desired.name.clone());
        }
        if changed.has(InstanceField::AccessIpV4) {
            server_update.access_ipv4 = desired.access_ip_v4.clone();
        }
        if changed.has(InstanceField::AccessIpV6) {
            server_update.access_ipv6 = desired.access_ip_v6.clone();
        }
        if !server_update.is_empty() {
            self.compute.update_server(id, &server_update).await?;
        }

        if changed.has(InstanceField::Metadata) {
            self.compute.replace_metadata(id, &desired.metadata).await?;
        }

        if changed.has(InstanceField::SecurityGroups) {
            let (added, removed) = set_diff(&prior.security_groups, &desired.security_groups);
            for group in &added {
                self.compute.add_security_group(id, group).await?;
                tracing::debug!(%group, server = %id, "added security group");
            }
            for group in &removed {
                match self.compute.remove_security_group(id, group).await {
                    Ok(()) => tracing::debug!(%group, server = %id, "removed security group"),
                    // already detached remotely; nothing left to reconcile
                    Err(err) if err.is_not_found() => continue,
                    Err(err) => return Err(err.into()),
                }
            }
        }

        if changed.has(InstanceField::AdminPass) {
            if let Some(password) = desired.admin_pass.as_deref().filter(|p| !p.is_empty()) {
                self.compute.change_password(id, password).await?;
            }
        }

        if changed.has(InstanceField::FloatingIp) {
            if let FloatingIpOutcome::Ignored(err) =
                self.assign_floating_ip(desired.floating_ip.as_deref(), id).await
            {
                tracing::warn!(server = %id, error = %err, "floating IP assignment failed, continuing");
            }
        }

        if changed.has(InstanceField::Volumes) {
            let (detach, attach) = volume_diff(&prior.volumes, &desired.volumes);
            // detach everything first so freed device paths can be reused
            for attachment in detach {
                self.detach_volume(id, attachment).await?;
            }
            for spec in attach {
                self.attach_volume(id, spec).await?;
            }
        }

        if changed.has(InstanceField::Flavor) {
            let flavor_ref = self.resolve_flavor_id(&desired.flavor).await?;
            tracing::debug!(server = %id, flavor = %flavor_ref, "resizing instance");
            self.compute.resize(id, &flavor_ref).await?;
            self.wait_for_instance(
                id,
                &[STATUS_RESIZE],
                STATUS_VERIFY_RESIZE,
                self.timeouts.resize,
            )
            .await?;
            self.compute.confirm_resize(id).await?;
            self.wait_for_instance(
                id,
                &[STATUS_VERIFY_RESIZE],
                STATUS_ACTIVE,
                self.timeouts.resize,
            )
            .await?;
        }

        match self.read(id).await? {
            Some(state) => Ok(state),
            None => Err(ResourceError::Vanished(id.to_string())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), ResourceError> {
        self.compute.delete_server(id).await?;
        self.wait_for_instance(id, &[STATUS_ACTIVE], STATUS_DELETED, self.timeouts.delete)
            .await?;
        tracing::info!(id, "instance deleted");
        Ok(())
    }
}

/// Membership reconciliation: what to add is desired minus prior, what
/// to remove is prior minus desired. Declaration order is preserved.
fn set_diff(prior: &[String], desired: &[String]) -> (Vec<String>, Vec<String>) {
    let prior_set: HashSet<&str> = prior.iter().map(String::as_str).collect();
    let desired_set: HashSet<&str> = desired.iter().map(String::as_str).collect();

    let added = desired
        .iter()
        .filter(|g| !prior_set.contains(g.as_str()))
        .cloned()
        .collect();
    let removed = prior
        .iter()
        .filter(|g| !desired_set.contains(g.as_str()))
        .cloned()
        .collect();

    (added, removed)
}

/// Volume reconciliation plan: attachments only in prior get detached,
/// specs only in desired get attached. The caller runs every detach
/// before the first attach.
fn volume_diff<'a>(
    prior: &'a [VolumeAttachment],
    desired: &'a [VolumeAttachmentSpec],
) -> (Vec<&'a VolumeAttachment>, Vec<&'a VolumeAttachmentSpec>) {
    let prior_specs: Vec<VolumeAttachmentSpec> = prior.iter().map(spec_of).collect();
    let desired_set: HashSet<&VolumeAttachmentSpec> = desired.iter().collect();
    let prior_set: HashSet<&VolumeAttachmentSpec> = prior_specs.iter().collect();

    let detach = prior
        .iter()
        .zip(&prior_specs)
        .filter(|(_, spec)| !desired_set.contains(spec))
        .map(|(attachment, _)| attachment)
        .collect();
    let attach = desired
        .iter()
        .filter(|spec| !prior_set.contains(spec))
        .collect();

    (detach, attach)
}

fn spec_of(attachment: &VolumeAttachment) -> VolumeAttachmentSpec {
    VolumeAttachmentSpec {
        volume_id: attachment.volume_id.clone(),
        device: non_empty(&attachment.device),
    }
}

/// Access-address derivation: the explicit access field wins, then the
/// first "public"-network address of the right version, then the first
/// matching-version address on any network. Derived IPv6 hosts are
/// bracket-wrapped for URL use.
fn derive_access_addresses(server: &Server) -> (Option<String>, Option<String>) {
    let v4 = non_empty(&server.access_ipv4)
        .or_else(|| find_address(server, 4, true))
        .or_else(|| find_address(server, 4, false));
    let v6 = non_empty(&server.access_ipv6)
        .or_else(|| find_address(server, 6, true).map(|a| format!("[{}]", a)))
        .or_else(|| find_address(server, 6, false).map(|a| format!("[{}]", a)));
    (v4, v6)
}

fn find_address(server: &Server, version: u8, public_only: bool) -> Option<String> {
    if public_only {
        return server
            .addresses
            .get("public")
            .and_then(|addrs| addrs.iter().find(|a| a.version == version))
            .map(|a| a.addr.clone());
    }

    // addresses is keyed by network name; sort for a deterministic search
    let mut names: Vec<&String> = server.addresses.keys().collect();
    names.sort();
    for name in names {
        if let Some(found) = server.addresses[name].iter().find(|a| a.version == version) {
            return Some(found.addr.clone());
        }
    }
    None
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
#[path = "./instance_test.rs"]
mod instance_test;
