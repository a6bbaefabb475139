//! Declarative lifecycle management for OpenStack compute instances.
//!
//! The crate exposes one managed resource type,
//! [`resources::instance::ComputeInstanceResource`], behind the
//! [`resources::Resource`] lifecycle contract. A host process owns
//! planning and diffing; this crate turns its create/read/update/delete
//! calls into OpenStack API traffic, polling every asynchronous
//! transition through [`wait::StateChangeConf`] until the instance
//! converges.

pub mod api;
pub mod provider;
pub mod resources;
pub mod wait;

pub use provider::{Clients, ProviderConfig, ProviderError};
pub use resources::instance::ComputeInstanceResource;
pub use resources::{Resource, ResourceError};
pub use wait::{StateChangeConf, WaitError};
