//! Resource lifecycle contract.
//!
//! The host process owns planning and diffing; a resource only has to
//! answer the four lifecycle entry points against remote reality.

use async_trait::async_trait;
use thiserror::Error;

use crate::api::ApiError;
use crate::wait::WaitError;

pub mod instance;

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("unable to find {kind} {name:?}")]
    LookupNotFound { kind: &'static str, name: String },

    #[error("found {count} {kind}s matching {name:?}")]
    AmbiguousLookup {
        kind: &'static str,
        name: String,
        count: usize,
    },

    #[error("error waiting for {what}: {source}")]
    Convergence {
        what: String,
        #[source]
        source: WaitError,
    },

    #[error("instance {id} was created but did not converge: {source}")]
    Incomplete {
        /// Remote handle of the instance that was successfully created.
        /// Callers should record it so the next reconciliation can pick
        /// the instance up instead of leaking it.
        id: String,
        #[source]
        source: Box<ResourceError>,
    },

    #[error("instance {0} disappeared during the operation")]
    Vanished(String),
}

/// Lifecycle entry points for one managed resource type.
///
/// `read` returns `Ok(None)` when the remote entity no longer exists so
/// the host can drop it from its records.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Desired state as declared by the operator.
    type Config: Send + Sync;
    /// Observed remote state, rebuilt fully on every read.
    type State: Send + Sync;
    /// Which config fields changed, as reported by the host's diff.
    type Changes: Send + Sync;

    fn type_name(&self) -> &str;

    async fn create(&self, config: &Self::Config) -> Result<Self::State, ResourceError>;

    async fn read(&self, id: &str) -> Result<Option<Self::State>, ResourceError>;

    async fn update(
        &self,
        id: &str,
        prior: &Self::State,
        desired: &Self::Config,
        changed: &Self::Changes,
    ) -> Result<Self::State, ResourceError>;

    async fn delete(&self, id: &str) -> Result<(), ResourceError>;
}
