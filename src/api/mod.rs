pub mod blockstorage;
pub mod client;
pub mod compute;
pub mod error;
pub mod network;
pub mod test_helpers;

pub use client::{ApiQueryParams, ServiceClient};
pub use error::ApiError;
