#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;
mod job;
mod request;

use std::path::Path;

pub use crate::client::{Client, ClientOptions};
pub use crate::config::Credentials;
pub use crate::error::{Error, Result};
pub use crate::job::{AssetValue, Job, JobStatus};
pub use crate::request::{Area, Request};

/// Fetch one slice of a dataset into a local file.
///
/// Implementations block (asynchronously) until the file is complete or the
/// retrieval has failed. Callers issue one retrieval at a time.
#[allow(async_fn_in_trait)]
pub trait Retrieve {
    async fn retrieve(&self, dataset: &str, request: &Request, target: &Path) -> Result<()>;
}
