pub mod error;
pub mod http;

pub use error::RemoteError;
pub use http::HttpRemote;

#[cfg(test)]
use mockall::{automock, predicate::*};

use crate::{
    config::{RemoteConfig, verbose},
    models::{Task, TaskDraft},
};
use async_trait::async_trait;
use eyre::Result;
use std::sync::Arc;

/// The remote collection of task records.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Remote {
    async fn list_tasks(&self) -> Result<Vec<Task>, RemoteError>;

    /// Returns the created record when the response body carries one with
    /// its assigned identifier.
    async fn create_task(&self, draft: &TaskDraft) -> Result<Option<Task>, RemoteError>;

    async fn update_task(&self, id: &str, draft: &TaskDraft) -> Result<(), RemoteError>;

    async fn delete_task(&self, id: &str) -> Result<(), RemoteError>;
}

pub type ArcRemote = Arc<dyn Remote + Send + Sync>;

pub fn new_remote(config: &RemoteConfig) -> Result<ArcRemote> {
    if config.endpoint.trim().is_empty() {
        eyre::bail!("No remote endpoint configured");
    }

    let remote: HttpRemote = config.into();

    verbose!("  [+] Remote endpoint: {}", remote.endpoint());
    log::debug!("Using remote endpoint: {}", remote.endpoint());
    Ok(Arc::new(remote))
}
