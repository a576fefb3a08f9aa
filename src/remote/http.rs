#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time;

use crate::config::{RemoteConfig, user_agent};
use crate::models::{Task, TaskDraft};
use crate::remote::{Remote, RemoteError};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};

/// JSON-over-HTTP client for the `/todos` collection.
pub struct HttpRemote {
    endpoint: String,
    timeout: Option<time::Duration>,
    client: reqwest::Client,
}

#[derive(Debug, Serialize, Deserialize)]
struct ListResponse {
    todos: Vec<Task>,
}

/// Servers answer a create either with the bare record or wrapped in an
/// envelope next to a message. Anything else carries no usable identifier.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreateResponse {
    Wrapped { todo: Task },
    Bare(Task),
}

#[async_trait]
impl Remote for HttpRemote {
    async fn list_tasks(&self) -> Result<Vec<Task>, RemoteError> {
        let res = self
            .request(self.client.get(self.collection_url()))
            .send()
            .await?;
        let body = ensure_success(res).await?.text().await?;
        let res: ListResponse = serde_json::from_str(&body)?;
        log::debug!("Listed {} tasks", res.todos.len());
        Ok(res.todos)
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Option<Task>, RemoteError> {
        let res = self
            .request(self.client.post(self.collection_url()))
            .json(draft)
            .send()
            .await?;
        let body = ensure_success(res).await?.text().await?;
        Ok(parse_created(&body))
    }

    async fn update_task(&self, id: &str, draft: &TaskDraft) -> Result<(), RemoteError> {
        let res = self
            .request(self.client.patch(self.item_url(id)))
            .json(draft)
            .send()
            .await?;
        ensure_success(res).await?;
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<(), RemoteError> {
        let res = self
            .request(self.client.delete(self.item_url(id)))
            .send()
            .await?;
        ensure_success(res).await?;
        Ok(())
    }
}

impl From<&RemoteConfig> for HttpRemote {
    fn from(value: &RemoteConfig) -> Self {
        let mut remote = HttpRemote::new().with_endpoint(&value.endpoint);
        remote.timeout = value.timeout();
        remote
    }
}

impl HttpRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Option<time::Duration> {
        self.timeout
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.endpoint)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/todos/{}", self.endpoint, id)
    }

    fn request(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req.header("User-Agent", user_agent());
        match self.timeout {
            Some(timeout) => req.timeout(timeout),
            None => req,
        }
    }
}

impl Default for HttpRemote {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout: None,
            client: reqwest::Client::new(),
        }
    }
}

async fn ensure_success(res: Response) -> Result<Response, RemoteError> {
    if res.status().is_success() {
        return Ok(res);
    }
    let status = res.status().as_u16();
    let body = res.text().await.unwrap_or_default();
    Err(RemoteError::Rejected { status, body })
}

fn parse_created(body: &str) -> Option<Task> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<CreateResponse>(body) {
        Ok(CreateResponse::Wrapped { todo }) | Ok(CreateResponse::Bare(todo)) => Some(todo),
        Err(err) => {
            log::debug!("Create response carries no task record: {}", err);
            None
        }
    }
}
