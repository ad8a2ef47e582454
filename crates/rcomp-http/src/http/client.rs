//! HTTP client for the rcomp wire protocol

use super::error::{read_json, report};
use super::poller::{CompletionPoller, JobStatusSource};
use async_trait::async_trait;
use rcomp::{
    ClientConfig, Endpoint, IndexListing, InvocationRequest, InvocationResponse, InvocationResult,
    JobState, RcompError, VersionInfo, prepare_argv,
};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Client for one rcomp server.
///
/// Every request opens its own connection; idle connections are never kept
/// for reuse.
#[derive(Debug, Clone)]
pub struct RcompClient {
    http: reqwest::Client,
    endpoint: Endpoint,
    config: ClientConfig,
}

impl RcompClient {
    /// Build a client, resolving the endpoint before any network I/O.
    pub fn new(config: ClientConfig) -> Result<Self, RcompError> {
        let endpoint = config.endpoint()?;

        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| RcompError::from_transport_error(e, "HTTP client setup"))?;

        Ok(Self {
            http,
            endpoint,
            config,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// List the commands the server offers (`GET /`).
    pub async fn fetch_index(&self) -> Result<IndexListing, RcompError> {
        self.get_json(&[]).await.map_err(report)
    }

    /// Server version descriptor (`GET /version`).
    pub async fn fetch_version(&self) -> Result<VersionInfo, RcompError> {
        self.get_json(&["version"]).await.map_err(report)
    }

    /// One status query for a job, without polling.
    pub async fn status(&self, job_id: &str) -> Result<InvocationResponse, RcompError> {
        self.job_status(job_id).await.map_err(report)
    }

    /// Send one invocation and return the job state the server replied with.
    pub async fn submit(
        &self,
        command: &str,
        request: &InvocationRequest,
    ) -> Result<JobState, RcompError> {
        self.post_invocation(command, request)
            .await
            .and_then(InvocationResponse::into_state)
            .map_err(report)
    }

    /// Run `command` remotely with `argv` as given, waiting for completion.
    pub async fn invoke(
        &self,
        command: &str,
        argv: Vec<String>,
    ) -> Result<InvocationResult, RcompError> {
        self.invoke_request(command, &InvocationRequest::new(argv))
            .await
    }

    pub async fn invoke_request(
        &self,
        command: &str,
        request: &InvocationRequest,
    ) -> Result<InvocationResult, RcompError> {
        match self.submit(command, request).await? {
            JobState::Done(result) => Ok(result),
            JobState::Pending { id } => {
                debug!(job_id = %id, command, "job deferred, polling for completion");
                CompletionPoller::from_config(&self.config)
                    .wait(self, &id)
                    .await
                    .map_err(report)
            }
        }
    }

    /// Inline file arguments of `command`, then invoke it.
    pub async fn run(
        &self,
        command: &str,
        argv: Vec<String>,
    ) -> Result<InvocationResult, RcompError> {
        let argv = prepare_argv(command, argv).await?;
        self.invoke(command, argv).await
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, RcompError> {
        let url = self.endpoint.url(segments)?;
        let context = format!("GET {}", url.path());
        debug!(%url, "sending request");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| RcompError::from_transport_error(e, &context))?;
        debug!(%url, status = %response.status(), "received response");

        read_json(response, &context).await
    }

    async fn post_invocation(
        &self,
        command: &str,
        request: &InvocationRequest,
    ) -> Result<InvocationResponse, RcompError> {
        let url = self.endpoint.url(&[command])?;
        let context = format!("POST {}", url.path());
        let body = serde_json::to_vec(request)
            .map_err(|e| RcompError::from_decode_error(e, &context))?;
        debug!(%url, argc = request.argv.len(), bytes = body.len(), "sending invocation");

        let response = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await
            .map_err(|e| RcompError::from_transport_error(e, &context))?;
        debug!(%url, status = %response.status(), "received response");

        read_json(response, &context).await
    }
}

#[async_trait]
impl JobStatusSource for RcompClient {
    async fn job_status(&self, job_id: &str) -> Result<InvocationResponse, RcompError> {
        self.get_json(&["status", job_id]).await
    }
}
