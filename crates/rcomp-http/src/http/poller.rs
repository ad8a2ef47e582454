//! Completion polling for background jobs.
//!
//! When the server cannot finish an invocation right away it answers with a
//! job id. [`CompletionPoller`] then asks `/status/<id>` on a fixed interval
//! until the job reports `done`. Ticks never overlap: the next sleep starts
//! only after the previous status request has finished or failed.

use async_trait::async_trait;
use log::{debug, warn};
use rcomp::{ClientConfig, InvocationResponse, InvocationResult, RcompError};
use std::time::Duration;
use tokio::time::Instant;

/// Anything that can answer a status query for a job.
#[async_trait]
pub trait JobStatusSource: Send + Sync {
    async fn job_status(&self, job_id: &str) -> Result<InvocationResponse, RcompError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionPoller {
    interval: Duration,
    deadline: Option<Duration>,
}

impl CompletionPoller {
    pub fn new(interval: Duration, deadline: Option<Duration>) -> Self {
        Self { interval, deadline }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.poll_interval, config.poll_deadline)
    }

    /// Poll `job_id` until it completes and return its result.
    ///
    /// Transport, decode and 5xx failures on a tick are logged and the next
    /// tick goes ahead. Any other failure ends polling, as does running past
    /// the configured deadline.
    pub async fn wait<S>(&self, source: &S, job_id: &str) -> Result<InvocationResult, RcompError>
    where
        S: JobStatusSource + ?Sized,
    {
        let started = Instant::now();
        let mut tick: u64 = 0;

        loop {
            tokio::time::sleep(self.interval).await;
            tick += 1;

            match source.job_status(job_id).await {
                // A completed reply ends polling even when it is malformed.
                Ok(response) if response.done => {
                    let result = response.into_result()?;
                    debug!(
                        "Job {job_id} done after {tick} status polls (ec {})",
                        result.exit_code
                    );
                    return Ok(result);
                }
                Ok(_) => {
                    debug!("Job {job_id} still pending after poll {tick}");
                }
                Err(e) if e.is_transient() => {
                    warn!("Status poll {tick} for job {job_id} failed: {e}");
                }
                Err(e) => return Err(e),
            }

            if let Some(deadline) = self.deadline {
                let waited = started.elapsed();
                if waited >= deadline {
                    return Err(RcompError::PollDeadlineExceeded {
                        job_id: job_id.to_string(),
                        waited,
                    });
                }
            }
        }
    }
}
