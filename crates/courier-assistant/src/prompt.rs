//! Prompt orchestration against the remote assistant API
//!
//! Five sequential remote calls: acquire a thread, post the user message,
//! start a run, poll the run until it reaches a terminal status, then fetch
//! the newest message as the reply. Any step's failure aborts the remaining
//! steps; nothing already posted is retracted.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use courier_config::AssistantConfig;

use crate::connector::{ASSISTANTS_V1, Connector, HEADER_OPENAI_BETA, RequestOptions, send_as};
use crate::error::{AssistantError, Result};
use crate::types::{CreateMessage, CreateRun, Message, MessageList, Run, ThreadList};

/// Bound on the run-status polling loop
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollPolicy {
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.poll_interval_ms),
            max_attempts: config.poll_max_attempts,
        }
    }
}

/// Capability to drive one prompt through the remote assistant
#[async_trait]
pub trait PromptOrchestrator: Send + Sync {
    async fn send_prompt(&self, message: &str) -> Result<Message>;
}

/// Prompt orchestration backed by the outbound connector
pub struct PromptService {
    connector: Arc<dyn Connector>,
    assistant_id: String,
    poll: PollPolicy,
}

impl PromptService {
    pub fn new(connector: Arc<dyn Connector>, assistant_id: impl Into<String>, poll: PollPolicy) -> Self {
        Self {
            connector,
            assistant_id: assistant_id.into(),
            poll,
        }
    }

    /// Reuse the remote account's first listed thread
    ///
    /// The original behavior: no thread is created, every prompt lands in
    /// whatever thread the remote lists first. Kept as observed pending
    /// product review.
    async fn acquire_thread(&self) -> Result<String> {
        let options = assistants_request(RequestOptions::get("/threads"));
        let threads: Option<ThreadList> = send_as(self.connector.as_ref(), options).await?;

        let thread_id = threads.map(|list| list.first_id).unwrap_or_default();
        if thread_id.is_empty() {
            return Err(AssistantError::CreateThread);
        }

        tracing::info!(id = %thread_id, "thread acquired");
        Ok(thread_id)
    }

    async fn post_message(&self, thread_id: &str, message: &str) -> Result<()> {
        let body = serde_json::to_value(CreateMessage {
            role: "user",
            content: message,
        })?;
        let options =
            assistants_request(RequestOptions::post(format!("/threads/{thread_id}/messages")).json(body));

        let created: Option<Message> = send_as(self.connector.as_ref(), options).await?;
        let Some(created) = created else {
            return Err(AssistantError::CreateMessage);
        };

        tracing::info!(id = %created.id, "message created");
        Ok(())
    }

    async fn start_run(&self, thread_id: &str) -> Result<String> {
        let body = serde_json::to_value(CreateRun {
            assistant_id: &self.assistant_id,
            instructions: None,
        })?;
        let options = assistants_request(RequestOptions::post(format!("/threads/{thread_id}/runs")).json(body));

        let run: Option<Run> = send_as(self.connector.as_ref(), options).await?;
        let Some(run) = run else {
            return Err(AssistantError::RunThread);
        };

        tracing::info!(id = %run.id, status = %run.status, "run started");
        Ok(run.id)
    }

    /// Poll the run until it reports a terminal status
    ///
    /// Suspends for the configured interval between polls and gives up
    /// after `max_attempts` polls so a run stuck on the remote side cannot
    /// hang the caller forever.
    async fn await_run(&self, thread_id: &str, run_id: &str) -> Result<()> {
        let path = format!("/threads/{thread_id}/runs/{run_id}");

        for attempt in 1..=self.poll.max_attempts {
            let options = assistants_request(RequestOptions::get(path.clone()));
            let run: Option<Run> = send_as(self.connector.as_ref(), options).await?;
            let Some(run) = run else {
                return Err(AssistantError::RunStatus);
            };

            tracing::debug!(id = %run.id, status = %run.status, attempt, "run status");

            if run.is_terminal() {
                return Ok(());
            }

            tokio::time::sleep(self.poll.interval).await;
        }

        Err(AssistantError::RunTimeout {
            attempts: self.poll.max_attempts,
        })
    }

    async fn fetch_reply(&self, thread_id: &str) -> Result<Message> {
        let options = assistants_request(RequestOptions::get(format!("/threads/{thread_id}/messages")));

        let reply: Option<MessageList> = send_as(self.connector.as_ref(), options).await?;
        let Some(reply) = reply else {
            return Err(AssistantError::GetReply);
        };

        // Newest message first; an empty collection is out of contract
        let message = reply.data.into_iter().next().ok_or(AssistantError::EmptyReply)?;

        tracing::info!(id = %message.id, "reply fetched");
        Ok(message)
    }
}

/// Attach the beta opt-in header required by the assistants sub-API
fn assistants_request(options: RequestOptions) -> RequestOptions {
    options.header(HEADER_OPENAI_BETA.clone(), ASSISTANTS_V1.clone())
}

#[async_trait]
impl PromptOrchestrator for PromptService {
    async fn send_prompt(&self, message: &str) -> Result<Message> {
        let thread_id = self.acquire_thread().await?;
        self.post_message(&thread_id, message).await?;
        let run_id = self.start_run(&thread_id).await?;
        self.await_run(&thread_id, &run_id).await?;
        self.fetch_reply(&thread_id).await
    }
}
