//! Deferred delivery of one outbound email through the external job
//! framework.
//!
//! A [`QueuedSendJob`] holds a fixed snapshot of the message to deliver and
//! makes at most one delivery attempt per `process` call. Retrying a send
//! inside the job would risk duplicate emails and slow jobs piling up in the
//! queue, so retries (if any) are entirely the framework's decision.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::JobError;
use crate::mailer::Mailer;

/// Placeholder written over the message body after confirmed delivery, so
/// sent message content is not retained in job storage.
pub const SCRUBBED_BODY_PLACEHOLDER: &str = "Email sent successfully. Message body deleted";

/// Execution context handed to a job by the runner.
///
/// Carries the collaborators a job needs to do its work; jobs stay plain
/// data and receive capabilities by composition rather than inheriting them
/// from a framework base type.
#[derive(Clone)]
pub struct JobContext {
    /// Mailer adapter used for the actual delivery.
    pub mailer: Arc<Mailer>,
}

impl JobContext {
    /// Create a context around the given mailer.
    pub fn new(mailer: Arc<Mailer>) -> Self {
        Self { mailer }
    }
}

/// Capability interface consumed by the external job runner.
#[async_trait]
pub trait RunnableJob: Send {
    /// Human-readable title for operator-facing job listings.
    fn title(&self) -> String;

    /// Deduplication signature letting the framework collapse duplicate
    /// pending jobs.
    fn signature(&self) -> String;

    /// Whether the job has reached its terminal success state.
    fn is_complete(&self) -> bool;

    /// Execute one step of the job.
    async fn process(&mut self, ctx: &JobContext) -> Result<(), JobError>;
}

/// A queued unit of deferred work wrapping one outbound email.
///
/// Holds the destination list, the subject (used only for titling and the
/// dedup signature, never for delivery), and the fully formed raw message
/// text that is actually transmitted. The job framework persists this
/// struct between enqueue and execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedSendJob {
    destinations: Vec<String>,
    subject: String,
    raw_message_text: String,
    current_step: u32,
    total_steps: u32,
    is_complete: bool,
    #[serde(default)]
    messages: Vec<String>,
}

impl QueuedSendJob {
    /// Create a new job from a snapshot of the message to deliver.
    pub fn new(
        destinations: Vec<String>,
        subject: impl Into<String>,
        raw_message_text: impl Into<String>,
    ) -> Self {
        Self {
            destinations,
            subject: subject.into(),
            raw_message_text: raw_message_text.into(),
            current_step: 0,
            total_steps: 1,
            is_complete: false,
            messages: Vec::new(),
        }
    }

    /// Recipient addresses this job will deliver to.
    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }

    /// Subject line, for display purposes only.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The raw message payload (or the scrub placeholder once complete).
    pub fn raw_message_text(&self) -> &str {
        &self.raw_message_text
    }

    /// Number of `process` invocations that have run.
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// Total steps this job takes; always 1.
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Whether the job has delivered successfully.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Diagnostic messages recorded during execution.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Append a diagnostic message to the job's log.
    pub fn add_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(message = %message, "queued send job");
        self.messages.push(message);
    }

    /// Human-readable title: recipients and subject.
    pub fn title(&self) -> String {
        format!(
            "Email To: {} Subject: {}",
            self.destinations.join(", "),
            self.subject
        )
    }

    /// Deduplication signature: hex SHA-256 of the subject followed by the
    /// recipient list.
    ///
    /// The signature does not cover the message body, so two pending jobs
    /// with the same subject and recipients but different bodies collide.
    pub fn signature(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.subject.as_bytes());
        format!(
            "{} {}",
            hex::encode(hasher.finalize()),
            self.destinations.join(", ")
        )
    }

    /// Deliver the email. A no-op if the job is already complete.
    ///
    /// Makes exactly one delivery attempt: validates the payload, delegates
    /// to the mailer adapter's raw send, and interprets the provider
    /// response. On success the body is scrubbed and the job becomes
    /// complete; every failure is surfaced to the caller, which owns any
    /// retry decision.
    pub async fn process(&mut self, ctx: &JobContext) -> Result<(), JobError> {
        if self.is_complete {
            return Ok(());
        }
        self.current_step += 1;

        let mut corrupt = false;
        if self.destinations.is_empty() {
            self.add_message("destinations should not be empty");
            corrupt = true;
        }
        if self.raw_message_text.is_empty() {
            self.add_message("raw message text should not be empty");
            corrupt = true;
        }
        if corrupt {
            return Err(JobError::Corrupt(
                "missing destinations or raw message text".to_owned(),
            ));
        }

        let response = ctx
            .mailer
            .send_raw(&self.destinations, self.raw_message_text.as_bytes())
            .await?;

        let serialized = serialize_response(&response);
        self.add_message(format!("provider response: {serialized}"));

        if response.is_success() {
            self.raw_message_text = SCRUBBED_BODY_PLACEHOLDER.to_owned();
            self.is_complete = true;
            info!(title = %self.title(), "queued send job complete");
            return Ok(());
        }

        self.add_message("failed to send email");
        if response.is_empty() {
            return Err(JobError::NoResponse);
        }
        Err(JobError::Delivery {
            response: serialized,
        })
    }
}

#[async_trait]
impl RunnableJob for QueuedSendJob {
    fn title(&self) -> String {
        QueuedSendJob::title(self)
    }

    fn signature(&self) -> String {
        QueuedSendJob::signature(self)
    }

    fn is_complete(&self) -> bool {
        QueuedSendJob::is_complete(self)
    }

    async fn process(&mut self, ctx: &JobContext) -> Result<(), JobError> {
        QueuedSendJob::process(self, ctx).await
    }
}

fn serialize_response(response: &courier_core::SendResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| format!("{response:?}"))
}
