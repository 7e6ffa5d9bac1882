use courier_core::TransportError;
use thiserror::Error;

/// Errors raised by a queued send job's `process` step.
#[derive(Debug, Error)]
pub enum JobError {
    /// The job's payload is unusable: missing destinations or message text.
    /// Retrying with the same data can never succeed.
    #[error("corrupt queued send job: {0}")]
    Corrupt(String),

    /// The provider responded but without success indicators. Carries the
    /// serialized response for diagnosis.
    #[error("delivery failed, provider response: {response}")]
    Delivery { response: String },

    /// The provider call produced no usable response at all.
    #[error("blank response from mail transport")]
    NoResponse,

    /// A transport error propagated unchanged from the mailer adapter.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl JobError {
    /// Advisory hint for the external job framework: whether re-running the
    /// whole job could plausibly succeed. Corrupt jobs never can; everything
    /// else depends on provider state and is left to the framework's policy.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Corrupt(_))
    }
}

/// Errors raised by the mailer adapter's composed-email send path.
#[derive(Debug, Error)]
pub enum MailerError {
    /// The email could not be rendered into a raw message.
    #[error("failed to compose message: {0}")]
    Compose(String),

    /// A transport error from the raw send.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The queued-delivery path failed to enqueue the job.
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Errors raised by a job queue backend on enqueue.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The queue backend rejected or failed the enqueue.
    #[error("queue backend error: {0}")]
    Backend(String),
}
