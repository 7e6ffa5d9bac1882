use std::sync::{Arc, Mutex};

use courier_core::{DynRawTransport, OutboundEmail, SendResponse, TransportError};
use lettre::Message;
use lettre::message::{Mailbox, SinglePart};
use tracing::{debug, info, warn};

use crate::error::MailerError;
use crate::job::QueuedSendJob;
use crate::queue::JobQueue;

/// Result of handing an email to the mailer adapter.
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// The message was sent directly and the provider responded.
    Sent(SendResponse),
    /// The message was wrapped in a [`QueuedSendJob`] and enqueued for
    /// deferred delivery.
    Queued,
}

/// Mailer adapter over a raw email transport.
///
/// Renders composed emails into raw MIME messages and dispatches them
/// through the transport's raw-send operation. One known transient failure
/// mode of the underlying connection (a low-level connection reset) is
/// retried exactly once; the retry is bounded to one attempt so persistent
/// failures are not masked and worst-case latency stays predictable. Any
/// other error propagates unchanged.
///
/// When a [`JobQueue`] is attached, `send` defers delivery through a
/// [`QueuedSendJob`] instead of calling the provider inline.
pub struct Mailer {
    transport: Arc<dyn DynRawTransport>,
    queue: Option<Arc<dyn JobQueue>>,
    use_queued_jobs: bool,
    last_response: Mutex<Option<SendResponse>>,
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailer")
            .field("transport", &self.transport.name())
            .field("queued", &self.queue.is_some())
            .field("use_queued_jobs", &self.use_queued_jobs)
            .finish()
    }
}

impl Mailer {
    /// Create a new mailer over the given transport, with no queue attached.
    pub fn new(transport: Arc<dyn DynRawTransport>) -> Self {
        Self {
            transport,
            queue: None,
            use_queued_jobs: true,
            last_response: Mutex::new(None),
        }
    }

    /// Attach a job queue; subsequent `send` calls enqueue instead of
    /// sending inline (unless disabled via [`set_use_queued_jobs`](Self::set_use_queued_jobs)).
    #[must_use]
    pub fn with_queue(mut self, queue: Arc<dyn JobQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Toggle the queued-delivery path. Has no effect if no queue is
    /// attached.
    pub fn set_use_queued_jobs(&mut self, enabled: bool) {
        self.use_queued_jobs = enabled;
    }

    /// The most recent provider response from a successful raw send, kept
    /// for diagnostics.
    pub fn last_response(&self) -> Option<SendResponse> {
        lock_unpoisoned(&self.last_response).clone()
    }

    /// Send a raw message to the given destinations through the transport.
    ///
    /// If the call fails with the known transient connection-reset
    /// signature, it is retried exactly once and whatever the second attempt
    /// produces is returned, success or failure. Every other error is
    /// propagated immediately without retry.
    pub async fn send_raw(
        &self,
        destinations: &[String],
        raw_message: &[u8],
    ) -> Result<SendResponse, TransportError> {
        let response = match self.transport.send_raw(destinations, raw_message).await {
            Ok(response) => response,
            Err(err) if err.is_connection_reset() => {
                warn!(error = %err, "transient connection reset, retrying send once");
                self.transport.send_raw(destinations, raw_message).await?
            }
            Err(err) => return Err(err),
        };

        *lock_unpoisoned(&self.last_response) = Some(response.clone());
        Ok(response)
    }

    /// Render the email into a raw MIME message and deliver it.
    ///
    /// Takes the queued path when a queue is attached and queued delivery is
    /// enabled; otherwise sends directly via [`send_raw`](Self::send_raw).
    pub async fn send(&self, email: &OutboundEmail) -> Result<DeliveryOutcome, MailerError> {
        let raw_message = compose_raw_message(email)?;
        let recipient = email
            .first_recipient()
            .ok_or_else(|| MailerError::Compose("recipient list is empty".to_owned()))?;
        let destinations = vec![recipient.to_owned()];

        if let Some(queue) = &self.queue {
            if self.use_queued_jobs {
                let job = QueuedSendJob::new(
                    destinations,
                    email.subject.clone(),
                    String::from_utf8_lossy(&raw_message).into_owned(),
                );
                debug!(title = %job.title(), "enqueueing send job");
                queue.enqueue(job).await?;
                return Ok(DeliveryOutcome::Queued);
            }
        }

        let response = self.send_raw(&destinations, &raw_message).await?;
        info!(to = %recipient, subject = %email.subject, "email sent");
        Ok(DeliveryOutcome::Sent(response))
    }
}

/// Lock a mutex, recovering the guard if a previous holder panicked.
fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Render the email into a fully formed MIME message, headers included.
///
/// Only the first recipient is addressed; additional `to` entries are
/// silently ignored. The body is sent as a single HTML part.
fn compose_raw_message(email: &OutboundEmail) -> Result<Vec<u8>, MailerError> {
    let from: Mailbox = email
        .from
        .parse()
        .map_err(|e| MailerError::Compose(format!("invalid sender address: {e}")))?;
    let recipient = email
        .first_recipient()
        .ok_or_else(|| MailerError::Compose("recipient list is empty".to_owned()))?;
    let to: Mailbox = recipient
        .parse()
        .map_err(|e| MailerError::Compose(format!("invalid recipient address: {e}")))?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.clone())
        .singlepart(SinglePart::html(email.html_body.clone()))
        .map_err(|e| MailerError::Compose(format!("failed to build message: {e}")))?;

    Ok(message.formatted())
}
