pub mod error;
pub mod job;
pub mod mailer;
pub mod queue;

pub use error::{JobError, MailerError, QueueError};
pub use job::{JobContext, QueuedSendJob, RunnableJob, SCRUBBED_BODY_PLACEHOLDER};
pub use mailer::{DeliveryOutcome, Mailer};
pub use queue::JobQueue;
