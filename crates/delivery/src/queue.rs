use async_trait::async_trait;

use crate::error::QueueError;
use crate::job::QueuedSendJob;

/// Contract of the external job framework's enqueue operation.
///
/// The framework owns persistence, scheduling, and job-level retry policy;
/// this crate only hands jobs over. Object-safe so the mailer can hold an
/// `Arc<dyn JobQueue>` supplied by the host application.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Persist the job for later execution by a worker.
    async fn enqueue(&self, job: QueuedSendJob) -> Result<(), QueueError>;
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Default)]
    struct RecordingQueue {
        jobs: Mutex<Vec<QueuedSendJob>>,
    }

    #[async_trait]
    impl JobQueue for RecordingQueue {
        async fn enqueue(&self, job: QueuedSendJob) -> Result<(), QueueError> {
            self.jobs.lock().unwrap().push(job);
            Ok(())
        }
    }

    #[tokio::test]
    async fn enqueue_records_job() {
        let queue: Arc<dyn JobQueue> = Arc::new(RecordingQueue::default());
        let job = QueuedSendJob::new(vec!["a@example.com".into()], "Hi", "raw");
        queue.enqueue(job).await.unwrap();
    }
}
