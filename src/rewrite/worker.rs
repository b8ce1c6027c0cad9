use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use super::{RewriteError, Rewriter};

struct Job {
    rx: Receiver<Result<String, RewriteError>>,
    deadline: Instant,
}

/// Runs rewrites on a background thread, one at a time.
///
/// The UI thread calls [`poll`](Self::poll) every tick. A job that
/// outlives its deadline is abandoned; its thread finishes on its own
/// and the result is dropped.
pub struct RewriteWorker {
    rewriter: Arc<dyn Rewriter>,
    timeout: Duration,
    job: Option<Job>,
}

impl RewriteWorker {
    pub fn new(rewriter: Arc<dyn Rewriter>, timeout: Duration) -> Self {
        Self {
            rewriter,
            timeout,
            job: None,
        }
    }

    pub const fn is_busy(&self) -> bool {
        self.job.is_some()
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Start rewriting `text`. Fails with [`RewriteError::Busy`] while a
    /// previous job is still outstanding.
    pub fn start(&mut self, text: String) -> Result<(), RewriteError> {
        if self.job.is_some() {
            return Err(RewriteError::Busy);
        }
        let (tx, rx) = mpsc::channel();
        let rewriter = Arc::clone(&self.rewriter);
        thread::Builder::new()
            .name("rewrite".into())
            .spawn(move || {
                // receiver may be gone after a timeout
                let _ = tx.send(rewriter.improve(&text));
            })
            .map_err(|e| RewriteError::Request(format!("could not start worker: {e}")))?;

        tracing::debug!(timeout_secs = self.timeout.as_secs(), "rewrite job started");
        self.job = Some(Job {
            rx,
            deadline: Instant::now() + self.timeout,
        });
        Ok(())
    }

    /// Returns the job outcome once it is available.
    pub fn poll(&mut self) -> Option<Result<String, RewriteError>> {
        self.poll_at(Instant::now())
    }

    fn poll_at(&mut self, now: Instant) -> Option<Result<String, RewriteError>> {
        let job = self.job.as_ref()?;
        let outcome = match job.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Disconnected) => Err(RewriteError::WorkerLost),
            Err(TryRecvError::Empty) if now >= job.deadline => {
                tracing::warn!("rewrite job timed out");
                Err(RewriteError::TimedOut(self.timeout.as_secs()))
            }
            Err(TryRecvError::Empty) => return None,
        };
        self.job = None;
        Some(outcome)
    }

    /// Block until the current job resolves. Used by batch mode.
    pub fn wait(&mut self) -> Option<Result<String, RewriteError>> {
        loop {
            let job = self.job.as_ref()?;
            let remaining = job.deadline.saturating_duration_since(Instant::now());
            let outcome = match job.rx.recv_timeout(remaining) {
                Ok(result) => result,
                Err(mpsc::RecvTimeoutError::Disconnected) => Err(RewriteError::WorkerLost),
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if Instant::now() < job.deadline {
                        continue;
                    }
                    Err(RewriteError::TimedOut(self.timeout.as_secs()))
                }
            };
            self.job = None;
            return Some(outcome);
        }
    }
}
