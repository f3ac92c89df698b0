use crate::error::{ProbeError, ProbeResult};
use crate::utils::debug_with_context;
use std::future::Future;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// How long the composer waits on a background probe before giving up on it.
pub const DEFAULT_JOIN_TIMEOUT: Duration = Duration::from_millis(1500);

/// A probe running off the render path.
///
/// The composer starts every handle before rendering anything, then joins them
/// in segment order. Joining never fails: a probe error, a panic inside the
/// task, a missed deadline, or the lack of a runtime to spawn on all resolve
/// to `T::default()`.
#[derive(Debug)]
pub struct BackgroundHandle<T> {
    name: &'static str,
    /// `None` when there was no tokio runtime at spawn time.
    task: Option<JoinHandle<ProbeResult<T>>>,
    deadline: Duration,
}

impl<T> BackgroundHandle<T>
where
    T: Default + Send + 'static,
{
    /// Spawn `work` on the current tokio runtime. Outside a runtime `work` is
    /// dropped unpolled and the handle joins to the default.
    pub fn spawn<F>(name: &'static str, deadline: Duration, work: F) -> Self
    where
        F: Future<Output = ProbeResult<T>> + Send + 'static,
    {
        let task = match Handle::try_current() {
            Ok(runtime) => Some(runtime.spawn(work)),
            Err(e) => {
                debug_with_context(name, &format!("not started: {}", e));
                None
            }
        };

        Self { name, task, deadline }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Wait for the probe, keeping the reason it failed.
    pub async fn try_join(self) -> ProbeResult<T> {
        let Some(task) = self.task else {
            return Err(ProbeError::Unexpected(format!(
                "{} probe never started: no tokio runtime",
                self.name
            )));
        };

        let abort = task.abort_handle();
        match tokio::time::timeout(self.deadline, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ProbeError::Unexpected(format!(
                "{} probe task failed: {}",
                self.name, join_error
            ))),
            Err(_) => {
                abort.abort();
                Err(ProbeError::Unexpected(format!(
                    "{} probe abandoned after {}ms",
                    self.name,
                    self.deadline.as_millis()
                )))
            }
        }
    }

    pub async fn join(self) -> T {
        let name = self.name;
        match self.try_join().await {
            Ok(value) => value,
            Err(e) => {
                debug_with_context(name, &format!("using empty reading: {}", e));
                T::default()
            }
        }
    }
}
