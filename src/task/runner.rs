//! Retrying task runner
//!
//! Runs a fallible async callback behind a progress indicator and retries it
//! with a fixed delay until it succeeds or the retry budget is spent. The
//! budget lives in the call itself, so concurrent runs never share it.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::RetryConfig;
use crate::task::indicator::{ProgressIndicator, SpinnerIndicator, TaskColor};

/// How often and how patiently a task is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    /// Retries after the first failure; total attempts are `max_retries + 1`
    pub max_retries: u32,
    /// Fixed delay between attempts
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_retries, config.retry_delay())
    }
}

/// Description of one task run
pub struct TaskSpec<F> {
    pub display_text: String,
    pub success_text: String,
    pub failure_text: String,
    pub policy: RetryPolicy,
    pub color: TaskColor,
    callback: F,
}

impl<F> TaskSpec<F> {
    /// Creates a spec that runs `callback` once, labelled `display_text`
    pub fn new(display_text: impl Into<String>, callback: F) -> Self {
        let display_text = display_text.into();
        Self {
            success_text: display_text.clone(),
            failure_text: display_text.clone(),
            display_text,
            policy: RetryPolicy::default(),
            color: TaskColor::default(),
            callback,
        }
    }

    pub fn success_text(mut self, text: impl Into<String>) -> Self {
        self.success_text = text.into();
        self
    }

    pub fn failure_text(mut self, text: impl Into<String>) -> Self {
        self.failure_text = text.into();
        self
    }

    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn color(mut self, color: TaskColor) -> Self {
        self.color = color;
        self
    }
}

/// Terminal state of a task run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome<T> {
    Succeeded { value: T, attempts: u32 },
    /// Every attempt failed; `reason` is the last error
    Failed { attempts: u32, reason: String },
}

impl<T> TaskOutcome<T> {
    /// The value of a successful run, `None` if the task ultimately failed
    pub fn ok(self) -> Option<T> {
        match self {
            TaskOutcome::Succeeded { value, .. } => Some(value),
            TaskOutcome::Failed { .. } => None,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            TaskOutcome::Succeeded { attempts, .. } | TaskOutcome::Failed { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Succeeded { .. })
    }
}

/// Runs `spec` behind a terminal spinner.
pub async fn run_task<F, Fut, T, E>(spec: TaskSpec<F>) -> TaskOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut indicator = SpinnerIndicator::new();
    run_task_with(spec, &mut indicator).await
}

/// Runs `spec`, reporting progress through `indicator`.
///
/// Attempts are strictly sequential: the next one starts only after the
/// previous callback has settled and the retry delay has elapsed. The callback
/// is never interrupted, and no error escapes; the caller inspects the
/// returned [`TaskOutcome`].
pub async fn run_task_with<F, Fut, T, E, I>(
    mut spec: TaskSpec<F>,
    indicator: &mut I,
) -> TaskOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    I: ProgressIndicator + ?Sized,
{
    let max_retries = spec.policy.max_retries;
    let mut attempts: u32 = 0;

    loop {
        indicator.start(&spec.display_text, spec.color);
        attempts += 1;

        match (spec.callback)().await {
            Ok(value) => {
                debug!(
                    "{} succeeded after {} attempt(s)",
                    spec.display_text, attempts
                );
                indicator.succeed(&spec.success_text);
                return TaskOutcome::Succeeded { value, attempts };
            }
            Err(e) => {
                warn!(
                    "{} failed (attempt {}/{}): {}",
                    spec.display_text,
                    attempts,
                    max_retries.saturating_add(1),
                    e
                );

                if attempts > max_retries {
                    indicator.fail(&spec.failure_text);
                    return TaskOutcome::Failed {
                        attempts,
                        reason: e.to_string(),
                    };
                }

                indicator.fail(&format!(
                    "{} failed, retrying ({}/{})...",
                    spec.display_text, attempts, max_retries
                ));
                sleep(spec.policy.retry_delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::indicator::{IndicatorEvent, RecordingIndicator};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    /// Callback that fails its first `failures` calls, then returns the call count
    fn flaky(
        calls: Arc<AtomicU32>,
        failures: u32,
    ) -> impl FnMut() -> std::future::Ready<Result<u32, String>> {
        move || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= failures {
                std::future::ready(Err(format!("attempt {} failed", call)))
            } else {
                std::future::ready(Ok(call))
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn always_failing_callback_runs_max_retries_plus_one_times() {
        let calls = Arc::new(AtomicU32::new(0));
        let spec = TaskSpec::new("Cloning", flaky(calls.clone(), u32::MAX))
            .failure_text("Clone failed")
            .retry(RetryPolicy::new(2, Duration::from_millis(50)));
        let mut indicator = RecordingIndicator::default();

        let outcome = run_task_with(spec, &mut indicator).await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            outcome,
            TaskOutcome::Failed {
                attempts: 3,
                reason: "attempt 3 failed".to_string(),
            }
        );
        assert_eq!(outcome.ok(), None);
        assert_eq!(
            indicator.events.last(),
            Some(&IndicatorEvent::Fail("Clone failed".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn callback_failing_once_succeeds_on_second_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let spec = TaskSpec::new("Cloning", flaky(calls.clone(), 1))
            .success_text("Cloned")
            .retry(RetryPolicy::new(1, Duration::from_millis(50)));
        let mut indicator = RecordingIndicator::default();

        let outcome = run_task_with(spec, &mut indicator).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(outcome.attempts(), 2);
        assert_eq!(outcome.ok(), Some(2));
        assert_eq!(
            indicator.events,
            vec![
                IndicatorEvent::Start("Cloning".to_string(), TaskColor::Cyan),
                IndicatorEvent::Fail("Cloning failed, retrying (1/1)...".to_string()),
                IndicatorEvent::Start("Cloning".to_string(), TaskColor::Cyan),
                IndicatorEvent::Succeed("Cloned".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn zero_retries_means_a_single_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let spec = TaskSpec::new("Cloning", flaky(calls.clone(), 1));
        let mut indicator = RecordingIndicator::default();

        let outcome = run_task_with(spec, &mut indicator).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!outcome.is_success());
        assert_eq!(outcome.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_wait_for_the_fixed_delay_between_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let spec = TaskSpec::new("Cloning", flaky(calls.clone(), 2))
            .retry(RetryPolicy::new(3, Duration::from_millis(200)));
        let mut indicator = RecordingIndicator::default();
        let started = Instant::now();

        let outcome = run_task_with(spec, &mut indicator).await;

        assert_eq!(outcome.ok(), Some(3));
        assert!(started.elapsed() >= Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_runs_keep_independent_retry_budgets() {
        let first_calls = Arc::new(AtomicU32::new(0));
        let second_calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(1, Duration::from_millis(10));
        let first = TaskSpec::new("first", flaky(first_calls.clone(), u32::MAX)).retry(policy);
        let second = TaskSpec::new("second", flaky(second_calls.clone(), u32::MAX)).retry(policy);
        let mut first_indicator = RecordingIndicator::default();
        let mut second_indicator = RecordingIndicator::default();

        let (first_outcome, second_outcome) = tokio::join!(
            run_task_with(first, &mut first_indicator),
            run_task_with(second, &mut second_indicator),
        );

        assert_eq!(first_calls.load(Ordering::SeqCst), 2);
        assert_eq!(second_calls.load(Ordering::SeqCst), 2);
        assert_eq!(first_outcome.attempts(), 2);
        assert_eq!(second_outcome.attempts(), 2);
        assert!(
            first_indicator
                .events
                .iter()
                .all(|event| !matches!(event, IndicatorEvent::Start(text, _) if text == "second"))
        );
    }

    #[tokio::test]
    async fn async_callback_is_awaited() {
        let spec = TaskSpec::new("Sleeping", || async {
            tokio::task::yield_now().await;
            Ok::<_, String>("done")
        })
        .color(TaskColor::Green);
        let mut indicator = RecordingIndicator::default();

        let outcome = run_task_with(spec, &mut indicator).await;

        assert_eq!(outcome.ok(), Some("done"));
        assert_eq!(
            indicator.events.first(),
            Some(&IndicatorEvent::Start(
                "Sleeping".to_string(),
                TaskColor::Green
            ))
        );
    }

    #[test]
    fn retry_policy_from_config() {
        let config = RetryConfig {
            max_retries: 4,
            retry_delay: 1500,
        };

        assert_eq!(
            RetryPolicy::from(&config),
            RetryPolicy::new(4, Duration::from_millis(1500))
        );
    }
}
