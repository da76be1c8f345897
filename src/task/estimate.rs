//! Progress bar that shows an approximate time to completion
//!
//! Used instead of a spinner when the caller has a rough idea of how long an
//! operation takes. The bar never reaches the end on its own; it is completed
//! when the wrapped future settles.

use std::future::Future;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::time::{Instant, interval};

use crate::task::indicator::TaskColor;

/// Redraw interval of the estimate bar
const REFRESH_INTERVAL: Duration = Duration::from_millis(200);

/// Share of the bar the estimate may fill before the operation finishes
const MAX_RUNNING_RATIO: f64 = 0.99;

/// Reports progress of one operation against an expected duration
#[derive(Debug, Clone)]
pub struct EstimateReporter {
    estimate: Duration,
    color: TaskColor,
    hidden: bool,
}

impl EstimateReporter {
    pub fn new(estimate: Duration) -> Self {
        Self {
            estimate,
            color: TaskColor::default(),
            hidden: false,
        }
    }

    pub fn color(mut self, color: TaskColor) -> Self {
        self.color = color;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Drives `operation` to completion while updating the bar.
    ///
    /// The operation's result is returned unchanged; the bar is finished with
    /// `success_text` or `failure_text` accordingly.
    pub async fn run<Fut, T, E>(
        &self,
        text: &str,
        success_text: &str,
        failure_text: &str,
        operation: Fut,
    ) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        let total = u64::try_from(self.estimate.as_millis()).unwrap_or(u64::MAX).max(1);
        let bar = ProgressBar::new(total);
        if self.hidden {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(self.bar_style());
        bar.set_message(estimate_message(text, self.estimate, Duration::ZERO));

        let started = Instant::now();
        let mut ticker = interval(REFRESH_INTERVAL);
        tokio::pin!(operation);

        let result = loop {
            tokio::select! {
                result = &mut operation => break result,
                _ = ticker.tick() => {
                    let elapsed = started.elapsed();
                    bar.set_position(running_position(self.estimate, elapsed));
                    bar.set_message(estimate_message(text, self.estimate, elapsed));
                }
            }
        };

        match &result {
            Ok(_) => {
                bar.set_position(total);
                bar.finish_with_message(format!("{} {}", style("✓").green().bold(), success_text));
            }
            Err(_) => {
                bar.abandon_with_message(format!(
                    "{} {}",
                    style("✗").red().bold(),
                    failure_text
                ));
            }
        }

        result
    }

    fn bar_style(&self) -> ProgressStyle {
        let color = self.color.as_str();
        ProgressStyle::with_template(&format!(
            "{{spinner:.{color}}} [{{bar:30.{color}/blue}}] {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
    }
}

/// Bar position in milliseconds, held just short of the end while running
fn running_position(estimate: Duration, elapsed: Duration) -> u64 {
    let cap = estimate.mul_f64(MAX_RUNNING_RATIO);
    u64::try_from(elapsed.min(cap).as_millis()).unwrap_or(u64::MAX)
}

/// Time left according to the estimate, rounded up to whole seconds
pub fn remaining_estimate(estimate: Duration, elapsed: Duration) -> Duration {
    let remaining = estimate.saturating_sub(elapsed);
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    Duration::from_secs(secs)
}

fn estimate_message(text: &str, estimate: Duration, elapsed: Duration) -> String {
    let remaining = remaining_estimate(estimate, elapsed);
    if remaining.is_zero() {
        format!("{} (almost done)", text)
    } else {
        format!("{} (about {}s left)", text, remaining.as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10_000, 0, 10)]
    #[case(10_000, 2_500, 8)] // rounds up
    #[case(10_000, 9_999, 1)]
    #[case(10_000, 10_000, 0)]
    #[case(10_000, 60_000, 0)] // overrun saturates
    fn remaining_estimate_rounds_up_to_seconds(
        #[case] estimate_ms: u64,
        #[case] elapsed_ms: u64,
        #[case] expected_secs: u64,
    ) {
        assert_eq!(
            remaining_estimate(
                Duration::from_millis(estimate_ms),
                Duration::from_millis(elapsed_ms)
            ),
            Duration::from_secs(expected_secs)
        );
    }

    #[test]
    fn estimate_message_switches_to_almost_done_after_estimate() {
        let estimate = Duration::from_secs(5);

        assert_eq!(
            estimate_message("Cloning", estimate, Duration::from_secs(1)),
            "Cloning (about 4s left)"
        );
        assert_eq!(
            estimate_message("Cloning", estimate, Duration::from_secs(7)),
            "Cloning (almost done)"
        );
    }

    #[test]
    fn running_position_never_reaches_the_end() {
        let estimate = Duration::from_millis(1_000);

        assert_eq!(running_position(estimate, Duration::from_millis(300)), 300);
        assert_eq!(running_position(estimate, Duration::from_millis(5_000)), 990);
    }

    #[tokio::test(start_paused = true)]
    async fn run_returns_the_operation_result() {
        let reporter = EstimateReporter::new(Duration::from_secs(2)).hidden();

        let ok: Result<u32, String> = reporter
            .run("Cloning", "Cloned", "Failed", async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok(7)
            })
            .await;
        let err: Result<u32, String> = reporter
            .run("Cloning", "Cloned", "Failed", async { Err("boom".to_string()) })
            .await;

        assert_eq!(ok, Ok(7));
        assert_eq!(err, Err("boom".to_string()));
    }
}
