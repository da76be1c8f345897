//! Progress indicators shown while a task runs

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Spinner tick interval
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Color of the spinner glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskColor {
    #[default]
    Cyan,
    Blue,
    Green,
    Yellow,
    Magenta,
    Red,
    White,
}

impl TaskColor {
    /// Returns the color name understood by indicatif templates
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskColor::Cyan => "cyan",
            TaskColor::Blue => "blue",
            TaskColor::Green => "green",
            TaskColor::Yellow => "yellow",
            TaskColor::Magenta => "magenta",
            TaskColor::Red => "red",
            TaskColor::White => "white",
        }
    }
}

/// Visual feedback for one running task.
///
/// An indicator belongs to exactly one task run. `start` may be called again
/// after `fail` when the task is retried.
pub trait ProgressIndicator: Send {
    fn start(&mut self, text: &str, color: TaskColor);
    fn succeed(&mut self, text: &str);
    fn fail(&mut self, text: &str);
}

/// Terminal spinner backed by indicatif
#[derive(Debug, Default)]
pub struct SpinnerIndicator {
    bar: Option<ProgressBar>,
    hidden: bool,
}

impl SpinnerIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A spinner that never draws, for `--quiet` runs
    pub fn hidden() -> Self {
        Self {
            bar: None,
            hidden: true,
        }
    }

    fn finish(&mut self, symbol: String, text: &str) {
        if let Some(bar) = self.bar.take() {
            bar.set_style(plain_style());
            bar.finish_with_message(format!("{} {}", symbol, text));
        }
    }
}

impl ProgressIndicator for SpinnerIndicator {
    fn start(&mut self, text: &str, color: TaskColor) {
        let bar = ProgressBar::new_spinner();
        if self.hidden {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(spinner_style(color));
        bar.set_message(text.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);
        self.bar = Some(bar);
    }

    fn succeed(&mut self, text: &str) {
        self.finish(style("✓").green().bold().to_string(), text);
    }

    fn fail(&mut self, text: &str) {
        self.finish(style("✗").red().bold().to_string(), text);
    }
}

fn spinner_template(color: TaskColor) -> String {
    format!("{{spinner:.{}}} {{msg}}", color.as_str())
}

fn spinner_style(color: TaskColor) -> ProgressStyle {
    ProgressStyle::with_template(&spinner_template(color))
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}

fn plain_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Indicator that records every call, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingIndicator {
    pub events: Vec<IndicatorEvent>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum IndicatorEvent {
    Start(String, TaskColor),
    Succeed(String),
    Fail(String),
}

#[cfg(test)]
impl ProgressIndicator for RecordingIndicator {
    fn start(&mut self, text: &str, color: TaskColor) {
        self.events
            .push(IndicatorEvent::Start(text.to_string(), color));
    }

    fn succeed(&mut self, text: &str) {
        self.events.push(IndicatorEvent::Succeed(text.to_string()));
    }

    fn fail(&mut self, text: &str) {
        self.events.push(IndicatorEvent::Fail(text.to_string()));
    }
}
