//! Template download driven by the task runner
//!
//! The clone itself is delegated to a [`Cloner`]; this module only chooses
//! the destination and the kind of progress feedback.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use crate::task::{
    EstimateReporter, ProgressIndicator, RetryPolicy, SpinnerIndicator, TaskColor, TaskOutcome,
    TaskSpec, run_task_with,
};
use crate::template::clone::Cloner;
use crate::template::error::CloneError;
use crate::template::project::ProjectName;
use crate::template::source::TemplateRef;

/// Clones templates into new project directories
pub struct TemplateFetcher<C> {
    cloner: C,
    workdir: PathBuf,
    quiet: bool,
}

impl<C: Cloner> TemplateFetcher<C> {
    /// Creates a fetcher that creates projects below `workdir`
    pub fn new(cloner: C, workdir: impl Into<PathBuf>) -> Self {
        Self {
            cloner,
            workdir: workdir.into(),
            quiet: false,
        }
    }

    /// Suppresses all progress drawing
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn destination(&self, project: &ProjectName) -> PathBuf {
        self.workdir.join(project.as_str())
    }

    /// Returns the project directory, or an error if it is already taken.
    ///
    /// An existing directory fails every clone attempt, so callers check this
    /// before spending any retries.
    pub fn check_destination(&self, project: &ProjectName) -> Result<PathBuf, CloneError> {
        let destination = self.destination(project);
        if destination.exists() {
            return Err(CloneError::DestinationExists(destination));
        }
        Ok(destination)
    }

    /// Clones `template` behind a spinner, retrying according to `policy`.
    pub async fn fetch(
        &self,
        project: &ProjectName,
        template: &TemplateRef,
        policy: RetryPolicy,
    ) -> TaskOutcome<PathBuf> {
        let mut indicator = if self.quiet {
            SpinnerIndicator::hidden()
        } else {
            SpinnerIndicator::new()
        };
        self.fetch_with(project, template, policy, &mut indicator)
            .await
    }

    /// Like [`fetch`](Self::fetch), reporting through `indicator`.
    pub async fn fetch_with<I>(
        &self,
        project: &ProjectName,
        template: &TemplateRef,
        policy: RetryPolicy,
        indicator: &mut I,
    ) -> TaskOutcome<PathBuf>
    where
        I: ProgressIndicator + ?Sized,
    {
        let destination = self.destination(project);
        let cloner = &self.cloner;
        let url = template.url.as_str();
        let branch = template.branch.as_str();

        let spec = TaskSpec::new(
            format!("Downloading template {} ({})", url, branch),
            || {
                let destination = destination.clone();
                async move {
                    cloner
                        .clone_repo(&destination, url, branch)
                        .await
                        .map(|()| destination)
                }
            },
        )
        .success_text(format!("Created {}", project))
        .failure_text(format!("Failed to download template {}", url))
        .retry(policy)
        .color(TaskColor::Cyan);

        let outcome = run_task_with(spec, indicator).await;
        if let TaskOutcome::Succeeded { value, attempts } = &outcome {
            info!(
                "Template cloned into {} after {} attempt(s)",
                value.display(),
                attempts
            );
        }
        outcome
    }

    /// Clones `template` once, showing the expected remaining time.
    pub async fn fetch_with_estimate(
        &self,
        project: &ProjectName,
        template: &TemplateRef,
        estimate: Duration,
    ) -> Result<PathBuf, CloneError> {
        let destination = self.destination(project);
        let mut reporter = EstimateReporter::new(estimate).color(TaskColor::Cyan);
        if self.quiet {
            reporter = reporter.hidden();
        }

        reporter
            .run(
                &format!("Downloading template {} ({})", template.url, template.branch),
                &format!("Created {}", project),
                &format!("Failed to download template {}", template.url),
                self.clone_into(&destination, template),
            )
            .await?;

        Ok(destination)
    }

    async fn clone_into(
        &self,
        destination: &Path,
        template: &TemplateRef,
    ) -> Result<(), CloneError> {
        self.cloner
            .clone_repo(destination, &template.url, &template.branch)
            .await
    }
}
