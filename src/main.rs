use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use scaffold::config::{
    self, CURRENT_VERSION, DEFAULT_CLONE_ESTIMATE_MS, PACKAGE_NAME, ScaffoldConfig,
};
use scaffold::{logging, output};
use scaffold::task::{RetryPolicy, TaskOutcome};
use scaffold::template::{
    GitCloner, PackageManager, ProjectName, TemplateFetcher, TemplateRegistry, resolve_template,
};
use scaffold::version::registries::NpmRegistry;
use scaffold::version::staleness::{
    UpdateAdvisory, check_for_update, check_version, print_advisory,
};

#[derive(Parser)]
#[command(name = "scaffold")]
#[command(version, about = "Create new projects from git templates")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors and hide progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new project from a template
    New(NewArgs),
    /// List available templates
    List,
}

#[derive(Args)]
struct NewArgs {
    /// Template name or git URL
    template: String,

    /// Name of the project directory to create
    name: String,

    /// Branch to clone
    #[arg(short, long)]
    branch: Option<String>,

    /// Package manager used in the next-step instructions
    #[arg(long, default_value = "npm")]
    pm: String,

    /// Retries after a failed clone
    #[arg(long)]
    retries: Option<u32>,

    /// Delay between clone attempts in milliseconds
    #[arg(long)]
    retry_delay_ms: Option<u64>,

    /// Show an estimated completion time instead of a spinner (no retries)
    #[arg(long)]
    estimate: bool,

    /// Skip the check for a newer release
    #[arg(long)]
    no_update_check: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose, cli.quiet, &config::data_dir());

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let config = ScaffoldConfig::load(&config_path)?;

    match cli.command {
        Command::New(args) => run_new(args, &config, cli.quiet).await,
        Command::List => run_list(&config).await,
    }
}

async fn run_new(args: NewArgs, config: &ScaffoldConfig, quiet: bool) -> anyhow::Result<()> {
    let pm: PackageManager = args.pm.parse()?;
    let project = ProjectName::parse(&args.name)?;
    let registry = load_templates(config)?;
    let template = resolve_template(
        &registry,
        &args.template,
        args.branch.as_deref(),
        config.default_branch(),
    )?;

    if !quiet {
        output::info(&format!(
            "Using template {} ({})",
            template.url, template.branch
        ));
    }

    let mut policy = RetryPolicy::from(&config.retry);
    if let Some(retries) = args.retries {
        policy.max_retries = retries;
    }
    if let Some(delay) = args.retry_delay_ms {
        policy.retry_delay = Duration::from_millis(delay);
    }

    let workdir = std::env::current_dir().context("Failed to read current directory")?;
    let fetcher = TemplateFetcher::new(GitCloner::new(), workdir).quiet(quiet);
    if let Err(e) = fetcher.check_destination(&project) {
        output::error(&e.to_string());
        bail!("Could not create {}", project);
    }

    let update_check = async {
        if args.no_update_check || !config.update_check.enabled {
            return None;
        }
        latest_release_advisory(config).await
    };

    let fetch = async {
        if args.estimate {
            fetcher
                .fetch_with_estimate(
                    &project,
                    &template,
                    Duration::from_millis(DEFAULT_CLONE_ESTIMATE_MS),
                )
                .await
                .map_err(|e| e.to_string())
        } else {
            match fetcher.fetch(&project, &template, policy).await {
                TaskOutcome::Succeeded { value, .. } => Ok(value),
                TaskOutcome::Failed { reason, .. } => Err(reason),
            }
        }
    };

    let (advisory, fetched) = tokio::join!(update_check, fetch);

    if let Some(advisory) = advisory {
        print_advisory(&advisory);
    }

    let destination = match fetched {
        Ok(destination) => destination,
        Err(reason) => {
            output::error(&reason);
            bail!("Could not create {} from {}", project, template.url);
        }
    };

    output::success(&format!("Project created at {}", destination.display()));
    output::next_steps(&[
        format!("cd {}", project),
        pm.install_command(),
        pm.run_command("dev"),
    ]);

    Ok(())
}

async fn run_list(config: &ScaffoldConfig) -> anyhow::Result<()> {
    if config.update_check.enabled {
        match NpmRegistry::new(config.registry_url()) {
            Ok(registry) => check_version(&registry, PACKAGE_NAME, CURRENT_VERSION).await,
            Err(e) => warn!("Skipping update check: {}", e),
        }
    }

    let registry = load_templates(config)?;
    if registry.is_empty() {
        output::info("No templates configured");
        return Ok(());
    }

    let rows: Vec<(&str, &str)> = registry
        .list()
        .map(|(name, entry)| (name, entry.description.as_deref().unwrap_or(&entry.url)))
        .collect();
    output::templates(&rows);

    Ok(())
}

async fn latest_release_advisory(config: &ScaffoldConfig) -> Option<UpdateAdvisory> {
    let registry = NpmRegistry::new(config.registry_url())
        .inspect_err(|e| warn!("Skipping update check: {}", e))
        .ok()?;
    check_for_update(&registry, PACKAGE_NAME, CURRENT_VERSION).await
}

fn load_templates(config: &ScaffoldConfig) -> anyhow::Result<TemplateRegistry> {
    match &config.templates_path {
        Some(path) => Ok(TemplateRegistry::load(path)?),
        None => Ok(TemplateRegistry::builtin()),
    }
}
