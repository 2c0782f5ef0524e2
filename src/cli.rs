use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use url::Url;

use crate::archive::{ArchiveReport, TraceArchiver};
use crate::auth::Token;
use crate::config::Config;
use crate::error::AuditorError;
use crate::output;
use crate::providers::gitlab::GitLabClient;
use crate::scan::{ScanMode, ScanOutcome, Scanner};

const TOKEN_PREFIX: &str = "glpat-";
const TOKEN_LENGTH: usize = 26;

#[derive(Parser)]
#[command(name = "gitlab-auditor")]
#[command(author, version, about = "Bulk GitLab CI job log retrieval for security review")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitLab personal access token (read access only)
    #[arg(short = 't', long, env = "GITLAB_TOKEN", global = true, hide_env_values = true)]
    gitlab_token: Option<String>,

    /// URL of the GitLab instance to scan
    #[arg(short = 'u', long, env = "GITLAB_URL", global = true)]
    instance_url: Option<String>,

    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory receiving one sub-directory per project
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Maximum concurrent trace downloads per project
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    /// Remove previous results before scanning
    #[arg(long, global = true, default_value_t = false)]
    clean: bool,

    /// Write a JSON report of the run to this file
    #[arg(short, long, global = true)]
    report: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan every group and project visible to the token
    Full,
    /// Scan the projects of the given groups
    Groups {
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        ids: Vec<u64>,
    },
    /// Scan the given projects directly
    Projects {
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        ids: Vec<u64>,
    },
}

/// Validated settings for one run.
#[derive(Debug)]
struct RunSettings {
    token: Token,
    instance_url: String,
    mode: ScanMode,
    output_dir: PathBuf,
    concurrency: usize,
    clean: bool,
}

/// Checks the personal access token format.
pub fn validate_token(raw: &str) -> crate::error::Result<Token> {
    if !raw.starts_with(TOKEN_PREFIX) {
        return Err(AuditorError::Validation(format!(
            "Token must start with '{TOKEN_PREFIX}'"
        )));
    }
    if raw.chars().count() != TOKEN_LENGTH {
        return Err(AuditorError::Validation(format!(
            "Token must be {TOKEN_LENGTH} characters long"
        )));
    }
    Ok(Token::from(raw))
}

/// Checks the instance URL and strips any trailing slash.
pub fn normalize_instance_url(raw: &str) -> crate::error::Result<String> {
    let url = Url::parse(raw)
        .map_err(|e| AuditorError::Validation(format!("Invalid URL provided: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AuditorError::Validation(
            "URL must use HTTP or HTTPS scheme".to_string(),
        ));
    }
    if url.host_str().is_none() {
        return Err(AuditorError::Validation("URL has no host".to_string()));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

impl Cli {
    fn mode(&self) -> ScanMode {
        match &self.command {
            Commands::Full => ScanMode::Full,
            Commands::Groups { ids } => ScanMode::Groups(ids.clone()),
            Commands::Projects { ids } => ScanMode::Projects(ids.clone()),
        }
    }

    fn settings(&self, config: Config) -> Result<RunSettings> {
        let token = self
            .gitlab_token
            .clone()
            .or(config.gitlab.token)
            .context("A GitLab token is required (--gitlab-token, GITLAB_TOKEN or config file)")?;
        let instance_url = self
            .instance_url
            .clone()
            .or(config.gitlab.instance_url)
            .context(
                "A GitLab instance URL is required (--instance-url, GITLAB_URL or config file)",
            )?;

        let concurrency = self.concurrency.unwrap_or(config.scan.concurrency);
        if concurrency == 0 {
            return Err(
                AuditorError::Validation("Concurrency must be at least 1".to_string()).into(),
            );
        }

        Ok(RunSettings {
            token: validate_token(&token)?,
            instance_url: normalize_instance_url(&instance_url)?,
            mode: self.mode(),
            output_dir: self.output_dir.clone().unwrap_or(config.scan.output_dir),
            concurrency,
            clean: self.clean || config.scan.clean,
        })
    }

    pub async fn execute(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let settings = self.settings(config)?;

        output::print_configuration(
            &settings.instance_url,
            &settings.token,
            settings.mode.name(),
            &settings.output_dir.display().to_string(),
        );

        let client = GitLabClient::new(&settings.instance_url, settings.token)?;
        let archiver = TraceArchiver::new(settings.output_dir, settings.concurrency);
        if settings.clean {
            archiver.clean().await?;
        }

        let scanner = Scanner::new(client, archiver);
        match scanner.run(&settings.mode).await.context("Scan failed")? {
            ScanOutcome::NothingFound(what) => {
                eprintln!("{}", output::warning(format!("No {what} found")));
            }
            ScanOutcome::Completed(report) => {
                output::print_summary(&report);
                if let Some(path) = &self.report {
                    write_report(&report, path)?;
                    info!("Report written to: {}", path.display());
                }
            }
        }

        Ok(())
    }
}

fn write_report(report: &ArchiveReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}
