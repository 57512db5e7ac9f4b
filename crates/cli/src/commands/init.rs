// `cadence init` — write a config file with the defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::info;

use cadence_engine::config::{default_config_path, ConfigError, ConfigFile};

use super::ConfigArgs;
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct InitArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Overwrite an existing config file.
    #[arg(long)]
    force: bool,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitResult {
    pub config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_path: Option<String>,
    pub overwritten: bool,
}

pub fn run(args: InitArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);

    match execute(&args) {
        Ok(result) => {
            output::print_output(format, &result, format_human)?;
            Ok(())
        }
        Err(error) => {
            output::print_anyhow_error(format, &error);
            Err(error)
        }
    }
}

fn execute(args: &InitArgs) -> anyhow::Result<InitResult> {
    let path = match &args.config.config {
        Some(path) => path.clone(),
        None => default_config_path().context("could not determine the home directory")?,
    };
    write_config(&path, args.config.repo.clone(), args.force)
}

fn write_config(path: &Path, repo_path: Option<PathBuf>, force: bool) -> anyhow::Result<InitResult> {
    let existed = path.exists();
    if existed && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()).into());
    }

    let file = ConfigFile { repo_path, ..ConfigFile::default() };
    file.save_to(path)?;
    info!(path = %path.display(), overwritten = existed, "wrote config file");

    Ok(InitResult {
        config_path: path.display().to_string(),
        repo_path: file.repo_path.map(|repo| repo.display().to_string()),
        overwritten: existed,
    })
}

fn format_human(result: &InitResult) -> String {
    let mut lines = vec![format!("Wrote config to {}", result.config_path)];
    match &result.repo_path {
        Some(repo) => lines.push(format!("  repo_path: {repo}")),
        None => lines.push("  repo_path is unset; edit the file or pass --repo to `cadence run`".into()),
    }
    lines.join("\n")
}
