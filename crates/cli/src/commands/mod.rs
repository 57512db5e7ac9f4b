// CLI subcommand dispatch.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use cadence_engine::config::{ActivityConfig, ConfigFile, ConfigOverrides};

pub mod doctor;
pub mod init;
pub mod run;

#[derive(Subcommand)]
pub enum Command {
    /// Roll for today's activity and, if it hits, append, commit and push
    Run(run::RunArgs),
    /// Check configuration, repository and git without changing anything
    Doctor(doctor::DoctorArgs),
    /// Write a config file with the defaults
    Init(init::InitArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Run(run::RunArgs::default())
    }
}

pub fn run(cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Run(args) => run::run(args),
        Command::Doctor(args) => doctor::run(args),
        Command::Init(args) => init::run(args),
    }
}

/// Options shared by every command that reads configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Config file to read (defaults to ~/.cadence/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Repository to record activity in (overrides `repo_path`).
    #[arg(long, value_name = "PATH")]
    pub repo: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load_file(&self) -> anyhow::Result<ConfigFile> {
        Ok(ConfigFile::load(self.config.as_deref())?)
    }

    /// Load the file layer and apply `overrides`, with `--repo` folded in.
    pub fn resolve(&self, overrides: ConfigOverrides) -> anyhow::Result<ActivityConfig> {
        let file = self.load_file()?;
        let overrides =
            ConfigOverrides { repo_path: self.repo.clone().or(overrides.repo_path), ..overrides };
        Ok(ActivityConfig::resolve(file, overrides)?)
    }
}
