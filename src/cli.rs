use std::env;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum, ValueHint};

use crate::github::{Credentials, FetchError};

mod run_impl;
mod sub_repos;

#[derive(Parser, Debug, Clone)]
#[command(name = "ghmutuals", version, about = "Audit GitHub follow reciprocity", long_about = None)]
pub struct Args {
    /// Subcommand (use without subcommand for the follower/following comparison)
    #[command(subcommand)]
    pub cmd: Option<Subcommand>,

    /// GitHub username to audit (falls back to $GITHUB_USERNAME)
    #[arg(long = "user", short = 'u', value_name = "LOGIN", global = true)]
    pub user: Option<String>,

    /// Personal access token (falls back to $GITHUB_TOKEN, then $GITHUB_PAT)
    #[arg(long = "token", value_name = "TOKEN", global = true)]
    pub token: Option<String>,

    /// Also write the report to this file (console output always happens)
    #[arg(long = "output", short = 'o', value_name = "PATH", value_hint = ValueHint::FilePath, global = true)]
    pub output: Option<PathBuf>,

    /// Export format, only meaningful together with --output
    #[arg(long = "format", value_enum, default_value = "txt", global = true)]
    pub format: OutputFormat,

    /// Show a progress indicator while fetching
    #[arg(long = "progress", action = ArgAction::SetTrue, global = true)]
    pub progress: bool,

    /// Verbose logging
    #[arg(long = "verbose", short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Txt,
    Csv,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Subcommand {
    /// List followed users with few public repositories
    Repos(ReposArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ReposArgs {
    /// Flag followed users with at most this many public repositories
    #[arg(long = "max-repos", value_name = "N", default_value_t = 1)]
    pub max_repos: u32,

    /// Pause between per-user detail requests, in milliseconds
    #[arg(long = "delay-ms", value_name = "MS", default_value_t = 500)]
    pub delay_ms: u64,
}

impl Args {
    /// Resolves credentials once at startup; a hole here is an auth-class
    /// failure reported before any request goes out.
    pub fn credentials(&self) -> Result<Credentials, FetchError> {
        let user = self
            .user
            .clone()
            .or_else(|| env::var("GITHUB_USERNAME").ok())
            .filter(|s| !s.is_empty())
            .ok_or(FetchError::MissingUser)?;
        let token = self
            .token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .or_else(|| env::var("GITHUB_PAT").ok())
            .filter(|s| !s.is_empty())
            .ok_or(FetchError::MissingToken)?;
        Ok(Credentials { user, token })
    }
}

/// Runs the CLI application.
///
/// # Errors
/// Returns an error if command execution fails.
pub fn run() -> Result<()> {
    let args = Args::parse();
    if let Some(cmd) = &args.cmd {
        return match cmd {
            Subcommand::Repos(repos_args) => sub_repos::run_repos(&args, repos_args),
        };
    }
    run_impl::run_with_args(&args)
}
