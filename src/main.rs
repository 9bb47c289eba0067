#![deny(clippy::mod_module_files)]
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::NegotiateConfig;
use git_fetch_negotiate::{FileTransport, FilesystemRepository, Remote};

/// Negotiate a fetch with a remote and download the resulting pack
#[derive(Parser)]
#[command(name = "git-fetch-negotiate", version)]
struct Cli {
    /// Config file (defaults to ~/.config/git-fetch-negotiate/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show which refs would be requested from a remote
    Wants {
        remote: String,
        /// Print the want list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Send wants and haves to a remote
    Negotiate { remote: String },
    /// Negotiate, then download the pack
    Fetch { remote: String },
}

type FileRemote = Remote<FilesystemRepository, FileTransport<Box<dyn Write>>>;

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = NegotiateConfig::load(cli.config.as_deref())?;

    let mut stdout = io::stdout();
    match cli.command {
        Command::Wants { remote, json } => {
            // No messages are sent, so the last transcript is left alone
            let mut remote = open_remote(&config, &remote, no_transcript)?;
            commands::wants::handle(&mut remote, &mut stdout, json)?;
        }
        Command::Negotiate { remote } => {
            let mut remote = open_remote(&config, &remote, || open_transcript(&config))?;
            commands::negotiate::handle(&mut remote)?;
        }
        Command::Fetch { remote } => {
            let mut remote = open_remote(&config, &remote, || open_transcript(&config))?;
            commands::fetch::handle(&mut remote, &mut stdout)?;
        }
    }

    stdout.flush()?;
    Ok(())
}

/// The configured transcript file, truncated, or stdout when none is set
fn open_transcript(config: &NegotiateConfig) -> Result<Box<dyn Write>> {
    match &config.transcript {
        Some(path) => Ok(Box::new(
            File::create(path).with_context(|| format!("Failed to create transcript {:?}", path))?,
        )),
        None => Ok(Box::new(io::stdout())),
    }
}

fn no_transcript() -> Result<Box<dyn Write>> {
    Ok(Box::new(io::sink()))
}

/// Wire up the configured local repository with a remote's transport and refspec.
///
/// `transcript` is only opened once the remote and repository check out.
fn open_remote<F>(config: &NegotiateConfig, name: &str, transcript: F) -> Result<FileRemote>
where
    F: FnOnce() -> Result<Box<dyn Write>>,
{
    let remote_config = config.remote(name)?;
    let spec = remote_config.refspec()?;

    let repo = FilesystemRepository::new(&config.repository);
    repo.initialize()
        .with_context(|| format!("Failed to initialize {:?}", config.repository))?;
    tracing::debug!("Using remote {} at {:?}", name, remote_config.url);

    let transport = FileTransport::new(&remote_config.url, transcript()?);
    let mut remote = Remote::new(name, repo, transport);
    if let Some(spec) = spec {
        remote = remote.with_fetch_spec(spec);
    }
    Ok(remote)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::config::RemoteConfig;

    fn setup() -> (TempDir, NegotiateConfig) {
        let dir = TempDir::new().unwrap();
        let transcript = dir.path().join("transcript.txt");
        fs::write(&transcript, "want c1 refs/heads/main\ndone\n").unwrap();

        let mut remotes = BTreeMap::new();
        remotes.insert(
            "origin".to_string(),
            RemoteConfig {
                url: dir.path().join("remote"),
                fetch: Some("+refs/heads/*:refs/remotes/origin/*".to_string()),
            },
        );
        let config = NegotiateConfig {
            repository: dir.path().join("local"),
            transcript: Some(transcript),
            remotes,
        };
        (dir, config)
    }

    fn transcript(dir: &TempDir) -> String {
        fs::read_to_string(dir.path().join("transcript.txt")).unwrap()
    }

    #[test]
    fn test_wants_leaves_transcript_alone() {
        let (dir, config) = setup();

        let remote = open_remote(&config, "origin", no_transcript).unwrap();
        drop(remote);

        assert_eq!(transcript(&dir), "want c1 refs/heads/main\ndone\n");
    }

    #[test]
    fn test_negotiate_truncates_transcript() {
        let (dir, config) = setup();

        let remote = open_remote(&config, "origin", || open_transcript(&config)).unwrap();
        drop(remote);

        assert_eq!(transcript(&dir), "");
    }

    #[test]
    fn test_unknown_remote_leaves_transcript_alone() {
        let (dir, config) = setup();

        assert!(open_remote(&config, "upstream", || open_transcript(&config)).is_err());
        assert_eq!(transcript(&dir), "want c1 refs/heads/main\ndone\n");
    }
}
