use anyhow::Result;

use git_fetch_negotiate::{Remote, Repository, Transport};

/// Handle the negotiate command
/// Run the want/have exchange; the transport writes the transcript
pub fn handle<R: Repository, T: Transport>(remote: &mut Remote<R, T>) -> Result<()> {
    remote.negotiate()?;

    if remote.refs().is_empty() {
        eprintln!("Already up to date with {}", remote.name());
    }
    Ok(())
}
