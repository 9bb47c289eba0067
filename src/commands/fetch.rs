use anyhow::Result;
use std::io::Write;

use git_fetch_negotiate::{Remote, Repository, Transport};

/// Handle the fetch command - negotiate, then download the pack
pub fn handle<R: Repository, T: Transport, W: Write>(
    remote: &mut Remote<R, T>,
    output: &mut W,
) -> Result<()> {
    remote.negotiate()?;

    if remote.refs().is_empty() {
        eprintln!("Already up to date with {}", remote.name());
        return Ok(());
    }

    tracing::debug!("Storing pack under {:?}", remote.repo().git_dir());
    let pack = remote.download_pack()?;
    writeln!(output, "pack {} {}", pack.checksum, pack.path.display())?;

    Ok(())
}
