use anyhow::Result;
use std::io::Write;

use git_fetch_negotiate::{Remote, Repository, Transport};

/// Handle the wants command
/// Print the refs we would ask the remote for, without negotiating
pub fn handle<R: Repository, T: Transport, W: Write>(
    remote: &mut Remote<R, T>,
    output: &mut W,
    json: bool,
) -> Result<()> {
    let wants = remote.compute_wants()?;

    if json {
        serde_json::to_writer_pretty(&mut *output, &wants)?;
        writeln!(output)?;
        return Ok(());
    }

    for head in &wants {
        match &head.local_oid {
            Some(local) => writeln!(output, "{} {} (have {})", head.remote_oid, head.name, local)?,
            None => writeln!(output, "{} {} (new)", head.remote_oid, head.name)?,
        }
    }

    Ok(())
}
