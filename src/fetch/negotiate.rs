use super::{Remote, WantList};
use crate::error::{ErrorContext, Result};
use crate::revwalk::RevWalk;
use crate::storage::Repository;
use crate::transport::Transport;

impl<R: Repository, T: Transport> Remote<R, T> {
    /// Negotiate with the remote so it can compute a minimal pack.
    ///
    /// Wants are sent as one batch before any have. Haves are every commit
    /// reachable from any local ref, in the order the revision walk yields
    /// them, followed by a flush and a done. When nothing is wanted no message
    /// is sent at all.
    ///
    /// On success the want list is available through [`Remote::refs`].
    pub fn negotiate(&mut self) -> Result<()> {
        self.refs = WantList::default();

        let wants = self
            .compute_wants()
            .context("failed to filter the reference list for wants")?;

        if wants.is_empty() {
            tracing::info!("Nothing to fetch from {}", self.name);
            return Ok(());
        }

        self.transport
            .send_wants(&wants)
            .context("failed to send wants")?;

        let mut walk = seed_walk(&self.repo)?;
        let haves = send_haves(walk.as_mut(), &mut self.transport)?;

        self.transport.send_flush().context("failed to send flush")?;
        self.transport.send_done().context("failed to send done")?;

        tracing::info!(
            "Negotiated with {}: {} want(s), {} have(s)",
            self.name,
            wants.len(),
            haves
        );
        self.refs = wants;
        Ok(())
    }
}

/// Start a revision walk from every local ref, not only the ones we want.
fn seed_walk<R: Repository>(repo: &R) -> Result<Box<dyn RevWalk + '_>> {
    let names = repo.list_all_names().context("failed to list local refs")?;
    let mut walk = repo
        .rev_walk()
        .context("failed to create revision walker")?;

    for name in &names {
        // A name the store just listed must resolve; NotFound is not "no local copy" here.
        let oid = repo
            .lookup(name)
            .map_err(|e| e.into_collaborator().wrap(format!("failed to lookup {}", name)))?;
        walk.push(&oid)
            .with_context(|| format!("failed to push {}", name))?;
    }
    tracing::debug!("Seeded revision walk with {} ref(s)", names.len());

    Ok(walk)
}

/// Send one have per walked commit until the walk runs out.
fn send_haves<T: Transport>(walk: &mut dyn RevWalk, transport: &mut T) -> Result<usize> {
    let mut sent = 0;
    loop {
        let oid = match walk.next() {
            Ok(Some(oid)) => oid,
            Ok(None) => break,
            Err(e) if e.is_exhausted() => break,
            Err(e) => return Err(e.wrap("revision walk failed")),
        };
        transport
            .send_have(&oid)
            .with_context(|| format!("failed to send have {}", oid))?;
        sent += 1;
    }
    Ok(sent)
}
