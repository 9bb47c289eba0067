use std::cmp::Reverse;

use super::{Classification, Remote, RemoteHead, WantList};
use crate::error::{Error, ErrorContext, Result};
use crate::refspec::RefspecMatcher;
use crate::storage::{RefStore, Repository};
use crate::transport::Transport;

impl<R: Repository, T: Transport> Remote<R, T> {
    /// Reduce the remote's advertisement to the refs we actually need.
    ///
    /// Refs outside the fetch refspec and refs whose local counterpart already
    /// points at the advertised id are dropped. The rest are classified as
    /// wants and returned with wanted refs first, in advertisement order.
    pub fn compute_wants(&mut self) -> Result<WantList> {
        let spec = self.fetch_spec.as_deref().ok_or_else(|| {
            Error::configuration(format!("remote '{}' has no fetch refspec", self.name))
        })?;

        let advertised = self
            .transport
            .list_remote_refs()
            .context("failed to list remote refs")?;
        tracing::debug!("{} advertised {} refs", self.name, advertised.len());

        let mut working = Vec::with_capacity(advertised.len());
        for head in advertised {
            if let Some(head) = classify(spec, &self.repo, head)? {
                working.push(head);
            }
        }

        // Stable, so equally classified refs keep their advertisement order.
        working.sort_by_key(|head| Reverse(head.classification));

        tracing::info!("{} wants {} ref(s)", self.name, working.len());
        Ok(WantList::from(working))
    }
}

/// Decide whether `head` is wanted, recording what we know about it locally.
fn classify(
    spec: &dyn RefspecMatcher,
    refs: &impl RefStore,
    mut head: RemoteHead,
) -> Result<Option<RemoteHead>> {
    match spec.matches_source(&head.name) {
        Ok(true) => {}
        Ok(false) => return Ok(None),
        Err(e) if e.is_no_match() => return Ok(None),
        Err(e) => {
            return Err(e
                .into_collaborator()
                .wrap("error matching remote ref name"))
        }
    }

    // The matcher accepted the name, so NoMatch here is a broken matcher.
    let local_name = spec
        .transform_to_destination(&head.name)
        .map_err(|e| e.into_collaborator().wrap("error transforming ref name"))?;

    let local_oid = match refs.lookup(&local_name) {
        Ok(oid) => Some(oid),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e.wrap("error looking up local ref")),
    };

    if local_oid.as_deref() == Some(head.remote_oid.as_str()) {
        tracing::debug!("{} is up to date at {}", local_name, head.remote_oid);
        return Ok(None);
    }

    tracing::debug!(
        "want {} at {} (local {})",
        head.name,
        head.remote_oid,
        local_oid.as_deref().unwrap_or("none")
    );
    head.has_local = local_oid.is_some();
    head.local_oid = local_oid;
    head.classification = Classification::Want;
    Ok(Some(head))
}
