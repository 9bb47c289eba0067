//! Client side of the fetch negotiation
//!
//! A fetch runs in two steps:
//! 1. [`Remote::negotiate`] works out which advertised refs we need, sends them
//!    as wants and then streams every commit reachable from our own refs as haves
//! 2. [`Remote::download_pack`] hands over to the transport for the pack transfer

mod filter;
mod head;
mod negotiate;

pub use head::{Classification, RemoteHead, WantList};

use crate::error::{ErrorContext, Result};
use crate::refspec::RefspecMatcher;
use crate::storage::Repository;
use crate::transport::{PackHandle, Transport};

/// A remote we fetch from, together with the local repository it feeds.
pub struct Remote<R, T> {
    name: String,
    fetch_spec: Option<Box<dyn RefspecMatcher>>,
    repo: R,
    transport: T,
    refs: WantList,
}

impl<R: Repository, T: Transport> Remote<R, T> {
    /// Create a remote without a fetch refspec
    pub fn new(name: impl Into<String>, repo: R, transport: T) -> Self {
        Remote {
            name: name.into(),
            fetch_spec: None,
            repo,
            transport,
            refs: WantList::default(),
        }
    }

    pub fn with_fetch_spec(mut self, spec: impl RefspecMatcher + 'static) -> Self {
        self.fetch_spec = Some(Box::new(spec));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The want list produced by the last successful negotiation
    pub fn refs(&self) -> &WantList {
        &self.refs
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Download the pack the remote computed from the negotiation.
    ///
    /// Only meaningful once [`Remote::negotiate`] has completed; the transport
    /// decides what happens otherwise.
    pub fn download_pack(&mut self) -> Result<PackHandle> {
        let handle = self
            .transport
            .download_pack(&self.repo)
            .context("failed to download pack")?;
        tracing::info!(
            "Downloaded pack {} ({} bytes) from {}",
            handle.checksum,
            handle.size,
            self.name
        );
        Ok(handle)
    }
}
