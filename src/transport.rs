//! The network side of a fetch

mod file;

pub use file::FileTransport;

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::fetch::{RemoteHead, WantList};
use crate::storage::{ObjectId, Repository};

/// Handle to a pack stored in the local repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackHandle {
    /// Where the pack was written
    pub path: PathBuf,
    /// SHA-1 of the pack contents, hex encoded
    pub checksum: String,
    pub size: u64,
}

/// Connection to a remote speaking the want/have protocol.
///
/// Every call is a blocking round trip.
pub trait Transport {
    /// List every ref the remote advertises, in the remote's order.
    fn list_remote_refs(&mut self) -> Result<Vec<RemoteHead>>;

    /// Send the whole want list as one batch.
    fn send_wants(&mut self, wants: &WantList) -> Result<()>;

    fn send_have(&mut self, id: &ObjectId) -> Result<()>;

    fn send_flush(&mut self) -> Result<()>;

    /// Tell the remote the haves are complete.
    fn send_done(&mut self) -> Result<()>;

    /// Receive the pack computed by the remote into `repo`.
    fn download_pack(&mut self, repo: &dyn Repository) -> Result<PackHandle>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn list_remote_refs(&mut self) -> Result<Vec<RemoteHead>> {
        (**self).list_remote_refs()
    }

    fn send_wants(&mut self, wants: &WantList) -> Result<()> {
        (**self).send_wants(wants)
    }

    fn send_have(&mut self, id: &ObjectId) -> Result<()> {
        (**self).send_have(id)
    }

    fn send_flush(&mut self) -> Result<()> {
        (**self).send_flush()
    }

    fn send_done(&mut self) -> Result<()> {
        (**self).send_done()
    }

    fn download_pack(&mut self, repo: &dyn Repository) -> Result<PackHandle> {
        (**self).download_pack(repo)
    }
}
