//! Transport to a remote living in a local directory

use std::fs;
use std::io::Write;
use std::path::Path;

use sha1::{Digest, Sha1};

use super::{PackHandle, Transport};
use crate::error::{Error, ErrorContext, ErrorKind, Result};
use crate::fetch::{RemoteHead, WantList};
use crate::storage::{FilesystemRepository, ObjectId, Repository};

/// Talks to a [`FilesystemRepository`] acting as the remote.
///
/// The advertisement comes from the remote's `state.yaml`. Protocol messages
/// are written one per line to `out`:
///
/// ```text
/// want <oid> <name>
/// have <oid>
/// flush
/// done
/// ```
///
/// The pack the remote serves is the file named `pack` in its directory.
pub struct FileTransport<W> {
    remote: FilesystemRepository,
    out: W,
}

impl<W: Write> FileTransport<W> {
    pub fn new<P: AsRef<Path>>(remote_path: P, out: W) -> Self {
        FileTransport {
            remote: FilesystemRepository::new(remote_path),
            out,
        }
    }

    /// Consume the transport, returning the transcript writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn send(&mut self, line: std::fmt::Arguments<'_>) -> Result<()> {
        self.out
            .write_fmt(line)
            .and_then(|()| self.out.write_all(b"\n"))
            .context("failed to write to transport")
    }
}

impl<W: Write> Transport for FileTransport<W> {
    fn list_remote_refs(&mut self) -> Result<Vec<RemoteHead>> {
        let state = self.remote.read_state()?;
        Ok(state
            .refs
            .into_iter()
            .map(|(name, oid)| RemoteHead::new(name, oid))
            .collect())
    }

    fn send_wants(&mut self, wants: &WantList) -> Result<()> {
        for head in wants {
            self.send(format_args!("want {} {}", head.remote_oid, head.name))?;
        }
        Ok(())
    }

    fn send_have(&mut self, id: &ObjectId) -> Result<()> {
        self.send(format_args!("have {}", id))
    }

    fn send_flush(&mut self) -> Result<()> {
        self.send(format_args!("flush"))?;
        self.out.flush().context("failed to flush transport")
    }

    fn send_done(&mut self) -> Result<()> {
        self.send(format_args!("done"))?;
        self.out.flush().context("failed to flush transport")
    }

    fn download_pack(&mut self, repo: &dyn Repository) -> Result<PackHandle> {
        let source = self.remote.git_dir().join("pack");
        if !source.exists() {
            return Err(Error::new(
                ErrorKind::Collaborator,
                format!("remote has no pack at {}", source.display()),
            ));
        }
        let data = fs::read(&source)
            .with_context(|| format!("failed to read pack {}", source.display()))?;

        let checksum = hex::encode(Sha1::digest(&data));
        let pack_dir = repo.git_dir().join("objects").join("pack");
        fs::create_dir_all(&pack_dir)
            .with_context(|| format!("failed to create {}", pack_dir.display()))?;

        let path = pack_dir.join(format!("pack-{}.pack", checksum));
        fs::write(&path, &data)
            .with_context(|| format!("failed to write pack {}", path.display()))?;

        Ok(PackHandle {
            path,
            checksum,
            size: data.len() as u64,
        })
    }
}
