//! Client-side fetch negotiation.
//!
//! Given what a remote advertises and what the local repository already has,
//! [`Remote::compute_wants`] picks the refs worth fetching and
//! [`Remote::negotiate`] tells the remote about them, followed by every commit
//! we already have, so it can send a minimal pack.
//!
//! The refs store, refspec matching, revision walk and transport are traits;
//! filesystem-backed implementations are provided for each.
#![deny(clippy::mod_module_files)]

pub mod error;
pub mod fetch;
pub mod refspec;
pub mod revwalk;
pub mod storage;
pub mod transport;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use fetch::{Classification, Remote, RemoteHead, WantList};
pub use refspec::{Refspec, RefspecMatcher};
pub use revwalk::{RevWalk, StateRevWalk};
pub use storage::{FilesystemRepository, ObjectId, RefStore, Repository, State};
pub use transport::{FileTransport, PackHandle, Transport};
