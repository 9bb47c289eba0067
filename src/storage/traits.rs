use std::path::Path;

use crate::error::Result;
use crate::revwalk::RevWalk;

/// Git object SHA-1 identifier (40 hex characters)
pub type ObjectId = String;

/// Resolves reference names to the object ids they point at.
pub trait RefStore {
    /// Resolve `name` to an object id.
    /// Returns an error of kind `NotFound` if the reference doesn't exist.
    fn lookup(&self, name: &str) -> Result<ObjectId>;

    /// List the names of every reference in the store.
    fn list_all_names(&self) -> Result<Vec<String>>;
}

/// A local repository: its references plus the ability to walk its history.
pub trait Repository: RefStore {
    /// Create a fresh revision walker over this repository's commits.
    fn rev_walk(&self) -> Result<Box<dyn RevWalk + '_>>;

    /// Directory holding the repository's state and objects.
    fn git_dir(&self) -> &Path;
}

impl<R: RefStore + ?Sized> RefStore for &R {
    fn lookup(&self, name: &str) -> Result<ObjectId> {
        (**self).lookup(name)
    }

    fn list_all_names(&self) -> Result<Vec<String>> {
        (**self).list_all_names()
    }
}

impl<R: Repository + ?Sized> Repository for &R {
    fn rev_walk(&self) -> Result<Box<dyn RevWalk + '_>> {
        (**self).rev_walk()
    }

    fn git_dir(&self) -> &Path {
        (**self).git_dir()
    }
}
