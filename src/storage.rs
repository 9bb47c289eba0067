mod filesystem;
mod state;
mod traits;

pub use filesystem::FilesystemRepository;
pub use state::State;
pub use traits::{ObjectId, RefStore, Repository};
