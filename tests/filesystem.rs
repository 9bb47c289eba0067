use std::fs;

use git_fetch_negotiate::{FileTransport, FilesystemRepository, Refspec, Remote, State};
use tempfile::TempDir;

/// Local and remote repositories on disk, the local one a step behind
fn setup() -> (TempDir, TempDir) {
    let local_dir = TempDir::new().unwrap();
    let remote_dir = TempDir::new().unwrap();

    let mut remote_state = State::default();
    remote_state.set_ref("refs/heads/dev", "d1");
    remote_state.set_ref("refs/heads/main", "m2");
    remote_state.set_ref("refs/tags/v1", "m1");
    FilesystemRepository::new(remote_dir.path())
        .write_state(&remote_state)
        .unwrap();
    fs::write(remote_dir.path().join("pack"), b"PACK\x00\x00\x00\x02").unwrap();

    let mut local_state = State::default();
    local_state.set_ref("refs/heads/main", "m1");
    local_state.set_ref("refs/remotes/origin/main", "m1");
    local_state.add_commit("m1", &["root"]);
    local_state.add_commit("root", &[]);
    let local = FilesystemRepository::new(local_dir.path());
    local.initialize().unwrap();
    local.write_state(&local_state).unwrap();

    (local_dir, remote_dir)
}

#[test]
fn test_fetch_over_filesystem_transport() {
    let (local_dir, remote_dir) = setup();
    let transport = FileTransport::new(remote_dir.path(), Vec::new());
    let mut remote = Remote::new("origin", FilesystemRepository::new(local_dir.path()), transport)
        .with_fetch_spec(Refspec::parse("+refs/heads/*:refs/remotes/origin/*").unwrap());

    remote.negotiate().unwrap();

    let wants: Vec<_> = remote.refs().iter().map(|h| (h.name.as_str(), h.has_local)).collect();
    assert_eq!(wants, vec![("refs/heads/dev", false), ("refs/heads/main", true)]);

    let pack = remote.download_pack().unwrap();
    assert!(pack.path.starts_with(local_dir.path().join("objects").join("pack")));
    assert_eq!(fs::read(&pack.path).unwrap(), b"PACK\x00\x00\x00\x02");

    let transcript = String::from_utf8(remote.into_transport().into_inner()).unwrap();
    assert_eq!(
        transcript,
        "want d1 refs/heads/dev\n\
         want m2 refs/heads/main\n\
         have m1\n\
         have root\n\
         flush\n\
         done\n"
    );
}

#[test]
fn test_up_to_date_remote_writes_no_transcript() {
    let (local_dir, remote_dir) = setup();
    let transport = FileTransport::new(remote_dir.path(), Vec::new());
    // Only main is fetched, and tags are outside the refspec entirely
    let mut remote = Remote::new("origin", FilesystemRepository::new(local_dir.path()), transport)
        .with_fetch_spec(Refspec::parse("refs/heads/main:refs/heads/main").unwrap());

    let mut state = FilesystemRepository::new(local_dir.path()).read_state().unwrap();
    state.set_ref("refs/heads/main", "m2");
    FilesystemRepository::new(local_dir.path()).write_state(&state).unwrap();

    remote.negotiate().unwrap();

    assert!(remote.refs().is_empty());
    assert!(remote.into_transport().into_inner().is_empty());
}
