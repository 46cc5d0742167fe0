//! Session persistence through the file-backed token store.

use kimia_realty::session::{FileTokenStore, TokenStore};
use kimia_realty::Session;
use std::fs;
use tempfile::tempdir;

#[test]
fn login_persists_and_logout_removes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kimia").join("token");

    let mut session = Session::restore(FileTokenStore::new(&path));
    assert!(!session.is_authenticated());

    session.login("tok123").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "tok123");

    session.logout().unwrap();
    assert!(!path.exists());
    assert_eq!(FileTokenStore::new(&path).load().unwrap(), None);
}

#[test]
fn token_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("token");

    {
        let mut session = Session::restore(FileTokenStore::new(&path));
        session.login("persisted-token").unwrap();
    }

    let restored = Session::restore(FileTokenStore::new(&path));
    assert!(restored.is_authenticated());
    assert_eq!(restored.token(), Some("persisted-token"));
}

#[test]
fn unwritable_storage_leaves_session_signed_out() {
    let dir = tempdir().unwrap();
    // A directory where the token file should be makes the write fail.
    let path = dir.path().join("token");
    fs::create_dir(&path).unwrap();

    let mut session = Session::restore(FileTokenStore::new(&path));
    assert!(session.login("tok123").is_err());
    assert!(!session.is_authenticated());
}
