//! Integration tests for the on-disk session store.

use client_lib::adapters::FileSessionStore;
use coursify_core::domain::{Role, SessionToken};
use coursify_core::ports::SessionStore;
use tempfile::TempDir;

#[test]
fn tokens_survive_reopening_the_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("coursify").join("session.json");

    let store = FileSessionStore::new(&path);
    store
        .set(Role::User, SessionToken::new("user-tok").unwrap())
        .unwrap();
    drop(store);

    let reopened = FileSessionStore::new(&path);
    assert_eq!(
        reopened.get(Role::User).unwrap().unwrap().as_str(),
        "user-tok"
    );
    assert!(reopened.get(Role::Admin).unwrap().is_none());
}

#[test]
fn clearing_one_role_keeps_the_other() {
    let dir = TempDir::new().unwrap();
    let store = FileSessionStore::new(dir.path().join("session.json"));
    store
        .set(Role::User, SessionToken::new("user-tok").unwrap())
        .unwrap();
    store
        .set(Role::Admin, SessionToken::new("admin-tok").unwrap())
        .unwrap();

    store.clear(Role::Admin).unwrap();

    assert!(store.get(Role::Admin).unwrap().is_none());
    assert_eq!(store.get(Role::User).unwrap().unwrap().as_str(), "user-tok");
}

#[test]
fn setting_a_token_replaces_the_previous_one() {
    let dir = TempDir::new().unwrap();
    let store = FileSessionStore::new(dir.path().join("session.json"));
    store
        .set(Role::Admin, SessionToken::new("first").unwrap())
        .unwrap();
    store
        .set(Role::Admin, SessionToken::new("second").unwrap())
        .unwrap();
    assert_eq!(store.get(Role::Admin).unwrap().unwrap().as_str(), "second");
}
