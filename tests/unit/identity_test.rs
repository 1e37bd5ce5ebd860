//! Unit tests for the identity cache

use reaction_export::{ErrorKind, IdentityResolver};

use crate::helpers::FakeServer;

#[test]
fn repeated_resolves_hit_the_server_once() {
    let server = FakeServer::new().user(7, "Alice Liddell");
    let mut resolver = IdentityResolver::new(&server);

    for _ in 0..5 {
        assert_eq!(resolver.resolve(7).unwrap(), "Alice Liddell");
    }

    assert_eq!(server.user_calls(7), 1);
    assert_eq!(resolver.resolved_count(), 1);
}

#[test]
fn distinct_users_are_each_looked_up_once() {
    let server = FakeServer::new().user(1, "Alice").user(2, "Bob");
    let mut resolver = IdentityResolver::new(&server);

    for id in [1, 2, 1, 2, 2, 1] {
        resolver.resolve(id).unwrap();
    }

    assert_eq!(server.user_calls(1), 1);
    assert_eq!(server.user_calls(2), 1);
    assert_eq!(resolver.resolved_count(), 2);
}

#[test]
fn unknown_user_propagates_remote_error() {
    let server = FakeServer::new();
    let mut resolver = IdentityResolver::new(&server);

    let err = resolver.resolve(404).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RemoteService);
    assert!(err.to_string().contains("No such user"));
}

#[test]
fn failed_lookups_are_not_cached() {
    let server = FakeServer::new();
    let mut resolver = IdentityResolver::new(&server);

    assert!(resolver.resolve(404).is_err());
    assert!(resolver.resolve(404).is_err());

    assert_eq!(server.user_calls(404), 2);
    assert_eq!(resolver.resolved_count(), 0);
}
