//! Unit tests for reaction flattening

use reaction_export::api::Message;
use reaction_export::{flatten, ChannelDirectory, ErrorKind, ExportError, FlatRecord, IdentityResolver};

use crate::helpers::{msg, FakeServer};

fn server() -> FakeServer {
    FakeServer::new()
        .channel(10, "general")
        .user(1, "Alice")
        .user(2, "Bob")
        .user(3, "Carol")
}

fn directory(server: &FakeServer) -> ChannelDirectory {
    ChannelDirectory::from_channels(server.channels.clone())
}

#[test]
fn one_record_per_reaction_in_reaction_order() {
    let server = server();
    let channels = directory(&server);
    let mut identities = IdentityResolver::new(&server);
    let message = msg(5, 10, "Dave", 1_700_000_000, &[(2, "tada"), (1, "+1"), (3, "heart")]);

    let records = flatten(&message, &channels, &mut identities).unwrap();

    let summary: Vec<(&str, &str)> = records
        .iter()
        .map(|r| (r.reactor_name.as_str(), r.emoji_name.as_str()))
        .collect();
    assert_eq!(summary, vec![("Bob", "tada"), ("Alice", "+1"), ("Carol", "heart")]);
    assert!(records.iter().all(|r| r.channel_name == "general"
        && r.sender_name == "Dave"
        && r.timestamp == 1_700_000_000));
}

#[test]
fn message_without_reactions_gives_no_records() {
    let server = server();
    let channels = directory(&server);
    let mut identities = IdentityResolver::new(&server);

    let records = flatten(&msg(4, 10, "Dave", 1, &[]), &channels, &mut identities).unwrap();

    assert!(records.is_empty());
    assert!(server.calls().is_empty());
}

#[test]
fn same_reactor_twice_is_resolved_once() {
    let server = server();
    let channels = directory(&server);
    let mut identities = IdentityResolver::new(&server);
    let message = msg(5, 10, "Dave", 1, &[(1, "+1"), (1, "tada")]);

    let records = flatten(&message, &channels, &mut identities).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(server.user_calls(1), 1);
}

#[test]
fn unknown_channel_is_a_data_integrity_error() {
    let server = server();
    let channels = directory(&server);
    let mut identities = IdentityResolver::new(&server);

    let err = flatten(&msg(5, 99, "Dave", 1, &[(1, "+1")]), &channels, &mut identities)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    assert!(matches!(
        err,
        ExportError::UnknownChannel {
            message_id: 5,
            channel_id: 99
        }
    ));
}

#[test]
fn message_without_channel_is_a_data_integrity_error() {
    let server = server();
    let channels = directory(&server);
    let mut identities = IdentityResolver::new(&server);
    let message = Message {
        channel_id: None,
        ..msg(6, 10, "Eve", 1, &[(1, "+1")])
    };

    let err = flatten(&message, &channels, &mut identities).unwrap_err();

    assert!(matches!(err, ExportError::MissingChannel { message_id: 6 }));
}

#[test]
fn reactor_lookup_failure_aborts_the_message() {
    let server = server();
    let channels = directory(&server);
    let mut identities = IdentityResolver::new(&server);

    let err = flatten(&msg(5, 10, "Dave", 1, &[(1, "+1"), (42, "tada")]), &channels, &mut identities)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RemoteService);
}

#[test]
fn record_fields_map_one_to_one() {
    let server = server();
    let channels = directory(&server);
    let mut identities = IdentityResolver::new(&server);

    let records = flatten(&msg(5, 10, "Dave", 42, &[(1, "👍")]), &channels, &mut identities).unwrap();

    assert_eq!(
        records,
        vec![FlatRecord {
            channel_name: "general".to_string(),
            sender_name: "Dave".to_string(),
            reactor_name: "Alice".to_string(),
            emoji_name: "👍".to_string(),
            timestamp: 42,
        }]
    );
}
