//! Packet router: dispatch, fallback and fault isolation.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use mulink_client::dispatch::{DispatchTable, HandlerCtx, Route};
use mulink_client::session::SessionState;
use mulink_client::{DispatchOutcome, PacketRouter};
use mulink_core::protocol::codes::*;
use mulink_core::{ErrorKind, Packet, ProtocolVersion};

mod common;
use common::*;

const OWN_ID: u16 = 0x42;

fn noop(_ctx: &HandlerCtx<'_>, _packet: &Packet<'_>) -> mulink_core::Result<()> {
    Ok(())
}

fn walk_s6(id: u16, x: u8, y: u8, rotation: u8, route: &[u8]) -> Vec<u8> {
    let steps = u8::try_from(route.len()).unwrap();
    let mut body = id.to_be_bytes().to_vec();
    body.extend_from_slice(&[x, y, (rotation << 4) | steps]);
    for pair in route.chunks(2) {
        let hi = pair[0];
        let lo = pair.get(1).copied().unwrap_or(0);
        body.push((hi << 4) | lo);
    }
    c1(OBJECT_WALKED, None, &body)
}

#[test]
fn short_buffers_never_reach_a_handler() {
    let sink = Arc::new(RecordingSink::new());
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    for raw in [&[][..], &[0xC1][..], &[0xC1, 0x02][..]] {
        assert_eq!(
            router.dispatch(raw),
            DispatchOutcome::Dropped(ErrorKind::HeaderMalformed)
        );
    }
    assert_eq!(
        router.dispatch(&[0x00, 0x03, 0x00]),
        DispatchOutcome::Dropped(ErrorKind::HeaderMalformed)
    );
    assert!(sink.calls().is_empty());
    assert!(fu.calls().is_empty());
    assert_eq!(
        router.metrics().dispatch_outcomes.get(&[("outcome", "HEADER_MALFORMED"), ("code", "-")]),
        4
    );
}

#[test]
fn resolve_prefers_exact_then_family_fallback() {
    let table = DispatchTable::standard();

    let exact = table.resolve(CHARACTER_GROUP, Some(SUB_LEVEL_UP)).unwrap();
    assert_eq!(exact.name, "level_up");

    let fallback = table.resolve(CHARACTER_GROUP, Some(0x77)).unwrap();
    assert_eq!(fallback.name, "character_group");

    assert!(table.resolve(HEALTH, Some(0x10)).is_none());
    assert!(table.resolve(0x99, None).is_none());
}

#[test]
fn duplicate_registration_keeps_first() {
    let mut table = DispatchTable::new();
    assert!(table.register(Route::new(0x30, Some(1), "first", noop)));
    assert!(!table.register(Route::new(0x30, Some(1), "second", noop)));
    assert!(table.register(Route::new(0x30, None, "family", noop)));

    assert_eq!(table.len(), 2);
    assert_eq!(table.resolve(0x30, Some(1)).unwrap().name, "first");
    assert_eq!(table.resolve(0x30, Some(2)).unwrap().name, "family");
}

#[test]
fn sub_code_falls_back_to_family_handler() {
    let sink = Arc::new(RecordingSink::new());
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    assert_eq!(
        router.dispatch(&c1(CHARACTER_GROUP, Some(0x77), &[1, 2, 3])),
        DispatchOutcome::Handled("character_group")
    );
    // Sub-code byte missing entirely.
    assert_eq!(
        router.dispatch(&[0xC1, 0x03, LOGIN_GROUP]),
        DispatchOutcome::Handled("login_group")
    );
    assert!(sink.calls().is_empty());
}

#[test]
fn unresolved_opcode_is_dropped() {
    let sink = Arc::new(RecordingSink::new());
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    assert_eq!(
        router.dispatch(&c1(0x99, None, &[0; 4])),
        DispatchOutcome::Dropped(ErrorKind::UnresolvedOpcode)
    );
    assert_eq!(
        router.dispatch(&c1(MANA, Some(0x10), &[0; 4])),
        DispatchOutcome::Dropped(ErrorKind::UnresolvedOpcode)
    );
    assert!(sink.calls().is_empty());
}

#[test]
fn walk_without_steps_acknowledges_once() {
    let sink = Arc::new(RecordingSink::with_identity(Some(OWN_ID), None));
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    assert_eq!(
        router.dispatch(&walk_s6(OWN_ID, 10, 20, 3, &[])),
        DispatchOutcome::Handled("object_walked")
    );
    assert_eq!(sink.calls(), vec![SinkCall::MovementAcknowledged]);
}

#[test]
fn walk_with_steps_moves_to_target() {
    let sink = Arc::new(RecordingSink::with_identity(Some(OWN_ID), None));
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    router.dispatch(&walk_s6(OWN_ID, 10, 20, 3, &[1, 2, 3]));
    assert_eq!(sink.calls(), vec![SinkCall::Position(10, 20)]);

    // Someone else's walk is only observed.
    router.dispatch(&walk_s6(0x10, 50, 60, 0, &[4]));
    assert_eq!(sink.calls().len(), 1);
}

#[test]
fn legacy_walk_layout() {
    let sink = Arc::new(RecordingSink::with_identity(Some(OWN_ID), None));
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::V075, &sink, &fu);

    // id, x, y, step count, rotation, packed route
    let mut body = OWN_ID.to_be_bytes().to_vec();
    body.extend_from_slice(&[7, 9, 2, 5, 0x12]);
    router.dispatch(&c1(OBJECT_WALKED, None, &body));
    assert_eq!(sink.calls(), vec![SinkCall::Position(7, 9)]);
}

#[test]
fn truncated_scope_list_still_latches_identity() {
    let sink = Arc::new(RecordingSink::with_identity(None, Some("Hero")));
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    // Count says two records; only the first is complete.
    let mut body = vec![2u8];
    body.extend(scope_record_s6(0x8000 | 0x0123, "Hero", 100, 120));
    body.extend(&scope_record_s6(0x0200, "Other", 1, 1)[..20]);

    assert_eq!(
        router.dispatch(&c2(ADD_CHARACTERS_TO_SCOPE, None, &body)),
        DispatchOutcome::Handled("characters_in_scope")
    );
    assert_eq!(sink.calls(), vec![SinkCall::CharacterId(0x0123)]);
}

#[test]
fn identity_latches_once() {
    let sink = Arc::new(RecordingSink::with_identity(None, Some("Hero")));
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    let mut body = vec![2u8];
    body.extend(scope_record_s6(0x0011, "Hero", 1, 1));
    body.extend(scope_record_s6(0x0022, "Hero", 2, 2));
    router.dispatch(&c2(ADD_CHARACTERS_TO_SCOPE, None, &body));

    let mut again = vec![1u8];
    again.extend(scope_record_s6(0x0033, "Hero", 3, 3));
    router.dispatch(&c2(ADD_CHARACTERS_TO_SCOPE, None, &again));

    assert_eq!(sink.calls(), vec![SinkCall::CharacterId(0x0011)]);
}

#[test]
fn scope_without_known_name_touches_nothing() {
    let sink = Arc::new(RecordingSink::new());
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    let mut body = vec![1u8];
    body.extend(scope_record_s6(0x0011, "Hero", 1, 1));
    router.dispatch(&c2(ADD_CHARACTERS_TO_SCOPE, None, &body));
    assert!(sink.calls().is_empty());
}

#[test]
fn login_success_requests_character_list_once() {
    let sink = Arc::new(RecordingSink::new());
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    assert_eq!(
        router.dispatch(&c1(LOGIN_GROUP, Some(SUB_LOGIN_RESULT), &[0x01])),
        DispatchOutcome::Handled("login_result")
    );
    assert_eq!(fu.calls(), vec![FollowUpCall::CharacterList]);
    assert!(sink.calls().is_empty());

    // Rejected login: nothing further.
    router.dispatch(&c1(LOGIN_GROUP, Some(SUB_LOGIN_RESULT), &[0x00]));
    assert_eq!(fu.calls().len(), 1);
}

#[test]
fn character_list_triggers_selection_only_when_non_empty() {
    let sink = Arc::new(RecordingSink::new());
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    router.dispatch(&c1(CHARACTER_GROUP, Some(SUB_CHARACTER_LIST), &[0, 0, 0, 0]));
    assert!(fu.calls().is_empty());

    let mut record = vec![0u8; 34];
    record[0] = 2;
    record[1..11].copy_from_slice(&name10("Hero"));
    record[12..14].copy_from_slice(&150u16.to_le_bytes());
    let mut body = vec![0, 5, 1, 0];
    body.extend(record);
    router.dispatch(&c1(CHARACTER_GROUP, Some(SUB_CHARACTER_LIST), &body));

    match fu.calls().as_slice() {
        [FollowUpCall::Selection(chars)] => {
            assert_eq!(chars.len(), 1);
            assert_eq!(chars[0].name, "Hero");
            assert_eq!(chars[0].slot, 2);
            assert_eq!(chars[0].level, 150);
        }
        other => panic!("unexpected follow-ups: {other:?}"),
    }
}

#[test]
fn standard_health_update_leaves_mana_alone() {
    let sink = Arc::new(RecordingSink::new());
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    assert_eq!(
        router.dispatch(&c1(HEALTH, Some(SUB_CURRENT), &[0x00, 0x32])),
        DispatchOutcome::Handled("current_health_shield")
    );
    router.dispatch(&c1(HEALTH, Some(SUB_MAXIMUM), &[0x01, 0x2C, 0x00, 0x64]));

    assert_eq!(
        sink.calls(),
        vec![
            SinkCall::CurrentHealthShield(50, 0),
            SinkCall::MaximumHealthShield(300, 100),
        ]
    );
}

#[test]
fn legacy_vitals_ignore_extended_bytes() {
    let sink = Arc::new(RecordingSink::new());
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::V097, &sink, &fu);

    router.dispatch(&c1(MANA, Some(SUB_CURRENT), &[0x00, 0x10, 0x00, 0x20]));
    assert_eq!(sink.calls(), vec![SinkCall::CurrentManaAbility(16, 0)]);
}

#[test]
fn repeated_message_is_idempotent() {
    let session = Arc::new(SessionState::new());
    let fu = Arc::new(RecordingFollowUp::default());
    let router = PacketRouter::new(ProtocolVersion::Season6, session.clone(), fu);

    let msg = c1(HEALTH, Some(SUB_CURRENT), &[0x00, 0x32, 0x00, 0x0A]);
    router.dispatch(&msg);
    let once = session.snapshot();
    router.dispatch(&msg);
    assert_eq!(session.snapshot(), once);
    assert_eq!(once.health, 50);
    assert_eq!(once.shield, 10);
}

#[test]
fn short_movement_message_still_acknowledges() {
    let sink = Arc::new(RecordingSink::with_identity(Some(OWN_ID), None));
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    assert_eq!(
        router.dispatch(&c1(OBJECT_WALKED, None, &[0x00, 0x42, 0x0A])),
        DispatchOutcome::Dropped(ErrorKind::DecodeLengthMismatch)
    );
    assert_eq!(sink.calls(), vec![SinkCall::MovementAcknowledged]);
    assert_eq!(
        router.metrics().movement_recoveries.get(&[("code", "d4")]),
        1
    );

    // Non-movement faults do not acknowledge.
    router.dispatch(&c1(MAP_CHANGED, None, &[0x00]));
    assert_eq!(sink.count(&SinkCall::MovementAcknowledged), 1);
}

#[test]
fn panicking_sink_is_contained() {
    let sink = Arc::new(RecordingSink::panicking());
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    assert_eq!(
        router.dispatch(&walk_s6(OWN_ID, 10, 20, 0, &[1])),
        DispatchOutcome::Panicked
    );
    assert_eq!(sink.calls(), vec![SinkCall::MovementAcknowledged]);

    // The router keeps working afterwards.
    assert_eq!(
        router.dispatch(&c1(HEALTH, Some(SUB_CURRENT), &[0x00, 0x01])),
        DispatchOutcome::Handled("current_health_shield")
    );
}

#[test]
fn disconnect_clears_connected_flag() {
    let sink = Arc::new(RecordingSink::new());
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    let mut body = vec![0x01, 0x00, 0x42];
    body.extend_from_slice(b"10404");
    router.dispatch(&c1(LOGIN_GROUP, Some(SUB_GAME_SERVER_ENTERED), &body));
    router.on_disconnected();

    assert_eq!(
        sink.calls(),
        vec![SinkCall::Connected(true), SinkCall::Connected(false)]
    );
}

#[test]
fn handled_messages_are_counted() {
    let sink = Arc::new(RecordingSink::new());
    let fu = Arc::new(RecordingFollowUp::default());
    let router = router(ProtocolVersion::Season6, &sink, &fu);

    router.dispatch(&c1(HEALTH, Some(SUB_CURRENT), &[0x00, 0x01]));
    router.dispatch(&c1(HEALTH, Some(SUB_CURRENT), &[0x00, 0x02]));

    let m = router.metrics();
    assert_eq!(m.dispatch_outcomes.get(&[("outcome", "HANDLED"), ("code", "26")]), 2);
    assert_eq!(m.dispatch_duration.count(&[("route", "current_health_shield")]), 2);
    assert!(m.render().contains("mulink_dispatch_outcomes_total"));
}
