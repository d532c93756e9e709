// crates/presence-core/tests/hub_scenarios.rs
use presence_core::{
    AssignedDetails, ConnectionId, ConnectionState, CursorMove, HubEvent, IdentityAllocator,
    Outbound, OutputMessage, PresenceHub, Snapshot, DEFAULT_PALETTE,
};

fn hub_with_lion_first() -> PresenceHub {
    // A single base label makes the first pick deterministic; overflow
    // names carry numeric suffixes.
    PresenceHub::new(IdentityAllocator::with_pools(["Lion"], DEFAULT_PALETTE))
}

fn expect_details(out: &Outbound) -> &AssignedDetails {
    match out {
        Outbound::Direct(_, OutputMessage::AssignedDetails(d)) => d,
        other => panic!("expected direct AssignedDetails, got {:?}", other),
    }
}

fn expect_snapshot(out: &Outbound) -> &Snapshot {
    match out {
        Outbound::Broadcast(OutputMessage::UpdateCursors(s)) => s,
        other => panic!("expected broadcast UpdateCursors, got {:?}", other),
    }
}

#[test]
fn connect_sends_details_then_snapshot() {
    let mut hub = hub_with_lion_first();
    let a = ConnectionId::from("a");

    let outputs = hub.process_event(HubEvent::Connected(a.clone()));
    assert_eq!(outputs.len(), 2);

    match &outputs[0] {
        Outbound::Direct(to, _) => assert_eq!(to, &a),
        other => panic!("expected direct message, got {:?}", other),
    }
    let details = expect_details(&outputs[0]);
    assert_eq!(details.id, a);
    assert_eq!(details.name, "Lion");
    assert_eq!(details.color, DEFAULT_PALETTE[0]);

    let snapshot = expect_snapshot(&outputs[1]);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[&a].name(), "Lion");
    assert_eq!(hub.connection_state(&a), ConnectionState::Active);
}

#[test]
fn full_session_scenario() {
    let mut hub = hub_with_lion_first();
    let a = ConnectionId::from("a");
    let b = ConnectionId::from("b");

    let out_a = hub.process_event(HubEvent::Connected(a.clone()));
    assert_eq!(expect_details(&out_a[0]).name, "Lion");

    let out_b = hub.process_event(HubEvent::Connected(b.clone()));
    let b_details = expect_details(&out_b[0]);
    assert_ne!(b_details.name, "Lion");
    assert_eq!(b_details.color, DEFAULT_PALETTE[1]);

    let snapshot = expect_snapshot(&out_b[1]);
    assert!(snapshot.contains_key(&a));
    assert!(snapshot.contains_key(&b));

    // A moves; B is untouched.
    let out = hub.process_event(HubEvent::cursor_move(a.clone(), CursorMove::new(50.0, 60.0)));
    assert_eq!(out.len(), 1);
    let snapshot = expect_snapshot(&out[0]);
    assert_eq!((snapshot[&a].x, snapshot[&a].y), (50.0, 60.0));
    assert_eq!((snapshot[&b].x, snapshot[&b].y), (0.0, 0.0));

    // A leaves; only B remains and "Lion" is free again.
    let out = hub.process_event(HubEvent::Disconnected(a.clone()));
    let snapshot = expect_snapshot(&out[0]);
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.contains_key(&b));
    assert_eq!(hub.connection_state(&a), ConnectionState::Disconnected);
    assert!(!hub.allocator().is_in_use("Lion"));

    let c = ConnectionId::from("c");
    let out_c = hub.process_event(HubEvent::Connected(c));
    assert_eq!(expect_details(&out_c[0]).name, "Lion");
}

#[test]
fn move_carries_active_flag() {
    let mut hub = hub_with_lion_first();
    let a = ConnectionId::from("a");
    hub.process_event(HubEvent::Connected(a.clone()));

    hub.process_event(HubEvent::cursor_move(
        a.clone(),
        CursorMove::new(1.0, 2.0).with_active(true),
    ));
    assert_eq!(hub.snapshot()[&a].active, Some(true));

    hub.process_event(HubEvent::cursor_move(a.clone(), CursorMove::new(3.0, 4.0)));
    assert_eq!(hub.snapshot()[&a].active, None);
}

#[test]
fn events_for_unknown_connections_are_ignored() {
    let mut hub = hub_with_lion_first();
    let a = ConnectionId::from("a");
    let ghost = ConnectionId::from("ghost");
    hub.process_event(HubEvent::Connected(a.clone()));
    let before = hub.snapshot();

    let out = hub.process_event(HubEvent::cursor_move(ghost.clone(), CursorMove::new(9.0, 9.0)));
    assert!(out.is_empty());

    let out = hub.process_event(HubEvent::Disconnected(ghost));
    assert!(out.is_empty());

    assert_eq!(hub.snapshot(), before);
}

#[test]
fn events_after_disconnect_are_ignored() {
    let mut hub = hub_with_lion_first();
    let a = ConnectionId::from("a");
    hub.process_event(HubEvent::Connected(a.clone()));
    hub.process_event(HubEvent::Disconnected(a.clone()));

    assert!(hub
        .process_event(HubEvent::cursor_move(a.clone(), CursorMove::new(1.0, 1.0)))
        .is_empty());
    assert!(hub.process_event(HubEvent::Disconnected(a)).is_empty());
    assert_eq!(hub.num_connections(), 0);
}

#[test]
fn duplicate_connect_keeps_first_identity() {
    let mut hub = hub_with_lion_first();
    let a = ConnectionId::from("a");
    hub.process_event(HubEvent::Connected(a.clone()));

    assert!(hub.process_event(HubEvent::Connected(a.clone())).is_empty());
    assert_eq!(hub.snapshot()[&a].name(), "Lion");
    assert_eq!(hub.allocator().in_use_count(), 1);
}

#[test]
fn used_names_match_live_cursors() {
    let mut hub = PresenceHub::new(IdentityAllocator::with_seed(5));
    let ids: Vec<ConnectionId> = (0..40).map(|i| ConnectionId::new(format!("c{}", i))).collect();

    for id in &ids {
        hub.process_event(HubEvent::Connected(id.clone()));
    }
    for id in ids.iter().step_by(3) {
        hub.process_event(HubEvent::Disconnected(id.clone()));
    }

    let snapshot = hub.snapshot();
    assert_eq!(hub.allocator().in_use_count(), snapshot.len());
    for cursor in snapshot.values() {
        assert!(hub.allocator().is_in_use(cursor.name()));
    }
}
