// crates/presence-core/tests/registry.rs
use presence_core::{ConnectionId, CursorState, Identity, PresenceRegistry};

fn lion() -> Identity {
    Identity::new("Lion", "#0D47A1")
}

#[test]
fn add_starts_at_origin_inactive() {
    let mut registry = PresenceRegistry::new();
    let id = ConnectionId::from("a");

    let cursor = registry.add(id.clone(), lion());

    assert_eq!(cursor, CursorState::new(lion()));
    assert_eq!(cursor.x, 0.0);
    assert_eq!(cursor.y, 0.0);
    assert_eq!(cursor.active, Some(false));
    assert_eq!(registry.get(&id), Some(&cursor));
}

#[test]
fn update_is_reflected_in_snapshot() {
    let mut registry = PresenceRegistry::new();
    let id = ConnectionId::from("a");
    registry.add(id.clone(), lion());

    registry.update(&id, 100.0, 200.0, Some(true));

    let snapshot = registry.snapshot();
    assert_eq!(
        snapshot[&id],
        CursorState {
            identity: lion(),
            x: 100.0,
            y: 200.0,
            active: Some(true),
        }
    );
}

#[test]
fn update_without_active_clears_flag() {
    let mut registry = PresenceRegistry::new();
    let id = ConnectionId::from("a");
    registry.add(id.clone(), lion());

    registry.update(&id, 1.0, 2.0, None);

    assert_eq!(registry.get(&id).map(|c| c.active), Some(None));
}

#[test]
fn add_overwrites_existing_entry() {
    let mut registry = PresenceRegistry::new();
    let id = ConnectionId::from("a");
    registry.add(id.clone(), lion());
    registry.update(&id, 5.0, 5.0, Some(true));

    registry.add(id.clone(), Identity::new("Tiger", "#B71C1C"));

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(&id).map(|c| c.name()), Some("Tiger"));
    assert_eq!(registry.get(&id).map(|c| c.x), Some(0.0));
}

#[test]
fn remove_returns_identity_and_clears_entry() {
    let mut registry = PresenceRegistry::new();
    let id = ConnectionId::from("a");
    registry.add(id.clone(), lion());

    assert_eq!(registry.remove(&id), Some(lion()));
    assert!(!registry.snapshot().contains_key(&id));
    assert!(registry.is_empty());
    assert_eq!(registry.remove(&id), None);
}

#[test]
fn absent_ids_do_not_disturb_others() {
    let mut registry = PresenceRegistry::new();
    let a = ConnectionId::from("a");
    let ghost = ConnectionId::from("ghost");
    registry.add(a.clone(), lion());
    registry.update(&a, 3.0, 4.0, Some(true));
    let before = registry.snapshot();

    registry.update(&ghost, 9.0, 9.0, Some(false));
    assert_eq!(registry.remove(&ghost), None);

    assert_eq!(registry.snapshot(), before);
    assert!(!registry.contains(&ghost));
}
