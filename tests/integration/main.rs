//! Integration tests for Mindgraph
//!
//! Drive the full load -> edit -> save -> reload cycle against the
//! in-memory store, the same path the CLI takes offline.

use std::sync::Arc;

use mindgraph_client::{GraphStore, MemoryStore};
use mindgraph_core::{Category, Position, RelationKind, Topic, TopicId};
use mindgraph_sync::{load_snapshot, EditorSession};

fn topic(id: &str, title: &str, position: Option<Position>) -> Topic {
    Topic {
        id: TopicId::from(id),
        title: title.to_string(),
        description: Some(format!("{title} notes")),
        category: Category::Concept,
        position,
    }
}

fn seeded_store() -> Arc<MemoryStore> {
    let store = MemoryStore::with_topics(vec![
        topic("rust", "Rust", Some(Position::new(-50.0, 0.0))),
        topic("ownership", "Ownership", Some(Position::new(80.0, 40.0))),
        topic("borrowing", "Borrowing", Some(Position::new(10.0, -90.0))),
    ]);
    store.insert_edge("rust".into(), "ownership".into(), RelationKind::Parent);
    Arc::new(store)
}

#[tokio::test]
async fn test_edit_cycle_roundtrip() {
    let store = seeded_store();
    let mut session = EditorSession::open(store.clone() as Arc<dyn GraphStore>)
        .await
        .unwrap();
    assert!(!session.is_dirty());
    assert_eq!(session.graph().topic_count(), 3);
    assert_eq!(session.graph().edge_count(), 1);

    // Draw an edge and drag a topic, then save.
    session.connect(
        "ownership".into(),
        "borrowing".into(),
        RelationKind::Prerequisite,
    );
    session.move_topic(&"rust".into(), Position::new(-120.0, 35.0));
    assert!(session.is_dirty());

    session.save().await.unwrap();
    assert!(!session.is_dirty());
    assert_eq!(
        store.relation(&"ownership".into(), &"borrowing".into()),
        Some(RelationKind::Prerequisite)
    );
    assert_eq!(
        store.position(&"rust".into()),
        Some(Position::new(-120.0, 35.0))
    );

    // Delete the original edge and save again.
    session.disconnect(&"rust".into(), &"ownership".into());
    session.save().await.unwrap();
    assert!(!store.contains_edge(&"rust".into(), &"ownership".into()));
    assert_eq!(store.edge_count(), 1);
}

#[tokio::test]
async fn test_fallback_positions_reach_the_store() {
    let store = Arc::new(MemoryStore::with_topics(vec![
        topic("a", "A", None),
        topic("b", "B", Some(Position::new(0.0, 0.0))),
        topic("c", "C", Some(Position::new(25.0, 25.0))),
    ]));

    let snapshot = load_snapshot(store.clone() as Arc<dyn GraphStore>)
        .await
        .unwrap();
    assert_eq!(snapshot.backfilled.len(), 2);

    // The detached backfill task persists the computed fallbacks.
    for _ in 0..1000 {
        tokio::task::yield_now().await;
        let done = ["a", "b"]
            .iter()
            .all(|id| store.position(&TopicId::from(*id)).is_some_and(|p| !p.is_unset()));
        if done {
            break;
        }
    }
    for id in ["a", "b"] {
        let persisted = store.position(&TopicId::from(id)).unwrap();
        assert!(!persisted.is_unset());
        assert_eq!(
            Some(persisted),
            snapshot.graph.topic(&TopicId::from(id)).unwrap().position
        );
    }
    // The topic that already had a real position is untouched.
    assert_eq!(
        store.position(&"c".into()),
        Some(Position::new(25.0, 25.0))
    );
}

#[tokio::test]
async fn test_second_session_sees_saved_state() {
    let store = seeded_store();

    let mut first = EditorSession::open(store.clone() as Arc<dyn GraphStore>)
        .await
        .unwrap();
    first.connect("borrowing".into(), "rust".into(), RelationKind::Similar);
    first.move_topic(&"ownership".into(), Position::new(200.0, 200.0));
    first.save().await.unwrap();

    let second = EditorSession::open(store.clone() as Arc<dyn GraphStore>)
        .await
        .unwrap();
    assert!(!second.is_dirty());
    assert_eq!(
        second.graph().relation(&"borrowing".into(), &"rust".into()),
        Some(RelationKind::Similar)
    );
    assert_eq!(
        second
            .graph()
            .topic(&"ownership".into())
            .unwrap()
            .position
            .unwrap()
            .rounded(),
        (200, 200)
    );
}

#[tokio::test]
async fn test_reload_restores_store_state() {
    let store = seeded_store();
    let mut session = EditorSession::open(store.clone() as Arc<dyn GraphStore>)
        .await
        .unwrap();

    session.disconnect(&"rust".into(), &"ownership".into());
    session.connect("borrowing".into(), "ownership".into(), RelationKind::Child);
    assert!(session.is_dirty());

    session.reload().await.unwrap();
    assert!(!session.is_dirty());
    assert_eq!(
        session.graph().relation(&"rust".into(), &"ownership".into()),
        Some(RelationKind::Parent)
    );
    assert!(session
        .graph()
        .relation(&"borrowing".into(), &"ownership".into())
        .is_none());
    // Local edits never reached the store.
    assert_eq!(store.edge_count(), 1);
}
