//! Unit tests for mindgraph-client

use mindgraph_core::{Category, Position, RelationKind, Topic, TopicId};
use reqwest::StatusCode;

use crate::http::decode_body;
use crate::store::{GraphStore, StoreError};
use crate::{MemoryStore, Session};

fn topic(id: &str, title: &str) -> Topic {
    Topic {
        id: TopicId::from(id),
        title: title.to_string(),
        description: None,
        category: Category::Concept,
        position: Some(Position::new(1.0, 2.0)),
    }
}

#[test]
fn test_session_lifecycle() {
    let mut session = Session::authenticated("tok-123");
    assert!(session.is_authenticated());
    assert_eq!(session.bearer_token(), Some("tok-123"));

    session.clear();
    assert!(!session.is_authenticated());
    assert_eq!(session.bearer_token(), None);

    assert!(!Session::anonymous().is_authenticated());
}

#[test]
fn test_decode_enveloped_payload() {
    let body = r#"{"success": true, "message": "ok", "data": [1, 2, 3]}"#;
    let data: Vec<u32> = decode_body(StatusCode::OK, body).unwrap();
    assert_eq!(data, vec![1, 2, 3]);
}

#[test]
fn test_decode_bare_payload() {
    // Older endpoints skip the envelope entirely.
    let body = r#"[4, 5]"#;
    let data: Vec<u32> = decode_body(StatusCode::OK, body).unwrap();
    assert_eq!(data, vec![4, 5]);
}

#[test]
fn test_decode_success_false_is_api_error() {
    let body = r#"{"success": false, "message": "edge already exists"}"#;
    let err = decode_body::<Vec<u32>>(StatusCode::OK, body).unwrap_err();
    match err {
        StoreError::Api(message) => assert_eq!(message, "edge already exists"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn test_decode_http_error_carries_message() {
    let body = r#"{"message": "Could not validate credentials"}"#;
    let err = decode_body::<Vec<u32>>(StatusCode::UNAUTHORIZED, body).unwrap_err();
    match err {
        StoreError::Api(message) => assert_eq!(message, "Could not validate credentials"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn test_decode_http_error_without_body() {
    let err = decode_body::<Vec<u32>>(StatusCode::INTERNAL_SERVER_ERROR, "").unwrap_err();
    match err {
        StoreError::Api(message) => assert!(message.contains("500")),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn test_memory_store_edge_rules() {
    tokio_test::block_on(async {
        let store = MemoryStore::with_topics(vec![topic("a", "A"), topic("b", "B")]);

        store
            .create_edge(&"a".into(), &"b".into(), RelationKind::Follows)
            .await
            .unwrap();

        // Duplicate ordered pair is rejected; the reverse pair is fine.
        let err = store
            .create_edge(&"a".into(), &"b".into(), RelationKind::Related)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEdge(_, _)));
        store
            .create_edge(&"b".into(), &"a".into(), RelationKind::Related)
            .await
            .unwrap();

        // Self edges and unknown endpoints are rejected.
        let err = store
            .create_edge(&"a".into(), &"a".into(), RelationKind::Related)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidEdge(_)));
        let err = store
            .create_edge(&"a".into(), &"ghost".into(), RelationKind::Related)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownTopic(_)));

        assert_eq!(store.edge_count(), 2);
    });
}

#[test]
fn test_memory_store_outgoing_edges() {
    tokio_test::block_on(async {
        let store = MemoryStore::with_topics(vec![topic("a", "A"), topic("b", "B"), topic("c", "C")]);
        store.insert_edge("a".into(), "b".into(), RelationKind::Follows);
        store.insert_edge("a".into(), "c".into(), RelationKind::Similar);
        store.insert_edge("b".into(), "c".into(), RelationKind::Related);

        let edges = store.list_outgoing_edges(&"a".into()).await.unwrap();
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|e| e.target == "b".into() || e.target == "c".into()));

        let err = store.list_outgoing_edges(&"ghost".into()).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownTopic(_)));
    });
}

#[test]
fn test_memory_store_delete_and_update() {
    tokio_test::block_on(async {
        let store = MemoryStore::with_topics(vec![topic("a", "A"), topic("b", "B")]);
        store.insert_edge("a".into(), "b".into(), RelationKind::Follows);

        store.delete_edge(&"a".into(), &"b".into()).await.unwrap();
        let err = store.delete_edge(&"a".into(), &"b".into()).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingEdge(_, _)));

        store
            .update_position(&"a".into(), Position::new(42.0, -7.0))
            .await
            .unwrap();
        assert_eq!(store.position(&"a".into()), Some(Position::new(42.0, -7.0)));

        let err = store
            .update_position(&"ghost".into(), Position::new(0.0, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownTopic(_)));
    });
}
