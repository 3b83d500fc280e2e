//! CLI command implementations

use std::sync::Arc;

use anyhow::bail;
use mindgraph_client::{GraphStore, HttpStore, MemoryStore, Session};
use mindgraph_core::{Category, Position, RelationKind, Topic, TopicId};
use mindgraph_sync::{load_snapshot, EditorSession};

/// Build the store from CLI configuration. Without an API URL the tool runs
/// against an in-memory demo graph so it works offline.
fn build_store(api_url: Option<String>, token: Option<String>) -> Arc<dyn GraphStore> {
    match api_url {
        Some(url) => {
            let session = match token {
                Some(token) => Session::authenticated(token),
                None => Session::anonymous(),
            };
            Arc::new(HttpStore::new(url, session))
        }
        None => {
            tracing::info!("no API URL configured; using in-memory demo graph");
            Arc::new(demo_store())
        }
    }
}

fn demo_store() -> MemoryStore {
    let topic = |id: &str, title: &str, category: Category| Topic {
        id: TopicId::from(id),
        title: title.to_string(),
        description: None,
        category,
        position: None,
    };
    let store = MemoryStore::with_topics(vec![
        topic("ownership", "Ownership", Category::Concept),
        topic("borrowing", "Borrowing", Category::Concept),
        topic("lifetimes", "Lifetimes", Category::Concept),
        topic("async", "Async Rust", Category::Skill),
        topic("web-service", "Build a web service", Category::Project),
    ]);
    store.insert_edge(
        "ownership".into(),
        "borrowing".into(),
        RelationKind::Prerequisite,
    );
    store.insert_edge("borrowing".into(), "lifetimes".into(), RelationKind::Follows);
    store
}

/// Resolve a CLI argument to a topic id: exact id first, then exact title.
fn resolve_topic(session: &EditorSession, arg: &str) -> anyhow::Result<TopicId> {
    let graph = session.graph();
    let id = TopicId::from(arg);
    if graph.contains_topic(&id) {
        return Ok(id);
    }
    let mut matches = graph.topics().filter(|t| t.title == arg);
    match (matches.next(), matches.next()) {
        (Some(topic), None) => Ok(topic.id.clone()),
        (Some(_), Some(_)) => bail!("title '{arg}' is ambiguous; use the topic id"),
        (None, _) => bail!("no topic with id or title '{arg}'"),
    }
}

pub async fn show(api_url: Option<String>, token: Option<String>) -> anyhow::Result<()> {
    let store = build_store(api_url, token);
    let snapshot = load_snapshot(store).await?;

    println!(
        "{} topics, {} edges",
        snapshot.graph.topic_count(),
        snapshot.graph.edge_count()
    );
    if !snapshot.backfilled.is_empty() {
        println!(
            "{} topics had no stored position and were placed on a circle",
            snapshot.backfilled.len()
        );
    }

    for topic in snapshot.graph.topics() {
        let (x, y) = topic.position.map(|p| p.rounded()).unwrap_or((0, 0));
        println!(
            "  [{}] {} at ({}, {})  id={}",
            topic.category, topic.title, x, y, topic.id
        );
    }
    for (key, kind) in snapshot.graph.edges() {
        let arrow = if kind.is_bidirectional() { "<->" } else { "-->" };
        println!("  {} {} {}  ({})", key.source, arrow, key.target, kind);
    }
    Ok(())
}

pub async fn connect(
    api_url: Option<String>,
    token: Option<String>,
    source: String,
    target: String,
    kind: RelationKind,
) -> anyhow::Result<()> {
    let store = build_store(api_url, token);
    let mut session = EditorSession::open(store).await?;

    let source = resolve_topic(&session, &source)?;
    let target = resolve_topic(&session, &target)?;
    session.connect(source.clone(), target.clone(), kind);

    let diff = session.save().await?;
    if diff.is_empty() {
        // Re-connecting an existing pair changes only the kind, which the
        // diff does not track; nothing reached the store.
        println!("{source} -> {target} already connected; nothing saved");
    } else {
        println!("connected {source} -> {target} ({kind})");
    }
    Ok(())
}

pub async fn disconnect(
    api_url: Option<String>,
    token: Option<String>,
    source: String,
    target: String,
) -> anyhow::Result<()> {
    let store = build_store(api_url, token);
    let mut session = EditorSession::open(store).await?;

    let source = resolve_topic(&session, &source)?;
    let target = resolve_topic(&session, &target)?;
    if session.disconnect(&source, &target).is_none() {
        bail!("no edge {source} -> {target}");
    }

    session.save().await?;
    println!("disconnected {source} -> {target}");
    Ok(())
}

pub async fn move_topic(
    api_url: Option<String>,
    token: Option<String>,
    id: String,
    x: f64,
    y: f64,
) -> anyhow::Result<()> {
    let store = build_store(api_url, token);
    let mut session = EditorSession::open(store).await?;

    let id = resolve_topic(&session, &id)?;
    session.move_topic(&id, Position::new(x, y));

    let diff = session.save().await?;
    if diff.is_empty() {
        println!("{id} is already at ({x}, {y}) (to the nearest pixel)");
    } else {
        println!("moved {id} to ({x}, {y})");
    }
    Ok(())
}
