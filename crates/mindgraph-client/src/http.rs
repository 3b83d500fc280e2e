//! HTTP implementation of the graph store

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use async_trait::async_trait;
use mindgraph_core::{Category, Position, RelationKind, Topic, TopicId};

use crate::session::Session;
use crate::store::{GraphStore, OutgoingEdge, StoreError};

/// Client for the topic-graph REST API.
///
/// Endpoints follow the NeuroNotes shape: `topics/`, `topics/{id}/edges`,
/// `topics/topic-edges`, with every payload wrapped in a
/// `{success, message, data}` envelope.
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    session: Session,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct TopicDto {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    node_type: Option<String>,
    #[serde(default)]
    position: Option<PositionDto>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PositionDto {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct EdgeDto {
    #[serde(alias = "target_topic_id")]
    target: String,
    #[serde(default)]
    relation_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateEdgeDto<'a> {
    source: &'a str,
    target: &'a str,
    relation_type: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdatePositionDto {
    position: PositionDto,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        HttpStore {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}/{}", self.base_url, path));
        if let Some(token) = self.session.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn take_data<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let status = response.status();
        let body = response.text().await?;
        decode_body(status, &body)
    }
}

/// Unwrap the `{success, message, data}` envelope. Non-2xx and
/// `success == false` both become opaque [`StoreError::Api`]; payloads that
/// arrive without the envelope are accepted as-is.
pub(crate) fn decode_body<T: serde::de::DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<T, StoreError> {
    if !status.is_success() {
        let message = serde_json::from_str::<Envelope<serde_json::Value>>(body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        return Err(StoreError::Api(message));
    }

    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))?;
    if envelope.success == Some(false) {
        return Err(StoreError::Api(
            envelope
                .message
                .unwrap_or_else(|| "request failed".to_string()),
        ));
    }
    match envelope.data {
        Some(data) => Ok(data),
        // Older endpoints return the payload bare.
        None => serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string())),
    }
}

fn topic_from_dto(dto: TopicDto) -> Topic {
    Topic {
        id: TopicId::new(dto.id),
        title: dto.title,
        description: dto.description,
        category: Category::from_label(dto.node_type.as_deref()),
        position: dto.position.map(|p| Position::new(p.x, p.y)),
    }
}

/// Stored relation labels are free-form; anything outside the closed set
/// falls back to the default kind.
fn kind_from_label(label: Option<&str>) -> RelationKind {
    match label {
        Some(label) => label.parse().unwrap_or_else(|_| {
            tracing::debug!(label, "unknown relation label; treating as related");
            RelationKind::default()
        }),
        None => RelationKind::default(),
    }
}

#[async_trait]
impl GraphStore for HttpStore {
    async fn list_topics(&self) -> Result<Vec<Topic>, StoreError> {
        let response = self.request(Method::GET, "topics/").send().await?;
        let dtos: Vec<TopicDto> = Self::take_data(response).await?;
        Ok(dtos.into_iter().map(topic_from_dto).collect())
    }

    async fn list_outgoing_edges(&self, id: &TopicId) -> Result<Vec<OutgoingEdge>, StoreError> {
        let response = self
            .request(Method::GET, &format!("topics/{id}/edges"))
            .send()
            .await?;
        let dtos: Vec<EdgeDto> = Self::take_data(response).await?;
        Ok(dtos
            .into_iter()
            .map(|dto| OutgoingEdge {
                target: TopicId::new(dto.target),
                kind: kind_from_label(dto.relation_type.as_deref()),
            })
            .collect())
    }

    async fn create_edge(
        &self,
        source: &TopicId,
        target: &TopicId,
        kind: RelationKind,
    ) -> Result<(), StoreError> {
        let payload = CreateEdgeDto {
            source: source.as_str(),
            target: target.as_str(),
            relation_type: kind.as_str(),
        };
        let response = self
            .request(Method::POST, "topics/topic-edges")
            .json(&payload)
            .send()
            .await?;
        Self::take_data::<serde_json::Value>(response).await?;
        Ok(())
    }

    async fn delete_edge(&self, source: &TopicId, target: &TopicId) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE, &format!("topics/topic-edges/{source}/{target}"))
            .send()
            .await?;
        Self::take_data::<serde_json::Value>(response).await?;
        Ok(())
    }

    async fn update_position(&self, id: &TopicId, position: Position) -> Result<(), StoreError> {
        let payload = UpdatePositionDto {
            position: PositionDto {
                x: position.x,
                y: position.y,
            },
        };
        let response = self
            .request(Method::PATCH, &format!("topics/{id}"))
            .json(&payload)
            .send()
            .await?;
        Self::take_data::<serde_json::Value>(response).await?;
        Ok(())
    }
}
