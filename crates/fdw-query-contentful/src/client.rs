//! Contentful HTTP API client
//!
//! [`ManagementApi`] is the seam between the data sources and the network.
//! [`CmaClient`] implements it with `reqwest` against the Content Management
//! API (or the read-only Content Delivery API, which shares the collection
//! paths used here).

use crate::kind::EntityKind;
use crate::planner::RemoteQuery;
use async_trait::async_trait;
use fdw_query::{DataError, Result};
use futures::stream::BoxStream;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

/// Content Management API host
pub const CMA_API_HOST: &str = "api.contentful.com";

/// Content Delivery API host (read-only)
pub const CDA_API_HOST: &str = "cdn.contentful.com";

/// Largest page the remote API serves
pub const MAX_PAGE_SIZE: u64 = 1000;

pub const DEFAULT_PAGE_SIZE: u64 = 100;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONTENT_TYPE_HEADER: &str = "application/vnd.contentful.management.v1+json";
const VERSION_HEADER: &str = "X-Contentful-Version";
const ENTRY_CONTENT_TYPE_HEADER: &str = "X-Contentful-Content-Type";

/// One page of a collection listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// Remote operations the data sources depend on
#[async_trait]
pub trait ManagementApi: Send + Sync {
    /// Fetch one page of `kind`'s collection filtered by `query`
    async fn list(&self, kind: EntityKind, query: &RemoteQuery, skip: u64, limit: u64)
        -> Result<Page>;

    /// Create an entity, at `id` when given, without a version token
    ///
    /// `content_type` is required by the remote API when creating entries.
    async fn create(
        &self,
        kind: EntityKind,
        id: Option<&str>,
        payload: &Value,
        content_type: Option<&str>,
    ) -> Result<Value>;

    /// Update the entity at `id`, guarded by `version`
    ///
    /// Entry updates carry their `content_type` like entry creation does.
    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        payload: &Value,
        version: i64,
        content_type: Option<&str>,
    ) -> Result<Value>;

    /// Publish the entity at `id`, guarded by `version`
    async fn publish(&self, kind: EntityKind, id: &str, version: i64) -> Result<Value>;

    /// Delete the entity at `id`
    async fn delete(&self, kind: EntityKind, id: &str) -> Result<()>;
}

/// Stream every document of `kind` matching `query`, one page at a time
///
/// A page is fetched only when the previous one has been consumed. The
/// stream ends once `total` documents were seen or a page comes back empty.
pub fn paginate<'a, C>(
    client: &'a C,
    kind: EntityKind,
    query: RemoteQuery,
    page_size: u64,
) -> BoxStream<'a, Result<Value>>
where
    C: ManagementApi + ?Sized,
{
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);

    Box::pin(async_stream::try_stream! {
        let mut skip = 0u64;
        loop {
            let page = client.list(kind, &query, skip, page_size).await?;
            let fetched = page.items.len() as u64;
            debug!(
                "Fetched {} {} (skip {}, total {})",
                fetched,
                kind.collection(),
                skip,
                page.total
            );

            for item in page.items {
                yield item;
            }

            skip += fetched;
            if fetched == 0 || skip >= page.total {
                break;
            }
        }
    })
}

/// reqwest-backed client for one Contentful space
pub struct CmaClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl CmaClient {
    /// Create a client for `space` on `api_host`
    pub fn new(space: &str, access_token: &str, api_host: &str, timeout: Duration) -> Result<Self> {
        Self::with_base_url(
            format!("https://{}/spaces/{}", api_host, space),
            access_token,
            timeout,
        )
    }

    /// Create a client with an explicit space URL
    pub fn with_base_url(
        base_url: impl Into<String>,
        access_token: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            DataError::ConnectionFailed(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
        body: Option<&Value>,
        headers: &[(&str, String)],
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);

        debug!("Contentful API request: {} {}", method, path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Content-Type", CONTENT_TYPE_HEADER);

        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        if !params.is_empty() {
            request = request.query(params);
        }

        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(|e| {
            error!("Contentful API request failed: {}", e);
            DataError::ConnectionFailed(format!("{} {} failed: {}", method, path, e))
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| DataError::ConnectionFailed(format!("Failed to read response: {}", e)))?;

        if !matches!(status, 200 | 201 | 204) {
            error!("{} {} failed ({})", method, path, status);
            return Err(DataError::InvalidRemoteResponse { status, body: text });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl ManagementApi for CmaClient {
    async fn list(
        &self,
        kind: EntityKind,
        query: &RemoteQuery,
        skip: u64,
        limit: u64,
    ) -> Result<Page> {
        let mut params = query.to_params();
        params.push(("skip".to_string(), skip.to_string()));
        params.push(("limit".to_string(), limit.to_string()));

        let path = format!("/{}", kind.collection());
        let body = self.request(Method::GET, &path, &params, None, &[]).await?;

        Ok(serde_json::from_value(body)?)
    }

    async fn create(
        &self,
        kind: EntityKind,
        id: Option<&str>,
        payload: &Value,
        content_type: Option<&str>,
    ) -> Result<Value> {
        let mut headers = Vec::new();
        if let Some(content_type) = content_type {
            headers.push((ENTRY_CONTENT_TYPE_HEADER, content_type.to_string()));
        }

        match id {
            Some(id) => {
                let path = format!("/{}/{}", kind.collection(), id);
                self.request(Method::PUT, &path, &[], Some(payload), &headers)
                    .await
            }
            None => {
                let path = format!("/{}", kind.collection());
                self.request(Method::POST, &path, &[], Some(payload), &headers)
                    .await
            }
        }
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        payload: &Value,
        version: i64,
        content_type: Option<&str>,
    ) -> Result<Value> {
        let path = format!("/{}/{}", kind.collection(), id);
        let mut headers = vec![(VERSION_HEADER, version.to_string())];
        if let Some(content_type) = content_type {
            headers.push((ENTRY_CONTENT_TYPE_HEADER, content_type.to_string()));
        }
        self.request(Method::PUT, &path, &[], Some(payload), &headers)
            .await
    }

    async fn publish(&self, kind: EntityKind, id: &str, version: i64) -> Result<Value> {
        let path = format!("/{}/{}/published", kind.collection(), id);
        let headers = [(VERSION_HEADER, version.to_string())];
        self.request(Method::PUT, &path, &[], None, &headers).await
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<()> {
        let path = format!("/{}/{}", kind.collection(), id);
        self.request(Method::DELETE, &path, &[], None, &[]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_mock_client(mock_server: &MockServer) -> CmaClient {
        CmaClient::with_base_url(
            format!("{}/spaces/space1", mock_server.uri()),
            "test_token_12345",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_base_url() {
        let client = CmaClient::new(
            "cfexampleapi",
            "token",
            CMA_API_HOST,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
        .unwrap();
        assert_eq!(client.base_url(), "https://api.contentful.com/spaces/cfexampleapi");
    }

    #[tokio::test]
    async fn test_list_sends_query_and_paging() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spaces/space1/entries"))
            .and(header("Authorization", "Bearer test_token_12345"))
            .and(query_param("content_type", "blog"))
            .and(query_param("fields.rating[gte]", "3"))
            .and(query_param("skip", "0"))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 1,
                "skip": 0,
                "limit": 100,
                "items": [{"sys": {"id": "e1", "type": "Entry"}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let mut query = RemoteQuery::new();
        query.set("fields.rating[gte]", json!(3));
        query.set("content_type", json!("blog"));

        let page = client
            .list(EntityKind::Entry, &query, 0, DEFAULT_PAGE_SIZE)
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0]["sys"]["id"], "e1");
    }

    #[tokio::test]
    async fn test_paginate_fetches_all_pages() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spaces/space1/assets"))
            .and(query_param("skip", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 3,
                "skip": 0,
                "limit": 2,
                "items": [{"sys": {"id": "a1"}}, {"sys": {"id": "a2"}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/spaces/space1/assets"))
            .and(query_param("skip", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 3,
                "skip": 2,
                "limit": 2,
                "items": [{"sys": {"id": "a3"}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let ids: Vec<String> = paginate(&client, EntityKind::Asset, RemoteQuery::new(), 2)
            .map(|doc| doc.unwrap()["sys"]["id"].as_str().unwrap().to_string())
            .collect()
            .await;

        assert_eq!(ids, vec!["a1", "a2", "a3"]);
    }

    #[tokio::test]
    async fn test_create_entry_with_content_type_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/spaces/space1/entries"))
            .and(header("X-Contentful-Content-Type", "blog"))
            .and(header("Content-Type", CONTENT_TYPE_HEADER))
            .and(body_json(json!({"fields": {"title": {"en-US": "Hello"}}})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "sys": {"id": "new-entry", "type": "Entry", "version": 1}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let created = client
            .create(
                EntityKind::Entry,
                None,
                &json!({"fields": {"title": {"en-US": "Hello"}}}),
                Some("blog"),
            )
            .await
            .unwrap();

        assert_eq!(created["sys"]["id"], "new-entry");
    }

    #[tokio::test]
    async fn test_create_with_id_uses_put_without_version() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/spaces/space1/assets/my-asset"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "sys": {"id": "my-asset", "type": "Asset", "version": 1}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        client
            .create(EntityKind::Asset, Some("my-asset"), &json!({"title": "Cat"}), None)
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("X-Contentful-Version").is_none());
    }

    #[tokio::test]
    async fn test_update_and_publish_send_version() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/spaces/space1/content_types/blog"))
            .and(header("X-Contentful-Version", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sys": {"id": "blog", "type": "ContentType", "version": 3}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/spaces/space1/content_types/blog/published"))
            .and(header("X-Contentful-Version", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sys": {"id": "blog", "type": "ContentType", "version": 4, "publishedVersion": 3}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let updated = client
            .update(EntityKind::ContentType, "blog", &json!({"name": "Blog"}), 2, None)
            .await
            .unwrap();
        assert_eq!(updated["sys"]["version"], 3);

        client
            .publish(EntityKind::ContentType, "blog", 3)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_entry_sends_content_type_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/spaces/space1/entries/e1"))
            .and(header("X-Contentful-Version", "2"))
            .and(header("X-Contentful-Content-Type", "blog"))
            .and(body_json(json!({"fields": {"title": {"en-US": "x"}}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sys": {"id": "e1", "type": "Entry", "version": 3}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let updated = client
            .update(
                EntityKind::Entry,
                "e1",
                &json!({"fields": {"title": {"en-US": "x"}}}),
                2,
                Some("blog"),
            )
            .await
            .unwrap();

        assert_eq!(updated["sys"]["version"], 3);
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/spaces/space1/entries/e1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        client.delete(EntityKind::Entry, "e1").await.unwrap();
    }

    #[tokio::test]
    async fn test_version_conflict_is_invalid_remote_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/spaces/space1/entries/e1"))
            .respond_with(ResponseTemplate::new(409).set_body_string("VersionMismatch"))
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let result = client
            .update(EntityKind::Entry, "e1", &json!({"fields": {}}), 1, Some("blog"))
            .await;

        match result {
            Err(DataError::InvalidRemoteResponse { status, body }) => {
                assert_eq!(status, 409);
                assert_eq!(body, "VersionMismatch");
            }
            other => panic!("expected InvalidRemoteResponse, got {:?}", other),
        }
    }
}
