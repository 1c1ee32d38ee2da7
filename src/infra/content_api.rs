//! Reqwest-backed client for the content API.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url, header::HeaderValue};
use serde::Deserialize;
use serde_json::json;

use crate::application::repos::{ContentRepo, RepoError};
use crate::config::ContentApiSettings;
use crate::domain::articles::Article;
use crate::infra::error::InfraError;

/// Static key header every request carries.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Both GET endpoints wrap their payload in `{ "data": … }`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// `POST /addSub` signals success through the body, not the HTTP status.
#[derive(Debug, Deserialize)]
struct SubscribeReply {
    status_code: u16,
}

#[derive(Clone)]
pub struct ContentApiClient {
    client: Client,
    base: Url,
    api_key: String,
}

impl ContentApiClient {
    pub fn new(settings: &ContentApiSettings) -> Result<Self, InfraError> {
        let base = settings
            .base_url
            .clone()
            .ok_or_else(|| InfraError::configuration("content_api.base_url is not configured"))?;
        let api_key = settings
            .api_key
            .clone()
            .ok_or_else(|| InfraError::configuration("content_api.api_key is not configured"))?;

        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(settings.timeout)
            .build()
            .map_err(|err| {
                InfraError::configuration(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(Self {
            client,
            base,
            api_key,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("briefin/", env!("CARGO_PKG_VERSION"))
    }

    fn key_header(&self) -> Result<HeaderValue, RepoError> {
        HeaderValue::from_str(&self.api_key)
            .map_err(|err| RepoError::transport(format!("invalid API key header: {err}")))
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, RepoError> {
        let mut url = self
            .base
            .join(path)
            .map_err(|err| RepoError::transport(format!("invalid request URL: {err}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response, RepoError> {
        let url = self.url(path, query)?;
        self.client
            .get(url)
            .header(API_KEY_HEADER, self.key_header()?)
            .send()
            .await
            .map_err(|err| RepoError::transport(err.to_string()))
    }

    async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, RepoError> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| RepoError::transport(err.to_string()))?;

        if !status.is_success() {
            return Err(RepoError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        serde_json::from_slice(&bytes).map_err(|err| RepoError::decode(err.to_string()))
    }
}

#[async_trait]
impl ContentRepo for ContentApiClient {
    async fn fetch_article(&self, title: &str) -> Result<Option<Article>, RepoError> {
        let response = self.get("getData", &[("title", title)]).await?;

        // The API answers 404 for unknown titles; some deployments answer
        // 200 with a null payload instead. Both mean "no such article".
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: Envelope<Option<Article>> = Self::decode(response).await?;
        Ok(envelope.data)
    }

    async fn fetch_all_articles(&self) -> Result<Vec<Article>, RepoError> {
        let response = self.get("getAllData", &[]).await?;
        let envelope: Envelope<Vec<Article>> = Self::decode(response).await?;
        Ok(envelope.data)
    }

    async fn add_subscriber(&self, email: &str) -> Result<u16, RepoError> {
        let url = self.url("addSub", &[])?;
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, self.key_header()?)
            .json(&json!({ "submail": email }))
            .send()
            .await
            .map_err(|err| RepoError::transport(err.to_string()))?;

        let reply: SubscribeReply = Self::decode(response).await?;
        Ok(reply.status_code)
    }
}
