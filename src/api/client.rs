//! Token-authenticated JSON client shared by the compute, networking and
//! block storage services. Each service gets its own `ServiceClient`
//! bound to that service's endpoint.

use std::time::Duration;

use reqwest::{Client as HttpClient, ClientBuilder, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::error::ApiError;

#[derive(Clone)]
pub struct ServiceClient {
    http: HttpClient,
    base_url: String,
    token: String,
}

impl ServiceClient {
    pub fn new(endpoint: &str, token: &str, insecure: bool) -> Result<Self, ApiError> {
        Url::parse(endpoint).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", endpoint, e)))?;

        let http = ClientBuilder::new()
            .danger_accept_invalid_certs(insecure)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: endpoint.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!("GET {}{}", self.base_url, path);
        let response = self.send(self.http.get(self.url(path))).await?;
        Self::parse(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!("POST {}{}", self.base_url, path);
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        Self::parse(response).await
    }

    /// POST for server actions, where the API answers 202 with no body.
    pub async fn post_empty<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        tracing::debug!("POST {}{}", self.base_url, path);
        self.send(self.http.post(self.url(path)).json(body)).await?;
        Ok(())
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!("PUT {}{}", self.base_url, path);
        let response = self.send(self.http.put(self.url(path)).json(body)).await?;
        Self::parse(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        tracing::debug!("DELETE {}{}", self.base_url, path);
        self.send(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.header("X-Auth-Token", &self.token).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthenticationFailed);
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!("API error response ({}): {}", status, message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Parse(format!("{}: {}", e, text)))
    }
}

/// Query string builder for filtered list endpoints.
#[derive(Debug, Clone, Default)]
pub struct ApiQueryParams {
    params: Vec<(String, String)>,
}

impl ApiQueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn add_optional<K: Into<String>, V: ToString>(self, key: K, value: Option<V>) -> Self {
        match value {
            Some(v) => self.add(key, v),
            None => self,
        }
    }

    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }

        let encoded: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();

        format!("?{}", encoded.join("&"))
    }
}
