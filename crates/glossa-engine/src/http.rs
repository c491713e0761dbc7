//! reqwest implementation of [`DictionaryBackend`].

use crate::backend::{BackendError, DictionaryBackend};
use async_trait::async_trait;
use glossa_common::protocol::{
    DictionaryWords, ErrorDetail, LoginRequest, SearchRequest, SearchResult, SessionStatus,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Creates a backend rooted at `base_url` with its own cookie jar.
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let mut base_url = Url::parse(base_url).map_err(|e| {
            BackendError::Validation(format!("Invalid API URL '{base_url}': {e}"))
        })?;
        // Url::join replaces the last path segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| BackendError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::Validation(format!("Invalid endpoint '{path}': {e}")))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<ErrorDetail>()
        .await
        .ok()
        .and_then(|body| body.detail);
    debug!("Request failed with status {}: {:?}", status, detail);

    if status == StatusCode::UNAUTHORIZED {
        Err(BackendError::Unauthorized { detail })
    } else {
        Err(BackendError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    response
        .json::<T>()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

#[async_trait]
impl DictionaryBackend for HttpBackend {
    async fn validate_session(&self) -> Result<SessionStatus, BackendError> {
        let url = self.endpoint("validate-session")?;
        let response = self.send(self.client.get(url)).await?;
        decode(response).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<(), BackendError> {
        let url = self.endpoint("token")?;
        let form = LoginRequest { username, password };
        self.send(self.client.post(url).form(&form)).await?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), BackendError> {
        let url = self.endpoint("logout")?;
        self.send(self.client.post(url).json(&serde_json::json!({})))
            .await?;
        Ok(())
    }

    async fn search(&self, word: &str) -> Result<SearchResult, BackendError> {
        let url = self.endpoint("search")?;
        let body = SearchRequest {
            word: word.to_string(),
        };
        let response = self.send(self.client.post(url).json(&body)).await?;
        decode(response).await
    }

    async fn dictionary_words(&self) -> Result<Vec<String>, BackendError> {
        let url = self.endpoint("dictionary-words")?;
        let response = self.send(self.client.get(url)).await?;
        let body: DictionaryWords = decode(response).await?;
        Ok(body.words)
    }
}
