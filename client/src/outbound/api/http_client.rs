//! Reqwest-backed complaints API adapter.
//!
//! This adapter owns transport details only: endpoint selection, bearer
//! header attachment, JSON decoding into domain records, and HTTP error
//! mapping. Retry, rollback, and cache reconciliation live with the callers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::json;

use super::dto::{AuthResponseDto, ListResponseDto, MessageDto, MutationResponseDto};
use crate::domain::auth::{LoginCredentials, RegistrationForm};
use crate::domain::authorization::ListScope;
use crate::domain::complaint::{ComplaintId, ComplaintRecord};
use crate::domain::ports::{ComplaintPayload, ComplaintsApi, ComplaintsApiError};
use crate::domain::session::{AuthToken, AuthenticatedUser};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Complaints API adapter performing HTTP requests against one base URL.
#[derive(Debug, Clone)]
pub struct HttpComplaintsApi {
    client: Client,
    base_url: Url,
}

impl HttpComplaintsApi {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ComplaintsApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}"))
            .map_err(|error| ComplaintsApiError::transport(error.to_string()))
    }

    async fn read_body(
        response: reqwest::Response,
    ) -> Result<(StatusCode, Vec<u8>), ComplaintsApiError> {
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok((status, body.to_vec()))
    }

    async fn expect_success(
        response: reqwest::Response,
    ) -> Result<Vec<u8>, ComplaintsApiError> {
        let (status, body) = Self::read_body(response).await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(map_status_error(status, &body))
        }
    }
}

#[async_trait]
impl ComplaintsApi for HttpComplaintsApi {
    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, ComplaintsApiError> {
        let body = json!({
            "email": credentials.email(),
            "password": credentials.password(),
        });
        let response = self
            .client
            .post(self.endpoint("auth/login")?)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let bytes = Self::expect_success(response).await?;
        decode::<AuthResponseDto>(&bytes)?
            .into_domain()
            .map_err(ComplaintsApiError::decode)
    }

    async fn signup(
        &self,
        form: &RegistrationForm,
    ) -> Result<AuthenticatedUser, ComplaintsApiError> {
        let body = json!({
            "name": form.name(),
            "email": form.email(),
            "password": form.password(),
            "role": form.role(),
        });
        let response = self
            .client
            .post(self.endpoint("auth/signup")?)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let bytes = Self::expect_success(response).await?;
        decode::<AuthResponseDto>(&bytes)?
            .into_domain()
            .map_err(ComplaintsApiError::decode)
    }

    async fn list(
        &self,
        token: &AuthToken,
        scope: ListScope,
    ) -> Result<Vec<ComplaintRecord>, ComplaintsApiError> {
        let response = self
            .client
            .get(self.endpoint(scope_path(scope))?)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(map_transport_error)?;
        let bytes = Self::expect_success(response).await?;
        decode::<ListResponseDto>(&bytes)?
            .into_domain()
            .map_err(ComplaintsApiError::decode)
    }

    async fn create(
        &self,
        token: &AuthToken,
        payload: &ComplaintPayload,
    ) -> Result<ComplaintRecord, ComplaintsApiError> {
        let response = self
            .client
            .post(self.endpoint("complaints")?)
            .bearer_auth(token.as_str())
            .json(payload)
            .send()
            .await
            .map_err(map_transport_error)?;
        let bytes = Self::expect_success(response).await?;
        decode::<MutationResponseDto>(&bytes)?
            .into_domain()
            .map_err(ComplaintsApiError::decode)
    }

    async fn update(
        &self,
        token: &AuthToken,
        id: &ComplaintId,
        payload: &ComplaintPayload,
    ) -> Result<ComplaintRecord, ComplaintsApiError> {
        let response = self
            .client
            .put(self.endpoint(&format!("complaints/{id}"))?)
            .bearer_auth(token.as_str())
            .json(payload)
            .send()
            .await
            .map_err(map_transport_error)?;
        let bytes = Self::expect_success(response).await?;
        decode::<MutationResponseDto>(&bytes)?
            .into_domain()
            .map_err(ComplaintsApiError::decode)
    }

    async fn delete(
        &self,
        token: &AuthToken,
        id: &ComplaintId,
    ) -> Result<(), ComplaintsApiError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("complaints/{id}"))?)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(map_transport_error)?;
        // A 200 with no body is a valid delete response.
        Self::expect_success(response).await.map(|_| ())
    }
}

const fn scope_path(scope: ListScope) -> &'static str {
    match scope {
        ListScope::AllRecords => "complaints/all",
        ListScope::MySubmissions => "complaints/supplier",
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ComplaintsApiError> {
    serde_json::from_slice(body)
        .map_err(|error| ComplaintsApiError::decode(format!("invalid JSON payload: {error}")))
}

fn extract_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<MessageDto>(body)
        .ok()
        .and_then(|dto| dto.message)
        .filter(|message| !message.trim().is_empty())
}

fn map_transport_error(error: reqwest::Error) -> ComplaintsApiError {
    ComplaintsApiError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ComplaintsApiError {
    let message = extract_message(body).unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED => ComplaintsApiError::unauthenticated(message),
        StatusCode::FORBIDDEN => ComplaintsApiError::forbidden(message),
        _ => ComplaintsApiError::api(message),
    }
}
