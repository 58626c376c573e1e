use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::client::{endpoints, GuestApi};
use crate::api::error::ApiError;
use crate::api::models::{
    EntourageMember, GuestRecord, GuestRequest, GuestUpdate, PrincipalSponsor,
};

/// reqwest-backed implementation of [`GuestApi`]
#[derive(Clone)]
pub struct HttpGuestApi {
    base_url: String,
    client: Client,
}

impl HttpGuestApi {
    /// Build a client for `base_url`. `timeout` is off unless configured.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::Config("API base URL is empty".to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| ApiError::transport(path, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::transport(path, e))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::decode(path, e))
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::transport(path, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl GuestApi for HttpGuestApi {
    async fn list_guests(&self) -> Result<Vec<GuestRecord>, ApiError> {
        self.get_json(endpoints::GUESTS).await
    }

    async fn update_guest(&self, update: &GuestUpdate) -> Result<(), ApiError> {
        tracing::debug!(original_name = %update.original_name, rsvp = %update.rsvp, "Updating guest");
        self.send_json(Method::PUT, endpoints::GUESTS, update).await
    }

    async fn create_guest_request(&self, request: &GuestRequest) -> Result<(), ApiError> {
        tracing::debug!(name = %request.name, "Submitting guest request");
        self.send_json(Method::POST, endpoints::GUEST_REQUESTS, request)
            .await
    }

    async fn list_entourage(&self) -> Result<Vec<EntourageMember>, ApiError> {
        self.get_json(endpoints::ENTOURAGE).await
    }

    async fn list_principal_sponsors(&self) -> Result<Vec<PrincipalSponsor>, ApiError> {
        self.get_json(endpoints::PRINCIPAL_SPONSOR).await
    }
}
