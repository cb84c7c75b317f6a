use super::InferenceTransport;
use crate::{
    credentials::Credential,
    error::{Result, StudioError},
    models::{InferencePayload, RawResponse},
};
use async_trait::async_trait;
use reqwest::{header, Client};

/// Hosted inference over HTTPS. No timeout and no retry: a request either
/// completes or fails with a transport error.
#[derive(Clone, Default)]
pub struct HuggingFaceClient {
    client: Client,
}

impl HuggingFaceClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InferenceTransport for HuggingFaceClient {
    async fn call(
        &self,
        endpoint: &str,
        credential: &Credential,
        payload: &InferencePayload,
    ) -> Result<RawResponse> {
        log::info!("Invoking endpoint: {}", endpoint);
        log::debug!(
            "Inference payload: {} prompt chars, {}x{}",
            payload.inputs.chars().count(),
            payload.parameters.width,
            payload.parameters.height
        );

        let response = self
            .client
            .post(endpoint)
            .header(header::AUTHORIZATION, credential.bearer_header())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Inference request failed: {}", e);
                StudioError::TransportError(e.to_string())
            })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        let bytes = response.bytes().await?;
        log::debug!("Endpoint answered {} with {} bytes", status, bytes.len());

        Ok(RawResponse {
            bytes: bytes.to_vec(),
            status,
            content_type,
        })
    }
}
