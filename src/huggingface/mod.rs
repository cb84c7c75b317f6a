pub mod inference_client;

use crate::{credentials::Credential, error::Result, models::{InferencePayload, RawResponse}};
use async_trait::async_trait;

pub use inference_client::HuggingFaceClient;

/// Sends one payload to one endpoint and hands back the body untouched.
#[async_trait]
pub trait InferenceTransport: Send + Sync {
    async fn call(
        &self,
        endpoint: &str,
        credential: &Credential,
        payload: &InferencePayload,
    ) -> Result<RawResponse>;
}
