//! Wimbly Studio: pick a hosted image model and a preset size, send a prompt,
//! preview and download the generated image.

pub mod config;
pub mod credentials;
pub mod error;
pub mod huggingface;
pub mod interpreter;
pub mod logger;
pub mod models;
#[cfg(feature = "server")]
pub mod server;
pub mod studio;

pub use config::{ModelOption, SizeOption, StudioConfig, MODELS, SIZES};
pub use credentials::{
    Credential, CredentialResolver, CredentialSource, EnvSecretStore, MapSecretStore, SecretStore,
};
pub use error::{Result, StudioError};
pub use huggingface::{HuggingFaceClient, InferenceTransport};
pub use interpreter::{interpret, interpret_response};
pub use models::*;
pub use studio::{PageState, Studio};
