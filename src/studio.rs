use crate::{
    config::{ModelOption, SizeOption},
    credentials::Credential,
    error::{Result, StudioError},
    huggingface::InferenceTransport,
    interpreter,
    logger::Timer,
    models::{GenerationRequest, ImageResult, Selection},
};
use std::sync::Arc;
use uuid::Uuid;

/// Where the page is for the current user action.
#[derive(Debug)]
pub enum PageState {
    Idle,
    Requesting {
        request_id: Uuid,
        selection: Selection,
    },
    Displaying {
        selection: Selection,
        result: ImageResult,
    },
    Failed {
        message: String,
    },
}

impl PageState {
    pub fn idle() -> Self {
        PageState::Idle
    }

    /// Generate pressed. Without a credential the page fails immediately.
    pub fn begin(selection: Selection, credential: Option<&Credential>) -> Self {
        match credential {
            Some(_) => PageState::Requesting {
                request_id: Uuid::new_v4(),
                selection,
            },
            None => PageState::Failed {
                message: StudioError::MissingCredential.to_string(),
            },
        }
    }

    pub fn finish(self, outcome: Result<ImageResult>) -> Self {
        match self {
            PageState::Requesting { selection, .. } => match outcome {
                Ok(result) => PageState::Displaying { selection, result },
                Err(e) => PageState::Failed {
                    message: e.to_string(),
                },
            },
            other => other,
        }
    }

    /// The next user action starts over.
    pub fn reset(self) -> Self {
        PageState::Idle
    }

    pub fn request_id(&self) -> Option<Uuid> {
        match self {
            PageState::Requesting { request_id, .. } => Some(*request_id),
            _ => None,
        }
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self, PageState::Requesting { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            PageState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Runs one generation: credential check, payload, remote call, interpretation.
#[derive(Clone)]
pub struct Studio {
    transport: Arc<dyn InferenceTransport>,
}

impl Studio {
    pub fn new(transport: impl InferenceTransport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn from_arc(transport: Arc<dyn InferenceTransport>) -> Self {
        Self { transport }
    }

    pub fn select(model_label: &str, size_label: &str) -> Result<Selection> {
        let model = ModelOption::find(model_label).ok_or_else(|| {
            StudioError::ConfigError(format!("modello sconosciuto '{}'", model_label))
        })?;
        let size = SizeOption::find(size_label).ok_or_else(|| {
            StudioError::ConfigError(format!("formato sconosciuto '{}'", size_label))
        })?;
        Ok(Selection { model, size })
    }

    /// Pipeline entry point. The transport is never touched without a credential.
    pub async fn generate(
        &self,
        selection: Selection,
        prompt: &str,
        credential: Option<&Credential>,
    ) -> Result<ImageResult> {
        let credential = credential.ok_or(StudioError::MissingCredential)?;
        let request_id = Uuid::new_v4();
        self.run(request_id, selection, prompt, credential).await
    }

    /// Drives the page state machine for one generate action.
    pub async fn submit(
        &self,
        selection: Selection,
        prompt: &str,
        credential: Option<&Credential>,
    ) -> PageState {
        let state = PageState::begin(selection, credential);
        let (Some(request_id), Some(credential)) = (state.request_id(), credential) else {
            log::warn!("⚠️  Generate pressed without a token, skipping request");
            return state;
        };

        let outcome = self.run(request_id, selection, prompt, credential).await;
        state.finish(outcome)
    }

    async fn run(
        &self,
        request_id: Uuid,
        selection: Selection,
        prompt: &str,
        credential: &Credential,
    ) -> Result<ImageResult> {
        let request = GenerationRequest::new(prompt, selection.size);
        log::info!(
            "🎨 Sto chiedendo a {} di disegnare... [req:{}] {}x{}",
            selection.model.label,
            request_id,
            request.width,
            request.height
        );

        let response = {
            let _timer = Timer::new(&format!("inference [req:{}]", request_id));
            self.transport
                .call(selection.model.endpoint, credential, &request.payload())
                .await
        };

        let outcome = response.and_then(|raw| interpreter::interpret_response(&raw));
        match &outcome {
            Ok(result) => log::info!(
                "✅ Creazione completata! [req:{}] {}x{}",
                request_id,
                result.width(),
                result.height()
            ),
            Err(e) => log::error!(
                "❌ Generation failed [req:{}] ({}): {}",
                request_id,
                e.kind(),
                e
            ),
        }
        outcome
    }
}
