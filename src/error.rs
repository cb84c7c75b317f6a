use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("🛑 Manca il Token! Inseriscilo nei Secrets o nella barra laterale.")]
    MissingCredential,

    #[error("Selezione non valida: {0}")]
    ConfigError(String),

    #[error("Richiesta non valida: {0}")]
    FormError(String),

    #[error("Qualcosa è andato storto: {0}")]
    TransportError(String),

    #[error("Errore dal server: {0}")]
    RemoteError(String),

    #[error("Qualcosa è andato storto: {0}")]
    DecodeError(String),

    #[error("Qualcosa è andato storto: {0}")]
    EncodeError(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StudioError {
    /// Short machine-friendly name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            StudioError::MissingCredential => "missing_credential",
            StudioError::ConfigError(_) => "config",
            StudioError::FormError(_) => "form",
            StudioError::TransportError(_) => "transport",
            StudioError::RemoteError(_) => "remote",
            StudioError::DecodeError(_) => "decode",
            StudioError::EncodeError(_) => "encode",
            StudioError::TemplateError(_) => "template",
            StudioError::Io(_) => "io",
        }
    }
}

impl From<reqwest::Error> for StudioError {
    fn from(e: reqwest::Error) -> Self {
        StudioError::TransportError(e.to_string())
    }
}

impl From<image::ImageError> for StudioError {
    fn from(e: image::ImageError) -> Self {
        StudioError::DecodeError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
