use std::env;

pub const PAGE_TITLE: &str = "Wimbly Studio BETA";
pub const DEFAULT_PROMPT: &str = "Un astronauta che cavalca un cavallo su Marte, fotorealistico, 8k, illuminazione cinematografica";
pub const SECRET_KEY: &str = "HF_TOKEN";
pub const DOWNLOAD_FILE_NAME: &str = "wimblyfile.png";
pub const DOWNLOAD_MIME: &str = "image/png";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8501;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    pub label: &'static str,
    pub endpoint: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeOption {
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Hosted models offered in the selector. The first entry is the default.
pub static MODELS: [ModelOption; 3] = [
    ModelOption {
        label: "🚀 Flux Schnell (Veloce & Realistico)",
        endpoint: "https://router.huggingface.co/hf-inference/models/black-forest-labs/FLUX.1-schnell",
    },
    ModelOption {
        label: "🎨 Stable Diffusion XL (Artistico)",
        endpoint: "https://router.huggingface.co/hf-inference/models/stabilityai/stable-diffusion-xl-base-1.0",
    },
    ModelOption {
        label: "👾 Animagine XL (Stile Anime)",
        endpoint: "https://router.huggingface.co/hf-inference/models/cagliostrolab/animagine-xl-3.1",
    },
];

/// Output presets. The first entry is the default.
pub static SIZES: [SizeOption; 4] = [
    SizeOption {
        label: "Quadrato (1:1 - Instagram)",
        width: 1024,
        height: 1024,
    },
    SizeOption {
        label: "Paesaggio (16:9 - YouTube)",
        width: 1280,
        height: 720,
    },
    SizeOption {
        label: "Ritratto (9:16 - TikTok/Stories)",
        width: 720,
        height: 1280,
    },
    SizeOption {
        label: "Standard (4:3)",
        width: 1024,
        height: 768,
    },
];

impl ModelOption {
    pub fn find(label: &str) -> Option<&'static ModelOption> {
        MODELS.iter().find(|m| m.label == label)
    }

    pub fn default_option() -> &'static ModelOption {
        &MODELS[0]
    }
}

impl SizeOption {
    pub fn find(label: &str) -> Option<&'static SizeOption> {
        SIZES.iter().find(|s| s.label == label)
    }

    pub fn default_option() -> &'static SizeOption {
        &SIZES[0]
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub host: String,
    pub port: u16,
    pub secret_key: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            secret_key: SECRET_KEY.to_string(),
        }
    }
}

impl StudioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the bind address from `HOST`/`PORT`. Call `dotenv::dotenv()` first
    /// if a `.env` file should be honoured.
    pub fn from_env() -> Self {
        let host = env::var("HOST")
            .ok()
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        StudioConfig {
            host,
            port,
            secret_key: SECRET_KEY.to_string(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = key.into();
        self
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
