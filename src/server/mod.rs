pub mod handlers;
pub mod view;

use crate::{
    config::StudioConfig,
    credentials::CredentialResolver,
    error::Result,
    studio::Studio,
};
use actix_web::{middleware, web, App, HttpServer};

pub use view::{FormEcho, PageView};

/// Shared, read-only state behind every request.
pub struct AppState {
    pub studio: Studio,
    pub resolver: CredentialResolver,
    pub view: PageView,
}

impl AppState {
    pub fn new(studio: Studio, resolver: CredentialResolver) -> Result<Self> {
        Ok(Self {
            studio,
            resolver,
            view: PageView::new()?,
        })
    }
}

/// Generous ceiling for the URL-encoded generate form; prompts are not truncated.
pub const FORM_LIMIT: usize = 8 * 1024 * 1024;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::FormConfig::default()
            .limit(FORM_LIMIT)
            .error_handler(handlers::form_error),
    )
    .route("/", web::get().to(handlers::index))
    .route("/generate", web::post().to(handlers::generate))
    .route("/health", web::get().to(handlers::health));
}

pub async fn run(config: StudioConfig, state: AppState) -> Result<()> {
    let state = web::Data::new(state);

    log::info!("🌐 Binding {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::new("%r %s %Dms"))
            .configure(routes)
    })
    .bind(config.bind_address())?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{Credential, MapSecretStore};
    use crate::error::StudioError;
    use crate::huggingface::InferenceTransport;
    use crate::models::{InferencePayload, RawResponse};
    use actix_web::{
        http::{header::ContentType, StatusCode},
        test,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct RefusingTransport {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl InferenceTransport for RefusingTransport {
        async fn call(
            &self,
            _endpoint: &str,
            _credential: &Credential,
            _payload: &InferencePayload,
        ) -> Result<RawResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StudioError::TransportError("connection refused".into()))
        }
    }

    fn state(transport: Arc<RefusingTransport>, secret: Option<&str>) -> web::Data<AppState> {
        let store = match secret {
            Some(token) => MapSecretStore::new().with_secret("HF_TOKEN", token),
            None => MapSecretStore::new(),
        };
        let resolver = CredentialResolver::new(store, "HF_TOKEN");
        web::Data::new(AppState::new(Studio::from_arc(transport), resolver).unwrap())
    }

    fn form(token: &str) -> Vec<(&'static str, String)> {
        vec![
            ("model", "🚀 Flux Schnell (Veloce & Realistico)".to_string()),
            ("size", "Paesaggio (16:9 - YouTube)".to_string()),
            ("prompt", "un drago".to_string()),
            ("token", token.to_string()),
        ]
    }

    async fn body_of(resp: actix_web::dev::ServiceResponse) -> String {
        String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn index_renders_idle_page() {
        let transport = Arc::new(RefusingTransport::default());
        let app = test::init_service(App::new().app_data(state(transport, None)).configure(routes)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("Wimbly Studio BETA"));
        assert!(body.contains("Hugging Face Token"));
    }

    #[actix_web::test]
    async fn empty_token_fails_without_network_call() {
        let transport = Arc::new(RefusingTransport::default());
        let app = test::init_service(
            App::new()
                .app_data(state(transport.clone(), None))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/generate")
            .set_form(form(""))
            .to_request();
        let body = body_of(test::call_service(&app, req).await).await;

        assert!(body.contains("🛑 Manca il Token! Inseriscilo nei Secrets o nella barra laterale."));
        assert!(body.contains("1280x720px"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn manual_token_reaches_transport_and_failure_is_shown() {
        let transport = Arc::new(RefusingTransport::default());
        let app = test::init_service(
            App::new()
                .app_data(state(transport.clone(), None))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/generate")
            .set_form(form("hf_typed"))
            .to_request();
        let body = body_of(test::call_service(&app, req).await).await;

        assert!(body.contains("Qualcosa è andato storto: connection refused"));
        assert!(body.contains("value=\"hf_typed\""));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn secret_store_hides_token_field() {
        let transport = Arc::new(RefusingTransport::default());
        let app = test::init_service(
            App::new()
                .app_data(state(transport.clone(), Some("hf_secret")))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/generate")
            .set_form(form(""))
            .to_request();
        let body = body_of(test::call_service(&app, req).await).await;

        assert!(!body.contains("Hugging Face Token"));
        assert!(!body.contains("hf_secret"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn unknown_model_is_rejected_inline() {
        let transport = Arc::new(RefusingTransport::default());
        let app = test::init_service(
            App::new()
                .app_data(state(transport.clone(), Some("hf_secret")))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/generate")
            .set_form(vec![("model", "Midjourney"), ("size", "Standard (4:3)"), ("prompt", "x")])
            .to_request();
        let body = body_of(test::call_service(&app, req).await).await;

        assert!(body.contains("Selezione non valida"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn prompt_above_default_form_limit_reaches_transport() {
        let transport = Arc::new(RefusingTransport::default());
        let app = test::init_service(
            App::new()
                .app_data(state(transport.clone(), Some("hf_secret")))
                .configure(routes),
        )
        .await;

        let mut fields = form("");
        fields[2].1 = "a".repeat(20_000);
        let req = test::TestRequest::post()
            .uri("/generate")
            .set_form(fields)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;

        assert!(body.contains("Qualcosa è andato storto: connection refused"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn malformed_form_renders_page_with_message() {
        let transport = Arc::new(RefusingTransport::default());
        let app = test::init_service(
            App::new()
                .app_data(state(transport.clone(), Some("hf_secret")))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/generate")
            .insert_header(ContentType::json())
            .set_payload(r#"{"prompt":"un drago"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
        let body = body_of(resp).await;

        assert!(body.contains("Wimbly Studio BETA"));
        assert!(body.contains("Richiesta non valida"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn missing_model_field_is_rejected_inline() {
        let transport = Arc::new(RefusingTransport::default());
        let app = test::init_service(
            App::new()
                .app_data(state(transport.clone(), Some("hf_secret")))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/generate")
            .set_form(vec![("size", "Standard (4:3)"), ("prompt", "x")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;

        assert!(body.contains("Selezione non valida"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn health_reports_registry_and_secret() {
        let transport = Arc::new(RefusingTransport::default());
        let app = test::init_service(
            App::new()
                .app_data(state(transport, Some("hf_secret")))
                .configure(routes),
        )
        .await;

        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/health").to_request(),
        )
        .await;
        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["models"], 3);
        assert_eq!(resp["sizes"], 4);
        assert_eq!(resp["secret_configured"], true);
    }
}
