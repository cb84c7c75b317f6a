use super::{view::FormEcho, AppState};
use crate::{
    config::{MODELS, SIZES},
    credentials::{Credential, CredentialSource},
    error::StudioError,
    studio::{PageState, Studio},
};
use actix_web::{
    error::{InternalError, UrlencodedError},
    http::StatusCode,
    web, HttpRequest, HttpResponse, ResponseError,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub token: Option<String>,
}

pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    let secret_missing = !state.resolver.has_secret();
    render(&state, &PageState::idle(), FormEcho::default(), secret_missing)
}

pub async fn generate(state: web::Data<AppState>, form: web::Form<GenerateForm>) -> HttpResponse {
    let form = form.into_inner();
    let manual_token = form.token.as_deref().unwrap_or("");

    let credential = state.resolver.resolve_or_manual(form.token.as_deref()).ok();
    let secret_missing = !matches!(
        credential.as_ref().map(Credential::source),
        Some(CredentialSource::SecretStore)
    );

    let selection = match Studio::select(&form.model, &form.size) {
        Ok(selection) => selection,
        Err(e) => {
            log::warn!("⚠️  Rejected form selection: {}", e);
            let failed = PageState::Failed {
                message: e.to_string(),
            };
            let echo = FormEcho {
                prompt: &form.prompt,
                manual_token,
                ..FormEcho::default()
            };
            return render(&state, &failed, echo, secret_missing);
        }
    };

    let page = state
        .studio
        .submit(selection, &form.prompt, credential.as_ref())
        .await;

    let echo = FormEcho {
        selection,
        prompt: &form.prompt,
        manual_token,
    };
    render(&state, &page, echo, secret_missing)
}

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "models": MODELS.len(),
        "sizes": SIZES.len(),
        "secret_configured": state.resolver.has_secret(),
    }))
}

/// Oversized or unparseable forms still get the page, with the reason inline.
pub fn form_error(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("⚠️  Rejected generate form: {}", err);
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        return err.into();
    };

    let failed = PageState::Failed {
        message: StudioError::FormError(err.to_string()).to_string(),
    };
    let secret_missing = !state.resolver.has_secret();
    let response = render_with_status(
        state,
        &failed,
        FormEcho::default(),
        secret_missing,
        err.status_code(),
    );
    InternalError::from_response(err, response).into()
}

fn render(
    state: &AppState,
    page: &PageState,
    echo: FormEcho<'_>,
    secret_missing: bool,
) -> HttpResponse {
    render_with_status(state, page, echo, secret_missing, StatusCode::OK)
}

fn render_with_status(
    state: &AppState,
    page: &PageState,
    echo: FormEcho<'_>,
    secret_missing: bool,
    status: StatusCode,
) -> HttpResponse {
    match state.view.render(page, echo, secret_missing) {
        Ok(html) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            log::error!("❌ Failed to render page: {}", e);
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}
