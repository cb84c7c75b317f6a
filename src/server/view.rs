use crate::{
    config::{DEFAULT_PROMPT, DOWNLOAD_FILE_NAME, DOWNLOAD_MIME, MODELS, PAGE_TITLE, SIZES},
    error::{Result, StudioError},
    models::Selection,
    studio::PageState,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use handlebars::Handlebars;
use serde::Serialize;

const TEMPLATE_NAME: &str = "studio";
const TEMPLATE: &str = include_str!("../../templates/studio.hbs");
const SUBTITLE: &str = "Genera immagini incredibili usando l'AI.";

#[derive(Debug, Serialize)]
struct OptionView {
    label: &'static str,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct InfoView {
    model: &'static str,
    width: u32,
    height: u32,
}

#[derive(Debug, Serialize)]
struct ImageView {
    data_uri: String,
    caption: &'static str,
    width: u32,
    height: u32,
    file_name: &'static str,
    mime: &'static str,
}

#[derive(Debug, Serialize)]
struct PageContext<'a> {
    title: &'static str,
    subtitle: &'static str,
    models: Vec<OptionView>,
    sizes: Vec<OptionView>,
    prompt: &'a str,
    secret_missing: bool,
    show_token_field: bool,
    token: &'a str,
    info: InfoView,
    error: Option<&'a str>,
    image: Option<ImageView>,
}

/// What the controls should show after a render pass.
#[derive(Debug, Clone, Copy)]
pub struct FormEcho<'a> {
    pub selection: Selection,
    pub prompt: &'a str,
    pub manual_token: &'a str,
}

impl Default for FormEcho<'_> {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            prompt: DEFAULT_PROMPT,
            manual_token: "",
        }
    }
}

pub struct PageView {
    registry: Handlebars<'static>,
}

impl PageView {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(TEMPLATE_NAME, TEMPLATE)
            .map_err(|e| StudioError::TemplateError(e.to_string()))?;
        Ok(Self { registry })
    }

    pub fn render(
        &self,
        state: &PageState,
        echo: FormEcho<'_>,
        secret_missing: bool,
    ) -> Result<String> {
        let selection = echo.selection;
        let context = PageContext {
            title: PAGE_TITLE,
            subtitle: SUBTITLE,
            models: MODELS
                .iter()
                .map(|m| OptionView {
                    label: m.label,
                    selected: m.label == selection.model.label,
                })
                .collect(),
            sizes: SIZES
                .iter()
                .map(|s| OptionView {
                    label: s.label,
                    selected: s.label == selection.size.label,
                })
                .collect(),
            prompt: echo.prompt,
            secret_missing,
            show_token_field: secret_missing,
            token: if secret_missing { echo.manual_token } else { "" },
            info: InfoView {
                model: selection.model.label,
                width: selection.size.width,
                height: selection.size.height,
            },
            error: state.message(),
            image: match state {
                PageState::Displaying { selection, result } => Some(ImageView {
                    data_uri: format!(
                        "data:{};base64,{}",
                        DOWNLOAD_MIME,
                        STANDARD.encode(&result.png_bytes)
                    ),
                    caption: selection.model.label,
                    width: result.width(),
                    height: result.height(),
                    file_name: DOWNLOAD_FILE_NAME,
                    mime: DOWNLOAD_MIME,
                }),
                _ => None,
            },
        };

        self.registry
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| StudioError::TemplateError(e.to_string()))
    }
}
