use crate::config::{ModelOption, SizeOption};
use serde::{Deserialize, Serialize};

/// One user submission. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, size: &SizeOption) -> Self {
        Self {
            prompt: prompt.into(),
            width: size.width,
            height: size.height,
        }
    }

    pub fn payload(&self) -> InferencePayload {
        build(&self.prompt, self.width, self.height)
    }
}

/// JSON body sent to the hosted inference endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferencePayload {
    pub inputs: String,
    pub parameters: InferenceParameters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceParameters {
    pub width: u32,
    pub height: u32,
}

/// The prompt goes through verbatim: no trimming, no length limit.
pub fn build(prompt: &str, width: u32, height: u32) -> InferencePayload {
    InferencePayload {
        inputs: prompt.to_string(),
        parameters: InferenceParameters { width, height },
    }
}

/// Model and size picked in the sidebar.
#[derive(Debug, Clone, Copy)]
pub struct Selection {
    pub model: &'static ModelOption,
    pub size: &'static SizeOption,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            model: ModelOption::default_option(),
            size: SizeOption::default_option(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MODELS, SIZES};
    use serde_json::json;

    #[test]
    fn payload_shape_matches_endpoint_contract() {
        let payload = build("a cat", 1024, 768);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"inputs": "a cat", "parameters": {"width": 1024, "height": 768}})
        );
    }

    #[test]
    fn every_model_and_size_yields_preset_dimensions() {
        for model in MODELS.iter() {
            for size in SIZES.iter() {
                let selection = Selection { model, size };
                let request = GenerationRequest::new("prompt", selection.size);
                let value = serde_json::to_value(request.payload()).unwrap();
                assert_eq!(value["parameters"]["width"], size.width);
                assert_eq!(value["parameters"]["height"], size.height);
            }
        }
    }

    #[test]
    fn landscape_selection_builds_1280_by_720() {
        let size = SizeOption::find("Paesaggio (16:9 - YouTube)").unwrap();
        let payload = GenerationRequest::new("mare", size).payload();
        assert_eq!(payload.parameters, InferenceParameters { width: 1280, height: 720 });
    }

    #[test]
    fn prompt_is_passed_verbatim() {
        let prompt = "  <b>unsanitized</b>\n\"quotes\" & émojis 🚀  ";
        assert_eq!(build(prompt, 1, 1).inputs, prompt);
        assert_eq!(build("", 1, 1).inputs, "");
    }
}
