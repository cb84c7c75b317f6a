//! Classifies what came back from the endpoint.
//!
//! The endpoint answers either with image bytes or with a JSON document such as
//! `{"error": "Model is loading"}`. Any occurrence of the ASCII bytes `error`
//! marks the whole body as an error payload, even inside binary data, and
//! decoding is skipped in that case.

use crate::{
    error::{Result, StudioError},
    models::{ErrorResult, ImageResult, Interpretation, RawResponse},
};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

pub const ERROR_MARKER: &[u8] = b"error";

pub fn contains_error_marker(bytes: &[u8]) -> bool {
    bytes
        .windows(ERROR_MARKER.len())
        .any(|window| window == ERROR_MARKER)
}

pub fn interpret(raw_bytes: &[u8]) -> Result<Interpretation> {
    if contains_error_marker(raw_bytes) {
        let message = String::from_utf8_lossy(raw_bytes).into_owned();
        log::warn!("⚠️  Response flagged as error payload ({} bytes)", raw_bytes.len());
        return Ok(Interpretation::Error(ErrorResult { message }));
    }

    let image = decode(raw_bytes)?;
    let png_bytes = encode_png(&image)?;
    log::debug!(
        "Decoded {}x{} image, {} PNG bytes for download",
        image.width(),
        image.height(),
        png_bytes.len()
    );

    Ok(Interpretation::Image(ImageResult { image, png_bytes }))
}

/// Same as [`interpret`] but folds an error payload into `StudioError::RemoteError`.
pub fn interpret_response(response: &RawResponse) -> Result<ImageResult> {
    if let Some(content_type) = &response.content_type {
        log::debug!(
            "Response status {} content-type {}",
            response.status,
            content_type
        );
    }

    match interpret(&response.bytes)? {
        Interpretation::Image(image) => Ok(image),
        Interpretation::Error(error) => Err(StudioError::RemoteError(error.message)),
    }
}

pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(StudioError::DecodeError("empty response body".into()));
    }
    Ok(image::load_from_memory(bytes)?)
}

pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| StudioError::EncodeError(e.to_string()))?;
    Ok(buffer)
}
