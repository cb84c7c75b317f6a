use image::DynamicImage;

/// Raw body returned by the inference endpoint, whatever the status code.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub bytes: Vec<u8>,
    pub status: u16,
    pub content_type: Option<String>,
}

impl RawResponse {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            status: 200,
            content_type: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResult {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ImageResult {
    pub image: DynamicImage,
    /// PNG re-encoding offered as the download.
    pub png_bytes: Vec<u8>,
}

impl ImageResult {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

#[derive(Debug, Clone)]
pub enum Interpretation {
    Error(ErrorResult),
    Image(ImageResult),
}

impl Interpretation {
    pub fn is_error(&self) -> bool {
        matches!(self, Interpretation::Error(_))
    }
}
