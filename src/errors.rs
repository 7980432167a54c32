use indicatif::style::TemplateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unsupported image source is specified: {location}")]
    UnsupportedImageSource { location: String },
    #[error("Input/output error: {0}")]
    InputOutputError(#[from] std::io::Error),
    #[error("HTTP client error:\n{0}")]
    HttpClientError(#[from] reqwest::Error),
    #[error("Gemini API error. HTTP status: {status}. Response: {message}")]
    GeminiApiError {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("Unexpected Gemini API response: {message}")]
    GeminiResponseError { message: String },
    #[error("JSON error:\n{0}")]
    JsonError(#[from] serde_json::Error),
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("Config error: {message}")]
    ConfigError { message: String },
    #[error("Template error: {0}")]
    TemplateError(#[from] TemplateError),
    #[error("Image conversion error: {0}")]
    ImageError(#[from] image::ImageError),
    #[cfg(feature = "clipboard")]
    #[error("Clipboard error: {0}")]
    ClipboardError(#[from] arboard::Error),
    #[error("System error: {message}")]
    SystemError { message: String },
}
