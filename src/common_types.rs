use rvstruct::ValueStruct;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, ValueStruct)]
pub struct GeminiApiKey(String);

#[derive(Debug, Clone, ValueStruct)]
pub struct GeminiModelName(String);

/// Base64 (standard alphabet) encoded PNG image, ready to be sent as inline data.
#[derive(Debug, Clone, ValueStruct)]
pub struct ImageBase64(String);

/// A word or idiom found in the image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Translation {
    /// The word or idiom in English
    pub text: String,
    /// The meaning of the word or idiom in English
    pub meaning: String,
    /// Persian translations, at least one is expected
    pub translations: Vec<String>,
}
