use crate::common_types::{ImageBase64, Translation};

mod gemini;
pub use gemini::*;

/// Finds words and idioms in an image.
///
/// Implementations never fail: any error is logged and an empty list is returned.
pub trait Translator {
    async fn find_translations(&self, image: &ImageBase64, prompt: &str) -> Vec<Translation>;
}
