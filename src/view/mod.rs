use crate::common_types::Translation;
use crate::image_sources::{encode_image_base64, ImageSource};
use crate::translators::Translator;
use crate::AppResult;
use tracing::debug;

pub mod render;

pub const TRANSLATION_PROMPT: &str = "You are an assistant that helps language learners to learn English. \
    You will be provided with a picture that contains English text. \
    You should find important words and idioms and give their meanings in English (in the meaning field), and list of their translations in Persian.\
    Don't miss any important word or idiom. ";

pub const NO_IMAGE_ERROR: &str = "Please paste or select an image first";

/// State of the client view: selected image, found translations, loading flag and error.
///
/// All transitions take `&mut self`, so at most one translation request is in flight.
pub struct PhraseLensView<T: Translator> {
    translator: T,
    client: reqwest::Client,
    prompt: String,
    image: Option<ImageSource>,
    translations: Vec<Translation>,
    is_loading: bool,
    error: Option<String>,
}

impl<T: Translator> PhraseLensView<T> {
    pub fn new(translator: T, client: reqwest::Client) -> Self {
        Self {
            translator,
            client,
            prompt: TRANSLATION_PROMPT.to_string(),
            image: None,
            translations: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn with_prompt(mut self, prompt: String) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn image(&self) -> Option<&ImageSource> {
        self.image.as_ref()
    }

    pub fn translations(&self) -> &[Translation] {
        &self.translations
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_translate(&self) -> bool {
        !self.is_loading && self.image.is_some()
    }

    /// Pasted or selected image replaces the current one and drops previous results.
    pub fn set_image(&mut self, image: ImageSource) {
        debug!("Image selected: {}", image.display_url());
        self.image = Some(image);
        self.translations.clear();
        self.error = None;
    }

    pub fn set_error<S: Into<String>>(&mut self, error: S) {
        self.error = Some(error.into());
    }

    pub async fn translate(&mut self) {
        if let Some(image) = self.begin_translate() {
            let result = self.request_translations(&image).await;
            self.complete_translate(result);
        }
    }

    /// Starts a translation: returns the image to send, or `None` when there is
    /// nothing to do (already loading, or no image, which sets the error).
    pub fn begin_translate(&mut self) -> Option<ImageSource> {
        if self.is_loading {
            return None;
        }
        match self.image.clone() {
            Some(image) => {
                self.is_loading = true;
                self.error = None;
                Some(image)
            }
            None => {
                self.error = Some(NO_IMAGE_ERROR.to_string());
                None
            }
        }
    }

    pub fn complete_translate(&mut self, result: AppResult<Vec<Translation>>) {
        match result {
            Ok(translations) => self.translations = translations,
            Err(err) => self.error = Some(format!("Failed to get translations: {}", err)),
        }
        self.is_loading = false;
    }

    pub async fn request_translations(&self, image: &ImageSource) -> AppResult<Vec<Translation>> {
        let image_bytes = image.load(&self.client).await?;
        let image_base64 = encode_image_base64(&image_bytes)?;
        Ok(self
            .translator
            .find_translations(&image_base64, &self.prompt)
            .await)
    }

    pub fn clear(&mut self) {
        self.image = None;
        self.translations.clear();
        self.error = None;
        self.is_loading = false;
    }
}
