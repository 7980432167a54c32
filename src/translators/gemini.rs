use std::collections::BTreeMap;

use rsb_derive::Builder;
use rvstruct::ValueStruct;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use url::Url;

use crate::common_types::{GeminiApiKey, GeminiModelName, ImageBase64, Translation};
use crate::errors::AppError;
use crate::translators::Translator;
use crate::AppResult;

#[derive(Debug, Clone, Builder)]
pub struct GeminiTranslatorOptions {
    pub api_url: Url,
    pub api_key: Option<GeminiApiKey>,
    pub model: Option<GeminiModelName>,
}

#[derive(Clone)]
pub struct GeminiTranslator {
    client: reqwest::Client,
    options: GeminiTranslatorOptions,
}

#[derive(Serialize, Clone, Debug)]
struct GeminiGenerateContentRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize, Clone, Debug)]
struct GeminiContent {
    parts: Vec<GeminiRequestPart>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(untagged)]
enum GeminiRequestPart {
    Text { text: String },
    InlineData { inline_data: GeminiInlineData },
}

#[derive(Serialize, Clone, Debug)]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize, Clone, Debug)]
struct GeminiGenerationConfig {
    response_mime_type: String,
    response_schema: GeminiSchema,
}

#[derive(Serialize, Clone, Copy, Debug)]
#[serde(rename_all = "UPPERCASE")]
enum GeminiSchemaType {
    Object,
    Array,
    String,
}

#[derive(Serialize, Clone, Debug)]
struct GeminiSchema {
    #[serde(rename = "type")]
    schema_type: GeminiSchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, GeminiSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<GeminiSchema>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    required: Vec<String>,
}

impl GeminiSchema {
    fn new(schema_type: GeminiSchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: BTreeMap::new(),
            items: None,
            required: Vec::new(),
        }
    }

    fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    fn with_items(mut self, items: GeminiSchema) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    fn with_property(mut self, name: &str, schema: GeminiSchema) -> Self {
        self.properties.insert(name.to_string(), schema);
        self
    }

    fn with_required(mut self, required: &[&str]) -> Self {
        self.required = required.iter().map(|name| name.to_string()).collect();
        self
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Deserialize, Clone, Debug)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Deserialize, Clone, Debug)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize, Clone, Debug)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    total_token_count: Option<u64>,
}

#[derive(Deserialize, Clone, Debug)]
struct GeminiTranslationsResponse {
    response: Vec<Translation>,
}

impl GeminiTranslator {
    pub const DEFAULT_MODEL: &'static str = "gemini-2.0-flash-exp";
    pub const DEFAULT_API_URL: &'static str = "https://generativelanguage.googleapis.com";

    pub fn new(client: reqwest::Client, options: GeminiTranslatorOptions) -> Self {
        Self { client, options }
    }

    fn model_name(&self) -> String {
        self.options
            .model
            .as_ref()
            .map(|model| model.value().clone())
            .unwrap_or_else(|| Self::DEFAULT_MODEL.to_string())
    }

    fn generate_content_url(&self) -> AppResult<Url> {
        let mut url = Url::parse(&format!(
            "{}/v1beta/models/{}:generateContent",
            self.options.api_url.as_str().trim_end_matches('/'),
            self.model_name()
        ))?;
        debug!("Gemini generate content URL: {}", url);
        url.query_pairs_mut().append_pair(
            "key",
            self.options
                .api_key
                .as_ref()
                .map(|key| key.value().as_str())
                .unwrap_or_default(),
        );
        Ok(url)
    }

    fn translations_schema() -> GeminiSchema {
        let translation_schema = GeminiSchema::new(GeminiSchemaType::Object)
            .with_property(
                "text",
                GeminiSchema::new(GeminiSchemaType::String)
                    .with_description("The word or idiom in English."),
            )
            .with_property(
                "meaning",
                GeminiSchema::new(GeminiSchemaType::String)
                    .with_description("The meaning of the word or idiom in English."),
            )
            .with_property(
                "translations",
                GeminiSchema::new(GeminiSchemaType::Array)
                    .with_description("The list of translations in Persian. Multiple translations are possible, if needed.")
                    .with_items(GeminiSchema::new(GeminiSchemaType::String)),
            )
            .with_required(&["text", "meaning", "translations"]);

        GeminiSchema::new(GeminiSchemaType::Object).with_property(
            "response",
            GeminiSchema::new(GeminiSchemaType::Array).with_items(translation_schema),
        )
    }

    fn generate_content_request(image: &ImageBase64, prompt: &str) -> GeminiGenerateContentRequest {
        GeminiGenerateContentRequest {
            contents: vec![GeminiContent {
                parts: vec![
                    GeminiRequestPart::Text {
                        text: prompt.to_string(),
                    },
                    GeminiRequestPart::InlineData {
                        inline_data: GeminiInlineData {
                            mime_type: mime::IMAGE_PNG.to_string(),
                            data: image.value().clone(),
                        },
                    },
                ],
            }],
            generation_config: GeminiGenerationConfig {
                response_mime_type: mime::APPLICATION_JSON.to_string(),
                response_schema: Self::translations_schema(),
            },
        }
    }

    fn parse_generate_content_response(response_body: &str) -> AppResult<Vec<Translation>> {
        let response: GeminiGenerateContentResponse = serde_json::from_str(response_body)?;
        if let Some(total_token_count) = response
            .usage_metadata
            .as_ref()
            .and_then(|usage| usage.total_token_count)
        {
            info!("Tokens used: {}", total_token_count);
        }

        let content_json = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| AppError::GeminiResponseError {
                message: "No text content item in the response".to_string(),
            })?;

        let translations_response: GeminiTranslationsResponse =
            serde_json::from_str(&content_json)?;
        Ok(translations_response.response)
    }

    pub async fn try_find_translations(
        &self,
        image: &ImageBase64,
        prompt: &str,
    ) -> AppResult<Vec<Translation>> {
        let request = Self::generate_content_request(image, prompt);
        let response = self
            .client
            .post(self.generate_content_url()?)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let response_status = response.status();
            let response_text = response.text().await.unwrap_or_default();
            return Err(AppError::GeminiApiError {
                status: response_status,
                message: response_text,
            });
        }

        let response_body = response.text().await?;
        Self::parse_generate_content_response(&response_body)
    }
}

impl Translator for GeminiTranslator {
    async fn find_translations(&self, image: &ImageBase64, prompt: &str) -> Vec<Translation> {
        match self.try_find_translations(image, prompt).await {
            Ok(translations) => translations,
            Err(err) => {
                error!("Failed to find translations: {}", err);
                Vec::new()
            }
        }
    }
}
