use crate::common_types::{GeminiApiKey, GeminiModelName};
use crate::errors::AppError;
use crate::translators::{GeminiTranslator, GeminiTranslatorOptions};
use clap::*;
use rvstruct::ValueStruct;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    #[command(about = "Find important words and idioms in an image and translate them")]
    Translate {
        #[arg(
            help = "Image to translate: a file path, an http(s) URL or clipboard:// to paste the image from clipboard"
        )]
        source: String,
        #[arg(
            long,
            help = "Print found translations as JSON",
            default_value = "false"
        )]
        json: bool,

        #[command(flatten)]
        gemini_args: GeminiArgs,
    },
    #[command(about = "Interactive session to paste, select and translate images")]
    Interactive {
        #[command(flatten)]
        gemini_args: GeminiArgs,
    },
}

impl CliCommand {
    pub fn is_json_output(&self) -> bool {
        matches!(self, CliCommand::Translate { json: true, .. })
    }
}

#[derive(Args, Debug, Clone)]
pub struct GeminiArgs {
    #[arg(
        long,
        help = "Gemini API key. GEMINI_API_KEY environment variable is used if not specified"
    )]
    pub gemini_api_key: Option<String>,

    #[arg(long, help = "Gemini model name such as gemini-2.0-flash-exp")]
    pub gemini_model: Option<String>,

    #[arg(
        long,
        help = "Gemini API base URL",
        default_value = GeminiTranslator::DEFAULT_API_URL
    )]
    pub gemini_api_url: url::Url,

    #[arg(long, help = "Instruction prompt for the model instead of the built-in one")]
    pub prompt: Option<String>,
}

impl TryInto<GeminiTranslatorOptions> for GeminiArgs {
    type Error = AppError;

    fn try_into(self) -> Result<GeminiTranslatorOptions, Self::Error> {
        let api_key = match self.gemini_api_key {
            Some(api_key) if api_key.trim().is_empty() => Err(AppError::ConfigError {
                message: "Gemini API key can't be empty".to_string(),
            }),
            Some(api_key) => Ok(Some(api_key)),
            None => Ok(crate::config_env_var("GEMINI_API_KEY").ok()),
        }?;
        if api_key.is_none() {
            warn!("Gemini API key is not specified with --gemini-api-key or GEMINI_API_KEY. Requests to Gemini API will fail.");
        }

        let model = match self.gemini_model {
            Some(model) if model.trim().is_empty() => Err(AppError::ConfigError {
                message: "Gemini model name can't be empty".to_string(),
            }),
            other => Ok(other),
        }?;

        Ok(GeminiTranslatorOptions::new(self.gemini_api_url)
            .opt_api_key(api_key.map(GeminiApiKey::new))
            .opt_model(model.map(GeminiModelName::new)))
    }
}
