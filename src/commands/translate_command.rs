use crate::commands::translating_spinner;
use crate::image_sources::ImageSource;
use crate::translators::{GeminiTranslator, GeminiTranslatorOptions};
use crate::view::render::{render_error, render_view};
use crate::view::PhraseLensView;
use crate::AppResult;
use console::{Style, Term};

pub struct TranslateCommandResult {
    pub translations_found: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TranslateCommandOptions {
    pub json_output: bool,
    pub prompt: Option<String>,
}

impl TranslateCommandOptions {
    pub fn new(json_output: bool, prompt: Option<String>) -> Self {
        TranslateCommandOptions {
            json_output,
            prompt,
        }
    }
}

pub async fn command_translate(
    term: &Term,
    source: &str,
    options: TranslateCommandOptions,
    translator_options: GeminiTranslatorOptions,
) -> AppResult<TranslateCommandResult> {
    let client = reqwest::Client::new();
    let translator = GeminiTranslator::new(client.clone(), translator_options);
    let mut view = PhraseLensView::new(translator, client);
    if let Some(prompt) = options.prompt {
        view = view.with_prompt(prompt);
    }

    view.set_image(ImageSource::open(source)?);

    if !options.json_output {
        term.write_line(
            format!(
                "Translating words and idioms from {}.",
                Style::new().bold().yellow().apply_to(source)
            )
            .as_str(),
        )?;
    }

    let spinner = translating_spinner()?;
    view.translate().await;
    spinner.finish_and_clear();

    if options.json_output {
        term.write_line(serde_json::to_string_pretty(view.translations())?.as_str())?;
        if let Some(error) = view.error() {
            Term::stderr().write_line(render_error(error).as_str())?;
        }
    } else {
        let (_, term_width) = term.size();
        term.write_line(render_view(&view, term_width as usize).as_str())?;
    }

    Ok(TranslateCommandResult {
        translations_found: view.translations().len(),
        error: view.error().map(|error| error.to_string()),
    })
}
