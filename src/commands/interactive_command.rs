use crate::commands::translating_spinner;
use crate::image_sources::ImageSource;
use crate::translators::{GeminiTranslator, GeminiTranslatorOptions, Translator};
use crate::view::render::render_view;
use crate::view::PhraseLensView;
use crate::AppResult;
use console::{Style, Term};

pub struct InteractiveCommandResult {
    pub translations_requested: usize,
}

#[derive(Debug, Clone)]
pub struct InteractiveCommandOptions {
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveCommand {
    Paste,
    Open(String),
    Translate,
    Clear,
    Help,
    Quit,
    Empty,
}

impl InteractiveCommand {
    /// Anything that isn't a known command is treated as an image location.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (command, argument) = line
            .split_once(char::is_whitespace)
            .map(|(command, argument)| (command, argument.trim()))
            .unwrap_or((line, ""));
        match command.to_lowercase().as_str() {
            "" => InteractiveCommand::Empty,
            "paste" | "p" => InteractiveCommand::Paste,
            "open" | "o" if !argument.is_empty() => InteractiveCommand::Open(argument.to_string()),
            "open" | "o" | "help" | "h" | "?" => InteractiveCommand::Help,
            "translate" | "t" => InteractiveCommand::Translate,
            "clear" | "c" => InteractiveCommand::Clear,
            "quit" | "q" | "exit" => InteractiveCommand::Quit,
            _ => InteractiveCommand::Open(line.to_string()),
        }
    }
}

fn write_help(term: &Term) -> AppResult<()> {
    let bold_style = Style::new().bold();
    let help = [
        ("paste", "paste an image from clipboard"),
        ("open <path|url>", "select an image file or URL"),
        ("translate", "find words and idioms in the image"),
        ("clear", "clear the image and results"),
        ("quit", "exit"),
    ]
    .iter()
    .map(|(command, description)| {
        format!(
            "  {} {}",
            bold_style.apply_to(console::pad_str(
                command,
                18,
                console::Alignment::Left,
                None
            )),
            Style::new().dim().apply_to(description)
        )
    })
    .collect::<Vec<_>>()
    .join("\n");
    term.write_line(help.as_str())?;
    Ok(())
}

fn write_view<T: Translator>(term: &Term, view: &PhraseLensView<T>) -> AppResult<()> {
    let (_, term_width) = term.size();
    term.write_line("")?;
    term.write_line(render_view(view, term_width as usize).as_str())?;
    Ok(())
}

pub async fn command_interactive(
    term: &Term,
    options: InteractiveCommandOptions,
    translator_options: GeminiTranslatorOptions,
) -> AppResult<InteractiveCommandResult> {
    let client = reqwest::Client::new();
    let translator = GeminiTranslator::new(client.clone(), translator_options);
    let mut view = PhraseLensView::new(translator, client);
    if let Some(prompt) = options.prompt {
        view = view.with_prompt(prompt);
    }
    let mut translations_requested = 0;

    write_view(term, &view)?;
    write_help(term)?;

    loop {
        term.write_str("> ")?;
        let line = term.read_line()?;
        match InteractiveCommand::parse(&line) {
            InteractiveCommand::Empty if !term.is_term() => break,
            InteractiveCommand::Empty => continue,
            InteractiveCommand::Help => {
                write_help(term)?;
                continue;
            }
            InteractiveCommand::Quit => break,
            InteractiveCommand::Paste => match ImageSource::open(ImageSource::CLIPBOARD_LOCATION) {
                Ok(image) => view.set_image(image),
                Err(err) => view.set_error(format!("Failed to paste image: {}", err)),
            },
            InteractiveCommand::Open(location) => match ImageSource::open(&location) {
                Ok(image) => view.set_image(image),
                Err(err) => view.set_error(format!("Failed to open image: {}", err)),
            },
            InteractiveCommand::Translate => {
                if let Some(image) = view.begin_translate() {
                    translations_requested += 1;
                    write_view(term, &view)?;
                    let spinner = translating_spinner()?;
                    let result = view.request_translations(&image).await;
                    spinner.finish_and_clear();
                    view.complete_translate(result);
                }
            }
            InteractiveCommand::Clear => view.clear(),
        }
        write_view(term, &view)?;
    }

    Ok(InteractiveCommandResult {
        translations_requested,
    })
}
