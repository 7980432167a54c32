use clap::Parser;
use console::{Style, Term};
use tracing_subscriber::EnvFilter;

use std::error::Error;

mod args;
use crate::commands::*;
use crate::errors::AppError;
use args::*;

mod commands;

mod common_types;

mod errors;

mod image_sources;

mod translators;

mod view;

pub type AppResult<T> = Result<T, AppError>;

pub fn config_env_var(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|e| format!("{}: {}", name, e))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("phrase_lens=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let term = Term::stdout();
    let bold_style = Style::new().bold();

    let cli = CliArgs::parse();
    if !cli.command.is_json_output() {
        term.write_line(
            format!(
                "{} v{}",
                bold_style.clone().green().apply_to("Phrase Lens"),
                bold_style.apply_to(env!("CARGO_PKG_VERSION"))
            )
            .as_str(),
        )?;
    }

    if let Err(err) = handle_args(cli, &term).await {
        Term::stderr().write_line(
            format!(
                "{}: {}\nDetails: {:?}",
                bold_style.clone().red().apply_to("Error"),
                err,
                err.source()
            )
            .as_str(),
        )?;
        std::process::exit(1);
    }

    Ok(())
}

async fn handle_args(cli: CliArgs, term: &Term) -> AppResult<()> {
    let bold_style = Style::new().bold();

    match cli.command {
        CliCommand::Translate {
            source,
            json,
            gemini_args,
        } => {
            let options = TranslateCommandOptions::new(json, gemini_args.prompt.clone());
            let translate_result =
                command_translate(term, &source, options, gemini_args.try_into()?).await?;
            if !json && translate_result.error.is_none() {
                term.write_line(
                    format!(
                        "{} words and idioms found.",
                        bold_style
                            .clone()
                            .green()
                            .apply_to(translate_result.translations_found),
                    )
                    .as_str(),
                )?;
            }
            if translate_result.error.is_some() {
                std::process::exit(2);
            }
        }
        CliCommand::Interactive { gemini_args } => {
            let options = InteractiveCommandOptions {
                prompt: gemini_args.prompt.clone(),
            };
            let interactive_result =
                command_interactive(term, options, gemini_args.try_into()?).await?;
            term.write_line(
                format!(
                    "{} translation requests sent.",
                    bold_style.apply_to(interactive_result.translations_requested)
                )
                .as_str(),
            )?;
        }
    }

    Ok(())
}
