use console::{measure_text_width, pad_str, Alignment, Style};

use crate::common_types::Translation;
use crate::image_sources::ImageSource;
use crate::translators::Translator;
use crate::view::PhraseLensView;

const MAX_CARD_WIDTH: usize = 60;
const MIN_CARD_WIDTH: usize = 20;

const RIGHT_TO_LEFT_EMBEDDING: char = '\u{202B}';
const POP_DIRECTIONAL_FORMATTING: char = '\u{202C}';

pub fn card_width(term_width: usize) -> usize {
    term_width.saturating_sub(2).clamp(MIN_CARD_WIDTH, MAX_CARD_WIDTH)
}

pub fn render_header(width: usize) -> String {
    let bold_style = Style::new().bold();
    let dimmed_style = Style::new().dim();
    let mut lines = vec![bold_style.green().apply_to("Phrase Lens").to_string()];
    lines.extend(
        wrap_text(
            "Find important words and idioms in English text and give their meanings in English, and their translations in Persian.",
            width,
        )
        .into_iter()
        .map(|line| dimmed_style.apply_to(line).to_string()),
    );
    lines.join("\n")
}

pub fn render_image_preview(image: Option<&ImageSource>) -> String {
    let dimmed_style = Style::new().dim();
    match image {
        Some(image) => {
            let dimensions = image
                .dimensions()
                .map(|(width, height)| format!(" ({}x{})", width, height))
                .unwrap_or_default();
            format!(
                "Image: {}{}",
                Style::new().bold().yellow().apply_to(image.display_url()),
                dimmed_style.apply_to(dimensions)
            )
        }
        None => dimmed_style
            .apply_to("Paste or select an image (Ctrl+V / Cmd+V)")
            .to_string(),
    }
}

pub fn render_actions<T: Translator>(view: &PhraseLensView<T>) -> String {
    let translate_action = if view.is_loading() {
        Style::new().dim().apply_to("[ Translating... ]")
    } else if view.can_translate() {
        Style::new().bold().green().apply_to("[ Translate ]")
    } else {
        Style::new().dim().apply_to("[ Translate ]")
    };

    if view.image().is_some() {
        format!("{} {}", translate_action, Style::new().apply_to("[ Clear ]"))
    } else {
        translate_action.to_string()
    }
}

pub fn render_error(error: &str) -> String {
    Style::new().red().apply_to(error).to_string()
}

/// Source text and meaning centered, Persian translations right to left.
pub fn render_translation_card(translation: &Translation, width: usize) -> String {
    let inner_width = width.saturating_sub(4).max(1);
    let bold_style = Style::new().bold();
    let dimmed_style = Style::new().dim();

    let mut lines = Vec::new();
    lines.push(format!("╭{}╮", "─".repeat(inner_width + 2)));

    let centered = |text: &str, style: &Style| -> Vec<String> {
        wrap_text(text, inner_width)
            .into_iter()
            .map(|line| {
                format!(
                    "│ {} │",
                    style.apply_to(pad_str(&line, inner_width, Alignment::Center, None))
                )
            })
            .collect()
    };
    lines.extend(centered(&translation.text, &bold_style));
    lines.extend(centered(&translation.meaning, &dimmed_style));

    for persian_translation in &translation.translations {
        for line in wrap_text(persian_translation, inner_width) {
            let rtl_line = format!(
                "{}{}{}",
                RIGHT_TO_LEFT_EMBEDDING, line, POP_DIRECTIONAL_FORMATTING
            );
            lines.push(format!(
                "│ {} │",
                pad_str(&rtl_line, inner_width, Alignment::Right, None)
            ));
        }
    }

    lines.push(format!("╰{}╯", "─".repeat(inner_width + 2)));
    lines.join("\n")
}

pub fn render_view<T: Translator>(view: &PhraseLensView<T>, term_width: usize) -> String {
    let width = card_width(term_width);
    let mut sections = vec![
        render_header(width),
        render_image_preview(view.image()),
        render_actions(view),
    ];
    if let Some(error) = view.error() {
        sections.push(render_error(error));
    }
    sections.extend(
        view.translations()
            .iter()
            .map(|translation| render_translation_card(translation, width)),
    );
    sections.join("\n\n")
}

fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && measure_text_width(&current) + 1 + measure_text_width(word) > width
        {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
