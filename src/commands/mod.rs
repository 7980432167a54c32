mod translate_command;
pub use translate_command::*;

mod interactive_command;
pub use interactive_command::*;

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::AppResult;

pub(crate) fn translating_spinner() -> AppResult<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    spinner.set_message("Translating...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}
