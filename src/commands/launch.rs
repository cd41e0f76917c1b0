use std::io;

use dialoguer::FuzzySelect;
use dialoguer::theme::ColorfulTheme;
use tracing::debug;

use crate::config::Config;
use crate::docker::{build_run_command, image_from_entry, launch, list_images, render_command};
use crate::error::AppError;
use crate::model::{MountMode, Shell};

pub struct LaunchOptions {
    pub shell: Shell,
    pub mount: MountMode,
    pub image: Option<String>,
    pub verbose: bool,
}

pub fn execute_launch(options: LaunchOptions) -> Result<(), AppError> {
    let config = Config::load()?;

    let image = match options.image.filter(|image| !image.trim().is_empty()) {
        Some(image) => image,
        None => {
            let entries = list_images(&config.launcher.docker)?;
            if entries.is_empty() {
                return Err(AppError::NoImages);
            }
            select_image(&entries)?
        }
    };

    let argv = build_run_command(&config.launcher, options.shell, options.mount, &image, None)?;

    if options.verbose {
        println!("{}", render_command(&argv));
        return Ok(());
    }

    launch(&argv)
}

fn select_image(entries: &[String]) -> Result<String, AppError> {
    let selection = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select Docker image")
        .items(entries)
        .interact_opt();

    let outcome = selection_outcome(selection, entries);
    if matches!(outcome, Err(AppError::Interrupted)) {
        let _ = dialoguer::console::Term::stderr().show_cursor();
    }
    outcome
}

/// Map the finder result onto the picked image reference.
fn selection_outcome(
    selection: Result<Option<usize>, dialoguer::Error>,
    entries: &[String],
) -> Result<String, AppError> {
    match selection {
        Ok(Some(index)) => {
            let image = entries.get(index).map(|entry| image_from_entry(entry)).unwrap_or("");
            if image.is_empty() { Err(AppError::NoSelection) } else { Ok(image.to_string()) }
        }
        Ok(None) => Err(AppError::NoSelection),
        Err(dialoguer::Error::IO(err)) if err.kind() == io::ErrorKind::Interrupted => {
            Err(AppError::Interrupted)
        }
        Err(err) => {
            debug!("image selection failed: {err}");
            Err(AppError::NoSelection)
        }
    }
}
