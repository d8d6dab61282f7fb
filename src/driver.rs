//! Interactive driver loop.
//!
//! Repeatedly prompts for an input mode, stages the source into a clean
//! workspace, and hands the staged workspace to the runner, which tries the
//! candidate base images first-success-wins.

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::engine::ContainerEngine;
use crate::prompt;
use crate::runner::{self, RunSpec};
use crate::validation;
use crate::workspace;

const MODE_OPTIONS: &[(&str, &str)] = &[
    ("Inline source", "type Python code line by line, END to finish"),
    ("Project directory", "use an existing directory containing the entry file"),
    ("Quit", "exit pydock"),
];

/// Run the interactive loop until the user quits.
pub async fn run(engine: &dyn ContainerEngine, config: &Config) -> Result<()> {
    loop {
        let choice = prompt::prompt_select(
            "How would you like to provide your Python program?",
            MODE_OPTIONS,
            0,
        )?;

        let staged = match choice {
            0 => stage_inline_mode(config)?,
            1 => stage_directory_mode(config)?,
            _ => {
                println!("Exiting...");
                return Ok(());
            }
        };
        if !staged {
            continue;
        }

        let image_tag = prompt_image_tag()?;

        println!(
            "Creating a Docker image from your input. {} candidate Python base images will be attempted.",
            config.images.candidates.len()
        );

        let spec = RunSpec {
            workspace: &config.workspace.dir,
            image_tag: &image_tag,
            entry_file: &config.workspace.entry_file,
        };
        match runner::run_candidates(engine, &spec, &config.images.candidates).await {
            Some(base_image) => {
                println!("Execution completed successfully with {}", base_image);
            }
            None => {
                println!("Execution failed for every candidate Python version.");
            }
        }
    }
}

/// Read inline source and stage it; returns false when staging failed.
fn stage_inline_mode(config: &Config) -> Result<bool> {
    println!("Input your source code line by line. Type 'END' (without quotes) to finish.");
    let source = prompt::read_source_stdin()?;

    match workspace::stage_inline(&config.workspace.dir, &source, &config.workspace.entry_file) {
        Ok(()) => Ok(true),
        Err(e) => {
            eprintln!("{:#}", e);
            Ok(false)
        }
    }
}

/// Prompt for a project directory and stage it; returns false when the user
/// backed out or staging failed.
fn stage_directory_mode(config: &Config) -> Result<bool> {
    let path = prompt::prompt_line(&format!(
        "Enter the directory containing your {} (or 'exit' to go back): ",
        config.workspace.entry_file
    ))?;
    if path.eq_ignore_ascii_case("exit") {
        return Ok(false);
    }

    let user_dir = PathBuf::from(path);
    match workspace::stage_directory(&config.workspace.dir, &user_dir, &config.workspace.entry_file)
    {
        Ok(()) => Ok(true),
        Err(e) => {
            eprintln!("{:#}", e);
            Ok(false)
        }
    }
}

/// Prompt for an image tag until a valid one is entered.
fn prompt_image_tag() -> Result<String> {
    loop {
        let tag = prompt::prompt_line(
            "Enter the image tag for the build (lowercase, e.g. python-user-hello-world): ",
        )?;
        match validation::validate_image_tag(&tag) {
            Ok(()) => return Ok(tag),
            Err(e) => println!("{}", e),
        }
    }
}
