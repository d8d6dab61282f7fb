//! Build-run-log-remove sequencing for one staged workspace.
//!
//! The runner owns the per-attempt sequence and the first-success-wins
//! iteration over the candidate base images. Every failure along the way is
//! reported and collapsed into a boolean; the driver only ever sees
//! success/failure.

use std::path::Path;
use uuid::Uuid;

use crate::dockerfile;
use crate::engine::ContainerEngine;
use crate::workspace;

/// Inputs for one run, threaded through the calls as plain values.
pub struct RunSpec<'a> {
    /// Staged workspace the image is built from.
    pub workspace: &'a Path,
    /// User-chosen tag for the built image.
    pub image_tag: &'a str,
    /// Source file the image executes.
    pub entry_file: &'a str,
}

/// Try every candidate base image in order and stop at the first success.
///
/// Returns the winning base image, or `None` when every candidate failed.
pub async fn run_candidates(
    engine: &dyn ContainerEngine,
    spec: &RunSpec<'_>,
    candidates: &[String],
) -> Option<String> {
    for base_image in candidates {
        println!("Attempting build with {}...", base_image);
        if execute_attempt(engine, spec, base_image).await {
            return Some(base_image.clone());
        }
        println!("Attempt with {} failed.", base_image);
    }
    None
}

/// One build attempt against a single base image.
///
/// Sequence: validate the entry file, write the rendered Dockerfile into the
/// workspace, build the image, run it detached, print its logs, stop and
/// remove the container. Stop errors are logged and swallowed; removal errors
/// fail the attempt.
pub async fn execute_attempt(
    engine: &dyn ContainerEngine,
    spec: &RunSpec<'_>,
    base_image: &str,
) -> bool {
    if !workspace::has_entry_file(spec.workspace, spec.entry_file) {
        log::error!(
            "{} not found in workspace {}",
            spec.entry_file,
            spec.workspace.display()
        );
        return false;
    }

    let rendered = dockerfile::render(base_image, spec.entry_file);
    if let Err(e) = workspace::write_dockerfile(spec.workspace, &rendered) {
        log::error!("{:#}", e);
        return false;
    }

    if let Err(e) = engine.build_image(spec.workspace, spec.image_tag).await {
        log::error!("Build with {} failed: {}", base_image, e);
        return false;
    }

    let container_name = format!("pydock-{}", &Uuid::new_v4().to_string()[..8]);
    let container = match engine.run_container(spec.image_tag, &container_name).await {
        Ok(id) => id,
        Err(e) => {
            log::error!("Failed to run container: {}", e);
            return false;
        }
    };

    match engine.container_logs(&container).await {
        Ok(logs) => {
            println!("Container logs:\n{}", logs);
        }
        Err(e) => {
            log::error!("Failed to fetch container logs: {}", e);
            // Best effort, so the container does not linger running.
            let _ = engine.stop_container(&container).await;
            let _ = engine.remove_container(&container).await;
            return false;
        }
    }

    if let Err(e) = engine.stop_container(&container).await {
        log::warn!("Failed to stop container {}: {}", container, e);
    }
    if let Err(e) = engine.remove_container(&container).await {
        log::error!("Failed to remove container {}: {}", container, e);
        return false;
    }

    // The Dockerfile written for this attempt stays in the workspace, so the
    // successful render is persisted alongside the staged source.
    true
}
