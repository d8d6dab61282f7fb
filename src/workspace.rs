//! Workspace staging for container builds.
//!
//! The workspace is the directory the image is built from. It is destroyed and
//! recreated at the start of every run, so nothing from a previous run can leak
//! into the next build. Staging either writes inline source as the entry file
//! or copies a whole user project directory into the workspace.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// Dependency manifest written (empty) into every fresh workspace.
pub const REQUIREMENTS_MANIFEST: &str = "requirements.txt";

/// Name of the generated Dockerfile inside the workspace.
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// Stage inline source code into a clean workspace.
///
/// The source is written as `entry_file`; an empty `requirements.txt` is
/// created alongside it.
pub fn stage_inline(workspace: &Path, source: &str, entry_file: &str) -> Result<()> {
    reset(workspace)?;
    fs::write(workspace.join(entry_file), source)
        .with_context(|| format!("Failed to write {} into workspace", entry_file))?;
    Ok(())
}

/// Stage an existing project directory into a clean workspace.
///
/// The user directory must not be the workspace itself, and must contain the
/// entry file. The whole directory tree is copied, subdirectories included.
pub fn stage_directory(workspace: &Path, user_dir: &Path, entry_file: &str) -> Result<()> {
    if !user_dir.is_dir() {
        bail!("The directory {} does not exist", user_dir.display());
    }
    if same_path(user_dir, workspace) {
        bail!("The project directory and the workspace cannot be the same path");
    }
    if !user_dir.join(entry_file).is_file() {
        bail!(
            "No {} found in {}. The project directory must contain the entry file",
            entry_file,
            user_dir.display()
        );
    }

    reset(workspace)?;
    copy_tree(user_dir, workspace)
        .with_context(|| format!("Failed to copy {} into workspace", user_dir.display()))?;
    Ok(())
}

/// Write a rendered Dockerfile into the workspace.
pub fn write_dockerfile(workspace: &Path, content: &str) -> Result<()> {
    fs::write(workspace.join(DOCKERFILE_NAME), content)
        .context("Failed to write Dockerfile into workspace")?;
    Ok(())
}

/// Check that the entry file is present in the workspace.
pub fn has_entry_file(workspace: &Path, entry_file: &str) -> bool {
    workspace.join(entry_file).is_file()
}

/// Delete any previous workspace, recreate it, and write the empty manifest.
fn reset(workspace: &Path) -> Result<()> {
    if workspace.exists() {
        fs::remove_dir_all(workspace)
            .with_context(|| format!("Failed to remove old workspace {}", workspace.display()))?;
    }
    fs::create_dir_all(workspace)
        .with_context(|| format!("Failed to create workspace {}", workspace.display()))?;

    // Every build installs from a manifest, even when the user supplied none.
    fs::write(workspace.join(REQUIREMENTS_MANIFEST), "")
        .context("Failed to create empty requirements.txt")?;
    log::debug!(
        "Workspace {} reset with empty {}",
        workspace.display(),
        REQUIREMENTS_MANIFEST
    );
    Ok(())
}

/// Compare two paths, resolving symlinks where possible.
fn same_path(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Recursively copy a directory tree into an existing destination directory.
fn copy_tree(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let dest_path = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            fs::create_dir_all(&dest_path)?;
            copy_tree(&entry.path(), &dest_path)?;
        } else {
            fs::copy(entry.path(), &dest_path)?;
        }
    }
    Ok(())
}
