//! Candidate Python base images.

/// Python base images tried in order, oldest interpreter first. The driver
/// stops at the first version that builds and runs the user's program.
pub const PYTHON_IMAGES: &[&str] = &[
    "python:3.7-slim",
    "python:3.8-slim",
    "python:3.9-slim",
    "python:3.10-slim",
    "python:3.11-slim",
    "python:3.12-slim",
];

/// Default candidate list as owned strings, for configuration defaults.
pub fn default_candidates() -> Vec<String> {
    PYTHON_IMAGES.iter().map(|s| s.to_string()).collect()
}
