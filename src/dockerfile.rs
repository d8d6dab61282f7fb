//! Dockerfile generation for staged Python workspaces.
//!
//! A single fixed template with two substitution points: the base-image tag
//! and the entry-file name. A fresh Dockerfile is rendered for every build
//! attempt and written into the workspace before the build starts.

/// Dockerfile template. The program runs once during `docker build` (so an
/// incompatible interpreter fails the build) and again at container start.
const TEMPLATE: &str = r#"# Use an official Python runtime as the parent image
FROM {base_image}

# Set the working directory in the container
WORKDIR /app

# Copy the staged workspace into the container
COPY . /app

# Install dependencies from requirements.txt
RUN pip install -r requirements.txt

# Run the entry file during the build
RUN python {entry_file}

# Run the entry file when the container starts
CMD ["python", "{entry_file}"]
"#;

/// Render the Dockerfile for one build attempt.
pub fn render(base_image: &str, entry_file: &str) -> String {
    TEMPLATE
        .replace("{base_image}", base_image)
        .replace("{entry_file}", entry_file)
}
