//! Input validation for user-provided names.
//!
//! User input that ends up in image references or file paths is validated
//! through this module before any engine call is made with it.

use anyhow::{Result, bail};

/// Maximum length for image tags
const MAX_IMAGE_TAG_LEN: usize = 128;

/// Validate a user-entered Docker image tag.
///
/// Valid tags:
/// - Start with a lowercase letter or digit
/// - Contain only lowercase letters, digits, periods, hyphens, and underscores
/// - Are between 1 and 128 characters long
///
/// # Security
/// This prevents injection via malformed image references that would otherwise
/// be passed verbatim to the Docker daemon.
pub fn validate_image_tag(tag: &str) -> Result<()> {
    if tag.is_empty() {
        bail!("Image tag cannot be empty");
    }

    if tag.len() > MAX_IMAGE_TAG_LEN {
        bail!("Image tag too long (max {} characters)", MAX_IMAGE_TAG_LEN);
    }

    let first = tag.chars().next().unwrap();
    if !first.is_ascii_lowercase() && !first.is_ascii_digit() {
        bail!("Image tag must start with a lowercase letter or digit");
    }

    for ch in tag.chars() {
        if ch.is_ascii_uppercase() {
            bail!("Image tag must be lowercase");
        }
        if !ch.is_ascii_alphanumeric() && ch != '.' && ch != '-' && ch != '_' {
            bail!(
                "Image tag contains invalid character '{}'. Use only lowercase letters, digits, periods, hyphens, and underscores",
                ch
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_image_tags() {
        assert!(validate_image_tag("python-user-hello-world").is_ok());
        assert!(validate_image_tag("myapp").is_ok());
        assert!(validate_image_tag("app_1.2").is_ok());
        assert!(validate_image_tag("0test").is_ok());
    }

    #[test]
    fn test_invalid_image_tags() {
        // Empty
        assert!(validate_image_tag("").is_err());

        // Too long
        assert!(validate_image_tag(&"a".repeat(129)).is_err());

        // Uppercase
        assert!(validate_image_tag("MyApp").is_err());

        // Spaces and shell metacharacters
        assert!(validate_image_tag("my app").is_err());
        assert!(validate_image_tag("app;rm -rf /").is_err());
        assert!(validate_image_tag("app$(whoami)").is_err());
        assert!(validate_image_tag("app`id`").is_err());

        // Invalid start
        assert!(validate_image_tag("-app").is_err());
        assert!(validate_image_tag(".app").is_err());
    }
}
