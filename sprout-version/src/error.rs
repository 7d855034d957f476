use miette::Diagnostic;
use thiserror::Error;

/// Raised when a version or version range cannot be parsed.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("could not determine version from '{text}'")]
#[diagnostic(
    code(sprout::invalid_version),
    help(
        "version format is MAJOR.MINOR.PATCH with an optional qualifier (e.g. 1.0.5.RELEASE); \
         MINOR and PATCH may use the 'x' wildcard"
    )
)]
pub struct InvalidVersionError {
    /// The text that failed to parse.
    pub text: String,
}

impl InvalidVersionError {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
