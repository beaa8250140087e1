//! Controller configuration and backend address resolution.

use thiserror::Error;

/// Origin assumed when the front end is not told where it is served from.
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Language pattern used to pick a fallback voice.
pub const DEFAULT_VOICE_LOCALE: &str = "en";

/// Draft question shown on startup.
pub const DEFAULT_QUESTION: &str = "Solve: 2x + 6 = 14";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The voice locale pattern is not a valid regular expression.
    #[error("Invalid voice locale pattern '{pattern}': {source}")]
    InvalidLocalePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Configuration for [`crate::InteractionController`].
///
/// # Example
///
/// ```
/// use hwsolver_core::ControllerConfig;
///
/// let config = ControllerConfig::new()
///     .with_voice_locale("de")
///     .with_initial_question("What is 6 * 7?");
/// ```
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Case-insensitive pattern matched against voice language tags when the
    /// selected voice index is out of range.
    pub voice_locale: String,
    /// Narration rate (1.0 = neutral).
    pub rate: f32,
    /// Narration pitch (1.0 = neutral).
    pub pitch: f32,
    /// Draft question the controller starts with.
    pub initial_question: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            voice_locale: DEFAULT_VOICE_LOCALE.to_string(),
            rate: 1.0,
            pitch: 1.0,
            initial_question: DEFAULT_QUESTION.to_string(),
        }
    }
}

impl ControllerConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_voice_locale(mut self, pattern: impl Into<String>) -> Self {
        self.voice_locale = pattern.into();
        self
    }

    #[must_use]
    pub fn with_initial_question(mut self, question: impl Into<String>) -> Self {
        self.initial_question = question.into();
        self
    }
}

/// Resolve the solver service base URL.
///
/// A non-blank `override_url` always wins. Otherwise the base is derived from
/// the front end's origin by swapping the dev-server port `3000` for the
/// solver's `8000`. This is only a convention for co-located development
/// servers; deployments should set the override.
///
/// Trailing slashes are removed so callers can append `/solve`.
pub fn resolve_backend_base(override_url: Option<&str>, origin: &str) -> String {
    let base = match override_url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => url.to_string(),
        None => origin.trim().replacen("3000", "8000", 1),
    };
    base.trim_end_matches('/').to_string()
}
