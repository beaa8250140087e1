use serde::{Deserialize, Serialize};

/// A named, language-tagged synthesis voice offered by the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    /// Display name (e.g. `"Samantha"`).
    pub name: String,
    /// BCP 47 language tag (e.g. `"en-US"`).
    pub lang: String,
}

impl VoiceDescriptor {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    /// Selector label: `"{name} ({lang})"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.lang)
    }
}
