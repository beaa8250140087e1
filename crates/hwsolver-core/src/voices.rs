//! Voice catalog and selection.
//!
//! The host publishes its voice catalog through a `watch` channel and may
//! replace it at any time (voices often load lazily after startup). The
//! registry reads the latest snapshot on every call, so it never serves a
//! stale list, and hands out receivers so dependents can react to updates.

use regex::{Regex, RegexBuilder};
use tokio::sync::watch;

use crate::config::ConfigError;
use crate::domain::VoiceDescriptor;

/// Selector label shown when the host offers no voices.
pub const SYSTEM_VOICE_LABEL: &str = "System voice";

/// Available voices plus the user's selection.
#[derive(Debug)]
pub struct VoiceRegistry {
    catalog: watch::Receiver<Vec<VoiceDescriptor>>,
    selected: usize,
    locale: Regex,
}

impl VoiceRegistry {
    /// Create a registry over a host catalog.
    ///
    /// `locale_pattern` is matched case-insensitively against language tags.
    pub fn new(
        catalog: watch::Receiver<Vec<VoiceDescriptor>>,
        locale_pattern: &str,
    ) -> Result<Self, ConfigError> {
        let locale = RegexBuilder::new(locale_pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| ConfigError::InvalidLocalePattern {
                pattern: locale_pattern.to_string(),
                source,
            })?;

        Ok(Self {
            catalog,
            selected: 0,
            locale,
        })
    }

    /// Current snapshot of the host catalog.
    pub fn list(&self) -> Vec<VoiceDescriptor> {
        self.catalog.borrow().clone()
    }

    /// A receiver notified on every catalog update.
    pub fn subscribe(&self) -> watch::Receiver<Vec<VoiceDescriptor>> {
        self.catalog.clone()
    }

    /// Select a voice by index.
    ///
    /// The index is kept even when out of range, since the catalog may grow
    /// later. Returns whether it addresses a voice right now.
    pub fn select(&mut self, index: usize) -> bool {
        self.selected = index;
        let in_range = index < self.catalog.borrow().len();
        if !in_range {
            tracing::debug!(index, "Selected voice index is out of range, using fallback");
        }
        in_range
    }

    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// Voice to use for the next narration.
    ///
    /// The selected voice if in range, else the first voice whose language
    /// matches the locale pattern, else `None` (platform default).
    pub fn current(&self) -> Option<VoiceDescriptor> {
        let voices = self.catalog.borrow();
        voices
            .get(self.selected)
            .or_else(|| voices.iter().find(|v| self.locale.is_match(&v.lang)))
            .cloned()
    }

    /// Labels for a voice selector, index-aligned with [`Self::list`].
    pub fn labels(&self) -> Vec<String> {
        let voices = self.catalog.borrow();
        if voices.is_empty() {
            return vec![SYSTEM_VOICE_LABEL.to_string()];
        }
        voices.iter().map(VoiceDescriptor::label).collect()
    }
}
