//! Host settings and the `mermaid` code-block processor.
//!
//! Settings are read, never written: storing them is the host's business.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::backend::HostBindings;
use crate::color::BlendMode;
use crate::dom::Element;
use crate::error::SettingsError;
use crate::render::{render_into_with, RenderOptions};
use crate::theme::DEFAULT_THEME;

/// Code-block language this crate takes over
pub const CODE_BLOCK_LANGUAGE: &str = "mermaid";

/// User-facing settings. Missing fields in a stored record take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Theme identifier
    pub theme: String,
    /// Leave code blocks to the host's own Mermaid rendering
    pub use_default_mermaid: bool,
    /// How unset palette colors are derived
    pub blend: BlendMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            use_default_mermaid: false,
            blend: BlendMode::Threshold,
        }
    }
}

impl Settings {
    /// Parse a stored settings record; `null` yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let loaded: Option<Settings> = serde_json::from_str(json)?;
        Ok(loaded.unwrap_or_default())
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            theme: self.theme.clone(),
            blend: self.blend,
        }
    }
}

/// What [`CodeBlockProcessor::process`] did with a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    Rendered,
    /// `use_default_mermaid` is set; the container was not touched
    Skipped,
}

/// Renders `mermaid` code blocks according to [`Settings`]
#[derive(Debug, Clone, Default)]
pub struct CodeBlockProcessor {
    settings: Settings,
    bindings: HostBindings,
}

impl CodeBlockProcessor {
    pub fn new(settings: Settings, bindings: HostBindings) -> Self {
        Self { settings, bindings }
    }

    pub fn language(&self) -> &'static str {
        CODE_BLOCK_LANGUAGE
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bindings_mut(&mut self) -> &mut HostBindings {
        &mut self.bindings
    }

    pub async fn process(&self, source: &str, container: &mut Element) -> ProcessOutcome {
        if self.settings.use_default_mermaid {
            return ProcessOutcome::Skipped;
        }
        render_into_with(source, container, &self.bindings, &self.settings.render_options()).await;
        ProcessOutcome::Rendered
    }
}
