//! Plain data types exchanged with rendering backends.

use serde::{Deserialize, Serialize};

// ============================================================================
// Mermaid theme enum
// ============================================================================

/// Mermaid built-in theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MermaidTheme {
    /// Light theme (white background, dark text)
    Default,
    /// Dark theme (dark background, light text)
    Dark,
}

impl MermaidTheme {
    /// Map a palette identifier onto the closest built-in mermaid.js theme.
    ///
    /// Any identifier containing `light` renders on `default`, everything else on `dark`.
    pub fn for_palette_name(name: &str) -> Self {
        if name.contains("light") {
            MermaidTheme::Default
        } else {
            MermaidTheme::Dark
        }
    }
}

impl std::fmt::Display for MermaidTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MermaidTheme::Default => write!(f, "default"),
            MermaidTheme::Dark => write!(f, "dark"),
        }
    }
}

// ============================================================================
// Secondary backend configuration
// ============================================================================

/// mermaid.js `securityLevel` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    Strict,
    Loose,
    Antiscript,
    Sandbox,
}

/// Configuration handed to the baseline renderer's `initialize` capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MermaidConfig {
    pub theme: MermaidTheme,
    pub security_level: SecurityLevel,
    pub start_on_load: bool,
}

impl MermaidConfig {
    /// Relaxed configuration used when re-rendering for a named palette.
    pub fn for_palette_name(name: &str) -> Self {
        Self {
            theme: MermaidTheme::for_palette_name(name),
            security_level: SecurityLevel::Loose,
            start_on_load: false,
        }
    }
}

/// Result of the baseline renderer's `render` capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOutput {
    /// Rendered SVG markup
    pub svg: String,
}
