//! Theme registry - named palettes for re-theming rendered diagrams.
//!
//! Architecture:
//!   - Two required colors: `bg` (background) and `fg` (foreground)
//!   - Optional enrichment colors: `line`, `accent`, `muted`, `surface`, `border`
//!   - Unset optionals are synthesized on demand by blending `bg` towards `fg`
//!     with the fixed ratios in [`Mix`]; a `Palette` is never mutated to fill them in

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::color::BlendMode;

/// Identifier used when a lookup misses.
pub const DEFAULT_THEME: &str = "tokyo-night";

/// Diagram color configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Background color → CSS variable --bg
    pub bg: String,
    /// Foreground / primary text color → CSS variable --fg
    pub fg: String,
    /// Edge/connector color → CSS variable --line (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    /// Arrow heads, highlights → CSS variable --accent (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    /// Secondary text, edge labels → CSS variable --muted (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<String>,
    /// Node/box fill tint → CSS variable --surface (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    /// Node/group stroke color → CSS variable --border (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
}

/// Blend ratios (`bg` → `fg`) for synthesized palette fields
pub struct Mix;

impl Mix {
    pub const LINE: f64 = 0.3;
    pub const ACCENT: f64 = 0.5;
    pub const MUTED: f64 = 0.6;
    pub const SURFACE: f64 = 0.03;
    pub const BORDER: f64 = 0.2;
}

/// A palette with every optional field filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPalette {
    pub bg: String,
    pub fg: String,
    pub line: String,
    pub accent: String,
    pub muted: String,
    pub surface: String,
    pub border: String,
}

impl Palette {
    /// Create a palette with only the two required colors.
    pub fn new(bg: impl Into<String>, fg: impl Into<String>) -> Self {
        Self {
            bg: bg.into(),
            fg: fg.into(),
            line: None,
            accent: None,
            muted: None,
            surface: None,
            border: None,
        }
    }

    fn field_or_blend(&self, field: &Option<String>, ratio: f64, mode: BlendMode) -> String {
        match field {
            Some(value) => value.clone(),
            None => mode.blend(&self.bg, &self.fg, ratio),
        }
    }

    pub fn line_or_blend(&self, mode: BlendMode) -> String {
        self.field_or_blend(&self.line, Mix::LINE, mode)
    }

    pub fn accent_or_blend(&self, mode: BlendMode) -> String {
        self.field_or_blend(&self.accent, Mix::ACCENT, mode)
    }

    pub fn muted_or_blend(&self, mode: BlendMode) -> String {
        self.field_or_blend(&self.muted, Mix::MUTED, mode)
    }

    pub fn surface_or_blend(&self, mode: BlendMode) -> String {
        self.field_or_blend(&self.surface, Mix::SURFACE, mode)
    }

    pub fn border_or_blend(&self, mode: BlendMode) -> String {
        self.field_or_blend(&self.border, Mix::BORDER, mode)
    }

    /// Fill in every optional field.
    pub fn resolve(&self, mode: BlendMode) -> ResolvedPalette {
        ResolvedPalette {
            bg: self.bg.clone(),
            fg: self.fg.clone(),
            line: self.line_or_blend(mode),
            accent: self.accent_or_blend(mode),
            muted: self.muted_or_blend(mode),
            surface: self.surface_or_blend(mode),
            border: self.border_or_blend(mode),
        }
    }
}

impl ResolvedPalette {
    /// CSS custom properties in declaration order.
    pub fn css_variables(&self) -> [(&'static str, &str); 7] {
        [
            ("--bg", self.bg.as_str()),
            ("--fg", self.fg.as_str()),
            ("--line", self.line.as_str()),
            ("--accent", self.accent.as_str()),
            ("--muted", self.muted.as_str()),
            ("--surface", self.surface.as_str()),
            ("--border", self.border.as_str()),
        ]
    }
}

// ============================================================================
// Registry
// ============================================================================

struct ThemeDef {
    id: &'static str,
    label: &'static str,
    bg: &'static str,
    fg: &'static str,
    accent: Option<&'static str>,
}

impl ThemeDef {
    const fn new(
        id: &'static str,
        label: &'static str,
        bg: &'static str,
        fg: &'static str,
        accent: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            bg,
            fg,
            accent: Some(accent),
        }
    }

    fn palette(&self) -> Palette {
        Palette {
            accent: self.accent.map(str::to_string),
            ..Palette::new(self.bg, self.fg)
        }
    }
}

#[rustfmt::skip]
const THEMES: &[ThemeDef] = &[
    ThemeDef::new("tokyo-night",       "Tokyo night",       "#1a1b26", "#a9b1d6", "#7aa2f7"),
    ThemeDef::new("tokyo-night-storm", "Tokyo night storm", "#24283b", "#a9b1d6", "#7aa2f7"),
    ThemeDef::new("tokyo-night-light", "Tokyo night light", "#d5d6db", "#34548a", "#34548a"),
    ThemeDef::new("catppuccin-mocha",  "Catppuccin mocha",  "#1e1e2e", "#cdd6f4", "#cba6f7"),
    ThemeDef::new("catppuccin-latte",  "Catppuccin latte",  "#eff1f5", "#4c4f69", "#8839ef"),
    ThemeDef::new("nord",              "Nord",              "#2e3440", "#d8dee9", "#88c0d0"),
    ThemeDef::new("nord-light",        "Nord light",        "#eceff4", "#2e3440", "#5e81ac"),
    ThemeDef::new("dracula",           "Dracula",           "#282a36", "#f8f8f2", "#bd93f9"),
    ThemeDef::new("github-dark",       "GitHub dark",       "#0d1117", "#c9d1d9", "#4493f8"),
    ThemeDef::new("github-light",      "GitHub light",      "#ffffff", "#24292f", "#0969da"),
    ThemeDef::new("solarized-dark",    "Solarized dark",    "#002b36", "#839496", "#268bd2"),
    ThemeDef::new("solarized-light",   "Solarized light",   "#fdf6e3", "#657b83", "#268bd2"),
    ThemeDef::new("one-dark",          "One dark",          "#282c34", "#abb2bf", "#c678dd"),
    ThemeDef::new("zinc-dark",         "Zinc dark",         "#18181b", "#a1a1aa", "#27272a"),
    ThemeDef::new("zinc-light",        "Zinc light",        "#ffffff", "#27272a", "#27272a"),
];

lazy_static! {
    static ref REGISTRY: HashMap<&'static str, &'static ThemeDef> =
        THEMES.iter().map(|def| (def.id, def)).collect();
}

/// Look up a palette by identifier, falling back to [`DEFAULT_THEME`].
pub fn lookup(id: &str) -> Palette {
    REGISTRY
        .get(id)
        .or_else(|| REGISTRY.get(DEFAULT_THEME))
        .map(|def| def.palette())
        // The default entry is part of THEMES
        .unwrap_or_else(|| Palette::new("#1a1b26", "#a9b1d6"))
}

/// Whether `id` names a registered theme (exact match).
pub fn contains(id: &str) -> bool {
    REGISTRY.contains_key(id)
}

/// Registered `(id, label)` pairs in registration order.
pub fn themes() -> impl Iterator<Item = (&'static str, &'static str)> {
    THEMES.iter().map(|def| (def.id, def.label))
}
