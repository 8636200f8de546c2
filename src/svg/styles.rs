//! Class names, element sets and the themed `<style>` block.

use crate::theme::ResolvedPalette;

/// Class tagged onto every node this crate produces
pub const MARKER_CLASS: &str = "beautiful-mermaid-svg";

/// Additional class on the "renderer unavailable" placeholder
pub const UNAVAILABLE_CLASS: &str = "beautiful-mermaid-unavailable";

/// `data-` attribute identifying the injected `<style>` element
pub const THEME_STYLE_ATTR: &str = "data-beautiful-mermaid";

/// Elements whose fill is forced to the foreground color
pub const TEXT_TAGS: &[&str] = &["text", "tspan"];

/// Elements whose default strokes and white fills are re-themed
pub const SHAPE_TAGS: &[&str] = &[
    "path", "line", "rect", "circle", "ellipse", "polygon", "polyline",
];

pub const FONT_STACK: &str =
    r#"-apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif"#;

pub fn is_text_tag(name: &str) -> bool {
    TEXT_TAGS.contains(&name)
}

pub fn is_shape_tag(name: &str) -> bool {
    SHAPE_TAGS.contains(&name)
}

/// CSS rules scoped to [`MARKER_CLASS`], with every variable resolved.
pub fn build_style_block(palette: &ResolvedPalette) -> String {
    let vars = palette
        .css_variables()
        .iter()
        .map(|(name, value)| format!("    {}: {};", name, value))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"
  .{marker} {{
{vars}
    font-family: {font};
  }}
  .{marker} text {{ fill: var(--fg); }}
  .{marker} path,
  .{marker} line,
  .{marker} rect,
  .{marker} circle {{ stroke: var(--line); }}
  .{marker} .node rect {{ fill: var(--surface); stroke: var(--border); }}
"#,
        marker = MARKER_CLASS,
        vars = vars,
        font = FONT_STACK,
    )
}
