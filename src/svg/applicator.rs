//! Re-theming of backend-produced SVG trees, in place.
//!
//! Order of operations on the root:
//!   1. palette CSS variables (optionals synthesized)
//!   2. root background color
//!   3. text fill → fg
//!   4. default/inherited shape strokes → line (or fg)
//!   5. white shape fills → surface
//!
//! Every step overwrites rather than accumulates, so applying twice is the same as once.

use super::styles::{build_style_block, is_shape_tag, is_text_tag, THEME_STYLE_ATTR};
use crate::color::{is_hex_color, BlendMode};
use crate::dom::{Element, Styleable};
use crate::theme::{Palette, ResolvedPalette};

/// Apply `palette` to `root` and its descendants using threshold blending.
pub fn apply<N: Styleable>(root: &mut N, palette: &Palette) {
    apply_with(root, palette, BlendMode::Threshold);
}

/// Apply `palette` to `root` and its descendants.
pub fn apply_with<N: Styleable>(root: &mut N, palette: &Palette, mode: BlendMode) {
    let resolved = palette.resolve(mode);
    for (name, value) in resolved.css_variables() {
        root.set_style_property(name, value);
    }
    root.set_style_property("background-color", &palette.bg);

    // Unlike the --line variable, explicit strokes fall back to fg, not a blend
    let stroke = palette.line.as_deref().unwrap_or(&palette.fg);

    root.for_each_descendant_mut(&mut |el: &mut N| {
        if is_text_tag(el.tag_name()) {
            el.set_style_property("fill", &palette.fg);
            return;
        }
        if !is_shape_tag(el.tag_name()) {
            return;
        }

        let default_stroke = el
            .attribute("stroke")
            .is_some_and(|s| s != "none" && !is_hex_color(s));
        if default_stroke {
            el.set_style_property("stroke", stroke);
        }

        let white_fill = el.attribute("fill").is_some_and(|f| f.starts_with("white"));
        if white_fill {
            el.set_attribute("fill", &resolved.surface);
        }
    });
}

/// Insert (or replace) the scoped `<style>` element as the first child of `svg`.
pub fn inject_theme_style(svg: &mut Element, palette: &ResolvedPalette) {
    svg.retain_child_elements(|el| !(el.name() == "style" && el.attribute(THEME_STYLE_ATTR).is_some()));
    let style = Element::new("style")
        .with_attribute(THEME_STYLE_ATTR, "theme")
        .with_text(build_style_block(palette));
    svg.insert_child(0, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_markup;
    use crate::theme::lookup;

    const SAMPLE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" style="max-width: 200px">
  <g class="node">
    <rect fill="white" stroke="currentColor"/>
    <circle fill="whitesmoke" stroke="#ff0000"/>
    <ellipse fill="White" stroke="none"/>
    <text fill="#000">A<tspan fill="red">B</tspan></text>
  </g>
  <path d="M0 0L1 1" stroke="black"/>
  <line x1="0" y1="0" x2="1" y2="1"/>
  <g stroke="inherit"/>
</svg>"##;

    fn sample() -> Element {
        parse_markup(SAMPLE).unwrap()
    }

    #[test]
    fn test_root_variables_and_background() {
        let mut svg = sample();
        apply(&mut svg, &lookup("nord"));

        assert_eq!(svg.style_property("--bg"), Some("#2e3440"));
        assert_eq!(svg.style_property("--fg"), Some("#d8dee9"));
        assert_eq!(svg.style_property("--accent"), Some("#88c0d0"));
        assert_eq!(svg.style_property("--line"), Some("#2e3440"));
        assert_eq!(svg.style_property("--muted"), Some("#d8dee9"));
        assert_eq!(svg.style_property("--surface"), Some("#2e3440"));
        assert_eq!(svg.style_property("--border"), Some("#2e3440"));
        assert_eq!(svg.style_property("background-color"), Some("#2e3440"));
        // Existing declarations survive
        assert_eq!(svg.style_property("max-width"), Some("200px"));
    }

    #[test]
    fn test_text_fill_is_forced() {
        let mut svg = sample();
        apply(&mut svg, &lookup("dracula"));
        let text = svg.find_first("text").unwrap();
        assert_eq!(text.style_property("fill"), Some("#f8f8f2"));
        assert_eq!(text.find_first("tspan").unwrap().style_property("fill"), Some("#f8f8f2"));
    }

    #[test]
    fn test_strokes() {
        let mut svg = sample();
        let palette = Palette {
            line: Some("#123456".to_string()),
            ..Palette::new("#000000", "#ffffff")
        };
        apply(&mut svg, &palette);

        let rect = svg.find_first("rect").unwrap();
        assert_eq!(rect.style_property("stroke"), Some("#123456"));
        assert_eq!(rect.attribute("stroke"), Some("currentColor"));

        let circle = svg.find_first("circle").unwrap();
        assert_eq!(circle.style_property("stroke"), None);
        assert_eq!(circle.attribute("stroke"), Some("#ff0000"));

        assert_eq!(svg.find_first("ellipse").unwrap().style_property("stroke"), None);
        assert_eq!(svg.find_first("path").unwrap().style_property("stroke"), Some("#123456"));
        // No stroke attribute at all
        assert_eq!(svg.find_first("line").unwrap().style_property("stroke"), None);
        // Not a shape
        let group = svg.child_elements().last().unwrap();
        assert_eq!(group.style_property("stroke"), None);
    }

    #[test]
    fn test_stroke_falls_back_to_fg() {
        let mut svg = sample();
        apply(&mut svg, &lookup("nord"));
        assert_eq!(svg.find_first("path").unwrap().style_property("stroke"), Some("#d8dee9"));
    }

    #[test]
    fn test_white_fills_become_surface() {
        let mut svg = sample();
        apply(&mut svg, &lookup("github-dark"));
        assert_eq!(svg.find_first("rect").unwrap().attribute("fill"), Some("#0d1117"));
        assert_eq!(svg.find_first("circle").unwrap().attribute("fill"), Some("#0d1117"));
        // Prefix match is case-sensitive
        assert_eq!(svg.find_first("ellipse").unwrap().attribute("fill"), Some("White"));

        let mut svg = sample();
        let palette = Palette {
            surface: Some("#222222".to_string()),
            ..Palette::new("#000000", "#ffffff")
        };
        apply(&mut svg, &palette);
        assert_eq!(svg.find_first("rect").unwrap().attribute("fill"), Some("#222222"));
    }

    #[test]
    fn test_apply_is_idempotent() {
        for mode in [BlendMode::Threshold, BlendMode::Linear] {
            let palette = lookup("catppuccin-latte");
            let mut once = sample();
            apply_with(&mut once, &palette, mode);
            let mut twice = once.clone();
            apply_with(&mut twice, &palette, mode);
            assert_eq!(once.to_markup(), twice.to_markup());
        }
    }

    #[test]
    fn test_linear_mode_synthesizes_mixes() {
        let mut svg = sample();
        apply_with(&mut svg, &Palette::new("#000000", "#ffffff"), BlendMode::Linear);
        assert_eq!(svg.style_property("--border"), Some("#333333"));
        assert_eq!(svg.find_first("rect").unwrap().attribute("fill"), Some("#080808"));
    }

    #[test]
    fn test_empty_tree() {
        let mut svg = Element::new("svg");
        apply(&mut svg, &lookup("nord"));
        assert!(svg.children().is_empty());
        assert_eq!(svg.style_property("background-color"), Some("#2e3440"));
    }

    #[test]
    fn test_inject_theme_style_replaces_previous() {
        let mut svg = sample();
        let resolved = lookup("nord").resolve(BlendMode::Threshold);
        inject_theme_style(&mut svg, &resolved);
        inject_theme_style(&mut svg, &resolved);

        let styles: Vec<_> = svg.child_elements().filter(|el| el.name() == "style").collect();
        assert_eq!(styles.len(), 1);
        assert_eq!(svg.child_elements().next().unwrap().name(), "style");
        assert!(styles[0].text_content().contains("--bg: #2e3440;"));
    }
}
