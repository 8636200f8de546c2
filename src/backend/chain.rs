//! The fallback chain: primary renderer → mermaid.js → placeholder.
//!
//! States run strictly in order and stop at the first one that yields a tree.
//! Backend failures are logged and fall through; the placeholder state cannot fail.

use uuid::Uuid;

use super::binding::{Backend, HostBindings, PrimaryBackend, SecondaryBackend};
use crate::color::BlendMode;
use crate::dom::{parse_html_markup, parse_markup, Element, Styleable};
use crate::error::{MarkupError, RenderError};
use crate::svg::{self, MARKER_CLASS, UNAVAILABLE_CLASS};
use crate::theme::{self, Palette};
use crate::types::MermaidConfig;

/// Guidance shown when no renderer could produce a diagram
pub const UNAVAILABLE_MESSAGES: [&str; 2] = [
    "⚠️ Beautiful Mermaid requires a Mermaid renderer to be loaded.",
    "Enable the built-in Mermaid support in settings, or load beautiful-mermaid.",
];

/// Render `source` with the first working backend, themed with `theme_name`.
pub async fn render(source: &str, theme_name: &str, bindings: &HostBindings) -> Element {
    render_with(source, theme_name, bindings, BlendMode::Threshold).await
}

pub async fn render_with(
    source: &str,
    theme_name: &str,
    bindings: &HostBindings,
    mode: BlendMode,
) -> Element {
    let palette = theme::lookup(theme_name);

    for backend in bindings.resolve() {
        log::debug!("Rendering diagram with {} backend", backend.name());
        match backend.attempt(source, theme_name, &palette, mode).await {
            Ok(node) => return node,
            Err(e) => log::error!("Mermaid {} backend failed: {}", backend.name(), e),
        }
    }

    placeholder(&palette, mode)
}

impl Backend {
    /// Run this state of the chain once.
    pub async fn attempt(
        &self,
        source: &str,
        theme_name: &str,
        palette: &Palette,
        mode: BlendMode,
    ) -> Result<Element, RenderError> {
        match self {
            Backend::Primary(primary) => primary.attempt(source, palette, mode).await,
            Backend::Secondary(secondary) => {
                secondary.attempt(source, theme_name, palette, mode).await
            }
            Backend::Unavailable => Ok(placeholder(palette, mode)),
        }
    }
}

impl PrimaryBackend {
    async fn attempt(
        &self,
        source: &str,
        palette: &Palette,
        mode: BlendMode,
    ) -> Result<Element, RenderError> {
        let markup = (self.render_mermaid)(source.to_string(), palette.clone()).await?;

        let mut root = parse_markup(&markup)?;
        if !root.name().eq_ignore_ascii_case("svg") {
            return Err(MarkupError::NotSvg(root.name().to_string()).into());
        }

        svg::apply_with(&mut root, palette, mode);
        svg::inject_theme_style(&mut root, &palette.resolve(mode));
        root.add_class(MARKER_CLASS);
        Ok(root)
    }
}

impl SecondaryBackend {
    async fn attempt(
        &self,
        source: &str,
        theme_name: &str,
        palette: &Palette,
        mode: BlendMode,
    ) -> Result<Element, RenderError> {
        let source = source.trim();

        (self.initialize)(MermaidConfig::for_palette_name(theme_name)).await?;
        let output = (self.render)(render_id(), source.to_string()).await?;

        // mermaid.js output comes from innerHTML, not an XML serializer
        let mut root = parse_html_markup(&output.svg)?
            .into_first("svg")
            .ok_or(MarkupError::MissingSvg)?;

        svg::apply_with(&mut root, palette, mode);
        root.add_class(MARKER_CLASS);
        Ok(root)
    }
}

/// `mermaid-` followed by nine lowercase alphanumerics
pub fn render_id() -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("mermaid-{}", suffix)
}

/// The "renderer unavailable" placeholder, styled with the palette.
pub fn placeholder(palette: &Palette, mode: BlendMode) -> Element {
    let border = palette.border_or_blend(mode);

    let mut div = Element::new("div")
        .with_attribute("class", &format!("{} {}", MARKER_CLASS, UNAVAILABLE_CLASS))
        .with_style("--bg", &palette.bg)
        .with_style("--fg", &palette.fg)
        .with_style("--border", &border)
        .with_style("padding", "20px")
        .with_style("text-align", "center")
        .with_style("color", &palette.fg)
        .with_style("background", &palette.bg)
        .with_style("border-radius", "8px");

    for message in UNAVAILABLE_MESSAGES {
        div.append_child(Element::new("p").with_text(message));
    }
    div.set_attribute("role", "note");
    div
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Binding, PRIMARY_BINDING, SECONDARY_BINDING};
    use crate::error::BackendError;
    use crate::types::{MermaidTheme, RenderOutput};
    use futures::executor::block_on;
    use futures::future;
    use std::cell::RefCell;
    use std::rc::Rc;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="white" stroke="grey"/><text>A</text></svg>"#;

    #[test]
    fn test_render_id_shape() {
        let id = render_id();
        assert!(id.starts_with("mermaid-"));
        let suffix = &id["mermaid-".len()..];
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_ne!(render_id(), render_id());
    }

    #[test]
    fn test_placeholder() {
        let node = placeholder(&theme::lookup("nord"), BlendMode::Threshold);
        assert_eq!(node.name(), "div");
        assert!(node.has_class(MARKER_CLASS));
        assert!(node.has_class(UNAVAILABLE_CLASS));
        assert_eq!(node.style_property("--bg"), Some("#2e3440"));
        assert_eq!(node.style_property("--fg"), Some("#d8dee9"));
        assert_eq!(node.style_property("--border"), Some("#2e3440"));
        assert_eq!(node.child_elements().count(), 2);
        assert_eq!(
            node.child_elements().next().unwrap().text_content(),
            UNAVAILABLE_MESSAGES[0]
        );
    }

    #[test]
    fn test_primary_receives_source_and_palette() {
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let bindings = HostBindings::new().with_binding(
            PRIMARY_BINDING,
            Binding::beautiful_mermaid(move |source, palette| {
                *sink.borrow_mut() = Some((source, palette));
                future::ready(Ok(SVG.to_string()))
            }),
        );

        let node = block_on(render("  graph TD; A-->B\n", "dracula", &bindings));
        assert_eq!(node.name(), "svg");
        assert!(node.has_class(MARKER_CLASS));
        assert_eq!(node.child_elements().next().unwrap().name(), "style");

        let (source, palette) = seen.borrow_mut().take().unwrap();
        // The primary backend gets the source untrimmed
        assert_eq!(source, "  graph TD; A-->B\n");
        assert_eq!(palette, theme::lookup("dracula"));
    }

    #[test]
    fn test_primary_non_svg_root_falls_through() {
        let bindings = HostBindings::new()
            .with_binding(
                PRIMARY_BINDING,
                Binding::beautiful_mermaid(|_, _| future::ready(Ok("<div/>".to_string()))),
            )
            .with_binding(
                SECONDARY_BINDING,
                Binding::mermaid(
                    |_| future::ready(Ok(())),
                    |_, _| future::ready(Ok(RenderOutput { svg: SVG.to_string() })),
                ),
            );

        let node = block_on(render("graph TD", "nord", &bindings));
        assert_eq!(node.name(), "svg");
        // Secondary output carries no injected <style>
        assert_eq!(node.child_elements().next().unwrap().name(), "rect");
    }

    #[test]
    fn test_secondary_initialize_and_render_arguments() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let init_calls = Rc::clone(&calls);
        let render_calls = Rc::clone(&calls);
        let bindings = HostBindings::new().with_binding(
            SECONDARY_BINDING,
            Binding::mermaid(
                move |config: MermaidConfig| {
                    init_calls.borrow_mut().push(format!("init:{}", config.theme));
                    future::ready(Ok(()))
                },
                move |id: String, source: String| {
                    render_calls.borrow_mut().push(format!("render:{}:{}", id.len(), source));
                    future::ready(Ok(RenderOutput {
                        svg: format!("<div>{}</div>", SVG),
                    }))
                },
            ),
        );

        let node = block_on(render("\n graph LR\n", "solarized-light", &bindings));
        assert_eq!(node.name(), "svg");
        assert_eq!(
            *calls.borrow(),
            vec!["init:default".to_string(), "render:17:graph LR".to_string()]
        );

        calls.borrow_mut().clear();
        block_on(render("graph LR", "unknown", &bindings));
        assert_eq!(calls.borrow()[0], format!("init:{}", MermaidTheme::Dark));
    }

    #[test]
    fn test_secondary_accepts_html_serialized_svg() {
        let outputs = [
            r#"<svg xmlns="http://www.w3.org/2000/svg"><foreignObject><div xmlns="http://www.w3.org/1999/xhtml">A<br>B</div></foreignObject></svg>"#,
            r#"<svg xmlns="http://www.w3.org/2000/svg"><text>A&nbsp;B</text></svg>"#,
        ];

        for svg in outputs {
            let bindings = HostBindings::new().with_binding(
                SECONDARY_BINDING,
                Binding::mermaid(
                    |_| future::ready(Ok(())),
                    move |_, _| future::ready(Ok(RenderOutput { svg: svg.to_string() })),
                ),
            );
            let node = block_on(render("graph TD", "nord", &bindings));
            assert_eq!(node.name(), "svg");
            assert!(!node.has_class(UNAVAILABLE_CLASS));
        }
    }

    #[test]
    fn test_secondary_keeps_xhtml_labels() {
        let bindings = HostBindings::new().with_binding(
            SECONDARY_BINDING,
            Binding::mermaid(
                |_| future::ready(Ok(())),
                |_, _| {
                    future::ready(Ok(RenderOutput {
                        svg: r#"<svg xmlns="http://www.w3.org/2000/svg"><foreignObject><div xmlns="http://www.w3.org/1999/xhtml"><span>A</span><br></div></foreignObject></svg>"#.to_string(),
                    }))
                },
            ),
        );
        let node = block_on(render("graph TD", "nord", &bindings));
        let markup = node.to_markup();
        assert!(markup.contains(r#"<div xmlns="http://www.w3.org/1999/xhtml"><span>A</span><br/></div>"#));
    }

    #[test]
    fn test_primary_rejects_html_only_markup() {
        let bindings = HostBindings::new().with_binding(
            PRIMARY_BINDING,
            Binding::beautiful_mermaid(|_, _| {
                future::ready(Ok("<svg><text>A<br>B</text></svg>".to_string()))
            }),
        );
        let node = block_on(render("graph TD", "nord", &bindings));
        assert!(node.has_class(UNAVAILABLE_CLASS));
    }

    #[test]
    fn test_secondary_failures_end_in_placeholder() {
        let failing_init = Binding::mermaid(
            |_| future::ready(Err(BackendError::new("boom"))),
            |_, _| future::ready(Ok(RenderOutput { svg: SVG.to_string() })),
        );
        let unparsable = Binding::mermaid(
            |_| future::ready(Ok(())),
            |_, _| future::ready(Ok(RenderOutput { svg: "<svg><g></svg>".to_string() })),
        );
        let no_svg = Binding::mermaid(
            |_| future::ready(Ok(())),
            |_, _| future::ready(Ok(RenderOutput { svg: "<div><p/></div>".to_string() })),
        );

        for binding in [failing_init, unparsable, no_svg] {
            let bindings = HostBindings::new().with_binding(SECONDARY_BINDING, binding);
            let node = block_on(render("graph TD", "nord", &bindings));
            assert!(node.has_class(UNAVAILABLE_CLASS));
        }
    }
}
