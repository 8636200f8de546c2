//! mermaid-retheme - Apply cohesive color themes to rendered Mermaid diagrams
//!
//! This library takes Mermaid source, obtains SVG from whichever rendering
//! backend the host provides, and rewrites the SVG's styling to match a named
//! palette. When no backend can render, a themed placeholder is produced instead.
//!
//! # Example
//!
//! ```rust
//! use futures::executor::block_on;
//! use futures::future;
//! use mermaid_retheme::{render_into, Binding, Element, HostBindings, RenderOutput, SECONDARY_BINDING};
//!
//! let bindings = HostBindings::new().with_binding(
//!     SECONDARY_BINDING,
//!     Binding::mermaid(
//!         |_config| future::ready(Ok(())),
//!         |_id, _source| future::ready(Ok(RenderOutput {
//!             svg: r#"<svg xmlns="http://www.w3.org/2000/svg"><text>A</text></svg>"#.to_string(),
//!         })),
//!     ),
//! );
//!
//! let mut container = Element::new("div");
//! block_on(render_into("graph TD; A-->B", &mut container, "nord", &bindings));
//! println!("{}", container.inner_markup());
//! ```
//!
//! # Fallback order
//!
//! 1. `beautifulMermaid.renderMermaid(source, palette)`
//! 2. `mermaid.initialize(config)` + `mermaid.render(id, source)`
//! 3. Placeholder with guidance text

pub mod backend;
pub mod color;
pub mod dom;
pub mod error;
pub mod render;
pub mod settings;
pub mod svg;
pub mod theme;
pub mod types;

pub use backend::{Binding, Callable, HostBindings, PRIMARY_BINDING, SECONDARY_BINDING};
pub use color::{blend, BlendMode};
pub use dom::{parse_html_markup, parse_markup, Element, Node, Styleable};
pub use error::{BackendError, MarkupError, RenderError, SettingsError};
pub use render::{render_into, render_into_with, RenderOptions};
pub use settings::{CodeBlockProcessor, ProcessOutcome, Settings};
pub use theme::{lookup, Palette, DEFAULT_THEME};
pub use types::*;

/// Re-theme already rendered SVG markup without going through a backend.
///
/// # Example
/// ```rust
/// let svg = mermaid_retheme::retheme_svg(r#"<svg><text>A</text></svg>"#, "nord").unwrap();
/// assert!(svg.contains("--bg:#2e3440"));
/// ```
pub fn retheme_svg(markup: &str, theme_name: &str) -> Result<String, MarkupError> {
    let mut root = parse_markup(markup)?
        .into_first("svg")
        .ok_or(MarkupError::MissingSvg)?;
    svg::apply(&mut root, &lookup(theme_name));
    root.add_class(svg::MARKER_CLASS);
    Ok(root.to_markup())
}
