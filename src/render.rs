//! Entry point: render diagram text into a host container.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::backend::{self, HostBindings};
use crate::color::BlendMode;
use crate::dom::Element;
use crate::theme::{self, DEFAULT_THEME};

/// Options for [`render_into_with`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Theme identifier; unknown names fall back to the default theme
    pub theme: String,
    pub blend: BlendMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            blend: BlendMode::default(),
        }
    }
}

/// Render `source` into `container`, replacing whatever it held.
///
/// Never fails: on return the container has exactly one child, either the
/// themed diagram or the "renderer unavailable" placeholder. Backend calls are
/// awaited without a timeout, so a backend that never resolves keeps this
/// future pending.
pub async fn render_into(
    source: &str,
    container: &mut Element,
    theme_name: &str,
    bindings: &HostBindings,
) {
    let options = RenderOptions {
        theme: theme_name.to_string(),
        ..Default::default()
    };
    render_into_with(source, container, bindings, &options).await
}

pub async fn render_into_with(
    source: &str,
    container: &mut Element,
    bindings: &HostBindings,
    options: &RenderOptions,
) {
    let palette = theme::lookup(&options.theme);
    container.clear_children();

    let chain = backend::render_with(source, &options.theme, bindings, options.blend);
    let node = match AssertUnwindSafe(chain).catch_unwind().await {
        Ok(node) => node,
        Err(panic) => {
            log::error!("Mermaid rendering panicked: {}", panic_message(panic.as_ref()));
            backend::placeholder(&palette, options.blend)
        }
    };

    container.append_child(node);
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
