//! Rendering backends and the fallback chain that picks between them.

mod binding;
mod chain;

pub use binding::{
    Backend, Binding, Callable, HostBindings, InitializeFn, Member, PrimaryBackend,
    RenderFn, RenderMermaidFn, SecondaryBackend, PRIMARY_BINDING, SECONDARY_BINDING,
};
pub use chain::{placeholder, render, render_id, render_with, UNAVAILABLE_MESSAGES};
