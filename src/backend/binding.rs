//! Host-provided backend bindings and capability detection.
//!
//! A host exposes optional renderer objects by name, the way a page exposes
//! `window.beautifulMermaid` or `window.mermaid`. Nothing here assumes a binding
//! is well formed: detection only succeeds when every capability a backend
//! needs is present under its name and is a function of the right kind.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use indexmap::IndexMap;

use crate::error::BackendError;
use crate::theme::Palette;
use crate::types::{MermaidConfig, RenderOutput};

/// Name of the enhanced renderer binding
pub const PRIMARY_BINDING: &str = "beautifulMermaid";
/// Name of the baseline mermaid.js binding
pub const SECONDARY_BINDING: &str = "mermaid";

pub type RenderMermaidFn =
    Rc<dyn Fn(String, Palette) -> LocalBoxFuture<'static, Result<String, BackendError>>>;
pub type InitializeFn =
    Rc<dyn Fn(MermaidConfig) -> LocalBoxFuture<'static, Result<(), BackendError>>>;
pub type RenderFn =
    Rc<dyn Fn(String, String) -> LocalBoxFuture<'static, Result<RenderOutput, BackendError>>>;

/// A callable capability exposed by a binding
#[derive(Clone)]
pub enum Callable {
    /// `renderMermaid(source, palette) -> svg`
    RenderMermaid(RenderMermaidFn),
    /// `initialize(config)`
    Initialize(InitializeFn),
    /// `render(id, source) -> { svg }`
    Render(RenderFn),
}

impl Callable {
    pub fn render_mermaid<F, Fut>(f: F) -> Self
    where
        F: Fn(String, Palette) -> Fut + 'static,
        Fut: Future<Output = Result<String, BackendError>> + 'static,
    {
        Callable::RenderMermaid(Rc::new(move |source, palette| f(source, palette).boxed_local()))
    }

    pub fn initialize<F, Fut>(f: F) -> Self
    where
        F: Fn(MermaidConfig) -> Fut + 'static,
        Fut: Future<Output = Result<(), BackendError>> + 'static,
    {
        Callable::Initialize(Rc::new(move |config| f(config).boxed_local()))
    }

    pub fn render<F, Fut>(f: F) -> Self
    where
        F: Fn(String, String) -> Fut + 'static,
        Fut: Future<Output = Result<RenderOutput, BackendError>> + 'static,
    {
        Callable::Render(Rc::new(move |id, source| f(id, source).boxed_local()))
    }

    fn kind(&self) -> &'static str {
        match self {
            Callable::RenderMermaid(_) => "renderMermaid",
            Callable::Initialize(_) => "initialize",
            Callable::Render(_) => "render",
        }
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({})", self.kind())
    }
}

/// A named member of a binding object
#[derive(Debug, Clone)]
pub enum Member {
    Function(Callable),
    /// Anything that is not callable
    Value(serde_json::Value),
}

/// A duck-typed renderer object
#[derive(Debug, Clone, Default)]
pub struct Binding {
    members: IndexMap<String, Member>,
}

impl Binding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_function(mut self, name: &str, callable: Callable) -> Self {
        self.members.insert(name.to_string(), Member::Function(callable));
        self
    }

    pub fn with_value(mut self, name: &str, value: serde_json::Value) -> Self {
        self.members.insert(name.to_string(), Member::Value(value));
        self
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    fn function(&self, name: &str) -> Option<&Callable> {
        match self.members.get(name)? {
            Member::Function(callable) => Some(callable),
            Member::Value(_) => None,
        }
    }

    /// A well-formed enhanced renderer binding.
    pub fn beautiful_mermaid<F, Fut>(render_mermaid: F) -> Self
    where
        F: Fn(String, Palette) -> Fut + 'static,
        Fut: Future<Output = Result<String, BackendError>> + 'static,
    {
        Self::new().with_function("renderMermaid", Callable::render_mermaid(render_mermaid))
    }

    /// A well-formed mermaid.js binding.
    pub fn mermaid<I, IFut, R, RFut>(initialize: I, render: R) -> Self
    where
        I: Fn(MermaidConfig) -> IFut + 'static,
        IFut: Future<Output = Result<(), BackendError>> + 'static,
        R: Fn(String, String) -> RFut + 'static,
        RFut: Future<Output = Result<RenderOutput, BackendError>> + 'static,
    {
        Self::new()
            .with_function("initialize", Callable::initialize(initialize))
            .with_function("render", Callable::render(render))
    }
}

/// The ambient scope a render call may find backends in
#[derive(Debug, Clone, Default)]
pub struct HostBindings {
    bindings: HashMap<String, Binding>,
}

impl HostBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binding(mut self, name: &str, binding: Binding) -> Self {
        self.set(name, binding);
        self
    }

    pub fn set(&mut self, name: &str, binding: Binding) {
        self.bindings.insert(name.to_string(), binding);
    }

    pub fn remove(&mut self, name: &str) -> Option<Binding> {
        self.bindings.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Backends to try, in priority order. Always ends with [`Backend::Unavailable`].
    pub fn resolve(&self) -> Vec<Backend> {
        let primary = self
            .get(PRIMARY_BINDING)
            .and_then(PrimaryBackend::detect)
            .map(Backend::Primary);
        let secondary = self
            .get(SECONDARY_BINDING)
            .and_then(SecondaryBackend::detect)
            .map(Backend::Secondary);

        primary
            .into_iter()
            .chain(secondary)
            .chain(std::iter::once(Backend::Unavailable))
            .collect()
    }
}

/// Enhanced renderer that themes its own output
#[derive(Clone)]
pub struct PrimaryBackend {
    pub(crate) render_mermaid: RenderMermaidFn,
}

impl PrimaryBackend {
    pub fn detect(binding: &Binding) -> Option<Self> {
        match binding.function("renderMermaid")? {
            Callable::RenderMermaid(f) => Some(Self {
                render_mermaid: Rc::clone(f),
            }),
            _ => None,
        }
    }
}

/// Baseline mermaid.js renderer
#[derive(Clone)]
pub struct SecondaryBackend {
    pub(crate) initialize: InitializeFn,
    pub(crate) render: RenderFn,
}

impl SecondaryBackend {
    pub fn detect(binding: &Binding) -> Option<Self> {
        let initialize = match binding.function("initialize")? {
            Callable::Initialize(f) => Rc::clone(f),
            _ => return None,
        };
        let render = match binding.function("render")? {
            Callable::Render(f) => Rc::clone(f),
            _ => return None,
        };
        Some(Self { initialize, render })
    }
}

/// One state of the fallback chain
#[derive(Clone)]
pub enum Backend {
    Primary(PrimaryBackend),
    Secondary(SecondaryBackend),
    Unavailable,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Primary(_) => "primary",
            Backend::Secondary(_) => "secondary",
            Backend::Unavailable => "unavailable",
        }
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Backend::{}", self.name())
    }
}
