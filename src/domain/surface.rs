//! API surface model.
//!
//! A surface is anything that can turn an attribute name into a [`Symbol`]:
//! a plain [`Namespace`] describing part of a runtime, a name-translating
//! proxy, or a layer of legacy bindings stacked over another surface.

use crate::domain::error::ResolveError;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Something attribute names can be resolved against.
pub trait ApiSurface: Send + Sync {
    /// Dotted path of this surface, e.g. `tf.io.gfile`.
    fn path(&self) -> &str;

    fn resolve(&self, name: &str) -> Result<Symbol, ResolveError>;

    /// Names this surface defines directly, sorted.
    fn names(&self) -> Vec<String>;

    fn has(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }
}

/// A value an attribute resolves to.
#[derive(Clone)]
pub enum Symbol {
    /// A callable, identified by its fully qualified path.
    Function(String),
    /// A class, identified by its fully qualified path.
    Class(String),
    /// A constant string value such as a version number.
    Constant(String),
    /// A nested surface.
    Module(Arc<dyn ApiSurface>),
}

impl Symbol {
    pub fn module(surface: impl ApiSurface + 'static) -> Self {
        Symbol::Module(Arc::new(surface))
    }

    pub fn as_module(&self) -> Option<&Arc<dyn ApiSurface>> {
        match self {
            Symbol::Module(surface) => Some(surface),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&str> {
        match self {
            Symbol::Constant(value) => Some(value),
            _ => None,
        }
    }
}

// Modules compare by path; two surfaces at the same path are the same module.
impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Symbol::Function(a), Symbol::Function(b))
            | (Symbol::Class(a), Symbol::Class(b))
            | (Symbol::Constant(a), Symbol::Constant(b)) => a == b,
            (Symbol::Module(a), Symbol::Module(b)) => a.path() == b.path(),
            _ => false,
        }
    }
}

impl Eq for Symbol {}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Function(path) => f.debug_tuple("Function").field(path).finish(),
            Symbol::Class(path) => f.debug_tuple("Class").field(path).finish(),
            Symbol::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Symbol::Module(surface) => f.debug_tuple("Module").field(&surface.path()).finish(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Function(path) | Symbol::Class(path) => write!(f, "{path}"),
            Symbol::Constant(value) => write!(f, "{value:?}"),
            Symbol::Module(surface) => write!(f, "{}", surface.path()),
        }
    }
}

/// A fixed set of named members under one dotted path.
#[derive(Clone, Default)]
pub struct Namespace {
    path: String,
    members: BTreeMap<String, Symbol>,
}

impl Namespace {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            members: BTreeMap::new(),
        }
    }

    pub fn child_path(&self, name: &str) -> String {
        format!("{}.{}", self.path, name)
    }

    pub fn insert(&mut self, name: impl Into<String>, symbol: Symbol) -> Option<Symbol> {
        self.members.insert(name.into(), symbol)
    }

    pub fn function(mut self, name: &str) -> Self {
        let path = self.child_path(name);
        self.members.insert(name.to_string(), Symbol::Function(path));
        self
    }

    pub fn class(mut self, name: &str) -> Self {
        let path = self.child_path(name);
        self.members.insert(name.to_string(), Symbol::Class(path));
        self
    }

    pub fn constant(mut self, name: &str, value: &str) -> Self {
        self.members
            .insert(name.to_string(), Symbol::Constant(value.to_string()));
        self
    }

    /// Add a nested namespace built by `build`.
    pub fn module(mut self, name: &str, build: impl FnOnce(Namespace) -> Namespace) -> Self {
        let child = build(Namespace::new(self.child_path(name)));
        self.members.insert(name.to_string(), Symbol::module(child));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("path", &self.path)
            .field("members", &self.members)
            .finish()
    }
}

impl ApiSurface for Namespace {
    fn path(&self) -> &str {
        &self.path
    }

    fn resolve(&self, name: &str) -> Result<Symbol, ResolveError> {
        self.members
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::missing(&self.path, name))
    }

    fn names(&self) -> Vec<String> {
        self.members.keys().cloned().collect()
    }
}

/// Resolve a dotted path such as `compat.v1.app` one segment at a time.
pub fn resolve_path(surface: &dyn ApiSurface, dotted: &str) -> Result<Symbol, ResolveError> {
    let mut segments = dotted.split('.');
    let first = segments.next().unwrap_or_default();
    let mut current = surface.resolve(first)?;

    for segment in segments {
        let next = match current.as_module() {
            Some(module) => module.resolve(segment)?,
            None => {
                return Err(ResolveError::NotAModule {
                    path: current.to_string(),
                });
            }
        };
        current = next;
    }

    Ok(current)
}

/// Like [`resolve_path`], but the target must be a module.
pub fn resolve_module(
    surface: &dyn ApiSurface,
    dotted: &str,
) -> Result<Arc<dyn ApiSurface>, ResolveError> {
    let symbol = resolve_path(surface, dotted)?;
    match symbol {
        Symbol::Module(module) => Ok(module),
        other => Err(ResolveError::NotAModule {
            path: other.to_string(),
        }),
    }
}
