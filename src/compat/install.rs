//! Installs TF1 names over a TF2 API surface.

use super::gfile::GFileTranslator;
use super::overlay::Overlay;
use crate::domain::{ApiSurface, ResolveError, Symbol, resolve_module, resolve_path};
use std::fmt;
use std::sync::Arc;

/// Printed once the shim is in place.
pub const SHIM_LOADED: &str = "TF1->TF2 compatibility shim loaded successfully";

/// Top-level TF1 namespaces that now live under `compat.v1`.
const COMPAT_V1_NAMESPACES: &[(&str, &str)] = &[
    ("app", "compat.v1.app"),
    ("logging", "compat.v1.logging"),
    ("flags", "compat.v1.flags"),
];

/// Top-level TF1 symbols moved to `compat.v1`, bound only when missing.
const COMPAT_V1_SYMBOLS: &[(&str, &str)] = &[
    ("ConfigProto", "compat.v1.ConfigProto"),
    ("Session", "compat.v1.Session"),
    (
        "global_variables_initializer",
        "compat.v1.global_variables_initializer",
    ),
];

/// `tf.train` hooks that TF2 only ships in `tf.estimator`.
pub const LEGACY_HOOKS: &[&str] = &[
    "SessionRunHook",
    "StopAtStepHook",
    "CheckpointSaverHook",
    "LoggingTensorHook",
    "NanTensorHook",
    "SummarySaverHook",
    "ProfilerHook",
];

const UNKNOWN_GIT_VERSION: &str = "unknown";

/// TF logging levels, as accepted by `tf.compat.v1.logging.set_verbosity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Verbosity {
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Warn => log::LevelFilter::Warn,
            Verbosity::Error | Verbosity::Fatal => log::LevelFilter::Error,
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verbosity::Debug => "DEBUG",
            Verbosity::Info => "INFO",
            Verbosity::Warn => "WARN",
            Verbosity::Error => "ERROR",
            Verbosity::Fatal => "FATAL",
        };
        f.write_str(name)
    }
}

/// One legacy name the shim made resolvable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Legacy name relative to the runtime root, e.g. `train.StopAtStepHook`.
    pub name: String,
    pub target: Symbol,
}

impl Binding {
    fn new(name: impl Into<String>, target: Symbol) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}

/// A TF2 runtime seen through TF1 names.
///
/// Legacy bindings resolve first; every other name falls through to the
/// runtime, which is never modified.
#[derive(Clone)]
pub struct CompatLayer {
    root: Overlay,
    gfile: GFileTranslator,
    bindings: Vec<Binding>,
    verbosity: Verbosity,
}

impl CompatLayer {
    /// The legacy `gfile` namespace.
    pub fn gfile(&self) -> &GFileTranslator {
        &self.gfile
    }

    /// Bindings created by [`install`], in installation order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

impl ApiSurface for CompatLayer {
    fn path(&self) -> &str {
        self.root.path()
    }

    fn resolve(&self, name: &str) -> Result<Symbol, ResolveError> {
        self.root.resolve(name)
    }

    fn names(&self) -> Vec<String> {
        self.root.names()
    }
}

/// Build the legacy view of `runtime`.
///
/// Fails with [`ResolveError::MissingAttribute`] when a modern attribute the
/// shim aliases is absent from the runtime.
pub fn install(runtime: Arc<dyn ApiSurface>) -> Result<CompatLayer, ResolveError> {
    let mut root = Overlay::new(runtime.clone());
    let mut bindings = Vec::new();

    for (legacy, modern) in COMPAT_V1_NAMESPACES {
        let target = resolve_path(runtime.as_ref(), modern)?;
        root.bind(legacy, target.clone());
        bindings.push(Binding::new(*legacy, target));
    }

    let gfile = GFileTranslator::new(
        format!("{}.gfile", runtime.path()),
        resolve_module(runtime.as_ref(), "io.gfile")?,
    );
    let gfile_symbol = Symbol::module(gfile.clone());
    root.bind("gfile", gfile_symbol.clone());
    bindings.push(Binding::new("gfile", gfile_symbol));

    for (legacy, modern) in COMPAT_V1_SYMBOLS {
        if root.has(legacy) {
            log::debug!("{} already defines {legacy}", runtime.path());
            continue;
        }
        let target = resolve_path(runtime.as_ref(), modern)?;
        root.bind(legacy, target.clone());
        bindings.push(Binding::new(*legacy, target));
    }

    if !root.has("VERSION") {
        let version = runtime.resolve("__version__")?;
        root.bind("VERSION", version.clone());
        bindings.push(Binding::new("VERSION", version));
    }
    if !root.has("GIT_VERSION") {
        let git_version = runtime
            .resolve("__git_version__")
            .unwrap_or_else(|_| Symbol::Constant(UNKNOWN_GIT_VERSION.to_string()));
        root.bind("GIT_VERSION", git_version.clone());
        bindings.push(Binding::new("GIT_VERSION", git_version));
    }

    if runtime.has("estimator") {
        let estimator = resolve_module(runtime.as_ref(), "estimator")?;
        let mut train = Overlay::new(resolve_module(runtime.as_ref(), "train")?);

        for hook in LEGACY_HOOKS {
            if train.has(hook) {
                continue;
            }
            let target = estimator.resolve(hook)?;
            train.bind(hook, target.clone());
            bindings.push(Binding::new(format!("train.{hook}"), target));
        }

        if !train.bindings().is_empty() {
            root.bind("train", Symbol::module(train));
        }
    } else {
        log::debug!("{} has no estimator; skipping train hooks", runtime.path());
    }

    log::info!(
        "Installed {} legacy bindings over {}",
        bindings.len(),
        runtime.path()
    );

    Ok(CompatLayer {
        root,
        gfile,
        bindings,
        verbosity: Verbosity::Info,
    })
}
