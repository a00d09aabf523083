//! tfcompat-shim entry point.
//!
//! Loads a TF2 API surface manifest, installs the TF1 shim over it and lists
//! the legacy names that became resolvable.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use tfcompat::compat::{SHIM_LOADED, install};
use tfcompat::infra::manifest::SurfaceManifest;

#[derive(Parser, Debug)]
#[command(name = "tfcompat-shim")]
#[command(version)]
#[command(about = "Show the TF1 names the compatibility shim provides", long_about = None)]
struct Args {
    /// JSON manifest describing the TF2 API surface
    #[arg(short, long)]
    surface: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let manifest = SurfaceManifest::load(&args.surface)
        .with_context(|| format!("Failed to load {}", args.surface.display()))?;

    let layer = install(Arc::new(manifest.into_namespace()))
        .context("Failed to install compatibility shim")?;

    // The shim's verbosity is the default level; RUST_LOG still overrides it.
    env_logger::Builder::new()
        .filter_level(layer.verbosity().level_filter())
        .parse_env(env_logger::Env::default())
        .init();
    log::info!("TF logging verbosity set to {}", layer.verbosity());

    for binding in layer.bindings() {
        println!("{} -> {}", binding.name, binding.target);
    }
    println!("{SHIM_LOADED}");

    Ok(())
}
