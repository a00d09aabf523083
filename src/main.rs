//! tfcompat-patch entry point.
//!
//! Inserts the `tf_compat` import into every file matching the given glob
//! patterns, keeping `from __future__` lines at the top.

use anyhow::{Context, Result};
use clap::Parser;

use tfcompat::application::patch::patch_patterns;
use tfcompat::infra::app_config::load_config;

#[derive(Parser, Debug)]
#[command(name = "tfcompat-patch")]
#[command(version)]
#[command(about = "Insert the TF1 compatibility import into Python files", long_about = None)]
struct Args {
    /// Glob patterns of files to patch (e.g. 'official/**/*.py')
    #[arg(required = true)]
    patterns: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = load_config();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    patch_patterns(&args.patterns, &config, &mut out).context("Patching failed")?;

    Ok(())
}
