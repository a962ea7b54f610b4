//! Tracing setup. Called once from `main` before the window opens.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Set to any value to get request-level logs from this crate.
const DEBUG_ENV: &str = "SPRINKLER_DEBUG";

// The renderer stack is chatty at info level.
const QUIET: [&str; 4] = ["wgpu_core=warn", "wgpu_hal=warn", "naga=warn", "cosmic_text=warn"];

pub fn enable_tracing() {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    for directive in QUIET {
        if let Ok(d) = directive.parse::<Directive>() {
            filter = filter.add_directive(d);
        }
    }

    if std::env::var_os(DEBUG_ENV).is_some() {
        if let Ok(d) = "sprinkler_deck=debug".parse::<Directive>() {
            filter = filter.add_directive(d);
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}
