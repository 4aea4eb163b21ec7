//! Public surface for Reverie.
//!
//! This crate re-exports the building blocks of the agent and provides the
//! logging and command helpers used by the interactive binary.

pub mod commands;

/// Re-export for convenience.
pub use reverie_config as config;
pub use reverie_core as core;
/// Re-export for convenience.
pub use reverie_memory as memory;
pub use reverie_tools as tools;

pub use commands::{HELP_TEXT, ReplInput, SlashCommand, render_memories, until_interrupted};
pub use reverie_core::MemoryAgent;

/// Initialize logging with env_logger.
///
/// `RUST_LOG` takes precedence over the default level; `verbose` lowers the
/// default from `info` to `debug`.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
